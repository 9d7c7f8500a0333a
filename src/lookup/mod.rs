pub mod finder;
pub mod matcher;
pub mod resolver;
