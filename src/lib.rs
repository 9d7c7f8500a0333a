pub mod card;
pub mod catalog;
pub mod config;
pub mod dialog;
pub mod discord;
pub mod intent;
pub mod lookup;
pub mod spotify;
pub mod tracing;
