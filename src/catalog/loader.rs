use super::dto::EventResponse;
use super::model::Catalog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::{error, fs, io};
use tracing::{info, instrument, warn};

#[instrument]
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let json = fs::read_to_string(path).map_err(CatalogError::Unreadable)?;
    let catalog = parse_catalog(&json)?;

    info!("Loaded {} events", catalog.len());

    Ok(catalog)
}

/// Builds the catalog keeping the source order
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let responses =
        serde_json::from_str::<Vec<EventResponse>>(json).map_err(CatalogError::InvalidFormat)?;

    let events = responses
        .into_iter()
        .filter_map(|response| {
            let description = response.description.clone();

            response
                .to_model()
                .inspect_err(|reason| warn!("Skipping '{}' since {}", description, reason))
                .ok()
        })
        .collect();

    Ok(Catalog::new(events))
}

#[derive(Debug)]
pub enum CatalogError {
    Unreadable(io::Error),
    InvalidFormat(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Unreadable(err) => write!(f, "Couldn't read the events file: {}", err),
            CatalogError::InvalidFormat(err) => write!(f, "Invalid events file: {}", err),
        }
    }
}

impl error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            CatalogError::Unreadable(err) => Some(err),
            CatalogError::InvalidFormat(err) => Some(err),
        }
    }
}
