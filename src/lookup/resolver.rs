use super::matcher::{FuzzyMatcher, DEFAULT_MAX_DISTANCE};
use crate::catalog::model::{Catalog, EventRecord};
use tracing::{debug, instrument};

/// Finds the event whose description is closest to a free-text artist name
pub struct ArtistResolver<'a> {
    catalog: &'a Catalog,
    matcher: FuzzyMatcher,
}

impl<'a> ArtistResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            matcher: FuzzyMatcher::new(catalog.descriptions(), DEFAULT_MAX_DISTANCE),
        }
    }

    #[instrument(skip(self))]
    pub fn resolve(&self, query: &str) -> Option<&'a EventRecord> {
        let event = self
            .matcher
            .best_match(query)
            .and_then(|index| self.catalog.get(index));

        match event {
            Some(event) => debug!("Resolved to '{}'", event.description),
            None => debug!("No artist close enough"),
        }

        event
    }
}

/// Finds the catalog's venue name closest to a free-text one
pub struct VenueResolver<'a> {
    locations: Vec<&'a str>,
    matcher: FuzzyMatcher,
}

impl<'a> VenueResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let locations = catalog.locations();
        let matcher = FuzzyMatcher::new(&locations, DEFAULT_MAX_DISTANCE);

        Self { locations, matcher }
    }

    #[instrument(skip(self))]
    pub fn resolve(&self, query: &str) -> Option<&'a str> {
        self.matcher
            .best_match(query)
            .map(|index| self.locations[index])
    }
}
