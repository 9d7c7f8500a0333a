use crate::catalog::model::{Catalog, EventRecord};
use tracing::{debug, instrument};

pub const DAY_IN_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Looks up events by when they happen. All times are epoch milliseconds.
pub struct TimeWindowFinder<'a> {
    catalog: &'a Catalog,
}

impl<'a> TimeWindowFinder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /**
    Without an `end_time`, returns the events running at `search_time` (start inclusive, end exclusive).

    With one, returns only the events that fit strictly inside the range: an event starting
    exactly at `search_time` or ending exactly at `end_time` is left out.
    */
    #[instrument(skip(self))]
    pub fn find(&self, search_time: i64, end_time: Option<i64>) -> Vec<&'a EventRecord> {
        let events: Vec<&EventRecord> = self
            .catalog
            .events()
            .iter()
            .filter(|event| match end_time {
                Some(end_time) => event.start_millis() > search_time && event.end_millis() < end_time,
                None => search_time >= event.start_millis() && search_time < event.end_millis(),
            })
            .collect();

        debug!("Found {} events", events.len());

        events
    }

    /// Events of the day starting at `midnight`
    pub fn find_whole_day(&self, midnight: i64) -> Vec<&'a EventRecord> {
        self.find(midnight, Some(midnight + DAY_IN_MILLIS))
    }

    /// Events at `location` which haven't finished by `now`
    #[instrument(skip(self))]
    pub fn find_remaining_at(&self, location: &str, now: i64) -> Vec<&'a EventRecord> {
        self.catalog
            .events()
            .iter()
            .filter(|event| event.location == location && event.end_millis() > now)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::event;

    #[test_log::test]
    fn should_find_event_running_at_time() {
        let catalog = Catalog::new(vec![event("Blaudzun", "Vera", 1000, 2000)]);
        let finder = TimeWindowFinder::new(&catalog);

        assert_eq!(finder.find(1_500_000, None), vec![&catalog.events()[0]]);
        assert!(finder.find(500_000, None).is_empty());
    }

    #[test_log::test]
    fn should_include_start_and_exclude_end() {
        let catalog = Catalog::new(vec![event("Blaudzun", "Vera", 1000, 2000)]);
        let finder = TimeWindowFinder::new(&catalog);

        assert_eq!(finder.find(1_000_000, None).len(), 1);
        assert_eq!(finder.find(1_999_999, None).len(), 1);
        assert!(finder.find(2_000_000, None).is_empty());
        assert!(finder.find(999_999, None).is_empty());
    }

    #[test_log::test]
    fn when_events_are_back_to_back_should_find_only_the_starting_one() {
        let catalog = Catalog::new(vec![
            event("A", "Vera", 1000, 2000),
            event("B", "Vera", 2000, 3000),
        ]);
        let finder = TimeWindowFinder::new(&catalog);

        let result = finder.find(2_000_000, None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "B");
    }

    #[test_log::test]
    fn should_find_events_strictly_inside_range() {
        let catalog = Catalog::new(vec![
            event("Inside", "Vera", 1100, 1900),
            event("Starts at low", "Vera", 1000, 1500),
            event("Ends at high", "Vera", 1500, 2000),
            event("Overlapping", "Vera", 1800, 2500),
        ]);
        let finder = TimeWindowFinder::new(&catalog);

        let result = finder.find(1_000_000, Some(2_000_000));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "Inside");
    }

    #[test_log::test]
    fn should_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            event("Late", "Vera", 1500, 1800),
            event("Early", "Vera", 1100, 1200),
        ]);
        let finder = TimeWindowFinder::new(&catalog);

        let descriptions: Vec<&str> = finder
            .find(1_000_000, Some(2_000_000))
            .iter()
            .map(|event| event.description.as_str())
            .collect();

        assert_eq!(descriptions, vec!["Late", "Early"]);
    }

    #[test_log::test]
    fn should_find_whole_day() {
        let midnight = 1_484_179_200_000;
        let catalog = Catalog::new(vec![
            event("Evening", "Vera", 1_484_251_200, 1_484_254_800),
            event("Next day", "Vera", 1_484_272_800, 1_484_276_400),
        ]);
        let finder = TimeWindowFinder::new(&catalog);

        let result = finder.find_whole_day(midnight);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "Evening");
    }

    #[test_log::test]
    fn should_find_remaining_events_at_location() {
        let catalog = Catalog::new(vec![
            event("Finished", "Vera", 1000, 2000),
            event("Playing", "Vera", 2000, 3000),
            event("Elsewhere", "Simplon", 2000, 3000),
            event("Later", "Vera", 4000, 5000),
        ]);
        let finder = TimeWindowFinder::new(&catalog);

        let descriptions: Vec<&str> = finder
            .find_remaining_at("Vera", 2_500_000)
            .iter()
            .map(|event| event.description.as_str())
            .collect();

        assert_eq!(descriptions, vec!["Playing", "Later"]);
    }

    #[test_log::test]
    fn when_catalog_is_empty_should_find_nothing() {
        let catalog = Catalog::default();
        let finder = TimeWindowFinder::new(&catalog);

        assert!(finder.find(1_500_000, None).is_empty());
        assert!(finder.find(0, Some(i64::MAX)).is_empty());
    }
}
