use itertools::Itertools;

pub const MILLIS_PER_SECOND: i64 = 1000;

/// One scheduled festival performance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub description: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    /// Epoch seconds
    pub start: i64,
    /// Epoch seconds
    pub end: i64,
    pub location: String,
    pub text: String,
    pub img: String,
    pub link: String,
}

impl EventRecord {
    pub fn start_millis(&self) -> i64 {
        self.start.saturating_mul(MILLIS_PER_SECOND)
    }

    pub fn end_millis(&self) -> i64 {
        self.end.saturating_mul(MILLIS_PER_SECOND)
    }
}

/// Immutable, ordered collection of the festival's events.
///
/// Alongside the events it keeps the list of descriptions, positionally
/// aligned with them, which is what artist names get matched against.
#[derive(Debug, Default)]
pub struct Catalog {
    events: Vec<EventRecord>,
    descriptions: Vec<String>,
}

impl Catalog {
    pub fn new(events: Vec<EventRecord>) -> Self {
        let descriptions = events
            .iter()
            .map(|event| event.description.clone())
            .collect();

        Self {
            events,
            descriptions,
        }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.events.get(index)
    }

    /// Distinct venue names, in order of first appearance
    pub fn locations(&self) -> Vec<&str> {
        self.events
            .iter()
            .map(|event| event.location.as_str())
            .filter(|location| !location.is_empty())
            .unique()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn event(description: &str, location: &str, start: i64, end: i64) -> EventRecord {
    EventRecord {
        description: description.to_string(),
        day: "Thursday".to_string(),
        start_time: "20:00".to_string(),
        end_time: "21:00".to_string(),
        start,
        end,
        location: location.to_string(),
        text: format!("{} live", description),
        img: format!("https://example.com/{}.jpg", description),
        link: format!("/program/{}", description.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_keep_descriptions_aligned_with_events() {
        let catalog = Catalog::new(vec![
            event("Blaudzun", "Oosterpoort", 1000, 2000),
            event("Kensington", "Vera", 2000, 3000),
        ]);

        assert_eq!(catalog.descriptions(), ["Blaudzun", "Kensington"]);
        assert_eq!(catalog.get(1).map(|e| e.location.as_str()), Some("Vera"));
    }

    #[test_log::test]
    fn should_list_each_location_once_in_catalog_order() {
        let catalog = Catalog::new(vec![
            event("A", "Vera", 1000, 2000),
            event("B", "Oosterpoort", 1000, 2000),
            event("C", "Vera", 2000, 3000),
            event("D", "", 2000, 3000),
        ]);

        assert_eq!(catalog.locations(), vec!["Vera", "Oosterpoort"]);
    }

    #[test_log::test]
    fn should_convert_interval_to_millis() {
        let record = event("Blaudzun", "Vera", 1000, 2000);

        assert_eq!(record.start_millis(), 1_000_000);
        assert_eq!(record.end_millis(), 2_000_000);
    }

    #[test_log::test]
    fn when_interval_is_out_of_range_should_saturate_instead_of_overflowing() {
        let record = event("Blaudzun", "Vera", i64::MAX / 10, i64::MAX / 10 + 1);

        assert_eq!(record.start_millis(), i64::MAX);
        assert_eq!(record.end_millis(), i64::MAX);
    }
}
