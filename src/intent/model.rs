use chrono::{NaiveDateTime, NaiveTime};

/// Intents the recognizer was trained on
#[derive(strum::EnumString, strum::IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    #[strum(serialize = "whatCanIDo")]
    WhatCanIDo,
    #[strum(serialize = "getData")]
    GetData,
    #[strum(serialize = "getTimetable")]
    GetTimetable,
    #[strum(serialize = "getLocation")]
    GetLocation,
    #[strum(serialize = "getSong")]
    GetSong,
    #[strum(serialize = "None")]
    Unknown,
}

impl Intent {
    /// Unknown labels fall back to [`Intent::Unknown`]
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Intent::Unknown)
    }
}

/// Entities extracted from a message, already validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntities {
    pub artist: Option<String>,
    pub venue: Option<String>,
    /// Festival local time
    pub datetime: Option<NaiveDateTime>,
}

impl ExtractedEntities {
    /// Whether a datetime refers to a whole day rather than a moment
    pub fn is_whole_day(&self) -> bool {
        self.datetime
            .is_some_and(|datetime| datetime.time() == NaiveTime::MIN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    pub intent: Intent,
    pub entities: ExtractedEntities,
}

impl Recognition {
    pub fn new(intent: Intent, entities: ExtractedEntities) -> Self {
        Self { intent, entities }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test_log::test]
    fn should_parse_recognizer_labels() {
        assert_eq!(Intent::from_label("whatCanIDo"), Intent::WhatCanIDo);
        assert_eq!(Intent::from_label("getTimetable"), Intent::GetTimetable);
        assert_eq!(Intent::from_label("getSong"), Intent::GetSong);
    }

    #[test_log::test]
    fn when_label_is_unknown_should_be_unknown() {
        assert_eq!(Intent::from_label("bookTickets"), Intent::Unknown);
    }

    #[test_log::test]
    fn should_consider_midnight_a_whole_day() {
        let date = NaiveDate::from_ymd_opt(2017, 1, 12).unwrap();
        let whole_day = ExtractedEntities {
            datetime: date.and_hms_opt(0, 0, 0),
            ..Default::default()
        };
        let evening = ExtractedEntities {
            datetime: date.and_hms_opt(20, 0, 0),
            ..Default::default()
        };

        assert!(whole_day.is_whole_day());
        assert!(!evening.is_whole_day());
        assert!(!ExtractedEntities::default().is_whole_day());
    }
}
