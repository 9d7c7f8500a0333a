use super::model::{EventRecord, MILLIS_PER_SECOND};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::{Display, Formatter};

// Note: the display fields need the custom deserializer since some entries have them as null
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    #[serde(deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub day: String,
    #[serde(default, alias = "startTime", deserialize_with = "deserialize_str")]
    pub start_time: String,
    #[serde(default, alias = "endTime", deserialize_with = "deserialize_str")]
    pub end_time: String,
    #[serde(deserialize_with = "deserialize_epoch")]
    pub start: i64,
    #[serde(deserialize_with = "deserialize_epoch")]
    pub end: i64,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub img: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub link: String,
}

impl EventResponse {
    pub fn to_model(self) -> Result<EventRecord, InvalidInterval> {
        if self.start.checked_mul(MILLIS_PER_SECOND).is_none()
            || self.end.checked_mul(MILLIS_PER_SECOND).is_none()
        {
            return Err(InvalidInterval::OutOfRange);
        }

        if self.start >= self.end {
            return Err(InvalidInterval::Inverted);
        }

        Ok(EventRecord {
            description: self.description,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            start: self.start,
            end: self.end,
            location: self.location,
            text: self.text,
            img: self.img,
            link: self.link,
        })
    }
}

/// Why an event can never be found by time
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidInterval {
    Inverted,
    OutOfRange,
}

impl Display for InvalidInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInterval::Inverted => write!(f, "it ends before it starts"),
            InvalidInterval::OutOfRange => write!(f, "its times are out of range"),
        }
    }
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn deserialize_epoch<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("'{}' is not an epoch in seconds", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("'{}' is not an epoch in seconds", s))),
        unknown => Err(de::Error::custom(format!(
            "Found an unknown data type: {}",
            unknown
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_deserialize_event() {
        let dto = serde_json::from_str::<Vec<EventResponse>>(
            r##"
              [{
                "description": "Blaudzun",
                "day": "Thursday",
                "start_time": "20:30",
                "end_time": "21:30",
                "start": 1484249400,
                "end": 1484253000,
                "location": "Oosterpoort - Grote Zaal",
                "text": "<p>Blaudzun is back.</p>",
                "img": "https://www.eurosonic-noorderslag.nl/img/blaudzun.jpg",
                "link": "/program/blaudzun"
              }]"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let dto = dto.unwrap().pop().unwrap();

        assert_eq!(dto.start_time, "20:30");
        assert_eq!(dto.start, 1484249400);
        assert_eq!(dto.location, "Oosterpoort - Grote Zaal");
    }

    #[test_log::test]
    fn should_accept_camel_case_times_and_null_display_fields() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{
                "description": "Kensington",
                "day": null,
                "startTime": "22:00",
                "endTime": "23:00",
                "start": "1484258400",
                "end": 1484262000,
                "location": "Vera",
                "text": null
              }"##,
        )
        .unwrap();

        assert_eq!(dto.start_time, "22:00");
        assert_eq!(dto.end_time, "23:00");
        assert_eq!(dto.day, "");
        assert_eq!(dto.text, "");
        assert_eq!(dto.img, "");
        assert_eq!(dto.start, 1484258400);
    }

    #[test_log::test]
    fn when_start_is_not_numeric_should_fail() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{ "description": "Kensington", "start": "tonight", "end": 1484262000 }"##,
        );

        assert!(dto.is_err());
    }

    #[test_log::test]
    fn when_interval_is_inverted_should_not_become_a_model() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{ "description": "Kensington", "start": 2000, "end": 2000 }"##,
        )
        .unwrap();

        assert_eq!(dto.to_model(), Err(InvalidInterval::Inverted));
    }

    #[test_log::test]
    fn when_epoch_overflows_in_millis_should_not_become_a_model() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{ "description": "Kensington", "start": 10000000000000000, "end": 10000000000000001 }"##,
        )
        .unwrap();

        assert_eq!(dto.to_model(), Err(InvalidInterval::OutOfRange));
    }
}
