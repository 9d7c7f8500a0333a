use super::model::{ExtractedEntities, Intent, Recognition};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_either::SingleOrVec;
use tracing::{trace, warn};

const ARTIST_ENTITY: &str = "band";
const VENUE_ENTITY: &str = "venue";
const DATETIME_ENTITY_PREFIX: &str = "builtin.datetime";
/// Below this score, the recognizer's best guess isn't trusted
const INTENT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizerResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub top_scoring_intent: Option<IntentResponse>,
    #[serde(default)]
    pub intents: Vec<IntentResponse>,
    #[serde(default)]
    pub entities: Vec<EntityResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentResponse {
    pub intent: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct EntityResponse {
    pub entity: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub resolution: Option<ResolutionResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ResolutionResponse {
    pub date: Option<String>,
    pub time: Option<String>,
    pub values: Option<SingleOrVec<ResolutionValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionValue {
    pub value: Option<String>,
}

impl RecognizerResponse {
    /// `today` is the festival's current date, for times said without a day
    pub fn to_model(&self, today: NaiveDate) -> Recognition {
        Recognition::new(self.top_intent(), self.extract_entities(today))
    }

    fn top_intent(&self) -> Intent {
        let top = self.top_scoring_intent.clone().or_else(|| {
            self.intents
                .iter()
                .max_by(|a, b| a.score.unwrap_or(0.0).total_cmp(&b.score.unwrap_or(0.0)))
                .cloned()
        });

        match top {
            Some(top) if top.score.unwrap_or(1.0) >= INTENT_THRESHOLD => {
                trace!("Top intent is '{}'", top.intent);
                Intent::from_label(&top.intent)
            }
            _ => Intent::Unknown,
        }
    }

    fn extract_entities(&self, today: NaiveDate) -> ExtractedEntities {
        ExtractedEntities {
            artist: self.find_entity(ARTIST_ENTITY),
            venue: self.find_entity(VENUE_ENTITY),
            datetime: self.resolve_datetime(today),
        }
    }

    fn find_entity(&self, entity_type: &str) -> Option<String> {
        self.entities
            .iter()
            .filter(|entity| entity.entity_type == entity_type)
            .map(|entity| entity.entity.trim())
            .find(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Combines the date and time entities. A date alone means its midnight, a time alone means today.
    fn resolve_datetime(&self, today: NaiveDate) -> Option<NaiveDateTime> {
        let mut date: Option<NaiveDate> = None;
        let mut time: Option<NaiveTime> = None;

        let resolutions = self
            .entities
            .iter()
            .filter(|entity| entity.entity_type.starts_with(DATETIME_ENTITY_PREFIX))
            .filter_map(|entity| entity.resolution.as_ref());

        for resolution in resolutions {
            if let Some(resolved) = resolution.date.as_deref().and_then(parse_date) {
                date = date.or(Some(resolved));
            }

            if let Some(raw) = resolution.time.as_deref() {
                let (resolved_date, resolved_time) = parse_time(raw);
                date = date.or(resolved_date);
                time = time.or(resolved_time);
            }

            for value in resolution_values(resolution) {
                if let Some(datetime) = parse_datetime(&value) {
                    date = date.or(Some(datetime.date()));
                    time = time.or(Some(datetime.time()));
                } else if let Some(resolved) = parse_date(&value) {
                    date = date.or(Some(resolved));
                } else {
                    warn!("Ignoring unsupported datetime value '{}'", value);
                }
            }
        }

        match (date, time) {
            (None, None) => None,
            (date, time) => Some(NaiveDateTime::new(
                date.unwrap_or(today),
                time.unwrap_or(NaiveTime::MIN),
            )),
        }
    }
}

fn resolution_values(resolution: &ResolutionResponse) -> Vec<String> {
    let values = match &resolution.values {
        None => return Vec::new(),
        Some(SingleOrVec::Single(value)) => vec![value.clone()],
        Some(SingleOrVec::Vec(values)) => values.clone(),
    };

    values.into_iter().filter_map(|value| value.value).collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
}

/// Handles `T20`, `T20:30`, `2017-01-12T20` and their longer forms
fn parse_time(raw: &str) -> (Option<NaiveDate>, Option<NaiveTime>) {
    let raw = raw.trim();
    let (date_part, time_part) = match raw.split_once('T') {
        Some((date_part, time_part)) => (date_part, time_part),
        None => ("", raw),
    };

    let mut fields = time_part.split(':').map(|field| field.parse::<u32>().ok());
    let hour = fields.next().flatten();
    let minute = fields.next().flatten().unwrap_or(0);
    let second = fields.next().flatten().unwrap_or(0);

    (
        parse_date(date_part),
        hour.and_then(|hour| NaiveTime::from_hms_opt(hour, minute, second)),
    )
}
