use crate::catalog::model::EventRecord;
use crate::spotify::model::SpotifyArtist;
use scraper::Html;

const DETAILS_LABEL: &str = "View more details";
const PLAY_LABEL: &str = "Play on Spotify";

/// Rich reply describing one event, independent of the chat platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub subtitle: Option<String>,
    pub text: String,
    pub image_url: Option<String>,
    pub button: Option<CardButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardButton {
    pub label: String,
    pub url: String,
}

impl Card {
    pub fn for_event(event: &EventRecord, details_base_url: &str) -> Self {
        Self {
            title: event.description.clone(),
            subtitle: Some(format!(
                "{} — {} {} - {} at {}",
                event.description, event.day, event.start_time, event.end_time, event.location
            )),
            text: to_plain_text(&event.text),
            image_url: non_empty(&event.img),
            button: Some(CardButton {
                label: DETAILS_LABEL.to_string(),
                url: format!("{}{}", details_base_url, event.link),
            }),
        }
    }

    pub fn for_song(event: &EventRecord, artist: &SpotifyArtist) -> Self {
        Self {
            title: event.description.clone(),
            subtitle: None,
            text: to_plain_text(&event.text),
            image_url: artist.image_url.clone(),
            button: Some(CardButton {
                label: PLAY_LABEL.to_string(),
                url: artist.url.clone(),
            }),
        }
    }
}

/// Event texts come with HTML markup
fn to_plain_text(text: &str) -> String {
    let fragment = Html::parse_fragment(text);

    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
