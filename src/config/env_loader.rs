use crate::config::model::{Config, FestivalConfig, RecognizerConfig, SpotifyConfig};
use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_EVENTS_PATH: &str = "data/events.json";
const DEFAULT_RECOGNIZER_HOST_NAME: &str = "api.projectoxford.ai";
const DEFAULT_DETAILS_BASE_URL: &str = "https://www.eurosonic-noorderslag.nl";
const DEFAULT_UTC_OFFSET_HOURS: i32 = 1;

pub fn load_config() -> Config {
    let discord_token = load_required_config("DISCORD_TOKEN");
    let events_path = PathBuf::from(load_str_config("EVENTS_FILE", DEFAULT_EVENTS_PATH));

    let recognizer = RecognizerConfig {
        app_id: load_required_config("LUIS_APP_ID"),
        api_key: load_required_config("LUIS_API_KEY"),
        host_name: load_str_config("LUIS_API_HOST_NAME", DEFAULT_RECOGNIZER_HOST_NAME),
    };

    let festival = FestivalConfig {
        details_base_url: load_str_config("EVENT_DETAILS_BASE_URL", DEFAULT_DETAILS_BASE_URL),
        utc_offset: load_offset_config("FESTIVAL_UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS),
    };

    Config {
        discord_token,
        events_path,
        recognizer,
        spotify: load_spotify_config(),
        festival,
    }
}

fn load_spotify_config() -> Option<SpotifyConfig> {
    match (env::var("SPOTIFY_CLIENT_ID"), env::var("SPOTIFY_CLIENT_SECRET")) {
        (Ok(client_id), Ok(client_secret)) => Some(SpotifyConfig {
            client_id,
            client_secret,
        }),
        (Err(_), Err(_)) => {
            warn!("Spotify credentials not provided. Song lookups are disabled.");
            None
        }
        _ => panic!("SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set together."),
    }
}

fn load_required_config(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{} must be set.", name))
}

fn load_str_config(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn load_offset_config(name: &str, default_hours: i32) -> FixedOffset {
    let hours: i32 = match env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            panic!("Invalid config '{}'. Expected an integer number.", name)
        }),
        Err(_) => default_hours,
    };

    FixedOffset::east_opt(hours * 3600)
        .unwrap_or_else(|| panic!("Invalid config '{}'. {} is not a valid UTC offset.", name, hours))
}
