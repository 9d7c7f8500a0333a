use chrono::FixedOffset;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub discord_token: String,
    pub events_path: PathBuf,
    pub recognizer: RecognizerConfig,
    pub spotify: Option<SpotifyConfig>,
    pub festival: FestivalConfig,
}

#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub app_id: String,
    pub api_key: String,
    pub host_name: String,
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct FestivalConfig {
    /// Event links are relative to this
    pub details_base_url: String,
    /// Offset of the festival's timezone, which the recognizer resolves times in
    pub utc_offset: FixedOffset,
}
