use super::dto::{SearchResponse, TokenResponse};
use super::model::SpotifyArtist;
use crate::config::model::SpotifyConfig;
use lazy_static::lazy_static;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use serde::de::DeserializeOwned;
use std::error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";
const SEARCH_TYPES: &str = "artist,track";
const MAX_RETRIES: u32 = 3;

lazy_static! {
    static ref REST_CLIENT: ClientWithMiddleware = ClientBuilder::new(Client::new())
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES)
        ))
        .build();
}

/// Looks up an artist to be played
pub trait ArtistSearch: Send + Sync {
    fn search_artist(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SpotifyArtist>, SpotifyAPIError>> + Send;
}

pub struct SpotifyAPI {
    config: SpotifyConfig,
    access_token: Mutex<Option<String>>,
}

impl SpotifyAPI {
    pub fn new(config: SpotifyConfig) -> Self {
        Self {
            config,
            access_token: Mutex::new(None),
        }
    }

    async fn get_access_token(&self) -> Result<String, SpotifyAPIError> {
        let mut access_token = self.access_token.lock().await;

        if let Some(token) = access_token.as_ref() {
            return Ok(token.clone());
        }

        info!("Requesting access token");

        let response = REST_CLIENT
            .post(TOKEN_URL)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| SpotifyAPIError::Unreachable(e.to_string()))?;

        let token = parse_response::<TokenResponse>(response).await?.access_token;
        *access_token = Some(token.clone());

        Ok(token)
    }

    async fn forget_access_token(&self) {
        *self.access_token.lock().await = None;
    }

    async fn search(&self, name: &str, token: &str) -> Result<reqwest::Response, SpotifyAPIError> {
        REST_CLIENT
            .get(SEARCH_URL)
            .bearer_auth(token)
            .query(&[("q", name), ("type", SEARCH_TYPES)])
            .send()
            .await
            .map_err(|e| SpotifyAPIError::Unreachable(e.to_string()))
    }
}

impl ArtistSearch for SpotifyAPI {
    #[instrument(skip(self))]
    async fn search_artist(&self, name: &str) -> Result<Option<SpotifyArtist>, SpotifyAPIError> {
        let token = self.get_access_token().await?;
        let mut response = self.search(name, &token).await?;

        // Tokens expire after an hour
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!("Access token expired, requesting a new one");
            self.forget_access_token().await;

            let token = self.get_access_token().await?;
            response = self.search(name, &token).await?;
        }

        let artist = parse_response::<SearchResponse>(response).await?.to_model();

        match &artist {
            Some(artist) => info!("Found '{}' on Spotify", artist.name),
            None => info!("Artist not on Spotify"),
        }

        Ok(artist)
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SpotifyAPIError> {
    let json_response = response
        .error_for_status()
        .map_err(|e| SpotifyAPIError::Unreachable(e.to_string()))?
        .text()
        .await
        .map_err(|e| SpotifyAPIError::Unreachable(e.to_string()))?;

    serde_json::from_str::<T>(&json_response).map_err(|e| {
        error!("Response parse failed: {:?}", e);
        SpotifyAPIError::InvalidResponse
    })
}

#[derive(Debug)]
pub enum SpotifyAPIError {
    Unreachable(String),
    InvalidResponse,
}

impl Display for SpotifyAPIError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SpotifyAPIError::Unreachable(reason) => write!(f, "Couldn't reach Spotify: {}", reason),
            SpotifyAPIError::InvalidResponse => write!(f, "Spotify sent an invalid response"),
        }
    }
}

impl error::Error for SpotifyAPIError {}
