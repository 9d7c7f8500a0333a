use super::dto::RecognizerResponse;
use super::model::Recognition;
use crate::config::model::RecognizerConfig;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use std::error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use tracing::{error, info, instrument};

const MAX_RETRIES: u32 = 3;

lazy_static! {
    static ref REST_CLIENT: ClientWithMiddleware = ClientBuilder::new(Client::new())
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES)
        ))
        .build();
}

/// Turns a user message into an intent with its entities
pub trait Recognizer: Send + Sync {
    /// `today` is the festival's current date, used for times without a day
    fn recognize(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> impl Future<Output = Result<Recognition, RecognizerError>> + Send;
}

/// Client of a LUIS application
pub struct LuisRecognizer {
    url: String,
    app_id: String,
    api_key: String,
}

impl LuisRecognizer {
    pub fn new(config: &RecognizerConfig) -> Self {
        Self {
            url: format!("https://{}/luis/v1/application", config.host_name),
            app_id: config.app_id.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl Recognizer for LuisRecognizer {
    #[instrument(skip(self))]
    async fn recognize(&self, text: &str, today: NaiveDate) -> Result<Recognition, RecognizerError> {
        let json_response = REST_CLIENT
            .get(&self.url)
            .query(&[
                ("id", self.app_id.as_str()),
                ("subscription-key", self.api_key.as_str()),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| RecognizerError::Unreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| RecognizerError::Unreachable(e.to_string()))?
            .text()
            .await
            .map_err(|e| RecognizerError::Unreachable(e.to_string()))?;

        match serde_json::from_str::<RecognizerResponse>(&json_response) {
            Ok(response) => {
                let recognition = response.to_model(today);
                let intent: &'static str = recognition.intent.into();

                info!("Recognized '{}' intent", intent);

                Ok(recognition)
            }
            Err(e) => {
                error!("Response parse failed: {:?}", e);
                Err(RecognizerError::InvalidResponse)
            }
        }
    }
}

#[derive(Debug)]
pub enum RecognizerError {
    Unreachable(String),
    InvalidResponse,
}

impl Display for RecognizerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognizerError::Unreachable(reason) => {
                write!(f, "Couldn't reach the recognizer: {}", reason)
            }
            RecognizerError::InvalidResponse => write!(f, "Recognizer sent an invalid response"),
        }
    }
}

impl error::Error for RecognizerError {}
