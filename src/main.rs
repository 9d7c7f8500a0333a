use sonic::catalog::loader::load_catalog;
use sonic::config::env_loader::load_config;
use sonic::dialog::handler::ConversationHandler;
use sonic::discord::api::{BotHandler, DiscordBot};
use sonic::intent::recognizer::LuisRecognizer;
use sonic::spotify::api::SpotifyAPI;
use sonic::tracing::setup_loki;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let loki = setup_loki().await;
    let config = load_config();

    let catalog = Arc::new(load_catalog(&config.events_path)?);

    if catalog.is_empty() {
        error!("No events found in {}", config.events_path.display());
    }

    let conversation = ConversationHandler::new(
        catalog,
        LuisRecognizer::new(&config.recognizer),
        config.spotify.clone().map(SpotifyAPI::new),
        config.festival.clone(),
    );

    let result = DiscordBot::start(&config.discord_token, BotHandler::new(conversation)).await;

    info!("Shutting down");

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        let _ = handle.await;
    }

    Ok(result?)
}
