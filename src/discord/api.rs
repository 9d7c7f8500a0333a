use crate::card::Card;
use crate::dialog::handler::{ConversationHandler, Reply};
use crate::dialog::state::DialogContext;
use crate::discord::sessions::{resume_or_start, SessionKey, Sessions};
use crate::intent::recognizer::Recognizer;
use crate::spotify::api::ArtistSearch;
use chrono::Utc;
use lazy_static::lazy_static;
use itertools::Itertools;
use regex::{Captures, Regex};
use serenity::all::{
    ChannelId, Colour, Context, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor,
    CreateMessage, EventHandler, GatewayIntents, Message, Ready, UserId,
};
use serenity::Client;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

const AUTHOR_NAME: &str = "Sonic";
const EMBED_COLOUR: u32 = 0x005eeb;
/// Discord rejects messages with more embeds
const MAX_EMBEDS_PER_MESSAGE: usize = 10;
const MAX_DESCRIPTION_LENGTH: usize = 4000;

lazy_static! {
    static ref USER_MENTION_REGEX: Regex =
        Regex::new("<@!?(\\d+)>").expect("Failed to create mention regex");
}

pub struct BotHandler<R, S> {
    conversation: ConversationHandler<R, S>,
    sessions: Sessions,
}

impl<R, S> BotHandler<R, S> {
    pub fn new(conversation: ConversationHandler<R, S>) -> Self {
        Self {
            conversation,
            sessions: Sessions::default(),
        }
    }
}

#[serenity::async_trait]
impl<R, S> EventHandler for BotHandler<R, S>
where
    R: Recognizer + 'static,
    S: ArtistSearch + 'static,
{
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let own_user_id = ctx.cache.current_user().id;
        let key = (msg.channel_id, msg.author.id);
        let pending = self.sessions.take(&key).await;
        let is_addressed = msg.guild_id.is_none() || msg.mentions_user_id(own_user_id);

        let Some(context) = resume_or_start(pending, is_addressed, Instant::now()) else {
            return;
        };

        self.answer(&ctx, &msg, own_user_id, key, context).await;
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("Connected as {}", ready.user.name);
    }
}

impl<R, S> BotHandler<R, S>
where
    R: Recognizer,
    S: ArtistSearch,
{
    #[instrument(skip_all, fields(channel_id = %msg.channel_id.to_string(), dialog_id = %context.id))]
    async fn answer(
        &self,
        ctx: &Context,
        msg: &Message,
        own_user_id: UserId,
        key: SessionKey,
        mut context: DialogContext,
    ) {
        let text = strip_own_mentions(&msg.content, own_user_id);

        if let Err(e) = msg.channel_id.broadcast_typing(&ctx.http).await {
            debug!("Couldn't show typing: {}", e);
        }

        let replies = self.conversation.handle(&mut context, &text, Utc::now()).await;

        self.sessions.keep(key, context, Instant::now()).await;

        for reply in replies {
            if let Err(err) = send_reply(ctx, msg.channel_id, reply).await {
                error!("Failed sending reply due to '{}'", err);
            }
        }
    }
}

async fn send_reply(ctx: &Context, channel_id: ChannelId, reply: Reply) -> serenity::Result<()> {
    match reply {
        Reply::Text(text) => {
            channel_id.say(&ctx.http, text).await?;
        }
        Reply::Card(card) => {
            let mut message_builder = CreateMessage::new().embed(create_embed(&card));

            if let Some(button) = &card.button {
                message_builder = message_builder.components(vec![CreateActionRow::Buttons(vec![
                    CreateButton::new_link(&button.url).label(&button.label),
                ])]);
            }

            channel_id.send_message(&ctx.http, message_builder).await?;
        }
        Reply::Carousel(cards) => {
            for chunk in cards.chunks(MAX_EMBEDS_PER_MESSAGE) {
                debug!("Sending {} cards", chunk.len());

                let message_builder =
                    CreateMessage::new().embeds(chunk.iter().map(create_embed).collect());

                channel_id.send_message(&ctx.http, message_builder).await?;
            }
        }
    }

    Ok(())
}

fn create_embed(card: &Card) -> CreateEmbed {
    let description = match &card.subtitle {
        Some(subtitle) => format!("**{}**\n{}", subtitle, card.text),
        None => card.text.clone(),
    };
    let short_description: String = description.chars().take(MAX_DESCRIPTION_LENGTH).collect();

    let mut embed = CreateEmbed::new()
        .title(&card.title)
        .description(short_description)
        .author(CreateEmbedAuthor::new(AUTHOR_NAME))
        .color(Colour::new(EMBED_COLOUR));

    if let Some(image_url) = &card.image_url {
        embed = embed.image(image_url);
    }

    if let Some(button) = &card.button {
        embed = embed.url(&button.url);
    }

    embed
}

/// Removes the mentions of the bot, leaving other users' in place
fn strip_own_mentions(content: &str, own_user_id: UserId) -> String {
    let own_user_id = own_user_id.to_string();

    USER_MENTION_REGEX
        .replace_all(content, |captures: &Captures| {
            if captures[1] == own_user_id {
                String::new()
            } else {
                captures[0].to_string()
            }
        })
        .split_whitespace()
        .join(" ")
}

pub struct DiscordBot;

impl DiscordBot {
    pub async fn start<R, S>(token: &str, handler: BotHandler<R, S>) -> serenity::Result<()>
    where
        R: Recognizer + 'static,
        S: ArtistSearch + 'static,
    {
        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(token, intents)
            .event_handler(handler)
            .await?;

        info!("Starting Discord client");

        client.start().await
    }
}
