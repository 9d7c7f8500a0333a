use super::state::{ArtistQuery, DialogContext, Lookup, Step};
use crate::card::Card;
use crate::catalog::model::{Catalog, EventRecord};
use crate::config::model::FestivalConfig;
use crate::intent::model::ExtractedEntities;
use crate::intent::recognizer::Recognizer;
use crate::lookup::finder::TimeWindowFinder;
use crate::lookup::resolver::{ArtistResolver, VenueResolver};
use crate::spotify::api::ArtistSearch;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const HELP_MESSAGE: &str = "Hi there!\nMy name is Sonic! I can help you find your favorite ESNS events, ask me anything ;). Some examples are:\nWhen is blaudzun playing?\nWho is playing near me?";
pub const ERROR_MESSAGE: &str = "Sorry, there was an error.";
pub const TIME_PROMPT: &str = "Which day or time would you like to know about?";
const CANCELLED_MESSAGE: &str = "Ok";

/// What to send back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Card(Card),
    Carousel(Vec<Card>),
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

/// Answers the messages of a conversation, one at a time
pub struct ConversationHandler<R, S> {
    catalog: Arc<Catalog>,
    recognizer: R,
    artist_search: Option<S>,
    festival: FestivalConfig,
}

impl<R: Recognizer, S: ArtistSearch> ConversationHandler<R, S> {
    pub fn new(
        catalog: Arc<Catalog>,
        recognizer: R,
        artist_search: Option<S>,
        festival: FestivalConfig,
    ) -> Self {
        Self {
            catalog,
            recognizer,
            artist_search,
            festival,
        }
    }

    #[instrument(skip(self, context, now), fields(dialog_id = %context.id))]
    pub async fn handle(
        &self,
        context: &mut DialogContext,
        text: &str,
        now: DateTime<Utc>,
    ) -> Vec<Reply> {
        let step = match context.answer(text) {
            Some(step) => step,
            None => match self.recognizer.recognize(text, self.today(now)).await {
                Ok(recognition) => context.begin(recognition, text),
                Err(err) => {
                    error!("Failed to recognize message: {}", err);
                    return vec![Reply::text(ERROR_MESSAGE)];
                }
            },
        };

        vec![self.run(step, now).await]
    }

    async fn run(&self, step: Step, now: DateTime<Utc>) -> Reply {
        match step {
            Step::Prompt(prompt) => Reply::text(prompt),
            Step::Cancelled => Reply::text(CANCELLED_MESSAGE),
            Step::Lookup(Lookup::Help) => Reply::text(HELP_MESSAGE),
            Step::Lookup(Lookup::Artist {
                name,
                query: ArtistQuery::Event,
            }) => self.describe_artist(&name),
            Step::Lookup(Lookup::Artist {
                name,
                query: ArtistQuery::Song,
            }) => self.play_artist(&name).await,
            Step::Lookup(Lookup::Timetable { entities }) => self.timetable(&entities),
            Step::Lookup(Lookup::Venue { name }) => self.remaining_at_venue(&name, now),
            Step::Lookup(Lookup::NotUnderstood { text }) => {
                Reply::text(format!("Sorry, I did not understand '{}'.", text))
            }
        }
    }

    fn describe_artist(&self, name: &str) -> Reply {
        match ArtistResolver::new(&self.catalog).resolve(name) {
            Some(event) => Reply::Card(Card::for_event(event, &self.festival.details_base_url)),
            None => artist_not_found(name),
        }
    }

    async fn play_artist(&self, name: &str) -> Reply {
        let Some(event) = ArtistResolver::new(&self.catalog).resolve(name) else {
            return artist_not_found(name);
        };

        let Some(artist_search) = &self.artist_search else {
            warn!("Song requested but Spotify isn't configured");
            return Reply::text(ERROR_MESSAGE);
        };

        match artist_search.search_artist(&event.description).await {
            Ok(Some(artist)) => Reply::Card(Card::for_song(event, &artist)),
            Ok(None) => Reply::text(format!(
                "Sorry, I could not find '{}' on Spotify.",
                event.description
            )),
            Err(err) => {
                error!("Failed to search Spotify: {}", err);
                Reply::text(ERROR_MESSAGE)
            }
        }
    }

    fn timetable(&self, entities: &ExtractedEntities) -> Reply {
        let Some(search_time) = entities.datetime.and_then(|datetime| self.to_millis(datetime)) else {
            return Reply::text(TIME_PROMPT);
        };

        let finder = TimeWindowFinder::new(&self.catalog);
        let mut events = if entities.is_whole_day() {
            info!("Looking for the whole day");
            finder.find_whole_day(search_time)
        } else {
            finder.find(search_time, None)
        };

        if let Some(venue) = &entities.venue {
            let Some(location) = VenueResolver::new(&self.catalog).resolve(venue) else {
                return venue_not_found(venue);
            };

            events.retain(|event| event.location == location);
        }

        if events.is_empty() {
            return Reply::text("Sorry, I could not find any events at that time.");
        }

        self.carousel(&events)
    }

    fn remaining_at_venue(&self, name: &str, now: DateTime<Utc>) -> Reply {
        let Some(location) = VenueResolver::new(&self.catalog).resolve(name) else {
            return venue_not_found(name);
        };

        let events =
            TimeWindowFinder::new(&self.catalog).find_remaining_at(location, now.timestamp_millis());

        if events.is_empty() {
            return Reply::text(format!("There are no more events at {}.", location));
        }

        self.carousel(&events)
    }

    fn carousel(&self, events: &[&EventRecord]) -> Reply {
        Reply::Carousel(
            events
                .iter()
                .map(|event| Card::for_event(event, &self.festival.details_base_url))
                .collect(),
        )
    }

    /// Recognized datetimes are in the festival's timezone
    fn to_millis(&self, datetime: NaiveDateTime) -> Option<i64> {
        datetime
            .and_local_timezone(self.festival.utc_offset)
            .single()
            .map(|datetime| datetime.timestamp_millis())
    }

    fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.festival.utc_offset).date_naive()
    }
}

fn artist_not_found(name: &str) -> Reply {
    Reply::text(format!("Sorry, I could not find the artist '{}'.", name))
}

fn venue_not_found(name: &str) -> Reply {
    Reply::text(format!("Sorry, I could not find the venue '{}'.", name))
}
