use crate::intent::model::{ExtractedEntities, Intent, Recognition};
use tracing::debug;
use uuid::Uuid;

pub const ARTIST_PROMPT: &str = "What artist/band are you looking for?";
pub const VENUE_PROMPT: &str =
    "I will try to find some parties close to you! Which stage or venue are you at?";

/// What the artist is being looked up for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistQuery {
    Event,
    Song,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    AwaitingArtist(ArtistQuery),
    AwaitingVenue,
    #[default]
    Resolved,
}

/// A lookup with all of its required input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Help,
    Artist { name: String, query: ArtistQuery },
    Timetable { entities: ExtractedEntities },
    Venue { name: String },
    NotUnderstood { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Prompt(&'static str),
    Lookup(Lookup),
    /// The user answered a prompt with nothing
    Cancelled,
}

/// State of one conversation, kept between its messages
#[derive(Debug, Clone)]
pub struct DialogContext {
    pub id: Uuid,
    state: DialogState,
}

impl Default for DialogContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: DialogState::Resolved,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state != DialogState::Resolved
    }

    /// Starts over from a freshly recognized message
    pub fn begin(&mut self, recognition: Recognition, text: &str) -> Step {
        let entities = recognition.entities;

        let (state, step) = match recognition.intent {
            Intent::WhatCanIDo => (DialogState::Resolved, Step::Lookup(Lookup::Help)),
            Intent::GetData => Self::require_artist(entities.artist, ArtistQuery::Event),
            Intent::GetSong => Self::require_artist(entities.artist, ArtistQuery::Song),
            Intent::GetTimetable => (
                DialogState::Resolved,
                Step::Lookup(Lookup::Timetable { entities }),
            ),
            Intent::GetLocation => (DialogState::AwaitingVenue, Step::Prompt(VENUE_PROMPT)),
            Intent::Unknown => (
                DialogState::Resolved,
                Step::Lookup(Lookup::NotUnderstood {
                    text: text.to_string(),
                }),
            ),
        };

        self.transition(state);
        step
    }

    /// Feeds the reply to the last prompt. None when no prompt is pending.
    pub fn answer(&mut self, text: &str) -> Option<Step> {
        let text = text.trim();

        let step = match self.state {
            DialogState::Resolved => return None,
            _ if text.is_empty() => Step::Cancelled,
            DialogState::AwaitingArtist(query) => Step::Lookup(Lookup::Artist {
                name: text.to_string(),
                query,
            }),
            DialogState::AwaitingVenue => Step::Lookup(Lookup::Venue {
                name: text.to_string(),
            }),
        };

        self.transition(DialogState::Resolved);
        Some(step)
    }

    fn require_artist(artist: Option<String>, query: ArtistQuery) -> (DialogState, Step) {
        match artist {
            Some(name) => (
                DialogState::Resolved,
                Step::Lookup(Lookup::Artist { name, query }),
            ),
            None => (DialogState::AwaitingArtist(query), Step::Prompt(ARTIST_PROMPT)),
        }
    }

    fn transition(&mut self, state: DialogState) {
        if self.state != state {
            debug!(dialog_id = %self.id, "Dialog went from {:?} to {:?}", self.state, state);
        }

        self.state = state;
    }
}
