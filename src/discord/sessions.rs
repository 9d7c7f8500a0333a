use crate::dialog::state::DialogContext;
use serenity::all::{ChannelId, UserId};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// How long a prompt waits for its answer
pub const PROMPT_TTL: Duration = Duration::from_secs(5 * 60);

/// A conversation is one user talking in one channel
pub type SessionKey = (ChannelId, UserId);

/// A dialog waiting for the user to answer a prompt
#[derive(Debug)]
pub struct PendingDialog {
    pub context: DialogContext,
    pub awaiting_since: Instant,
}

impl PendingDialog {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.awaiting_since) > PROMPT_TTL
    }
}

/// Picks the dialog a message belongs to.
///
/// A fresh pending dialog takes the message as its answer. Otherwise only a message
/// addressed to the bot starts a new one.
pub fn resume_or_start(
    pending: Option<PendingDialog>,
    is_addressed: bool,
    now: Instant,
) -> Option<DialogContext> {
    match pending {
        Some(pending) if !pending.is_expired(now) => Some(pending.context),
        _ if is_addressed => Some(DialogContext::new()),
        _ => None,
    }
}

#[derive(Default)]
pub struct Sessions {
    pending: Mutex<HashMap<SessionKey, PendingDialog>>,
}

impl Sessions {
    pub async fn take(&self, key: &SessionKey) -> Option<PendingDialog> {
        self.pending.lock().await.remove(key)
    }

    pub async fn is_pending(&self, key: &SessionKey) -> bool {
        self.pending.lock().await.contains_key(key)
    }

    /// Keeps the dialog only while it awaits an answer, dropping expired ones on the way
    pub async fn keep(&self, key: SessionKey, context: DialogContext, now: Instant) {
        let mut pending = self.pending.lock().await;

        pending.retain(|_, dialog| !dialog.is_expired(now));

        if context.is_awaiting() {
            debug!(dialog_id = %context.id, "Awaiting answer");

            pending.insert(
                key,
                PendingDialog {
                    context,
                    awaiting_since: now,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::model::{Intent, Recognition};

    fn awaiting_context() -> DialogContext {
        let mut context = DialogContext::new();
        context.begin(
            Recognition::new(Intent::GetData, Default::default()),
            "find a band",
        );
        context
    }

    fn key(user: u64) -> SessionKey {
        (ChannelId::new(1), UserId::new(user))
    }

    #[test_log::test]
    fn when_answer_is_in_time_should_resume_dialog_without_mention() {
        let now = Instant::now();
        let context = awaiting_context();
        let id = context.id;
        let pending = PendingDialog {
            context,
            awaiting_since: now,
        };

        let resumed = resume_or_start(Some(pending), false, now + Duration::from_secs(30));

        assert_eq!(resumed.map(|context| context.id), Some(id));
    }

    #[test_log::test]
    fn when_prompt_expired_should_ignore_unaddressed_message() {
        let now = Instant::now();
        let pending = PendingDialog {
            context: awaiting_context(),
            awaiting_since: now,
        };

        let resumed = resume_or_start(Some(pending), false, now + PROMPT_TTL + Duration::from_secs(1));

        assert!(resumed.is_none());
    }

    #[test_log::test]
    fn when_prompt_expired_should_start_over_if_addressed() {
        let now = Instant::now();
        let pending = PendingDialog {
            context: awaiting_context(),
            awaiting_since: now,
        };

        let resumed = resume_or_start(Some(pending), true, now + PROMPT_TTL + Duration::from_secs(1))
            .unwrap();

        assert!(!resumed.is_awaiting());
    }

    #[test_log::test]
    fn when_nothing_is_pending_should_require_being_addressed() {
        let now = Instant::now();

        assert!(resume_or_start(None, false, now).is_none());
        assert!(resume_or_start(None, true, now).is_some());
    }

    #[test_log::test(tokio::test)]
    async fn should_keep_only_awaiting_dialogs() {
        let sessions = Sessions::default();
        let now = Instant::now();

        sessions.keep(key(1), awaiting_context(), now).await;
        sessions.keep(key(2), DialogContext::new(), now).await;

        assert!(sessions.is_pending(&key(1)).await);
        assert!(!sessions.is_pending(&key(2)).await);
    }

    #[test_log::test(tokio::test)]
    async fn should_drop_expired_dialogs_when_keeping_another() {
        let sessions = Sessions::default();
        let now = Instant::now();

        sessions.keep(key(1), awaiting_context(), now).await;
        sessions
            .keep(key(2), awaiting_context(), now + PROMPT_TTL + Duration::from_secs(1))
            .await;

        assert!(!sessions.is_pending(&key(1)).await);
        assert!(sessions.is_pending(&key(2)).await);
    }

    #[test_log::test(tokio::test)]
    async fn should_take_pending_dialog_once() {
        let sessions = Sessions::default();

        sessions.keep(key(1), awaiting_context(), Instant::now()).await;

        assert!(sessions.take(&key(1)).await.is_some());
        assert!(sessions.take(&key(1)).await.is_none());
    }
}
