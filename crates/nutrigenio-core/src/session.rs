//! One visitor's chat: the assessment machine, its transcript and the pending bot turn.
//!
//! User messages are appended as soon as they are accepted. Bot replies for the turn are
//! appended together once the configured delay elapses; until then the session refuses new
//! input. Closing the session (or dropping it) cancels a reply that has not been delivered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::assessment::{Assessment, AssessmentStage, BotReply, UserProfile};
use crate::chart::BmiChart;
use crate::config::ChatConfig;
use crate::message_log::{Message, MessageLog};
use crate::scheduler::DeferredTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    IgnoredBlank,
    IgnoredPending,
    IgnoredClosed,
}

/// Published on every change to the transcript or the turn lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStatus {
    pub messages: usize,
    pub awaiting_reply: bool,
}

#[derive(Debug)]
struct SessionState {
    assessment: Assessment,
    log: MessageLog,
    awaiting_reply: bool,
    closed: bool,
}

impl SessionState {
    fn status(&self) -> SessionStatus {
        SessionStatus {
            messages: self.log.len(),
            awaiting_reply: self.awaiting_reply,
        }
    }
}

#[derive(Debug)]
struct Shared {
    id: Uuid,
    state: Mutex<SessionState>,
    status: watch::Sender<SessionStatus>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &SessionState) {
        self.status.send_replace(state.status());
    }

    fn deliver(&self, replies: Vec<BotReply>) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        for reply in replies {
            match reply {
                BotReply::Text(text) => {
                    state.log.append_bot(text);
                }
                BotReply::Chart => {
                    state.log.append_chart();
                }
            }
        }
        state.awaiting_reply = false;
        tracing::debug!(
            session_id = %self.id,
            stage = state.assessment.stage().as_str(),
            messages = state.log.len(),
            "bot reply delivered"
        );
        self.publish(&state);
    }
}

#[derive(Debug)]
pub struct ChatSession {
    shared: Arc<Shared>,
    pending: Option<DeferredTask>,
    typing_delay: Duration,
    thinking_delay: Duration,
}

impl ChatSession {
    /// New session at `initial` with the greeting already in the transcript.
    pub fn open(config: &ChatConfig) -> Self {
        let mut log = MessageLog::new();
        log.append_bot(Assessment::greeting(&config.bot_name));
        let state = SessionState {
            assessment: Assessment::new(),
            log,
            awaiting_reply: false,
            closed: false,
        };
        let (status, _) = watch::channel(state.status());
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, "chat session opened");
        Self {
            shared: Arc::new(Shared {
                id,
                state: Mutex::new(state),
                status,
            }),
            pending: None,
            typing_delay: config.typing_delay(),
            thinking_delay: config.thinking_delay(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    /// Feeds one visitor message. Must be called within a Tokio runtime; the bot turn is
    /// scheduled on it.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::IgnoredBlank;
        }

        let mut state = self.shared.lock();
        if state.closed {
            return SubmitOutcome::IgnoredClosed;
        }
        if state.awaiting_reply {
            tracing::debug!(session_id = %self.shared.id, "submit ignored while a reply is pending");
            return SubmitOutcome::IgnoredPending;
        }

        state.log.append_user(text);
        let transition = state.assessment.advance(text);
        let delay = if transition.from.is_completed() {
            self.thinking_delay
        } else {
            self.typing_delay
        };
        state.awaiting_reply = true;
        self.shared.publish(&state);
        drop(state);

        let shared = Arc::clone(&self.shared);
        let replies = transition.replies;
        self.pending = Some(DeferredTask::schedule(delay, move || shared.deliver(replies)));
        SubmitOutcome::Accepted
    }

    /// Cancels a pending reply and freezes the transcript. Idempotent.
    pub fn close(&mut self) {
        {
            let mut state = self.shared.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            state.awaiting_reply = false;
            self.shared.publish(&state);
        }
        if let Some(mut task) = self.pending.take() {
            task.cancel();
        }
        tracing::info!(session_id = %self.shared.id, "chat session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.shared.lock().awaiting_reply
    }

    pub fn stage(&self) -> AssessmentStage {
        self.shared.lock().assessment.stage()
    }

    pub fn profile(&self) -> UserProfile {
        self.shared.lock().assessment.profile().clone()
    }

    /// Chart payload for the current profile; what a message flagged `is_chart` shows.
    pub fn chart(&self) -> Option<BmiChart> {
        BmiChart::from_profile(self.shared.lock().assessment.profile())
    }

    pub fn messages(&self) -> Vec<Message> {
        self.shared.lock().log.iter().cloned().collect()
    }

    /// Messages after the first `seen`, for incremental rendering.
    pub fn messages_since(&self, seen: usize) -> Vec<Message> {
        self.shared.lock().log.since(seen).to_vec()
    }

    pub fn status(&self) -> SessionStatus {
        *self.shared.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.shared.status.subscribe()
    }

    /// Resolves once no bot reply is pending.
    pub async fn wait_for_reply(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(|s| !s.awaiting_reply).await;
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message_log::Sender;

    #[tokio::test(start_paused = true)]
    async fn greeting_is_first_message() {
        let session = ChatSession::open(&ChatConfig::default());
        let messages = session.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert!(messages[0].content.contains("NutriGênio"));
        assert_eq!(session.stage(), AssessmentStage::Initial);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_is_ignored() {
        let mut session = ChatSession::open(&ChatConfig::default());
        assert_eq!(session.submit("   \n\t"), SubmitOutcome::IgnoredBlank);
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_typing_delay() {
        let mut session = ChatSession::open(&ChatConfig::default());
        assert_eq!(session.submit("oi"), SubmitOutcome::Accepted);
        assert_eq!(session.messages().len(), 2);
        assert!(session.is_awaiting_reply());
        assert_eq!(session.stage(), AssessmentStage::AskName);

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(session.messages().len(), 2);

        session.wait_for_reply().await;
        assert_eq!(session.messages().len(), 3);
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_while_pending_is_a_no_op() {
        let mut session = ChatSession::open(&ChatConfig::default());
        session.submit("oi");
        assert_eq!(session.submit("Maria"), SubmitOutcome::IgnoredPending);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.stage(), AssessmentStage::AskName);
        session.wait_for_reply().await;
        assert_eq!(session.submit("Maria"), SubmitOutcome::Accepted);
    }

    #[tokio::test(start_paused = true)]
    async fn close_cancels_pending_reply() {
        let mut session = ChatSession::open(&ChatConfig::default());
        session.submit("oi");
        session.close();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.messages().len(), 2);
        assert!(session.is_closed());
        assert_eq!(session.submit("Maria"), SubmitOutcome::IgnoredClosed);
        session.wait_for_reply().await;
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_reply() {
        let status = {
            let mut session = ChatSession::open(&ChatConfig::default());
            let rx = session.subscribe();
            session.submit("oi");
            assert_eq!(session.messages().len(), 2);
            rx
        };
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(*status.borrow(), SessionStatus { messages: 2, awaiting_reply: false });
    }

    #[tokio::test(start_paused = true)]
    async fn free_chat_waits_for_thinking_delay() {
        let config = ChatConfig {
            typing_delay_ms: 10,
            thinking_delay_ms: 5000,
            ..ChatConfig::default()
        };
        let mut session = ChatSession::open(&config);
        for line in ["oi", "Maria", "170", "70", "1"] {
            assert_eq!(session.submit(line), SubmitOutcome::Accepted);
            tokio::time::sleep(Duration::from_millis(20)).await;
            assert!(!session.is_awaiting_reply(), "stage reply for {:?} still pending", line);
        }
        assert_eq!(session.stage(), AssessmentStage::Completed);

        let before = session.messages().len();
        session.submit("quanta proteína devo comer?");
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(session.messages().len(), before + 1);
        assert!(session.is_awaiting_reply());

        session.wait_for_reply().await;
        let messages = session.messages();
        assert_eq!(messages.len(), before + 2);
        assert_eq!(messages[before + 1].sender, Sender::Bot);
    }

    #[tokio::test(start_paused = true)]
    async fn status_tracks_appends() {
        let mut session = ChatSession::open(&ChatConfig::instant());
        let rx = session.subscribe();
        assert_eq!(*rx.borrow(), SessionStatus { messages: 1, awaiting_reply: false });
        session.submit("oi");
        assert_eq!(session.status(), SessionStatus { messages: 2, awaiting_reply: true });
        session.wait_for_reply().await;
        assert_eq!(*rx.borrow(), SessionStatus { messages: 3, awaiting_reply: false });
    }
}
