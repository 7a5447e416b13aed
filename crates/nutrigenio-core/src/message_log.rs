//! Append-only chat transcript. Insertion order is display order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position-derived id; the first message is `MessageId(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    /// Empty when `is_chart` is set.
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Render the BMI chart for the current profile instead of `content`.
    pub is_chart: bool,
}

#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, sender: Sender, content: String, is_chart: bool) -> &Message {
        let id = MessageId(self.messages.len() as u64 + 1);
        self.messages.push(Message {
            id,
            sender,
            content,
            timestamp: Utc::now(),
            is_chart,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn append_user(&mut self, content: impl Into<String>) -> &Message {
        self.push(Sender::User, content.into(), false)
    }

    pub fn append_bot(&mut self, content: impl Into<String>) -> &Message {
        self.push(Sender::Bot, content.into(), false)
    }

    pub fn append_chart(&mut self) -> &Message {
        self.push(Sender::Bot, String::new(), true)
    }

    /// All messages in display order. Each call starts over from the first message.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Messages appended after the first `seen` ones; empty when nothing is new.
    pub fn since(&self, seen: usize) -> &[Message] {
        self.messages.get(seen..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
