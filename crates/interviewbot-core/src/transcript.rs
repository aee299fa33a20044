//! Append-only conversation transcript.
//!
//! The first two entries are always the seed pair. Every later change appends
//! one complete turn: a user-authored entry followed by the assistant reply.

use chrono::{DateTime, Utc};
use serde::Serialize;

use interviewbot_llm::{ChatTurn, TurnRole};

use crate::prompts::{SEED_ASSISTANT, SEED_USER};

/// Number of synthetic entries at the head of every transcript
pub const SEED_LEN: usize = 2;

/// One entry of the transcript
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: TurnRole,
    pub content: String,
    /// Hidden entries are sent to the model but never rendered
    pub visible: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: TurnRole, content: String, visible: bool) -> Self {
        Self {
            role,
            content,
            visible,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Transcript {
    /// A transcript holding only the seed pair
    pub fn seeded() -> Self {
        Self {
            messages: vec![
                Message::new(TurnRole::User, SEED_USER.to_string(), false),
                Message::new(TurnRole::Assistant, SEED_ASSISTANT.to_string(), false),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Every entry, seed pair included
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Entries to render: the seed pair and hidden entries are skipped
    pub fn visible(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .skip(SEED_LEN)
            .filter(|message| message.visible)
    }

    /// Completed turns, the opening turn included
    pub fn turn_count(&self) -> usize {
        (self.messages.len() - SEED_LEN) / 2
    }

    /// Whether the opening question has been recorded
    pub fn has_opened(&self) -> bool {
        self.messages.len() > SEED_LEN
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The whole transcript as completion history
    pub fn to_chat_turns(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .map(|message| ChatTurn {
                role: message.role,
                content: message.content.clone(),
            })
            .collect()
    }

    /// Append one turn. Both halves land together or not at all.
    pub(crate) fn push_turn(&mut self, input: String, input_visible: bool, reply: String) {
        self.messages
            .push(Message::new(TurnRole::User, input, input_visible));
        self.messages
            .push(Message::new(TurnRole::Assistant, reply, true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_transcript() {
        let transcript = Transcript::seeded();
        assert_eq!(transcript.len(), SEED_LEN);
        assert_eq!(transcript.turn_count(), 0);
        assert!(!transcript.has_opened());
        assert_eq!(transcript.visible().count(), 0);
        assert_eq!(transcript.messages()[0].role, TurnRole::User);
        assert_eq!(transcript.messages()[1].role, TurnRole::Assistant);
    }

    #[test]
    fn test_push_turn_appends_pair() {
        let mut transcript = Transcript::seeded();
        transcript.push_turn("kickoff".into(), false, "First question?".into());
        transcript.push_turn("My answer".into(), true, "Follow-up?".into());

        assert_eq!(transcript.len(), 6);
        assert_eq!(transcript.turn_count(), 2);
        let visible: Vec<&str> = transcript.visible().map(|m| m.content.as_str()).collect();
        assert_eq!(visible, vec!["First question?", "My answer", "Follow-up?"]);
    }

    #[test]
    fn test_chat_turns_include_seed_and_hidden_entries() {
        let mut transcript = Transcript::seeded();
        transcript.push_turn("kickoff".into(), false, "Q1".into());

        let turns = transcript.to_chat_turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0], ChatTurn::user(SEED_USER));
        assert_eq!(turns[2], ChatTurn::user("kickoff"));
        assert_eq!(turns[3], ChatTurn::assistant("Q1"));
    }
}
