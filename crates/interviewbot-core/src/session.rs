//! Per-session interview state.
//!
//! A session moves `FormShown → Submitted → InterviewStarted` and then loops
//! on turns. There is no terminal phase; a session lives until its owner
//! drops it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SessionError;
use crate::preferences::Preferences;
use crate::transcript::Transcript;

/// Where a session is in the interview flow
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the preference form
    FormShown,
    /// Preferences frozen, interview not begun
    Submitted,
    /// Opening question recorded, taking turns
    InterviewStarted,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    /// Unique session identifier
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    phase: Phase,
    preferences: Option<Preferences>,
    transcript: Transcript,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            phase: Phase::FormShown,
            preferences: None,
            transcript: Transcript::seeded(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase != Phase::FormShown
    }

    pub fn is_interview_started(&self) -> bool {
        self.phase == Phase::InterviewStarted
    }

    pub fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Freeze the form values
    pub fn submit_preferences(&mut self, preferences: Preferences) -> Result<(), SessionError> {
        if self.is_submitted() {
            return Err(SessionError::AlreadySubmitted);
        }
        self.preferences = Some(preferences);
        self.phase = Phase::Submitted;
        self.touch();
        Ok(())
    }

    /// Record the opening exchange and enter the started phase
    pub(crate) fn record_opening(&mut self, kickoff: String, question: String) {
        self.transcript.push_turn(kickoff, false, question);
        self.phase = Phase::InterviewStarted;
        self.touch();
    }

    /// Record a user message and its reply
    pub(crate) fn record_turn(&mut self, input: String, reply: String) {
        self.transcript.push_turn(input, true, reply);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
