//! # interviewbot-core
//!
//! The interview flow as an explicit state machine.
//!
//! ## Key Types
//!
//! - [`InterviewSession`] - Per-session state: phase, frozen preferences, transcript
//! - [`InterviewController`] - Consumes [`SessionEvent`]s and produces [`View`]s
//! - [`PersonaCatalog`] - Validated table of interviewer personas
//! - [`Transcript`] - Append-only message list headed by the seed pair

mod controller;
mod error;
mod persona;
mod preferences;
mod prompts;
mod session;
mod transcript;
mod view;

pub use controller::{InterviewController, SessionEvent};
pub use error::{PersonaError, SessionError};
pub use persona::{InterviewerId, Persona, PersonaCatalog};
pub use preferences::{strip_last_name, Preferences, Role, Topic};
pub use prompts::{
    kickoff_prompt, FORM_HEADING, INTRO, PENDING_SUMMARY, SEED_ASSISTANT, SEED_USER,
    SUMMARY_HEADING, USER_AUTHOR,
};
pub use session::{InterviewSession, Phase};
pub use transcript::{Message, Transcript, SEED_LEN};
pub use view::{Summary, View, ViewMessage};
