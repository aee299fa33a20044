use thiserror::Error;

use interviewbot_llm::CompletionError;

use crate::persona::InterviewerId;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Preferences were already submitted for this session")]
    AlreadySubmitted,

    #[error("Submit your preferences before starting the interview")]
    NotSubmitted,

    #[error("The interview has not started yet")]
    NotStarted,

    #[error("Invalid {field}: {value}")]
    InvalidPreference { field: &'static str, value: String },

    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),
}

#[derive(Error, Debug)]
pub enum PersonaError {
    #[error("Persona table has {found} entries, expected {expected}")]
    WrongCount { expected: usize, found: usize },

    #[error("Persona at position {position} is {found}, expected {expected}")]
    OutOfOrder {
        position: usize,
        expected: InterviewerId,
        found: InterviewerId,
    },

    #[error("Persona {id} has an empty {field}")]
    EmptyField {
        id: InterviewerId,
        field: &'static str,
    },

    #[error("System prompt for {id} does not introduce {name}")]
    PromptMismatch {
        id: InterviewerId,
        name: &'static str,
    },
}
