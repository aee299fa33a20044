use chrono::{DateTime, Utc};
use serde::Serialize;

use interviewbot_llm::TurnRole;

use crate::persona::PersonaCatalog;
use crate::prompts::{INTRO, PENDING_SUMMARY, USER_AUTHOR};
use crate::session::{InterviewSession, Phase};

/// Render instruction produced after every event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub session_id: String,
    pub phase: Phase,
    /// Introduction shown above the preference form, empty once submitted
    pub intro: Vec<String>,
    /// "Hello, {name}!" once the form is submitted
    pub greeting: Option<String>,
    /// Interview briefing bullets shown above the chat
    pub briefing: Vec<String>,
    pub summary: Summary,
    /// Visible messages, oldest first
    pub messages: Vec<ViewMessage>,
}

/// Side panel contents
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Summary {
    Pending {
        note: String,
    },
    #[serde(rename_all = "camelCase")]
    Submitted {
        interviewee: String,
        interviewer: String,
        role: String,
        topic: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMessage {
    pub role: TurnRole,
    /// Display name of the author
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl View {
    pub fn render(session: &InterviewSession, personas: &PersonaCatalog) -> Self {
        let Some(preferences) = session.preferences() else {
            return Self {
                session_id: session.id.clone(),
                phase: session.phase(),
                intro: INTRO.iter().map(|line| line.to_string()).collect(),
                greeting: None,
                briefing: Vec::new(),
                summary: Summary::Pending {
                    note: PENDING_SUMMARY.to_string(),
                },
                messages: Vec::new(),
            };
        };

        let persona = personas.get(preferences.interviewer);
        let short_name = persona.short_name();

        let briefing = vec![
            format!(
                "You will now be interviewed by {}, {} at {}.",
                persona.display_name, persona.role_title, persona.company
            ),
            format!(
                "You will be asked questions as per the {} role and the questions will be based on {}.",
                preferences.role, preferences.topic
            ),
            format!(
                "Feel free to ask questions and engage in a conversation with {}.",
                short_name
            ),
        ];

        let messages = session
            .transcript()
            .visible()
            .map(|message| ViewMessage {
                role: message.role,
                author: match message.role {
                    TurnRole::User => USER_AUTHOR.to_string(),
                    TurnRole::Assistant => short_name.clone(),
                },
                content: message.content.clone(),
                timestamp: message.timestamp,
            })
            .collect();

        Self {
            session_id: session.id.clone(),
            phase: session.phase(),
            intro: Vec::new(),
            greeting: Some(format!("Hello, {}!", preferences.user_name)),
            briefing,
            summary: Summary::Submitted {
                interviewee: preferences.user_name.clone(),
                interviewer: persona.display_name.to_string(),
                role: preferences.role.to_string(),
                topic: preferences.topic.to_string(),
            },
            messages,
        }
    }
}
