use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use interviewbot_llm::{CompletionRequest, CompletionService};
use interviewbot_logging::{LogEvent, Logger};

use crate::error::SessionError;
use crate::persona::PersonaCatalog;
use crate::preferences::Preferences;
use crate::prompts::kickoff_prompt;
use crate::session::InterviewSession;
use crate::view::View;

/// A user action fed into the state machine
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The preference form was submitted
    SubmitPreferences(Preferences),
    /// "Begin Interview" was pressed
    BeginInterview,
    /// The user sent a chat message
    UserMessage(String),
}

/// Drives interview sessions: consumes events, calls the completion service,
/// and produces the next [`View`].
///
/// Holds no per-session state; every handler receives the session it acts on.
pub struct InterviewController {
    service: Arc<dyn CompletionService>,
    personas: PersonaCatalog,
    logger: Arc<Logger>,
}

impl InterviewController {
    pub fn new(
        service: Arc<dyn CompletionService>,
        personas: PersonaCatalog,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            service,
            personas,
            logger,
        }
    }

    pub fn personas(&self) -> &PersonaCatalog {
        &self.personas
    }

    pub fn service(&self) -> &dyn CompletionService {
        self.service.as_ref()
    }

    /// Render without changing state
    pub fn render(&self, session: &InterviewSession) -> View {
        View::render(session, &self.personas)
    }

    /// Apply one event and return what to render next.
    ///
    /// On error the session is left exactly as it was.
    pub async fn handle(
        &self,
        session: &mut InterviewSession,
        event: SessionEvent,
    ) -> Result<View, SessionError> {
        match event {
            SessionEvent::SubmitPreferences(preferences) => {
                self.submit(session, preferences)?;
            }
            SessionEvent::BeginInterview => {
                self.begin(session).await?;
            }
            SessionEvent::UserMessage(text) => {
                self.respond(session, &text).await?;
            }
        }
        Ok(self.render(session))
    }

    fn submit(
        &self,
        session: &mut InterviewSession,
        preferences: Preferences,
    ) -> Result<(), SessionError> {
        let event = LogEvent::PreferencesSubmitted {
            session_id: session.id.clone(),
            user_name: preferences.user_name.clone(),
            interviewer: preferences.interviewer.to_string(),
            role: preferences.role.to_string(),
            topic: preferences.topic.to_string(),
        };
        session.submit_preferences(preferences)?;
        self.logger.log(&event);
        Ok(())
    }

    /// Ask for the opening question. A no-op once the opening is recorded.
    async fn begin(&self, session: &mut InterviewSession) -> Result<(), SessionError> {
        let preferences = session
            .preferences()
            .cloned()
            .ok_or(SessionError::NotSubmitted)?;

        if session.transcript().has_opened() {
            debug!(session_id = %session.id, "Interview already started");
            return Ok(());
        }

        let kickoff = kickoff_prompt(&preferences);
        let question = self.complete(session, &preferences, &kickoff).await?;
        session.record_opening(kickoff, question);

        info!(
            session_id = %session.id,
            interviewer = %preferences.interviewer,
            "Interview started"
        );
        self.logger.log(&LogEvent::InterviewStarted {
            session_id: session.id.clone(),
            interviewer: preferences.interviewer.to_string(),
        });
        Ok(())
    }

    /// Run one user turn. Blank input is ignored.
    async fn respond(&self, session: &mut InterviewSession, text: &str) -> Result<(), SessionError> {
        if !session.is_interview_started() {
            return Err(SessionError::NotStarted);
        }

        let input = text.trim();
        if input.is_empty() {
            return Ok(());
        }

        let preferences = session
            .preferences()
            .cloned()
            .ok_or(SessionError::NotSubmitted)?;
        let reply = self.complete(session, &preferences, input).await?;
        session.record_turn(input.to_string(), reply);
        Ok(())
    }

    /// Call the completion service with the persona prompt and full history
    async fn complete(
        &self,
        session: &InterviewSession,
        preferences: &Preferences,
        input: &str,
    ) -> Result<String, SessionError> {
        let persona = self.personas.get(preferences.interviewer);
        let history = session.transcript().to_chat_turns();
        let turn = session.transcript().turn_count() + 1;

        self.logger.log(&LogEvent::TurnStarted {
            session_id: session.id.clone(),
            turn,
            input_preview: input.chars().take(100).collect(),
        });
        debug!(
            session_id = %session.id,
            turn,
            history_len = history.len(),
            service = self.service.name(),
            "Requesting completion"
        );

        let started = Instant::now();
        let result = self
            .service
            .complete(CompletionRequest {
                system_prompt: persona.system_prompt,
                history: &history,
                input,
            })
            .await;

        match result {
            Ok(reply) => {
                self.logger.log(&LogEvent::TurnCompleted {
                    session_id: session.id.clone(),
                    turn,
                    reply_chars: reply.chars().count(),
                    duration_secs: started.elapsed().as_secs_f64(),
                });
                Ok(reply)
            }
            Err(e) => {
                warn!(session_id = %session.id, turn, error = %e, "Completion failed");
                self.logger.log(&LogEvent::TurnFailed {
                    session_id: session.id.clone(),
                    turn,
                    error: e.to_string(),
                });
                Err(e.into())
            }
        }
    }
}
