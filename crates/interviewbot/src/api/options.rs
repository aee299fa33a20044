use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use interviewbot_core::{Role, Topic};

use super::AppState;

/// Choices offered by the preference form
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub interviewers: Vec<InterviewerOption>,
    pub roles: Vec<&'static str>,
    pub topics: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewerOption {
    pub id: &'static str,
    pub label: String,
}

pub async fn get_options(State(state): State<AppState>) -> Json<FormOptions> {
    let interviewers = state
        .controller
        .personas()
        .all()
        .iter()
        .map(|persona| InterviewerOption {
            id: persona.id.as_str(),
            label: persona.option_label(),
        })
        .collect();

    Json(FormOptions {
        interviewers,
        roles: Role::ALL.iter().map(Role::as_str).collect(),
        topics: Topic::ALL.iter().map(Topic::as_str).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use interviewbot_core::{InterviewController, PersonaCatalog};
    use interviewbot_llm::EchoCompletion;
    use interviewbot_logging::Logger;

    use crate::api::SessionStore;

    #[tokio::test]
    async fn test_options_list_every_choice() {
        let logger = Arc::new(Logger::quiet());
        let controller = InterviewController::new(
            Arc::new(EchoCompletion::new()),
            PersonaCatalog::builtin().unwrap(),
            logger.clone(),
        );
        let state = AppState {
            store: Arc::new(SessionStore::new()),
            controller: Arc::new(controller),
            logger,
        };

        let Json(options) = get_options(State(state)).await;

        let ids: Vec<&str> = options.interviewers.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["pm_interviewer_1", "pm_interviewer_2", "pm_interviewer_3"]);
        assert_eq!(
            options.interviewers[1].label,
            "William Thompson, Senior Product Manager at Airbnb"
        );
        assert_eq!(options.roles, vec!["APM", "PM", "Senior PM"]);
        assert_eq!(
            options.topics,
            vec!["Product Strategy", "User Research", "Feature Development"]
        );
    }
}
