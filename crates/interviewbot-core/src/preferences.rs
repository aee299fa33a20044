use serde::Serialize;

use crate::error::SessionError;
use crate::persona::InterviewerId;

/// The role the candidate is interviewing for
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "APM")]
    Apm,
    #[serde(rename = "PM")]
    Pm,
    #[serde(rename = "Senior PM")]
    SeniorPm,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Apm, Role::Pm, Role::SeniorPm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Apm => "APM",
            Role::Pm => "PM",
            Role::SeniorPm => "Senior PM",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "apm" => Ok(Role::Apm),
            "pm" => Ok(Role::Pm),
            "senior pm" => Ok(Role::SeniorPm),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// The interview topic
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Topic {
    #[serde(rename = "Product Strategy")]
    ProductStrategy,
    #[serde(rename = "User Research")]
    UserResearch,
    #[serde(rename = "Feature Development")]
    FeatureDevelopment,
}

impl Topic {
    pub const ALL: [Topic; 3] = [
        Topic::ProductStrategy,
        Topic::UserResearch,
        Topic::FeatureDevelopment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::ProductStrategy => "Product Strategy",
            Topic::UserResearch => "User Research",
            Topic::FeatureDevelopment => "Feature Development",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "product strategy" => Ok(Topic::ProductStrategy),
            "user research" => Ok(Topic::UserResearch),
            "feature development" => Ok(Topic::FeatureDevelopment),
            _ => Err(format!("Unknown topic: {}", s)),
        }
    }
}

/// Lowercase, treat `_`/`-` as spaces, collapse whitespace
fn normalize(s: &str) -> String {
    s.replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The four values collected by the preference form.
///
/// Frozen once submitted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub user_name: String,
    pub interviewer: InterviewerId,
    pub role: Role,
    pub topic: Topic,
}

impl Preferences {
    pub fn new(
        user_name: impl Into<String>,
        interviewer: InterviewerId,
        role: Role,
        topic: Topic,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            interviewer,
            role,
            topic,
        }
    }

    /// Parse form values. An empty name is accepted.
    pub fn parse(
        user_name: &str,
        interviewer: &str,
        role: &str,
        topic: &str,
    ) -> Result<Self, SessionError> {
        let interviewer = interviewer
            .parse()
            .map_err(|_| SessionError::InvalidPreference {
                field: "interviewer",
                value: interviewer.to_string(),
            })?;
        let role = role.parse().map_err(|_| SessionError::InvalidPreference {
            field: "role",
            value: role.to_string(),
        })?;
        let topic = topic.parse().map_err(|_| SessionError::InvalidPreference {
            field: "topic",
            value: topic.to_string(),
        })?;

        Ok(Self::new(user_name.trim(), interviewer, role, topic))
    }
}

/// Drop the last whitespace-separated token of a name.
///
/// `"William Thompson"` becomes `"William"`; a single token becomes `""`.
pub fn strip_last_name(full_name: &str) -> String {
    let mut parts: Vec<&str> = full_name.split_whitespace().collect();
    parts.pop();
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_last_name() {
        assert_eq!(strip_last_name("William Thompson"), "William");
        assert_eq!(strip_last_name("Dr. Priya Nair"), "Dr. Priya");
        assert_eq!(strip_last_name("  Vivian   Reyes "), "Vivian");
        assert_eq!(strip_last_name("Cher"), "");
        assert_eq!(strip_last_name(""), "");
    }

    #[test]
    fn test_role_parse_is_lenient() {
        assert_eq!("Senior PM".parse::<Role>(), Ok(Role::SeniorPm));
        assert_eq!("senior_pm".parse::<Role>(), Ok(Role::SeniorPm));
        assert_eq!("apm".parse::<Role>(), Ok(Role::Apm));
        assert!("VP".parse::<Role>().is_err());
    }

    #[test]
    fn test_topic_parse_is_lenient() {
        assert_eq!("user research".parse::<Topic>(), Ok(Topic::UserResearch));
        assert_eq!(
            "FEATURE-development".parse::<Topic>(),
            Ok(Topic::FeatureDevelopment)
        );
        assert!("Pricing".parse::<Topic>().is_err());
    }

    #[test]
    fn test_parse_accepts_empty_name() {
        let prefs = Preferences::parse("", "pm_interviewer_1", "PM", "Product Strategy").unwrap();
        assert_eq!(prefs.user_name, "");
        assert_eq!(prefs.role, Role::Pm);
    }

    #[test]
    fn test_parse_reports_invalid_field() {
        let err = Preferences::parse("Ada", "pm_interviewer_1", "CEO", "User Research").unwrap_err();
        match err {
            SessionError::InvalidPreference { field, value } => {
                assert_eq!(field, "role");
                assert_eq!(value, "CEO");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_preferences_serialize_display_values() {
        let prefs = Preferences::new(
            "Ada",
            InterviewerId::PmInterviewer3,
            Role::SeniorPm,
            Topic::FeatureDevelopment,
        );
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["userName"], "Ada");
        assert_eq!(value["interviewer"], "pm_interviewer_3");
        assert_eq!(value["role"], "Senior PM");
        assert_eq!(value["topic"], "Feature Development");
    }
}
