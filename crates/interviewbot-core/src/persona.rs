//! Interviewer personas.
//!
//! Personas are a static table indexed by [`InterviewerId`]. The table is
//! validated once when a [`PersonaCatalog`] is built, after which lookups are
//! infallible.

use serde::Serialize;

use crate::error::PersonaError;
use crate::preferences::strip_last_name;

/// Identifier of a built-in interviewer
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum InterviewerId {
    #[serde(rename = "pm_interviewer_1")]
    PmInterviewer1,
    #[serde(rename = "pm_interviewer_2")]
    PmInterviewer2,
    #[serde(rename = "pm_interviewer_3")]
    PmInterviewer3,
}

impl InterviewerId {
    /// All interviewers, in table order
    pub const ALL: [InterviewerId; 3] = [
        InterviewerId::PmInterviewer1,
        InterviewerId::PmInterviewer2,
        InterviewerId::PmInterviewer3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewerId::PmInterviewer1 => "pm_interviewer_1",
            InterviewerId::PmInterviewer2 => "pm_interviewer_2",
            InterviewerId::PmInterviewer3 => "pm_interviewer_3",
        }
    }

    fn index(&self) -> usize {
        match self {
            InterviewerId::PmInterviewer1 => 0,
            InterviewerId::PmInterviewer2 => 1,
            InterviewerId::PmInterviewer3 => 2,
        }
    }
}

impl std::fmt::Display for InterviewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InterviewerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pm_interviewer_1" | "1" => Ok(InterviewerId::PmInterviewer1),
            "pm_interviewer_2" | "2" => Ok(InterviewerId::PmInterviewer2),
            "pm_interviewer_3" | "3" => Ok(InterviewerId::PmInterviewer3),
            _ => Err(format!("Unknown interviewer: {}", s)),
        }
    }
}

/// A named interviewer with a fixed system prompt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: InterviewerId,
    pub display_name: &'static str,
    pub role_title: &'static str,
    pub company: &'static str,
    #[serde(skip)]
    pub system_prompt: &'static str,
}

impl Persona {
    /// Label used in interviewer pickers: "Name, Title at Company"
    pub fn option_label(&self) -> String {
        format!("{}, {} at {}", self.display_name, self.role_title, self.company)
    }

    /// Name without the surname, used when addressing the interviewer
    pub fn short_name(&self) -> String {
        strip_last_name(self.display_name)
    }
}

static BUILTIN_PERSONAS: [Persona; 3] = [
    Persona {
        id: InterviewerId::PmInterviewer1,
        display_name: "Vivian Reyes",
        role_title: "Director of Product",
        company: "Google",
        system_prompt: "You are Vivian Reyes, a sharp-witted product management guru and \
            Director of Product at Google. You have shipped consumer products used by \
            billions and you interview with energy and curiosity. You are conducting a \
            mock product management interview. Ask one question at a time, listen \
            carefully to each answer, and follow up on vague claims by asking for concrete \
            examples, metrics and trade-offs. Keep your replies short and conversational. \
            Occasionally offer a brief, candid piece of feedback before moving on, the way \
            a real interviewer would. Never answer your own questions.",
    },
    Persona {
        id: InterviewerId::PmInterviewer2,
        display_name: "William Thompson",
        role_title: "Senior Product Manager",
        company: "Airbnb",
        system_prompt: "You are William Thompson, a seasoned product management expert and \
            Senior Product Manager at Airbnb. You care deeply about customer empathy, \
            marketplace dynamics and clear communication. You are conducting a mock \
            product management interview in a warm but rigorous style. Ask one question \
            at a time and build on the candidate's previous answers. Probe how they \
            understand users, how they prioritise, and how they measure success. Keep \
            your replies concise and never answer your own questions.",
    },
    Persona {
        id: InterviewerId::PmInterviewer3,
        display_name: "Dr. Priya Nair",
        role_title: "CPO",
        company: "Scale AI",
        system_prompt: "You are Dr. Priya Nair, a data-driven product leader and Chief \
            Product Officer at Scale AI. You hold a PhD in machine learning and expect \
            candidates to reason from evidence. You are conducting a mock product \
            management interview. Ask one question at a time, push for hypotheses, \
            experiment design and the metrics that would prove or disprove them, and \
            challenge answers that rely on intuition alone. Be direct and precise, keep \
            replies brief, and never answer your own questions.",
    },
];

/// Validated lookup table of interviewer personas
#[derive(Debug, Clone, Copy)]
pub struct PersonaCatalog {
    personas: &'static [Persona],
}

impl PersonaCatalog {
    /// The built-in personas, validated
    pub fn builtin() -> Result<Self, PersonaError> {
        Self::from_table(&BUILTIN_PERSONAS)
    }

    /// Build a catalog from a table ordered like [`InterviewerId::ALL`].
    pub fn from_table(personas: &'static [Persona]) -> Result<Self, PersonaError> {
        if personas.len() != InterviewerId::ALL.len() {
            return Err(PersonaError::WrongCount {
                expected: InterviewerId::ALL.len(),
                found: personas.len(),
            });
        }

        for (position, (persona, expected)) in
            personas.iter().zip(InterviewerId::ALL.iter()).enumerate()
        {
            if persona.id != *expected {
                return Err(PersonaError::OutOfOrder {
                    position,
                    expected: *expected,
                    found: persona.id,
                });
            }

            let fields = [
                ("display name", persona.display_name),
                ("role title", persona.role_title),
                ("company", persona.company),
                ("system prompt", persona.system_prompt),
            ];
            for (field, value) in fields {
                if value.trim().is_empty() {
                    return Err(PersonaError::EmptyField {
                        id: persona.id,
                        field,
                    });
                }
            }

            if !persona.system_prompt.contains(persona.display_name) {
                return Err(PersonaError::PromptMismatch {
                    id: persona.id,
                    name: persona.display_name,
                });
            }
        }

        Ok(Self { personas })
    }

    pub fn get(&self, id: InterviewerId) -> &Persona {
        &self.personas[id.index()]
    }

    pub fn all(&self) -> &[Persona] {
        self.personas
    }
}
