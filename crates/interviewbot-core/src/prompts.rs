use crate::preferences::Preferences;

/// Synthetic first user entry, never rendered
pub const SEED_USER: &str = "Can you interview me for the PM role?";

/// Synthetic first assistant entry, never rendered
pub const SEED_ASSISTANT: &str = "Of course! Let's begin.";

/// Shown in the summary panel before the form is submitted
pub const PENDING_SUMMARY: &str = "Please submit your preferences to start the interview.";

/// Shown above the preference form until it is submitted
pub const INTRO: [&str; 2] = [
    "This app lets you engage in lifelike interview simulations, helping you build your confidence and skills.",
    "To get started, choose your interviewer, role, and topic from the form below. Then, click on the button to begin your interview!",
];

/// Heading of the preference form
pub const FORM_HEADING: &str = "Choose your parameters";

/// Heading of the summary panel
pub const SUMMARY_HEADING: &str = "Interview Information";

/// Author shown on the user's messages
pub const USER_AUTHOR: &str = "You";

/// Hidden input that asks the interviewer for the opening question
pub fn kickoff_prompt(preferences: &Preferences) -> String {
    format!(
        "Prepare a question on {} for a {} role.",
        preferences.topic, preferences.role
    )
}
