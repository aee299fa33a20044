use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Structured log events for an interview session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    ServerStarted {
        addr: String,
        provider: String,
        model: String,
    },
    SessionCreated {
        session_id: String,
    },
    SessionClosed {
        session_id: String,
    },
    SessionsEvicted {
        count: usize,
        idle_secs: u64,
    },
    PreferencesSubmitted {
        session_id: String,
        user_name: String,
        interviewer: String,
        role: String,
        topic: String,
    },
    InterviewStarted {
        session_id: String,
        interviewer: String,
    },
    TurnStarted {
        session_id: String,
        turn: usize,
        input_preview: String,
    },
    TurnCompleted {
        session_id: String,
        turn: usize,
        reply_chars: usize,
        duration_secs: f64,
    },
    TurnFailed {
        session_id: String,
        turn: usize,
        error: String,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for session events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    console: bool,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            console: true,
            file_writer: None,
        }
    }

    /// A logger that writes nothing to the console.
    ///
    /// Used by the terminal chat, where stderr output would interleave with
    /// the conversation.
    pub fn quiet() -> Self {
        Self {
            format: LogFormat::Json,
            console: false,
            file_writer: None,
        }
    }

    /// Add a JSON-lines file sink in addition to console output
    pub fn with_file(mut self, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        self.file_writer = Some(Mutex::new(file));
        Ok(self)
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        if !self.console {
            return;
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => {
                let line = Self::compact_line(event);
                let _ = writeln!(std::io::stderr(), "{}", line);
            }
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::ServerStarted {
                addr,
                provider,
                model,
            } => {
                let _ = writeln!(stderr);
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "interviewbot".bold().bright_white(),
                    format!("listening on http://{}", addr).bright_cyan()
                );
                let _ = writeln!(
                    stderr,
                    "  {} {} ({})",
                    "Provider:".dimmed(),
                    provider,
                    model.dimmed()
                );
                let _ = writeln!(stderr);
            }
            LogEvent::SessionCreated { session_id } => {
                let _ = writeln!(
                    stderr,
                    "{} {} {}",
                    "+".bright_green(),
                    "session".dimmed(),
                    short_id(session_id)
                );
            }
            LogEvent::SessionClosed { session_id } => {
                let _ = writeln!(
                    stderr,
                    "{} {} {}",
                    "-".dimmed(),
                    "session closed".dimmed(),
                    short_id(session_id)
                );
            }
            LogEvent::SessionsEvicted { count, idle_secs } => {
                let _ = writeln!(
                    stderr,
                    "{} {} idle session(s) discarded after {}s",
                    "-".dimmed(),
                    count,
                    idle_secs
                );
            }
            LogEvent::PreferencesSubmitted {
                session_id,
                user_name,
                interviewer,
                role,
                topic,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} {} {} with {} ({}, {})",
                    "▶".bright_cyan(),
                    short_id(session_id).dimmed(),
                    if user_name.is_empty() {
                        "(anonymous)"
                    } else {
                        user_name.as_str()
                    },
                    interviewer.bright_cyan(),
                    role,
                    topic
                );
            }
            LogEvent::InterviewStarted {
                session_id,
                interviewer,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} {} interview with {} started",
                    "▶".bright_magenta(),
                    short_id(session_id).dimmed(),
                    interviewer.bright_magenta()
                );
            }
            LogEvent::TurnStarted { .. } => {
                // The completion line carries everything worth showing
            }
            LogEvent::TurnCompleted {
                session_id,
                turn,
                reply_chars,
                duration_secs,
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} {} turn {} ({} chars, {:.1}s)",
                    "✓".bright_green(),
                    short_id(session_id).dimmed(),
                    turn,
                    reply_chars,
                    duration_secs
                );
            }
            LogEvent::TurnFailed {
                session_id,
                turn,
                error,
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} {} turn {}: {}",
                    "✗".bright_red(),
                    short_id(session_id).dimmed(),
                    turn,
                    error.bright_red()
                );
            }
        }
    }

    /// Render an event as a single compact line
    pub fn compact_line(event: &LogEvent) -> String {
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        match event {
            LogEvent::ServerStarted { addr, provider, .. } => {
                format!("[{}] server:start {} {}", timestamp, addr, provider)
            }
            LogEvent::SessionCreated { session_id } => {
                format!("[{}] session:new {}", timestamp, short_id(session_id))
            }
            LogEvent::SessionClosed { session_id } => {
                format!("[{}] session:close {}", timestamp, short_id(session_id))
            }
            LogEvent::SessionsEvicted { count, idle_secs } => {
                format!("[{}] session:evict {} idle>{}s", timestamp, count, idle_secs)
            }
            LogEvent::PreferencesSubmitted {
                session_id,
                interviewer,
                role,
                topic,
                ..
            } => format!(
                "[{}] form:submit {} {} {}/{}",
                timestamp,
                short_id(session_id),
                interviewer,
                role,
                topic
            ),
            LogEvent::InterviewStarted { session_id, .. } => {
                format!("[{}] interview:start {}", timestamp, short_id(session_id))
            }
            LogEvent::TurnStarted {
                session_id, turn, ..
            } => format!(
                "[{}] turn:start:{} {}",
                timestamp,
                turn,
                short_id(session_id)
            ),
            LogEvent::TurnCompleted {
                session_id,
                turn,
                duration_secs,
                ..
            } => format!(
                "[{}] turn:done:{} {} {:.1}s",
                timestamp,
                turn,
                short_id(session_id),
                duration_secs
            ),
            LogEvent::TurnFailed {
                session_id,
                turn,
                error,
            } => format!(
                "[{}] turn:error:{} {} {}",
                timestamp,
                turn,
                short_id(session_id),
                error
            ),
        }
    }
}

/// First eight characters of a session id
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
