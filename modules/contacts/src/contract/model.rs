use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure contact model for inter-crate communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three editable fields, used for both create and full-replacement update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

/// Terminal outcome of a simulated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallOutcome {
    Connected,
    Busy,
    NoAnswer,
    Failed,
}

impl CallOutcome {
    pub const ALL: [CallOutcome; 4] = [
        CallOutcome::Connected,
        CallOutcome::Busy,
        CallOutcome::NoAnswer,
        CallOutcome::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Connected => "connected",
            CallOutcome::Busy => "busy",
            CallOutcome::NoAnswer => "no_answer",
            CallOutcome::Failed => "failed",
        }
    }

    /// Parse a wire status string. Anything outside the known set is
    /// treated as a failed call.
    pub fn from_status(status: &str) -> CallOutcome {
        match status {
            "connected" => CallOutcome::Connected,
            "busy" => CallOutcome::Busy,
            "no_answer" => CallOutcome::NoAnswer,
            _ => CallOutcome::Failed,
        }
    }
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
