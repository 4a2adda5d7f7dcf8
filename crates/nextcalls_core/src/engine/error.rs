//! Engine error model.

use crate::source::error::SourceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EngineResult<T> = Result<T, EngineError>;

/// Provider call during which an engine operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStage {
    RequestReminderAccess,
    ReadReminders,
    RequestContactAccess,
    ReadContacts,
    CompleteReminder,
}

impl EngineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequestReminderAccess => "request_reminder_access",
            Self::ReadReminders => "read_reminders",
            Self::RequestContactAccess => "request_contact_access",
            Self::ReadContacts => "read_contacts",
            Self::CompleteReminder => "complete_reminder",
        }
    }
}

/// Provider failure surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub stage: EngineStage,
    pub source: SourceError,
}

impl EngineError {
    pub fn new(stage: EngineStage, source: SourceError) -> Self {
        Self { stage, source }
    }

    /// Returns a closure tagging a provider error with `stage`.
    pub(crate) fn at(stage: EngineStage) -> impl FnOnce(SourceError) -> Self {
        move |source| Self::new(stage, source)
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.stage.as_str(), self.source)
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
