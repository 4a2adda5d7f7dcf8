//! Call derivation core for Next Calls.
//!
//! Turns free-text reminders into actionable call entries, using phone
//! numbers embedded in reminder titles and contacts mentioned by name.

pub mod contacts;
pub mod db;
pub mod derivation;
pub mod engine;
pub mod logging;
pub mod model;
pub mod phone;
pub mod settings;
pub mod source;

pub use contacts::index::{index_aliases, index_contact};
pub use contacts::matcher::match_contacts;
pub use derivation::aggregate::{aggregate, derive_calls, extract_inline};
pub use engine::call_engine::CallDerivationEngine;
pub use engine::error::{EngineError, EngineResult, EngineStage};
pub use engine::events::{CallListEvent, CompleteOutcome, EngineState};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::call::{Call, CallId, CallOrigin};
pub use model::contact::{Contact, Phone, RawContact, RawPhone};
pub use model::reminder::{RawReminder, Reminder, ReminderId};
pub use model::skip::SkipReason;
pub use phone::extract::extract_phone_number;
pub use phone::normalize::normalize_phone;
pub use settings::repo::{
    SettingsError, SettingsRepository, SettingsResult, SqliteSettingsRepository,
};
pub use settings::service::{SettingsService, DEFAULT_REMINDER_LIST, SELECTED_LIST_KEY};
pub use source::access::AccessStatus;
pub use source::cached::CachedContactSource;
pub use source::contact::ContactSource;
pub use source::error::{SourceError, SourceResult};
pub use source::fixture::{FixtureContactSource, FixtureDocument, FixtureReminderSource};
pub use source::memory::{MemoryContactSource, MemoryReminderSource};
pub use source::reminder::ReminderSource;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
