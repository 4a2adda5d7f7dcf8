//! Contact provider contract.

use crate::contacts::index::index_contact;
use crate::model::contact::{Contact, RawContact};
use crate::source::error::SourceResult;
use async_trait::async_trait;
use log::debug;

/// Directory provider consumed by the call engine.
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Ensures the app may read contacts, prompting if needed.
    async fn request_access(&self) -> SourceResult<()>;

    /// Reads every contact that carries a phone number, indexed for matching.
    async fn read_all(&self) -> SourceResult<Vec<Contact>>;
}

/// Indexes raw directory records, dropping the ones without a phone number.
pub fn index_raw_contacts(raw: &[RawContact]) -> Vec<Contact> {
    raw.iter()
        .enumerate()
        .filter_map(|(position, record)| match index_contact(record) {
            Ok(contact) => Some(contact),
            Err(reason) => {
                debug!(
                    "event=contact_read module=source status=skip position={} reason={}",
                    position,
                    reason.as_str()
                );
                None
            }
        })
        .collect()
}
