//! Memoizing contact provider wrapper.

use crate::model::contact::Contact;
use crate::source::contact::ContactSource;
use crate::source::error::SourceResult;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Contact provider that keeps the first successful read for its lifetime.
///
/// Failed reads are not cached; the next call retries the inner provider.
pub struct CachedContactSource {
    inner: Arc<dyn ContactSource>,
    contacts: OnceCell<Vec<Contact>>,
}

impl CachedContactSource {
    pub fn new(inner: Arc<dyn ContactSource>) -> Self {
        Self {
            inner,
            contacts: OnceCell::new(),
        }
    }

    /// Returns whether a successful read has been memoized.
    pub fn is_cached(&self) -> bool {
        self.contacts.initialized()
    }
}

#[async_trait]
impl ContactSource for CachedContactSource {
    async fn request_access(&self) -> SourceResult<()> {
        self.inner.request_access().await
    }

    async fn read_all(&self) -> SourceResult<Vec<Contact>> {
        if self.is_cached() {
            debug!("event=contact_read module=source status=ok cache=hit");
        }
        self.contacts
            .get_or_try_init(|| self.inner.read_all())
            .await
            .cloned()
    }
}
