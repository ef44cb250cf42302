// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use minidom::Element;
use parking_lot::Mutex;

use crate::presence::models::{PresenceDelta, PresenceStatus};
use crate::presence::PresenceCache;

/// A `PresenceCache` that can be handed to multiple threads. Every call locks the cache for its
/// whole duration, so presences for the session are processed one at a time.
#[derive(Clone)]
pub struct SharedPresenceCache {
    inner: Arc<Mutex<PresenceCache>>,
}

impl SharedPresenceCache {
    pub fn new(cache: PresenceCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn add(&self, stanza: &Element) -> Option<PresenceDelta> {
        self.inner.lock().add(stanza)
    }

    pub fn get_status(&self, jid: &str) -> Option<PresenceStatus> {
        self.inner.lock().get_status(jid).cloned()
    }

    pub fn modify_status(&self, jid: impl Into<String>, status: PresenceStatus) {
        self.inner.lock().modify_status(jid, status)
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl From<PresenceCache> for SharedPresenceCache {
    fn from(value: PresenceCache) -> Self {
        Self::new(value)
    }
}
