// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use indexmap::IndexMap;

use crate::presence::models::PresenceStatus;

/// Occupant statuses keyed by full JID, in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PresenceStore {
    entries: IndexMap<String, PresenceStatus>,
}

impl PresenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, jid: &str) -> Option<&PresenceStatus> {
        self.entries.get(jid)
    }

    /// Writes back an entry that was derived from the stored one. The `ours` flag and the set of
    /// known devices never shrink.
    pub fn put(&mut self, jid: impl Into<String>, mut status: PresenceStatus) {
        let jid = jid.into();

        if let Some(existing) = self.entries.get(&jid) {
            status.ours |= existing.ours;
            if let Some(known_devices) = &existing.devices {
                for device in known_devices {
                    status.insert_device(device.clone());
                }
            }
        }

        self.entries.insert(jid, status);
    }

    /// Overwrites the entry for `jid` as is.
    pub fn replace(&mut self, jid: impl Into<String>, status: PresenceStatus) {
        self.entries.insert(jid.into(), status);
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Returns the first entry (in insertion order) whose key starts with `prefix`.
    pub fn first_with_prefix(&self, prefix: &str) -> Option<&PresenceStatus> {
        self.entries
            .iter()
            .find(|(jid, _)| jid.starts_with(prefix))
            .map(|(_, status)| status)
    }

    /// Returns all entries whose key starts with `prefix`, in insertion order.
    pub fn all_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PresenceStatus)> + 'a {
        self.entries
            .iter()
            .filter(move |(jid, _)| jid.starts_with(prefix))
            .map(|(jid, status)| (jid.as_str(), status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
