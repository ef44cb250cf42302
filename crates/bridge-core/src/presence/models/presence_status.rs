// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Last known state of a single room occupant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresenceStatus {
    /// The occupant's nickname in the room.
    pub resource: String,
    pub online: bool,
    /// Free-text status message. Empty if none was given.
    pub status: String,
    pub affiliation: String,
    pub role: String,
    /// The presence was reflected back to us, i.e. this is the bridge's own occupant.
    /// Once set this is never cleared.
    pub ours: bool,
    pub ban: Option<Ban>,
    pub kick: Option<Kick>,
    /// Gateway sessions only. Grows monotonically.
    pub devices: Option<IndexSet<String>>,
    /// Gateway sessions only.
    pub nick: Option<String>,
    pub photo_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ban {
    pub reason: Option<String>,
    pub banner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kick {
    pub reason: Option<String>,
    pub kicker: Option<String>,
    /// The occupant was removed by the service rather than kicked by a moderator.
    pub technical: bool,
}

impl PresenceStatus {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Default::default()
        }
    }

    /// Creates a status that tracks devices and a display nickname.
    pub fn with_devices(resource: impl Into<String>, nick: Option<String>) -> Self {
        Self {
            resource: resource.into(),
            devices: Some(IndexSet::new()),
            nick,
            ..Default::default()
        }
    }

    /// Adds `device` to the known devices. Returns `true` if the device wasn't known before.
    pub fn insert_device(&mut self, device: impl Into<String>) -> bool {
        self.devices
            .get_or_insert_with(IndexSet::new)
            .insert(device.into())
    }

    pub fn has_device(&self, device: &str) -> bool {
        self.devices
            .as_ref()
            .map(|devices| devices.contains(device))
            .unwrap_or(false)
    }
}
