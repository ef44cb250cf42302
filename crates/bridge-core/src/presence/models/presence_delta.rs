// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

use super::{PresenceChange, PresenceStatus};

/// What a single presence stanza changed about an occupant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresenceDelta {
    /// Changes in the order they were detected.
    pub changed: Vec<PresenceChange>,
    /// Snapshot of the occupant, set if the occupant is new, went on- or offline or changed
    /// their avatar.
    pub status: Option<PresenceStatus>,
    /// The presence is the reflection of our own presence.
    pub is_self: bool,
    pub error: Option<PresenceErrorKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceErrorKind {
    /// Our nickname is already taken in the room.
    Conflict,
    Other {
        /// The serialized `<error/>` element.
        message: String,
    },
}

impl PresenceDelta {
    pub fn new(is_self: bool) -> Self {
        Self {
            is_self,
            ..Default::default()
        }
    }

    pub fn conflict() -> Self {
        Self {
            changed: vec![],
            status: None,
            is_self: true,
            error: Some(PresenceErrorKind::Conflict),
        }
    }

    pub fn other_error(message: impl Into<String>) -> Self {
        Self {
            changed: vec![],
            status: None,
            is_self: false,
            error: Some(PresenceErrorKind::Other {
                message: message.into(),
            }),
        }
    }

    pub fn contains(&self, change: PresenceChange) -> bool {
        self.changed.contains(&change)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.error {
            Some(PresenceErrorKind::Other { message }) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn push(&mut self, change: PresenceChange) {
        self.changed.push(change)
    }
}
