// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;

/// The `<error/>` child of a presence of type `error`.
#[derive(Debug, PartialEq, Clone)]
pub struct PresenceError {
    /// `<conflict/>`: the requested room nickname is already in use.
    pub is_conflict: bool,
    /// The serialized error element, kept for diagnostics.
    pub raw: String,
}

impl From<&Element> for PresenceError {
    fn from(error: &Element) -> Self {
        PresenceError {
            is_conflict: error.children().any(|child| child.name() == "conflict"),
            raw: String::from(error),
        }
    }
}
