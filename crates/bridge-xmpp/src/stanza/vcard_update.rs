// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;

use crate::{ns, ElementExt, ParseError};

/// XEP-0153: vCard-Based Avatars
/// https://xmpp.org/extensions/xep-0153.html#bizrules-presence
#[derive(Debug, PartialEq, Clone, Default)]
pub struct VCardUpdate {
    /// SHA-1 hash of the avatar. `None` if the entity advertises that it has no avatar
    /// (an empty `<photo/>`) or if the element is missing.
    pub photo: Option<String>,
}

impl TryFrom<&Element> for VCardUpdate {
    type Error = ParseError;

    fn try_from(root: &Element) -> Result<Self, Self::Error> {
        if root.ns() != ns::VCARD_UPDATE {
            return Err(ParseError::Generic {
                msg: format!(
                    "Expected element in namespace {}. Got {} instead.",
                    ns::VCARD_UPDATE,
                    root.ns()
                ),
            });
        }

        Ok(VCardUpdate {
            photo: root
                .get_child("photo", ns::VCARD_UPDATE)
                .and_then(|photo| photo.non_empty_text()),
        })
    }
}

impl From<VCardUpdate> for Element {
    fn from(value: VCardUpdate) -> Self {
        Element::builder("x", ns::VCARD_UPDATE)
            .append(
                Element::builder("photo", ns::VCARD_UPDATE)
                    .append_all(value.photo)
                    .build(),
            )
            .build()
    }
}
