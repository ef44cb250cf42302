// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;

use crate::stanza::{MucUser, PresenceError, VCardUpdate};
use crate::{ns, ElementExt, ParseError};

/// Accessors for the parts of a raw `<presence/>` element an occupant tracker cares about.
pub trait PresenceStanzaExt {
    fn presence_error(&self) -> Option<PresenceError>;
    fn muc_user(&self) -> Result<Option<MucUser>, ParseError>;
    fn vcard_update(&self) -> Result<Option<VCardUpdate>, ParseError>;
    fn is_unavailable(&self) -> bool;
    /// Free-text status (`<status/>`) of the presence.
    fn status_text(&self) -> Option<String>;
}

impl PresenceStanzaExt for Element {
    fn presence_error(&self) -> Option<PresenceError> {
        self.child_named("error").map(PresenceError::from)
    }

    fn muc_user(&self) -> Result<Option<MucUser>, ParseError> {
        self.get_child("x", ns::MUC_USER)
            .map(MucUser::try_from)
            .transpose()
    }

    fn vcard_update(&self) -> Result<Option<VCardUpdate>, ParseError> {
        self.child_in_ns(ns::VCARD_UPDATE)
            .map(VCardUpdate::try_from)
            .transpose()
    }

    fn is_unavailable(&self) -> bool {
        self.attr("type") == Some("unavailable")
    }

    fn status_text(&self) -> Option<String> {
        self.child_named("status")
            .and_then(|status| status.non_empty_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stanza::muc::{MucItem, StatusCode};
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_reads_occupant_presence() -> Result<()> {
        let elem = Element::from_str(
            r#"<presence xmlns='jabber:client' from='room@conf.prose.org/nick' type='unavailable'><status>gone fishing</status><x xmlns='http://jabber.org/protocol/muc#user'><item affiliation='member' role='none'/><status code='110'/></x><x xmlns='vcard-temp:x:update'><photo>abc</photo></x></presence>"#,
        )?;

        assert!(elem.presence_error().is_none());
        assert!(elem.is_unavailable());
        assert_eq!(Some("gone fishing".to_string()), elem.status_text());
        assert_eq!(
            Some(
                MucUser::new()
                    .with_status([StatusCode::SelfPresence])
                    .with_item(MucItem::new("member", "none"))
            ),
            elem.muc_user()?
        );
        assert_eq!(
            Some(VCardUpdate {
                photo: Some("abc".to_string())
            }),
            elem.vcard_update()?
        );
        Ok(())
    }

    #[test]
    fn test_plain_presence() -> Result<()> {
        let elem = Element::from_str(
            "<presence xmlns='jabber:client' from='room@conf.prose.org/nick'/>",
        )?;

        assert!(!elem.is_unavailable());
        assert_eq!(None, elem.status_text());
        assert_eq!(None, elem.muc_user()?);
        assert_eq!(None, elem.vcard_update()?);
        Ok(())
    }
}
