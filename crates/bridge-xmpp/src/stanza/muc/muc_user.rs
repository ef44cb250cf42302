// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;

use crate::stanza::muc::StatusCode;
use crate::{ns, ElementExt, ParseError};

/// A lenient view of the `<x xmlns='http://jabber.org/protocol/muc#user'/>` payload of an
/// occupant presence. Status codes we don't track are skipped, missing item attributes are
/// treated as empty.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct MucUser {
    /// List of statuses applying to this presence.
    pub status: Vec<StatusCode>,

    /// The first membership item, if any.
    pub item: Option<MucItem>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct MucItem {
    pub affiliation: String,
    pub role: String,
    /// Nickname of the occupant who performed the ban or kick.
    pub actor: Option<Actor>,
    pub reason: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Actor {
    pub nick: Option<String>,
}

impl MucUser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl IntoIterator<Item = StatusCode>) -> Self {
        self.status = status.into_iter().collect();
        self
    }

    pub fn with_item(mut self, item: MucItem) -> Self {
        self.item = Some(item);
        self
    }

    pub fn has_status(&self, code: StatusCode) -> bool {
        self.status.contains(&code)
    }
}

impl MucItem {
    pub fn new(affiliation: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            affiliation: affiliation.into(),
            role: role.into(),
            actor: None,
            reason: None,
        }
    }

    pub fn with_actor_nick(mut self, nick: impl Into<String>) -> Self {
        self.actor = Some(Actor {
            nick: Some(nick.into()),
        });
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn actor_nick(&self) -> Option<&str> {
        self.actor.as_ref().and_then(|actor| actor.nick.as_deref())
    }
}

impl TryFrom<&Element> for MucUser {
    type Error = ParseError;

    fn try_from(root: &Element) -> Result<Self, Self::Error> {
        root.expect_is("x", ns::MUC_USER)?;

        let mut user = MucUser::default();

        for child in root.children() {
            match child {
                _ if child.is("status", ns::MUC_USER) => {
                    let Some(Ok(code)) = child.attr("code").map(str::parse::<StatusCode>) else {
                        continue;
                    };
                    user.status.push(code);
                }
                _ if child.is("item", ns::MUC_USER) => {
                    if user.item.is_none() {
                        user.item = Some(MucItem::try_from(child)?);
                    }
                }
                _ => (),
            }
        }

        Ok(user)
    }
}

impl TryFrom<&Element> for MucItem {
    type Error = ParseError;

    fn try_from(root: &Element) -> Result<Self, Self::Error> {
        root.expect_is("item", ns::MUC_USER)?;

        Ok(MucItem {
            affiliation: root.attr("affiliation").unwrap_or_default().to_string(),
            role: root.attr("role").unwrap_or_default().to_string(),
            actor: root.get_child("actor", ns::MUC_USER).map(|actor| Actor {
                nick: actor.attr("nick").map(ToString::to_string),
            }),
            reason: root
                .get_child("reason", ns::MUC_USER)
                .map(|reason| reason.text()),
        })
    }
}

impl From<MucUser> for Element {
    fn from(value: MucUser) -> Self {
        Element::builder("x", ns::MUC_USER)
            .append_all(value.status.into_iter().map(|status| {
                Element::builder("status", ns::MUC_USER)
                    .attr("code", status.code().to_string())
                    .build()
            }))
            .append_all(value.item.map(Element::from))
            .build()
    }
}

impl From<MucItem> for Element {
    fn from(value: MucItem) -> Self {
        Element::builder("item", ns::MUC_USER)
            .attr("affiliation", value.affiliation)
            .attr("role", value.role)
            .append_all(value.actor.map(|actor| {
                Element::builder("actor", ns::MUC_USER)
                    .attr("nick", actor.nick)
                    .build()
            }))
            .append_all(value.reason.map(|reason| {
                Element::builder("reason", ns::MUC_USER)
                    .append(reason)
                    .build()
            }))
            .build()
    }
}
