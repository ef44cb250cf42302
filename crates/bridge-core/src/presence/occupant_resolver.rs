// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use jid::{FullJid, Jid};
use minidom::Element;

use crate::presence::models::PresenceStatus;

/// The occupant a presence stanza is about.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOccupant {
    pub jid: FullJid,
    /// Gateway only: the remote device the presence originated from.
    pub device: Option<String>,
    /// Gateway only: the occupant's display nickname.
    pub nick: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("Missing attribute: {attribute}")]
    MissingAttribute { attribute: &'static str },
    #[error("Invalid JID '{jid}': {msg}")]
    InvalidJid { jid: String, msg: String },
    #[error("Presence for '{jid}' has no resource")]
    MissingResource { jid: String },
}

/// Decides which occupant a presence belongs to.
pub trait OccupantResolver: Send + Sync {
    fn resolve_occupant(&self, stanza: &Element) -> Result<ResolvedOccupant, ResolveError>;

    /// The status an occupant starts out with when we see them for the first time.
    fn new_status(&self, occupant: &ResolvedOccupant) -> PresenceStatus {
        PresenceStatus::new(occupant.jid.resource_str())
    }
}

/// The bridge is a regular room occupant. Presences are attributed to their sender.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectOccupantResolver;

/// The bridge is a gateway. Presences are attributed to the occupant they are addressed to,
/// while the sender's resource identifies one of the occupant's remote devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayOccupantResolver;

impl OccupantResolver for DirectOccupantResolver {
    fn resolve_occupant(&self, stanza: &Element) -> Result<ResolvedOccupant, ResolveError> {
        let jid = parse_jid(stanza, "from")?;

        Ok(ResolvedOccupant {
            jid: into_full(jid)?,
            device: None,
            nick: None,
        })
    }
}

impl OccupantResolver for GatewayOccupantResolver {
    fn resolve_occupant(&self, stanza: &Element) -> Result<ResolvedOccupant, ResolveError> {
        let jid = into_full(parse_jid(stanza, "to")?)?;
        let device = parse_jid(stanza, "from")
            .ok()
            .and_then(|from| from.resource_str().map(ToString::to_string));
        let nick = Some(jid.resource_str().to_string());

        Ok(ResolvedOccupant { jid, device, nick })
    }

    fn new_status(&self, occupant: &ResolvedOccupant) -> PresenceStatus {
        PresenceStatus::with_devices(occupant.jid.resource_str(), occupant.nick.clone())
    }
}

fn parse_jid(stanza: &Element, attribute: &'static str) -> Result<Jid, ResolveError> {
    let value = stanza
        .attr(attribute)
        .ok_or(ResolveError::MissingAttribute { attribute })?;

    Jid::from_str(value).map_err(|err| ResolveError::InvalidJid {
        jid: value.to_string(),
        msg: err.to_string(),
    })
}

fn into_full(jid: Jid) -> Result<FullJid, ResolveError> {
    match jid {
        Jid::Full(jid) => Ok(jid),
        Jid::Bare(jid) => Err(ResolveError::MissingResource {
            jid: jid.to_string(),
        }),
    }
}
