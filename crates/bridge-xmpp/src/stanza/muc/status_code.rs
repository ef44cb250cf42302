// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ParseError;

/// XEP-0045: Multi-User Chat, status codes relevant for tracking room occupants.
/// https://xmpp.org/extensions/xep-0045.html#registrar-statuscodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum StatusCode {
    /// Inform user that presence refers to itself.
    SelfPresence = 110,

    /// Inform user that they have been banned from the room.
    SelfBanned = 301,

    /// Inform user that they have been kicked from the room.
    SelfKicked = 307,

    /// Inform user that they are being removed from the room because of an error
    /// or another technical reason (affiliation change, room reconfiguration, …).
    SelfKickedTechnical = 333,
}

impl StatusCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Both an operator kick and a technical removal end the occupant's session.
    pub fn is_kick(self) -> bool {
        matches!(self, StatusCode::SelfKicked | StatusCode::SelfKickedTechnical)
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            110 => StatusCode::SelfPresence,
            301 => StatusCode::SelfBanned,
            307 => StatusCode::SelfKicked,
            333 => StatusCode::SelfKickedTechnical,
            _ => return Err(ParseError::UnknownStatusCode { code: value }),
        })
    }
}

impl FromStr for StatusCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusCode::try_from(s.trim().parse::<u16>()?)
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
