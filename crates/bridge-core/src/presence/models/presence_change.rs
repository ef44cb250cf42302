// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PresenceChange {
    /// First presence seen for this occupant.
    New,
    /// Gateway only: the occupant's display nickname differs from the cached one.
    NewNick,
    /// Gateway only: the occupant sent from a device we haven't seen before.
    NewDevice,
    Online,
    Offline,
    Affiliation,
    Role,
    Ban,
    Kick,
    /// The occupant's vCard avatar hash changed.
    Photo,
}
