// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How a bridge session maps presences onto occupants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BridgeMode {
    /// The bridge joins rooms as a regular occupant; presences are keyed by their sender.
    #[default]
    Direct,
    /// The bridge acts as a gateway; presences are keyed by their recipient and every sending
    /// resource is tracked as a device of that occupant.
    Gateway,
}
