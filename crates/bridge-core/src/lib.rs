// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use bridge_mode::BridgeMode;
pub use presence::models::{
    Ban, Kick, PresenceChange, PresenceDelta, PresenceErrorKind, PresenceStatus,
};
pub use presence::{
    DirectOccupantResolver, GatewayOccupantResolver, OccupantResolver, PresenceCache,
    PresenceStore, ResolveError, ResolvedOccupant, SharedPresenceCache,
};

mod bridge_mode;
pub mod presence;
