// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use occupant_resolver::{
    DirectOccupantResolver, GatewayOccupantResolver, OccupantResolver, ResolveError,
    ResolvedOccupant,
};
pub use presence_cache::PresenceCache;
pub use presence_store::PresenceStore;
pub use shared_presence_cache::SharedPresenceCache;

pub mod models;
mod occupant_resolver;
mod presence_cache;
mod presence_store;
mod shared_presence_cache;
