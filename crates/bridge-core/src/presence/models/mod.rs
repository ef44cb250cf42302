// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use presence_change::PresenceChange;
pub use presence_delta::{PresenceDelta, PresenceErrorKind};
pub use presence_status::{Ban, Kick, PresenceStatus};

mod presence_change;
mod presence_delta;
mod presence_status;
