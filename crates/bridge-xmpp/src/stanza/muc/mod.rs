// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use muc_user::{Actor, MucItem, MucUser};
pub use status_code::StatusCode;

mod muc_user;
mod status_code;
