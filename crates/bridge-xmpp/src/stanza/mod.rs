// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use xmpp_parsers::presence;

pub use muc::{MucItem, MucUser, StatusCode};
pub use presence_error::PresenceError;
pub use presence_ext::PresenceStanzaExt;
pub use vcard_update::VCardUpdate;

pub mod muc;
pub mod ns;
mod presence_error;
mod presence_ext;
mod vcard_update;
