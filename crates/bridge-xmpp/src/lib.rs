// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use stanza::ns;
pub use util::{ElementExt, ParseError};

pub mod stanza;
mod util;

#[cfg(feature = "test")]
pub mod test;
