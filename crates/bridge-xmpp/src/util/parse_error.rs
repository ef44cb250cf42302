// prose-bridge/bridge-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Parse error: {msg}")]
    Generic { msg: String },
    #[error("Unknown MUC status code {code}")]
    UnknownStatusCode { code: u16 },
    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),
}
