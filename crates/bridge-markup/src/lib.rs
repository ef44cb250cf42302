// prose-bridge/bridge-markup
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use html_escape::encode_text;
use tracing::warn;

pub use policy::XhtmlPolicy;

use tag_balancer::TagBalancer;
use tokenizer::Tokenizer;
use xhtml_writer::{strip_invalid_xml_chars, XhtmlWriter};

mod policy;
mod tag_balancer;
mod tokenizer;
mod xhtml_writer;

pub const XHTML_IM_NS: &str = "http://jabber.org/protocol/xhtml-im";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

const ENVELOPE_END: &str = "</body></html>";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TranscodeError {
    #[error("Elements are nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error(transparent)]
    Write(#[from] std::fmt::Error),
}

/// Converts HTML message bodies into XHTML-IM payloads
/// (`<html xmlns='…xhtml-im'><body xmlns='…xhtml'>…</body></html>`).
///
/// The input may be plain text or a fragment of loosely written HTML. The output is always
/// well-formed XML.
#[derive(Debug, Clone, Default)]
pub struct XhtmlConverter {
    policy: XhtmlPolicy,
}

impl XhtmlConverter {
    pub fn new(policy: XhtmlPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &XhtmlPolicy {
        &self.policy
    }

    pub fn try_convert(&self, html: &str) -> Result<String, TranscodeError> {
        let mut xhtml = envelope_start();
        xhtml.reserve(html.len() + ENVELOPE_END.len());

        let tokens = TagBalancer::new(Tokenizer::new(html));
        XhtmlWriter::new(tokens, &self.policy, &mut xhtml).run()?;

        xhtml.push_str(ENVELOPE_END);
        Ok(xhtml)
    }

    /// Like `try_convert`, but falls back to the escaped input if the conversion fails.
    pub fn convert(&self, html: &str) -> String {
        self.try_convert(html).unwrap_or_else(|err| {
            warn!("Failed to convert HTML to XHTML-IM, sending it as text. {}", err);
            escaped_text_envelope(html)
        })
    }
}

/// Converts `html` using the default `XhtmlPolicy`.
pub fn html_to_xhtml(html: &str) -> String {
    XhtmlConverter::default().convert(html)
}

fn envelope_start() -> String {
    format!("<html xmlns='{}'><body xmlns='{}'>", XHTML_IM_NS, XHTML_NS)
}

fn escaped_text_envelope(text: &str) -> String {
    format!(
        "{}{}{}",
        envelope_start(),
        encode_text(&strip_invalid_xml_chars(text)),
        ENVELOPE_END
    )
}
