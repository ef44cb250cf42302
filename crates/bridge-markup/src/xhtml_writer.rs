// prose-bridge/bridge-markup
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::borrow::Cow;
use std::fmt::Write;

use html_escape::{encode_single_quoted_attribute, encode_text};

use crate::policy::XhtmlPolicy;
use crate::tokenizer::{StartTag, Token};
use crate::TranscodeError;

/// What happened to an element when its start tag was written.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Disposition {
    Kept,
    Unwrapped,
    Stripped,
}

/// Serializes a balanced token stream as XHTML, filtered through an `XhtmlPolicy`.
pub(crate) struct XhtmlWriter<'p, I, W> {
    /// Iterator supplying balanced tokens.
    iter: I,

    /// Writer to write to.
    writer: W,

    policy: &'p XhtmlPolicy,

    /// One entry per open element.
    open_elements: Vec<Disposition>,
    /// Number of open elements whose content is discarded.
    strip_level: usize,
}

impl<'input, 'p, I, W> XhtmlWriter<'p, I, W>
where
    I: Iterator<Item = Token<'input>>,
    W: Write,
{
    pub fn new(iter: I, policy: &'p XhtmlPolicy, writer: W) -> Self {
        Self {
            iter,
            writer,
            policy,
            open_elements: vec![],
            strip_level: 0,
        }
    }

    pub fn run(mut self) -> Result<(), TranscodeError> {
        while let Some(token) = self.iter.next() {
            match token {
                Token::Start(tag) => self.start_tag(tag)?,
                Token::End(name) => self.end_tag(&name)?,
                Token::Text(text) => {
                    if self.strip_level == 0 {
                        self.writer
                            .write_str(&encode_text(&strip_invalid_xml_chars(&text)))?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'input, 'p, I, W> XhtmlWriter<'p, I, W>
where
    I: Iterator<Item = Token<'input>>,
    W: Write,
{
    fn start_tag(&mut self, tag: StartTag) -> Result<(), TranscodeError> {
        if self.open_elements.len() >= self.policy.max_depth {
            return Err(TranscodeError::NestingTooDeep {
                limit: self.policy.max_depth,
            });
        }

        let disposition = if self.strip_level > 0 || self.policy.is_stripped(&tag.name) {
            self.strip_level += 1;
            Disposition::Stripped
        } else if self.policy.is_allowed(&tag.name) {
            self.write_start_tag(&tag)?;
            Disposition::Kept
        } else {
            Disposition::Unwrapped
        };

        self.open_elements.push(disposition);
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Result<(), TranscodeError> {
        match self.open_elements.pop() {
            Some(Disposition::Kept) => write!(self.writer, "</{}>", name)?,
            Some(Disposition::Stripped) => self.strip_level -= 1,
            Some(Disposition::Unwrapped) | None => (),
        }
        Ok(())
    }

    fn write_start_tag(&mut self, tag: &StartTag) -> Result<(), TranscodeError> {
        self.writer.write_char('<')?;
        self.writer.write_str(&tag.name)?;

        let mut written = Vec::<&str>::with_capacity(tag.attributes.len());

        for attribute in &tag.attributes {
            let value = attribute.value.as_deref().unwrap_or_default();

            if !self.policy.is_attribute_allowed(&tag.name, &attribute.name)
                || !self.policy.is_value_allowed(&attribute.name, value)
                || written.contains(&attribute.name.as_str())
            {
                continue;
            }
            written.push(&attribute.name);

            write!(
                self.writer,
                " {}='{}'",
                attribute.name,
                encode_single_quoted_attribute(&strip_invalid_xml_chars(value))
            )?;
        }

        self.writer.write_char('>')?;
        Ok(())
    }
}

/// Removes characters that may not appear in an XML 1.0 document.
pub(crate) fn strip_invalid_xml_chars(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| is_xml_char(*c)).collect())
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag_balancer::TagBalancer;
    use crate::tokenizer::Tokenizer;
    use pretty_assertions::assert_eq;

    fn write(html: &str, policy: &XhtmlPolicy) -> Result<String, TranscodeError> {
        let mut out = String::new();
        XhtmlWriter::new(TagBalancer::new(Tokenizer::new(html)), policy, &mut out).run()?;
        Ok(out)
    }

    #[test]
    fn test_unknown_tags_are_unwrapped() -> Result<(), TranscodeError> {
        assert_eq!(
            "<p>hello <em>there</em></p>",
            write(
                "<div><p>hello <font color=red><em>there</em></font></p></div>",
                &XhtmlPolicy::default()
            )?
        );
        Ok(())
    }

    #[test]
    fn test_stripped_tags_lose_their_content() -> Result<(), TranscodeError> {
        assert_eq!(
            "<p>ab</p>",
            write(
                "<p>a<script>alert('<b>x</b>')</script>b</p><style>p { color: red }</style>",
                &XhtmlPolicy::default()
            )?
        );
        Ok(())
    }

    #[test]
    fn test_attributes_are_filtered() -> Result<(), TranscodeError> {
        assert_eq!(
            "<a href='https://prose.org' class='link' title=''>x</a>",
            write(
                r#"<a onclick="steal()" href="https://prose.org" class=link href="https://evil.example" title>x</a>"#,
                &XhtmlPolicy::default()
            )?
        );
        Ok(())
    }

    #[test]
    fn test_escaping() -> Result<(), TranscodeError> {
        assert_eq!(
            "<span title='&lt;tag&gt; &amp; more'>1 &lt; 2 &amp;&amp; 3 &gt; 2</span>",
            write(
                r#"<span title="<tag> &amp; more">1 &lt; 2 && 3 > 2</span>"#,
                &XhtmlPolicy::default()
            )?
        );
        Ok(())
    }

    #[test]
    fn test_invalid_xml_chars_are_removed() -> Result<(), TranscodeError> {
        assert_eq!(
            "<span title='ab'>c\td\r\ne</span>",
            write(
                "<span title='a\u{1}b\u{fffe}'>\u{0}c\td\r\n\u{b}e\u{ffff}</span>",
                &XhtmlPolicy::default()
            )?
        );
        Ok(())
    }

    #[test]
    fn test_disallowed_url_schemes_are_dropped() -> Result<(), TranscodeError> {
        assert_eq!(
            "<a title='x'>click</a><a href='https://prose.org'>ok</a><img alt='i'></img>",
            write(
                r#"<a href="javascript:alert(1)" title=x>click</a><a href="javascript:void(0)" href="https://prose.org">ok</a><img src="data:image/png;base64,AAAA" alt=i />"#,
                &XhtmlPolicy::default()
            )?
        );
        Ok(())
    }

    #[test]
    fn test_nesting_limit() {
        let policy = XhtmlPolicy {
            max_depth: 2,
            ..Default::default()
        };

        assert!(write("<p><b>ok</b></p>", &policy).is_ok());
        assert_eq!(
            Err(TranscodeError::NestingTooDeep { limit: 2 }),
            write("<p><b><i>too deep</i></b></p>", &policy)
        );
    }
}
