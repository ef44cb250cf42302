// prose-bridge/bridge-markup
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::borrow::Cow;

use html_escape::decode_html_entities;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Attribute {
    pub name: String,
    /// `None` for attributes written without a value (`<input disabled>`).
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StartTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'input> {
    Start(StartTag),
    End(String),
    /// Decoded character data.
    Text(Cow<'input, str>),
}

/// Splits an HTML fragment into tags and text. The tokenizer never fails; anything that doesn't
/// look like markup is returned as text.
pub(crate) struct Tokenizer<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> Tokenizer<'input> {
    pub fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'input> Iterator for Tokenizer<'input> {
    type Item = Token<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];

            if rest.starts_with('<') {
                if let Some((token, consumed)) = parse_markup(rest) {
                    self.pos += consumed;
                    match token {
                        Some(token) => return Some(token),
                        None => continue,
                    }
                }
            }

            // Text runs up to the next `<`. A `<` that didn't open a tag belongs to the text.
            let skip = usize::from(rest.starts_with('<'));
            let end = rest[skip..]
                .find('<')
                .map(|idx| idx + skip)
                .unwrap_or(rest.len());
            self.pos += end;
            return Some(Token::Text(decode_html_entities(&rest[..end])));
        }
        None
    }
}

/// Parses the markup construct at the start of `s`. Returns the token (`None` for constructs that
/// are dropped) and the number of bytes consumed, or `None` if `s` doesn't start with complete
/// markup.
fn parse_markup(s: &str) -> Option<(Option<Token<'_>>, usize)> {
    if let Some(comment) = s.strip_prefix("<!--") {
        let end = comment.find("-->")?;
        return Some((None, 4 + end + 3));
    }

    if let Some(cdata) = s.strip_prefix("<![CDATA[") {
        let end = cdata.find("]]>")?;
        return Some((Some(Token::Text(Cow::Borrowed(&cdata[..end]))), 9 + end + 3));
    }

    if s.starts_with("<!") || s.starts_with("<?") {
        let end = s.find('>')?;
        return Some((None, end + 1));
    }

    if let Some(tag) = s.strip_prefix("</") {
        if !tag.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let name_len = tag
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .unwrap_or(tag.len());
        let end = tag.find('>')?;
        return Some((
            Some(Token::End(tag[..name_len].to_ascii_lowercase())),
            2 + end + 1,
        ));
    }

    let tag = &s[1..];
    if !tag.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let (start_tag, consumed) = parse_start_tag(tag)?;
    Some((Some(Token::Start(start_tag)), 1 + consumed))
}

/// Parses everything following the `<` of a start tag.
fn parse_start_tag(s: &str) -> Option<(StartTag, usize)> {
    let bytes = s.as_bytes();
    let is_name_end = |b: u8| b.is_ascii_whitespace() || b == b'/' || b == b'>';

    let mut pos = bytes.iter().position(|b| is_name_end(*b))?;
    let mut tag = StartTag {
        name: s[..pos].to_ascii_lowercase(),
        attributes: vec![],
        self_closing: false,
    };

    loop {
        while bytes.get(pos)?.is_ascii_whitespace() {
            pos += 1;
        }

        match bytes[pos] {
            b'>' => return Some((tag, pos + 1)),
            b'/' => {
                pos += 1;
                if bytes.get(pos) == Some(&b'>') {
                    tag.self_closing = true;
                    return Some((tag, pos + 1));
                }
                continue;
            }
            _ => (),
        }

        // Attribute names are at least one character long, even if that character is a `=`.
        let name_start = pos;
        pos += 1;
        while !is_name_end(*bytes.get(pos)?) && bytes[pos] != b'=' {
            pos += 1;
        }
        let name = s[name_start..pos].to_ascii_lowercase();

        while bytes.get(pos)?.is_ascii_whitespace() {
            pos += 1;
        }

        if bytes[pos] != b'=' {
            tag.attributes.push(Attribute { name, value: None });
            continue;
        }
        pos += 1;

        while bytes.get(pos)?.is_ascii_whitespace() {
            pos += 1;
        }

        let value = match bytes[pos] {
            quote @ (b'"' | b'\'') => {
                let value_start = pos + 1;
                let len = bytes[value_start..].iter().position(|b| *b == quote)?;
                pos = value_start + len + 1;
                &s[value_start..value_start + len]
            }
            _ => {
                let value_start = pos;
                while !(bytes.get(pos)?.is_ascii_whitespace() || bytes[pos] == b'>') {
                    pos += 1;
                }
                &s[value_start..pos]
            }
        };

        tag.attributes.push(Attribute {
            name,
            value: Some(decode_html_entities(value).into_owned()),
        });
    }
}
