// prose-bridge/bridge-markup
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Decides which parts of the input survive the conversion.
///
/// Elements listed in `tags` are kept together with the attributes listed for them (plus
/// `global_attributes`). Elements listed in `stripped_tags` are removed including their content.
/// Any other element is unwrapped, i.e. its content is kept but the tag itself is dropped.
///
/// Can be deserialized from a partial document; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XhtmlPolicy {
    pub tags: BTreeMap<String, BTreeSet<String>>,
    pub global_attributes: BTreeSet<String>,
    pub stripped_tags: BTreeSet<String>,
    /// Attributes holding a URL. Their value must be relative or use one of `url_schemes`,
    /// otherwise the attribute is dropped.
    pub url_attributes: BTreeSet<String>,
    pub url_schemes: BTreeSet<String>,
    /// Inputs with elements nested deeper than this are rejected.
    pub max_depth: usize,
}

impl XhtmlPolicy {
    pub fn is_allowed(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub fn is_stripped(&self, tag: &str) -> bool {
        self.stripped_tags.contains(tag)
    }

    pub fn is_attribute_allowed(&self, tag: &str, attribute: &str) -> bool {
        self.global_attributes.contains(attribute)
            || self
                .tags
                .get(tag)
                .map(|attributes| attributes.contains(attribute))
                .unwrap_or(false)
    }

    /// Returns `false` if `attribute` holds a URL whose scheme isn't allowed.
    pub fn is_value_allowed(&self, attribute: &str, value: &str) -> bool {
        if !self.url_attributes.contains(attribute) {
            return true;
        }
        match url_scheme(value) {
            Some(scheme) => self.url_schemes.contains(&scheme),
            None => true,
        }
    }
}

/// Extracts the lower-cased scheme of `url`, if it has one. Whitespace and control characters
/// are skipped the way browsers skip them (`java\tscript:`).
fn url_scheme(url: &str) -> Option<String> {
    let mut scheme = String::new();

    for c in url.chars().filter(|c| !c.is_ascii_whitespace() && !c.is_control()) {
        match c {
            ':' if !scheme.is_empty() => return Some(scheme),
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {
                scheme.push(c.to_ascii_lowercase())
            }
            _ => return None,
        }
    }

    None
}

impl Default for XhtmlPolicy {
    /// The XHTML-IM recommended profile (text, hypertext, list, image and style modules) plus
    /// the inline formatting tags other networks commonly send.
    fn default() -> Self {
        let bare_tags = [
            "b",
            "blockquote",
            "br",
            "cite",
            "code",
            "del",
            "em",
            "h1",
            "h2",
            "h3",
            "h4",
            "h5",
            "h6",
            "i",
            "li",
            "ol",
            "p",
            "pre",
            "s",
            "span",
            "strong",
            "u",
            "ul",
        ];

        let mut tags = bare_tags
            .iter()
            .map(|tag| (tag.to_string(), BTreeSet::new()))
            .collect::<BTreeMap<_, _>>();
        tags.insert("a".to_string(), string_set(&["href", "type"]));
        tags.insert(
            "img".to_string(),
            string_set(&["alt", "height", "src", "width"]),
        );

        Self {
            tags,
            global_attributes: string_set(&["class", "style", "title"]),
            stripped_tags: string_set(&["head", "iframe", "object", "script", "style", "title"]),
            url_attributes: string_set(&["href", "src"]),
            url_schemes: string_set(&["http", "https", "mailto", "xmpp"]),
            max_depth: 256,
        }
    }
}

fn string_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(ToString::to_string).collect()
}
