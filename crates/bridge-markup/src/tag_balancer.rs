// prose-bridge/bridge-markup
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::VecDeque;

use tracing::debug;

use crate::tokenizer::Token;

/// Turns a token stream into a properly nested one.
///
/// - `<tag/>` is closed right away. There is no list of void elements, so an unclosed `<br>`
///   stays open and wraps whatever follows it until one of its ancestors is closed.
/// - An end tag closes every element opened after its matching start tag.
/// - End tags without a matching open element are dropped.
/// - Elements still open at the end of the input are closed innermost first.
pub(crate) struct TagBalancer<'input, I> {
    tokens: I,
    open_elements: Vec<String>,
    pending: VecDeque<Token<'input>>,
}

impl<'input, I> TagBalancer<'input, I>
where
    I: Iterator<Item = Token<'input>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            open_elements: vec![],
            pending: VecDeque::new(),
        }
    }

    fn close_from(&mut self, idx: usize) {
        let closed = self.open_elements.drain(idx..).rev().map(Token::End);
        self.pending.extend(closed);
    }
}

impl<'input, I> Iterator for TagBalancer<'input, I>
where
    I: Iterator<Item = Token<'input>>,
{
    type Item = Token<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            match self.tokens.next() {
                Some(Token::Start(tag)) => {
                    if tag.self_closing {
                        self.pending.push_back(Token::End(tag.name.clone()));
                    } else {
                        self.open_elements.push(tag.name.clone());
                    }
                    return Some(Token::Start(tag));
                }
                Some(Token::End(name)) => {
                    let idx = self.open_elements.iter().rposition(|open| *open == name);
                    match idx {
                        Some(idx) => self.close_from(idx),
                        None => debug!("Dropping stray closing tag </{}>", name),
                    }
                }
                Some(text @ Token::Text(_)) => return Some(text),
                None if self.open_elements.is_empty() => return None,
                None => self.close_from(0),
            }
        }
    }
}
