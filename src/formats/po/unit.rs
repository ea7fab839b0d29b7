//! Groups tokens into translation units.
//!
//! A PO entry always ends with one or more `msgstr` lines, and the next entry
//! starts with either a comment block or `msgctxt`/`msgid`. [`Units`] uses that
//! rule to cut the token stream without looking further ahead than one token.

use std::mem;

use crate::{
    error::Error,
    formats::po::lexer::{CommentKind, Token},
};

/// A keyword together with the concatenation of its string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub identifier: String,
    pub value: String,
}

/// One logical entry: its comments followed by its messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unit {
    pub comments: Vec<(CommentKind, String)>,
    pub messages: Vec<Message>,
}

impl Unit {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.messages.is_empty()
    }

    fn push(&mut self, token: Token) {
        match token {
            Token::Comment(kind, text) => self.comments.push((kind, text)),
            Token::Identifier(identifier) => self.messages.push(Message {
                identifier,
                value: String::new(),
            }),
            Token::String(text) => {
                // The lexer rejects literals that don't follow a keyword.
                if let Some(message) = self.messages.last_mut() {
                    message.value.push_str(&text);
                }
            }
        }
    }
}

/// Lazily assembles [`Unit`]s from a token stream.
pub struct Units<I> {
    tokens: I,
    current: Unit,
    seen_msgstr: bool,
    done: bool,
}

impl<I> Units<I>
where
    I: Iterator<Item = Result<Token, Error>>,
{
    pub fn new(tokens: I) -> Self {
        Units {
            tokens,
            current: Unit::default(),
            seen_msgstr: false,
            done: false,
        }
    }

    fn starts_new_unit(&self, token: &Token) -> bool {
        self.seen_msgstr
            && match token {
                Token::Comment(..) => true,
                Token::Identifier(identifier) => identifier == "msgctxt" || identifier == "msgid",
                Token::String(_) => false,
            }
    }
}

impl<I> Iterator for Units<I>
where
    I: Iterator<Item = Result<Token, Error>>,
{
    type Item = Result<Unit, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let token = match self.tokens.next() {
                Some(Ok(token)) => token,
                Some(Err(error)) => {
                    self.done = true;
                    return Some(Err(error));
                }
                None => {
                    self.done = true;
                    if self.current.is_empty() {
                        return None;
                    }
                    return Some(Ok(mem::take(&mut self.current)));
                }
            };

            if self.starts_new_unit(&token) {
                let finished = mem::take(&mut self.current);
                self.seen_msgstr = false;
                self.current.push(token);
                return Some(Ok(finished));
            }

            if matches!(&token, Token::Identifier(identifier) if identifier.starts_with("msgstr")) {
                self.seen_msgstr = true;
            }
            self.current.push(token);
        }
    }
}

impl<I> std::iter::FusedIterator for Units<I> where I: Iterator<Item = Result<Token, Error>> {}
