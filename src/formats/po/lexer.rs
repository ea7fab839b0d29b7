//! Line-oriented tokenizer for PO/POT text.
//!
//! The lexer pulls one line at a time from a [`BufRead`] and turns it into
//! zero or more [`Token`]s. A keyword line yields an identifier followed by its
//! string literals; a continuation line (`"..."`) yields string literals only.
//! Concatenating those literals is left to the unit assembler.

use std::{
    collections::VecDeque,
    io::{BufRead, Lines},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref KEYWORD_REGEX: Regex =
        Regex::new(r"^(msgctxt|msgid_plural|msgid|msgstr(?:\[(\d+)\])?)(?:\s+|$)").unwrap();
}

/// Kind of a `#` comment line, taken from the character after `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `#.` comments written by the developer for translators.
    Extracted,
    /// `# ` comments written by translators.
    Translator,
    /// `#:` source locations.
    Reference,
    /// `#,` flags such as `fuzzy` or `c-format`.
    Flag,
    /// `#~` obsolete entries.
    Other,
}

impl CommentKind {
    fn from_marker(marker: Option<char>) -> Self {
        match marker {
            Some('.') => CommentKind::Extracted,
            Some(':') => CommentKind::Reference,
            Some(',') => CommentKind::Flag,
            Some('~') => CommentKind::Other,
            _ => CommentKind::Translator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Comment(CommentKind, String),
    /// `msgctxt`, `msgid`, `msgid_plural`, `msgstr` or `msgstr[N]`.
    Identifier(String),
    /// A decoded string literal.
    String(String),
}

/// Streaming tokenizer over one catalog source.
pub struct Lexer<R> {
    lines: Lines<R>,
    origin: String,
    line: usize,
    pending: VecDeque<Token>,
    // A continuation line is only valid right after a keyword or another literal.
    in_value: bool,
    done: bool,
}

impl<R: BufRead> Lexer<R> {
    /// `origin` names the source in error messages, usually the file path.
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Lexer {
            lines: reader.lines(),
            origin: origin.into(),
            line: 0,
            pending: VecDeque::new(),
            in_value: false,
            done: false,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::lex_error(self.origin.clone(), self.line, message)
    }

    fn lex_line(&mut self, line: &str) -> Result<(), Error> {
        let mut line = line.trim_start();
        if self.line == 1 {
            line = line.trim_start_matches('\u{feff}');
        }
        if line.is_empty() {
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix('#') {
            let mut chars = rest.chars();
            let marker = chars.next();
            let kind = CommentKind::from_marker(marker);
            let payload = match kind {
                CommentKind::Translator => rest,
                _ => chars.as_str(),
            };
            let payload = payload.strip_prefix(' ').unwrap_or(payload);
            self.pending
                .push_back(Token::Comment(kind, payload.trim_end_matches('\r').to_string()));
            self.in_value = false;
            return Ok(());
        }

        if line.starts_with('"') {
            if !self.in_value {
                return Err(self.error("string literal without a preceding keyword"));
            }
            return self.lex_literals(line);
        }

        let Some(captures) = KEYWORD_REGEX.captures(line) else {
            let word = line.split_whitespace().next().unwrap_or(line);
            return Err(self.error(format!("unrecognized keyword `{}`", word)));
        };
        let keyword = &captures[1];
        if let Some(index) = captures.get(2) {
            if index.as_str().parse::<usize>().is_err() {
                return Err(self.error(format!("plural index out of range in `{}`", keyword)));
            }
        }
        let rest = &line[captures[0].len()..];
        if !rest.starts_with('"') {
            return Err(self.error(format!("expected a string literal after `{}`", keyword)));
        }
        self.pending.push_back(Token::Identifier(keyword.to_string()));
        self.in_value = true;
        self.lex_literals(rest)
    }

    /// Reads every `"..."` literal on the rest of a line.
    fn lex_literals(&mut self, mut rest: &str) -> Result<(), Error> {
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                return Ok(());
            }
            let Some(body) = rest.strip_prefix('"') else {
                return Err(self.error(format!("unexpected text after string literal: `{}`", rest)));
            };
            let (value, consumed) = decode_literal(body).map_err(|message| self.error(message))?;
            self.pending.push_back(Token::String(value));
            rest = &body[consumed..];
        }
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(source)) => {
                    self.done = true;
                    return Some(Err(Error::Read {
                        origin: self.origin.clone(),
                        line: self.line + 1,
                        source,
                    }));
                }
                None => {
                    self.done = true;
                    return None;
                }
            };
            self.line += 1;
            if let Err(error) = self.lex_line(&line) {
                self.done = true;
                self.pending.clear();
                return Some(Err(error));
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Lexer<R> {}

/// Decodes the body of a literal (the text after the opening quote) up to the
/// closing quote. Returns the value and the number of bytes consumed, including
/// the closing quote.
fn decode_literal(body: &str) -> Result<(String, usize), String> {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((value, i + 1)),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    'a' => value.push('\x07'),
                    'b' => value.push('\x08'),
                    'f' => value.push('\x0c'),
                    'v' => value.push('\x0b'),
                    '"' | '\\' | '\'' | '?' => value.push(escaped),
                    '0'..='7' => {
                        let mut code = escaped.to_digit(8).unwrap_or_default();
                        for _ in 0..2 {
                            match chars.peek().and_then(|(_, d)| d.to_digit(8)) {
                                Some(digit) => {
                                    code = code * 8 + digit;
                                    chars.next();
                                }
                                None => break,
                            }
                        }
                        value.push(char_from_code(code)?);
                    }
                    'x' => {
                        let mut code = 0;
                        let mut digits = 0;
                        while digits < 2 {
                            match chars.peek().and_then(|(_, d)| d.to_digit(16)) {
                                Some(digit) => {
                                    code = code * 16 + digit;
                                    digits += 1;
                                    chars.next();
                                }
                                None => break,
                            }
                        }
                        if digits == 0 {
                            return Err("`\\x` escape without hex digits".to_string());
                        }
                        value.push(char_from_code(code)?);
                    }
                    other => return Err(format!("invalid escape sequence `\\{}`", other)),
                }
            }
            other => value.push(other),
        }
    }

    Err("unterminated string literal".to_string())
}

fn char_from_code(code: u32) -> Result<char, String> {
    char::from_u32(code).ok_or_else(|| format!("invalid character code {}", code))
}

/// Escapes `text` so that it decodes back to itself inside a `"..."` literal.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
