// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reader and writer for the JavaScript object-literal dialect Sphinx uses.
//!
//! Sphinx does not write JSON. Its `jsdump` serializer leaves object keys
//! unquoted whenever they are plain identifiers (`docnames:[...]`), escapes
//! everything outside printable ASCII, and orders object members by their
//! *rendered* `key:value` text rather than by key. That last rule is why
//! `"sphinx.domains.c":2` sorts before `sphinx:56` in every real index: the
//! quote character sorts below any letter.
//!
//! Reproducing those rules exactly makes [`dump_index`] byte-identical to what
//! Sphinx itself wrote, which is what lets `sphindex fmt --check` work.
//!
//! # Grammar accepted by [`loads`]
//!
//! ```text
//! value  := object | array | string | number | "true" | "false" | "null"
//! object := "{" [ key ":" value { "," key ":" value } ] "}"
//! key    := string | identifier
//! array  := "[" [ value { "," value } ] "]"
//! ```
//!
//! Plain JSON is a subset, so indexes written by newer Sphinx releases (which
//! switched to `json.dumps`) load too.

use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::error::{Error, Result};
use crate::types::SearchIndex;

/// Function call Sphinx wraps the payload in.
pub const WRAPPER_PREFIX: &str = "Search.setIndex(";
pub const WRAPPER_SUFFIX: &str = ")";

/// Deeper nesting than this is certainly not a search index.
pub const MAX_DEPTH: usize = 128;

/// Words JavaScript reserves; Sphinx quotes them even though they look like
/// identifiers (the Salmon index has `"do":6` in `titleterms`).
const RESERVED_WORDS: &[&str] = &[
    "abstract", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "debugger", "default", "delete", "do", "double", "else", "enum", "export",
    "extends", "false", "final", "finally", "float", "for", "function", "goto", "if",
    "implements", "import", "in", "instanceof", "int", "interface", "long", "native", "new",
    "null", "package", "private", "protected", "public", "return", "short", "static", "super",
    "switch", "synchronized", "this", "throw", "throws", "transient", "true", "try", "typeof",
    "var", "void", "volatile", "while", "with",
];

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("invalid escape sequence \\{0}")]
    InvalidEscape(char),
    #[error("invalid \\u escape")]
    InvalidUnicodeEscape,
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("unknown bare word {0:?}")]
    UnknownKeyword(String),
    #[error("trailing characters after value")]
    TrailingCharacters,
    #[error("nesting deeper than {MAX_DEPTH} levels")]
    NestingTooDeep,
    #[error("missing closing ')' of Search.setIndex call")]
    UnclosedWrapper,
}

/// Where and why parsing stopped. Line and column are 1-based; the column
/// counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn at(src: &str, pos: usize, kind: ParseErrorKind) -> Self {
        let before = &src[..pos.min(src.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        ParseError { line, column, kind }
    }
}

// =============================================================================
// READING
// =============================================================================

/// Strip the `Search.setIndex(` ... `)` call, tolerating surrounding
/// whitespace and a trailing semicolon. Text without the call is returned
/// trimmed so bare object literals load too.
pub fn strip_wrapper(text: &str) -> std::result::Result<&str, ParseError> {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix(WRAPPER_PREFIX) else {
        return Ok(trimmed);
    };
    let inner = inner.trim_end();
    let inner = inner.strip_suffix(';').unwrap_or(inner).trim_end();
    inner
        .strip_suffix(WRAPPER_SUFFIX)
        .ok_or_else(|| ParseError::at(text, text.len(), ParseErrorKind::UnclosedWrapper))
}

/// Parse one value in Sphinx's object-literal dialect.
pub fn loads(text: &str) -> std::result::Result<Value, ParseError> {
    let mut parser = Parser::new(text);
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < parser.bytes.len() {
        return Err(parser.error(ParseErrorKind::TrailingCharacters));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::at(self.src, self.pos, kind)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Error for whatever sits at the cursor.
    fn unexpected(&self) -> ParseError {
        match self.src[self.pos..].chars().next() {
            Some(c) => self.error(ParseErrorKind::UnexpectedChar(c)),
            None => self.error(ParseErrorKind::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, byte: u8) -> std::result::Result<(), ParseError> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_value(&mut self) -> std::result::Result<Value, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
            Some(b'{') => self.nested(Self::parse_object),
            Some(b'[') => self.nested(Self::parse_array),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b) if is_ident_start(b) => {
                let start = self.pos;
                let word = self.parse_identifier();
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    other => Err(ParseError::at(
                        self.src,
                        start,
                        ParseErrorKind::UnknownKeyword(other.to_string()),
                    )),
                }
            }
            Some(_) => Err(self.unexpected()),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> std::result::Result<Value, ParseError>,
    ) -> std::result::Result<Value, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_object(&mut self) -> std::result::Result<Value, ParseError> {
        self.expect(b'{')?;
        let mut map = Map::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Object(map));
        }
        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some(b'"') => self.parse_string()?,
                Some(b) if is_ident_start(b) => self.parse_identifier().to_string(),
                _ => return Err(self.unexpected()),
            };
            self.expect(b':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_array(&mut self) -> std::result::Result<Value, ParseError> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    fn parse_number(&mut self) -> std::result::Result<Value, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {}
                b'.' | b'e' | b'E' => is_float = true,
                b'+' | b'-' if is_float => {}
                _ => break,
            }
            self.pos += 1;
        }
        let raw = &self.src[start..self.pos];
        let invalid = || ParseError::at(self.src, start, ParseErrorKind::InvalidNumber(raw.to_string()));

        if !is_float {
            if let Ok(n) = raw.parse::<u64>() {
                return Ok(Value::Number(n.into()));
            }
            if let Ok(n) = raw.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
        }
        raw.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(invalid)
    }

    fn parse_string(&mut self) -> std::result::Result<String, ParseError> {
        self.expect(b'"')?;
        let mut out = String::new();
        loop {
            let Some(c) = self.src[self.pos..].chars().next() else {
                return Err(self.error(ParseErrorKind::UnexpectedEnd));
            };
            self.pos += c.len_utf8();
            match c {
                '"' => return Ok(out),
                '\\' => out.push(self.parse_escape()?),
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self) -> std::result::Result<char, ParseError> {
        let Some(c) = self.src[self.pos..].chars().next() else {
            return Err(self.error(ParseErrorKind::UnexpectedEnd));
        };
        self.pos += c.len_utf8();
        Ok(match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.parse_unicode_escape(),
            other => return Err(self.error(ParseErrorKind::InvalidEscape(other))),
        })
    }

    /// `\uXXXX`, combining a following low surrogate when the first unit is high.
    fn parse_unicode_escape(&mut self) -> std::result::Result<char, ParseError> {
        let high = self.parse_hex4()?;
        if (0xD800..0xDC00).contains(&high) {
            if self.src[self.pos..].starts_with("\\u") {
                self.pos += 2;
                let low = self.parse_hex4()?;
                if (0xDC00..0xE000).contains(&low) {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(code)
                        .ok_or_else(|| self.error(ParseErrorKind::InvalidUnicodeEscape));
                }
            }
            return Err(self.error(ParseErrorKind::InvalidUnicodeEscape));
        }
        char::from_u32(high).ok_or_else(|| self.error(ParseErrorKind::InvalidUnicodeEscape))
    }

    fn parse_hex4(&mut self) -> std::result::Result<u32, ParseError> {
        let digits = self
            .src
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error(ParseErrorKind::InvalidUnicodeEscape))?;
        let code = u32::from_str_radix(digits, 16)
            .map_err(|_| self.error(ParseErrorKind::InvalidUnicodeEscape))?;
        self.pos += 4;
        Ok(code)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

// =============================================================================
// WRITING
// =============================================================================

/// Serialize exactly as Sphinx's `jsdump.dumps` does.
pub fn dumps(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut members: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    let mut member = String::new();
                    write_key(&mut member, key);
                    member.push(':');
                    write_value(&mut member, value);
                    member
                })
                .collect();
            // Rendered text is pure ASCII, so byte order is Python's order.
            members.sort_unstable();
            out.push('{');
            out.push_str(&members.join(","));
            out.push('}');
        }
    }
}

fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

/// Can this key be written without quotes?
pub fn is_bare_key(key: &str) -> bool {
    let mut bytes = key.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    is_ident_start(first)
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        && !RESERVED_WORDS.contains(&key)
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    out.push('"');
}

// =============================================================================
// SEARCH INDEX FILES
// =============================================================================

/// Parse the contents of a `searchindex.js` (wrapped or bare).
pub fn load_index(text: &str) -> Result<SearchIndex> {
    let literal = strip_wrapper(text)?;
    let value = loads(literal).map_err(|mut err| {
        // Report positions relative to the whole file, not the stripped literal.
        let offset = literal.as_ptr() as usize - text.as_ptr() as usize;
        if offset > 0 {
            let shifted = ParseError::at(text, offset, err.kind.clone());
            if err.line == 1 {
                err.column += shifted.column - 1;
            }
            err.line += shifted.line - 1;
        }
        err
    })?;
    Ok(serde_json::from_value(value)?)
}

/// Render a search index exactly as Sphinx would, including the
/// `Search.setIndex(...)` call.
pub fn dump_index(index: &SearchIndex) -> Result<String> {
    let value = serde_json::to_value(index)?;
    Ok(format!("{}{}{}", WRAPPER_PREFIX, dumps(&value), WRAPPER_SUFFIX))
}

pub fn read_index(path: &Path) -> Result<SearchIndex> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read search index");
    load_index(&text)
}

pub fn write_index(path: &Path, index: &SearchIndex) -> Result<usize> {
    let text = dump_index(index)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote search index");
    Ok(text.len())
}
