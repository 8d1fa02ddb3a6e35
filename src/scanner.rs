use std::borrow::Cow;
use std::ops::Range;

use crate::errors::JSONPathError;
use crate::path::{JsonPath, PathCursor};
use crate::unescape::{escape_string, remove_backslash_before, unescape_string};

/// Ways the streaming scan can stop early.
enum ScanStop {
    /// Input ended, or the scanner lost sync with malformed text. The
    /// extraction degrades to a null result rather than an error.
    Truncated,
    /// The depth cap was hit; surfaced as the nesting error.
    TooDeep,
}

type Scan<T> = Result<T, ScanStop>;

/// A single-pass matcher over raw JSON text.
///
/// The scanner walks the document byte by byte while consuming path tokens
/// from a cursor, never building a tree. The first value whose location
/// satisfies the whole path ends the scan; whatever follows it in the
/// document is never inspected. A scanner is built per extraction and
/// borrows both the document and the compiled path.
pub struct JsonScanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: u32,
    cursor: PathCursor<'a>,
    stopped_on_first_match: bool,
    escape_special_characters: bool,
}

impl<'a> JsonScanner<'a> {
    /// Nesting cap along the scan, matched and skipped structure alike.
    pub const MAX_PARSING_DEPTH: u32 = 1000;

    pub fn new(input: &'a str, path: &'a JsonPath) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
            cursor: path.cursor(),
            stopped_on_first_match: false,
            escape_special_characters: false,
        }
    }

    /// Re-emit string values with JSON-standard escapes instead of copying
    /// them as written.
    pub fn set_special_character_escaping(&mut self, enable: bool) {
        self.escape_special_characters = enable;
    }

    /// True when every path token was consumed by a successful match, which
    /// distinguishes a matched empty or null value from no match at all.
    pub fn stopped_on_first_match(&self) -> bool {
        self.stopped_on_first_match
    }

    /// The matched value as normalized JSON text.
    ///
    /// A matched `null` literal yields the literal text with the null flag
    /// set. No match, or a document that ends before the match completes,
    /// yields an empty value with the null flag set.
    pub fn extract(&mut self) -> Result<(String, bool), JSONPathError> {
        let Some(span) = self.find_match()? else {
            return Ok((String::new(), true));
        };
        let text = &self.input[span];
        if text == "null" {
            return Ok((text.to_string(), true));
        }
        let mut out = String::with_capacity(text.len());
        self.write_normalized(text, &mut out);
        Ok((out, false))
    }

    /// The matched scalar with string quoting stripped.
    ///
    /// Strings are unescaped, numbers and booleans keep their literal text,
    /// and a matched object, array or `null` is a null result.
    pub fn extract_scalar(&mut self) -> Result<(String, bool), JSONPathError> {
        let Some(span) = self.find_match()? else {
            return Ok((String::new(), true));
        };
        let text = &self.input[span];
        match text.as_bytes().first() {
            Some(b'"') => {
                let value = unescape_string(&text[1..text.len() - 1]);
                Ok((value.into_owned(), false))
            }
            Some(b'{') | Some(b'[') => Ok((String::new(), true)),
            _ if text == "null" => Ok((String::new(), true)),
            _ => Ok((text.to_string(), false)),
        }
    }

    /// The elements of a matched array, each as normalized JSON text.
    ///
    /// A match that is not an array is a null result.
    pub fn extract_array(&mut self) -> Result<(Vec<String>, bool), JSONPathError> {
        let Some(span) = self.find_match()? else {
            return Ok((Vec::new(), true));
        };
        if self.bytes[span.start] != b'[' {
            return Ok((Vec::new(), true));
        }
        let Ok(elements) = self.split_elements(&span) else {
            // the captured span was already balanced-skipped
            return Ok((Vec::new(), true));
        };
        let values = elements
            .into_iter()
            .map(|element| {
                let text = &self.input[element];
                let mut out = String::with_capacity(text.len());
                self.write_normalized(text, &mut out);
                out
            })
            .collect();
        Ok((values, false))
    }

    fn find_match(&mut self) -> Result<Option<Range<usize>>, JSONPathError> {
        self.cursor.rewind();
        // the root token stands for the document itself
        self.cursor.advance();
        self.skip_ws();
        if self.peek().is_none() {
            return Ok(None);
        }
        match self.match_value() {
            Ok(found) => Ok(found),
            Err(ScanStop::Truncated) => Ok(None),
            Err(ScanStop::TooDeep) => Err(JSONPathError::deep_nesting(Self::MAX_PARSING_DEPTH)),
        }
    }

    /// Match the value starting at the current position against the rest of
    /// the path. The value is consumed whether or not it matches.
    fn match_value(&mut self) -> Scan<Option<Range<usize>>> {
        self.skip_ws();
        if self.cursor.at_end() {
            let start = self.pos;
            self.skip_value()?;
            self.stopped_on_first_match = true;
            return Ok(Some(start..self.pos));
        }
        match self.peek() {
            Some(b'{') => self.match_object(),
            Some(b'[') => self.match_array(),
            Some(_) => {
                // a scalar cannot satisfy the remaining path
                self.skip_value()?;
                Ok(None)
            }
            None => Err(ScanStop::Truncated),
        }
    }

    /// Scan an object's members for the cursor's token. On a key match the
    /// cursor advances and the member value is matched recursively; if the
    /// descent fails, the cursor retreats and the scan keeps probing later
    /// members, so a duplicate key gets another chance. The first member
    /// that completes the path wins.
    fn match_object(&mut self) -> Scan<Option<Range<usize>>> {
        let Some(target) = self.cursor.token() else {
            return Err(ScanStop::Truncated);
        };
        self.pos += 1;
        self.enter()?;
        self.skip_ws();
        if self.accept(b'}') {
            self.leave();
            return Ok(None);
        }
        loop {
            let key = self.parse_member_key()?;
            self.skip_ws();
            if !self.accept(b':') {
                return Err(ScanStop::Truncated);
            }
            if key == target.text() {
                self.cursor.advance();
                if let Some(found) = self.match_value()? {
                    return Ok(Some(found));
                }
                self.cursor.retreat();
            } else {
                self.skip_value()?;
            }
            self.skip_ws();
            if self.accept(b',') {
                self.skip_ws();
                continue;
            }
            if self.accept(b'}') {
                self.leave();
                return Ok(None);
            }
            return Err(ScanStop::Truncated);
        }
    }

    /// Count elements up to the token's array reading and match there. A
    /// token with no array reading can never match, but the array is still
    /// skipped in balance.
    fn match_array(&mut self) -> Scan<Option<Range<usize>>> {
        let Some(target) = self.cursor.token() else {
            return Err(ScanStop::Truncated);
        };
        let wanted = target.array_index();
        self.pos += 1;
        self.enter()?;
        self.skip_ws();
        if self.accept(b']') {
            self.leave();
            return Ok(None);
        }
        let mut index = 0;
        loop {
            if wanted == Some(index) {
                self.cursor.advance();
                if let Some(found) = self.match_value()? {
                    return Ok(Some(found));
                }
                self.cursor.retreat();
            } else {
                self.skip_value()?;
            }
            self.skip_ws();
            if self.accept(b',') {
                index += 1;
                self.skip_ws();
                continue;
            }
            if self.accept(b']') {
                self.leave();
                return Ok(None);
            }
            return Err(ScanStop::Truncated);
        }
    }

    /// Consume one JSON value, balanced across nested containers, tracking
    /// depth against the parsing cap.
    fn skip_value(&mut self) -> Scan<()> {
        let base = self.depth;
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(ScanStop::Truncated),
                Some(b'{') | Some(b'[') => {
                    self.pos += 1;
                    self.enter()?;
                }
                Some(b'}') | Some(b']') => {
                    if self.depth == base {
                        return Err(ScanStop::Truncated);
                    }
                    self.pos += 1;
                    self.leave();
                }
                Some(b'"') => self.skip_string()?,
                Some(b',') | Some(b':') => {
                    if self.depth == base {
                        return Err(ScanStop::Truncated);
                    }
                    self.pos += 1;
                }
                Some(_) => self.skip_scalar()?,
            }
            if self.depth == base {
                return Ok(());
            }
        }
    }

    fn skip_string(&mut self) -> Scan<()> {
        if !self.accept(b'"') {
            return Err(ScanStop::Truncated);
        }
        loop {
            match self.peek() {
                None => return Err(ScanStop::Truncated),
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek().is_none() {
                        return Err(ScanStop::Truncated);
                    }
                    self.pos += 1;
                }
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Parse the JSON string at the current position for key comparison.
    /// Keys keep their escapes as written except that a backslash before a
    /// double quote is stripped, mirroring how quoted path tokens were
    /// prepared; `{"a\"b": ...}` is addressed by `."a\"b"` while a key
    /// holding `\\` stays two bytes on both sides.
    fn parse_member_key(&mut self) -> Scan<Cow<'a, str>> {
        let start = self.pos;
        self.skip_string()?;
        let body = &self.input[start + 1..self.pos - 1];
        if body.contains('\\') {
            Ok(Cow::Owned(remove_backslash_before(body, '"')))
        } else {
            Ok(Cow::Borrowed(body))
        }
    }

    fn skip_scalar(&mut self) -> Scan<()> {
        match self.peek() {
            Some(b't') => self.skip_literal("true"),
            Some(b'f') => self.skip_literal("false"),
            Some(b'n') => self.skip_literal("null"),
            Some(b'-') | Some(b'+') | Some(b'.') => self.skip_number(),
            Some(ch) if ch.is_ascii_digit() => self.skip_number(),
            _ => Err(ScanStop::Truncated),
        }
    }

    fn skip_literal(&mut self, literal: &str) -> Scan<()> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(ScanStop::Truncated)
        }
    }

    /// Consume the longest well-formed JSON number prefix. A leaf scalar
    /// stops at the first byte that does not extend the number, so `0001`
    /// scans as `0` and `123abc` as `123`; anything beyond the prefix is
    /// left for the caller, which at a match site means it is never read.
    fn skip_number(&mut self) -> Scan<()> {
        if matches!(self.peek(), Some(b'-') | Some(b'+')) {
            self.pos += 1;
        }
        if self.accept(b'0') {
            // a leading zero takes no more integer digits
        } else if self.digit_run() == 0 {
            return Err(ScanStop::Truncated);
        }
        if self.peek() == Some(b'.') && self.digit_at(self.pos + 1) {
            self.pos += 1;
            self.digit_run();
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mut after = self.pos + 1;
            if matches!(self.bytes.get(after), Some(b'+') | Some(b'-')) {
                after += 1;
            }
            if self.digit_at(after) {
                self.pos = after;
                self.digit_run();
            }
        }
        Ok(())
    }

    fn digit_run(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn digit_at(&self, at: usize) -> bool {
        matches!(self.bytes.get(at), Some(ch) if ch.is_ascii_digit())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn accept(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn enter(&mut self) -> Scan<()> {
        self.depth += 1;
        if self.depth > Self::MAX_PARSING_DEPTH {
            return Err(ScanStop::TooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Split a captured array span into one span per element.
    fn split_elements(&mut self, span: &Range<usize>) -> Scan<Vec<Range<usize>>> {
        self.pos = span.start + 1;
        self.depth = 0;
        let mut elements = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(elements);
                }
                None => return Err(ScanStop::Truncated),
                Some(_) => {}
            }
            let start = self.pos;
            self.skip_value()?;
            elements.push(start..self.pos);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(elements);
                }
                _ => return Err(ScanStop::Truncated),
            }
        }
    }

    /// Copy captured JSON text with whitespace outside strings removed.
    /// With escaping enabled, every string is re-emitted as the minimal
    /// JSON escape of its unescaped value.
    fn write_normalized(&self, text: &str, out: &mut String) {
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b' ' | b'\t' | b'\n' | b'\r' => i += 1,
                b'"' => {
                    let end = string_end(bytes, i);
                    let raw = &text[i..end];
                    if self.escape_special_characters && raw.len() >= 2 {
                        let value = unescape_string(&raw[1..raw.len() - 1]);
                        escape_string(&value, out);
                    } else {
                        out.push_str(raw);
                    }
                    i = end;
                }
                _ => {
                    let start = i;
                    while i < bytes.len()
                        && !matches!(bytes[i], b' ' | b'\t' | b'\n' | b'\r' | b'"')
                    {
                        i += 1;
                    }
                    out.push_str(&text[start..i]);
                }
            }
        }
    }
}

/// Position just past the closing quote of the string starting at `start`.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
