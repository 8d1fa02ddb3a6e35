//! JSON string escape handling shared by the path lexer and the scanner.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

/// Strip the backslash from `\<target>` sequences in a quoted path token.
///
/// Only the quote character of the enclosing form is an escape target. A
/// backslash followed by anything else is kept verbatim, so `\'\'\\s ` with
/// a `'` target becomes `''\\s `.
pub fn remove_backslash_before(body: &str, target: char) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&target) {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Decode a JSON string body (the text between the quotes).
///
/// Decoding is lenient: an escape that is not well formed passes through as
/// its literal character, so a malformed document degrades instead of
/// aborting the scan.
pub fn unescape_string(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => match read_code_unit(&mut chars) {
                Some(unit) if (0xD800..=0xDBFF).contains(&unit) => {
                    out.push(combine_surrogates(unit, &mut chars));
                }
                Some(unit) => {
                    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => out.push('u'),
            },
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// Append `value` to `out` as a quoted JSON string with minimal escaping:
/// quote, backslash, the short control escapes, and `\u00XX` for the
/// remaining control bytes.
pub fn escape_string(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

fn read_code_unit(chars: &mut Peekable<Chars>) -> Option<u32> {
    let mut unit = 0;
    for _ in 0..4 {
        let digit = chars.peek().and_then(|ch| ch.to_digit(16))?;
        chars.next();
        unit = unit * 16 + digit;
    }
    Some(unit)
}

fn combine_surrogates(high: u32, chars: &mut Peekable<Chars>) -> char {
    let mut rest = chars.clone();
    if rest.next() == Some('\\') && rest.next() == Some('u') {
        if let Some(low) = read_code_unit(&mut rest) {
            if (0xDC00..=0xDFFF).contains(&low) {
                *chars = rest;
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
            }
        }
    }
    char::REPLACEMENT_CHARACTER
}
