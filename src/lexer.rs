use std::str::CharIndices;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::JSONPathError, token::PathToken, unescape::remove_backslash_before};

const EOQ: char = '\0';

lazy_static! {
    // Scanned over the whole path before tokenization, quoted brackets
    // included, so `$.a.;;;.@.f` reports `@` rather than an invalid token.
    // Leftmost match wins: `$.a.*` reports `*`, `$..` reports `..`.
    static ref UNSUPPORTED_OPERATOR: Regex =
        Regex::new(r"\.\.|@|\*").expect("unsupported operator pattern");
}

/// A JSONPath tokenizer for the two SQL dialects.
///
/// `sql_standard_mode` selects the SQL-2016 subset used by `JSON_QUERY` and
/// `JSON_VALUE`: dotted identifiers, `."..."` quoted members and numeric
/// bracket indices. With the flag off (the `JSON_EXTRACT` family), `['...']`
/// quoted members and bare bracket identifiers are accepted instead, and a
/// trailing dot is tolerated as a no-op.
struct PathLexer<'q> {
    query: &'q str,
    sql_standard_mode: bool,

    chars: CharIndices<'q>,
    pos: usize,

    collect: bool,
    tokens: Vec<PathToken>,
}

impl<'q> PathLexer<'q> {
    fn new(query: &'q str, sql_standard_mode: bool, collect: bool) -> Self {
        let mut tokens = Vec::new();
        if collect {
            tokens.push(PathToken::root());
        }
        Self {
            query,
            sql_standard_mode,
            chars: query.char_indices(),
            pos: 0,
            collect,
            tokens,
        }
    }

    fn run(&mut self) -> Result<(), JSONPathError> {
        loop {
            match self.peek() {
                EOQ => return Ok(()),
                '.' => self.lex_dot_segment()?,
                '[' => self.lex_bracket_segment()?,
                _ => return Err(JSONPathError::invalid_token(self.rest())),
            }
        }
    }

    fn next(&mut self) -> Option<char> {
        if let Some((pos, ch)) = self.chars.next() {
            self.pos = pos + ch.len_utf8();
            Some(ch)
        } else {
            None
        }
    }

    fn peek(&mut self) -> char {
        if let Some((_, ch)) = self.chars.clone().next() {
            ch
        } else {
            EOQ
        }
    }

    fn accept(&mut self, ch: char) -> bool {
        if self.peek() == ch {
            self.next();
            true
        } else {
            false
        }
    }

    fn accept_run(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek() != EOQ && pred(self.peek()) {
            self.next();
        }
    }

    fn rest(&self) -> &'q str {
        self.query
            .get(self.pos..)
            .expect("lexer error: position is not on a codepoint boundary")
    }

    fn slice(&self, start: usize) -> &'q str {
        self.query
            .get(start..self.pos)
            .expect("lexer error: slice out of bounds or not on codepoint boundary")
    }

    fn fragment(&self, step: usize) -> &'q str {
        self.query
            .get(step..)
            .expect("lexer error: step is not on a codepoint boundary")
    }

    fn emit(&mut self, text: String) {
        if self.collect {
            self.tokens.push(PathToken::new(text));
        }
    }

    fn lex_dot_segment(&mut self) -> Result<(), JSONPathError> {
        let step = self.pos;
        self.next(); // the dot

        if self.sql_standard_mode && self.peek() == '"' {
            self.next();
            let body = self.lex_quoted('"', step)?;
            let token = remove_backslash_before(body, '"');
            self.emit(token);
            return Ok(());
        }

        let start = self.pos;
        if self.sql_standard_mode {
            self.accept_run(is_name_char);
        } else {
            self.accept_run(is_lax_name_char);
        }
        let name = self.slice(start);

        if name.is_empty() {
            if self.sql_standard_mode || self.peek() != EOQ {
                return Err(JSONPathError::invalid_token(self.fragment(step)));
            }
            // a trailing dot with nothing after it is a no-op
            return Ok(());
        }

        self.emit(name.to_string());
        Ok(())
    }

    fn lex_bracket_segment(&mut self) -> Result<(), JSONPathError> {
        let step = self.pos;
        self.next(); // the open bracket
        self.accept_run(is_whitespace_char);

        let token = if self.peek() == '\'' {
            if self.sql_standard_mode {
                return Err(JSONPathError::invalid_token(self.fragment(step)));
            }
            self.next();
            let body = self.lex_quoted('\'', step)?;
            remove_backslash_before(body, '\'')
        } else {
            let start = self.pos;
            if self.sql_standard_mode {
                self.accept_run(is_digit);
            } else {
                // bare bracket members take word characters only, which
                // keeps slice and filter syntax out: `[1:3]` and `[?(a)]`
                // fail at the first non-name byte
                self.accept_run(is_name_char);
            }
            let body = self.slice(start);
            if body.is_empty() {
                return Err(JSONPathError::invalid_token(self.fragment(step)));
            }
            body.to_string()
        };

        self.accept_run(is_whitespace_char);
        if !self.accept(']') {
            return Err(JSONPathError::invalid_token(self.fragment(step)));
        }

        self.emit(token);
        Ok(())
    }

    fn lex_quoted(&mut self, quote: char, step: usize) -> Result<&'q str, JSONPathError> {
        let start = self.pos;
        loop {
            match self.peek() {
                EOQ => return Err(JSONPathError::invalid_token(self.fragment(step))),
                '\\' => {
                    self.next();
                    if self.next().is_none() {
                        return Err(JSONPathError::invalid_token(self.fragment(step)));
                    }
                }
                ch if ch == quote => {
                    let body = self.slice(start);
                    self.next();
                    return Ok(body);
                }
                _ => {
                    self.next();
                }
            }
        }
    }
}

fn check(
    path: &str,
    sql_standard_mode: bool,
    collect: bool,
) -> Result<Vec<PathToken>, JSONPathError> {
    let Some(rest) = path.strip_prefix('$') else {
        return Err(JSONPathError::must_start_with_root());
    };

    if let Some(found) = UNSUPPORTED_OPERATOR.find(rest) {
        return Err(JSONPathError::unsupported_operator(found.as_str()));
    }

    let mut lexer = PathLexer::new(rest, sql_standard_mode, collect);
    lexer.run()?;
    Ok(lexer.tokens)
}

/// Compile a JSONPath into its token list. The first token is always the
/// empty root token.
pub fn tokenize(path: &str, sql_standard_mode: bool) -> Result<Vec<PathToken>, JSONPathError> {
    check(path, sql_standard_mode, true)
}

/// Validate a JSONPath without materializing tokens. Succeeds exactly when
/// [`tokenize`] would.
pub fn is_valid_json_path(path: &str, sql_standard_mode: bool) -> Result<(), JSONPathError> {
    check(path, sql_standard_mode, false).map(|_| ())
}

fn is_name_char(ch: char) -> bool {
    let code_point = ch as u32;
    (0x30..=0x39).contains(&code_point)
        || (0x41..=0x5A).contains(&code_point)
        || code_point == 0x5F
        || (0x61..=0x7A).contains(&code_point)
        || code_point >= 0x80
}

fn is_lax_name_char(ch: char) -> bool {
    !matches!(
        ch,
        '.' | '[' | ']' | '"' | '\'' | '\\' | ' ' | '\t' | '\n' | '\r' | EOQ
    )
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_whitespace_char(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\r' | '\t')
}
