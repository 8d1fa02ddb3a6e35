use crate::{errors::JSONPathError, lexer::tokenize, token::PathToken};

/// A validated, compiled JSONPath.
///
/// The token list is immutable once built and may be shared freely; each
/// extraction walks it through its own [`PathCursor`].
#[derive(Debug, Clone)]
pub struct JsonPath {
    tokens: Vec<PathToken>,
}

impl JsonPath {
    pub fn parse(path: &str, sql_standard_mode: bool) -> Result<Self, JSONPathError> {
        Ok(Self {
            tokens: tokenize(path, sql_standard_mode)?,
        })
    }

    /// Compile in SQL-2016 mode, the dialect of `JSON_QUERY` and `JSON_VALUE`.
    pub fn standard(path: &str) -> Result<Self, JSONPathError> {
        Self::parse(path, true)
    }

    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor::new(&self.tokens)
    }
}

/// A bidirectional cursor over a compiled path.
///
/// Positions `-1` and `len` are both the end sentinel. Stepping off a
/// sentinel wraps to the opposite end of the list, so the same cursor can be
/// walked forward, backward, and forward again across successive
/// extractions.
#[derive(Debug, Clone)]
pub struct PathCursor<'a> {
    tokens: &'a [PathToken],
    pos: isize,
}

impl<'a> PathCursor<'a> {
    fn new(tokens: &'a [PathToken]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    pub fn advance(&mut self) {
        if self.pos == self.tokens.len() as isize {
            self.pos = 0;
        } else {
            self.pos += 1;
        }
    }

    pub fn retreat(&mut self) {
        if self.pos < 0 {
            self.pos = self.tokens.len() as isize - 1;
        } else {
            self.pos -= 1;
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos < 0 || self.pos >= self.tokens.len() as isize
    }

    /// The token under the cursor; `None` on either end sentinel.
    pub fn token(&self) -> Option<&'a PathToken> {
        if self.at_end() {
            None
        } else {
            Some(&self.tokens[self.pos as usize])
        }
    }

    /// Walk the cursor onto the trailing end sentinel.
    pub fn scan(&mut self) {
        self.pos = self.tokens.len() as isize;
    }
}
