use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JSONPathErrorType {
    /// The path failed to compile: bad root, bad token, or a token form the
    /// active dialect does not accept.
    InvalidPath,
    /// The path uses a JSONPath operator this evaluator rejects up front.
    UnsupportedOperator,
    /// The scanned document nests deeper than the parsing limit.
    DeepNesting,
}

#[derive(Debug, Clone)]
pub struct JSONPathError {
    pub error: JSONPathErrorType,
    pub msg: String,
}

impl JSONPathError {
    pub fn new(error: JSONPathErrorType, msg: String) -> Self {
        Self { error, msg }
    }

    pub fn must_start_with_root() -> Self {
        Self {
            error: JSONPathErrorType::InvalidPath,
            msg: String::from("JSONPath must start with '$'"),
        }
    }

    /// `fragment` is the unconsumed remainder of the path, starting at the
    /// step that failed to lex.
    pub fn invalid_token(fragment: &str) -> Self {
        Self {
            error: JSONPathErrorType::InvalidPath,
            msg: format!("Invalid token in JSONPath at: {}", fragment),
        }
    }

    pub fn unsupported_operator(op: &str) -> Self {
        Self {
            error: JSONPathErrorType::UnsupportedOperator,
            msg: format!("Unsupported operator in JSONPath: {}", op),
        }
    }

    pub fn deep_nesting(limit: u32) -> Self {
        Self {
            error: JSONPathErrorType::DeepNesting,
            msg: format!(
                "JSON parsing failed due to deeply nested array/struct. \
                 Maximum nesting depth is {}",
                limit
            ),
        }
    }
}

impl std::error::Error for JSONPathError {}

impl fmt::Display for JSONPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}
