use core::fmt;

/// One navigation step in a compiled JSONPath.
///
/// A token is interpreted uniformly at each descent: against an object it
/// names a member, against an array it is read as a position. The array
/// reading is resolved once, here, rather than re-parsed at every step:
/// `'-0'` addresses position 0 and any other negative or non-numeric text
/// never matches a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathToken {
    text: String,
    index: Option<u64>,
}

impl PathToken {
    pub fn new(text: String) -> Self {
        let index = match text.parse::<i64>() {
            Ok(n) if n >= 0 => Some(n as u64),
            _ => None,
        };
        Self { text, index }
    }

    /// The root token: the empty string, standing for the document itself.
    pub fn root() -> Self {
        Self {
            text: String::new(),
            index: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token read as an array position, if it has one.
    pub fn array_index(&self) -> Option<u64> {
        self.index
    }
}

impl PartialEq<&str> for PathToken {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.text)
    }
}
