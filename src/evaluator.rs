use crate::{errors::JSONPathError, path::JsonPath, scanner::JsonScanner};

/// A compiled, reusable JSONPath evaluator.
///
/// The path is validated once at construction; each extraction then makes a
/// single streaming pass over the document it is given. A null result
/// (the path does not resolve, the matched value is the `null` literal, or
/// the matched value has the wrong shape for the extraction) is `None`,
/// mirroring the SQL functions built on top of this type.
///
/// ```
/// use sql_jsonpath::JsonPathEvaluator;
///
/// # fn main() -> Result<(), sql_jsonpath::JSONPathError> {
/// let evaluator = JsonPathEvaluator::standard("$.a.b[0].c")?;
/// let json = r#"{"a": {"b": [ { "c" : "foo" } ] } }"#;
///
/// assert_eq!(evaluator.extract(json)?, Some("\"foo\"".to_string()));
/// assert_eq!(evaluator.extract_scalar(json)?, Some("foo".to_string()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPathEvaluator {
    path: JsonPath,
    escape_special_characters: bool,
}

impl JsonPathEvaluator {
    /// Compile `path` in the given dialect. `sql_standard_mode` selects the
    /// SQL-2016 subset used by `JSON_QUERY` and `JSON_VALUE`; the
    /// `JSON_EXTRACT` family runs with the flag off.
    pub fn new(path: &str, sql_standard_mode: bool) -> Result<Self, JSONPathError> {
        Ok(Self {
            path: JsonPath::parse(path, sql_standard_mode)?,
            escape_special_characters: false,
        })
    }

    pub fn standard(path: &str) -> Result<Self, JSONPathError> {
        Self::new(path, true)
    }

    /// Re-escape special characters in extracted string values on
    /// subsequent extractions.
    pub fn enable_special_character_escaping(&mut self) {
        self.escape_special_characters = true;
    }

    /// The matched value as normalized JSON text, `JSON_EXTRACT` /
    /// `JSON_QUERY` style.
    pub fn extract(&self, json: &str) -> Result<Option<String>, JSONPathError> {
        let (value, is_null) = self.scanner(json).extract()?;
        Ok(if is_null { None } else { Some(value) })
    }

    /// The matched scalar with string quoting stripped, `JSON_EXTRACT_SCALAR`
    /// / `JSON_VALUE` style.
    pub fn extract_scalar(&self, json: &str) -> Result<Option<String>, JSONPathError> {
        let (value, is_null) = self.scanner(json).extract_scalar()?;
        Ok(if is_null { None } else { Some(value) })
    }

    /// The elements of a matched array, `JSON_EXTRACT_ARRAY` style.
    pub fn extract_array(&self, json: &str) -> Result<Option<Vec<String>>, JSONPathError> {
        let (values, is_null) = self.scanner(json).extract_array()?;
        Ok(if is_null { None } else { Some(values) })
    }

    fn scanner<'a>(&'a self, json: &'a str) -> JsonScanner<'a> {
        let mut scanner = JsonScanner::new(json, &self.path);
        scanner.set_special_character_escaping(self.escape_special_characters);
        scanner
    }
}
