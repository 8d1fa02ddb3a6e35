//! A SQL-dialect JSONPath evaluator over raw JSON text, the core of the
//! scalar functions `JSON_EXTRACT`, `JSON_EXTRACT_SCALAR`,
//! `JSON_EXTRACT_ARRAY`, `JSON_QUERY` and `JSON_VALUE`.
//!
//! A path is compiled once into a token list; each extraction then makes a
//! single streaming pass over the document, stopping at the first value
//! whose location satisfies the path. No syntax tree is ever built for the
//! document.
//!
//! ## Extracting
//!
//! ```
//! use sql_jsonpath::{JSONPathError, JsonPathEvaluator};
//!
//! fn main() -> Result<(), JSONPathError> {
//!     let json = r#"{"a": {"b": [ { "c" : "foo" } ] } }"#;
//!
//!     let evaluator = JsonPathEvaluator::standard("$.a.b[0].c")?;
//!     assert_eq!(evaluator.extract(json)?, Some("\"foo\"".to_string()));
//!     assert_eq!(evaluator.extract_scalar(json)?, Some("foo".to_string()));
//!
//!     let evaluator = JsonPathEvaluator::new("$.a.b", /*sql_standard_mode=*/ false)?;
//!     assert_eq!(
//!         evaluator.extract_array(json)?,
//!         Some(vec!["{\"c\":\"foo\"}".to_string()])
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Dialects
//!
//! `sql_standard_mode` selects the SQL-2016 subset used by `JSON_QUERY` and
//! `JSON_VALUE`: dotted members, `."..."` quoted members and numeric bracket
//! indices. With the flag off (the `JSON_EXTRACT` family), `['...']` quoted
//! members and bare bracket members are accepted instead, and a trailing
//! dot is a no-op. Wildcards, recursive descent, filters and slices are
//! rejected in both dialects:
//!
//! ```
//! use sql_jsonpath::is_valid_json_path;
//!
//! assert!(is_valid_json_path("$.a['b c']", false).is_ok());
//! assert!(is_valid_json_path("$.a['b c']", true).is_err());
//! assert_eq!(
//!     is_valid_json_path("$..a", true).unwrap_err().msg,
//!     "Unsupported operator in JSONPath: ..",
//! );
//! ```
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod path;
pub mod scanner;
pub mod token;
pub mod unescape;

pub use errors::JSONPathError;
pub use errors::JSONPathErrorType;
pub use evaluator::JsonPathEvaluator;
pub use lexer::is_valid_json_path;
pub use path::JsonPath;
pub use path::PathCursor;
pub use scanner::JsonScanner;
pub use token::PathToken;
