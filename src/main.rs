use std::env;

use sql_jsonpath::{JSONPathError, JsonPathEvaluator};

fn main() -> Result<(), JSONPathError> {
    let mut args = env::args().skip(1);
    let (Some(path), Some(json)) = (args.next(), args.next()) else {
        eprintln!("usage: sql_jsonpath <path> <json> [--standard]");
        return Ok(());
    };
    let sql_standard_mode = args.next().as_deref() == Some("--standard");

    let mut evaluator = JsonPathEvaluator::new(&path, sql_standard_mode)?;
    evaluator.enable_special_character_escaping();

    println!("extract:        {:?}", evaluator.extract(&json)?);
    println!("extract_scalar: {:?}", evaluator.extract_scalar(&json)?);
    println!("extract_array:  {:?}", evaluator.extract_array(&json)?);

    Ok(())
}
