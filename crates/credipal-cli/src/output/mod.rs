pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Fields that hold one row per month, debt or sweep point.
const ROW_FIELDS: [&str; 3] = ["periods", "schedule", "points"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

/// The row collection inside a result object, if it has one.
pub(crate) fn row_collection(result: &Value) -> Option<(&'static str, &Vec<Value>)> {
    ROW_FIELDS
        .iter()
        .find_map(|key| match result.get(*key) {
            Some(Value::Array(rows)) => Some((*key, rows)),
            _ => None,
        })
}

/// Nested objects are flattened into dotted column names.
pub(crate) fn flatten_row(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_row(&key, v, out);
            }
        }
        _ => out.push((prefix.to_string(), format_scalar(value))),
    }
}

pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_collection() {
        let result = json!({"schedule": [{"a": 1}], "total_interest_saved": "10"});
        let (key, rows) = row_collection(&result).unwrap();
        assert_eq!(key, "schedule");
        assert_eq!(rows.len(), 1);
        assert!(row_collection(&json!({"months": 3})).is_none());
    }

    #[test]
    fn test_flatten_nested() {
        let mut out = Vec::new();
        flatten_row(
            "",
            &json!({"extra_payment": "50", "projection": {"status": "unpayable"}, "months_saved": null}),
            &mut out,
        );
        assert!(out.contains(&("projection.status".to_string(), "unpayable".to_string())));
        assert!(out.contains(&("months_saved".to_string(), String::new())));
    }
}
