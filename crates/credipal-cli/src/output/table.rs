use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_row, row_collection};

/// Format output as tables: scalar fields first, then any row collection.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => {
                print_result(result);
                print_envelope_notes(map);
            }
            None => print_fields(value, None),
        },
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    let rows = row_collection(result);
    print_fields(result, rows.map(|(key, _)| key));
    if let Some((key, rows)) = rows {
        println!("\n{key}:");
        print_rows(rows);
    }
}

/// Field/Value table of everything except the `skip` collection.
fn print_fields(value: &Value, skip: Option<&str>) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    let mut fields = Vec::new();
    for (key, val) in map {
        if Some(key.as_str()) != skip {
            flatten_row(key, val, &mut fields);
        }
    }
    if fields.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let flattened: Vec<Vec<(String, String)>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::new();
            flatten_row("", row, &mut cells);
            cells
        })
        .collect();

    let headers: Vec<String> = flattened[0].iter().map(|(k, _)| k.clone()).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for cells in &flattened {
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                cells
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
