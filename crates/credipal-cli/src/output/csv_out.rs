use serde_json::Value;
use std::io;

use super::{flatten_row, row_collection};

/// Write output as CSV to stdout.
///
/// Results with a row collection (schedule periods, plan entries, sweep
/// points) print one CSV row per item; everything else prints field,value.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let written = match row_collection(result) {
        Some((_, rows)) => write_rows(&mut wtr, rows),
        None => write_fields(&mut wtr, result),
    };
    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let mut fields = Vec::new();
    flatten_row("", value, &mut fields);
    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        wtr.write_record([key, val])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let flattened: Vec<Vec<(String, String)>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::new();
            flatten_row("", row, &mut cells);
            cells
        })
        .collect();
    let Some(first) = flattened.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.iter().map(|(k, _)| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for cells in &flattened {
        let row = headers.iter().map(|h| {
            cells
                .iter()
                .find(|(k, _)| k == h)
                .map(|(_, v)| v.as_str())
                .unwrap_or_default()
        });
        wtr.write_record(row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(rows: &[Value]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, rows).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_rows_share_header() {
        let out = render(&[
            json!({"creditor_label": "Visa", "months_to_payoff": 25}),
            json!({"creditor_label": "Car", "months_to_payoff": 35}),
        ]);
        assert_eq!(out, "creditor_label,months_to_payoff\nVisa,25\nCar,35\n");
    }

    #[test]
    fn test_missing_cells_are_blank() {
        let out = render(&[
            json!({"extra_payment": "0", "projection": {"status": "finite", "months": 32}}),
            json!({"extra_payment": "10", "projection": {"status": "unpayable"}}),
        ]);
        // serde_json maps iterate in key order
        assert_eq!(
            out,
            "extra_payment,projection.months,projection.status\n0,32,finite\n10,,unpayable\n"
        );
    }
}
