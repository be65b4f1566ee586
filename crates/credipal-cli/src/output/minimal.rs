use serde_json::Value;

use super::format_scalar;

/// Headline figure per command, as JSON pointers into the result.
const HEADLINE_POINTERS: [&str; 7] = [
    "/required_payment",
    "/optimistic/months_saved",
    "/total_interest_saved",
    "/first_payable_extra",
    "/months",
    "/status",
    "/total_interest",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", headline(result));
}

fn headline(result: &Value) -> String {
    for pointer in HEADLINE_POINTERS {
        if let Some(val) = result.pointer(pointer) {
            if !val.is_null() {
                return format_scalar(val);
            }
        }
    }

    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }
    format_scalar(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_solve_headline_is_months() {
        let r = json!({"status": "finite", "months": 32, "total_interest": "1400"});
        assert_eq!(headline(&r), "32");
    }

    #[test]
    fn test_unpayable_headline() {
        assert_eq!(headline(&json!({"status": "unpayable"})), "unpayable");
    }

    #[test]
    fn test_scenario_headline() {
        let r = json!({"extra_payment": "100", "optimistic": {"months_saved": 12}});
        assert_eq!(headline(&r), "12");
    }
}
