pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use serde_json::Value;

use credipal_core::Assumptions;

/// Load a command's input from `--input`, then piped stdin, then flags.
///
/// Global `--assumptions` are merged into document inputs that do not
/// carry their own `assumptions` object.
pub fn load<T, F>(
    path: Option<&str>,
    assumptions: Option<&Assumptions>,
    from_flags: F,
) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<Value, Box<dyn std::error::Error>>,
{
    let mut value = if let Some(path) = path {
        file::read_document(path)?
    } else if let Some(data) = stdin::read_stdin()? {
        data
    } else {
        from_flags()?
    };

    if let (Some(a), Value::Object(map)) = (assumptions, &mut value) {
        if !map.contains_key("assumptions") {
            map.insert("assumptions".into(), serde_json::to_value(a)?);
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Load and validate the global `--assumptions` file.
pub fn load_assumptions(path: &str) -> Result<Assumptions, Box<dyn std::error::Error>> {
    let value = file::read_document(path)?;
    let assumptions: Assumptions = serde_json::from_value(value)?;
    assumptions.validate()?;
    Ok(assumptions)
}
