//! Output → text formatting.
//!
//! Two modes:
//! - **Plain** (default): bare values, one key per line, nothing for unit
//! - **JSON** (`--json`): every result as a JSON value

use dbd_executor::{Error, Output};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain,
    Json,
}

/// Format a successful output. Empty means print nothing.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Plain => format_plain(output),
        OutputMode::Json => format_json(output),
    }
}

/// Format an error as `DB <method> error: ...`
pub fn format_error(method: &str, err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Plain => format!("DB {} error: {}", method, err),
        OutputMode::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
    }
}

fn format_plain(output: &Output) -> String {
    match output {
        Output::Unit => String::new(),
        Output::Value(v) | Output::Json(v) => v.clone(),
        Output::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Output::Keys(keys) => keys.join("\n"),
        Output::Bool(b) => b.to_string(),
        Output::Pong { version } => format!("PONG {}", version),
    }
}

fn format_json(output: &Output) -> String {
    use serde_json::Value;

    let value = match output {
        Output::Unit => return String::new(),
        Output::Value(v) => Value::String(v.clone()),
        Output::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
        Output::Json(raw) => match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => Value::String(raw.clone()),
        },
        Output::Keys(keys) => Value::from(keys.clone()),
        Output::Bool(b) => Value::Bool(*b),
        Output::Pong { version } => serde_json::json!({ "version": version }),
    };
    serde_json::to_string_pretty(&value).unwrap_or_default()
}
