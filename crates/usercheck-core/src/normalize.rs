//! Error-message normalization
//!
//! Services under test return error messages in several shapes: a structured
//! `{"message": ...}` object, a JSON-encoded string, quoted-field text like
//! `"name" is required`, or a message with a trailing stack trace. This
//! module reduces all of them to one comparable line.

use serde_json::Value;

/// Normalize a raw error value (response body or transport error text) into
/// a single comparable string.
///
/// Best-effort by contract: a string that looks like JSON is re-parsed for a
/// `message` property, and parse failures keep the prior string form. The
/// function is idempotent: normalizing an already-normalized string returns
/// it unchanged.
#[must_use]
pub fn normalize_message(raw: Option<&Value>) -> Option<String> {
    let value = match raw {
        None | Some(Value::Null) => return None,
        Some(v) => v,
    };

    // Structured object: prefer its `message` property, else the whole
    // object's JSON form.
    let mut text = match value {
        Value::Object(map) => match map.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    text = text.trim().to_string();

    // A body that arrived as text may still hide a JSON object. Only an
    // object carrying `message` replaces the working string; anything else
    // (including parse failure) keeps it as-is.
    if (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('"') && text.ends_with('"'))
    {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text) {
            if let Some(msg) = map.get("message") {
                text = match msg {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
            }
        }
    }

    // Un-escaping can expose another `\"` when backslashes are doubled;
    // repeat until none remain.
    while text.contains("\\\"") {
        text = text.replace("\\\"", "\"");
    }
    text = strip_token_quotes(&text);
    text = truncate_at_newline(&text);
    Some(text.trim().to_string())
}

/// Remove double quotes around any quoted span that does not contain a line
/// break, turning `"name" is required` into `name is required`. Unpaired quotes and
/// spans crossing a newline are left alone.
fn strip_token_quotes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('"') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('"') {
            Some(end) if !after[..end].contains('\n') => {
                out.push_str(&after[..end]);
                rest = &after[end + 1..];
            }
            _ => {
                out.push('"');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Cut at the first literal or escaped newline, discarding trailing
/// stack-trace content.
fn truncate_at_newline(input: &str) -> String {
    let literal = input.find('\n');
    let escaped = input.find("\\n");
    let cut = match (literal, escaped) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    match cut {
        Some(idx) => input[..idx].to_string(),
        None => input.to_string(),
    }
}
