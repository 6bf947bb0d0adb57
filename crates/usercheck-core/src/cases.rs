//! Negative-case generation: missing-field, null-value, whitespace-value
//!
//! All generators are pure: given the same defaults and field list they
//! emit structurally equal case sequences, in input field order.

use serde::Serialize;
use serde_json::Value;

/// Request body under test, keyed by field name.
pub type Payload = serde_json::Map<String, Value>;

/// Optional override for expected-message wording, called with the list of
/// affected field names.
pub type MessageTemplate<'a> = &'a dyn Fn(&[&str]) -> String;

/// One generated negative-input payload plus its expected outcome.
/// Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    pub description: String,
    pub payload: Payload,
    pub expected_status: u16,
    pub expected_message: String,
}

/// One case per required field with that field absent, plus (when there are
/// at least two required fields) exactly one case omitting the first two.
///
/// Default messages are `"<field> is required"` and
/// `"<a> and <b> are required"`.
#[must_use]
pub fn missing_field_cases(
    defaults: &Payload,
    required_fields: &[&str],
    expected_status: u16,
    template: Option<MessageTemplate<'_>>,
) -> Vec<Case> {
    let mut cases = Vec::new();

    for &field in required_fields {
        let mut payload = defaults.clone();
        payload.remove(field);
        let message = match template {
            Some(t) => t(&[field]),
            None => format!("{field} is required"),
        };
        cases.push(Case {
            description: format!("missing {field}"),
            payload,
            expected_status,
            expected_message: message,
        });
    }

    // Multi-omission case covering the first two required fields.
    if let [a, b, ..] = required_fields {
        let mut payload = defaults.clone();
        payload.remove(*a);
        payload.remove(*b);
        let message = match template {
            Some(t) => t(&[*a, *b]),
            None => format!("{a} and {b} are required"),
        };
        cases.push(Case {
            description: format!("missing {a} and {b}"),
            payload,
            expected_status,
            expected_message: message,
        });
    }

    cases
}

/// One case per field with that field set to JSON null.
#[must_use]
pub fn null_value_cases(
    defaults: &Payload,
    fields: &[&str],
    expected_status: u16,
    template: Option<MessageTemplate<'_>>,
) -> Vec<Case> {
    fields
        .iter()
        .map(|&field| {
            let mut payload = defaults.clone();
            payload.insert(field.to_string(), Value::Null);
            let message = match template {
                Some(t) => t(&[field]),
                None => format!("{field} must not be null"),
            };
            Case {
                description: format!("null {field}"),
                payload,
                expected_status,
                expected_message: message,
            }
        })
        .collect()
}

/// One case per field with that field set to a whitespace-only string.
#[must_use]
pub fn only_space_value_cases(
    defaults: &Payload,
    fields: &[&str],
    expected_status: u16,
    template: Option<MessageTemplate<'_>>,
) -> Vec<Case> {
    fields
        .iter()
        .map(|&field| {
            let mut payload = defaults.clone();
            payload.insert(field.to_string(), Value::String("   ".to_string()));
            let message = match template {
                Some(t) => t(&[field]),
                None => format!("{field} must not be only whitespace"),
            };
            Case {
                description: format!("only space {field}"),
                payload,
                expected_status,
                expected_message: message,
            }
        })
        .collect()
}

/// One case per invalid value, given `(field, invalid values)` pairs.
///
/// The default message is `"invalid <field>"`; callers targeting a service
/// with specific wording pass a template.
#[must_use]
pub fn invalid_value_cases(
    defaults: &Payload,
    invalid_map: &[(&str, Vec<Value>)],
    expected_status: u16,
    template: Option<MessageTemplate<'_>>,
) -> Vec<Case> {
    let mut cases = Vec::new();

    for (field, values) in invalid_map {
        for value in values {
            let mut payload = defaults.clone();
            payload.insert((*field).to_string(), value.clone());
            let message = match template {
                Some(t) => t(&[*field]),
                None => format!("invalid {field}"),
            };
            cases.push(Case {
                description: format!("invalid {field}: {}", value_label(value)),
                payload,
                expected_status,
                expected_message: message,
            });
        }
    }

    cases
}

/// Human-readable value for case descriptions. Strings render without quotes.
fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
