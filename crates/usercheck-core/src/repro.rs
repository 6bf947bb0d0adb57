//! HTTP file generator - converts failed outcomes to .http format

use crate::report::Outcome;

/// Generate .http file content replaying the given outcomes against one
/// endpoint. Callers pass a report's `faulty_cases`.
#[must_use]
pub fn to_http_file(outcomes: &[Outcome], method: &str, url: &str, token: Option<&str>) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "# Auto-generated reproduction cases ({} failed)",
        outcomes.len()
    ));
    lines.push(format!("# Endpoint: {method} {url}"));
    lines.push(String::new());

    for (idx, outcome) in outcomes.iter().enumerate() {
        lines.push(format!(
            "### [{idx}] {} - expected {} got {}",
            outcome.test_case,
            outcome.expected.status,
            outcome
                .actual
                .status
                .map_or_else(|| "no response".to_string(), |s| s.to_string()),
        ));
        if let Some(err) = &outcome.error {
            lines.push(format!("# Transport error: {err}"));
        }

        lines.push(format!("{method} {url}"));
        if let Some(t) = token {
            lines.push(format!("Authorization: Bearer {t}"));
        }
        lines.push("Content-Type: application/json".to_string());
        lines.push(String::new());
        lines.push(outcome.data.to_string());

        lines.push(String::new());
        lines.push("###".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::Case;
    use crate::report::{MatchStrategy, RawResult, evaluate};
    use serde_json::json;

    fn failed_outcome() -> Outcome {
        let mut payload = serde_json::Map::new();
        payload.insert("password".into(), json!("P@ssw0rd"));
        let raw = RawResult {
            case: Case {
                description: "missing email".to_string(),
                payload,
                expected_status: 422,
                expected_message: "email is required".to_string(),
            },
            status: Some(500),
            body: Some(json!({"message": "boom"})),
            error: None,
        };
        evaluate(&raw, MatchStrategy::Substring)
    }

    #[test]
    fn generates_file_header() {
        let output = to_http_file(&[failed_outcome()], "POST", "http://localhost:8080/users/login", None);
        assert!(output.contains("# Auto-generated reproduction cases (1 failed)"));
        assert!(output.contains("# Endpoint: POST http://localhost:8080/users/login"));
    }

    #[test]
    fn generates_request_line_and_body() {
        let output = to_http_file(&[failed_outcome()], "POST", "http://localhost:8080/users/login", None);
        assert!(output.contains("POST http://localhost:8080/users/login"));
        assert!(output.contains(r#"{"password":"P@ssw0rd"}"#));
        assert!(output.contains("Content-Type: application/json"));
    }

    #[test]
    fn includes_expected_and_actual_status() {
        let output = to_http_file(&[failed_outcome()], "POST", "http://x/users/login", None);
        assert!(output.contains("expected 422 got 500"));
    }

    #[test]
    fn includes_bearer_token_when_given() {
        let output = to_http_file(&[failed_outcome()], "POST", "http://x/admin/users", Some("tok123"));
        assert!(output.contains("Authorization: Bearer tok123"));
    }

    #[test]
    fn transport_error_noted() {
        let raw = RawResult {
            case: Case {
                description: "missing email".to_string(),
                payload: serde_json::Map::new(),
                expected_status: 422,
                expected_message: "email is required".to_string(),
            },
            status: None,
            body: None,
            error: Some("connection refused".to_string()),
        };
        let outcome = evaluate(&raw, MatchStrategy::Substring);
        let output = to_http_file(&[outcome], "POST", "http://x/users/login", None);
        assert!(output.contains("expected 422 got no response"));
        assert!(output.contains("# Transport error: connection refused"));
    }
}
