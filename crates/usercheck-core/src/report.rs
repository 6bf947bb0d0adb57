//! Outcome evaluation and aggregate report building
//!
//! Raw per-case execution results are evaluated against their case's
//! expectations and folded into a `Report` whose serialized form is the
//! persisted JSON document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cases::Case;
use crate::normalize::normalize_message;

/// How the normalized actual message is compared against the expected
/// fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Actual must contain the expected fragment; tolerates wording drift
    /// around the fragment.
    #[default]
    Substring,
    /// Actual must equal the expected fragment.
    Exact,
}

impl MatchStrategy {
    #[must_use]
    pub fn matches(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Substring => actual.contains(expected),
            Self::Exact => actual == expected,
        }
    }
}

/// Raw result of executing one case, before evaluation.
///
/// `error` carries transport-level failure text (connection refused,
/// timeout); it is mutually exclusive with `status`/`body`.
#[derive(Debug, Clone)]
pub struct RawResult {
    pub case: Case,
    pub status: Option<u16>,
    pub body: Option<Value>,
    pub error: Option<String>,
}

/// Expected status and message fragment, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Expectation {
    pub status: u16,
    pub message: String,
}

/// Observed status and normalized message, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Observation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The recorded result of executing one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Case description, e.g. "missing email".
    pub test_case: String,
    pub expected: Expectation,
    pub actual: Observation,
    pub passed: bool,
    /// Transport error text, when the request itself failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Payload the case was executed with.
    pub data: Value,
}

/// Evaluate one raw result. A case passes when the actual status equals the
/// expected status and the normalized message is non-empty and matches the
/// expected fragment. A transport error always fails; its text is fed
/// through the normalizer as the actual message.
#[must_use]
pub fn evaluate(raw: &RawResult, strategy: MatchStrategy) -> Outcome {
    let normalized = match &raw.error {
        Some(err) => normalize_message(Some(&Value::String(err.clone()))),
        None => normalize_message(raw.body.as_ref()),
    };

    let status_ok = raw.status == Some(raw.case.expected_status);
    let message_ok = normalized
        .as_deref()
        .is_some_and(|m| !m.is_empty() && strategy.matches(m, &raw.case.expected_message));
    let passed = raw.error.is_none() && status_ok && message_ok;

    Outcome {
        test_case: raw.case.description.clone(),
        expected: Expectation {
            status: raw.case.expected_status,
            message: raw.case.expected_message.clone(),
        },
        actual: Observation {
            status: raw.status,
            message: normalized,
        },
        passed,
        error: raw.error.clone(),
        data: Value::Object(raw.case.payload.clone()),
    }
}

/// Aggregate report for one batch. Derived entirely from the outcome
/// sequence: `failures` counts failed outcomes and `faulty_cases` is the
/// order-preserving failed subset of `cases`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    /// ISO-8601 UTC build time, supplied by the caller.
    pub timestamp: String,
    pub total_cases: usize,
    pub failures: usize,
    pub cases: Vec<Outcome>,
    pub faulty_cases: Vec<Outcome>,
}

impl Report {
    #[must_use]
    pub fn build(
        title: impl Into<String>,
        timestamp: impl Into<String>,
        results: &[RawResult],
        strategy: MatchStrategy,
    ) -> Self {
        let cases: Vec<Outcome> = results.iter().map(|r| evaluate(r, strategy)).collect();
        let faulty_cases: Vec<Outcome> = cases.iter().filter(|o| !o.passed).cloned().collect();

        Self {
            title: title.into(),
            timestamp: timestamp.into(),
            total_cases: cases.len(),
            failures: faulty_cases.len(),
            cases,
            faulty_cases,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures == 0
    }

    /// Signal batch failure after the report has been persisted.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` carrying the failure count and the persisted
    /// report location when any case failed.
    pub fn ensure_passed(&self, report_path: &str) -> Result<(), BatchError> {
        if self.failures > 0 {
            return Err(BatchError {
                title: self.title.clone(),
                failures: self.failures,
                total: self.total_cases,
                report_path: report_path.to_string(),
            });
        }
        Ok(())
    }
}

/// Raised when a batch contains any failed case. The report is always
/// written before this is surfaced.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{title}: {failures} of {total} cases failed (report: {report_path})")]
pub struct BatchError {
    pub title: String,
    pub failures: usize,
    pub total: usize,
    pub report_path: String,
}

/// Generate JSON Schema for the persisted report format.
#[must_use]
pub fn generate_schema() -> String {
    let schema = schemars::schema_for!(Report);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
