//! Sequential batch execution of generated cases

use serde_json::Value;

use usercheck_core::cases::Case;
use usercheck_core::report::RawResult;

use crate::client::{ApiClient, ApiResponse, ClientError};

/// Endpoint a batch of cases is posted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Login,
    CreateUser,
}

impl Target {
    #[must_use]
    pub const fn method(self) -> &'static str {
        "POST"
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/users/login",
            Self::CreateUser => "/admin/users",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Execute cases strictly in order, one request awaited to completion before
/// the next is issued. Transport failures are recorded on the case, never
/// propagated; a batch always yields exactly one result per case. No retries.
#[must_use]
pub fn run_batch(
    client: &ApiClient,
    target: Target,
    cases: &[Case],
    token: Option<&str>,
) -> Vec<RawResult> {
    cases
        .iter()
        .map(|case| {
            let payload = Value::Object(case.payload.clone());
            let sent = match target {
                Target::Login => client.login(&payload, token),
                Target::CreateUser => client.create_user(&payload, token),
            };
            to_raw_result(case, sent)
        })
        .collect()
}

fn to_raw_result(case: &Case, sent: Result<ApiResponse, ClientError>) -> RawResult {
    match sent {
        Ok(resp) => RawResult {
            case: case.clone(),
            status: Some(resp.status),
            body: Some(resp.body),
            error: None,
        },
        Err(e) => RawResult {
            case: case.clone(),
            status: None,
            body: None,
            error: Some(e.to_string()),
        },
    }
}
