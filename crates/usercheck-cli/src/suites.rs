//! Suite assembly: generated cases per endpoint

use serde_json::{Value, json};

use usercheck_core::cases::{
    Case, Payload, invalid_value_cases, missing_field_cases, null_value_cases,
    only_space_value_cases,
};
use usercheck_core::{Config, corpus};

fn as_payload(data: &Value) -> Payload {
    data.as_object().cloned().unwrap_or_default()
}

/// Valid login body built from the configured credentials.
pub fn login_defaults(config: &Config) -> Payload {
    as_payload(&json!({
        "email": config.credentials.email,
        "password": config.credentials.password,
    }))
}

/// Negative cases for `POST /users/login`: missing, null and
/// whitespace-only required fields (422), plus the invalid-login corpus
/// (400). Corpus cases expect an empty fragment, so any non-empty error
/// message satisfies them.
pub fn login_cases(config: &Config) -> Vec<Case> {
    let defaults = login_defaults(config);
    let required = ["email", "password"];

    let mut cases = missing_field_cases(&defaults, &required, 422, None);
    cases.extend(null_value_cases(&defaults, &required, 422, None));
    cases.extend(only_space_value_cases(&defaults, &required, 422, None));

    for entry in corpus::invalid_logins() {
        cases.push(Case {
            description: format!("invalid login: {}", entry.description),
            payload: as_payload(&entry.data),
            expected_status: 400,
            expected_message: String::new(),
        });
    }

    cases
}

/// The fixture user for create/duplicate checks: first valid corpus entry.
pub fn create_user_defaults() -> Payload {
    as_payload(&corpus::valid_users()[0].data)
}

/// Negative cases for `POST /admin/users`: missing, null and
/// whitespace-only required fields, plus malformed email, unknown role
/// values and the wrong-typed-field corpus (all 422). Value-level cases use
/// an empty expected fragment; exact rejection wording is the service's
/// business.
pub fn create_user_cases() -> Vec<Case> {
    let defaults = create_user_defaults();
    let required = ["name", "email", "password", "role"];

    let mut cases = missing_field_cases(&defaults, &required, 422, None);
    cases.extend(null_value_cases(&defaults, &required, 422, None));
    cases.extend(only_space_value_cases(&defaults, &required, 422, None));

    let invalid = [
        ("email", vec![json!("not-an-email")]),
        ("role", vec![json!("superuser"), json!("")]),
    ];
    let any_message = |_: &[&str]| String::new();
    cases.extend(invalid_value_cases(&defaults, &invalid, 422, Some(&any_message)));

    for entry in corpus::type_mismatch_users() {
        cases.push(Case {
            description: format!("type mismatch: {}", entry.description),
            payload: as_payload(&entry.data),
            expected_status: 422,
            expected_message: String::new(),
        });
    }

    cases
}

/// Creating the fixture user a second time must be rejected as a conflict.
pub fn duplicate_create_case() -> Case {
    Case {
        description: "duplicate user create".to_string(),
        payload: create_user_defaults(),
        expected_status: 409,
        expected_message: "User already exists".to_string(),
    }
}
