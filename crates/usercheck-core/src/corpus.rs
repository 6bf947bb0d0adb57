//! Built-in payload corpus for data-driven suites
//!
//! Fixed payload sets covering the input classes a user-management service
//! must reject: malformed credentials and wrong-typed fields. Suites pair
//! these with expected statuses.

use serde_json::{Value, json};

/// A named payload from the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry {
    pub description: String,
    pub data: Value,
}

fn entry(description: &str, data: Value) -> CorpusEntry {
    CorpusEntry {
        description: description.to_string(),
        data,
    }
}

/// Well-formed users accepted by the service. The first entry is the
/// fixture used for login and duplicate-create checks.
#[must_use]
pub fn valid_users() -> Vec<CorpusEntry> {
    vec![
        entry(
            "primary valid admin user",
            json!({"name": "Prashant", "email": "prashant@yopmail.com", "password": "Prashant", "role": "admin"}),
        ),
        entry(
            "primary valid content-team user",
            json!({"name": "Content User", "email": "content@yopmail.com", "password": "Content123", "role": "content-team"}),
        ),
    ]
}

/// Login payloads the service must reject with a validation error.
#[must_use]
pub fn invalid_logins() -> Vec<CorpusEntry> {
    vec![
        entry(
            "invalid email format",
            json!({"email": "wronguser", "password": "Password@123"}),
        ),
        entry(
            "wrong password",
            json!({"email": "prashant@yopmail.com", "password": "wrong"}),
        ),
        entry("empty email", json!({"email": "", "password": "Password@123"})),
        entry("empty password", json!({"email": "piu@yopmail.com", "password": ""})),
        entry(
            "spaces only in email",
            json!({"email": "   ", "password": "Password@123"}),
        ),
        entry(
            "spaces only in password",
            json!({"email": "piu@yopmail.com", "password": "        "}),
        ),
    ]
}

/// Payloads with wrong JSON types where strings are expected.
#[must_use]
pub fn type_mismatch_users() -> Vec<CorpusEntry> {
    vec![
        entry(
            "all null",
            json!({"name": null, "email": null, "password": null, "role": "content-team"}),
        ),
        entry(
            "numeric types",
            json!({"name": 12345, "email": 12345, "password": 67890, "role": "content-team"}),
        ),
        entry(
            "boolean types",
            json!({"name": true, "email": true, "password": false, "role": "admin"}),
        ),
        entry(
            "object and array types",
            json!({"name": {"first": "A"}, "email": {"e": "a@b.com"}, "password": ["arr"], "role": "content-team"}),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_user_is_first_valid_entry() {
        let users = valid_users();
        assert_eq!(users[0].data["email"], "prashant@yopmail.com");
        assert_eq!(users[0].data["role"], "admin");
    }

    #[test]
    fn invalid_logins_all_carry_credentials() {
        for e in invalid_logins() {
            assert!(e.data.get("email").is_some(), "{} lacks email", e.description);
            assert!(e.data.get("password").is_some(), "{} lacks password", e.description);
        }
    }

    #[test]
    fn type_mismatch_fields_are_not_all_strings() {
        for e in type_mismatch_users() {
            let obj = e.data.as_object().unwrap();
            assert!(
                obj.values().any(|v| !v.is_string()),
                "{} has only string fields",
                e.description
            );
        }
    }
}
