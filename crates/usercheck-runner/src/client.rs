//! Blocking HTTP client bound to the user-management API
//!
//! Every call takes the bearer token as an explicit argument; there is no
//! ambient authentication state shared between requests.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

/// Captured response: status plus body. A body that fails to parse as JSON
/// is kept as a plain string value rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `message` property of a JSON error body, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message")?.as_str()
    }

    /// `token` property of a login response, if present.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.body.get("token")?.as_str()
    }
}

fn parse_body(status: u16, text: String) -> ApiResponse {
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(v) => v,
        Err(_) => Value::String(text),
    };
    ApiResponse { status, body }
}

/// Client for the user-management service.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    headers: HashMap<String, String>,
}

impl ApiClient {
    /// Build a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client fails to build.
    pub fn new(
        base_url: &str,
        headers: HashMap<String, String>,
        timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn send(
        &self,
        req: reqwest::blocking::RequestBuilder,
        token: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let mut req = req;
        for (k, v) in &self.headers {
            req = req.header(k.as_str(), v.as_str());
        }
        if let Some(t) = token {
            req = req.bearer_auth(t);
        }

        let resp = req.send().map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(parse_body(status, text))
    }

    /// `POST /users/login`
    ///
    /// # Errors
    ///
    /// Returns error on transport failure; HTTP error statuses are captured
    /// in the response.
    pub fn login(&self, payload: &Value, token: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.send(self.http.post(self.url("/users/login")).json(payload), token)
    }

    /// `POST /admin/users`
    ///
    /// # Errors
    ///
    /// Returns error on transport failure.
    pub fn create_user(
        &self,
        payload: &Value,
        token: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.send(self.http.post(self.url("/admin/users")).json(payload), token)
    }

    /// `GET /admin/users` (optionally with a query string)
    ///
    /// # Errors
    ///
    /// Returns error on transport failure.
    pub fn get_all_users(
        &self,
        query: Option<&str>,
        token: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let path = match query {
            Some(q) => format!("/admin/users?{q}"),
            None => "/admin/users".to_string(),
        };
        self.send(self.http.get(self.url(&path)), token)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),
    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, HashMap::new(), 10).unwrap()
    }

    #[test]
    fn url_joins_with_single_slash() {
        let c = client("http://localhost:8080");
        assert_eq!(c.url("/users/login"), "http://localhost:8080/users/login");
        assert_eq!(c.url("users/login"), "http://localhost:8080/users/login");
    }

    #[test]
    fn trailing_base_slash_normalized() {
        let c = client("http://localhost:8080/");
        assert_eq!(c.url("/admin/users"), "http://localhost:8080/admin/users");
    }

    #[test]
    fn parse_body_json() {
        let resp = parse_body(422, r#"{"message":"email is required"}"#.to_string());
        assert_eq!(resp.status, 422);
        assert_eq!(resp.message(), Some("email is required"));
        assert!(!resp.is_ok());
    }

    #[test]
    fn parse_body_non_json_kept_as_text() {
        let resp = parse_body(500, "<html>Internal Server Error</html>".to_string());
        assert_eq!(resp.body, json!("<html>Internal Server Error</html>"));
        assert_eq!(resp.message(), None);
    }

    #[test]
    fn parse_body_empty() {
        let resp = parse_body(204, String::new());
        assert_eq!(resp.body, json!(""));
        assert!(resp.is_ok());
    }

    #[test]
    fn token_extracted_from_login_body() {
        let resp = parse_body(200, r#"{"token":"abc123"}"#.to_string());
        assert_eq!(resp.token(), Some("abc123"));
        assert!(resp.is_ok());
    }
}
