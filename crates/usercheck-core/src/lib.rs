//! usercheck-core: Case generation and report aggregation for black-box
//! validation testing of a user-management HTTP API
//!
//! This crate provides the pure logic of the harness: deterministic
//! negative-case generators, the error-message normalizer used for loose
//! message comparison, and the outcome/report aggregation types.

pub mod cases;
pub mod config;
pub mod corpus;
pub mod normalize;
pub mod report;
pub mod repro;

pub use cases::{
    Case, Payload, invalid_value_cases, missing_field_cases, null_value_cases,
    only_space_value_cases,
};
pub use config::{Config, ConfigError, Credentials};
pub use corpus::CorpusEntry;
pub use normalize::normalize_message;
pub use report::{BatchError, MatchStrategy, Outcome, RawResult, Report, generate_schema};
pub use repro::to_http_file;
