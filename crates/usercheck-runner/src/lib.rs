//! usercheck-runner: HTTP execution for the user-management API surface
//!
//! A blocking client bound to the service's endpoints, plus strictly
//! sequential batch execution of generated cases.

mod client;
mod exec;

pub use client::{ApiClient, ApiResponse, ClientError};
pub use exec::{Target, run_batch};
