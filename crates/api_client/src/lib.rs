//! HTTP client for the finance backend.
//!
//! Everything the dashboard renders that it cannot compute locally comes
//! through here: expenses, summaries, limits, the pulse analysis, goal
//! planning, loan scoring, the contract shield and festival planning. The
//! orchestrator consumes the [`FinanceBackend`] trait rather than the
//! concrete [`HttpBackend`], which is what lets tests drive it with a stub
//! instead of a server.
//!
//! The bearer token is read per request from an injected
//! [`session_store::SessionStore`]; there is no process-wide session global.

pub mod backend;
pub mod error;
pub mod http;
pub mod validate;

pub use backend::{AuthSession, FinanceBackend};
pub use error::{ApiError, Result};
pub use http::HttpBackend;

/// Where the backend lives and how long to wait on it.
///
/// Env vars:
/// - `PAISA_API_BASE_URL` (default: `http://localhost:8000/api`)
/// - `PAISA_API_TIMEOUT_SECS` (default: 30)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("PAISA_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());
        let timeout_secs = std::env::var("PAISA_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        Self {
            base_url,
            timeout_secs,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}
