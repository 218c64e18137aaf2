//! Session persistence for the dashboard client.
//!
//! The browser build of this product kept three things in local storage: the
//! auth token, the signed-in user and the last pulse analysis the backend
//! returned. This crate is the file-backed equivalent, handed around as an
//! explicit `Arc<SessionStore>` instead of a global.
//!
//! ## Features
//!
//! - Load-or-default: a missing session file is an empty session, a corrupt
//!   one is logged and discarded, never an error at startup
//! - Every mutation persists immediately
//! - `in_memory()` for tests and one-shot tools
//!
//! ## Usage
//!
//! ```no_run
//! use session_store::SessionStore;
//!
//! let session = SessionStore::open("session.json")?;
//! if !session.is_authenticated() {
//!     // run the login flow, then session.login(token, user)?
//! }
//! # anyhow::Ok(())
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use models::defaults::default_profile;
use models::{FinancialProfile, PulseAnalysis, User};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    pulse_snapshot: Option<PulseAnalysis>,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

pub struct SessionStore {
    path: Option<PathBuf>,
    state: RwLock<SessionFile>,
}

impl SessionStore {
    /// Load the session at `path`, treating a missing or unreadable-as-JSON
    /// file as an empty session.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let state = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading session file {}", path.display()))?;
            match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "discarding corrupt session file");
                    SessionFile::default()
                }
            }
        } else {
            SessionFile::default()
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// A session that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(SessionFile::default()),
        }
    }

    pub fn login(&self, token: String, user: User) -> Result<()> {
        {
            let mut state = self.write_lock();
            state.token = Some(token);
            state.user = Some(user);
        }
        self.persist()
    }

    /// Drop the token, the user and the cached analysis.
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.write_lock();
            *state = SessionFile::default();
        }
        self.persist()
    }

    pub fn token(&self) -> Option<String> {
        self.read_lock().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read_lock().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_lock().token.is_some()
    }

    /// Replace the stored user, e.g. after a profile update.
    pub fn set_user(&self, user: User) -> Result<()> {
        self.write_lock().user = Some(user);
        self.persist()
    }

    pub fn cache_pulse(&self, pulse: &PulseAnalysis) -> Result<()> {
        self.write_lock().pulse_snapshot = Some(pulse.clone());
        self.persist()
    }

    pub fn cached_pulse(&self) -> Option<PulseAnalysis> {
        self.read_lock().pulse_snapshot.clone()
    }

    /// Planning profile for the signed-in user: the stand-in profile with
    /// income and age overridden where the stored user actually has them.
    pub fn financial_profile(&self) -> FinancialProfile {
        let mut profile = default_profile();
        if let Some(user) = self.user() {
            if let Some(income) = user.monthly_income {
                if income > 0.0 {
                    profile.monthly_income = income;
                }
            }
            if let Some(age) = user.age {
                if age > 0 {
                    profile.current_age = age;
                }
            }
        }
        profile
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = {
            let mut state = self.write_lock();
            state.saved_at = Some(Utc::now());
            serde_json::to_string_pretty(&*state).context("serializing session")?
        };
        std::fs::write(path, content)
            .with_context(|| format!("writing session file {}", path.display()))
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, SessionFile> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, SessionFile> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
