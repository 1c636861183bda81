//! Persisted authentication session.
//!
//! The session holds the access credential, the refresh credential, and a
//! snapshot of the signed-in user's profile, stored together as
//! `session.json` so it survives across invocations. Transitions:
//! established on login/register, access credential swapped on refresh,
//! everything cleared on logout or irrecoverable refresh failure.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Session file name in the config directory
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub access: String,
    pub refresh: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
}

pub struct Session {
    dir: PathBuf,
    data: Option<SessionData>,
}

impl Session {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, data: None }
    }

    /// Load session from disk. Returns true if a session was found.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            let data: SessionData =
                serde_json::from_str(&contents).context("Failed to parse session file")?;
            self.data = Some(data);
            return Ok(true);
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents).context("Failed to write session file")?;
        }
        Ok(())
    }

    /// Clear all session state, in memory and on disk. Nothing survives:
    /// a failed refresh must not leave a partial session behind.
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    /// Establish a new session from a login/register response and persist it.
    pub fn establish(&mut self, access: String, refresh: String, user: User) -> Result<()> {
        self.data = Some(SessionData {
            access,
            refresh,
            user,
            created_at: Utc::now(),
        });
        self.save()
    }

    /// Swap in a freshly issued access credential, keeping everything else.
    /// The in-memory credential is replaced before persisting, so callers
    /// never observe a half-updated session.
    pub fn replace_access(&mut self, access: String) -> Result<()> {
        if let Some(ref mut data) = self.data {
            data.access = access;
        }
        self.save()
    }

    /// Update the stored user profile snapshot and persist it.
    pub fn update_user(&mut self, user: User) -> Result<()> {
        if let Some(ref mut data) = self.data {
            data.user = user;
        }
        self.save()
    }

    /// Mirror a fresh wallet balance into the profile snapshot.
    pub fn update_wallet_balance(&mut self, balance: f64) -> Result<()> {
        if let Some(ref mut data) = self.data {
            data.user.wallet_balance = balance;
        }
        self.save()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.access.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.refresh.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.data.as_ref().map(|d| &d.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_some()
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}
