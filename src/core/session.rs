//! File-backed session storage
//!
//! Two keys live under the store root: the pending partner-school referral
//! (`school_registration.json`) and the access token issued after a
//! successful signup (`access_token`). The root is injectable so commands
//! and tests can run against a scratch directory.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::core::referral::SchoolReferral;

const REFERRAL_FILE: &str = "school_registration.json";
const TOKEN_FILE: &str = "access_token";

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("could not access session storage: {0}")]
    #[diagnostic(code(tbsignup::session::io))]
    Io(#[from] std::io::Error),

    #[error("the stored referral is not valid JSON")]
    #[diagnostic(
        code(tbsignup::session::corrupt),
        help("run `tbsignup referral clear` to discard it")
    )]
    CorruptReferral(#[source] serde_json::Error),

    #[error("no data directory available on this system")]
    #[diagnostic(
        code(tbsignup::session::no_data_dir),
        help("pass --data-dir or set TBS_DATA_DIR")
    )]
    NoDataDir,
}

/// Persisted per-user signup state
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    /// Open a store rooted at an explicit directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the store root: explicit override, then TBS_DATA_DIR, then
    /// the platform data directory
    pub fn discover(override_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }
        if let Ok(dir) = std::env::var("TBS_DATA_DIR") {
            if !dir.is_empty() {
                return Ok(Self::new(dir));
            }
        }
        directories::ProjectDirs::from("", "", "tbsignup")
            .map(|dirs| Self::new(dirs.data_dir()))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn referral_path(&self) -> PathBuf {
        self.root.join(REFERRAL_FILE)
    }

    fn token_path(&self) -> PathBuf {
        self.root.join(TOKEN_FILE)
    }

    /// Read the pending referral, if any
    pub fn load_referral(&self) -> Result<Option<SchoolReferral>, StoreError> {
        let path = self.referral_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        let referral =
            serde_json::from_str(&contents).map_err(StoreError::CorruptReferral)?;
        Ok(Some(referral))
    }

    /// Persist a referral, replacing any existing one
    pub fn save_referral(&self, referral: &SchoolReferral) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(referral)
            .map_err(StoreError::CorruptReferral)?;
        std::fs::write(self.referral_path(), json)?;
        Ok(())
    }

    /// Remove the pending referral. Removing a referral that is not there
    /// is not an error.
    pub fn clear_referral(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(self.referral_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Store the session token issued by a successful signup
    pub fn store_access_token(&self, token: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.token_path(), token)?;
        Ok(())
    }

    /// Read the stored session token, if any
    pub fn access_token(&self) -> Result<Option<String>, StoreError> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::referral::SchoolInfo;
    use tempfile::TempDir;

    fn store() -> (TempDir, SessionStore) {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn test_load_referral_empty_store() {
        let (_tmp, store) = store();
        assert!(store.load_referral().unwrap().is_none());
    }

    #[test]
    fn test_referral_round_trip() {
        let (_tmp, store) = store();
        let referral = SchoolReferral::new(
            "TOKEN42",
            SchoolInfo {
                name: "42 Lyon".to_string(),
                description: Some("Partner campus".to_string()),
            },
        );
        store.save_referral(&referral).unwrap();
        let loaded = store.load_referral().unwrap().unwrap();
        assert_eq!(loaded, referral);
    }

    #[test]
    fn test_clear_referral_is_idempotent() {
        let (_tmp, store) = store();
        store.clear_referral().unwrap();

        let referral = SchoolReferral::new(
            "TOKEN42",
            SchoolInfo {
                name: "42 Lyon".to_string(),
                description: None,
            },
        );
        store.save_referral(&referral).unwrap();
        store.clear_referral().unwrap();
        assert!(store.load_referral().unwrap().is_none());
        store.clear_referral().unwrap();
    }

    #[test]
    fn test_corrupt_referral_reported() {
        let (_tmp, store) = store();
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(store.root().join("school_registration.json"), "not json").unwrap();
        assert!(matches!(
            store.load_referral(),
            Err(StoreError::CorruptReferral(_))
        ));
    }

    #[test]
    fn test_access_token_round_trip() {
        let (_tmp, store) = store();
        assert!(store.access_token().unwrap().is_none());
        store.store_access_token("jwt-abc123").unwrap();
        assert_eq!(store.access_token().unwrap().as_deref(), Some("jwt-abc123"));
    }
}
