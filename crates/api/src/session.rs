use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not read session file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse session file `{path}`: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("could not write session file `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// Operator session. The bearer token is optional: a signed-out operator
/// still drives read paths, and the assignment endpoint is called with an
/// empty token rather than no header at all.
#[derive(Clone, Debug, Default)]
pub struct Session {
    token: Option<SecretString>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        let token: String = token.into();
        let token = token.trim().to_owned();
        Self { token: (!token.is_empty()).then(|| token.into()) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token value for the `Authorization: Bearer` header. Empty string when
    /// no session token is stored.
    pub fn bearer_token(&self) -> String {
        self.token.as_ref().map(|token| token.expose_secret().to_owned()).unwrap_or_default()
    }
}

/// File-backed session persistence.
pub struct SessionStore {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session. A missing file is an empty session, not
    /// an error.
    pub fn load(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|source| SessionError::Read { path: self.path.clone(), source })?;
        let file: SessionFile = toml::from_str(&raw)
            .map_err(|source| SessionError::Parse { path: self.path.clone(), source })?;

        Ok(file.token.map(Session::with_token).unwrap_or_default())
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let file = SessionFile {
            token: session.is_authenticated().then(|| session.bearer_token()),
        };
        let rendered = toml::to_string(&file).unwrap_or_default();
        fs::write(&self.path, rendered)
            .map_err(|source| SessionError::Write { path: self.path.clone(), source })
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|source| SessionError::Write { path: self.path.clone(), source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{Session, SessionStore};

    #[test]
    fn missing_file_loads_an_empty_session() {
        let dir = TempDir::new().expect("temp dir");
        let store = SessionStore::new(dir.path().join("session.toml"));

        let session = store.load().expect("load");
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer_token(), "");
    }

    #[test]
    fn token_round_trips_through_the_store() {
        let dir = TempDir::new().expect("temp dir");
        let store = SessionStore::new(dir.path().join("session.toml"));

        store.save(&Session::with_token("tok-123")).expect("save");
        let session = store.load().expect("load");

        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token(), "tok-123");
    }

    #[test]
    fn blank_tokens_count_as_signed_out() {
        let session = Session::with_token("   ");
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer_token(), "");
    }

    #[test]
    fn clear_removes_the_persisted_session() {
        let dir = TempDir::new().expect("temp dir");
        let store = SessionStore::new(dir.path().join("session.toml"));

        store.save(&Session::with_token("tok-123")).expect("save");
        store.clear().expect("clear");

        assert!(!store.load().expect("load").is_authenticated());
        // Clearing an already-missing file is fine.
        store.clear().expect("second clear");
    }

    #[test]
    fn debug_output_does_not_leak_the_token() {
        let session = Session::with_token("tok-secret-value");
        let debug = format!("{session:?}");
        assert!(!debug.contains("tok-secret-value"));
    }
}
