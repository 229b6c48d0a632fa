// Session token storage.
//
// The transport's request hook reads from here on every outgoing request;
// only the refresh coordinator and the logout path write. Access is
// single-threaded-cooperative, but the Mutex guarantees a resubmitted
// request always observes the token the refresh just wrote.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use geolens_common::error::{GeoLensError, Result};
use geolens_common::TokenPair;

/// Durable home for the session token pair.
///
/// Lifecycle: `store` at login/register, `replace_access` on refresh,
/// `clear` on logout or when a refresh is rejected.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;

    /// Install a fresh token pair.
    fn store(&self, tokens: &TokenPair);

    /// Swap in a new access token, keeping the current refresh token.
    fn replace_access(&self, access: &str);

    /// Drop both tokens.
    fn clear(&self);
}

/// In-memory session, gone when the process exits. Used by tests and by
/// one-shot invocations that never log in.
#[derive(Default)]
pub struct MemorySession {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }
}

impl SessionStore for MemorySession {
    fn access_token(&self) -> Option<String> {
        self.tokens.lock().unwrap().as_ref().map(|t| t.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.lock().unwrap().as_ref().map(|t| t.refresh_token.clone())
    }

    fn store(&self, tokens: &TokenPair) {
        *self.tokens.lock().unwrap() = Some(tokens.clone());
    }

    fn replace_access(&self, access: &str) {
        if let Some(pair) = self.tokens.lock().unwrap().as_mut() {
            pair.access_token = access.to_string();
        }
    }

    fn clear(&self) {
        *self.tokens.lock().unwrap() = None;
    }
}

/// File-backed session: a JSON token pair at a configured path, cached in
/// memory. Reads come from the cache; every write goes through to disk so
/// the session survives across invocations.
pub struct FileSession {
    path: PathBuf,
    cache: Mutex<Option<TokenPair>>,
}

impl FileSession {
    /// Load the session file if it exists. A missing file is an empty
    /// session; an unreadable or corrupt one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| GeoLensError::Storage(format!("{}: {e}", path.display())))?;
            let tokens: TokenPair = serde_json::from_str(&raw)
                .map_err(|e| GeoLensError::Storage(format!("{}: {e}", path.display())))?;
            Some(tokens)
        } else {
            None
        };
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    fn persist(&self, tokens: Option<&TokenPair>) {
        let result = match tokens {
            Some(tokens) => {
                if let Some(parent) = self.path.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                serde_json::to_string_pretty(tokens)
                    .map_err(|e| e.to_string())
                    .and_then(|json| fs::write(&self.path, json).map_err(|e| e.to_string()))
            }
            None if self.path.exists() => fs::remove_file(&self.path).map_err(|e| e.to_string()),
            None => Ok(()),
        };
        if let Err(error) = result {
            warn!(path = %self.path.display(), error, "Failed to persist session file");
        }
    }
}

impl SessionStore for FileSession {
    fn access_token(&self) -> Option<String> {
        self.cache.lock().unwrap().as_ref().map(|t| t.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.cache.lock().unwrap().as_ref().map(|t| t.refresh_token.clone())
    }

    fn store(&self, tokens: &TokenPair) {
        let mut cache = self.cache.lock().unwrap();
        *cache = Some(tokens.clone());
        self.persist(cache.as_ref());
    }

    fn replace_access(&self, access: &str) {
        let mut cache = self.cache.lock().unwrap();
        if let Some(pair) = cache.as_mut() {
            pair.access_token = access.to_string();
        }
        self.persist(cache.as_ref());
    }

    fn clear(&self) {
        let mut cache = self.cache.lock().unwrap();
        *cache = None;
        self.persist(None);
    }
}
