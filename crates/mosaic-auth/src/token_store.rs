use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "mosaic-client";
const CREDENTIALS_FILE_NAME: &str = "credentials";

const ACCESS_ENV_VAR: &str = "MOSAIC_AUTH__ACCESS_TOKEN";
const REFRESH_ENV_VAR: &str = "MOSAIC_AUTH__REFRESH_TOKEN";

/// Which of the two tokens an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    const fn keyring_user(self) -> &'static str {
        match self {
            Self::Access => "access-token",
            Self::Refresh => "refresh-token",
        }
    }

    const fn env_var(self) -> &'static str {
        match self {
            Self::Access => ACCESS_ENV_VAR,
            Self::Refresh => REFRESH_ENV_VAR,
        }
    }
}

/// On-disk shape of the credentials file. Keys match the wire names the
/// backend uses for the pair.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Persistent store for the access/refresh token pair.
///
/// Read tiers, first hit wins: OS keychain → environment variables → the
/// credentials file. Writes go to the keychain, falling back silently to the
/// file when the keychain is unavailable. Tokens are opaque; nothing here
/// validates their shape.
///
/// A store constructed without any resolvable storage location (no home
/// directory, keychain disabled) is inert: getters return `None`,
/// `has_both` returns `false`, and setters succeed as no-ops.
#[derive(Debug, Clone)]
pub struct TokenStore {
    keyring_service: Option<String>,
    credentials_path: Option<PathBuf>,
    env_tier: bool,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_KEYRING_SERVICE, None)
    }
}

impl TokenStore {
    /// Store backed by the OS keychain under `keyring_service`, with the
    /// credentials file under `credentials_dir` (default `~/.mosaic`).
    ///
    /// `MOSAIC_KEYRING_SERVICE` overrides the service name, so tests and
    /// side installs can avoid touching real credentials.
    #[must_use]
    pub fn new(keyring_service: impl Into<String>, credentials_dir: Option<PathBuf>) -> Self {
        let service = std::env::var("MOSAIC_KEYRING_SERVICE")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| keyring_service.into());
        let dir = credentials_dir.or_else(|| dirs::home_dir().map(|h| h.join(".mosaic")));
        Self {
            keyring_service: Some(service),
            credentials_path: dir.map(|d| d.join(CREDENTIALS_FILE_NAME)),
            env_tier: true,
        }
    }

    /// File-backed store with the keychain and env tiers disabled.
    ///
    /// Hermetic — used by tests and by callers that must not touch the OS
    /// keychain.
    #[must_use]
    pub fn file_only(credentials_dir: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            credentials_path: Some(credentials_dir.into().join(CREDENTIALS_FILE_NAME)),
            env_tier: false,
        }
    }

    /// Current access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.get(TokenKind::Access)
    }

    /// Current refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.get(TokenKind::Refresh)
    }

    /// Persist a new access token, leaving the refresh token untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStore` if both keychain and file writes fail.
    pub fn set_access_token(&self, token: &str) -> Result<(), AuthError> {
        self.set(TokenKind::Access, token)
    }

    /// Persist a new refresh token, leaving the access token untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStore` if both keychain and file writes fail.
    pub fn set_refresh_token(&self, token: &str) -> Result<(), AuthError> {
        self.set(TokenKind::Refresh, token)
    }

    /// Persist both tokens. If the second write fails everything is cleared,
    /// so a partial pair is never left behind.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStore` from the failing write.
    pub fn set_pair(&self, access: &str, refresh: &str) -> Result<(), AuthError> {
        self.set_access_token(access)?;
        if let Err(error) = self.set_refresh_token(refresh) {
            self.clear_all();
            return Err(error);
        }
        Ok(())
    }

    /// Remove both tokens from the keychain and the credentials file.
    /// Never fails; individual tier errors are logged and ignored.
    pub fn clear_all(&self) {
        if let Some(service) = &self.keyring_service {
            for kind in [TokenKind::Access, TokenKind::Refresh] {
                if let Ok(entry) = keyring::Entry::new(service, kind.keyring_user()) {
                    let _ = entry.delete_credential();
                }
            }
        }
        if let Some(path) = &self.credentials_path {
            if path.exists() {
                if let Err(error) = fs::remove_file(path) {
                    tracing::warn!(%error, path = %path.display(), "failed to remove credentials file");
                }
            }
        }
    }

    /// True only when both tokens are present.
    #[must_use]
    pub fn has_both(&self) -> bool {
        self.access_token().is_some() && self.refresh_token().is_some()
    }

    fn get(&self, kind: TokenKind) -> Option<String> {
        // 1. Keychain
        if let Some(service) = &self.keyring_service
            && let Ok(entry) = keyring::Entry::new(service, kind.keyring_user())
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some(token);
        }

        // 2. Environment variable (CI override, read-only)
        if self.env_tier
            && let Ok(token) = std::env::var(kind.env_var())
            && !token.is_empty()
        {
            return Some(token);
        }

        // 3. Credentials file
        self.read_file(kind)
    }

    fn set(&self, kind: TokenKind, token: &str) -> Result<(), AuthError> {
        if let Some(service) = &self.keyring_service {
            match keyring::Entry::new(service, kind.keyring_user()) {
                Ok(entry) => match entry.set_password(token) {
                    Ok(()) => return Ok(()),
                    Err(error) => {
                        tracing::warn!(%error, "keyring store failed; falling back to file");
                    }
                },
                Err(error) => {
                    tracing::warn!(%error, "keyring unavailable; falling back to file");
                }
            }
        }
        self.write_file(kind, token)
    }

    fn read_file(&self, kind: TokenKind) -> Option<String> {
        let path = self.credentials_path.as_ref()?;
        let content = fs::read_to_string(path).ok()?;
        let stored: StoredTokens = serde_json::from_str(&content).ok()?;
        let token = match kind {
            TokenKind::Access => stored.access_token,
            TokenKind::Refresh => stored.refresh_token,
        };
        token.filter(|t| !t.is_empty())
    }

    fn write_file(&self, kind: TokenKind, token: &str) -> Result<(), AuthError> {
        let Some(path) = &self.credentials_path else {
            // No storage location at all (e.g. no home directory). Treated as
            // a no-op environment rather than an error.
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStore(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let mut stored = fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<StoredTokens>(&content).ok())
            .unwrap_or_default();
        match kind {
            TokenKind::Access => stored.access_token = Some(token.to_string()),
            TokenKind::Refresh => stored.refresh_token = Some(token.to_string()),
        }

        let body = serde_json::to_string_pretty(&stored)
            .map_err(|e| AuthError::TokenStore(format!("serialize credentials: {e}")))?;
        fs::write(path, body)
            .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_store_round_trips_both_tokens() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path());

        assert_eq!(store.access_token(), None);
        assert!(!store.has_both());

        store.set_access_token("access_abc").expect("set access");
        store.set_refresh_token("refresh_xyz").expect("set refresh");

        assert_eq!(store.access_token().as_deref(), Some("access_abc"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh_xyz"));
        assert!(store.has_both());
    }

    #[test]
    fn clear_all_removes_both() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path());

        store.set_pair("a", "r").expect("set pair");
        assert!(store.has_both());

        store.clear_all();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert!(!store.has_both());
    }

    #[test]
    fn rewriting_access_leaves_refresh_untouched() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path());

        store.set_pair("old_access", "stable_refresh").expect("set pair");
        store.set_access_token("new_access").expect("rotate access");

        assert_eq!(store.access_token().as_deref(), Some("new_access"));
        assert_eq!(store.refresh_token().as_deref(), Some("stable_refresh"));
    }

    #[test]
    fn has_both_is_false_with_only_one_token() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path());

        store.set_access_token("only_access").expect("set access");
        assert!(!store.has_both());
    }

    #[cfg(unix)]
    #[test]
    fn credentials_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path());
        store.set_pair("a", "r").expect("set pair");

        let path = tmp.path().join("credentials");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "credentials file should be 0600");
    }

    #[test]
    fn credentials_file_uses_wire_key_names() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path());
        store.set_pair("a", "r").expect("set pair");

        let content =
            fs::read_to_string(tmp.path().join("credentials")).expect("read credentials");
        let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert_eq!(value["accessToken"], "a");
        assert_eq!(value["refreshToken"], "r");
    }

    #[test]
    fn empty_string_tokens_read_as_absent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        fs::write(&path, r#"{"accessToken": "", "refreshToken": "r"}"#).expect("write");

        let store = TokenStore::file_only(tmp.path());
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token().as_deref(), Some("r"));
    }

    #[test]
    fn corrupt_credentials_file_reads_as_empty() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        fs::write(tmp.path().join("credentials"), "not json").expect("write");

        let store = TokenStore::file_only(tmp.path());
        assert_eq!(store.access_token(), None);
        assert!(!store.has_both());

        // A write replaces the corrupt file rather than failing.
        store.set_access_token("fresh").expect("set access");
        assert_eq!(store.access_token().as_deref(), Some("fresh"));
    }
}
