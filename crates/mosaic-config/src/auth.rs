//! Token storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_keyring_service() -> String {
    "mosaic-client".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// OS keychain service name. Override (e.g. `mosaic-client-test`) to
    /// avoid touching real credentials in tests.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Directory holding the fallback credentials file. Defaults to
    /// `~/.mosaic` when unset.
    #[serde(default)]
    pub credentials_dir: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            credentials_dir: None,
        }
    }
}
