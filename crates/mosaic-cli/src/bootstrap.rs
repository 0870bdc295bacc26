use anyhow::Context;
use mosaic_auth::TokenStore;
use mosaic_client::{ApiClient, Session};
use mosaic_config::MosaicConfig;

/// Everything a command handler needs: config, the shared HTTP client, and
/// the session restored from stored credentials.
pub struct AppContext {
    pub config: MosaicConfig,
    pub client: ApiClient,
    pub session: Session,
}

/// Load config, wire up the client, and restore the session from whatever
/// credentials survive from the previous run.
pub async fn init() -> anyhow::Result<AppContext> {
    let config = MosaicConfig::load_with_dotenv().context("failed to load mosaic configuration")?;
    tracing::debug!(base_url = %config.api.base_url, "configured backend");

    let tokens = TokenStore::new(
        &config.auth.keyring_service,
        config.auth.credentials_dir.clone(),
    );
    let client = ApiClient::new(&config, tokens);
    let session = Session::new(client.clone());
    session.bootstrap().await;

    Ok(AppContext {
        config,
        client,
        session,
    })
}
