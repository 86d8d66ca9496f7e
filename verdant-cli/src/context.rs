use std::env;

use tracing::info;

use verdant_api::{ApiClient, ApiConfig};
use verdant_core::{Session, UserId};

/// Everything a networked command needs.
#[derive(Clone, Debug)]
pub struct Data {
    pub api: ApiClient,
    pub session: Session,
}

impl Data {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ApiConfig::from_env()?;
        let api = ApiClient::new(&config)?;
        info!(
            base_url = %api.base_url(),
            timeout_seconds = config.timeout.as_secs(),
            cache_enabled = api.cache().is_enabled(),
            "backend client configured."
        );

        let session = match env::var("VERDANT_VIEWER_ID") {
            Ok(raw) if !raw.trim().is_empty() => Session::signed_in(UserId::new(raw.trim())),
            _ => {
                info!("no VERDANT_VIEWER_ID set; running anonymously.");
                Session::anonymous()
            }
        };

        Ok(Self { api, session })
    }
}
