use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::clients::sendgrid::SendGridClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, NotificationService, SeaOrmAuthService};

/// Build a shared HTTP client with reasonable defaults for API calls.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Folio/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Explicitly constructed application context, passed down instead of
/// living in module-level globals.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth: Arc<dyn AuthService>,

    pub notifications: Arc<NotificationService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let mailer = if config.email.enabled {
            if config.email.sendgrid_api_key.is_empty() {
                warn!("Email enabled but SENDGRID_API_KEY not set; notifications will be skipped");
                None
            } else {
                let http_client =
                    build_shared_http_client(config.email.request_timeout_seconds.into())?;
                Some(Arc::new(SendGridClient::with_shared_client(
                    http_client,
                    config.email.sendgrid_api_key.clone(),
                )))
            }
        } else {
            None
        };

        let notifications = Arc::new(NotificationService::new(&config.email, mailer));

        let auth = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth,
            notifications,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
