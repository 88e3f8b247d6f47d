// src/state.rs
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::message::Mode;
use crate::services::coze::{CozeClient, WorkflowClient};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub client: Option<Arc<dyn WorkflowClient>>,
}

impl AppState {
    /// Build the state from config, connecting to Coze when fully configured.
    /// A client that fails to build leaves the service in demo mode.
    pub fn new(config: Config) -> Self {
        info!(
            api_token = config.masked_token(),
            workflow_id = config.workflow_id.as_deref().unwrap_or("unset"),
            enabled = config.enabled,
            "Coze configuration"
        );

        let client: Option<Arc<dyn WorkflowClient>> = if config.coze_enabled() {
            match CozeClient::new(&config) {
                Ok(client) => {
                    info!("Coze client initialized, production mode");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    error!(error = %e, "Coze client initialization failed, falling back to demo mode");
                    None
                }
            }
        } else {
            if config.credentials().is_none() {
                warn!(
                    token = config.api_token.is_some(),
                    workflow_id = config.workflow_id.is_some(),
                    "Coze is not fully configured"
                );
            }
            info!("demo mode enabled");
            None
        };

        Self { config, client }
    }

    pub fn with_client(config: Config, client: Arc<dyn WorkflowClient>) -> Self {
        Self { config, client: Some(client) }
    }

    pub fn mode(&self) -> Mode {
        if self.client.is_some() { Mode::Production } else { Mode::Demo }
    }
}
