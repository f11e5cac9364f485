use std::sync::Arc;

use crate::shared::structs::config::Configuration;
use crate::shared::structs::discord::public_key::PublicKey;
use crate::shared::utility::pubsub::{EventPublisher, PubSubPublisher};

pub mod config;
pub mod discord;

/// Process-lifetime state shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Configuration>,
    pub public_key: PublicKey,
    pub publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(config: Configuration, publisher: Arc<dyn EventPublisher>) -> anyhow::Result<Self> {
        config.validate()?;
        let public_key = config.public_key()?;

        Ok(AppState {
            config: Arc::new(config),
            public_key,
            publisher,
        })
    }

    pub async fn from_config(config: Configuration) -> anyhow::Result<Self> {
        config.validate()?;
        let publisher = PubSubPublisher::from_config(&config).await?;
        Self::new(config, Arc::new(publisher))
    }
}
