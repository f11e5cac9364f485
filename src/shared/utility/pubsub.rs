use async_trait::async_trait;
use dashmap::DashMap;
use google_cloud_googleapis::pubsub::v1::PubsubMessage;
use google_cloud_pubsub::client::{Client, ClientConfig};
use google_cloud_pubsub::publisher::Publisher;

use crate::shared::structs::config::Configuration;

/// Sink for accepted application commands. Implementations must only return
/// once the bus has acknowledged the message.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes `payload` to `topic` and returns the bus-assigned message id.
    async fn publish(&self, topic: &str, payload: &[u8]) -> anyhow::Result<String>;

    /// Flushes anything still buffered. Called once after the server stops.
    async fn shutdown(&self) {}
}

/// Google Cloud Pub/Sub publisher.
///
/// Credentials come from Application Default Credentials, and
/// `PUBSUB_EMULATOR_HOST` switches the client to an unauthenticated emulator.
/// One publisher is kept per topic, created on first use.
pub struct PubSubPublisher {
    client: Client,
    publishers: DashMap<String, Publisher>,
}

impl PubSubPublisher {
    pub async fn from_config(config: &Configuration) -> anyhow::Result<Self> {
        let client_config = ClientConfig {
            project_id: Some(config.cloud_project_id.clone()),
            ..ClientConfig::default()
        }
        .with_auth()
        .await?;

        let client = Client::new(client_config).await?;
        tracing::info!(
            "Pub/Sub client ready for project {}.",
            &config.cloud_project_id
        );

        Ok(PubSubPublisher {
            client,
            publishers: DashMap::new(),
        })
    }

    fn publisher_for(&self, topic: &str) -> Publisher {
        self.publishers
            .entry(topic.to_string())
            .or_insert_with(|| {
                tracing::debug!("Starting Pub/Sub publisher for topic {}", topic);
                self.client.topic(topic).new_publisher(None)
            })
            .clone()
    }
}

#[async_trait]
impl EventPublisher for PubSubPublisher {
    async fn publish(&self, topic: &str, payload: &[u8]) -> anyhow::Result<String> {
        let message = PubsubMessage {
            data: payload.to_vec().into(),
            ..Default::default()
        };

        let mut awaiter = self.publisher_for(topic).publish(message).await;
        awaiter
            .get()
            .await
            .map_err(|status| anyhow::anyhow!("Pub/Sub publish to {topic} failed: {status:?}"))
    }

    async fn shutdown(&self) {
        let topics = self
            .publishers
            .iter()
            .map(|entry| entry.key().clone())
            .collect::<Vec<_>>();

        for topic in topics {
            if let Some((_, mut publisher)) = self.publishers.remove(&topic) {
                publisher.shutdown().await;
            }
        }
    }
}
