use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
};
use ed25519_dalek::{Signer, SigningKey};

use crate::shared::DEFAULT_ROUTE;
use crate::shared::middleware::discord_validation::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::shared::structs::AppState;
use crate::shared::structs::config::Configuration;
use crate::shared::structs::discord::public_key::PublicKey;
use crate::shared::utility::pubsub::EventPublisher;

pub const TIMESTAMP: &str = "1700000000";

const SEED: [u8; 32] = [7u8; 32];

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&SEED)
}

pub fn public_key() -> PublicKey {
    PublicKey::from(signing_key().verifying_key().to_bytes())
}

pub fn sign(timestamp: &str, body: &[u8]) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(signing_key().sign(&message).to_bytes())
}

pub fn unsigned_request(body: Vec<u8>) -> Request {
    Request::builder()
        .method(Method::POST)
        .uri(DEFAULT_ROUTE)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub fn signed_request(timestamp: &str, body: Vec<u8>) -> Request {
    let signature = sign(timestamp, &body);
    let mut request = unsigned_request(body);

    let headers = request.headers_mut();
    headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature).unwrap());
    headers.insert(TIMESTAMP_HEADER, HeaderValue::from_str(timestamp).unwrap());

    request
}

/// Publisher double that records every accepted message.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        RecordingPublisher {
            published: Mutex::default(),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, payload: &[u8]) -> anyhow::Result<String> {
        if self.fail {
            return Err(anyhow::anyhow!("topic {topic} rejected the message"));
        }

        let mut published = self.published.lock().unwrap();
        published.push((topic.to_string(), payload.to_vec()));
        Ok(published.len().to_string())
    }
}

pub fn test_config() -> Configuration {
    Configuration {
        cloud_project_id: "wikia-bot".into(),
        application_public_key: hex::encode(public_key().as_bytes()),
        ..Configuration::new()
    }
}

pub fn app_state(publisher: Arc<RecordingPublisher>) -> AppState {
    AppState::new(test_config(), publisher).unwrap()
}
