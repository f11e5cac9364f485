use std::str::FromStr;

pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The application's Ed25519 public key as published in the developer portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(value: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(value)
    }
}

impl FromStr for PublicKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| anyhow::anyhow!("Failed to decode public key from hex value: {e}"))?;

        let key: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            anyhow::anyhow!(
                "Public key must be {} bytes long, got {} bytes.",
                PUBLIC_KEY_LENGTH,
                b.len()
            )
        })?;

        Ok(PublicKey(key))
    }
}
