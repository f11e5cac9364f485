use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::shared::structs::discord::public_key::PublicKey;
use crate::shared::{DEFAULT_ROUTE, DEFAULT_TOPIC_PREFIX};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub server_bind_point: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub route: String,
    pub cloud_project_id: String,
    pub application_public_key: String,
    pub topic_prefix: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    pub fn new() -> Self {
        Configuration {
            server_bind_point: "0.0.0.0".into(),
            port: 8080,
            log_level: "DEBUG".into(),
            log_format: LogFormat::Pretty,
            route: DEFAULT_ROUTE.into(),
            cloud_project_id: String::new(),
            application_public_key: String::new(),
            topic_prefix: DEFAULT_TOPIC_PREFIX.into(),
        }
    }

    /// Reads the config file named by `CONFIG_DIRECTORY`/`CONFIG_FILE_NAME` when
    /// both are set, then applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let base = match (
            std::env::var("CONFIG_DIRECTORY"),
            std::env::var("CONFIG_FILE_NAME"),
        ) {
            (Ok(directory), Ok(file_name)) => {
                Self::load_from_config_file(Path::new(&directory), &file_name)?
            }
            _ => Self::new(),
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_from_config_file(
        config_directory: &Path,
        config_file_name: &str,
    ) -> anyhow::Result<Self> {
        if !config_directory.exists() {
            std::fs::create_dir_all(config_directory)?;
        }

        let configuration_path = config_directory.join(config_file_name);
        if !configuration_path.exists() {
            let new_config = Configuration::new();
            let serialized = toml::to_string_pretty(&new_config)?;
            std::fs::write(configuration_path, serialized)?;
            Ok(new_config)
        } else {
            let raw_config = std::fs::read_to_string(configuration_path)?;
            let deserialized: Configuration = toml::from_str(&raw_config)?;
            Ok(deserialized)
        }
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(project_id) = lookup("CLOUD_PROJECT_ID") {
            self.cloud_project_id = project_id;
        }

        if let Some(public_key) = lookup("DISCORD_PUBLIC_KEY") {
            self.application_public_key = public_key;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT value {port:?}: {e}"))?;
        }

        Ok(self)
    }

    pub fn log_level(&self) -> Level {
        match self.log_level.to_uppercase().as_str() {
            "TRACE" => Level::TRACE,
            "INFO" => Level::INFO,
            "WARN" => Level::WARN,
            "ERROR" => Level::ERROR,
            _ => Level::DEBUG,
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_bind_point, self.port)
    }

    pub fn public_key(&self) -> anyhow::Result<PublicKey> {
        self.application_public_key.parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cloud_project_id.is_empty() {
            return Err(anyhow::anyhow!("Cloud project id is not configured."));
        }

        if self.topic_prefix.is_empty() {
            return Err(anyhow::anyhow!("Topic prefix must not be empty."));
        }

        if !self.route.starts_with('/') {
            return Err(anyhow::anyhow!(
                "Route must start with '/', got {:?}.",
                &self.route
            ));
        }

        self.public_key().map(|_| ())
    }
}
