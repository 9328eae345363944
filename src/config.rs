use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub s3: S3Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    /// Custom endpoint for MinIO-compatible stores; None means AWS proper.
    pub endpoint: Option<String>,
    pub force_path_style: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8086".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort)?,
            },
            s3: S3Config {
                access_key: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
                secret_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
                region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-south-1".to_string()),
                endpoint: env::var("S3_ENDPOINT").ok(),
                force_path_style: env::var("S3_FORCE_PATH_STYLE")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .unwrap_or(false),
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.s3.access_key.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "AWS_ACCESS_KEY_ID must be set".to_string(),
            ));
        }

        if self.s3.secret_key.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "AWS_SECRET_ACCESS_KEY must be set".to_string(),
            ));
        }

        if self.s3.region.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "AWS_REGION must not be empty".to_string(),
            ));
        }

        if let Some(ref endpoint) = self.s3.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidConfig(
                    "S3_ENDPOINT must start with http:// or https://".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8086,
            },
            s3: S3Config {
                access_key: String::new(),
                secret_key: String::new(),
                region: "ap-south-1".to_string(),
                endpoint: None,
                force_path_style: false,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
