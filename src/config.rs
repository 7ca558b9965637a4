/// Configuration management for the PDS locator service
use crate::error::{LocatorError, LocatorResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    pub version: String,
}

/// Identity resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the PLC directory used for did:plc documents
    pub did_plc_url: String,
    /// Domain suffix identifying the reference network's PDS hosts.
    /// A string-suffix heuristic, not a cryptographic identity check.
    pub reference_network_suffix: String,
    /// Per-step network timeout in seconds
    pub request_timeout_secs: u64,
    /// User-Agent header for outbound HTTP requests
    pub user_agent: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            did_plc_url: "https://plc.directory".to_string(),
            reference_network_suffix: "bsky.network".to_string(),
            request_timeout_secs: 5,
            user_agent: format!("pds-locator/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> LocatorResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("LOCATOR_HOSTNAME").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("LOCATOR_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .map_err(|_| LocatorError::Validation("Invalid port number".to_string()))?;
        let version = env::var("LOCATOR_VERSION")
            .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

        let did_plc_url = env::var("LOCATOR_PLC_URL")
            .unwrap_or_else(|_| "https://plc.directory".to_string());
        let reference_network_suffix = env::var("LOCATOR_REFERENCE_SUFFIX")
            .unwrap_or_else(|_| "bsky.network".to_string());
        let request_timeout_secs = env::var("LOCATOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let user_agent = env::var("LOCATOR_USER_AGENT")
            .unwrap_or_else(|_| format!("pds-locator/{}", env!("CARGO_PKG_VERSION")));

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                version,
            },
            identity: IdentityConfig {
                did_plc_url,
                reference_network_suffix,
                request_timeout_secs,
                user_agent,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> LocatorResult<()> {
        if self.service.hostname.is_empty() {
            return Err(LocatorError::Validation(
                "Hostname cannot be empty".to_string(),
            ));
        }

        if self.identity.request_timeout_secs == 0 {
            return Err(LocatorError::Validation(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        url::Url::parse(&self.identity.did_plc_url)
            .map_err(|e| LocatorError::Validation(format!("Invalid PLC directory URL: {}", e)))?;

        if self.identity.reference_network_suffix.is_empty() {
            return Err(LocatorError::Validation(
                "Reference network suffix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
