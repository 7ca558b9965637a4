/// Application context and dependency injection
use crate::{
    config::ServerConfig,
    error::LocatorResult,
    identity::ResolutionPipeline,
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub pipeline: Arc<ResolutionPipeline>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub fn new(config: ServerConfig) -> LocatorResult<Self> {
        config.validate()?;

        let pipeline = Arc::new(ResolutionPipeline::from_config(&config.identity)?);

        Ok(Self {
            config: Arc::new(config),
            pipeline,
        })
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IdentityConfig, LoggingConfig, ServiceConfig};

    #[tokio::test]
    async fn test_context_creation_and_service_url() {
        let config = ServerConfig {
            service: ServiceConfig {
                hostname: "localhost".to_string(),
                port: 9000,
                version: "0.1.0".to_string(),
            },
            identity: IdentityConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        };

        let ctx = AppContext::new(config).unwrap();
        assert_eq!(ctx.service_url(), "http://localhost:9000");
    }
}
