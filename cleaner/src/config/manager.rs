// File: cleaner/src/config/manager.rs
use super::{is_valid_identifier, Config, TableNames};
use crate::errors::ConfigurationError;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Load `{config_dir}/main.toml`, optionally replacing the database URL
    /// (e.g. from the command line or environment).
    pub async fn new(config_dir: &str, database_url_override: Option<String>) -> Result<Self> {
        let main_config_path = Path::new(config_dir).join("main.toml");
        let content = fs::read_to_string(&main_config_path).await.map_err(|e| {
            ConfigurationError::LoadFailed {
                path: main_config_path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!("Loaded config file: {}", main_config_path.display());

        let mut config = Self::parse(&content)?;
        if let Some(url) = database_url_override {
            info!("Database URL overridden from command line / environment");
            config.database.url = url;
        }
        Self::validate(&config)?;

        info!(
            "Configuration loaded: prefix '{}', schedule {} (enabled: {}), retention orders {}d / webhooks {}d",
            config.table_prefix,
            config.schedule.describe(),
            config.schedule.enabled,
            config.retention.order_days,
            config.retention.webhook_days
        );

        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    /// Parse a main.toml document and resolve the table names.
    pub fn parse(content: &str) -> Result<Config, ConfigurationError> {
        let mut config: Config =
            toml::from_str(content).map_err(|e| ConfigurationError::ParseError {
                reason: e.to_string(),
            })?;
        config.tables = TableNames::with_prefix(&config.table_prefix);
        Ok(config)
    }

    pub fn validate(config: &Config) -> Result<(), ConfigurationError> {
        if config.database.url.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                field: "database.url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if config.database.max_connections == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "database.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if let Some(table) = config
            .tables
            .all()
            .into_iter()
            .find(|name| !is_valid_identifier(name))
        {
            return Err(ConfigurationError::InvalidValue {
                field: "table_prefix".to_string(),
                reason: format!("resolved table name '{}' is not a plain identifier", table),
            });
        }

        if config.retention.order_days <= 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "retention.order_days".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if config.retention.webhook_days <= 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "retention.webhook_days".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if config.schedule.cron.is_none() && config.schedule.interval_hours == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "schedule.interval_hours".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
