//! Test configuration builders

use cleaner::{Config, ConfigManager};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Parsed default config pointing at an in-memory SQLite database
pub fn test_config() -> Arc<Config> {
    Arc::new(
        ConfigManager::parse(&TestConfigBuilder::new().render())
            .expect("default test config should parse"),
    )
}

/// Builder for main.toml contents, optionally written to a temp dir
pub struct TestConfigBuilder {
    database_url: String,
    table_prefix: Option<String>,
    schedule_enabled: bool,
    interval_hours: Option<u64>,
    cron: Option<String>,
    order_days: Option<i64>,
    webhook_days: Option<i64>,
    port: Option<u16>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            table_prefix: None,
            schedule_enabled: true,
            interval_hours: None,
            cron: None,
            order_days: None,
            webhook_days: None,
            port: None,
        }
    }

    pub fn database_url(mut self, url: &str) -> Self {
        self.database_url = url.to_string();
        self
    }

    pub fn table_prefix(mut self, prefix: &str) -> Self {
        self.table_prefix = Some(prefix.to_string());
        self
    }

    pub fn schedule_enabled(mut self, enabled: bool) -> Self {
        self.schedule_enabled = enabled;
        self
    }

    pub fn interval_hours(mut self, hours: u64) -> Self {
        self.interval_hours = Some(hours);
        self
    }

    pub fn cron(mut self, expression: &str) -> Self {
        self.cron = Some(expression.to_string());
        self
    }

    pub fn order_days(mut self, days: i64) -> Self {
        self.order_days = Some(days);
        self
    }

    pub fn webhook_days(mut self, days: i64) -> Self {
        self.webhook_days = Some(days);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Render main.toml
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(port) = self.port {
            out.push_str(&format!("port = {}\n", port));
        }
        if let Some(prefix) = &self.table_prefix {
            out.push_str(&format!("table_prefix = \"{}\"\n", prefix));
        }

        out.push_str("\n[database]\n");
        out.push_str(&format!("url = \"{}\"\n", self.database_url));

        out.push_str("\n[schedule]\n");
        out.push_str(&format!("enabled = {}\n", self.schedule_enabled));
        if let Some(hours) = self.interval_hours {
            out.push_str(&format!("interval_hours = {}\n", hours));
        }
        if let Some(cron) = &self.cron {
            out.push_str(&format!("cron = \"{}\"\n", cron));
        }

        if self.order_days.is_some() || self.webhook_days.is_some() {
            out.push_str("\n[retention]\n");
            if let Some(days) = self.order_days {
                out.push_str(&format!("order_days = {}\n", days));
            }
            if let Some(days) = self.webhook_days {
                out.push_str(&format!("webhook_days = {}\n", days));
            }
        }
        out
    }

    /// Parse without validation
    pub fn parse(&self) -> Config {
        ConfigManager::parse(&self.render()).expect("rendered config should parse")
    }

    /// Write main.toml into a fresh temp dir
    pub fn write(&self) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_main_toml(dir.path(), &self.render());
        dir
    }
}

pub fn write_main_toml(dir: &Path, content: &str) {
    fs::write(dir.join("main.toml"), content).expect("Failed to write main.toml");
}
