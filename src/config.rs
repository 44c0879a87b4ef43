use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    /// `hourly` | `daily` | anything else = never rotate
    pub rotation: String,
    pub server: ServerConfig,
    /// Fixture files loaded at startup
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SeedConfig {
    pub dishes: Option<String>,
    pub orders: Option<String>,
}

impl AppConfig {
    /// Load `<config_dir>/<env>.yaml`
    pub fn load(config_dir: impl AsRef<Path>, env: &str) -> anyhow::Result<Self> {
        let config_path = config_dir.as_ref().join(format!("{}.yaml", env));
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV: &str = r#"
log_level: info
log_dir: ./logs
log_file: grub_dash.log
use_json: false
rotation: daily
server:
  host: 127.0.0.1
  port: 5000
seed:
  dishes: fixtures/dishes.json
  orders: fixtures/orders.json
"#;

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::from_yaml(DEV).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.rotation, "daily");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.seed.dishes.as_deref(), Some("fixtures/dishes.json"));
    }

    #[test]
    fn test_seed_is_optional() {
        let yaml = r#"
log_level: debug
log_dir: ./logs
log_file: test.log
use_json: true
rotation: never
server:
  host: 0.0.0.0
  port: 8080
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert!(config.seed.dishes.is_none());
        assert!(config.seed.orders.is_none());
        assert!(config.use_json);
    }

    #[test]
    fn test_missing_server_is_error() {
        let yaml = "log_level: info\nlog_dir: x\nlog_file: y\nuse_json: false\nrotation: never\n";
        assert!(AppConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = AppConfig::load("/definitely/not/here", "dev").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_shipped_dev_config_parses() {
        let config = AppConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config"), "dev").unwrap();
        assert_eq!(config.server.port, ServerConfig::default().port);
    }
}
