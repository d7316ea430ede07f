use log::info;
use serde::{Deserialize, Serialize};
use std::env;

/// 主配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub window: WindowConfig,
    pub metrics: MetricsConfig,
    pub channels: ChannelConfig,
}

/// Sensor gateway endpoint. Read once at startup, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub device_id: String,
    /// Socket read timeout. Keeps the blocking receive loop responsive to
    /// the shutdown flag; a timeout is reported as an idle read, so the
    /// protocol-visible retry behavior is unchanged.
    pub read_timeout_ms: u64,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
}

/// Dashboard defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub default_weight_kg: f64,
    /// UI refresh cadence; metrics are recomputed on every repaint.
    pub refresh_interval_ms: u64,
}

/// 通道配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub link_event_capacity: usize,
    pub export_result_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            window: WindowConfig::default(),
            metrics: MetricsConfig::default(),
            channels: ChannelConfig::default(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 50000,
            device_id: "201921250012".to_string(),
            read_timeout_ms: 200,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 700.0,
            title: "StrideHub - Caloric Expenditure Dashboard".to_string(),
            resizable: true,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            default_weight_kg: 0.0,
            refresh_interval_ms: 150,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            link_event_capacity: 64,
            export_result_capacity: 4,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if present; otherwise write the defaults there for the
    /// operator to edit and start from those. Environment overrides apply
    /// either way; a `.env` file is honored the way the original deployment
    /// supplied HOST/PORT/DEVICE_ID.
    pub fn load_or_default<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::load_from_file(&path)?
        } else {
            let config = Self::default();
            config.save_to_file(&path)?;
            info!("Wrote default configuration to {}", path.as_ref().display());
            config
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// HOST / PORT / DEVICE_ID from the environment win over the file.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.connection.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.connection.port = port
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("PORT is not a valid port number: {}", port)))?;
        }
        if let Ok(device_id) = env::var("DEVICE_ID") {
            self.connection.device_id = device_id;
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.connection.host.is_empty() {
            return Err(ConfigError::ValidationError("Gateway host must not be empty".to_string()));
        }

        if self.connection.device_id.is_empty() {
            return Err(ConfigError::ValidationError("Device ID must not be empty".to_string()));
        }

        if self.metrics.default_weight_kg < 0.0 {
            return Err(ConfigError::ValidationError("Weight must not be negative".to_string()));
        }

        if self.channels.link_event_capacity == 0 {
            return Err(ConfigError::ValidationError("Link event channel capacity must be positive".to_string()));
        }

        if self.channels.export_result_capacity == 0 {
            return Err(ConfigError::ValidationError("Export result channel capacity must be positive".to_string()));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_device_id_rejected() {
        let mut config = AppConfig::default();
        config.connection.device_id.clear();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn zero_channel_capacities_rejected() {
        let mut config = AppConfig::default();
        config.channels.link_event_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.channels.export_result_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_writes_missing_file() {
        let path = std::env::temp_dir().join("stridehub_default_config_test.toml");
        let _ = std::fs::remove_file(&path);

        AppConfig::load_or_default(&path).unwrap();

        // the defaults land on disk for the operator to edit
        let written = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(written.connection.port, ConnectionConfig::default().port);
        assert_eq!(
            written.channels.export_result_capacity,
            ChannelConfig::default().export_result_capacity
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn negative_weight_rejected() {
        let mut config = AppConfig::default();
        config.metrics.default_weight_kg = -1.0;
        assert!(config.validate().is_err());
    }

    // one test owns HOST/PORT/DEVICE_ID so parallel tests cannot race on them
    #[test]
    fn env_overrides_take_precedence() {
        std::env::set_var("HOST", "10.0.0.8");
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("DEVICE_ID", "override-device");

        let mut config = AppConfig::default();
        assert!(matches!(
            config.apply_env_overrides(),
            Err(ConfigError::ValidationError(_))
        ));

        std::env::set_var("PORT", "50001");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.connection.host, "10.0.0.8");
        assert_eq!(config.connection.port, 50001);
        assert_eq!(config.connection.device_id, "override-device");

        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("DEVICE_ID");
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.connection.port, config.connection.port);
        assert_eq!(parsed.connection.device_id, config.connection.device_id);
    }
}
