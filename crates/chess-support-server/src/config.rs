//! Server configuration

/// Environment variable overriding the advertised server name
pub const ENV_NAME: &str = "CHESS_MCP_NAME";
/// Environment variable holding the default log filter
pub const ENV_LOG: &str = "CHESS_MCP_LOG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for the chess support server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Name reported in `serverInfo`
    pub name: String,
    /// Version reported in `serverInfo`
    pub version: String,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "chess-support-mcp".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            log_level: "info".into(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `CHESS_MCP_NAME` and `CHESS_MCP_LOG`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(name) = std::env::var(ENV_NAME) {
            config.name = name;
        }
        if let Ok(level) = std::env::var(ENV_LOG) {
            config = config.with_log_level(&level)?;
        }
        Ok(config)
    }

    /// Replace the log level, rejecting unknown levels
    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        let level = level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(level));
        }
        self.log_level = level;
        Ok(self)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0} (expected one of trace, debug, info, warn, error)")]
    InvalidLogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.name, "chess-support-mcp");
        assert_eq!(config.log_level, "info");
        assert!(!config.version.is_empty());
    }

    #[test]
    fn test_log_level_override() {
        let config = ServerConfig::default().with_log_level(" DEBUG ").unwrap();
        assert_eq!(config.log_level, "debug");

        let err = ServerConfig::default().with_log_level("loud").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(ref l) if l == "loud"));
    }
}
