//! Server configuration.

/// Default welcome text sent to every new connection
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to the chat!";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to; all interfaces by default
    pub host: String,
    pub port: u16,
    pub welcome_message: String,
    /// Default level for the relay's log targets when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_listens_on_8080() {
        // テスト項目: デフォルト設定は全インターフェースの 8080 番で待ち受ける
        // given (前提条件):
        let config = ServerConfig::default();

        // when (操作):
        let addr = config.bind_addr();

        // then (期待する結果):
        assert_eq!(addr, "0.0.0.0:8080");
        assert_eq!(config.welcome_message, "Welcome to the chat!");
    }
}
