/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins for the admin API, parsed from comma-separated
    /// `CORS_ORIGINS`. The public read API allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string. When absent the server runs in the
    /// "not configured" state.
    pub database_url: Option<String>,
    pub chat: ChatConfig,
}

/// Settings for the outbound AI chat call.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API key. When absent the chat endpoint reports "not configured".
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
}

pub const DEFAULT_CHAT_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_CHAT_MODEL: &str = "claude-3-5-haiku-latest";

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_CHAT_API_BASE.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: 1024,
        }
    }
}

/// Read an optional variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `DATABASE_URL`         | unset (not configured)      |
    /// | `CHAT_API_KEY`         | unset (chat disabled)       |
    /// | `CHAT_API_BASE`        | `https://api.anthropic.com` |
    /// | `CHAT_MODEL`           | `claude-3-5-haiku-latest`   |
    /// | `CHAT_MAX_TOKENS`      | `1024`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let chat = ChatConfig {
            api_key: optional_env("CHAT_API_KEY"),
            api_base: optional_env("CHAT_API_BASE")
                .unwrap_or_else(|| DEFAULT_CHAT_API_BASE.to_string()),
            model: optional_env("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            max_tokens: optional_env("CHAT_MAX_TOKENS")
                .map(|v| v.parse().expect("CHAT_MAX_TOKENS must be a valid u32"))
                .unwrap_or(1024),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: optional_env("DATABASE_URL"),
            chat,
        }
    }
}
