//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for harvest-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SQLite (or other) database URL (default: `"sqlite://harvest.db"`).
    /// Any sqlx-compatible SQLite connection string works;
    /// `"sqlite::memory:"` gives an ephemeral database for local poking.
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Serve Swagger UI at `/swagger-ui`. Disable in production to avoid
    /// exposing the API structure.
    pub enable_swagger: bool,

    /// Comma-separated CORS origin allow-list; unset means wildcard.
    pub cors_allowed_origins: Option<String>,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("HARVEST_BIND", "0.0.0.0:3000"),
            database_url: env_or("HARVEST_DATABASE_URL", "sqlite://harvest.db"),
            log_level: env_or("HARVEST_LOG", "info"),
            log_json: env_flag("HARVEST_LOG_JSON", false),
            enable_swagger: env_flag("HARVEST_ENABLE_SWAGGER", true),
            cors_allowed_origins: std::env::var("HARVEST_CORS_ORIGINS").ok(),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
