use storygrid_core::moves::MovePolicy;

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
    /// SQLite database URL (default: `sqlite://storygrid.db?mode=rwc`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How a card dropped on an occupied cell is handled (default: `swap`).
    pub move_policy: MovePolicy,
    /// Emit logs as JSON lines (`LOG_FORMAT=json`).
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `HOST`                  | `0.0.0.0`                        |
    /// | `PORT`                  | `3000`                           |
    /// | `DATABASE_URL`          | `sqlite://storygrid.db?mode=rwc` |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                             |
    /// | `MOVE_COLLISION_POLICY` | `swap`                           |
    /// | `LOG_FORMAT`            | `text`                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://storygrid.db?mode=rwc".into());

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

        let move_policy: MovePolicy = std::env::var("MOVE_COLLISION_POLICY")
            .unwrap_or_else(|_| "swap".into())
            .parse()
            .expect("MOVE_COLLISION_POLICY must be 'swap' or 'reject'");

        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            move_policy,
            log_json,
        }
    }
}
