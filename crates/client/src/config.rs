/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                     |
    /// |-----------------------------|-----------------------------|
    /// | `STORYGRID_API_URL`         | `http://localhost:3000/api` |
    /// | `STORYGRID_TIMEOUT_SECS`    | `30`                        |
    pub fn from_env() -> Self {
        let api_url = std::env::var("STORYGRID_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".into());

        let request_timeout_secs: u64 = std::env::var("STORYGRID_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("STORYGRID_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            request_timeout_secs,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".into(),
            request_timeout_secs: 30,
        }
    }
}
