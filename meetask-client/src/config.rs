/// Configuration management for the MeeTask client
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `MEETASK_API_BASE_URL`: backend base URL (required)
/// - `MEETASK_TIMEOUT_SECS`: per-request timeout (default: 30)
/// - `MEETASK_RETRY_READS`: retry an initial read once on transport
///   failure (default: true)
/// - `RUST_LOG`: log level (default: info)
///
/// # Example
///
/// ```no_run
/// use meetask_client::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Talking to {}", config.base_url);
/// # Ok(())
/// # }
/// ```
use std::env;

/// Complete client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Whether an initial read is retried once on transport failure
    pub retry_reads: bool,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `MEETASK_API_BASE_URL` is missing or a numeric
    /// variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let base_url = env::var("MEETASK_API_BASE_URL")
            .map_err(|_| anyhow::anyhow!("MEETASK_API_BASE_URL environment variable is required"))?;

        let timeout_secs = env::var("MEETASK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()?;

        let retry_reads = env::var("MEETASK_RETRY_READS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()?;

        Ok(Self::new(base_url, timeout_secs, retry_reads))
    }

    /// Builds a configuration directly (tests, embedding)
    pub fn new(base_url: impl Into<String>, timeout_secs: u64, retry_reads: bool) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Config {
            base_url,
            timeout_secs,
            retry_reads,
        }
    }

    /// Joins a path onto the base URL
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Browser navigation entry for the redirect-based OAuth login
    pub fn login_url(&self) -> String {
        self.api_url("/login")
    }

    /// Browser navigation entry for logout
    pub fn logout_url(&self) -> String {
        self.api_url("/logout")
    }
}
