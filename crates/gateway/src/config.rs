use crate::session::Session;

/// Default backend base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    pub access_token: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            access_token: None,
            username: None,
            role: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `AMBIENCE_API_URL`              | `http://localhost:8000` |
    /// | `AMBIENCE_REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `AMBIENCE_TOKEN`                | unset                   |
    /// | `AMBIENCE_USERNAME`             | unset                   |
    /// | `AMBIENCE_ROLE`                 | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("AMBIENCE_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout_secs = match lookup("AMBIENCE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::Invalid {
                    var: "AMBIENCE_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_url,
            request_timeout_secs,
            access_token: non_empty("AMBIENCE_TOKEN"),
            username: non_empty("AMBIENCE_USERNAME"),
            role: non_empty("AMBIENCE_ROLE"),
        })
    }

    /// Build the session described by this configuration.
    pub fn session(&self) -> Session {
        let session = match &self.access_token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::anonymous(),
        };
        match (&self.username, &self.role) {
            (Some(username), Some(role)) => session.with_user(username.clone(), role.clone()),
            _ => session,
        }
    }
}
