/// Errors raised while reading client configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the listing API, without trailing slash
    /// (default: `http://localhost:3000`).
    pub api_url: String,
    /// Base URL of the auth provider, e.g. `https://auth.example.com/auth/v1`.
    pub auth_url: Option<String>,
    /// Public API key sent as the `apikey` header to the auth provider.
    pub auth_api_key: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `ROEHRENBOERSE_API_URL` | `http://localhost:3000`  |
    /// | `AUTH_URL`              | unset                    |
    /// | `AUTH_API_KEY`          | unset                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = match non_blank(lookup("ROEHRENBOERSE_API_URL")) {
            Some(url) => validate_url("ROEHRENBOERSE_API_URL", url)?,
            None => "http://localhost:3000".to_string(),
        };

        let auth_url = non_blank(lookup("AUTH_URL"))
            .map(|url| validate_url("AUTH_URL", url))
            .transpose()?;

        let auth_api_key = non_blank(lookup("AUTH_API_KEY"));

        Ok(Self {
            api_url,
            auth_url,
            auth_api_key,
        })
    }

    /// Auth provider URL and key, or the name of the first missing variable.
    pub fn auth(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .auth_url
            .as_deref()
            .ok_or(ConfigError::Missing("AUTH_URL"))?;
        let key = self
            .auth_api_key
            .as_deref()
            .ok_or(ConfigError::Missing("AUTH_API_KEY"))?;
        Ok((url, key))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    match reqwest::Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(ConfigError::Invalid {
            var,
            expected: "http(s) URL",
            value,
        }),
    }
}
