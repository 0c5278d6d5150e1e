/// Configuration management for the portal client
///
/// This module loads configuration from environment variables (optionally
/// seeded from a `.env` file) and provides a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `PORTAL_BASE_URL`: Gateway base URL (required), e.g. `https://member-portal.example.org`
/// - `PORTAL_TIMEOUT_SECS`: Per-request timeout (default: 30)
/// - `PORTAL_AUTH_TOKEN`: Bearer token attached to every request (optional)
/// - `PORTAL_USER_SERVICE_PATH`: default `/services/userservice/api`
/// - `PORTAL_MEMBER_SERVICE_PATH`: default `/services/memberservice/api`
/// - `PORTAL_ASSERTION_SERVICE_PATH`: default `/services/assertionservice/api`
///
/// # Example
///
/// ```no_run
/// use memberportal_client::config::ClientConfig;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = ClientConfig::from_env()?;
/// println!("Talking to {}", config.api.base_url);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Gateway connection settings
    pub api: ApiConfig,

    /// Path prefixes of the back-end services behind the gateway
    pub services: ServicePaths,
}

/// Gateway connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Gateway base URL without trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Bearer token for authenticated sessions
    pub auth_token: Option<String>,
}

/// Service path prefixes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePaths {
    pub user_service: String,
    pub member_service: String,
    pub assertion_service: String,
}

impl Default for ServicePaths {
    fn default() -> Self {
        Self {
            user_service: "/services/userservice/api".to_string(),
            member_service: "/services/memberservice/api".to_string(),
            assertion_service: "/services/assertionservice/api".to_string(),
        }
    }
}

/// Flat view of the `PORTAL_*` environment
#[derive(Debug, Deserialize)]
struct RawEnv {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    auth_token: Option<String>,
    user_service_path: Option<String>,
    member_service_path: Option<String>,
    assertion_service_path: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `PORTAL_BASE_URL` is missing or not an http(s) URL
    /// - `PORTAL_TIMEOUT_SECS` is not a number or is zero
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let raw: RawEnv = config::Config::builder()
            .add_source(config::Environment::with_prefix("PORTAL").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawEnv) -> anyhow::Result<Self> {
        let base_url = raw
            .base_url
            .ok_or_else(|| anyhow::anyhow!("PORTAL_BASE_URL environment variable is required"))?;

        let defaults = ServicePaths::default();
        let config = Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout_secs: raw.timeout_secs.unwrap_or(30),
                auth_token: raw.auth_token.filter(|t| !t.is_empty()),
            },
            services: ServicePaths {
                user_service: raw.user_service_path.unwrap_or(defaults.user_service),
                member_service: raw.member_service_path.unwrap_or(defaults.member_service),
                assertion_service: raw
                    .assertion_service_path
                    .unwrap_or(defaults.assertion_service),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration for a base URL with defaults everywhere else
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout_secs: 30,
                auth_token: None,
            },
            services: ServicePaths::default(),
        }
    }

    /// Checks invariants the HTTP layer relies on
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            anyhow::bail!("PORTAL_BASE_URL must be an http(s) URL");
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("PORTAL_TIMEOUT_SECS must be greater than zero");
        }

        Ok(())
    }

    /// Full URL of a user service resource
    pub fn user_service_url(&self, resource: &str) -> String {
        self.join(&self.services.user_service, resource)
    }

    /// Full URL of a member service resource
    pub fn member_service_url(&self, resource: &str) -> String {
        self.join(&self.services.member_service, resource)
    }

    /// Full URL of an assertion service resource
    pub fn assertion_service_url(&self, resource: &str) -> String {
        self.join(&self.services.assertion_service, resource)
    }

    fn join(&self, prefix: &str, resource: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api.base_url,
            prefix.trim_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(base_url: Option<&str>) -> RawEnv {
        RawEnv {
            base_url: base_url.map(str::to_string),
            timeout_secs: None,
            auth_token: None,
            user_service_path: None,
            member_service_path: None,
            assertion_service_path: None,
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = ClientConfig::from_raw(raw(Some("https://portal.example.org/"))).unwrap();
        assert_eq!(config.api.base_url, "https://portal.example.org");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.auth_token.is_none());
        assert_eq!(
            config.user_service_url("users/validate"),
            "https://portal.example.org/services/userservice/api/users/validate"
        );
    }

    #[test]
    fn test_base_url_required() {
        let err = ClientConfig::from_raw(raw(None)).unwrap_err();
        assert!(err.to_string().contains("PORTAL_BASE_URL"));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(ClientConfig::from_raw(raw(Some("ftp://portal"))).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut env = raw(Some("http://localhost:8080"));
        env.timeout_secs = Some(0);
        assert!(ClientConfig::from_raw(env).is_err());
    }

    #[test]
    fn test_empty_token_dropped() {
        let mut env = raw(Some("http://localhost:8080"));
        env.auth_token = Some(String::new());
        assert!(ClientConfig::from_raw(env).unwrap().api.auth_token.is_none());
    }

    #[test]
    fn test_service_overrides() {
        let mut env = raw(Some("http://localhost:8080"));
        env.member_service_path = Some("/members-api/".to_string());
        let config = ClientConfig::from_raw(env).unwrap();
        assert_eq!(
            config.member_service_url("/members/list/all"),
            "http://localhost:8080/members-api/members/list/all"
        );
    }
}
