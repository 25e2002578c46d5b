//! Client configuration and credentials.
//!
//! The target host defaults to the public Box Panel endpoint and can be
//! overridden per client.

use std::fmt;
use std::time::Duration;

/// Host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://boxpanel.bluebox.net";

/// Connection settings for a `Client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host (optionally a port) without a trailing slash.
    pub base_url: String,

    /// Agent-wide timeout for the default transport. `None` leaves ureq's
    /// defaults in place.
    pub timeout: Option<Duration>,

    /// Sent as the `User-Agent` header on every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: concat!("bluebox-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP Basic credentials: customer id as username, API key as password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub customer_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(customer_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("customer_id", &self.customer_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_box_panel() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://boxpanel.bluebox.net");
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("bluebox-core/"));
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:3000/");
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn timeout_builder() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let creds = Credentials::new("customer", "super-secret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("customer"));
        assert!(!rendered.contains("super-secret"));
    }
}
