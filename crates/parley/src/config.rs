//! Client configuration.

use std::time::Duration;

use parley_retry::RetryPolicy;
use serde::Deserialize;

/// Settings for a [`ParleyClient`](crate::ParleyClient).
///
/// All fields have defaults, so a config file only needs to name what it
/// changes:
///
/// ```rust
/// use parley::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(
///     r#"{"pod_url": "https://acme.example.com", "retry": {"max_retries": 2}}"#,
/// ).unwrap();
/// assert_eq!(config.retry.max_retries, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the pod API, e.g. `https://acme.example.com`.
    pub pod_url: String,

    /// Per-request timeout enforced by the HTTP transport.
    pub request_timeout: Duration,

    /// Transient-failure retries. Disabled by default; the single
    /// refresh-and-retry on `Unauthorized` happens regardless.
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pod_url: String::new(),
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_disables_transient_retry() {
        let config = ClientConfig::default();
        assert!(!config.retry.is_enabled());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"pod_url": "https://pod"}"#).unwrap();
        assert_eq!(config.pod_url, "https://pod");
        assert_eq!(config.retry, RetryPolicy::default());
    }
}
