//! Application configuration loaded from environment variables.

use url::Url;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// CMS query API endpoint (e.g., "https://myrepo.cdn.example-cms.io").
    pub cms_endpoint: Url,

    /// Optional CMS access token for private repositories.
    pub cms_access_token: Option<String>,

    /// Base URL for this site (used in OG tags and canonical URLs).
    /// e.g., "https://spacetraveling.example.com"
    pub base_url: String,

    /// Site name shown in OG tags and page titles.
    pub site_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `BLOG_BIND_ADDR`: Server bind address (default: "0.0.0.0:3000")
    /// - `CMS_API_ENDPOINT`: CMS API endpoint (default: "http://localhost:8000")
    /// - `CMS_ACCESS_TOKEN`: CMS access token for private content
    /// - `BLOG_BASE_URL`: Base URL for links/OG tags (default: "http://localhost:3000")
    /// - `BLOG_SITE_NAME`: Site name (default: "spacetraveling")
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("BLOG_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let endpoint_str = std::env::var("CMS_API_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let cms_endpoint = Url::parse(endpoint_str.trim_end_matches('/'))
            .map_err(|e| anyhow::anyhow!("CMS_API_ENDPOINT is not a valid URL: {e}"))?;

        let cms_access_token = std::env::var("CMS_ACCESS_TOKEN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let base_url = std::env::var("BLOG_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("BLOG_SITE_NAME").unwrap_or_else(|_| "spacetraveling".to_string());

        tracing::info!(
            bind_addr = %bind_addr,
            cms_endpoint = %cms_endpoint,
            base_url = %base_url,
            site_name = %site_name,
            has_access_token = cms_access_token.is_some(),
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            cms_endpoint,
            cms_access_token,
            base_url,
            site_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "BLOG_BIND_ADDR",
        "CMS_API_ENDPOINT",
        "CMS_ACCESS_TOKEN",
        "BLOG_BASE_URL",
        "BLOG_SITE_NAME",
    ];

    /// Helper to run config tests with isolated env vars.
    /// Uses a mutex to prevent concurrent env var races.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:3000");
            assert_eq!(config.cms_endpoint.as_str(), "http://localhost:8000/");
            assert_eq!(config.cms_access_token, None);
            assert_eq!(config.base_url, "http://localhost:3000");
            assert_eq!(config.site_name, "spacetraveling");
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("BLOG_BIND_ADDR", "127.0.0.1:9090"),
                ("CMS_API_ENDPOINT", "https://myrepo.cdn.example-cms.io"),
                ("CMS_ACCESS_TOKEN", "secret"),
                ("BLOG_BASE_URL", "https://blog.example.com"),
                ("BLOG_SITE_NAME", "My Blog"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9090");
                assert_eq!(
                    config.cms_endpoint.as_str(),
                    "https://myrepo.cdn.example-cms.io/"
                );
                assert_eq!(config.cms_access_token.as_deref(), Some("secret"));
                assert_eq!(config.base_url, "https://blog.example.com");
                assert_eq!(config.site_name, "My Blog");
            },
        );
    }

    #[test]
    fn config_base_url_trailing_slash_stripped() {
        with_env_vars(&[("BLOG_BASE_URL", "https://blog.example.com/")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.base_url, "https://blog.example.com");
        });
    }

    #[test]
    fn config_endpoint_trailing_slash_stripped() {
        with_env_vars(
            &[("CMS_API_ENDPOINT", "https://myrepo.cdn.example-cms.io/")],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(
                    config.cms_endpoint.as_str(),
                    "https://myrepo.cdn.example-cms.io/"
                );
            },
        );
    }

    #[test]
    fn config_rejects_invalid_endpoint() {
        with_env_vars(&[("CMS_API_ENDPOINT", "not a url")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_blank_access_token_treated_as_absent() {
        with_env_vars(&[("CMS_ACCESS_TOKEN", "   ")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.cms_access_token, None);
        });
    }
}
