use std::env;
use std::time::Duration;

use denuo_core::SITE_ORIGIN;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; denuo-scraper/0.1)";

/// Settings of one scrape run, read from the environment.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Scheme and host every page path is appended to. Relative links on the
    /// pages resolve against it as well.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: SITE_ORIGIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("DENUO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            user_agent: env::var("SCRAPE_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Config pointed at another origin, keeping the other defaults.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_live_site() {
        let config = ScrapeConfig::default();
        assert_eq!(config.base_url, "https://denuo.be");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(ScrapeConfig::with_base_url("http://127.0.0.1:9/").base_url, "http://127.0.0.1:9");
    }
}
