//! Configuration management for icplookup.
//!
//! The original tool parsed its flags into globals; here every knob lives in
//! an explicit `Config` value that is passed to the pipeline, so the same
//! logic can run with several configurations side by side in tests.
//! Values can come from defaults, environment variables, or command-line
//! arguments, with the CLI taking precedence.

use std::time::Duration;

use crate::cli::Cli;
use crate::errors::{IcpLookupError, Result};

/// Desktop user agent sent with every navigation. The query pages serve
/// different markup to obvious bot agents, so this stays pinned.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Base URL of the ICP query site; relative detail links resolve against it.
pub const DEFAULT_QUERY_BASE: &str = "https://icp.chinaz.com";

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Browser launch settings
    pub browser: BrowserConfig,

    /// Per-domain lookup and retry settings
    pub lookup: LookupConfig,

    /// Output preferences
    pub output: OutputConfig,
}

/// Browser launch settings.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// User agent override for every page
    pub user_agent: String,

    /// Run without a visible window
    pub headless: bool,

    /// Extra Chromium command-line switches
    pub extra_args: Vec<String>,
}

/// Per-domain lookup and retry settings.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Base URL queried as `<query_base>/<domain>`
    pub query_base: String,

    /// Lookup attempts per domain (initial attempt included)
    pub retries: u32,

    /// Flat delay between failed attempts
    pub retry_delay: Duration,

    /// Worst-case wait for the detail page to render its fields
    pub render_wait: Duration,

    /// Interval between readiness polls while waiting for the detail page
    pub poll_interval: Duration,

    /// Verbose diagnostic tracing on stderr
    pub debug: bool,
}

/// Output preferences.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Emit single-line JSON instead of labeled text
    pub json: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            headless: true,
            extra_args: vec![
                "--no-first-run".to_string(),
                "--no-default-browser-check".to_string(),
            ],
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            query_base: DEFAULT_QUERY_BASE.to_string(),
            retries: 3,
            retry_delay: Duration::from_secs(5),
            render_wait: Duration::from_secs(2),
            poll_interval: Duration::from_millis(100),
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secs) = std::env::var("ICPLOOKUP_RETRY_DELAY_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.lookup.retry_delay = Duration::from_secs(secs);
            }
        }

        if let Ok(secs) = std::env::var("ICPLOOKUP_RENDER_WAIT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.lookup.render_wait = Duration::from_secs(secs);
            }
        }

        if let Ok(base) = std::env::var("ICPLOOKUP_QUERY_BASE") {
            config.lookup.query_base = base;
        }

        config
    }

    /// Merge with CLI arguments, giving the CLI precedence.
    pub fn merge_with_cli(&mut self, cli: &Cli) {
        self.lookup.retries = cli.retries;
        self.lookup.debug = cli.is_debug();
        self.output.json = cli.json;
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.lookup.retries == 0 {
            return Err(IcpLookupError::configuration(
                "retries must be at least 1",
            ));
        }

        if self.lookup.render_wait.is_zero() {
            return Err(IcpLookupError::configuration(
                "render wait must be greater than 0",
            ));
        }

        if self.lookup.query_base.is_empty() {
            return Err(IcpLookupError::configuration("query base must not be empty"));
        }

        if self.lookup.poll_interval > self.lookup.render_wait {
            return Err(IcpLookupError::configuration(
                "poll interval must not exceed the render wait budget",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.lookup.retries, 3);
        assert_eq!(config.lookup.retry_delay, Duration::from_secs(5));
        assert_eq!(config.lookup.render_wait, Duration::from_secs(2));
        assert_eq!(config.lookup.query_base, DEFAULT_QUERY_BASE);
        assert!(config.browser.headless);
        assert!(!config.output.json);
        assert!(config
            .browser
            .extra_args
            .iter()
            .any(|a| a == "--no-first-run"));
    }

    #[test]
    fn validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.lookup.retries = 0;
        assert!(config.validate().is_err());

        config.lookup.retries = 3;
        config.lookup.render_wait = Duration::from_secs(0);
        assert!(config.validate().is_err());

        config.lookup.render_wait = Duration::from_millis(50);
        assert!(config.validate().is_err()); // poll interval exceeds budget
    }

    #[test]
    fn env_loading() {
        env::set_var("ICPLOOKUP_RETRY_DELAY_SECS", "1");
        env::set_var("ICPLOOKUP_QUERY_BASE", "http://127.0.0.1:8080");

        let config = Config::from_env();
        assert_eq!(config.lookup.retry_delay, Duration::from_secs(1));
        assert_eq!(config.lookup.query_base, "http://127.0.0.1:8080");

        env::remove_var("ICPLOOKUP_RETRY_DELAY_SECS");
        env::remove_var("ICPLOOKUP_QUERY_BASE");
    }

    #[test]
    fn cli_merge_precedence() {
        use clap::Parser;
        let cli = crate::cli::Cli::try_parse_from(["icplookup", "-r", "7", "--json", "--debug"])
            .unwrap();
        let mut config = Config::default();
        config.merge_with_cli(&cli);
        assert_eq!(config.lookup.retries, 7);
        assert!(config.lookup.debug);
        assert!(config.output.json);
    }
}
