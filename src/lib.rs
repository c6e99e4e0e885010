//! icplookup library.
//!
//! Queries the public ICP filing pages at icp.chinaz.com for one or more
//! domains by driving a headless Chromium instance: the query page for a
//! domain links to a detail page via an `href="/home/info..."` pattern, and
//! six labeled fields are scraped from that detail page. Lookups run
//! strictly sequentially with a bounded per-domain retry loop.
//!
//! # Example
//!
//! ```rust,no_run
//! use icplookup::browser::BrowserSession;
//! use icplookup::config::Config;
//! use icplookup::lookup::lookup_with_retry;
//!
//! # async fn run() -> icplookup::Result<()> {
//! let config = Config::default();
//! let session = BrowserSession::launch(&config.browser).await?;
//! let record = lookup_with_retry(&session, "example.com", &config.lookup).await?;
//! println!("{}", record.license);
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod input;
pub mod lookup;
pub mod output;
pub mod scrape;

// Re-export commonly used types for convenience
pub use config::Config;
pub use errors::{ErrorCategory, IcpLookupError, Result};
pub use extract::{find_detail_href, resolve_detail_url};
pub use lookup::lookup_with_retry;
pub use output::{FilingRecord, OutputMode};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
