//! Shared headless browser session.
//!
//! One Chromium instance is launched per run and reused for every domain.
//! Isolation between lookups is explicit: each attempt runs in a fresh page
//! that is closed when the attempt ends, so cookies and DOM state from one
//! domain never bleed into the next. The CDP event handler is driven by a
//! background tokio task for the lifetime of the session.

use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::BrowserConfig;
use crate::errors::{IcpLookupError, Result};

/// A long-lived automated browser context shared across all lookups.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium with the configured flags and user agent override.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .arg(format!("--user-agent={}", config.user_agent));

        for arg in &config.extra_args {
            builder = builder.arg(arg.clone());
        }

        if !config.headless {
            builder = builder.with_head();
        }

        let chromium_config = builder
            .build()
            .map_err(IcpLookupError::configuration)?;

        let (browser, mut handler) = Browser::launch(chromium_config)
            .await
            .map_err(IcpLookupError::browser_launch)?;

        // The handler must be polled for the CDP connection to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a fresh, empty page for a single lookup attempt.
    pub async fn open_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| IcpLookupError::navigation("open page", "about:blank", e))
    }

    /// Close the browser and stop the handler task.
    pub async fn shutdown(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| IcpLookupError::navigation("close browser", "-", e))?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}
