//! Per-attempt page pipeline.
//!
//! One attempt for one domain: navigate to the query page, pull the rendered
//! markup, locate and resolve the detail link, navigate to the detail page,
//! wait for it to render, then read the six filing fields. Any failure along
//! the way aborts the attempt and is handed to the retry driver.

use chromiumoxide::Page;
use tokio::time::{sleep, Instant};

use crate::config::LookupConfig;
use crate::errors::{IcpLookupError, Result};
use crate::extract::{find_detail_href, resolve_detail_url, RawFields, FIELD_SELECTORS};
use crate::output::FilingRecord;

/// Run the full scrape pipeline for one domain on a fresh page.
pub async fn scrape_domain(page: &Page, domain: &str, config: &LookupConfig) -> Result<FilingRecord> {
    let query_url = format!("{}/{}", config.query_base.trim_end_matches('/'), domain);

    if config.debug {
        eprintln!("[{domain}] navigating to query page {query_url}");
    }
    navigate(page, &query_url).await?;

    let markup = page
        .content()
        .await
        .map_err(|e| IcpLookupError::navigation("read markup", &query_url, e))?;
    if config.debug {
        eprintln!("[{domain}] query page markup: {} bytes", markup.len());
    }

    let href = find_detail_href(&markup)
        .ok_or_else(|| IcpLookupError::link_not_found(domain))?;
    let detail_url = resolve_detail_url(&config.query_base, href)?;
    if config.debug {
        eprintln!("[{domain}] detail page resolved to {detail_url}");
    }

    navigate(page, detail_url.as_str()).await?;

    // The detail page fills its fields client-side. Poll for the first field
    // instead of sleeping blindly; the budget caps the worst-case wait at the
    // same two seconds the flat sleep used to take. If the element never
    // shows up, the field read below reports which selector was missing.
    if !wait_for_selector(page, FIELD_SELECTORS[0], config).await && config.debug {
        eprintln!(
            "[{domain}] detail page not ready after {:?}, reading anyway",
            config.render_wait
        );
    }

    let fields = read_filing_fields(page).await?;
    Ok(FilingRecord::from_fields(domain, &query_url, fields))
}

async fn navigate(page: &Page, url: &str) -> Result<()> {
    page.goto(url)
        .await
        .map_err(|e| IcpLookupError::navigation("navigate", url, e))?;
    page.wait_for_navigation()
        .await
        .map_err(|e| IcpLookupError::navigation("wait for navigation", url, e))?;
    Ok(())
}

/// Poll for `selector` until it appears or the render budget runs out.
/// Returns whether the element was seen.
async fn wait_for_selector(page: &Page, selector: &str, config: &LookupConfig) -> bool {
    let deadline = Instant::now() + config.render_wait;
    loop {
        if page.find_element(selector).await.is_ok() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        sleep(config.poll_interval).await;
    }
}

/// Read the text of all six filing fields. A single missing element fails
/// the whole attempt.
async fn read_filing_fields(page: &Page) -> Result<RawFields> {
    let mut values = Vec::with_capacity(FIELD_SELECTORS.len());
    for selector in FIELD_SELECTORS {
        values.push(read_text(page, selector).await?);
    }

    let mut values = values.into_iter();
    Ok(RawFields {
        license: values.next().unwrap_or_default(),
        verify_time: values.next().unwrap_or_default(),
        com_name: values.next().unwrap_or_default(),
        typ: values.next().unwrap_or_default(),
        permit: values.next().unwrap_or_default(),
        host: values.next().unwrap_or_default(),
    })
}

async fn read_text(page: &Page, selector: &str) -> Result<String> {
    let element = page
        .find_element(selector)
        .await
        .map_err(|_| IcpLookupError::missing_field(selector))?;
    let text = element
        .inner_text()
        .await
        .map_err(|_| IcpLookupError::missing_field(selector))?;
    Ok(text.unwrap_or_default())
}
