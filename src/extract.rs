//! Link extraction and field normalization.
//!
//! The query page for a registered domain contains a relative link to its
//! detail page, `href="/home/info?host=..."`. That markup is an implicit,
//! versionless contract with the upstream site: when it changes, extraction
//! must fail loudly with `LinkNotFound` rather than misbehave silently.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::errors::{IcpLookupError, Result};

/// First `href` beginning with `/home/info` anywhere in the markup.
static DETAIL_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="(/home/info[^"]+)""#).unwrap());

/// Selectors of the six fields on the detail page, in output order.
pub const FIELD_SELECTORS: [&str; 6] = [
    "td#license",
    "td#verifyTime",
    "td#comName",
    "td#typ",
    "td#permit",
    "td#host",
];

/// Find the relative detail-page link in rendered query-page markup.
pub fn find_detail_href(html: &str) -> Option<&str> {
    DETAIL_HREF_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve a captured relative href against the query base URL.
pub fn resolve_detail_url(base: &str, href: &str) -> Result<Url> {
    let base = Url::parse(base).map_err(|e| IcpLookupError::invalid_detail_url(base, e))?;
    base.join(href)
        .map_err(|e| IcpLookupError::invalid_detail_url(href, e))
}

/// Raw text scraped from the six detail-page fields, pre-trim.
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    pub license: String,
    pub verify_time: String,
    pub com_name: String,
    pub typ: String,
    pub permit: String,
    pub host: String,
}

impl RawFields {
    /// Whitespace-trim every field in place.
    pub fn trimmed(self) -> Self {
        Self {
            license: self.license.trim().to_string(),
            verify_time: self.verify_time.trim().to_string(),
            com_name: self.com_name.trim().to_string(),
            typ: self.typ.trim().to_string(),
            permit: self.permit.trim().to_string(),
            host: self.host.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_detail_href() {
        let html = r#"<html><body>
            <a href="/about">about</a>
            <a href="/home/info?host=ZXhhbXBsZS5jb20=">detail</a>
            <a href="/home/info?host=b3RoZXI=">other</a>
        </body></html>"#;
        assert_eq!(
            find_detail_href(html),
            Some("/home/info?host=ZXhhbXBsZS5jb20=")
        );
    }

    #[test]
    fn no_match_on_unrelated_markup() {
        let html = r#"<html><a href="/search?q=x">x</a><p>/home/info</p></html>"#;
        assert_eq!(find_detail_href(html), None);
    }

    #[test]
    fn no_match_on_empty_markup() {
        assert_eq!(find_detail_href(""), None);
    }

    #[test]
    fn resolves_relative_href_against_base() {
        let url = resolve_detail_url(
            "https://icp.chinaz.com",
            "/home/info?host=ZXhhbXBsZS5jb20=",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://icp.chinaz.com/home/info?host=ZXhhbXBsZS5jb20="
        );
    }

    #[test]
    fn invalid_base_is_an_extraction_error() {
        let err = resolve_detail_url("not a url", "/home/info?host=x").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn trims_whitespace_including_cjk_content() {
        let fields = RawFields {
            com_name: "  北京某某公司  ".to_string(),
            license: "\n京ICP备00000000号-1\t".to_string(),
            ..Default::default()
        };
        let trimmed = fields.trimmed();
        assert_eq!(trimmed.com_name, "北京某某公司");
        assert_eq!(trimmed.license, "京ICP备00000000号-1");
        assert_eq!(trimmed.host, "");
    }
}
