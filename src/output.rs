//! Result rendering.
//!
//! A successful lookup produces one `FilingRecord`, serialized immediately as
//! either a single-line JSON object or eight labeled text lines. Errors never
//! reach stdout; they go to the diagnostic stream.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::extract::RawFields;

/// The outcome of one successful domain lookup. All fields are free-form
/// trimmed text; no numeric or temporal parsing is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Domain as supplied by the operator
    pub input: String,

    /// Query page URL that was navigated
    pub query_url: String,

    /// ICP filing / license number
    pub license: String,

    /// Date the filing passed review
    pub verify_time: String,

    /// Name of the sponsoring organization
    pub com_name: String,

    /// Nature of the sponsoring organization
    pub typ: String,

    /// Permit number
    pub permit: String,

    /// Registered host domain
    pub host: String,
}

/// Output mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl FilingRecord {
    /// Assemble a record from trimmed detail-page fields.
    pub fn from_fields(input: &str, query_url: &str, fields: RawFields) -> Self {
        let fields = fields.trimmed();
        Self {
            input: input.to_string(),
            query_url: query_url.to_string(),
            license: fields.license,
            verify_time: fields.verify_time,
            com_name: fields.com_name,
            typ: fields.typ,
            permit: fields.permit,
            host: fields.host,
        }
    }

    /// Render the record in the selected mode, without a trailing newline.
    pub fn render(&self, mode: OutputMode) -> Result<String> {
        match mode {
            OutputMode::Json => Ok(serde_json::to_string(self)?),
            OutputMode::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        // Labels mirror the upstream site's field names; `license` and
        // `permit` share one label there.
        format!(
            "Input: {}\n\
             Query URL: {}\n\
             ICP备案/许可证号: {}\n\
             审核通过日期: {}\n\
             主办单位名称: {}\n\
             主办单位性质: {}\n\
             ICP备案/许可证号: {}\n\
             网站域名: {}",
            self.input,
            self.query_url,
            self.license,
            self.verify_time,
            self.com_name,
            self.typ,
            self.permit,
            self.host
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FilingRecord {
        FilingRecord {
            input: "example.com".to_string(),
            query_url: "https://icp.chinaz.com/example.com".to_string(),
            license: "京ICP备00000000号".to_string(),
            verify_time: "2023-01-01".to_string(),
            com_name: "北京某某公司".to_string(),
            typ: "企业".to_string(),
            permit: "京ICP备00000000号-1".to_string(),
            host: "example.com".to_string(),
        }
    }

    #[test]
    fn json_has_exactly_the_eight_documented_keys() {
        let rendered = sample().render(OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "com_name",
                "host",
                "input",
                "license",
                "permit",
                "query_url",
                "typ",
                "verify_time"
            ]
        );
    }

    #[test]
    fn json_is_a_single_line() {
        let rendered = sample().render(OutputMode::Json).unwrap();
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn json_round_trips() {
        let record = sample();
        let rendered = record.render(OutputMode::Json).unwrap();
        let parsed: FilingRecord = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn text_mode_prints_eight_labeled_lines() {
        let rendered = sample().render(OutputMode::Text).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Input: example.com");
        assert_eq!(lines[1], "Query URL: https://icp.chinaz.com/example.com");
        assert_eq!(lines[4], "主办单位名称: 北京某某公司");
        assert_eq!(lines[7], "网站域名: example.com");
    }

    #[test]
    fn from_fields_trims_before_storing() {
        let fields = crate::extract::RawFields {
            com_name: "  北京某某公司  ".to_string(),
            ..Default::default()
        };
        let record = FilingRecord::from_fields("example.com", "https://q", fields);
        assert_eq!(record.com_name, "北京某某公司");
    }
}
