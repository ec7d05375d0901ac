//! Structured response parser: pulls the keyword/ad-group list out of free-form
//! model output.
//!
//! Three stages, each with its own failure kind so callers can tell the user
//! which one broke:
//! 1. locate the bracketed payload (`ParseFailure::Extraction`)
//! 2. decode it as a JSON list of objects (`ParseFailure::Decode`)
//! 3. check every object has a non-empty "Keyword" and "Ad Group" (`ParseFailure::Schema`)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A keyword paired with the ad group the model assigned it to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub ad_group: String,
}

impl KeywordRecord {
    pub fn new(keyword: impl Into<String>, ad_group: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ad_group: ad_group.into(),
        }
    }

    /// Selection label, e.g. "sports psychologist (Mental Coaching)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.keyword, self.ad_group)
    }
}

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("no bracketed list found in model output")]
    Extraction,

    #[error("bracketed payload is not a valid list of records: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(
        "{rejected} record(s) missing a required field; record {first_index} has no usable \"{field}\""
    )]
    Schema {
        first_index: usize,
        field: &'static str,
        rejected: usize,
        /// Records that did pass validation, in payload order.
        accepted: Vec<KeywordRecord>,
    },
}

impl ParseFailure {
    /// Stable machine-readable code for the failing stage.
    pub fn code(&self) -> &'static str {
        match self {
            ParseFailure::Extraction => "EXTRACTION_FAILURE",
            ParseFailure::Decode(_) => "DECODE_FAILURE",
            ParseFailure::Schema { .. } => "SCHEMA_FAILURE",
        }
    }
}

pub const KEYWORD_FIELD: &str = "Keyword";
pub const AD_GROUP_FIELD: &str = "Ad Group";

/// Wire shape the model is asked to produce. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Keyword", default)]
    keyword: Option<Value>,
    #[serde(rename = "Ad Group", default)]
    ad_group: Option<Value>,
}

/// Parses the keyword/ad-group list embedded in `raw_text`.
pub fn parse_keyword_records(raw_text: &str) -> Result<Vec<KeywordRecord>, ParseFailure> {
    let payload = outer_bracket_span(raw_text).ok_or(ParseFailure::Extraction)?;

    let decoded = match serde_json::from_str::<Vec<RawRecord>>(payload) {
        Ok(records) => records,
        // Prose around the list may itself contain brackets ("[15] keywords");
        // fall back to balanced spans before giving up.
        Err(e) => decode_balanced_span(raw_text).ok_or(ParseFailure::Decode(e))?,
    };

    validate_records(decoded)
}

/// First `[` through last `]`, inclusive.
fn outer_bracket_span(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if start > end {
        return None;
    }
    Some(&raw[start..=end])
}

/// First balanced span that decodes to a non-empty record list. Empty spans
/// (`[]`, markdown `[ ]` checkboxes) never count as the payload.
fn decode_balanced_span(raw: &str) -> Option<Vec<RawRecord>> {
    raw.match_indices('[').find_map(|(start, _)| {
        let end = matching_bracket(raw.as_bytes(), start)?;
        serde_json::from_str::<Vec<RawRecord>>(&raw[start..=end])
            .ok()
            .filter(|records| !records.is_empty())
    })
}

/// Index of the `]` closing the `[` at `start`, skipping brackets inside JSON strings.
fn matching_bracket(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn validate_records(raw: Vec<RawRecord>) -> Result<Vec<KeywordRecord>, ParseFailure> {
    let mut accepted = Vec::with_capacity(raw.len());
    let mut first_problem: Option<(usize, &'static str)> = None;
    let mut rejected = 0;

    for (index, record) in raw.into_iter().enumerate() {
        let keyword = required_text(record.keyword);
        let ad_group = required_text(record.ad_group);
        match (keyword, ad_group) {
            (Some(keyword), Some(ad_group)) => accepted.push(KeywordRecord::new(keyword, ad_group)),
            (keyword, _) => {
                rejected += 1;
                let field = if keyword.is_none() {
                    KEYWORD_FIELD
                } else {
                    AD_GROUP_FIELD
                };
                first_problem.get_or_insert((index, field));
            }
        }
    }

    match first_problem {
        None => Ok(accepted),
        Some((first_index, field)) => Err(ParseFailure::Schema {
            first_index,
            field,
            rejected,
            accepted,
        }),
    }
}

/// A field counts only if it is a string with visible content.
fn required_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}
