use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CheckError, FetchFailure};

pub const EXCERPT_CHARS: usize = 500;
pub const EXCERPT_MARKER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Exact, case-sensitive suffix match; anything else is unsupported.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if file_name.ends_with(".docx") {
            Some(Self::Docx)
        } else {
            None
        }
    }
}

/// A submitted document: raw bytes plus the format tag derived from its file
/// name. Construction is the only place an unsupported format can be caught,
/// so extractors never see one.
#[derive(Debug, Clone)]
pub struct Document {
    file_name: String,
    format: DocumentFormat,
    bytes: Vec<u8>,
}

impl Document {
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Self, CheckError> {
        let format = DocumentFormat::from_file_name(file_name)
            .ok_or_else(|| CheckError::UnsupportedFormat(file_name.to_string()))?;

        Ok(Self {
            file_name: file_name.to_string(),
            format,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSource(pub String);

impl ReferenceSource {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferenceSource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for ReferenceSource {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ReferenceSource {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One reference retrieval result: either the extracted page text or the
/// tagged reason it failed. Downstream consumers read a failure as empty text.
#[derive(Debug, Clone)]
pub struct FetchedReference {
    pub source: ReferenceSource,
    pub outcome: Result<String, FetchFailure>,
}

impl FetchedReference {
    pub fn ok(source: ReferenceSource, text: impl Into<String>) -> Self {
        Self {
            source,
            outcome: Ok(text.into()),
        }
    }

    pub fn failed(source: ReferenceSource, failure: FetchFailure) -> Self {
        Self {
            source,
            outcome: Err(failure),
        }
    }

    pub fn text(&self) -> &str {
        match &self.outcome {
            Ok(text) => text,
            Err(_) => "",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredMatch {
    pub source: ReferenceSource,
    /// Unit-interval similarity; serialized as a 0-100 percent, 2 decimals.
    #[serde(serialize_with = "unit_similarity_as_percent")]
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlapReport {
    #[serde(serialize_with = "rounded_percent")]
    pub overall_percent: f64,
    pub matches: Vec<ScoredMatch>,
    pub excerpt: String,
}

impl OverlapReport {
    pub fn new(query_text: &str, matches: Vec<ScoredMatch>) -> Self {
        let best = matches
            .iter()
            .map(|matched| matched.similarity)
            .fold(0.0f64, f64::max);

        Self {
            overall_percent: best * 100.0,
            matches,
            excerpt: excerpt_of(query_text),
        }
    }
}

// The marker is appended even when nothing was cut; consumers depend on its
// presence.
fn excerpt_of(text: &str) -> String {
    let prefix: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{prefix}{EXCERPT_MARKER}")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn unit_similarity_as_percent<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round2(value * 100.0))
}

fn rounded_percent<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round2(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_comes_from_exact_file_suffix() {
        assert_eq!(
            DocumentFormat::from_file_name("thesis.pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_file_name("essay.docx"),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(DocumentFormat::from_file_name("notes.txt"), None);
        assert_eq!(DocumentFormat::from_file_name("archive.docx.zip"), None);
        assert_eq!(DocumentFormat::from_file_name("REPORT.PDF"), None);
        assert_eq!(DocumentFormat::from_file_name("no_suffix"), None);
    }

    #[test]
    fn document_rejects_unsupported_file_names() {
        let error = Document::from_bytes("notes.txt", b"plain".to_vec()).unwrap_err();
        assert!(matches!(error, CheckError::UnsupportedFormat(name) if name == "notes.txt"));
    }

    #[test]
    fn fetched_reference_reads_failure_as_empty_text() {
        let ok = FetchedReference::ok("https://a.example".into(), "body text");
        assert_eq!(ok.text(), "body text");

        let failed = FetchedReference::failed("https://b.example".into(), FetchFailure::Timeout);
        assert_eq!(failed.text(), "");
    }

    #[test]
    fn excerpt_is_a_bounded_prefix_with_marker() {
        let long = "x".repeat(620);
        let report = OverlapReport::new(&long, Vec::new());
        assert_eq!(report.excerpt.chars().count(), EXCERPT_CHARS + 3);
        assert!(report.excerpt.ends_with(EXCERPT_MARKER));
        assert!(report.excerpt.starts_with("xxx"));
    }

    #[test]
    fn excerpt_marker_is_appended_even_without_truncation() {
        let report = OverlapReport::new("short text", Vec::new());
        assert_eq!(report.excerpt, "short text...");
    }

    #[test]
    fn overall_percent_is_the_best_retained_similarity() {
        let matches = vec![
            ScoredMatch {
                source: "https://a.example".into(),
                similarity: 0.31,
            },
            ScoredMatch {
                source: "https://b.example".into(),
                similarity: 0.87,
            },
            ScoredMatch {
                source: "https://c.example".into(),
                similarity: 0.44,
            },
        ];

        let report = OverlapReport::new("query", matches);
        assert!((report.overall_percent - 87.0).abs() < 1e-9);
    }

    #[test]
    fn overall_percent_is_zero_without_matches() {
        let report = OverlapReport::new("query", Vec::new());
        assert_eq!(report.overall_percent, 0.0);
    }

    #[test]
    fn report_serializes_percents_rounded_to_two_decimals() {
        let report = OverlapReport::new(
            "short text",
            vec![ScoredMatch {
                source: "https://a.example".into(),
                similarity: 1.0 / 3.0,
            }],
        );

        let value = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(value["overall_percent"], serde_json::json!(33.33));
        assert_eq!(value["matches"][0]["source"], serde_json::json!("https://a.example"));
        assert_eq!(value["matches"][0]["similarity"], serde_json::json!(33.33));
        assert_eq!(value["excerpt"], serde_json::json!("short text..."));
    }
}
