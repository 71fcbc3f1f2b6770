use std::collections::BTreeMap;

use regex::Regex;

use crate::error::CheckError;
use crate::traits::SimilarityScorer;

// Word-character runs of length >= 2, matched on the lowercased text.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

pub struct TfIdfScorer {
    token: Regex,
}

impl TfIdfScorer {
    pub fn new() -> Result<Self, CheckError> {
        Ok(Self {
            token: Regex::new(TOKEN_PATTERN)?,
        })
    }

    fn term_counts(&self, text: &str) -> BTreeMap<String, f64> {
        let lowered = text.to_lowercase();
        let mut counts = BTreeMap::new();
        for token in self.token.find_iter(&lowered) {
            *counts.entry(token.as_str().to_string()).or_insert(0.0) += 1.0;
        }
        counts
    }
}

impl SimilarityScorer for TfIdfScorer {
    /// Cosine similarity over a tf-idf space fit on exactly the two texts.
    /// Each call is its own closed two-document corpus; nothing is shared
    /// across pairs.
    fn score(&self, query: &str, reference: &str) -> f64 {
        let query_counts = self.term_counts(query);
        let reference_counts = self.term_counts(reference);
        if query_counts.is_empty() || reference_counts.is_empty() {
            return 0.0;
        }

        let mut dot = 0.0;
        let mut query_norm = 0.0;
        for (term, count) in &query_counts {
            match reference_counts.get(term) {
                Some(reference_count) => {
                    let idf = smoothed_idf(2);
                    let weight = count * idf;
                    query_norm += weight * weight;
                    dot += weight * reference_count * idf;
                }
                None => {
                    let weight = count * smoothed_idf(1);
                    query_norm += weight * weight;
                }
            }
        }

        let mut reference_norm = 0.0;
        for (term, count) in &reference_counts {
            let document_frequency = if query_counts.contains_key(term) { 2 } else { 1 };
            let weight = count * smoothed_idf(document_frequency);
            reference_norm += weight * weight;
        }

        let denominator = query_norm.sqrt() * reference_norm.sqrt();
        if denominator <= f64::EPSILON {
            return 0.0;
        }

        (dot / denominator).clamp(0.0, 1.0)
    }
}

// Smoothed idf over the two-document corpus: ln((1 + 2) / (1 + df)) + 1.
fn smoothed_idf(document_frequency: u32) -> f64 {
    ((1.0 + 2.0) / (1.0 + f64::from(document_frequency))).ln() + 1.0
}
