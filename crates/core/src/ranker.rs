use crate::models::{FetchedReference, ScoredMatch};
use crate::traits::SimilarityScorer;

pub const SIMILARITY_THRESHOLD: f64 = 0.2;
pub const MAX_MATCHES: usize = 5;

/// Scores every fetched reference with non-empty text against the query,
/// drops anything at or below the threshold, and returns at most
/// `MAX_MATCHES` results in descending similarity order.
pub fn rank_matches<S: SimilarityScorer>(
    query_text: &str,
    references: &[FetchedReference],
    scorer: &S,
) -> Vec<ScoredMatch> {
    let mut matches = Vec::new();
    for reference in references {
        let reference_text = reference.text();
        if reference_text.trim().is_empty() {
            continue;
        }

        let similarity = scorer.score(query_text, reference_text);
        if similarity > SIMILARITY_THRESHOLD {
            matches.push(ScoredMatch {
                source: reference.source.clone(),
                similarity,
            });
        }
    }

    // stable sort keeps reference-list order for equal similarities
    matches.sort_by(|left, right| right.similarity.total_cmp(&left.similarity));
    matches.truncate(MAX_MATCHES);
    matches
}
