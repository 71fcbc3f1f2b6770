use async_trait::async_trait;

use crate::models::{FetchedReference, ReferenceSource};

#[async_trait]
pub trait ReferenceFetcher {
    /// One entry per source, in the given order. Failures ride inside the
    /// entry outcome; this call itself never fails.
    async fn fetch_all(&self, sources: &[ReferenceSource]) -> Vec<FetchedReference>;
}

pub trait SimilarityScorer {
    fn score(&self, query: &str, reference: &str) -> f64;
}
