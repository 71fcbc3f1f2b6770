use tracing::debug;

use crate::error::CheckError;
use crate::extractor::extract_document_text;
use crate::models::{Document, OverlapReport};
use crate::ranker::rank_matches;
use crate::scoring::TfIdfScorer;
use crate::sources::ReferenceList;
use crate::traits::ReferenceFetcher;

pub struct OverlapChecker<F>
where
    F: ReferenceFetcher,
{
    fetcher: F,
    references: ReferenceList,
    scorer: TfIdfScorer,
}

impl<F> OverlapChecker<F>
where
    F: ReferenceFetcher + Send + Sync,
{
    pub fn new(fetcher: F, references: ReferenceList) -> Result<Self, CheckError> {
        Ok(Self {
            fetcher,
            references,
            scorer: TfIdfScorer::new()?,
        })
    }

    /// Runs one full check: format gate, extraction, reference fetch,
    /// ranking, report assembly. Per-source fetch failures never fail the
    /// check; unsupported formats and empty documents do, before any network
    /// work happens.
    pub async fn check_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<OverlapReport, CheckError> {
        let document = Document::from_bytes(file_name, bytes)?;

        let query_text = extract_document_text(&document)?;
        if query_text.trim().is_empty() {
            return Err(CheckError::EmptyDocument);
        }
        debug!(
            file = document.file_name(),
            chars = query_text.len(),
            "query text extracted"
        );

        let fetched = self.fetcher.fetch_all(self.references.sources()).await;
        let matches = rank_matches(&query_text, &fetched, &self.scorer);

        Ok(OverlapReport::new(&query_text, matches))
    }
}
