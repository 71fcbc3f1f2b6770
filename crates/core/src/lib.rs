pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod orchestrator;
pub mod ranker;
pub mod scoring;
pub mod sources;
pub mod traits;

pub use error::{CheckError, ExtractError, FetchFailure};
pub use extractor::{extract_docx_text, extract_document_text, extract_pdf_text, html_paragraph_text};
pub use fetcher::{
    FetchOptions, HttpReferenceFetcher, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONCURRENT,
};
pub use models::{
    Document, DocumentFormat, FetchedReference, OverlapReport, ReferenceSource, ScoredMatch,
    EXCERPT_CHARS, EXCERPT_MARKER,
};
pub use orchestrator::OverlapChecker;
pub use ranker::{rank_matches, MAX_MATCHES, SIMILARITY_THRESHOLD};
pub use scoring::TfIdfScorer;
pub use sources::ReferenceList;
pub use traits::{ReferenceFetcher, SimilarityScorer};
