// Resume screening core: extraction, parsing, scoring, ranking.
// Handlers are the only async code here. The pipeline itself is synchronous
// and must run inside tokio::task::spawn_blocking (extraction is blocking
// file I/O, vectorization is CPU-bound).

pub mod document;
pub mod handlers;
pub mod parser;
pub mod predict;
pub mod ranking;
pub mod scorer;

use thiserror::Error;

/// Failures of the per-document pipeline. Every variant is absorbed into a
/// zero score at the document boundary; one malformed resume must never
/// abort the batch it arrived in.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("no scoreable text after parsing")]
    EmptyContent,

    #[error("no extractable terms to vectorize")]
    DegenerateVector,

    #[error("text extraction failed: {0}")]
    Extraction(String),
}
