//! Per-document scoring pipeline: extract → parse → vectorize.

use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::screening::document::extract_text;
use crate::screening::parser::{
    extract_candidate_name, extract_relevant_sections, UNKNOWN_CANDIDATE,
};
use crate::screening::scorer::match_percentage;

/// Outcome of scoring one stored document against a job profile.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub candidate_name: String,
    pub match_percentage: f64,
}

/// Runs the full pipeline for one document.
///
/// Never fails: unsupported formats, broken files, and empty bodies all
/// degrade to a zero score so a single bad resume cannot abort its batch.
/// Deterministic for identical file bytes and job profile.
pub fn predict(path: &Path, job_profile: &str) -> Prediction {
    let text = match extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Scoring {} as zero: {e}", path.display());
            return Prediction {
                candidate_name: UNKNOWN_CANDIDATE.to_string(),
                match_percentage: 0.0,
            };
        }
    };

    let candidate_name = extract_candidate_name(&text);

    let body = extract_relevant_sections(&text);
    if body.is_empty() {
        warn!("No scoreable content in {}", path.display());
        return Prediction {
            candidate_name,
            match_percentage: 0.0,
        };
    }

    Prediction {
        match_percentage: match_percentage(&body, job_profile),
        candidate_name,
    }
}
