//! Batch ranking, cutoff filtering, and cutoff suggestion.
//!
//! Runs after the whole batch has been scored. Pure computation, no I/O.

use serde::{Deserialize, Serialize};

/// One scored resume. Immutable once created; `filename` and `file_link`
/// point back at the stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_name: String,
    pub filename: String,
    pub match_percentage: f64,
    pub file_link: String,
}

/// Caller-supplied shortlist constraints for one ranking pass.
#[derive(Debug, Clone, Copy)]
pub struct SelectionCriteria {
    /// Minimum match percentage for a candidate to be shortlisted.
    pub cutoff_percentage: f64,
    /// Maximum shortlist size; 0 means unlimited.
    pub required_candidates: usize,
}

/// Why a cutoff suggestion was attached to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionReason {
    /// Nobody scored at or above the requested cutoff.
    NoneAboveCutoff,
    /// Some candidates passed the cutoff, but fewer than requested.
    FewerThanRequired,
}

/// Decision-ready shortlist for one screening request.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistResult {
    /// Cutoff-filtered, count-capped projection of the batch,
    /// descending by score.
    pub selected: Vec<CandidateRecord>,
    /// Batch size before filtering.
    pub total_processed: usize,
    /// A cutoff that would satisfy the request, when the shortlist falls
    /// short of it. Floor of an observed score, so applying it is
    /// guaranteed to admit the corresponding candidate.
    pub suggested_cutoff: Option<f64>,
    pub suggestion_reason: Option<SuggestionReason>,
}

/// Ranks a scored batch into a shortlist.
///
/// Algorithm:
/// 1. Stable sort descending by score; ties keep upload order
/// 2. Keep candidates scoring at or above the cutoff
/// 3. Cap at `required_candidates` when non-zero
/// 4. Attach a cutoff suggestion if the request was not satisfied
pub fn rank(batch: &[CandidateRecord], criteria: &SelectionCriteria) -> ShortlistResult {
    let mut sorted = batch.to_vec();
    sorted.sort_by(|a, b| {
        b.match_percentage
            .partial_cmp(&a.match_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut selected: Vec<CandidateRecord> = sorted
        .iter()
        .filter(|c| c.match_percentage >= criteria.cutoff_percentage)
        .cloned()
        .collect();
    if criteria.required_candidates > 0 {
        selected.truncate(criteria.required_candidates);
    }

    let (suggested_cutoff, suggestion_reason) = suggest_cutoff(&sorted, selected.len(), criteria);

    ShortlistResult {
        selected,
        total_processed: batch.len(),
        suggested_cutoff,
        suggestion_reason,
    }
}

/// Suggests a workable cutoff from the full sorted batch when the shortlist
/// does not satisfy the request. An empty batch suggests nothing.
fn suggest_cutoff(
    sorted: &[CandidateRecord],
    selected_len: usize,
    criteria: &SelectionCriteria,
) -> (Option<f64>, Option<SuggestionReason>) {
    if sorted.is_empty() {
        return (None, None);
    }

    if selected_len == 0 {
        let top = sorted[0].match_percentage.floor();
        return (Some(top), Some(SuggestionReason::NoneAboveCutoff));
    }

    if criteria.required_candidates > 0 && selected_len < criteria.required_candidates {
        // Score at rank `required_candidates` (1-indexed) when the batch is
        // deep enough, else the lowest-scoring candidate overall.
        let idx = if sorted.len() >= criteria.required_candidates {
            criteria.required_candidates - 1
        } else {
            sorted.len() - 1
        };
        let at_rank = sorted[idx].match_percentage.floor();
        return (Some(at_rank), Some(SuggestionReason::FewerThanRequired));
    }

    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: f64) -> CandidateRecord {
        CandidateRecord {
            candidate_name: name.to_string(),
            filename: format!("{name}.pdf"),
            match_percentage: score,
            file_link: format!("/api/v1/resumes/{name}.pdf"),
        }
    }

    fn batch_80_50_20() -> Vec<CandidateRecord> {
        vec![record("mid", 50.0), record("top", 80.0), record("low", 20.0)]
    }

    #[test]
    fn test_selected_is_sorted_descending() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 0.0,
                required_candidates: 0,
            },
        );
        let scores: Vec<f64> = result
            .selected
            .iter()
            .map(|c| c.match_percentage)
            .collect();
        assert_eq!(scores, vec![80.0, 50.0, 20.0]);
    }

    #[test]
    fn test_total_processed_is_batch_size_before_filtering() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 60.0,
                required_candidates: 0,
            },
        );
        assert_eq!(result.total_processed, 3);
        assert_eq!(result.selected.len(), 1);
    }

    #[test]
    fn test_selected_never_exceeds_batch() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 0.0,
                required_candidates: 10,
            },
        );
        assert!(result.selected.len() <= 3);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 50.0,
                required_candidates: 0,
            },
        );
        assert_eq!(result.selected.len(), 2);
    }

    #[test]
    fn test_required_count_caps_shortlist() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 0.0,
                required_candidates: 1,
            },
        );
        assert_eq!(result.selected.len(), 1);
        assert_eq!(result.selected[0].candidate_name, "top");
    }

    #[test]
    fn test_ties_keep_upload_order() {
        let batch = vec![record("first", 50.0), record("second", 50.0)];
        let result = rank(
            &batch,
            &SelectionCriteria {
                cutoff_percentage: 0.0,
                required_candidates: 0,
            },
        );
        assert_eq!(result.selected[0].candidate_name, "first");
        assert_eq!(result.selected[1].candidate_name, "second");
    }

    #[test]
    fn test_nobody_passes_suggests_top_score_floor() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 90.0,
                required_candidates: 0,
            },
        );
        assert!(result.selected.is_empty());
        assert_eq!(result.suggested_cutoff, Some(80.0));
        assert_eq!(
            result.suggestion_reason,
            Some(SuggestionReason::NoneAboveCutoff)
        );
    }

    #[test]
    fn test_exact_required_count_available_no_suggestion() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 10.0,
                required_candidates: 3,
            },
        );
        assert_eq!(result.selected.len(), 3);
        assert_eq!(result.suggested_cutoff, None);
        assert_eq!(result.suggestion_reason, None);
    }

    #[test]
    fn test_required_exceeds_batch_suggests_lowest_score() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 10.0,
                required_candidates: 5,
            },
        );
        assert_eq!(result.selected.len(), 3);
        assert_eq!(result.suggested_cutoff, Some(20.0));
        assert_eq!(
            result.suggestion_reason,
            Some(SuggestionReason::FewerThanRequired)
        );
    }

    #[test]
    fn test_partial_shortfall_suggests_score_at_required_rank() {
        // Cutoff admits only the top candidate; rank 2 in the full batch
        // scores 50, so a cutoff of 50 would satisfy required_candidates=2.
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 60.0,
                required_candidates: 2,
            },
        );
        assert_eq!(result.selected.len(), 1);
        assert_eq!(result.suggested_cutoff, Some(50.0));
        assert_eq!(
            result.suggestion_reason,
            Some(SuggestionReason::FewerThanRequired)
        );
    }

    #[test]
    fn test_suggestion_floors_fractional_scores() {
        let batch = vec![record("only", 79.62)];
        let result = rank(
            &batch,
            &SelectionCriteria {
                cutoff_percentage: 90.0,
                required_candidates: 0,
            },
        );
        assert_eq!(result.suggested_cutoff, Some(79.0));
    }

    #[test]
    fn test_empty_batch_yields_empty_result_without_suggestion() {
        let result = rank(
            &[],
            &SelectionCriteria {
                cutoff_percentage: 50.0,
                required_candidates: 5,
            },
        );
        assert!(result.selected.is_empty());
        assert_eq!(result.total_processed, 0);
        assert_eq!(result.suggested_cutoff, None);
        assert_eq!(result.suggestion_reason, None);
    }

    #[test]
    fn test_satisfied_unlimited_request_has_no_suggestion() {
        let result = rank(
            &batch_80_50_20(),
            &SelectionCriteria {
                cutoff_percentage: 40.0,
                required_candidates: 0,
            },
        );
        assert_eq!(result.selected.len(), 2);
        assert_eq!(result.suggested_cutoff, None);
    }
}
