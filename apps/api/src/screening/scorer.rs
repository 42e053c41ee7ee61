//! Vector space similarity between a resume body and a job profile.
//!
//! The two strings are treated as the entire corpus: term weights are
//! tf × idf with smoothed idf over exactly n = 2 documents, compared by
//! cosine. Identical inputs always score identically.

use std::collections::BTreeMap;

use regex::Regex;

/// Word-character runs of length ≥ 2, lowercased.
fn tokenize(text: &str) -> Vec<String> {
    let re = Regex::new(r"\b\w\w+\b").expect("token pattern is valid");
    re.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

fn term_counts(tokens: &[String]) -> BTreeMap<&str, f64> {
    let mut counts: BTreeMap<&str, f64> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Builds the tf-idf weight vectors for the two-document corpus over the
/// union vocabulary. Returns `None` when neither document has a single
/// extractable term, the degenerate case with nothing to compare.
fn tfidf_pair(resume_tokens: &[String], job_tokens: &[String]) -> Option<(Vec<f64>, Vec<f64>)> {
    let resume_counts = term_counts(resume_tokens);
    let job_counts = term_counts(job_tokens);

    let mut vocabulary: Vec<&str> = resume_counts
        .keys()
        .chain(job_counts.keys())
        .copied()
        .collect();
    vocabulary.sort_unstable();
    vocabulary.dedup();

    if vocabulary.is_empty() {
        return None;
    }

    let n_docs = 2.0;
    let mut resume_vec = Vec::with_capacity(vocabulary.len());
    let mut job_vec = Vec::with_capacity(vocabulary.len());

    for term in vocabulary {
        let tf_resume = resume_counts.get(term).copied().unwrap_or(0.0);
        let tf_job = job_counts.get(term).copied().unwrap_or(0.0);

        let df = (tf_resume > 0.0) as u32 + (tf_job > 0.0) as u32;
        // Smoothed idf: ln((1 + n) / (1 + df)) + 1, so df ∈ {1, 2}
        let idf = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;

        resume_vec.push(tf_resume * idf);
        job_vec.push(tf_job * idf);
    }

    Some((resume_vec, job_vec))
}

/// Cosine similarity between two weight vectors.
/// Returns 0.0 for mismatched or zero-norm vectors rather than NaN.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

fn round_two(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Scores a resume body against a job profile, 0–100 with two decimals.
///
/// Empty body text short-circuits to 0 without vectorizing; a degenerate
/// vocabulary (no ≥2-character terms on either side) also yields 0 rather
/// than a numeric error.
pub fn match_percentage(resume_text: &str, job_text: &str) -> f64 {
    if resume_text.trim().is_empty() {
        return 0.0;
    }

    let resume_tokens = tokenize(resume_text);
    let job_tokens = tokenize(job_text);

    match tfidf_pair(&resume_tokens, &job_tokens) {
        Some((resume_vec, job_vec)) => {
            round_two(cosine_similarity(&resume_vec, &job_vec) * 100.0)
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_100() {
        let text = "rust engineer with five years of backend experience";
        assert_eq!(match_percentage(text, text), 100.0);
    }

    #[test]
    fn test_disjoint_texts_score_0() {
        assert_eq!(
            match_percentage("gardening cooking painting", "kubernetes terraform golang"),
            0.0
        );
    }

    #[test]
    fn test_partial_overlap_scores_between() {
        let score = match_percentage(
            "rust python backend services",
            "rust backend engineer wanted",
        );
        assert!(score > 0.0, "score was {score}");
        assert!(score < 100.0, "score was {score}");
    }

    #[test]
    fn test_empty_resume_short_circuits_to_0() {
        assert_eq!(match_percentage("", "any job description"), 0.0);
        assert_eq!(match_percentage("   \n  ", "any job description"), 0.0);
    }

    #[test]
    fn test_empty_job_profile_scores_0() {
        assert_eq!(match_percentage("rust engineer", ""), 0.0);
    }

    #[test]
    fn test_degenerate_input_scores_0_without_panic() {
        // Single-character tokens and punctuation produce no terms at all.
        assert_eq!(match_percentage("a b c !!! ??", "- - -"), 0.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let resume = "Proficient in Rust, Python, SQL. Worked on projects such as a search engine.";
        let job = "Backend engineer: Rust, SQL, distributed systems";
        assert_eq!(match_percentage(resume, job), match_percentage(resume, job));
    }

    #[test]
    fn test_score_is_rounded_to_two_decimals() {
        let score = match_percentage(
            "rust python backend services",
            "rust backend engineer wanted",
        );
        assert!(((score * 100.0).round() - score * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tokenizer_lowercases_and_drops_short_tokens() {
        assert_eq!(tokenize("Rust, a C developer!"), vec!["rust", "developer"]);
    }

    #[test]
    fn test_shared_terms_weigh_less_than_exclusive_ones() {
        // "rust" appears in both documents (df = 2) so its idf is lower
        // than that of a term unique to one side (df = 1).
        let tokens_a = vec!["rust".to_string(), "gardening".to_string()];
        let tokens_b = vec!["rust".to_string()];
        let (vec_a, _) = tfidf_pair(&tokens_a, &tokens_b).unwrap();
        // vocabulary is sorted: ["gardening", "rust"]
        assert!(vec_a[0] > vec_a[1]);
    }

    #[test]
    fn test_cosine_zero_norm_guard() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
