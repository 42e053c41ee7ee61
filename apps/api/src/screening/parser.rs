//! Heuristic structural parsing of extracted resume text.
//!
//! Two independent passes over the same plain text: a best-effort candidate
//! name scan (not NER) and the section capture that produces the text the
//! scorer actually sees.

use regex::Regex;

/// Sentinel returned when no line of the document qualifies as a name.
pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

/// Header tokens that disqualify a line from being the candidate's name.
const NAME_HEADER_DENYLIST: &[&str] = &[
    "resume",
    "cv",
    "curriculum vitae",
    "name:",
    "contact",
    "email",
    "phone",
];

/// Section keys with their header synonyms, in capture order.
const SKILLS_SYNONYMS: &[&str] = &["technical skills", "skills", "technologies"];
const PROJECTS_SYNONYMS: &[&str] = &["projects", "work samples", "portfolio"];
const EXPERIENCE_SYNONYMS: &[&str] = &["experience", "work experience", "employment history"];

/// Scans the text for the first line that plausibly is the candidate's
/// display name.
///
/// A line qualifies when, after stripping everything but letters, digits,
/// and whitespace: it has 1–4 words, contains no digits, and is longer than
/// 2 characters. Lines carrying a denylisted header token are skipped.
/// Returns the title-cased line, or `UNKNOWN_CANDIDATE` when nothing in the
/// whole document qualifies.
pub fn extract_candidate_name(text: &str) -> String {
    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if NAME_HEADER_DENYLIST.iter().any(|skip| lower.contains(skip)) {
            continue;
        }

        let cleaned: String = line
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        let cleaned = cleaned.trim();

        let word_count = cleaned.split_whitespace().count();
        let has_digit = cleaned.chars().any(|c| c.is_numeric());

        if (1..=4).contains(&word_count) && !has_digit && cleaned.chars().count() > 2 {
            return title_case(cleaned);
        }
    }

    UNKNOWN_CANDIDATE.to_string()
}

/// Extracts the semantically relevant body used for scoring.
///
/// Captures the Technical Skills / Projects / Experience sections and
/// synthesizes a summary sentence per non-empty capture, in fixed order.
/// When no section matches, falls back to the first 500 characters of the
/// raw text.
pub fn extract_relevant_sections(text: &str) -> String {
    let experience = capture_section(text, EXPERIENCE_SYNONYMS);
    let skills = capture_section(text, SKILLS_SYNONYMS);
    let projects = capture_section(text, PROJECTS_SYNONYMS);

    let mut summary = String::new();
    if let Some(experience) = &experience {
        summary.push_str(&format!("Experienced professional with {experience}. "));
    }
    if let Some(skills) = &skills {
        summary.push_str(&format!("Proficient in {skills}. "));
    }
    if let Some(projects) = &projects {
        summary.push_str(&format!("Worked on projects such as {projects}. "));
    }

    if summary.trim().is_empty() {
        summary = text.chars().take(500).collect();
    }

    summary.trim().to_string()
}

/// Finds a section header (any synonym, case-insensitive) followed by a
/// colon and captures everything up to a blank-line run or end of text,
/// with internal newlines collapsed to spaces. Returns `None` when the
/// section is absent or its body is empty.
fn capture_section(text: &str, synonyms: &[&str]) -> Option<String> {
    let pattern = format!(r"(?is)(?:{})\s*:\s*(.*?)(?:\n{{2,}}|\z)", synonyms.join("|"));
    let re = Regex::new(&pattern).expect("section pattern is valid");

    let body = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().replace('\n', " "))?;

    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// Uppercases the first letter of each whitespace-separated word and
/// lowercases the rest, preserving the original whitespace.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
