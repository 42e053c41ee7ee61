//! HTTP collaborators around the screening core: batch upload + scoring,
//! and stored-resume retrieval. No algorithmic content here: handlers only
//! move bytes and call into the pipeline.

use axum::{
    body::Bytes,
    extract::{multipart::Field, Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::screening::document::DocumentKind;
use crate::screening::predict::predict;
use crate::screening::ranking::{rank, CandidateRecord, SelectionCriteria, SuggestionReason};
use crate::state::AppState;

/// Extensions accepted for upload. Everything else is skipped, not rejected,
/// so one stray file never fails a whole batch request.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

const NO_MATCH_MESSAGE: &str = "No Candidate meets the Cut-Off Percentage";

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub candidates: Vec<CandidateRecord>,
    pub total_processed: usize,
    pub cutoff_percentage: f64,
    pub required_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_cutoff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_reason: Option<SuggestionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/v1/screenings
///
/// Multipart form: repeated `files` parts plus `job_description` (required),
/// `roles_responsibilities`, `skills_requirement`, `cutoff_percentage`,
/// `required_candidates`.
pub async fn handle_screen(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let mut files: Vec<(String, Bytes)> = Vec::new();
    let mut job_description = String::new();
    let mut roles_responsibilities = String::new();
    let mut skills_requirement = String::new();
    let mut cutoff_percentage = 0.0_f64;
    let mut required_candidates = 0_usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {e}"))
                })?;
                files.push((filename, data));
            }
            "job_description" => job_description = text_field(field).await?,
            "roles_responsibilities" => roles_responsibilities = text_field(field).await?,
            "skills_requirement" => skills_requirement = text_field(field).await?,
            "cutoff_percentage" => {
                let raw = text_field(field).await?;
                if !raw.trim().is_empty() {
                    cutoff_percentage = raw.trim().parse().map_err(|_| {
                        AppError::Validation("cutoff_percentage must be a number".to_string())
                    })?;
                }
            }
            "required_candidates" => {
                let raw = text_field(field).await?;
                if !raw.trim().is_empty() {
                    required_candidates = raw.trim().parse().map_err(|_| {
                        AppError::Validation(
                            "required_candidates must be a non-negative integer".to_string(),
                        )
                    })?;
                }
            }
            _ => {}
        }
    }

    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }

    // The job profile is one opaque query string for the scorer.
    let job_profile =
        format!("{job_description} {roles_responsibilities} {skills_requirement}")
            .trim()
            .to_string();

    // Persist valid uploads, then score them concurrently: each document's
    // pipeline is independent, synchronous, and blocking.
    let mut tasks = Vec::new();
    for (original_name, data) in files {
        if original_name.is_empty() || !has_allowed_extension(&original_name) {
            continue;
        }

        let filename = sanitize_filename(&original_name);
        let path = state.config.upload_dir.join(&filename);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to store {filename}: {e}")))?;

        let job = job_profile.clone();
        let task = tokio::task::spawn_blocking(move || predict(&path, &job));
        tasks.push((filename, task));
    }

    if tasks.is_empty() {
        return Err(AppError::Validation("No valid resume files found".to_string()));
    }

    // Await in upload order so ranking ties stay deterministic.
    let mut batch = Vec::with_capacity(tasks.len());
    for (filename, task) in tasks {
        let prediction = task
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))?;
        batch.push(CandidateRecord {
            candidate_name: prediction.candidate_name,
            file_link: format!("/api/v1/resumes/{filename}"),
            filename,
            match_percentage: prediction.match_percentage,
        });
    }

    let criteria = SelectionCriteria {
        cutoff_percentage,
        required_candidates,
    };
    let shortlist = rank(&batch, &criteria);
    info!(
        "Screened {} resumes, shortlisted {}",
        shortlist.total_processed,
        shortlist.selected.len()
    );

    let message = shortlist
        .selected
        .is_empty()
        .then(|| NO_MATCH_MESSAGE.to_string());

    Ok(Json(ScreeningResponse {
        candidates: shortlist.selected,
        total_processed: shortlist.total_processed,
        cutoff_percentage,
        required_candidates,
        suggested_cutoff: shortlist.suggested_cutoff,
        suggestion_reason: shortlist.suggestion_reason,
        message,
    }))
}

/// GET /api/v1/resumes/:filename
/// Serves a stored upload back for review.
pub async fn handle_view_resume(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let sanitized = sanitize_filename(&filename);
    let path = state.config.upload_dir.join(&sanitized);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Resume {sanitized} not found")))
        }
        Err(e) => return Err(AppError::Internal(anyhow::anyhow!(e))),
    };

    let content_type = match DocumentKind::from_path(std::path::Path::new(&sanitized)) {
        DocumentKind::Pdf => "application/pdf",
        DocumentKind::Word => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        DocumentKind::Unsupported => "application/octet-stream",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

async fn text_field(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))
}

/// Keeps only the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` with underscores.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
