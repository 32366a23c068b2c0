//! Axum route handlers for CV analysis and project generation.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::document::extract_document_text;
use crate::errors::AppError;
use crate::generation::generator::{produce_briefs, ProjectsOutcome};
use crate::skills::analysis::{analyze_cv_text, AnalysisStatus, SkillAnalysis};
use crate::skills::gaps::find_gaps;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateProjectsRequest {
    pub cv_skills: Vec<String>,
    /// Computed from the market list when omitted.
    #[serde(default)]
    pub gaps: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CvProjectsResponse {
    pub analysis: SkillAnalysis,
    /// Absent when the analysis found no skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<ProjectsOutcome>,
}

struct Upload {
    data: Bytes,
    content_type: Option<String>,
    filename: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/analyze
///
/// Multipart upload (field `file`). Returns extracted skills, the market list
/// and the gaps between them.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SkillAnalysis>, AppError> {
    let text = read_cv_text(multipart).await?;
    Ok(Json(analyze_cv_text(&text, &state.reference)))
}

/// POST /api/v1/projects/generate
///
/// Generates briefs for skills the caller already knows. Always returns a
/// displayable batch; `source` says whether the model or the fallback made it.
pub async fn handle_generate_projects(
    State(state): State<AppState>,
    payload: Result<Json<GenerateProjectsRequest>, JsonRejection>,
) -> Result<Json<ProjectsOutcome>, AppError> {
    let Json(request) = payload?;
    if request.cv_skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation("cv_skills cannot be empty".to_string()));
    }

    let gaps = request
        .gaps
        .unwrap_or_else(|| find_gaps(&request.cv_skills, &state.reference.market_skills));

    let outcome = produce_briefs(
        state.completer.as_ref(),
        state.config.llm.call_budget(),
        &request.cv_skills,
        &gaps,
        &state.reference.job_context(),
    )
    .await;

    Ok(Json(outcome))
}

/// POST /api/v1/projects
///
/// Full pipeline: upload → text → skills → gaps → briefs.
pub async fn handle_cv_projects(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CvProjectsResponse>, AppError> {
    let text = read_cv_text(multipart).await?;
    let analysis = analyze_cv_text(&text, &state.reference);

    if analysis.status == AnalysisStatus::NoSkills {
        return Ok(Json(CvProjectsResponse {
            analysis,
            projects: None,
        }));
    }

    let projects = produce_briefs(
        state.completer.as_ref(),
        state.config.llm.call_budget(),
        &analysis.cv_skills,
        &analysis.gaps,
        &state.reference.job_context(),
    )
    .await;

    Ok(Json(CvProjectsResponse {
        analysis,
        projects: Some(projects),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await?;
        return Ok(Upload {
            data,
            content_type,
            filename,
        });
    }
    Err(AppError::Validation(
        "Upload must include a 'file' field".to_string(),
    ))
}

/// Reads the uploaded CV and extracts its text off the async runtime.
async fn read_cv_text(multipart: Multipart) -> Result<String, AppError> {
    let upload = read_upload(multipart).await?;
    if upload.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    tokio::task::spawn_blocking(move || {
        extract_document_text(
            &upload.data,
            upload.content_type.as_deref(),
            upload.filename.as_deref(),
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Document extraction task failed: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
