//! Handlers for the `/ai` diagnostic endpoints.
//!
//! Each endpoint assembles a Korean-language prompt from persisted state and
//! sends it to the configured LLM endpoint. When no endpoint is configured
//! (`AI_API_URL` unset) the handlers answer 503 rather than failing deep in
//! the request.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use moim_core::error::CoreError;
use moim_core::priority::priority_label;
use moim_core::types::DbId;
use moim_db::repositories::{GoalRepo, ProjectRepo, TaskRepo, UserRepo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ai::DiagnosticClient;
use crate::error::{AppError, AppResult};
use crate::handlers::rollup;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /ai/project`.
#[derive(Debug, Deserialize)]
pub struct ProjectDiagnosisRequest {
    pub project_id: DbId,
}

/// Request body for `POST /ai/member`.
#[derive(Debug, Deserialize)]
pub struct MemberDiagnosisRequest {
    pub user_id: DbId,
}

/// Diagnostic report returned by both endpoints.
#[derive(Debug, Serialize)]
pub struct DiagnosisResponse {
    pub report: String,
}

/// POST /api/v1/ai/project
///
/// Project health diagnosis: status, roll-up, deadlines, and per-goal
/// progress go into the prompt.
pub async fn diagnose_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ProjectDiagnosisRequest>,
) -> AppResult<Json<DiagnosisResponse>> {
    let client = require_client(&state)?;

    let project = ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "project",
                id: input.project_id,
            })
        })?;

    let goals = GoalRepo::list_by_project(&state.pool, project.id).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, project.id).await?;
    let children = rollup::project_children(&state.pool, project.id).await?;
    let summary = moim_core::progress::summarize(&children);
    let dday = moim_core::dday::format_dday(Utc::now().date_naive(), project.deadline);

    let mut prompt = format!(
        "다음 프로젝트의 진행 상황을 진단하고, 위험 요소와 개선 방안을 한국어로 제시해 주세요.\n\n\
         프로젝트: {} ({})\n상태: {} / 전체 진행률 {}% / 마감 {}\n목표 {}개, 할일 {}개\n\n목표별 현황:\n",
        project.name,
        project.code,
        project.status,
        summary.progress_percentage,
        dday,
        goals.len(),
        tasks.len(),
    );
    for goal in &goals {
        let goal_tasks = tasks.iter().filter(|t| t.goal_id == Some(goal.id)).count();
        prompt.push_str(&format!(
            "- {} [{}] 할일 {}개\n",
            goal.title, goal.status, goal_tasks
        ));
    }

    let report = client
        .diagnose(&prompt)
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("Diagnosis failed: {e}")))?;

    Ok(Json(DiagnosisResponse { report }))
}

/// POST /api/v1/ai/member
///
/// Member workload diagnosis: every live task assigned to the user goes
/// into the prompt with status, priority, and deadline.
pub async fn diagnose_member(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<MemberDiagnosisRequest>,
) -> AppResult<Json<DiagnosisResponse>> {
    let client = require_client(&state)?;

    let member = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "user",
                id: input.user_id,
            })
        })?;

    // Assigned live tasks across all projects.
    let projects = ProjectRepo::list(&state.pool).await?;
    let mut assigned = Vec::new();
    for project in &projects {
        let tasks = TaskRepo::list_by_project(&state.pool, project.id).await?;
        assigned.extend(
            tasks
                .into_iter()
                .filter(|t| t.assignee_ids.contains(&member.id)),
        );
    }

    let today = Utc::now().date_naive();
    let mut prompt = format!(
        "팀원 {}의 업무 부하와 진행 상황을 진단하고, 조정이 필요한 부분을 한국어로 제시해 주세요.\n\n\
         담당 할일 {}개:\n",
        member.name,
        assigned.len(),
    );
    for task in &assigned {
        prompt.push_str(&format!(
            "- {} [{}] 진행률 {}% / 우선순위 {} / 마감 {}\n",
            task.title,
            task.status,
            task.progress,
            priority_label(task.priority.as_deref()),
            moim_core::dday::format_dday(today, task.deadline),
        ));
    }

    let report = client
        .diagnose(&prompt)
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("Diagnosis failed: {e}")))?;

    Ok(Json(DiagnosisResponse { report }))
}

/// The configured LLM client, or 503 when diagnostics are not set up.
fn require_client(state: &AppState) -> AppResult<Arc<DiagnosticClient>> {
    state.diagnostics.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("AI diagnostics are not configured".into())
    })
}
