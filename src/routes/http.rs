//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::Paper;
use crate::logic;
use crate::protocol::*;
use crate::state::{AppState, StoreError};

fn not_found(paper_id: &str) -> (StatusCode, Json<ErrorOut>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorOut { message: format!("Unknown paperId: {paper_id}"), current_version: None }),
    )
}

fn store_error(err: StoreError) -> (StatusCode, Json<ErrorOut>) {
    match err {
        StoreError::UnknownPaper(id) => not_found(&id),
        StoreError::VersionConflict { current } => (
            StatusCode::CONFLICT,
            Json(ErrorOut {
                message: "This paper was edited elsewhere; reload before saving.".into(),
                current_version: Some(current),
            }),
        ),
    }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_papers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let papers: Vec<PaperSummaryOut> = state
        .list_papers()
        .await
        .into_iter()
        .map(|(id, name, version)| PaperSummaryOut { id, name, version })
        .collect();
    Json(papers)
}

#[instrument(level = "info", skip(state), fields(%q.paper_id))]
pub async fn http_get_paper(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PaperQuery>,
) -> Result<Json<PaperOut>, (StatusCode, Json<ErrorOut>)> {
    let paper = state.get_paper(&q.paper_id).await.ok_or_else(|| not_found(&q.paper_id))?;
    let version = state.version(&q.paper_id).await.unwrap_or(1);
    info!(target: "paper", id = %q.paper_id, %version, "HTTP paper view served");
    Ok(Json(logic::paper_view(&paper, version)))
}

#[instrument(level = "info", skip(state), fields(%q.paper_id))]
pub async fn http_get_answer_key(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PaperQuery>,
) -> Result<Json<PaperKeyOut>, (StatusCode, Json<ErrorOut>)> {
    let paper = state.get_paper(&q.paper_id).await.ok_or_else(|| not_found(&q.paper_id))?;
    info!(target: "paper", id = %q.paper_id, "HTTP answer key served");
    Ok(Json(logic::answer_key(&paper)))
}

#[instrument(level = "info", skip(state), fields(%q.paper_id))]
pub async fn http_get_version(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PaperQuery>,
) -> Result<Json<VersionOut>, (StatusCode, Json<ErrorOut>)> {
    let version = state.version(&q.paper_id).await.ok_or_else(|| not_found(&q.paper_id))?;
    Ok(Json(VersionOut { version }))
}

#[instrument(
    level = "info",
    skip(state, body),
    fields(paper_id = ?body.paper_id, sections = body.sections.len(), base = ?body.base_version)
)]
pub async fn http_save_paper(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveIn>,
) -> Result<Json<SaveOut>, (StatusCode, Json<ErrorOut>)> {
    let paper_id = body.paper_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let paper = Paper { id: paper_id.clone(), name: body.name, sections: body.sections };
    let version = state
        .save_paper(paper, body.base_version)
        .await
        .map_err(store_error)?;
    info!(target: "paper", id = %paper_id, %version, "HTTP paper saved");
    Ok(Json(SaveOut { paper_id, version }))
}

#[instrument(
    level = "info",
    skip(state, body),
    fields(%body.paper_id, %body.section_id, local_no = body.local_no, answer_len = body.text.len())
)]
pub async fn http_post_answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, (StatusCode, Json<ErrorOut>)> {
    state
        .record_answer(&body.paper_id, &body.section_id, body.local_no, &body.text)
        .await
        .map_err(store_error)?;
    Ok(Json(AnswerOut { ok: true }))
}

#[instrument(level = "info", skip(state), fields(%q.paper_id))]
pub async fn http_post_grade(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PaperQuery>,
) -> Result<Json<GradeOut>, (StatusCode, Json<ErrorOut>)> {
    let (paper, record) = state.grade_paper(&q.paper_id).await.map_err(store_error)?;
    info!(
        target: "paper",
        id = %q.paper_id,
        total = record.total_score,
        perfect = record.perfect_score,
        "HTTP grade computed"
    );
    Ok(Json(logic::grade_view(&paper, &record)))
}
