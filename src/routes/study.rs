use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::study_dto::{ProgressReport, RecordStudyPayload, StudySessionResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/study/{deck_id}",
    params(
        ("deck_id" = Uuid, Path, description = "Deck ID")
    ),
    request_body = RecordStudyPayload,
    responses(
        (status = 200, description = "Study results recorded", body = Json<StudySessionResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Deck not found")
    )
)]
#[axum::debug_handler]
pub async fn record_study_results(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<RecordStudyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .deck_service
        .record_study_results(deck_id, &payload.results)
        .await?;
    Ok(Json(StudySessionResponse {
        cards_studied: payload.results.len(),
        overall_accuracy: user.overall_accuracy(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/progress",
    responses(
        (status = 200, description = "User progress statistics", body = Json<ProgressReport>)
    )
)]
#[axum::debug_handler]
pub async fn get_progress(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let report = state.deck_service.progress().await?;
    Ok(Json(report))
}
