use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse},
    error::Result,
    middleware::auth::issue_token,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Session token issued", body = Json<LoginResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let mut user = state.storage.user().await;
    if let Some(name) = payload.name {
        user.name = name;
        state.storage.save_user(user.clone()).await?;
    }

    let token = issue_token(&user)?;
    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        name: user.name,
    }))
}
