use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::deck_dto::{
        CardResponse, CreateCardPayload, CreateDeckPayload, DeckListResponse, DeckResponse,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/decks",
    responses(
        (status = 200, description = "List of decks", body = Json<DeckListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_decks(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let decks = state.deck_service.list().await;
    Ok(Json(DeckListResponse {
        decks: decks.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/decks",
    request_body = CreateDeckPayload,
    responses(
        (status = 201, description = "Deck created successfully", body = Json<DeckResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_deck(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeckPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let deck = state.deck_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(DeckResponse::from(deck))))
}

#[utoipa::path(
    get,
    path = "/api/decks/{id}",
    params(
        ("id" = Uuid, Path, description = "Deck ID")
    ),
    responses(
        (status = 200, description = "Deck found", body = Json<DeckResponse>),
        (status = 404, description = "Deck not found")
    )
)]
#[axum::debug_handler]
pub async fn get_deck(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let deck = state.deck_service.get(id).await?;
    Ok(Json(DeckResponse::from(deck)))
}

#[utoipa::path(
    delete,
    path = "/api/decks/{id}",
    params(
        ("id" = Uuid, Path, description = "Deck ID")
    ),
    responses(
        (status = 204, description = "Deck deleted successfully"),
        (status = 404, description = "Deck not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_deck(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.deck_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/decks/{id}/cards",
    params(
        ("id" = Uuid, Path, description = "Deck ID")
    ),
    request_body = CreateCardPayload,
    responses(
        (status = 201, description = "Card added to the deck", body = Json<CardResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Deck not found")
    )
)]
#[axum::debug_handler]
pub async fn add_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateCardPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let card = state.deck_service.add_card(id, payload).await?;
    Ok((StatusCode::CREATED, Json(CardResponse::from(card))))
}

#[utoipa::path(
    delete,
    path = "/api/cards/{id}",
    params(
        ("id" = Uuid, Path, description = "Card ID")
    ),
    responses(
        (status = 204, description = "Card deleted successfully"),
        (status = 404, description = "Card not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.deck_service.delete_card(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
