use axum::{
    extract::{Extension, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Identity;
use crate::config;
use crate::database::models::CashCard;
use crate::error::ApiError;
use crate::paging::{PageQuery, PageRequest};
use crate::services::cards::CardService;
use crate::services::AppState;

/// Inbound card payload. Only the amount is honored; client-supplied id and
/// owner fields fall away as unknown keys during deserialization.
#[derive(Debug, Deserialize)]
pub struct CardBody {
    pub amount: Decimal,
}

/// GET /cashcards/:id - fetch a single card owned by the caller
pub async fn card_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<CashCard>, ApiError> {
    let service = CardService::new(state.store.clone());

    match service.find_card(&identity, id).await? {
        Some(card) => Ok(Json(card)),
        None => Err(ApiError::not_found()),
    }
}

/// GET /cashcards?page&size&sort - page through the caller's cards
pub async fn card_list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<CashCard>>, ApiError> {
    let page = PageRequest::from_query(&query, &config::config().paging)?;

    let service = CardService::new(state.store.clone());
    let page = service.list_cards(&identity, &page).await?;

    Ok(Json(page.records))
}

/// POST /cashcards - create a card owned by the caller
pub async fn card_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CardBody>,
) -> Result<impl IntoResponse, ApiError> {
    let service = CardService::new(state.store.clone());
    let card = service.create_card(&identity, body.amount).await?;

    let location = format!("/cashcards/{}", card.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// PUT /cashcards/:id - full replace of a card the caller owns
pub async fn card_put(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CardBody>,
) -> Result<StatusCode, ApiError> {
    let service = CardService::new(state.store.clone());

    match service.update_card(&identity, id, body.amount).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::not_found()),
    }
}

/// DELETE /cashcards/:id - remove a card the caller owns
pub async fn card_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(identity): Extension<Identity>,
) -> Result<StatusCode, ApiError> {
    let service = CardService::new(state.store.clone());

    if service.delete_card(&identity, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found())
    }
}
