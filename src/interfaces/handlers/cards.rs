use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::entities::card::{
    CardDeletedResponse, CardMutationResponse, Category, NewCardRequest, UpdateCardRequest,
};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CardFilterQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCardQuery {
    pub confirm: Option<bool>,
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>, AppError> {
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Category>())
        .transpose()
}

#[get("")]
#[instrument(skip(state, query))]
pub async fn list_cards(
    state: web::Data<AppState>,
    query: web::Query<CardFilterQuery>,
) -> Result<HttpResponse, AppError> {
    let category = parse_category(query.category.as_deref())?;
    let search = query.search.as_deref().unwrap_or_default();

    let cards = state.card_handler.list_cards(category, search).await?;
    Ok(HttpResponse::Ok().json(cards))
}

#[post("")]
#[instrument(skip(state, request))]
pub async fn add_card(
    state: web::Data<AppState>,
    request: web::Json<NewCardRequest>,
) -> Result<HttpResponse, AppError> {
    let mutation = state.card_handler.add_card(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(CardMutationResponse {
        warning: mutation.write.warning(),
        card: mutation.card,
    }))
}

/// Serializes the live collection into the seed-list literal. Pasting the
/// content over the built-in seed makes the current state the new default.
#[get("/export")]
#[instrument(skip(state))]
pub async fn export_cards(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let export = state.card_handler.export_seed().await?;
    Ok(HttpResponse::Ok().json(export))
}

#[get("/{id}")]
#[instrument(skip(state))]
pub async fn get_card(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let card = state.card_handler.get_card(&id).await?;
    Ok(HttpResponse::Ok().json(card))
}

#[patch("/{id}")]
#[instrument(skip(state, request))]
pub async fn update_card(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCardRequest>,
) -> Result<HttpResponse, AppError> {
    let mutation = state
        .card_handler
        .update_card(&id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(CardMutationResponse {
        warning: mutation.write.warning(),
        card: mutation.card,
    }))
}

#[delete("/{id}")]
#[instrument(skip(state, query))]
pub async fn delete_card(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<DeleteCardQuery>,
) -> Result<HttpResponse, AppError> {
    let confirmed = query.confirm.unwrap_or(false);
    let write = state.card_handler.delete_card(&id, confirmed).await?;

    Ok(HttpResponse::Ok().json(CardDeletedResponse {
        deleted: id.into_inner(),
        warning: write.warning(),
    }))
}
