use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::entities::card::Category;
use crate::entities::view::DashboardView;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// The dashboard opens on the sights tab, like the original UI.
const DEFAULT_TAB: Category = Category::Sights;

#[get("")]
#[instrument(skip(state, query))]
pub async fn dashboard(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let category = match query.category.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => raw.parse()?,
        None => DEFAULT_TAB,
    };
    let search = query.search.as_deref().unwrap_or_default();

    let cards = state.card_handler.list_cards(Some(category), search).await?;
    let view = DashboardView::build(category, search, &cards);

    Ok(HttpResponse::Ok().json(view))
}
