//! Special Deal API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{SpecialDeal, SpecialDealCreate, SpecialDealUpdate};

use crate::core::ServerState;
use crate::db::repository::deal;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, now_ms, ok, ok_with_message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidDealsQuery {
    /// When given, only deals this order amount qualifies for, best first
    pub amount: Option<f64>,
}

/// GET /api/special-deals/valid?amount= - currently-valid deals
pub async fn list_valid(
    State(state): State<ServerState>,
    Query(query): Query<ValidDealsQuery>,
) -> AppResult<Json<ApiResponse<Vec<SpecialDeal>>>> {
    let now = now_ms();
    let deals = match query.amount {
        Some(amount) => deal::find_valid_for_amount(&state.pool, now, amount).await?,
        None => deal::find_valid(&state.pool, now).await?,
    };
    Ok(ok(deals))
}

/// GET /api/special-deals - every deal (admin surface)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<SpecialDeal>>>> {
    let deals = deal::find_all(&state.pool, true).await?;
    Ok(ok(deals))
}

/// GET /api/special-deals/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<SpecialDeal>>> {
    let found = deal::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Deal {id} not found")))?;
    Ok(ok(found))
}

/// POST /api/special-deals
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SpecialDealCreate>,
) -> AppResult<Json<ApiResponse<SpecialDeal>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let created = deal::create(&state.pool, payload).await?;
    Ok(ok_with_message(created, "Deal created"))
}

/// PUT /api/special-deals/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SpecialDealUpdate>,
) -> AppResult<Json<ApiResponse<SpecialDeal>>> {
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(ref description) = payload.description {
        validate_required_text(description, "description", MAX_NOTE_LEN)?;
    }
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let updated = deal::update(&state.pool, id, payload).await?;
    Ok(ok(updated))
}

/// PATCH /api/special-deals/:id/toggle
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<SpecialDeal>>> {
    let toggled = deal::toggle(&state.pool, id).await?;
    Ok(ok(toggled))
}

/// DELETE /api/special-deals/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = deal::delete(&state.pool, id).await?;
    Ok(ok_with_message(deleted, "Deal deleted"))
}
