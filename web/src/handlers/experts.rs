//! Expert listing and detail endpoints.

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use slotwise_core::error::BookingError;
use slotwise_core::expert::{Expert, ExpertPage, ExpertQuery};
use slotwise_core::types::{ExpertCategory, ExpertId};

/// Query string for `GET /api/experts`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive name substring.
    pub search: Option<String>,
    /// Category name, or `All` for no filter.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

/// List experts with optional search, category filter, and pagination.
///
/// Slots are omitted from listing responses; fetch a single expert for
/// its calendar.
///
/// # Endpoint
///
/// ```text
/// GET /api/experts?search=&category=&page=&limit=
/// ```
///
/// # Errors
///
/// - 400 for an unknown category name,
/// - 500 on storage failure.
pub async fn list_experts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> WebResult<Json<ExpertPage>> {
    let category = match params.category.as_deref() {
        None | Some("All" | "all") => None,
        Some(name) => Some(ExpertCategory::parse(name).map_err(AppError::from)?),
    };

    let query = ExpertQuery::new(params.search, category, params.page, params.limit);
    let page = state
        .experts
        .list(&query)
        .await
        .map_err(BookingError::from)?;
    Ok(Json(page))
}

/// Fetch one expert with its full slot calendar.
///
/// # Endpoint
///
/// ```text
/// GET /api/experts/:id
/// ```
///
/// # Errors
///
/// - 404 when the expert does not exist,
/// - 500 on storage failure.
pub async fn get_expert(
    State(state): State<AppState>,
    Path(id): Path<ExpertId>,
) -> WebResult<Json<Expert>> {
    let expert = state
        .experts
        .get(id)
        .await
        .map_err(BookingError::from)?
        .ok_or_else(|| AppError::not_found("Expert", id))?;
    Ok(Json(expert))
}
