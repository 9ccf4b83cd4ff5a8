//! Handler for the static fixture-category reference data.

use axum::response::IntoResponse;
use axum::Json;
use waterline_core::category::{CategoryInfo, ALL_CATEGORIES};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// GET /api/v1/categories
///
/// The fixed category enumeration with display metadata (icon, color).
pub async fn list_categories(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    let categories: Vec<CategoryInfo> = ALL_CATEGORIES
        .iter()
        .copied()
        .map(CategoryInfo::from)
        .collect();

    Ok(Json(DataResponse { data: categories }))
}
