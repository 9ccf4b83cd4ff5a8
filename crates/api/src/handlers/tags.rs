//! Handlers for household tags.
//!
//! Tags refine fixture categories and are referenced by events by value
//! (category + name). Creating a duplicate (household, category, name)
//! is rejected with CONFLICT before any write. Updating or deleting a
//! tag deletes the events that carried the old value, in the same
//! transaction as the tag mutation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use waterline_core::category::Category;
use waterline_core::error::CoreError;
use waterline_core::types::DbId;
use waterline_db::models::tag::{CreateTag, TagListParams, UpdateTag};
use waterline_db::repositories::{EventRepo, TagRepo};
use waterline_db::unit_of_work;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::membership::require_member;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/households/{id}/tags
///
/// Create a tag. Duplicates of (household, category, name) are rejected
/// with CONFLICT and perform no write.
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let category = validate_category(&input.category)?;
    let name = validate_tag_name(&input.name)?;

    if TagRepo::find_exact(&state.pool, household_id, category.as_str(), &name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Tag '{name}' already exists for category '{category}'"
        ))));
    }

    let tag = TagRepo::create(&state.pool, household_id, category.as_str(), &name).await?;

    tracing::info!(
        household_id,
        tag_id = tag.id,
        user_id = auth.user_id,
        "Tag created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /api/v1/households/{id}/tags
///
/// List a household's tags, optionally filtered by category
/// (`?category=washer`).
pub async fn list_tags(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Query(params): Query<TagListParams>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let category = match &params.category {
        Some(raw) => Some(validate_category(raw)?),
        None => None,
    };

    let tags = TagRepo::list(
        &state.pool,
        household_id,
        category.as_ref().map(|c| c.as_str()),
    )
    .await?;

    Ok(Json(DataResponse { data: tags }))
}

/// PUT /api/v1/households/{id}/tags/{tag_id}
///
/// Update a tag's category and/or name. Events that carried the old
/// (category, name) value are deleted in the same transaction -- their
/// tag assignment no longer describes them. A failure in either step
/// rolls back both.
pub async fn update_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((household_id, tag_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTag>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let existing = TagRepo::find_by_id(&state.pool, household_id, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }))?;

    let new_category = match &input.category {
        Some(raw) => validate_category(raw)?.as_str().to_string(),
        None => existing.category.clone(),
    };
    let new_name = match &input.name {
        Some(raw) => validate_tag_name(raw)?,
        None => existing.name.clone(),
    };

    let value_changed = new_category != existing.category || new_name != existing.name;

    if value_changed
        && TagRepo::find_exact(&state.pool, household_id, &new_category, &new_name)
            .await?
            .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Tag '{new_name}' already exists for category '{new_category}'"
        ))));
    }

    let old_category = existing.category.clone();
    let old_name = existing.name.clone();
    let (tag, cascaded) = unit_of_work::execute(&state.pool, |tx| {
        Box::pin(async move {
            let tag = TagRepo::update_in_tx(
                tx,
                tag_id,
                Some(new_category.as_str()),
                Some(new_name.as_str()),
            )
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Tag",
                id: tag_id,
            }))?;

            let cascaded = if value_changed {
                EventRepo::delete_by_tag_in_tx(tx, household_id, &old_category, &old_name).await?
            } else {
                0
            };
            Ok::<_, AppError>((tag, cascaded))
        })
    })
    .await?;

    tracing::info!(
        household_id,
        tag_id,
        cascaded_events = cascaded,
        user_id = auth.user_id,
        "Tag updated",
    );

    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/households/{id}/tags/{tag_id}
///
/// Delete a tag and the events that carried it, in one transaction.
pub async fn delete_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((household_id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let existing = TagRepo::find_by_id(&state.pool, household_id, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }))?;

    let category = existing.category.clone();
    let name = existing.name.clone();
    let cascaded = unit_of_work::execute(&state.pool, |tx| {
        Box::pin(async move {
            let cascaded =
                EventRepo::delete_by_tag_in_tx(tx, household_id, &category, &name).await?;
            let deleted = TagRepo::delete_in_tx(tx, tag_id).await?;
            if !deleted {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Tag",
                    id: tag_id,
                }));
            }
            Ok::<_, AppError>(cascaded)
        })
    })
    .await?;

    tracing::info!(
        household_id,
        tag_id,
        cascaded_events = cascaded,
        user_id = auth.user_id,
        "Tag deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_category(raw: &str) -> AppResult<Category> {
    Category::parse(raw).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "'{raw}' is not a valid category"
        )))
    })
}

fn validate_tag_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "tag name must not be empty".into(),
        )));
    }
    Ok(name.to_string())
}
