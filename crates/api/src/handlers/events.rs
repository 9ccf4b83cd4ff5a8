//! Handlers for household usage events.
//!
//! Events are produced by the sensor ingestion pipeline and listed with
//! cursor pagination for infinite-scroll clients. Users re-categorize
//! events by assigning or clearing a tag; the dashboard counters for
//! leaks and unclassified usage are exposed as dedicated count routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use waterline_core::category::Category;
use waterline_core::error::CoreError;
use waterline_core::types::DbId;
use waterline_db::models::event::{CreateEvent, EventCursor, EventPage, RetagEvent};
use waterline_db::repositories::{EventRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::membership::require_member;
use crate::query::CursorParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/households/{id}/events
///
/// One page of the household's events, newest first by default
/// (`?order=asc` flips it). Pass the returned `next_cursor` back as
/// `?cursor=` to fetch the following page.
pub async fn list_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Query(params): Query<CursorParams>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let cursor = match &params.cursor {
        Some(raw) => Some(EventCursor::decode(raw).ok_or_else(|| {
            AppError::BadRequest("Malformed pagination cursor".into())
        })?),
        None => None,
    };

    let requested = params
        .limit
        .unwrap_or(EventRepo::DEFAULT_PAGE_LIMIT)
        .clamp(1, EventRepo::MAX_PAGE_LIMIT);
    let events = EventRepo::list_page(
        &state.pool,
        household_id,
        Some(requested),
        cursor.as_ref(),
        params.order,
    )
    .await?;

    // A full page may have more behind it; a short page is the end.
    let next_cursor = if events.len() as i64 == requested {
        events.last().map(|event| {
            EventCursor {
                start_timestamp: event.start_timestamp,
                id: event.id,
            }
            .encode()
        })
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: EventPage {
            events,
            next_cursor,
        },
    }))
}

/// POST /api/v1/households/{id}/events
///
/// Ingest a usage event. Normally called by the sensor pipeline; also
/// used to log manual entries.
pub async fn create_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let category = validate_category(&input.category)?;
    if input.end_timestamp < input.start_timestamp {
        return Err(AppError::Core(CoreError::Validation(
            "end_timestamp must not precede start_timestamp".into(),
        )));
    }
    if input.duration_in_seconds < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "duration_in_seconds must not be negative".into(),
        )));
    }
    if input.consumption_in_liters < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "consumption_in_liters must not be negative".into(),
        )));
    }
    if let Some(tag_name) = &input.tag_name {
        require_tag(&state, household_id, category, tag_name).await?;
    }

    let event = EventRepo::create(&state.pool, household_id, &input).await?;

    tracing::info!(
        household_id,
        event_id = event.id,
        category = %event.category,
        "Event ingested",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PATCH /api/v1/households/{id}/events/{event_id}/tag
///
/// Assign or clear an event's tag. The tag must exist for the event's
/// category in this household.
pub async fn retag_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((household_id, event_id)): Path<(DbId, DbId)>,
    Json(input): Json<RetagEvent>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let event = EventRepo::find_by_id(&state.pool, household_id, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;

    if let Some(tag_name) = &input.tag_name {
        let category = validate_category(&event.category)?;
        require_tag(&state, household_id, category, tag_name).await?;
    }

    let updated = EventRepo::set_tag(
        &state.pool,
        household_id,
        event_id,
        input.tag_name.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Event",
        id: event_id,
    }))?;

    tracing::info!(
        household_id,
        event_id,
        user_id = auth.user_id,
        "Event re-categorized",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/households/{id}/events/leak-count
///
/// Number of detected leak events in the household.
pub async fn leak_count(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let count =
        EventRepo::count_by_category(&state.pool, household_id, Category::Leak.as_str()).await?;

    Ok(Json(DataResponse { data: count }))
}

/// GET /api/v1/households/{id}/events/unknown-count
///
/// Number of events the classifier could not attribute to a fixture.
pub async fn unknown_count(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let count =
        EventRepo::count_by_category(&state.pool, household_id, Category::Unknown.as_str()).await?;

    Ok(Json(DataResponse { data: count }))
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

/// Require that a tag with this (category, name) value exists in the
/// household before attaching it to an event.
async fn require_tag(
    state: &AppState,
    household_id: DbId,
    category: Category,
    tag_name: &str,
) -> AppResult<()> {
    if TagRepo::find_exact(&state.pool, household_id, category.as_str(), tag_name)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "No tag '{tag_name}' exists for category '{category}' in this household"
        ))));
    }
    Ok(())
}
