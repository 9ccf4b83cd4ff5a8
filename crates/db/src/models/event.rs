//! Usage-event model, DTOs, and cursor pagination types.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waterline_core::types::{DbId, Timestamp};

/// An event row from the `app.events` table.
///
/// One detected water-usage occurrence: a classified fixture category,
/// the time window it spanned, and the volume consumed. `tag_name`
/// references an [`app.tags` row](super::tag::Tag) by value.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub household_id: DbId,
    pub category: String,
    pub tag_name: Option<String>,
    pub start_timestamp: Timestamp,
    pub end_timestamp: Timestamp,
    pub duration_in_seconds: i32,
    pub consumption_in_liters: f64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for ingesting a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub category: String,
    pub tag_name: Option<String>,
    pub start_timestamp: Timestamp,
    pub end_timestamp: Timestamp,
    pub duration_in_seconds: i32,
    pub consumption_in_liters: f64,
    pub notes: Option<String>,
}

/// DTO for re-categorizing an event (setting or clearing its tag).
#[derive(Debug, Clone, Deserialize)]
pub struct RetagEvent {
    pub tag_name: Option<String>,
}

/// Sort direction for event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Position marker for cursor pagination over events.
///
/// Events are ordered by `(start_timestamp, id)`; the cursor records the
/// last-seen pair. The wire form is `"<epoch_micros>:<id>"`, treated as
/// opaque by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCursor {
    pub start_timestamp: Timestamp,
    pub id: DbId,
}

impl EventCursor {
    /// Serialize to the opaque wire form.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.start_timestamp.timestamp_micros(), self.id)
    }

    /// Parse the opaque wire form. Returns `None` on any malformation.
    pub fn decode(raw: &str) -> Option<EventCursor> {
        let (micros, id) = raw.split_once(':')?;
        let micros: i64 = micros.parse().ok()?;
        let id: DbId = id.parse().ok()?;
        let start_timestamp = chrono::DateTime::from_timestamp_micros(micros)?;
        Some(EventCursor {
            start_timestamp,
            id,
        })
    }
}

/// One page of events plus the cursor for the next page.
///
/// `next_cursor` is `None` when the page was not full, i.e. there is
/// nothing further to fetch.
#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn cursor_encode_decode_round_trip() {
        let cursor = EventCursor {
            start_timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 45).unwrap(),
            id: 9001,
        };
        let decoded = EventCursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn malformed_cursors_are_rejected() {
        assert_eq!(EventCursor::decode(""), None);
        assert_eq!(EventCursor::decode("12345"), None);
        assert_eq!(EventCursor::decode("abc:def"), None);
        assert_eq!(EventCursor::decode("123:"), None);
    }
}
