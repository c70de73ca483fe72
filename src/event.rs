//! Calendar events

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::item::ItemId;
use crate::timestamp::Timestamp;

/// A calendar event, as returned by `GET /events`.
///
/// This is a read-through copy of what the API owns: it is replaced on every reload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    id: ItemId,
    #[serde(default)]
    title: String,
    start_time: Timestamp,
    end_time: Timestamp,
}

impl Event {
    pub fn new<S: ToString, T: Into<Timestamp>>(id: ItemId, title: S, start_time: T, end_time: T) -> Self {
        Self { id, title: title.to_string(), start_time: start_time.into(), end_time: end_time.into() }
    }

    pub fn id(&self) -> &ItemId             { &self.id }
    pub fn title(&self) -> &str             { &self.title }
    pub fn start_time(&self) -> &Timestamp  { &self.start_time }
    pub fn end_time(&self) -> &Timestamp    { &self.end_time }

    /// When this event starts, seen from `tz`
    pub fn start_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.start_time.in_timezone(tz)
    }

    /// How long this event lasts, when seen from `tz` (floating times may cross a DST change).
    /// The API is expected to never send an end before the start, but the value is not clamped if it does.
    pub fn duration_in<Tz: TimeZone>(&self, tz: &Tz) -> Duration {
        self.end_time.to_utc_in(tz) - self.start_time.to_utc_in(tz)
    }
}

/// The body of a `POST /events` request
#[derive(Clone, Debug, Serialize)]
pub struct NewEvent {
    pub user_id: String,
    pub title: String,
    #[serde(with = "crate::utils::timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub end_time: DateTime<Utc>,
}
