//! Moving an event to another day

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::event::Event;
use crate::item::ItemId;
use crate::timestamp::resolve_local;


/// "Move this event to that day"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RescheduleIntent {
    pub event_id: ItemId,
    pub target_date: NaiveDate,
}

impl RescheduleIntent {
    pub fn new(event_id: ItemId, target_date: NaiveDate) -> Self {
        Self { event_id, target_date }
    }
}

/// The new times of a rescheduled event.
///
/// It serializes into the body of the partial update: only `start_time` and `end_time`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventUpdate {
    #[serde(skip)]
    pub id: ItemId,
    #[serde(with = "crate::utils::timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub end_time: DateTime<Utc>,
}

/// Compute the new times of an event moved to another day.
///
/// The event keeps its hour and minute (in the `viewer` timezone, seconds are dropped) and its duration.
/// A start without an offset is read as a wall-clock time of `viewer`. The new times are always sent as UTC instants.
/// Returns `None` if the event is not in `events`.
pub fn reschedule<Tz: TimeZone>(events: &[Event], intent: &RescheduleIntent, viewer: &Tz) -> Option<EventUpdate> {
    let event = match events.iter().find(|e| e.id() == &intent.event_id) {
        None => {
            log::debug!("Event {} is not loaded, ignoring its move", intent.event_id);
            return None;
        },
        Some(e) => e,
    };

    let duration: Duration = event.duration_in(viewer);
    let local_start = event.start_in(viewer);
    let naive_start = intent.target_date.and_hms_opt(local_start.hour(), local_start.minute(), 0)?;
    let new_start = resolve_local(viewer, naive_start)?.with_timezone(&Utc);

    Some(EventUpdate {
        id: event.id().clone(),
        start_time: new_start,
        end_time: new_start + duration,
    })
}
