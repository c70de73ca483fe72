//! Carrying events through a drag-and-drop data channel
//!
//! A dragged event is carried as a small JSON document `{"id": <event id>}`.
//! When it is dropped onto a day of the grid, it becomes a [`RescheduleIntent`].

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use super::RescheduleIntent;
use crate::item::ItemId;

/// The format the payload is written under when a drag starts
pub const DRAG_FORMAT: &str = "application/json";
/// Other formats that are looked up on drop, in this order, if [`DRAG_FORMAT`] has nothing
pub const FALLBACK_FORMATS: [&str; 2] = ["text/event", "text"];


/// Read access to the data carried by a drop
pub trait DataTransfer {
    /// The data stored under this format, if any
    fn get_data(&self, format: &str) -> Option<String>;
}

impl DataTransfer for HashMap<String, String> {
    fn get_data(&self, format: &str) -> Option<String> {
        self.get(format).cloned()
    }
}

/// What is carried while an event is being dragged
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DragPayload {
    pub id: ItemId,
}

/// The format and data to attach to the drag of an event
pub fn drag_start(id: &ItemId) -> (&'static str, String) {
    (DRAG_FORMAT, serde_json::json!({ "id": id }).to_string())
}

/// Read the dragged payload out of a drop.
///
/// Returns `None` when nothing usable is carried. This is not an error, the drop is just to be ignored.
pub fn read_payload<D: DataTransfer + ?Sized>(data: &D) -> Option<DragPayload> {
    let raw = std::iter::once(DRAG_FORMAT)
        .chain(FALLBACK_FORMATS.iter().copied())
        .filter_map(|format| data.get_data(format))
        .find(|content| content.is_empty() == false)?;

    match serde_json::from_str::<DragPayload>(&raw) {
        Ok(payload) => Some(payload),
        Err(err) => {
            log::debug!("Ignoring a drop with an unexpected payload ({}): {}", err, raw);
            None
        }
    }
}

/// The intent of dropping `data` onto the day `target_date`
pub fn drop_intent<D: DataTransfer + ?Sized>(data: &D, target_date: NaiveDate) -> Option<RescheduleIntent> {
    read_payload(data).map(|payload| RescheduleIntent::new(payload.id, target_date))
}
