//! Quick notes

use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// The `type` of the notes created from this client
pub const NOTE_TYPE: &str = "note";

/// A note, as returned by `GET /notes`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ItemId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

impl Note {
    pub fn id(&self) -> Option<&ItemId> { self.id.as_ref() }
    pub fn title(&self) -> &str         { &self.title }
    pub fn content(&self) -> &str       { &self.content }
    pub fn kind(&self) -> Option<&str>  { self.kind.as_deref() }
}

/// The body of a `POST /notes` request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewNote {
    pub user_id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewNote {
    pub fn new(user_id: String, title: String, content: String) -> Self {
        Self { user_id, title, content, kind: NOTE_TYPE.to_string() }
    }
}
