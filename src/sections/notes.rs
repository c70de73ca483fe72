//! Quick notes

use crate::app::SessionContext;
use crate::note::{NewNote, Note};
use crate::resource::ResourceKind;
use crate::section::{required, ResourceList, ResourceView, Submission};
use crate::traits::Gateway;
use crate::BoxError;

pub struct NotesSection<G> {
    notes: ResourceList<Note, G>,
}

impl<G: Gateway + 'static> NotesSection<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self { notes: ResourceView::new(ctx, ResourceKind::Notes) }
    }

    pub fn view(&self) -> &ResourceList<Note, G> {
        &self.notes
    }

    pub async fn load(&self) {
        self.notes.load().await
    }

    /// The notes, the most recently added first
    pub fn newest_first(&self) -> Vec<Note> {
        let mut notes = self.notes.items();
        notes.reverse();
        notes
    }

    /// Add a note, then reload the notes. Both the title and the content are required.
    ///
    /// The title is trimmed, the content is sent as typed.
    pub async fn add_note(&self, title: &str, content: &str) -> Result<Submission, BoxError> {
        let title = match (required(title), required(content)) {
            (Some(title), Some(_)) => title,
            _ => return Ok(Submission::Skipped),
        };
        let body = NewNote::new(self.notes.ctx().user_id().to_string(), title.to_string(), content.to_string());
        self.notes.create(&body).await?;
        Ok(Submission::Saved)
    }
}
