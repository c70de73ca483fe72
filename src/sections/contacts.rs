//! The address book

use chrono::NaiveDate;

use crate::app::SessionContext;
use crate::contact::Contact;
use crate::resource::ResourceKind;
use crate::section::{ResourceList, ResourceView};
use crate::traits::Gateway;

pub struct ContactsSection<G> {
    contacts: ResourceList<Contact, G>,
}

impl<G: Gateway + 'static> ContactsSection<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self { contacts: ResourceView::new(ctx, ResourceKind::Contacts) }
    }

    pub fn view(&self) -> &ResourceList<Contact, G> {
        &self.contacts
    }

    pub async fn load(&self) {
        self.contacts.load().await
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.items()
    }

    /// Name, way to reach, and birthday of every contact
    pub fn entries(&self) -> Vec<(String, String, Option<NaiveDate>)> {
        self.contacts.with_data(|contacts| {
            contacts.map(|contacts| {
                contacts.iter()
                    .map(|c| (c.name().to_string(), c.detail().to_string(), c.birthday()))
                    .collect()
            })
            .unwrap_or_default()
        })
    }
}
