//! Contacts

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::item::ItemId;

/// A contact, as returned by `GET /contacts`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ItemId>,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
}

impl Contact {
    pub fn id(&self) -> Option<&ItemId>     { self.id.as_ref() }
    pub fn name(&self) -> &str              { &self.name }
    pub fn email(&self) -> Option<&str>     { self.email.as_deref() }
    pub fn phone(&self) -> Option<&str>     { self.phone.as_deref() }

    /// The way to reach this contact: their email, otherwise their phone number, otherwise a dash
    pub fn detail(&self) -> &str {
        non_empty(&self.email)
            .or_else(|| non_empty(&self.phone))
            .unwrap_or("—")
    }

    /// The birthday, if any and if it can be read as a date (either `YYYY-MM-DD` or a full timestamp)
    pub fn birthday(&self) -> Option<NaiveDate> {
        let raw = non_empty(&self.birthday)?;
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| s.is_empty() == false)
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_detail_fallbacks() {
        let c: Contact = serde_json::from_str(r#"{"name": "Ana", "email": "ana@example.com", "phone": "123"}"#).unwrap();
        assert_eq!(c.detail(), "ana@example.com");
        let c: Contact = serde_json::from_str(r#"{"name": "Rui", "email": "", "phone": "123"}"#).unwrap();
        assert_eq!(c.detail(), "123");
        let c: Contact = serde_json::from_str(r#"{"name": "Zé"}"#).unwrap();
        assert_eq!(c.detail(), "—");
    }

    #[test]
    fn test_birthday() {
        let c: Contact = serde_json::from_str(r#"{"name": "Ana", "birthday": "1990-07-14T00:00:00Z"}"#).unwrap();
        assert_eq!(c.birthday(), NaiveDate::from_ymd_opt(1990, 7, 14));
        let c: Contact = serde_json::from_str(r#"{"name": "Rui", "birthday": "soon"}"#).unwrap();
        assert_eq!(c.birthday(), None);
    }
}
