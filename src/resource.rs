//! The resources served by the API, and typed access to them

use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::traits::Gateway;
use crate::item::ItemId;
use crate::BoxError;

/// A resource collection (or document) of the API, that belongs to a user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Dashboard,
    Events,
    Tasks,
    Goals,
    Notes,
    Contacts,
}

impl ResourceKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Events => "/events",
            Self::Tasks => "/tasks",
            Self::Goals => "/goals",
            Self::Notes => "/notes",
            Self::Contacts => "/contacts",
        }
    }

    /// The path of a single item of this collection. The id is percent-encoded, so that it always stays a single segment
    pub fn item_path(&self, id: &ItemId) -> String {
        format!("{}/{}", self.path(), urlencoding::encode(id.as_str()))
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.path().trim_start_matches('/'))
    }
}


/// Fetch a resource of a user, and read it as a `T`
pub async fn fetch<T, G>(gateway: &G, kind: ResourceKind, user_id: &str) -> Result<T, BoxError>
where
    T: DeserializeOwned,
    G: Gateway + ?Sized,
{
    let value = gateway.get(kind.path(), &[("user_id", user_id)]).await?;
    match serde_json::from_value(value) {
        Ok(data) => Ok(data),
        Err(err) => Err(format!("Unexpected content for {}: {}", kind, err).into()),
    }
}

/// Add an item to a resource collection
pub async fn create<B, G>(gateway: &G, kind: ResourceKind, body: &B) -> Result<serde_json::Value, BoxError>
where
    B: Serialize + ?Sized,
    G: Gateway + ?Sized,
{
    let body = serde_json::to_value(body)?;
    gateway.post(kind.path(), &body).await
}

/// Partially update an item of a resource collection
pub async fn update<B, G>(gateway: &G, kind: ResourceKind, id: &ItemId, changes: &B) -> Result<serde_json::Value, BoxError>
where
    B: Serialize + ?Sized,
    G: Gateway + ?Sized,
{
    let changes = serde_json::to_value(changes)?;
    gateway.patch(&kind.item_path(id), &changes).await
}
