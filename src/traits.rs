use async_trait::async_trait;
use serde_json::Value;

use crate::BoxError;

/// A data source that speaks the dashboard API.
///
/// Paths start with a `/` and are relative to the API base (e.g. `/events`, `/events/42`, `/ai/center`).
/// Any outcome but a successful response with a JSON body is an error.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch a resource. `query` items are appended as URL query parameters
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, BoxError>;
    /// Send a JSON body to a resource, and return the JSON reply
    async fn post(&self, path: &str, body: &Value) -> Result<Value, BoxError>;
    /// Partially update a resource: only the fields of `body` are changed
    async fn patch(&self, path: &str, body: &Value) -> Result<Value, BoxError>;
}

/// A durable key-value storage on the client side (think of a browser `localStorage`)
pub trait Storage {
    /// Returns the value stored under this key, or `None` if there is none
    fn get_item(&self, key: &str) -> Result<Option<String>, BoxError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BoxError>;
    /// Removing a key that does not exist is not an error
    fn remove_item(&mut self, key: &str) -> Result<(), BoxError>;
}
