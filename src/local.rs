//! This module provides an in-memory stand-in for the dashboard API
//!
//! It is useful to work offline, and to test the view-models without a server.

use std::collections::HashMap;
use std::sync::Mutex;
#[cfg(any(test, feature = "local_gateway_mocks_remote"))]
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::traits::Gateway;
use crate::item::ItemId;
use crate::utils::lock;
use crate::BoxError;
#[cfg(any(test, feature = "local_gateway_mocks_remote"))]
use crate::mock_behaviour::MockBehaviour;


/// A request that has been received by a [`LocalGateway`]
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Default, Debug)]
struct LocalData {
    /// Item collections (e.g. `/tasks`), in insertion order
    collections: HashMap<String, Vec<Value>>,
    /// Single documents (e.g. `/dashboard`)
    documents: HashMap<String, Value>,
    /// Replies to POST requests that do not store anything (e.g. `/ai/center`, `/auth/login`)
    replies: HashMap<String, Value>,
}

/// A [`Gateway`] that keeps its data in memory, and records every request it receives.
///
/// * `GET` returns the document stored at this path if any, otherwise the items of the collection at this path
///   (restricted to the requested `user_id` for the items that have one)
/// * `POST` returns the reply registered for this path if any, otherwise adds the body to the collection (giving it an `_id` if it has none)
/// * `PATCH /collection/id` merges the body into the matching item
#[derive(Debug, Default)]
pub struct LocalGateway {
    data: Mutex<LocalData>,
    history: Mutex<Vec<Request>>,

    #[cfg(any(test, feature = "local_gateway_mocks_remote"))]
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl LocalGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make this gateway fail some requests, as described by `behaviour`
    #[cfg(any(test, feature = "local_gateway_mocks_remote"))]
    pub fn with_mock_behaviour(mut self, behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        self.mock_behaviour = Some(behaviour);
        self
    }

    /// Add an item to a collection. An `_id` is generated if the item has none.
    pub fn insert_item(&self, collection: &str, item: Value) -> Result<ItemId, BoxError> {
        let mut item = match item {
            Value::Object(map) => map,
            other => return Err(format!("Only JSON objects can be stored in {}, got {}", collection, other).into()),
        };
        let id = match item.get("_id").and_then(id_of) {
            Some(id) => id,
            None => {
                let id = ItemId::random();
                item.insert("_id".to_string(), Value::String(id.to_string()));
                id
            }
        };

        self.lock_data()
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Value::Object(item));
        Ok(id)
    }

    /// Store a single document, that will be returned by every `GET` of this path
    pub fn set_document(&self, path: &str, document: Value) {
        self.lock_data().documents.insert(path.to_string(), document);
    }

    /// Register the reply to every `POST` of this path
    pub fn set_reply(&self, path: &str, reply: Value) {
        self.lock_data().replies.insert(path.to_string(), reply);
    }

    /// The current items of a collection
    pub fn items(&self, collection: &str) -> Vec<Value> {
        self.lock_data().collections.get(collection).cloned().unwrap_or_default()
    }

    /// Every request received so far, oldest first
    pub fn history(&self) -> Vec<Request> {
        lock(&self.history).clone()
    }

    /// Forget the requests received so far
    pub fn clear_history(&self) {
        lock(&self.history).clear()
    }

    fn lock_data(&self) -> std::sync::MutexGuard<'_, LocalData> {
        lock(&self.data)
    }

    fn record(&self, method: &'static str, path: &str, query: &[(&str, &str)], body: Option<&Value>) {
        let request = Request {
            method,
            path: path.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            body: body.cloned(),
        };
        lock(&self.history).push(request);
    }

    #[cfg(any(test, feature = "local_gateway_mocks_remote"))]
    fn check_mock(&self, method: &str) -> Result<(), BoxError> {
        let behaviour = match &self.mock_behaviour {
            None => return Ok(()),
            Some(b) => b,
        };
        let mut behaviour = lock(behaviour);
        match method {
            "GET" => behaviour.can_get(),
            "POST" => behaviour.can_post(),
            _ => behaviour.can_patch(),
        }
    }
    #[cfg(not(any(test, feature = "local_gateway_mocks_remote")))]
    fn check_mock(&self, _method: &str) -> Result<(), BoxError> {
        Ok(())
    }
}

#[async_trait]
impl Gateway for LocalGateway {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, BoxError> {
        self.record("GET", path, query, None);
        self.check_mock("GET")?;

        let data = self.lock_data();
        if let Some(doc) = data.documents.get(path) {
            return Ok(doc.clone());
        }

        let user_id = query.iter().find(|(k, _)| *k == "user_id").map(|(_, v)| *v);
        let items: Vec<Value> = data.collections.get(path)
            .map(|items| {
                items.iter()
                    .filter(|item| belongs_to(item, user_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Value::Array(items))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, BoxError> {
        self.record("POST", path, &[], Some(body));
        self.check_mock("POST")?;

        if let Some(reply) = self.lock_data().replies.get(path) {
            return Ok(reply.clone());
        }
        if path.starts_with("/ai/") || path.starts_with("/auth/") {
            return Err(format!("No reply registered for POST {}", path).into());
        }

        let id = self.insert_item(path, body.clone())?;
        let data = self.lock_data();
        let stored = data.collections.get(path)
            .and_then(|items| items.iter().find(|item| item.get("_id").and_then(id_of).as_ref() == Some(&id)))
            .cloned()
            .unwrap_or(Value::Null);
        Ok(stored)
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, BoxError> {
        self.record("PATCH", path, &[], Some(body));
        self.check_mock("PATCH")?;

        let (collection, segment) = match path.rfind('/') {
            Some(pos) if pos > 0 => (&path[..pos], &path[pos + 1..]),
            _ => return Err(format!("Not an item path: {}", path).into()),
        };
        let id = ItemId::from(urlencoding::decode(segment)?.as_ref());
        let changes = match body {
            Value::Object(map) => map,
            _ => return Err("A PATCH body must be a JSON object".into()),
        };

        let mut data = self.lock_data();
        let item = data.collections.get_mut(collection)
            .and_then(|items| items.iter_mut().find(|item| item.get("_id").and_then(id_of).as_ref() == Some(&id)));
        match item {
            Some(Value::Object(fields)) => {
                merge(fields, changes);
                Ok(Value::Object(fields.clone()))
            },
            _ => Err(format!("Unexpected HTTP status code 404 for PATCH {}", path).into()),
        }
    }
}

fn id_of(value: &Value) -> Option<ItemId> {
    match value {
        Value::String(s) => Some(ItemId::from(s.as_str())),
        Value::Number(n) => Some(ItemId::from(n.to_string())),
        _ => None,
    }
}

fn belongs_to(item: &Value, user_id: Option<&str>) -> bool {
    let user_id = match user_id {
        None => return true,
        Some(u) => u,
    };
    match item.get("user_id").and_then(id_of) {
        None => true,
        Some(owner) => owner.as_str() == user_id,
    }
}

fn merge(fields: &mut Map<String, Value>, changes: &Map<String, Value>) {
    for (key, value) in changes {
        fields.insert(key.clone(), value.clone());
    }
}
