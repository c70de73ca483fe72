//! This module provides a client to connect to the dashboard API

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use crate::traits::Gateway;
use crate::BoxError;


/// A [`Gateway`] that sends its requests to the API over HTTP
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, BoxError> {
        let base_url = crate::config::resolve_backend_url(Some(base_url.as_ref().to_string()));
        // Fail early on unusable URLs
        Url::parse(&base_url)?;

        Ok(Self{
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the configured API base URL (see [`crate::config`])
    pub fn from_config() -> Result<Self, BoxError> {
        Self::new(crate::config::backend_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, BoxError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if query.is_empty() == false {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn send_json(&self, method: Method, path: &str, body: &Value) -> Result<Value, BoxError> {
        let url = self.url_for(path, &[])?;
        log::debug!("{} {}", method, url);

        let response = self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        if response.status().is_success() == false {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::debug!("Unexpected HTTP status code {:?} for {}", status, path);
            if text.trim().is_empty() {
                return Err("API error".into());
            }
            return Err(text.into());
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Gateway for Client {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, BoxError> {
        let url = self.url_for(path, query)?;
        log::debug!("GET {}", url);

        let response = self.http
            .get(url)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for GET {}", response.status(), path).into());
        }

        Ok(response.json().await?)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, BoxError> {
        self.send_json(Method::POST, path, body).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, BoxError> {
        self.send_json(Method::PATCH, path, body).await
    }
}
