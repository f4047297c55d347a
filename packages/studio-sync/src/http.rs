//! REST transport for resource stores.
//!
//! `RestClient<T>` speaks the resource API's conventional surface:
//! `GET/POST {base}/{kind}` and `PATCH/DELETE {base}/{kind}/{id}`,
//! JSON bodies both ways. Any non-success response is mapped to
//! [`SyncError::Network`] carrying the server-provided message body.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::ResourceClient;
use crate::error::SyncError;
use crate::filter::ListFilter;
use crate::resource::Resource;

#[derive(Clone)]
pub struct RestClient<T> {
    base_url: String,
    api_token: Option<String>,
    http: Arc<reqwest::Client>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> RestClient<T> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            http: Arc::new(reqwest::Client::new()),
            _marker: PhantomData,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Share one connection pool across per-resource clients.
    pub fn with_http(mut self, http: Arc<reqwest::Client>) -> Self {
        self.http = http;
        self
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::KIND)
    }

    fn record_url(&self, id: T::Id) -> String {
        format!("{}/{}/{}", self.base_url, T::KIND, id)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Turn a non-success response into a `Network` error with the server's
/// message body.
async fn response_error(response: reqwest::Response) -> SyncError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    SyncError::Network {
        status: Some(status),
        message,
    }
}

fn transport_error(err: reqwest::Error) -> SyncError {
    SyncError::transport(err.to_string())
}

#[async_trait]
impl<T> ResourceClient<T> for RestClient<T>
where
    T: Resource + DeserializeOwned,
{
    async fn list(&self, filter: &ListFilter) -> Result<Vec<T>, SyncError> {
        let url = self.collection_url();
        debug!(kind = T::KIND, url = %url, "GET list");

        let response = self
            .request(self.http.get(&url))
            .query(&filter.query_pairs())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        response.json::<Vec<T>>().await.map_err(transport_error)
    }

    async fn create(&self, payload: &T::Create) -> Result<T, SyncError> {
        let url = self.collection_url();
        debug!(kind = T::KIND, url = %url, "POST create");

        let response = self
            .request(self.http.post(&url))
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        response.json::<T>().await.map_err(transport_error)
    }

    async fn update(&self, id: T::Id, patch: &T::Patch) -> Result<T, SyncError> {
        let url = self.record_url(id);
        debug!(kind = T::KIND, id = %id, "PATCH update");

        let response = self
            .request(self.http.patch(&url))
            .json(patch)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        response.json::<T>().await.map_err(transport_error)
    }

    async fn delete(&self, id: T::Id) -> Result<(), SyncError> {
        let url = self.record_url(id);
        debug!(kind = T::KIND, id = %id, "DELETE");

        let response = self
            .request(self.http.delete(&url))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        Ok(())
    }
}
