//! # Submission Transport
//!
//! The editor hands a finished request to a [`Transport`] and awaits the
//! answer. [`HttpTransport`] sends it over HTTP; tests plug in fakes.

use crate::config::EditorConfig;
use crate::errors::TransportError;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A payload ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub url: String,
    pub method: HttpMethod,
    /// UTF-8 JSON body
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

pub trait Transport: Send + Sync {
    fn submit(
        &self,
        request: SubmitRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>>;
}

/// HTTP transport backed by a shared client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Transport using the configured request timeout
    pub fn from_config(config: &EditorConfig) -> Result<Self, TransportError> {
        Self::new(Duration::from_secs(config.request_timeout_secs))
    }

    async fn send(&self, request: SubmitRequest) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .request(request.method.into(), &request.url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn submit(
        &self,
        request: SubmitRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
        self.send(request).boxed()
    }
}
