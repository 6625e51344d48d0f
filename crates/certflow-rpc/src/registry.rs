//! REST client for the certificate registry service.
//!
//! The registry is the authoritative off-chain store for certificate
//! documents and DID documents. Authentication is a bearer token supplied by
//! the host runtime's credential store; this client only carries it.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::error::TransportError;

/// Client for the certificate registry's REST API.
pub struct RegistryClient {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TransportError::Other(format!("invalid registry URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Ok(Self {
            base_url,
            http,
            token: None,
        })
    }

    /// Attach the bearer token for authenticated endpoints.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Other(format!("invalid registry path {path}: {e}")))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn read_body(&self, resp: reqwest::Response) -> Result<Value, TransportError> {
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(TransportError::Api {
                service: "registry".into(),
                message,
            });
        }
        Ok(body)
    }

    /// GET a registry resource. `None` for a 404.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<Value>, TransportError> {
        let url = self.endpoint(path)?;
        let resp = self
            .authorize(self.http.get(url).query(query))
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.read_body(resp).await.map(Some)
    }

    /// POST a JSON body to a registry endpoint.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.endpoint(path)?;
        let resp = self
            .authorize(self.http.post(url).json(body))
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        self.read_body(resp).await
    }

    /// PUT a JSON body to a registry endpoint.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.endpoint(path)?;
        let resp = self
            .authorize(self.http.put(url).json(body))
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        self.read_body(resp).await
    }
}
