use crate::config::ClientConfig;
use crate::probe::HttpMethod;
use crate::transport::TransportError;
use crate::{Error, Result};
use reqwest::{Proxy, RequestBuilder};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Thin wrapper around one pooled `reqwest::Client` bound to a single base URL.
///
/// The timeout is configured once for the whole transport; individual probes
/// never override it.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON. An empty body is `null`.
    pub fn json(&self) -> Result<serde_json::Value> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.validated_base_url()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration(format!("invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            bearer_token: config.resolve_token(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Start a request with auth and correlation headers applied.
    pub(crate) fn request(&self, method: HttpMethod, path: &str, request_id: &str) -> RequestBuilder {
        let url = self.url_for(path);
        let mut req = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }
        req.header("accept", "application/json")
            .header(REQUEST_ID_HEADER, request_id)
    }

    /// Send a prepared request and read the whole body.
    ///
    /// Non-2xx statuses are returned as a reply, not an error; classification
    /// belongs to the caller.
    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<HttpReply> {
        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        Ok(HttpReply { status, body })
    }
}
