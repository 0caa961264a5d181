use super::candidate::{EndpointCandidate, ParamEncoding};
use super::identifier::Identifier;
use super::outcome::{ProbeOutcome, SkipReason};
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Attempts one candidate for one identifier.
///
/// Implementations never return `Err`; every failure is folded into the
/// outcome so that the ordered fold can decide whether to continue.
#[async_trait]
pub trait CandidateProbe: Send + Sync {
    async fn probe(
        &self,
        identifier: &Identifier,
        candidate: &EndpointCandidate,
        request_id: &str,
    ) -> ProbeOutcome;
}

/// Network prober backed by the shared [`HttpTransport`].
pub struct HttpProber {
    transport: Arc<HttpTransport>,
}

impl HttpProber {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CandidateProbe for HttpProber {
    async fn probe(
        &self,
        identifier: &Identifier,
        candidate: &EndpointCandidate,
        request_id: &str,
    ) -> ProbeOutcome {
        let req = self
            .transport
            .request(candidate.method, &candidate.path, request_id);
        let req = match candidate.encoding {
            ParamEncoding::Query => req.query(&[(identifier.key(), identifier.value())]),
            ParamEncoding::JsonBody => {
                let mut body = serde_json::Map::new();
                body.insert(
                    identifier.key().to_string(),
                    serde_json::Value::String(identifier.value().to_string()),
                );
                req.json(&body)
            }
            ParamEncoding::Multipart => req.multipart(
                reqwest::multipart::Form::new()
                    .text(identifier.key().to_string(), identifier.value().to_string()),
            ),
        };

        let start = Instant::now();
        let reply = match self.transport.send(req).await {
            Ok(reply) => reply,
            Err(e) => {
                debug!(
                    endpoint = candidate.path.as_str(),
                    method = candidate.method.as_str(),
                    error = %e,
                    "probe failed before a response arrived"
                );
                return ProbeOutcome::Fatal(e);
            }
        };
        debug!(
            endpoint = candidate.path.as_str(),
            method = candidate.method.as_str(),
            encoding = candidate.encoding.as_str(),
            http_status = reply.status,
            duration_ms = start.elapsed().as_millis(),
            "probe completed"
        );

        if reply.is_success() {
            return match reply.json() {
                Ok(body) => ProbeOutcome::Success {
                    status: reply.status,
                    body,
                },
                Err(e) => ProbeOutcome::Fatal(e),
            };
        }

        let context = ErrorContext::new()
            .with_field_path(candidate.path.clone())
            .with_request_id(request_id)
            .with_source("http_prober");
        let error = Error::remote(reply.status, snippet(&reply.body), context);
        match SkipReason::from_status(reply.status) {
            Some(reason) => ProbeOutcome::Skip {
                reason,
                cause: error,
            },
            None => ProbeOutcome::Fatal(error),
        }
    }
}

fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push_str("...");
    cut
}
