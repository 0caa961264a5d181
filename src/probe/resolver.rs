use super::candidate::{EndpointCandidate, HttpMethod};
use super::identifier::Identifier;
use super::outcome::{OutcomeKind, ProbeOutcome};
use super::prober::CandidateProbe;
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One probe that actually went out, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeAttempt {
    pub candidate: EndpointCandidate,
    pub http_status: Option<u16>,
    pub outcome: OutcomeKind,
    pub duration_ms: u128,
}

/// The first successful response of a resolution, plus diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Response body of the winning candidate, unmodified.
    pub body: serde_json::Value,
    pub winner: EndpointCandidate,
    pub attempts: Vec<ProbeAttempt>,
    /// Correlation id sent with every probe of this resolution.
    pub request_id: String,
    pub duration_ms: u128,
}

/// Probe `candidates` in order until one succeeds.
///
/// - Success: returned immediately, later candidates are never probed.
/// - Skip: the next candidate is tried.
/// - Fatal: returned immediately, annotated with the last skip if any.
///
/// A (path, method, key) triple already attempted in this call is not
/// attempted again. When everything skips the result is
/// [`Error::Exhausted`] whose source is the last skip's HTTP error.
pub async fn probe_in_order(
    prober: &dyn CandidateProbe,
    identifier: &Identifier,
    candidates: &[EndpointCandidate],
) -> Result<Resolution> {
    if candidates.is_empty() {
        return Err(Error::configuration_with_context(
            "no endpoint candidates configured",
            ErrorContext::new().with_source("probe_in_order"),
        ));
    }

    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();
    let mut tried: HashSet<(&str, HttpMethod, &str)> = HashSet::new();
    let mut attempts: Vec<ProbeAttempt> = Vec::new();
    let mut last_skip: Option<(String, Error)> = None;

    for candidate in candidates {
        if !tried.insert((candidate.path.as_str(), candidate.method, identifier.key())) {
            debug!(candidate = %candidate, "candidate already attempted, not probing again");
            continue;
        }

        let attempt_start = Instant::now();
        let outcome = prober.probe(identifier, candidate, &request_id).await;
        attempts.push(ProbeAttempt {
            candidate: candidate.clone(),
            http_status: outcome.status(),
            outcome: outcome.kind(),
            duration_ms: attempt_start.elapsed().as_millis(),
        });

        match outcome {
            ProbeOutcome::Success { body, .. } => {
                info!(
                    winner = %candidate,
                    attempts = attempts.len(),
                    request_id = request_id.as_str(),
                    duration_ms = start.elapsed().as_millis(),
                    "endpoint resolved"
                );
                return Ok(Resolution {
                    body,
                    winner: candidate.clone(),
                    attempts,
                    request_id,
                    duration_ms: start.elapsed().as_millis(),
                });
            }
            ProbeOutcome::Skip { reason, cause } => {
                debug!(candidate = %candidate, ?reason, "skipping candidate");
                let status = cause
                    .status()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                last_skip = Some((format!("{} -> {}", candidate, status), cause));
            }
            ProbeOutcome::Fatal(err) => {
                warn!(
                    candidate = %candidate,
                    attempts = attempts.len(),
                    request_id = request_id.as_str(),
                    error = %err,
                    "resolution aborted"
                );
                let previous = last_skip.as_ref().map(|(desc, _)| desc.as_str());
                return Err(err.with_previous_skip(previous));
            }
        }
    }

    warn!(
        attempts = attempts.len(),
        request_id = request_id.as_str(),
        "every endpoint candidate skipped"
    );
    match last_skip {
        Some((_, cause)) => Err(Error::Exhausted {
            attempts: attempts.len(),
            last_skip: Box::new(cause),
        }),
        None => Err(Error::configuration("no endpoint candidates attempted")),
    }
}
