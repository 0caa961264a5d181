use crate::Error;
use serde::Serialize;

/// Why a candidate was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    MethodNotAllowed,
}

impl SkipReason {
    /// 404 and 405 are the only statuses that mean "try the next candidate".
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            404 => Some(SkipReason::NotFound),
            405 => Some(SkipReason::MethodNotAllowed),
            _ => None,
        }
    }
}

/// Result of probing one candidate.
#[derive(Debug)]
pub enum ProbeOutcome {
    Success {
        status: u16,
        body: serde_json::Value,
    },
    Skip {
        reason: SkipReason,
        cause: Error,
    },
    Fatal(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Skip,
    Fatal,
}

impl ProbeOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ProbeOutcome::Success { .. } => OutcomeKind::Success,
            ProbeOutcome::Skip { .. } => OutcomeKind::Skip,
            ProbeOutcome::Fatal(_) => OutcomeKind::Fatal,
        }
    }

    /// HTTP status observed for this outcome, if a response arrived at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success { status, .. } => Some(*status),
            ProbeOutcome::Skip { cause, .. } => cause.status(),
            ProbeOutcome::Fatal(err) => err.status(),
        }
    }
}
