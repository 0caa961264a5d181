use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "identifier", "routes.read.primary")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the last skipped candidate)
    pub details: Option<String>,
    /// Source of the error (e.g., "http_prober", "profile_write")
    pub source: Option<String>,
    /// HTTP status code, when the error came from a response
    pub status_code: Option<u16>,
    /// Correlation id sent as `x-request-id`
    pub request_id: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Unified error type for the profile client.
///
/// Every variant is "fatal" from the point of view of a resolution: the
/// non-fatal 404/405 signals never leave the probing loop as errors, except
/// as the `last_skip` cause of [`Error::Exhausted`] or the description kept by
/// [`Error::previous_skip`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Remote error: HTTP {status} ({class}): {message}{}", format_context(.context))]
    Remote {
        status: u16,
        class: String,
        message: String,
        context: ErrorContext,
    },

    #[error("No endpoint available: all {attempts} candidate(s) skipped")]
    Exhausted {
        attempts: usize,
        #[source]
        last_skip: Box<Error>,
    },

    /// A fatal error without its own context, raised after earlier candidates
    /// were skipped. `cause` is the error that stopped the resolution.
    #[error("Resolution aborted after skip ({skipped_before}): {cause}")]
    Aborted {
        skipped_before: String,
        #[source]
        cause: Box<Error>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Route table error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if let Some(ref id) = ctx.request_id {
        parts.push(format!("request_id: {}", id));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// Error class for an HTTP status, used in [`Error::Remote`] and logs.
pub fn class_for_status(status: u16) -> &'static str {
    match status {
        400 => "invalid_request",
        401 => "authentication",
        403 => "permission_denied",
        404 => "not_found",
        405 => "method_not_allowed",
        408 => "timeout",
        409 => "conflict",
        413 => "request_too_large",
        429 => "rate_limited",
        503 => "overloaded",
        500..=599 => "server_error",
        _ => "http_error",
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn remote(status: u16, message: impl Into<String>, context: ErrorContext) -> Self {
        Error::Remote {
            status,
            class: class_for_status(status).to_string(),
            message: message.into(),
            context: context.with_status_code(status),
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            Error::Aborted { cause, .. } => cause.status(),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Remote { context, .. } => Some(context),
            Error::Aborted { cause, .. } => cause.context(),
            _ => None,
        }
    }

    /// The last skipped candidate recorded on a fatal error, if any.
    pub fn previous_skip(&self) -> Option<&str> {
        match self {
            Error::Aborted { skipped_before, .. } => Some(skipped_before.as_str()),
            _ => self
                .context()
                .and_then(|c| c.details.as_deref())
                .and_then(|d| d.rsplit_once("after skip: "))
                .map(|(_, skip)| skip),
        }
    }

    /// Attach the description of a previously skipped candidate, for diagnostics.
    ///
    /// Errors that carry an [`ErrorContext`] get it appended to `details`;
    /// everything else is wrapped in [`Error::Aborted`].
    pub(crate) fn with_previous_skip(self, skip: Option<&str>) -> Self {
        let Some(skip) = skip else {
            return self;
        };
        let note = format!("after skip: {}", skip);
        let annotate = |context: ErrorContext| {
            let details = match context.details.as_deref() {
                Some(existing) => format!("{}; {}", existing, note),
                None => note.clone(),
            };
            context.with_details(details)
        };
        match self {
            Error::Remote {
                status,
                class,
                message,
                context,
            } => Error::Remote {
                status,
                class,
                message,
                context: annotate(context),
            },
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: annotate(context),
            },
            Error::Validation { message, context } => Error::Validation {
                message,
                context: annotate(context),
            },
            other => Error::Aborted {
                skipped_before: skip.to_string(),
                cause: Box::new(other),
            },
        }
    }
}
