//! 端点探测：按顺序尝试候选端点，首个成功即返回。
//!
//! # Ordered Endpoint Probing
//!
//! The backend serves the same logical resource from several route variants,
//! and which of them exist differs between deployments. This module turns that
//! into a declarative ordered list of [`EndpointCandidate`]s consumed by one
//! generic fold, [`probe_in_order`].
//!
//! Each attempt yields a [`ProbeOutcome`]:
//!
//! | Outcome | Trigger | Effect |
//! |---------|---------|--------|
//! | `Success` | HTTP 2xx | stop, return the body |
//! | `Skip` | HTTP 404 / 405 | try the next candidate |
//! | `Fatal` | anything else, network failure | stop, propagate the error |
//!
//! Candidates are awaited strictly one after another; a successful candidate
//! short-circuits the rest of the list.
//!
//! ```rust,no_run
//! use campus_profile_client::probe::{
//!     probe_in_order, EndpointCandidate, HttpMethod, HttpProber, Identifier, ParamEncoding,
//! };
//! use campus_profile_client::{config::ClientConfig, transport::HttpTransport};
//! use std::sync::Arc;
//!
//! # async fn run() -> campus_profile_client::Result<()> {
//! let transport = Arc::new(HttpTransport::new(&ClientConfig::new("https://campus.example.com"))?);
//! let prober = HttpProber::new(transport);
//! let candidates = vec![
//!     EndpointCandidate::new("/api/student-profile-api", HttpMethod::Get, ParamEncoding::Query),
//!     EndpointCandidate::new("/api/student-profile-api", HttpMethod::Post, ParamEncoding::Multipart),
//! ];
//! let id = Identifier::new("u_id", "42")?;
//! let resolution = probe_in_order(&prober, &id, &candidates).await?;
//! println!("{} answered", resolution.winner);
//! # Ok(())
//! # }
//! ```

pub mod candidate;
pub mod identifier;
pub mod outcome;
pub mod prober;
pub mod resolver;

pub use candidate::{EndpointCandidate, HttpMethod, ParamEncoding};
pub use identifier::Identifier;
pub use outcome::{OutcomeKind, ProbeOutcome, SkipReason};
pub use prober::{CandidateProbe, HttpProber};
pub use resolver::{probe_in_order, ProbeAttempt, Resolution};
