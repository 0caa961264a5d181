//! # campus-profile-client
//!
//! 校园平台学生资料客户端：按顺序探测端点读取资料，并通过单一路由提交更新。
//!
//! Profile resolution client for the campus platform REST API.
//!
//! ## Overview
//!
//! The backend serves the student profile from several route variants, and
//! which ones exist differs between deployments. Reads therefore walk an
//! ordered list of endpoint candidates until one answers; writes go to one
//! authoritative multipart route.
//!
//! - **Ordered probing**: `404`/`405` mean "try the next candidate", anything
//!   else stops the search ([`probe`])
//! - **Declarative routes**: candidate lists are data, built in or loaded from
//!   YAML ([`profile::ProfileRoutes`])
//! - **Multipart writes**: present fields plus an optional photo file part
//!   ([`profile::ProfileUpdate`])
//! - **View-state store**: the last resolved profile, written only by the read
//!   path and read through [`store::ProfileView`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use campus_profile_client::{ProfileClient, ProfileUpdate};
//!
//! #[tokio::main]
//! async fn main() -> campus_profile_client::Result<()> {
//!     let client = ProfileClient::builder()
//!         .base_url("https://campus.example.com")
//!         .build()?;
//!
//!     let resolution = client.fetch_profile("42").await?;
//!     println!("resolved via {}", resolution.winner);
//!
//!     let update = ProfileUpdate::new("42").with_city("Austin");
//!     client.update_and_refresh(&update).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`ProfileClient`] and its builder |
//! | [`probe`] | Endpoint candidates, probe outcomes, the ordered fold |
//! | [`profile`] | Route table, profile types, update form |
//! | [`store`] | View-state store for the last resolved profile |
//! | [`transport`] | Shared HTTP transport |
//! | [`config`] | Environment-backed configuration |

pub mod client;
pub mod config;
pub mod probe;
pub mod profile;
pub mod store;
pub mod transport;

pub use client::{ProfileClient, ProfileClientBuilder};
pub use probe::{EndpointCandidate, ProbeOutcome, Resolution};
pub use profile::{PhotoSource, ProfileRoutes, ProfileUpdate, StudentProfile};
pub use store::{ProfileSnapshot, ProfileView};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
