//! Profile client: read resolution, writes and the view-state store.
//!
//! Keep the public surface small and predictable. Implementation details are
//! split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod read;
mod write;

pub use builder::ProfileClientBuilder;
pub use core::ProfileClient;
