//! Integration tests with mock HTTP server

pub mod profile_write;
pub mod read_resolution;
