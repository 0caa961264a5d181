//! Declarative route table for the profile resource.

use crate::probe::EndpointCandidate;
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_IDENTIFIER_KEY: &str = "u_id";
pub const DEFAULT_WRITE_PATH: &str = "/api/admin/student-profile-update";

const READ_PATHS: [&str; 4] = [
    "/api/admin/student-profile-ap",
    "/api/admin/student-profile-api",
    "/api/student-profile-ap",
    "/api/student-profile-api",
];

static DEFAULT_ROUTES: Lazy<ProfileRoutes> = Lazy::new(|| ProfileRoutes {
    identifier_key: DEFAULT_IDENTIFIER_KEY.to_string(),
    read: ReadRoutes {
        primary: READ_PATHS.iter().map(|p| EndpointCandidate::get_query(*p)).collect(),
        fallback: READ_PATHS
            .iter()
            .map(|p| EndpointCandidate::post_multipart(*p))
            .collect(),
    },
    write: WriteRoute {
        path: DEFAULT_WRITE_PATH.to_string(),
    },
});

/// Read candidates: the primary list is tried first, then the fallback list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRoutes {
    pub primary: Vec<EndpointCandidate>,
    #[serde(default)]
    pub fallback: Vec<EndpointCandidate>,
}

/// The single authoritative multipart write route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRoute {
    pub path: String,
}

/// Where profile reads and writes go.
///
/// ```yaml
/// identifier_key: u_id
/// read:
///   primary:
///     - { path: /api/student-profile-api, method: GET, encoding: query }
///   fallback:
///     - { path: /api/student-profile-api, method: POST, encoding: multipart }
/// write:
///   path: /api/admin/student-profile-update
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRoutes {
    #[serde(default = "default_identifier_key")]
    pub identifier_key: String,
    pub read: ReadRoutes,
    pub write: WriteRoute,
}

fn default_identifier_key() -> String {
    DEFAULT_IDENTIFIER_KEY.to_string()
}

impl Default for ProfileRoutes {
    fn default() -> Self {
        DEFAULT_ROUTES.clone()
    }
}

impl ProfileRoutes {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let routes: ProfileRoutes = serde_yaml::from_str(yaml)?;
        routes.validate()?;
        Ok(routes)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("cannot read route table: {}", e),
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_source("routes"),
            )
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// All read candidates in probing order.
    pub fn read_candidates(&self) -> Vec<EndpointCandidate> {
        self.read
            .primary
            .iter()
            .chain(self.read.fallback.iter())
            .cloned()
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &str, msg: &str| {
            Error::configuration_with_context(
                msg.to_string(),
                ErrorContext::new()
                    .with_field_path(field.to_string())
                    .with_source("routes"),
            )
        };
        if self.identifier_key.trim().is_empty() {
            return Err(invalid("identifier_key", "identifier key must not be empty"));
        }
        if self.read.primary.is_empty() && self.read.fallback.is_empty() {
            return Err(invalid("read", "at least one read candidate is required"));
        }
        if let Some(c) = self
            .read_candidates()
            .iter()
            .find(|c| !c.path.starts_with('/'))
        {
            return Err(invalid(
                "read",
                &format!("candidate path '{}' must start with '/'", c.path),
            ));
        }
        if !self.write.path.starts_with('/') {
            return Err(invalid("write.path", "write path must start with '/'"));
        }
        Ok(())
    }
}
