use crate::probe::CandidateProbe;
use crate::profile::ProfileRoutes;
use crate::store::{ProfileStore, ProfileView};
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;

/// Client for the campus profile API.
///
/// Reads go through ordered endpoint probing; writes go to the single write
/// route. Every successful read is published to the client's
/// [`ProfileStore`], observable through [`ProfileClient::view`].
pub struct ProfileClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) prober: Arc<dyn CandidateProbe>,
    pub(crate) routes: ProfileRoutes,
    pub(crate) store: Arc<ProfileStore>,
}

impl ProfileClient {
    pub fn builder() -> crate::client::builder::ProfileClientBuilder {
        crate::client::builder::ProfileClientBuilder::new()
    }

    /// Create a client configured only from the environment.
    pub fn from_env() -> Result<Self> {
        crate::client::builder::ProfileClientBuilder::new().build()
    }

    pub fn routes(&self) -> &ProfileRoutes {
        &self.routes
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Read-only handle on the last resolved profile.
    pub fn view(&self) -> ProfileView {
        self.store.view()
    }
}
