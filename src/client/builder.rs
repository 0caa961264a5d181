use crate::client::core::ProfileClient;
use crate::config::ClientConfig;
use crate::probe::{CandidateProbe, HttpProber};
use crate::profile::ProfileRoutes;
use crate::store::ProfileStore;
use crate::transport::HttpTransport;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Anything not set here falls back to the `CAMPUS_*` environment variables
/// (see [`crate::config`]), then to built-in defaults.
pub struct ProfileClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    proxy_url: Option<String>,
    bearer_token: Option<String>,
    credential_service: Option<String>,
    routes: Option<ProfileRoutes>,
    routes_file: Option<PathBuf>,
    store: Option<Arc<ProfileStore>>,
    prober: Option<Arc<dyn CandidateProbe>>,
}

impl ProfileClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            proxy_url: None,
            bearer_token: None,
            credential_service: None,
            routes: None,
            routes_file: None,
            store: None,
            prober: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Transport-wide timeout, shared by every probe and write.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Read the bearer token from the OS keyring under this service name.
    pub fn credential_service(mut self, service: impl Into<String>) -> Self {
        self.credential_service = Some(service.into());
        self
    }

    pub fn routes(mut self, routes: ProfileRoutes) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn routes_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.routes_file = Some(path.into());
        self
    }

    /// Publish into an existing store instead of a fresh one.
    pub fn store(mut self, store: Arc<ProfileStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the network prober used for reads.
    ///
    /// This is primarily for testing resolution order without a server.
    pub fn prober(mut self, prober: Arc<dyn CandidateProbe>) -> Self {
        self.prober = Some(prober);
        self
    }

    /// Resolve the configuration this builder would use.
    pub fn config(&self) -> Result<ClientConfig> {
        let mut config = match &self.base_url {
            Some(url) => {
                let mut config = ClientConfig::new(url.clone());
                config.apply_env();
                config
            }
            None => ClientConfig::from_env()?,
        };
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(proxy) = &self.proxy_url {
            config.proxy_url = Some(proxy.clone());
        }
        if let Some(token) = &self.bearer_token {
            config.bearer_token = Some(token.clone());
        }
        if let Some(service) = &self.credential_service {
            config.credential_service = Some(service.clone());
        }
        if let Some(path) = &self.routes_file {
            config.routes_file = Some(path.clone());
        }
        Ok(config)
    }

    pub fn build(self) -> Result<ProfileClient> {
        let config = self.config()?;
        let transport = Arc::new(HttpTransport::new(&config)?);

        let routes = match self.routes {
            Some(routes) => {
                routes.validate()?;
                routes
            }
            None => match &config.routes_file {
                Some(path) => ProfileRoutes::from_file(path)?,
                None => ProfileRoutes::default(),
            },
        };

        let prober: Arc<dyn CandidateProbe> = match self.prober {
            Some(prober) => prober,
            None => Arc::new(HttpProber::new(Arc::clone(&transport))),
        };

        tracing::debug!(
            base_url = transport.base_url(),
            read_candidates = routes.read_candidates().len(),
            timeout_ms = config.timeout.as_millis(),
            "profile client built"
        );

        Ok(ProfileClient {
            transport,
            prober,
            routes,
            store: self.store.unwrap_or_else(ProfileStore::shared),
        })
    }
}

impl Default for ProfileClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
