//! View-state store for the last resolved profile.
//!
//! The store has exactly one writer: the read resolver inside
//! [`ProfileClient`](crate::ProfileClient). Screens and other consumers hold a
//! [`ProfileView`], which can only read. Readers never block the writer.

use crate::probe::EndpointCandidate;
use crate::profile::StudentProfile;
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// One published profile and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub profile: StudentProfile,
    pub source: EndpointCandidate,
    pub request_id: String,
    /// Publish counter, starting at 1. Always one more than the snapshot it replaced.
    pub version: u64,
}

#[derive(Default)]
pub struct ProfileStore {
    current: ArcSwapOption<ProfileSnapshot>,
}

impl ProfileStore {
    /// An empty store, ready to be shared between a client and its views.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Swap in a new snapshot and return its version.
    ///
    /// The version is derived from the snapshot being replaced inside the same
    /// read-copy-update, so concurrent publishers can never store an older
    /// version over a newer one.
    pub(crate) fn publish(
        &self,
        profile: StudentProfile,
        source: EndpointCandidate,
        request_id: String,
    ) -> u64 {
        let mut version = 0;
        self.current.rcu(|current| {
            let previous: &Option<Arc<ProfileSnapshot>> = current;
            version = previous.as_ref().map_or(0, |s| s.version) + 1;
            Some(Arc::new(ProfileSnapshot {
                profile: profile.clone(),
                source: source.clone(),
                request_id: request_id.clone(),
                version,
            }))
        });
        version
    }

    pub fn view(self: &Arc<Self>) -> ProfileView {
        ProfileView {
            store: Arc::clone(self),
        }
    }
}

/// Read-only handle on a [`ProfileStore`].
#[derive(Clone)]
pub struct ProfileView {
    store: Arc<ProfileStore>,
}

impl ProfileView {
    pub fn current(&self) -> Option<Arc<ProfileSnapshot>> {
        self.store.current.load_full()
    }

    /// Version of the current snapshot, 0 before the first publish.
    pub fn version(&self) -> u64 {
        self.current().map_or(0, |s| s.version)
    }

    /// The current profile, only if it belongs to `u_id`.
    pub fn profile_for(&self, u_id: &str) -> Option<StudentProfile> {
        self.current()
            .filter(|s| s.profile.u_id.as_deref() == Some(u_id))
            .map(|s| s.profile.clone())
    }
}
