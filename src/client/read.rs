//! Profile read path: ordered probing plus publication to the store.

use crate::probe::{probe_in_order, Identifier, Resolution};
use crate::profile::StudentProfile;
use crate::Result;
use tracing::{info, warn};

use super::core::ProfileClient;

impl ProfileClient {
    /// Resolve the profile for `identifier`.
    ///
    /// An empty identifier fails before any request is made. On success the
    /// payload is returned unmodified and, when a profile object can be found
    /// in it, published to the view-state store.
    pub async fn fetch_profile(&self, identifier: &str) -> Result<Resolution> {
        let identifier = Identifier::new(self.routes.identifier_key.clone(), identifier)?;
        let candidates = self.routes.read_candidates();
        let resolution = probe_in_order(self.prober.as_ref(), &identifier, &candidates).await?;

        match StudentProfile::from_payload(&resolution.body) {
            Some(profile) => {
                let version = self.store.publish(
                    profile,
                    resolution.winner.clone(),
                    resolution.request_id.clone(),
                );
                info!(
                    u_id = identifier.value(),
                    version,
                    "profile published"
                );
            }
            None => warn!(
                u_id = identifier.value(),
                winner = %resolution.winner,
                "resolved payload has no profile object; store left unchanged"
            ),
        }
        Ok(resolution)
    }

    /// Same as [`ProfileClient::fetch_profile`], returning only the typed profile.
    pub async fn fetch_student_profile(&self, identifier: &str) -> Result<Option<StudentProfile>> {
        let resolution = self.fetch_profile(identifier).await?;
        Ok(StudentProfile::from_payload(&resolution.body))
    }
}
