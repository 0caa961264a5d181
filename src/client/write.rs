//! Profile write path: one multipart POST to the authoritative route.

use crate::probe::{HttpMethod, Resolution};
use crate::profile::ProfileUpdate;
use crate::{Error, ErrorContext, Result};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::core::ProfileClient;

impl ProfileClient {
    /// Submit `update` to the write route and return the server's body.
    ///
    /// No probing happens here. Any non-2xx status is returned as
    /// [`Error::Remote`]; the store is not touched.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<serde_json::Value> {
        let plan = update.plan()?;
        let field_count = plan.text_fields.len();
        let has_photo = plan.photo.is_some();
        let form = plan.into_form().await?;

        let request_id = Uuid::new_v4().to_string();
        let path = self.routes.write.path.as_str();
        let req = self
            .transport
            .request(HttpMethod::Post, path, &request_id)
            .multipart(form);

        let start = Instant::now();
        let reply = self.transport.send(req).await?;
        if !reply.is_success() {
            warn!(
                endpoint = path,
                http_status = reply.status,
                request_id = request_id.as_str(),
                "profile update rejected"
            );
            return Err(Error::remote(
                reply.status,
                reply.body,
                ErrorContext::new()
                    .with_field_path(path)
                    .with_request_id(request_id)
                    .with_source("profile_write"),
            ));
        }

        info!(
            endpoint = path,
            http_status = reply.status,
            fields = field_count,
            photo = has_photo,
            duration_ms = start.elapsed().as_millis(),
            "profile updated"
        );
        reply.json()
    }

    /// Write, then resolve the same identifier again so the store reflects the
    /// server's view of the profile.
    pub async fn update_and_refresh(&self, update: &ProfileUpdate) -> Result<Resolution> {
        self.update_profile(update).await?;
        self.fetch_profile(&update.u_id).await
    }
}
