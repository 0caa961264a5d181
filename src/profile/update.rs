//! Profile write form.

use super::mime::photo_mime_type;
use super::types::PROFILE_FIELDS;
use crate::{Error, ErrorContext, Result};
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use url::Url;

const PHOTO_FIELD: &str = "u_profile_photo";
const DEFAULT_PHOTO_NAME: &str = "profile.jpg";

/// Where a profile photo value points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// A file on this device, uploaded as a file part.
    LocalFile(PathBuf),
    /// A photo already hosted by the server; not re-uploaded.
    Remote(String),
}

impl PhotoSource {
    /// Classify a photo reference as handed over by a media picker.
    ///
    /// `http(s)://` values are remote, `file://` URIs and plain paths are local.
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return PhotoSource::Remote(reference.to_string());
        }
        if lower.starts_with("file://") {
            if let Some(path) = Url::parse(reference)
                .ok()
                .and_then(|u| u.to_file_path().ok())
            {
                return PhotoSource::LocalFile(path);
            }
            return PhotoSource::LocalFile(PathBuf::from(&reference["file://".len()..]));
        }
        PhotoSource::LocalFile(PathBuf::from(reference))
    }
}

/// Fields to submit to the write route.
///
/// Only fields that are present and non-empty after trimming are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub u_id: String,
    pub u_name: Option<String>,
    pub u_email: Option<String>,
    pub u_phone: Option<String>,
    pub u_gender: Option<String>,
    pub u_profile_photo: Option<PhotoSource>,
    pub s_father_name: Option<String>,
    pub s_date_of_birth: Option<String>,
    pub s_address: Option<String>,
    pub s_city: Option<String>,
    pub s_country: Option<String>,
    pub u_created_at: Option<String>,
}

/// A photo file part, before its bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPart {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
}

/// The exact parts a write will send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    pub text_fields: Vec<(&'static str, String)>,
    pub photo: Option<PhotoPart>,
}

impl ProfileUpdate {
    pub fn new(u_id: impl Into<String>) -> Self {
        Self {
            u_id: u_id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.u_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.u_email = Some(email.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.s_city = Some(city.into());
        self
    }

    pub fn with_photo(mut self, photo: PhotoSource) -> Self {
        self.u_profile_photo = Some(photo);
        self
    }

    /// Set a field by its form name, e.g. `s_city`.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let slot = match name {
            "u_id" => {
                self.u_id = value;
                return Ok(());
            }
            PHOTO_FIELD => {
                self.u_profile_photo = Some(PhotoSource::parse(&value));
                return Ok(());
            }
            "u_name" => &mut self.u_name,
            "u_email" => &mut self.u_email,
            "u_phone" => &mut self.u_phone,
            "u_gender" => &mut self.u_gender,
            "s_father_name" => &mut self.s_father_name,
            "s_date_of_birth" => &mut self.s_date_of_birth,
            "s_address" => &mut self.s_address,
            "s_city" => &mut self.s_city,
            "s_country" => &mut self.s_country,
            "u_created_at" => &mut self.u_created_at,
            other => {
                return Err(Error::validation_with_context(
                    format!("unknown profile field '{}'", other),
                    ErrorContext::new()
                        .with_field_path(other.to_string())
                        .with_details(format!("expected one of: {}", PROFILE_FIELDS.join(", ")))
                        .with_source("profile_update"),
                ))
            }
        };
        *slot = Some(value);
        Ok(())
    }

    /// Decide which parts are sent. Fails when `u_id` is empty.
    pub fn plan(&self) -> Result<UpdatePlan> {
        let u_id = self.u_id.trim();
        if u_id.is_empty() {
            return Err(Error::validation_with_context(
                "missing identifier",
                ErrorContext::new()
                    .with_field_path("u_id")
                    .with_source("profile_update"),
            ));
        }

        let mut text_fields = vec![("u_id", u_id.to_string())];
        let optional: [(&'static str, &Option<String>); 10] = [
            ("u_name", &self.u_name),
            ("u_email", &self.u_email),
            ("u_phone", &self.u_phone),
            ("u_gender", &self.u_gender),
            ("s_father_name", &self.s_father_name),
            ("s_date_of_birth", &self.s_date_of_birth),
            ("s_address", &self.s_address),
            ("s_city", &self.s_city),
            ("s_country", &self.s_country),
            ("u_created_at", &self.u_created_at),
        ];
        for (name, value) in optional {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                text_fields.push((name, v.to_string()));
            }
        }

        let photo = match &self.u_profile_photo {
            Some(PhotoSource::LocalFile(path)) if !path.as_os_str().is_empty() => {
                Some(PhotoPart {
                    file_name: file_name_of(path),
                    mime: photo_mime_type(path),
                    path: path.clone(),
                })
            }
            _ => None,
        };

        Ok(UpdatePlan { text_fields, photo })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_PHOTO_NAME)
        .to_string()
}

impl UpdatePlan {
    /// Read the photo (if any) and assemble the multipart form.
    pub async fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.text_fields {
            form = form.text(name, value);
        }
        if let Some(photo) = self.photo {
            let bytes = tokio::fs::read(&photo.path).await?;
            let part = Part::bytes(bytes)
                .file_name(photo.file_name)
                .mime_str(photo.mime)
                .map_err(|e| Error::configuration(format!("Invalid mime: {}", e)))?;
            form = form.part(PHOTO_FIELD, part);
        }
        Ok(form)
    }
}
