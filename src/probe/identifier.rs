use crate::{Error, ErrorContext, Result};

/// A non-empty identifier value bound to the parameter key it is sent under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    key: String,
    value: String,
}

impl Identifier {
    /// Fails with a validation error when the value is empty or only whitespace.
    pub fn new(key: impl Into<String>, value: impl AsRef<str>) -> Result<Self> {
        let key = key.into();
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(Error::validation_with_context(
                "missing identifier",
                ErrorContext::new()
                    .with_field_path(key)
                    .with_source("identifier"),
            ));
        }
        Ok(Self {
            key,
            value: value.to_string(),
        })
    }

    /// Same as [`Identifier::new`] but for values that may be absent.
    pub fn from_optional(key: impl Into<String>, value: Option<&str>) -> Result<Self> {
        Self::new(key, value.unwrap_or_default())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
