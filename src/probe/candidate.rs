use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the identifier travels in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamEncoding {
    /// `?key=value`
    Query,
    /// `{"key": "value"}`
    JsonBody,
    /// `multipart/form-data` with a single text field
    Multipart,
}

impl ParamEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamEncoding::Query => "query",
            ParamEncoding::JsonBody => "json-body",
            ParamEncoding::Multipart => "multipart",
        }
    }
}

/// One guessed (path, method, encoding) combination for a logical resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointCandidate {
    pub path: String,
    pub method: HttpMethod,
    pub encoding: ParamEncoding,
}

impl EndpointCandidate {
    pub fn new(path: impl Into<String>, method: HttpMethod, encoding: ParamEncoding) -> Self {
        Self {
            path: path.into(),
            method,
            encoding,
        }
    }

    pub fn get_query(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get, ParamEncoding::Query)
    }

    pub fn post_multipart(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Post, ParamEncoding::Multipart)
    }
}

impl fmt::Display for EndpointCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.path, self.encoding.as_str())
    }
}
