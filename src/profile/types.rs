use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys under which the backend wraps the profile object.
const WRAPPER_KEYS: [&str; 3] = ["data", "profile", "student"];
const MAX_UNWRAP_DEPTH: usize = 3;

/// Typed view over a resolved profile payload.
///
/// The backend is loose about scalar types (ids arrive as numbers or strings),
/// so every known field is read as an optional string. Fields this struct does
/// not know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default, deserialize_with = "loose_string")]
    pub u_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub u_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub u_email: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub u_phone: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub u_gender: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub u_profile_photo: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub s_father_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub s_date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub s_address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub s_city: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub s_country: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub u_created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn loose_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

impl StudentProfile {
    /// Find the profile object inside a response payload.
    ///
    /// Looks at the top level first, then under `data`, `profile` or `student`
    /// (arrays yield their first element). Returns `None` when no object with
    /// a known profile field is found.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let object = locate(payload, 0)?;
        serde_json::from_value(Value::Object(object.clone())).ok()
    }

    pub fn display_name(&self) -> &str {
        self.u_name.as_deref().unwrap_or("")
    }
}

fn locate(value: &Value, depth: usize) -> Option<&Map<String, Value>> {
    if depth > MAX_UNWRAP_DEPTH {
        return None;
    }
    match value {
        Value::Object(map) => {
            if PROFILE_FIELDS.iter().any(|f| map.contains_key(*f)) {
                return Some(map);
            }
            WRAPPER_KEYS
                .iter()
                .filter_map(|k| map.get(*k))
                .find_map(|inner| locate(inner, depth + 1))
        }
        Value::Array(items) => items.first().and_then(|first| locate(first, depth + 1)),
        _ => None,
    }
}

/// Form field names accepted by the write route, in submission order.
pub const PROFILE_FIELDS: [&str; 12] = [
    "u_id",
    "u_name",
    "u_email",
    "u_phone",
    "u_gender",
    "u_profile_photo",
    "s_father_name",
    "s_date_of_birth",
    "s_address",
    "s_city",
    "s_country",
    "u_created_at",
];
