//! Error catalog: the immutable `code -> definition` mapping.

use std::collections::HashMap;

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

/// Status used when a definition carries no usable HTTP status.
pub const FALLBACK_STATUS: StatusCode = StatusCode::BAD_REQUEST;

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Number(u16),
    Text(String),
    Other(serde_json::Value),
}

fn fallback_response_code() -> u16 {
    tracing::warn!(
        fallback = FALLBACK_STATUS.as_u16(),
        "Catalog entry has no response_code"
    );
    FALLBACK_STATUS.as_u16()
}

/// Catalog files carry `response_code` either as `"404"` or `404`. Anything
/// else degrades to [`FALLBACK_STATUS`].
fn deserialize_response_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match StatusRepr::deserialize(deserializer)? {
        StatusRepr::Number(code) => return Ok(code),
        StatusRepr::Text(text) => text.trim().parse::<u16>().map_err(|_| text),
        StatusRepr::Other(value) => Err(value.to_string()),
    };
    Ok(parsed.unwrap_or_else(|value| {
        tracing::warn!(
            value = %value,
            fallback = FALLBACK_STATUS.as_u16(),
            "Catalog entry has a non-numeric response_code"
        );
        FALLBACK_STATUS.as_u16()
    }))
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDefinition {
    /// Error code; taken from the catalog key when omitted in the file.
    #[serde(default)]
    pub code: String,
    /// Message template with positional `$1`, `$2`, ... placeholders.
    #[serde(default)]
    pub message: String,
    /// Link to documentation about the error.
    #[serde(default)]
    pub more_info: String,
    /// HTTP status associated with the error.
    #[serde(
        default = "fallback_response_code",
        deserialize_with = "deserialize_response_code"
    )]
    pub response_code: u16,
}

impl ErrorDefinition {
    /// HTTP status of this definition, [`FALLBACK_STATUS`] if out of range.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.response_code).unwrap_or(FALLBACK_STATUS)
    }
}

/// Immutable mapping from error code to [`ErrorDefinition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, ErrorDefinition>,
}

impl Catalog {
    /// Parse a catalog document: a JSON object keyed by error code.
    ///
    /// # Errors
    /// Returns the parser error when the text is not a catalog object.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, ErrorDefinition> = serde_json::from_str(text)?;
        Ok(raw.into_iter().collect())
    }

    /// Look up the definition for `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&ErrorDefinition> {
        self.entries.get(code)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All codes, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Definitions ordered by code.
    pub fn definitions(&self) -> impl Iterator<Item = &ErrorDefinition> {
        self.codes().into_iter().filter_map(|code| self.get(code))
    }
}

impl FromIterator<(String, ErrorDefinition)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, ErrorDefinition)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, mut def)| {
                if def.code.is_empty() {
                    def.code.clone_from(&key);
                } else if def.code != key {
                    tracing::warn!(
                        key = %key,
                        code = %def.code,
                        "Catalog entry code does not match its key"
                    );
                }
                (key, def)
            })
            .collect();
        Self { entries }
    }
}
