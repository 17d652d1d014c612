//! `suppress_response_codes` handling.
//!
//! Some clients cannot read bodies of non-2xx responses. Passing
//! `suppress_response_codes=true` makes the service answer `200` and rely on
//! the `response_code` embedded in every error record.

use std::collections::{BTreeMap, HashMap};

use crate::registry::{DEFAULT_RESPONSE_CODE, ErrorRegistry};

/// Name of the request parameter carrying the flag.
pub const SUPPRESS_PARAM: &str = "suppress_response_codes";

/// Catalog code recorded when the flag has an unrecognized value.
pub const INVALID_SUPPRESSION_FLAG_CODE: &str = "306";

/// Status reported while response codes are suppressed.
pub const SUPPRESSED_RESPONSE_CODE: u16 = 200;

/// Read access to the parameters of the incoming request.
pub trait ParamSource {
    fn param(&self, name: &str) -> Option<String>;
}

impl<S: std::hash::BuildHasher> ParamSource for HashMap<String, String, S> {
    fn param(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn param(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn param(&self, name: &str) -> Option<String> {
        (**self).param(name)
    }
}

/// Decoded query string. Repeated keys keep their first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode an `application/x-www-form-urlencoded` query string, with or
    /// without the leading `?`.
    ///
    /// # Errors
    /// Returns the decoder error for malformed input.
    pub fn parse(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = serde_urlencoded::from_str(query)?;
        Ok(Self { pairs })
    }

    /// Decode the query component of `uri`; no query means no parameters.
    ///
    /// # Errors
    /// Returns the decoder error for a malformed query.
    pub fn from_uri(uri: &http::Uri) -> Result<Self, serde_urlencoded::de::Error> {
        uri.query().map_or_else(|| Ok(Self::default()), Self::parse)
    }
}

impl ParamSource for QueryParams {
    fn param(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

/// Interpretation of a raw flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressFlag {
    /// Parameter not sent
    Absent,
    /// `true`: always answer 200
    Suppress,
    /// `false`: report the real status
    Report,
    /// Anything else, including an empty value, kept verbatim
    Invalid(String),
}

impl SuppressFlag {
    /// Trimmed, case-insensitive parse.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Absent;
        };
        let value = raw.trim();
        if value.eq_ignore_ascii_case("true") {
            Self::Suppress
        } else if value.eq_ignore_ascii_case("false") {
            Self::Report
        } else {
            Self::Invalid(raw.to_owned())
        }
    }
}

/// Decides the response code from the suppression flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCodePolicy {
    pub param_name: String,
    pub default_code: u16,
    pub suppressed_code: u16,
    pub invalid_flag_code: String,
}

impl Default for ResponseCodePolicy {
    fn default() -> Self {
        Self {
            param_name: SUPPRESS_PARAM.to_owned(),
            default_code: DEFAULT_RESPONSE_CODE,
            suppressed_code: SUPPRESSED_RESPONSE_CODE,
            invalid_flag_code: INVALID_SUPPRESSION_FLAG_CODE.to_owned(),
        }
    }
}

impl ResponseCodePolicy {
    /// Resolve the response code for `flag`.
    ///
    /// An unrecognized value keeps the default code and is recorded in
    /// `registry` under [`Self::invalid_flag_code`]. Each call records again,
    /// so call once per request.
    pub fn resolve(&self, flag: Option<&str>, registry: &mut ErrorRegistry) -> u16 {
        match SuppressFlag::parse(flag) {
            SuppressFlag::Absent | SuppressFlag::Report => self.default_code,
            SuppressFlag::Suppress => self.suppressed_code,
            SuppressFlag::Invalid(value) => {
                tracing::warn!(
                    param = %self.param_name,
                    value = %value,
                    "Invalid suppression flag"
                );
                registry.add_error::<&str>(&self.invalid_flag_code, &[]);
                self.default_code
            }
        }
    }
}
