//! Per-request error accumulation.

use std::sync::Arc;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ErrorDefinition, FALLBACK_STATUS};
use crate::render::{DEFAULT_PLACEHOLDER_POLICY, MessageRenderer, PlaceholderPolicy};
use crate::suppress::{ParamSource, ResponseCodePolicy};

/// Message of the record produced for codes missing from the catalog.
pub const UNKNOWN_ERROR_MESSAGE: &str = "This error is not known";

/// `more_info` of the record produced for codes missing from the catalog.
pub const UNKNOWN_ERROR_MORE_INFO: &str = "A link where to find more info about an unknown error";

/// Response code reported until the suppression flag says otherwise.
pub const DEFAULT_RESPONSE_CODE: u16 = 400;

/// A rendered error entry owned by one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub code: String,
    pub message: String,
    pub more_info: String,
    pub response_code: u16,
}

impl ErrorRecord {
    /// Record for a code that has no catalog entry.
    #[must_use]
    pub fn unknown(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: UNKNOWN_ERROR_MESSAGE.to_owned(),
            more_info: UNKNOWN_ERROR_MORE_INFO.to_owned(),
            response_code: FALLBACK_STATUS.as_u16(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.response_code).unwrap_or(FALLBACK_STATUS)
    }
}

impl From<&ErrorDefinition> for ErrorRecord {
    fn from(def: &ErrorDefinition) -> Self {
        Self {
            code: def.code.clone(),
            message: def.message.clone(),
            more_info: def.more_info.clone(),
            response_code: def.response_code,
        }
    }
}

/// Error state of a single request.
///
/// Every [`ErrorRegistry::add_error`] call appends exactly one record, in
/// call order. Codes missing from the catalog degrade to
/// [`ErrorRecord::unknown`] instead of failing.
#[derive(Debug, Clone)]
pub struct ErrorRegistry {
    catalog: Arc<Catalog>,
    renderer: MessageRenderer,
    has_errors: bool,
    records: Vec<ErrorRecord>,
    response_code: u16,
}

impl ErrorRegistry {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            renderer: MessageRenderer::new(DEFAULT_PLACEHOLDER_POLICY),
            has_errors: false,
            records: Vec::new(),
            response_code: DEFAULT_RESPONSE_CODE,
        }
    }

    #[must_use]
    pub fn with_placeholder_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.renderer = MessageRenderer::new(policy);
        self
    }

    /// Record an error by catalog code, rendering `params` into its message.
    pub fn add_error<S: AsRef<str>>(&mut self, code: &str, params: &[S]) {
        self.has_errors = true;

        let record = if let Some(def) = self.catalog.get(code) {
            let mut record = ErrorRecord::from(def);
            if !params.is_empty() {
                record.message = self.renderer.render(&def.message, params);
            }
            record
        } else {
            tracing::warn!(code = %code, "Unknown error code");
            ErrorRecord::unknown(code)
        };

        self.records.push(record);
    }

    /// Records in the order they were added.
    #[must_use]
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ErrorRecord> {
        self.records
    }

    /// Whether `add_error` has been called, known code or not.
    #[must_use]
    pub fn errors_exist(&self) -> bool {
        self.has_errors
    }

    /// Status code to report for this request.
    #[must_use]
    pub fn response_code(&self) -> u16 {
        self.response_code
    }

    /// Apply the `suppress_response_codes` request parameter with the
    /// default [`ResponseCodePolicy`]. Call once per request.
    pub fn check_suppress_response_codes<P: ParamSource + ?Sized>(&mut self, params: &P) {
        self.apply_response_code_policy(&ResponseCodePolicy::default(), params);
    }

    /// Like [`Self::check_suppress_response_codes`] with a custom policy.
    pub fn apply_response_code_policy<P: ParamSource + ?Sized>(
        &mut self,
        policy: &ResponseCodePolicy,
        params: &P,
    ) {
        let flag = params.param(&policy.param_name);
        let code = policy.resolve(flag.as_deref(), self);
        self.response_code = code;
    }
}
