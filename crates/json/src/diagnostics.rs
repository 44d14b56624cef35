//! Per-parse error and warning log.

use tracing::trace;

use crate::error::{ParseError, ParseWarning};

/// Errors, warnings and the duplicate-key flag recorded by one parse call.
///
/// Both parsers reset their log at the start of every call, so the contents
/// always describe the most recent input only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<ParseError>,
    warnings: Vec<ParseWarning>,
    name_repeated: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.errors.clear();
        self.warnings.clear();
        self.name_repeated = false;
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// True if any object in the last input repeated a key.
    pub fn is_name_repeated(&self) -> bool {
        self.name_repeated
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn record_error(&mut self, err: ParseError) {
        self.errors.push(err);
    }

    pub(crate) fn record_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn duplicate_key(&mut self, key: &str) {
        trace!(key, "duplicate object key, keeping the later value");
        self.name_repeated = true;
        self.warnings.push(ParseWarning::DuplicateKey(key.to_owned()));
    }
}
