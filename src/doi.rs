//! DOI registration port.
//!
//! The core never talks to a registrar directly; it goes through the
//! [`DoiService`] trait. [`PrefixDoiService`] is the deterministic
//! implementation used by the CLI and tests: it mints `prefix/suffix`
//! identifiers without any network traffic.

use serde::{Deserialize, Serialize};

use crate::error::ScholiaResult;

/// A registered digital object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Doi(String);

impl Doi {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Doi {
    fn from(raw: String) -> Self {
        Doi(raw)
    }
}

impl std::fmt::Display for Doi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata submitted to the registrar.
#[derive(Debug, Clone)]
pub struct DoiRegistration {
    /// Registrar-side suffix, typically the version resource ID.
    pub suffix: String,
    pub title: String,
    pub creators: Vec<String>,
    pub resource_type: String,
    pub url: Option<String>,
}

/// Registrar port. Implementations may fail; the publish workflow treats a
/// failure as terminal and performs no retry.
pub trait DoiService {
    fn register(&self, registration: &DoiRegistration) -> ScholiaResult<Doi>;
}

/// Deterministic registrar: `prefix/suffix`, no side effects.
#[derive(Debug, Clone)]
pub struct PrefixDoiService {
    prefix: String,
}

impl PrefixDoiService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl DoiService for PrefixDoiService {
    fn register(&self, registration: &DoiRegistration) -> ScholiaResult<Doi> {
        let doi = Doi(format!("{}/{}", self.prefix, registration.suffix));
        tracing::info!(doi = %doi, title = %registration.title, "registered DOI");
        Ok(doi)
    }
}
