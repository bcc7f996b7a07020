//! Statements: directed, predicate-labeled edges with their own identity.
//!
//! A [`Statement`] connects two Things through a Predicate and carries its own
//! provenance (creator, timestamp). Statements are immutable except for
//! whole-field endpoint replacement through the store's explicit update
//! operation.

use serde::{Deserialize, Serialize};

use crate::thing::{ContributorId, ThingId};

/// Unique identifier for a statement (`S…`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct StatementId(String);

impl StatementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix (`S12` → `12`), used for deterministic ordering.
    pub fn numeric_suffix(&self) -> Option<u64> {
        self.0.strip_prefix('S').and_then(|s| s.parse().ok())
    }
}

impl From<&str> for StatementId {
    fn from(raw: &str) -> Self {
        StatementId(raw.to_owned())
    }
}

impl From<String> for StatementId {
    fn from(raw: String) -> Self {
        StatementId(raw)
    }
}

impl std::fmt::Display for StatementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed labeled edge between two Things.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: StatementId,
    pub subject: ThingId,
    pub predicate: ThingId,
    pub object: ThingId,
    pub created_by: ContributorId,
    /// Milliseconds since the UNIX epoch.
    pub created_at: u64,
}

/// Order key: most recent first, statement-ID suffix as tie-break.
pub(crate) fn recency_key(s: &Statement) -> (std::cmp::Reverse<u64>, std::cmp::Reverse<u64>) {
    (
        std::cmp::Reverse(s.created_at),
        std::cmp::Reverse(s.id.numeric_suffix().unwrap_or(0)),
    )
}
