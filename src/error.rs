//! Rich diagnostic error types for the scholia backend.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and the offending identifiers so callers can
//! render an actionable problem description. The core never formats HTTP
//! responses; adapters map these kinds onto their own wire format.

use miette::Diagnostic;
use thiserror::Error;

use crate::thing::ThingId;

/// Top-level error type for the scholia backend.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum ScholiaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Publish(#[from] PublishError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error: {source}")]
    #[diagnostic(
        code(scholia::store::io),
        help(
            "A filesystem operation failed. Check that the data directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("redb transaction error: {message}")]
    #[diagnostic(
        code(scholia::store::redb),
        help(
            "The embedded database encountered a transaction error. \
             This may indicate corruption — try restoring from a fresh data directory."
        )
    )]
    Redb { message: String },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(scholia::store::serde),
        help(
            "Failed to serialize or deserialize stored data. \
             This usually means the on-disk format changed between versions."
        )
    )]
    Serialization { message: String },
}

// ---------------------------------------------------------------------------
// Graph errors (statement store invariants)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("thing not found: {id}")]
    #[diagnostic(
        code(scholia::graph::thing_not_found),
        help("No Resource, Literal, Predicate, or Class exists with this ID.")
    )]
    ThingNotFound { id: ThingId },

    #[error("statement not found: {id}")]
    #[diagnostic(code(scholia::graph::statement_not_found))]
    StatementNotFound { id: String },

    #[error("statement subject not found: {id}")]
    #[diagnostic(
        code(scholia::graph::subject_not_found),
        help("The subject of a statement must resolve to an existing Thing.")
    )]
    SubjectNotFound { id: ThingId },

    #[error("statement predicate not found: {id}")]
    #[diagnostic(
        code(scholia::graph::predicate_not_found),
        help(
            "The predicate of a statement must resolve to an existing Predicate. \
             Well-known predicates are created by `vocab::seed_well_known`."
        )
    )]
    PredicateNotFound { id: ThingId },

    #[error("statement object not found: {id}")]
    #[diagnostic(
        code(scholia::graph::object_not_found),
        help("The object of a statement must resolve to an existing Thing.")
    )]
    ObjectNotFound { id: ThingId },

    #[error("duplicate ID: {id}")]
    #[diagnostic(
        code(scholia::graph::duplicate_id),
        help(
            "The explicitly requested ID is already in use. Thing IDs are unique \
             across all four namespaces; omit the ID to have one allocated."
        )
    )]
    DuplicateId { id: ThingId },

    #[error("class URI already in use: {uri} (held by {id})")]
    #[diagnostic(
        code(scholia::graph::uri_already_in_use),
        help("At most one Class may hold a given ontology URI.")
    )]
    UriAlreadyInUse { uri: String, id: ThingId },

    #[error("cannot change the URI of class {id}: a URI is already set")]
    #[diagnostic(
        code(scholia::graph::uri_update_not_allowed),
        help("A class URI may only be set while it is unset; it cannot be replaced.")
    )]
    UriUpdateNotAllowed { id: ThingId },

    #[error("invalid label: {reason}")]
    #[diagnostic(
        code(scholia::graph::invalid_label),
        help("Labels must be non-blank and at most MAX_LABEL_LENGTH characters.")
    )]
    InvalidLabel { reason: String },

    #[error("ID allocation failed after {attempts} attempts")]
    #[diagnostic(
        code(scholia::graph::allocation_failed),
        help(
            "The probe-then-retry allocator could not find a free ID. This should \
             not happen in practice; check for an ID allocation loop."
        )
    )]
    AllocationFailed { attempts: usize },
}

// ---------------------------------------------------------------------------
// Workflow errors (pipeline validation + stored-state conflicts)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum WorkflowError {
    #[error("invalid {field}: {reason}")]
    #[diagnostic(
        code(scholia::workflow::invalid_field),
        help("The named command field failed validation; fix the input and retry.")
    )]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid ORCID: {value}")]
    #[diagnostic(
        code(scholia::workflow::invalid_orcid),
        help("ORCID identifiers have the form 0000-0000-0000-0000 (last digit may be X).")
    )]
    InvalidOrcid { value: String },

    #[error("duplicate author identifier: {value}")]
    #[diagnostic(
        code(scholia::workflow::duplicate_author),
        help("Two authors in the same list carry the same ORCID.")
    )]
    DuplicateAuthor { value: String },

    #[error("contribution not found: {id}")]
    #[diagnostic(
        code(scholia::workflow::contribution_not_found),
        help("Every compared contribution must be an existing Resource with class Contribution.")
    )]
    ContributionNotFound { id: ThingId },

    #[error("research field not found: {id}")]
    #[diagnostic(code(scholia::workflow::research_field_not_found))]
    ResearchFieldNotFound { id: ThingId },

    #[error("comparison not found: {id}")]
    #[diagnostic(code(scholia::workflow::comparison_not_found))]
    ComparisonNotFound { id: ThingId },

    #[error("smart review not found: {id}")]
    #[diagnostic(code(scholia::workflow::smart_review_not_found))]
    SmartReviewNotFound { id: ThingId },

    #[error("{id} is not modifiable")]
    #[diagnostic(
        code(scholia::workflow::not_modifiable),
        help(
            "Published versions are immutable. Edit the live draft instead; it \
             remains editable after publishing."
        )
    )]
    NotModifiable { id: ThingId },

    #[error("missing required value: {field}")]
    #[diagnostic(code(scholia::workflow::missing_required_value))]
    MissingRequiredValue { field: &'static str },
}

// ---------------------------------------------------------------------------
// Publish errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PublishError {
    #[error("{id} is already published")]
    #[diagnostic(
        code(scholia::publish::already_published),
        help("This content type is publish-once; a published version already exists.")
    )]
    AlreadyPublished { id: ThingId },

    #[error("{id} is not publishable as {class}")]
    #[diagnostic(
        code(scholia::publish::not_publishable),
        help("The target must exist and carry the content-type class being published.")
    )]
    NotPublishable { id: ThingId, class: ThingId },

    #[error("DOI registration failed: {message}")]
    #[diagnostic(
        code(scholia::publish::doi_registration),
        help(
            "The external DOI registrar rejected the request. The publish operation \
             was aborted; no retry is performed by the core."
        )
    )]
    DoiRegistration { message: String },
}

/// Convenience alias for functions returning scholia results.
pub type ScholiaResult<T> = std::result::Result<T, ScholiaError>;
