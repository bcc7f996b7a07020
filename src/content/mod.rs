//! Content-type services built on the action pipeline.
//!
//! A content type is a Resource role: the same graph node acts as a
//! comparison or smart review because of the classes it carries. Services
//! validate commands, materialize fields as statements through the shared
//! step vocabulary, and hand versioning off to the publishing service.

pub mod comparison;
pub mod smart_review;

use crate::error::{ScholiaResult, WorkflowError};
use crate::store::GraphStore;
use crate::thing::{Resource, ThingId};
use crate::vocab::classes;

/// Resolve a content resource, requiring the given role class.
///
/// Published version resources are immutable; resolving one for modification
/// fails with `NotModifiable` before any field validation runs.
pub(crate) fn resolve_modifiable(
    store: &GraphStore,
    id: &ThingId,
    role: &ThingId,
    published_role: &ThingId,
    missing: impl FnOnce(ThingId) -> WorkflowError,
) -> ScholiaResult<Resource> {
    let Some(resource) = store.find_resource(id) else {
        return Err(missing(id.clone()).into());
    };
    if resource.is_a(published_role) {
        return Err(WorkflowError::NotModifiable { id: id.clone() }.into());
    }
    if !resource.is_a(role) {
        return Err(missing(id.clone()).into());
    }
    Ok(resource)
}

/// Check that every referenced contribution exists and carries the
/// `Contribution` class; at least one is required.
pub(crate) fn validate_contributions(
    store: &GraphStore,
    contributions: &[ThingId],
) -> ScholiaResult<()> {
    if contributions.is_empty() {
        return Err(WorkflowError::MissingRequiredValue {
            field: "contributions",
        }
        .into());
    }
    for id in contributions {
        let found = store
            .find_resource(id)
            .is_some_and(|r| r.is_a(&classes::contribution()));
        if !found {
            return Err(WorkflowError::ContributionNotFound { id: id.clone() }.into());
        }
    }
    Ok(())
}

/// Check that every referenced research field exists with the
/// `ResearchField` class.
pub(crate) fn validate_research_fields(
    store: &GraphStore,
    fields: &[ThingId],
) -> ScholiaResult<()> {
    for id in fields {
        let found = store
            .find_resource(id)
            .is_some_and(|r| r.is_a(&classes::research_field()));
        if !found {
            return Err(WorkflowError::ResearchFieldNotFound { id: id.clone() }.into());
        }
    }
    Ok(())
}
