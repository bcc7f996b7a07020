//! Well-known vocabulary: the fixed registry of predicate and class IDs
//! used by the content-type workflows.
//!
//! These are configuration constants, not computed values. The IDs follow the
//! original naming of the scholarly graph (`P26` for DOIs, named predicates
//! elsewhere). [`seed_well_known`] bootstraps them into a store so that
//! referential-integrity checks hold before any workflow runs.

use crate::error::ScholiaResult;
use crate::store::{GraphStore, NewClass, NewPredicate};
use crate::thing::{ContributorId, ThingId};

/// Well-known predicate IDs.
pub mod predicates {
    use super::ThingId;

    pub fn description() -> ThingId {
        ThingId::from("description")
    }

    pub fn has_doi() -> ThingId {
        ThingId::from("P26")
    }

    pub fn has_research_field() -> ThingId {
        ThingId::from("P30")
    }

    pub fn has_contribution() -> ThingId {
        ThingId::from("P31")
    }

    pub fn compares_contribution() -> ThingId {
        ThingId::from("compareContribution")
    }

    pub fn has_authors() -> ThingId {
        ThingId::from("hasAuthors")
    }

    pub fn has_list_element() -> ThingId {
        ThingId::from("hasListElement")
    }

    pub fn has_orcid() -> ThingId {
        ThingId::from("hasORCID")
    }

    pub fn has_website() -> ThingId {
        ThingId::from("website")
    }

    pub fn reference() -> ThingId {
        ThingId::from("reference")
    }

    pub fn is_anonymized() -> ThingId {
        ThingId::from("isAnonymized")
    }

    pub fn has_published_version() -> ThingId {
        ThingId::from("hasPublishedVersion")
    }

    pub fn has_section() -> ThingId {
        ThingId::from("hasSection")
    }

    pub fn has_subject() -> ThingId {
        ThingId::from("hasSubject")
    }

    pub fn has_related_resource() -> ThingId {
        ThingId::from("relatedResource")
    }

    pub fn has_related_figure() -> ThingId {
        ThingId::from("relatedFigure")
    }

    pub fn has_image() -> ThingId {
        ThingId::from("hasImage")
    }

    pub fn has_url() -> ThingId {
        ThingId::from("url")
    }
}

/// Well-known class IDs.
pub mod classes {
    use super::ThingId;

    pub fn comparison() -> ThingId {
        ThingId::from("Comparison")
    }

    pub fn comparison_published() -> ThingId {
        ThingId::from("ComparisonPublished")
    }

    pub fn comparison_related_resource() -> ThingId {
        ThingId::from("ComparisonRelatedResource")
    }

    pub fn comparison_related_figure() -> ThingId {
        ThingId::from("ComparisonRelatedFigure")
    }

    pub fn smart_review() -> ThingId {
        ThingId::from("SmartReview")
    }

    pub fn smart_review_published() -> ThingId {
        ThingId::from("SmartReviewPublished")
    }

    pub fn latest_version() -> ThingId {
        ThingId::from("LatestVersion")
    }

    pub fn contribution() -> ThingId {
        ThingId::from("Contribution")
    }

    pub fn research_field() -> ThingId {
        ThingId::from("ResearchField")
    }

    pub fn list() -> ThingId {
        ThingId::from("List")
    }

    pub fn author() -> ThingId {
        ThingId::from("Author")
    }

    pub fn section() -> ThingId {
        ThingId::from("Section")
    }
}

/// Create the well-known predicates and classes in the given store.
///
/// Idempotent: entries that already exist are left untouched.
pub fn seed_well_known(store: &GraphStore) -> ScholiaResult<()> {
    let system = ContributorId::unknown();

    let predicate_table: &[(fn() -> ThingId, &str)] = &[
        (predicates::description, "description"),
        (predicates::has_doi, "has DOI"),
        (predicates::has_research_field, "has research field"),
        (predicates::has_contribution, "has contribution"),
        (predicates::compares_contribution, "compares contribution"),
        (predicates::has_authors, "has authors"),
        (predicates::has_list_element, "has list element"),
        (predicates::has_orcid, "has ORCID"),
        (predicates::has_website, "website"),
        (predicates::reference, "reference"),
        (predicates::is_anonymized, "is anonymized"),
        (predicates::has_published_version, "has published version"),
        (predicates::has_section, "has section"),
        (predicates::has_subject, "has subject"),
        (predicates::has_related_resource, "has related resource"),
        (predicates::has_related_figure, "has related figure"),
        (predicates::has_image, "has image"),
        (predicates::has_url, "url"),
    ];

    for (id, label) in predicate_table {
        let id = id();
        if store.get_thing(&id).is_none() {
            store.create_predicate(NewPredicate {
                id: Some(id),
                label: (*label).to_owned(),
                contributor: system.clone(),
            })?;
        }
    }

    let class_table: &[(fn() -> ThingId, &str)] = &[
        (classes::comparison, "Comparison"),
        (classes::comparison_published, "Comparison (published)"),
        (
            classes::comparison_related_resource,
            "Comparison related resource",
        ),
        (
            classes::comparison_related_figure,
            "Comparison related figure",
        ),
        (classes::smart_review, "Smart review"),
        (classes::smart_review_published, "Smart review (published)"),
        (classes::latest_version, "Latest version"),
        (classes::contribution, "Contribution"),
        (classes::research_field, "Research field"),
        (classes::list, "List"),
        (classes::author, "Author"),
        (classes::section, "Section"),
    ];

    for (id, label) in class_table {
        let id = id();
        if store.get_thing(&id).is_none() {
            store.create_class(NewClass {
                id: Some(id),
                label: (*label).to_owned(),
                uri: None,
                contributor: system.clone(),
            })?;
        }
    }

    tracing::debug!(
        predicates = predicate_table.len(),
        classes = class_table.len(),
        "seeded well-known vocabulary"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_idempotent() {
        let store = GraphStore::new();
        seed_well_known(&store).unwrap();
        let before = store.thing_count();
        seed_well_known(&store).unwrap();
        assert_eq!(store.thing_count(), before);
    }

    #[test]
    fn seeded_predicates_resolve() {
        let store = GraphStore::new();
        seed_well_known(&store).unwrap();
        let thing = store.get_thing(&predicates::has_doi()).unwrap();
        assert!(thing.is_predicate());
        assert_eq!(thing.label(), "has DOI");
    }

    #[test]
    fn seeded_classes_resolve() {
        let store = GraphStore::new();
        seed_well_known(&store).unwrap();
        let thing = store.get_thing(&classes::comparison()).unwrap();
        assert!(thing.as_class().is_some());
    }
}
