//! Comparisons: tabular juxtapositions of contributions.
//!
//! A comparison draft is a Resource with class `Comparison` whose fields live
//! as statements: `compareContribution` edges to the compared contributions,
//! `P30` edges to research fields, `description`/`reference`/`isAnonymized`
//! literals, and an author list. Publishing is delegated to the publishing
//! service and is publish-once for comparisons.

use std::collections::BTreeSet;

use crate::actions::authors::{validate_authors, Author, AuthorListWriter};
use crate::actions::properties::{CollectionPropertyUpdater, SinglePropertyUpdater};
use crate::actions::validators::{
    DescriptionValidator, LabelCollectionValidator, LabelValidator,
};
use crate::actions::{run_pipeline, Action};
use crate::error::{GraphError, PublishError, ScholiaResult, WorkflowError};
use crate::publish::{PublishCommand, PublishingService};
use crate::statement::StatementId;
use crate::store::{GraphStore, NewResource, PageRequest, StatementFilter};
use crate::thing::{ContributorId, ThingId, XSD_BOOLEAN};
use crate::vocab::{classes, predicates};

/// Command to create a comparison draft.
#[derive(Debug, Clone)]
pub struct CreateComparisonCommand {
    pub contributor: ContributorId,
    pub title: String,
    pub description: Option<String>,
    pub research_fields: Vec<ThingId>,
    /// At least one compared contribution is required.
    pub contributions: Vec<ThingId>,
    pub references: Vec<String>,
    pub is_anonymized: bool,
    pub authors: Vec<Author>,
}

/// Command to update a comparison draft. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateComparisonCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub research_fields: Option<Vec<ThingId>>,
    pub contributions: Option<Vec<ThingId>>,
    pub references: Option<Vec<String>>,
    pub is_anonymized: Option<bool>,
    pub authors: Option<Vec<Author>>,
}

/// Command to publish a comparison draft.
#[derive(Debug, Clone)]
pub struct PublishComparisonCommand {
    pub contributor: ContributorId,
    pub comparison: ThingId,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub register_doi: bool,
}

/// A related resource or figure attached to a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedItem {
    pub id: ThingId,
    pub label: String,
    pub image: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// Command to attach or update a related resource/figure.
#[derive(Debug, Clone)]
pub struct RelatedItemCommand {
    pub label: String,
    pub image: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

pub struct ComparisonService<'a> {
    store: &'a GraphStore,
}

impl<'a> ComparisonService<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Run the create pipeline; returns the new draft's ID.
    pub fn create(&self, command: &CreateComparisonCommand) -> ScholiaResult<ThingId> {
        let store = self.store;
        let steps: Vec<Box<dyn Action<CreateComparisonCommand, Option<ThingId>> + '_>> = vec![
            Box::new(LabelValidator::new("title", |c: &CreateComparisonCommand| {
                Some(c.title.clone())
            })),
            Box::new(DescriptionValidator::new(
                "description",
                |c: &CreateComparisonCommand| c.description.clone(),
            )),
            Box::new(LabelCollectionValidator::new(
                "references",
                |c: &CreateComparisonCommand| c.references.clone(),
            )),
            Box::new(|c: &CreateComparisonCommand, state: Option<ThingId>| {
                super::validate_contributions(store, &c.contributions)?;
                Ok(state)
            }),
            Box::new(|c: &CreateComparisonCommand, state: Option<ThingId>| {
                super::validate_research_fields(store, &c.research_fields)?;
                Ok(state)
            }),
            Box::new(|c: &CreateComparisonCommand, state: Option<ThingId>| {
                validate_authors(&c.authors)?;
                Ok(state)
            }),
            Box::new(|c: &CreateComparisonCommand, _: Option<ThingId>| {
                let id = store.create_resource(
                    NewResource::labelled(c.title.clone(), c.contributor.clone())
                        .with_classes([classes::comparison()]),
                )?;
                tracing::info!(id = %id, "created comparison draft");
                Ok(Some(id))
            }),
            Box::new(|c: &CreateComparisonCommand, state: Option<ThingId>| {
                let id = state.clone().expect("draft created by previous step");
                self.apply_fields(
                    &c.contributor,
                    &id,
                    c.description.as_deref(),
                    Some(&c.research_fields),
                    Some(&c.contributions),
                    Some(&c.references),
                    Some(c.is_anonymized),
                    Some(&c.authors),
                )?;
                Ok(state)
            }),
        ];
        let id = run_pipeline(&steps, command, None)?;
        Ok(id.expect("pipeline produced a draft ID"))
    }

    /// Update a draft. Fails with `NotModifiable` for published versions.
    pub fn update(
        &self,
        contributor: &ContributorId,
        id: &ThingId,
        command: &UpdateComparisonCommand,
    ) -> ScholiaResult<()> {
        let store = self.store;
        let steps: Vec<Box<dyn Action<UpdateComparisonCommand, ()> + '_>> = vec![
            Box::new(|_: &UpdateComparisonCommand, state: ()| {
                super::resolve_modifiable(
                    store,
                    id,
                    &classes::comparison(),
                    &classes::comparison_published(),
                    |id| WorkflowError::ComparisonNotFound { id },
                )?;
                Ok(state)
            }),
            Box::new(LabelValidator::new("title", |c: &UpdateComparisonCommand| {
                c.title.clone()
            })),
            Box::new(DescriptionValidator::new(
                "description",
                |c: &UpdateComparisonCommand| c.description.clone(),
            )),
            Box::new(LabelCollectionValidator::new(
                "references",
                |c: &UpdateComparisonCommand| c.references.clone().unwrap_or_default(),
            )),
            Box::new(|c: &UpdateComparisonCommand, state: ()| {
                if let Some(ref contributions) = c.contributions {
                    super::validate_contributions(store, contributions)?;
                }
                Ok(state)
            }),
            Box::new(|c: &UpdateComparisonCommand, state: ()| {
                if let Some(ref fields) = c.research_fields {
                    super::validate_research_fields(store, fields)?;
                }
                Ok(state)
            }),
            Box::new(|c: &UpdateComparisonCommand, state: ()| {
                if let Some(ref authors) = c.authors {
                    validate_authors(authors)?;
                }
                Ok(state)
            }),
            Box::new(|c: &UpdateComparisonCommand, state: ()| {
                if let Some(ref title) = c.title {
                    store.update_label(id, title)?;
                }
                self.apply_fields(
                    contributor,
                    id,
                    c.description.as_deref(),
                    c.research_fields.as_deref(),
                    c.contributions.as_deref(),
                    c.references.as_deref(),
                    c.is_anonymized,
                    c.authors.as_deref(),
                )?;
                Ok(state)
            }),
        ];
        run_pipeline(&steps, command, ())?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_fields(
        &self,
        contributor: &ContributorId,
        id: &ThingId,
        description: Option<&str>,
        research_fields: Option<&[ThingId]>,
        contributions: Option<&[ThingId]>,
        references: Option<&[String]>,
        is_anonymized: Option<bool>,
        authors: Option<&[Author]>,
    ) -> ScholiaResult<()> {
        let single = SinglePropertyUpdater::new(self.store);
        let collection = CollectionPropertyUpdater::new(self.store);

        if let Some(description) = description {
            single.set_required_literal(
                contributor,
                id,
                &predicates::description(),
                description,
                None,
            )?;
        }
        if let Some(fields) = research_fields {
            collection.set_objects(
                contributor,
                id,
                &predicates::has_research_field(),
                &fields.iter().cloned().collect(),
            )?;
        }
        if let Some(contributions) = contributions {
            collection.set_objects(
                contributor,
                id,
                &predicates::compares_contribution(),
                &contributions.iter().cloned().collect(),
            )?;
        }
        if let Some(references) = references {
            collection.set_literal_labels(
                contributor,
                id,
                &predicates::reference(),
                references,
            )?;
        }
        if let Some(flag) = is_anonymized {
            single.set_required_literal(
                contributor,
                id,
                &predicates::is_anonymized(),
                if flag { "true" } else { "false" },
                Some(XSD_BOOLEAN),
            )?;
        }
        if let Some(authors) = authors {
            let writer = AuthorListWriter::new(self.store);
            writer.update(contributor, id, authors)?;
        }
        Ok(())
    }

    /// Comparisons whose `compareContribution` set includes the contribution.
    pub fn find_by_contribution(&self, contribution: &ThingId) -> Vec<ThingId> {
        self.store
            .find_statements(
                &StatementFilter::by_object(contribution.clone())
                    .with_predicate(predicates::compares_contribution()),
                PageRequest::ALL,
            )
            .content
            .iter()
            .map(|s| s.subject.clone())
            .collect()
    }

    /// Publish the draft. Comparisons are publish-once: an existing
    /// `hasPublishedVersion` link fails with `AlreadyPublished`.
    pub fn publish(
        &self,
        publisher: &PublishingService<'_>,
        command: &PublishComparisonCommand,
    ) -> ScholiaResult<ThingId> {
        let draft = self
            .store
            .find_resource(&command.comparison)
            .filter(|r| r.is_a(&classes::comparison()))
            .ok_or_else(|| WorkflowError::ComparisonNotFound {
                id: command.comparison.clone(),
            })?;
        let existing = self.store.find_statements(
            &StatementFilter::by_subject(draft.id.clone())
                .with_predicate(predicates::has_published_version()),
            PageRequest::SINGLE,
        );
        if !existing.is_empty() {
            return Err(PublishError::AlreadyPublished {
                id: command.comparison.clone(),
            }
            .into());
        }
        publisher.publish(&PublishCommand {
            contributor: command.contributor.clone(),
            target: command.comparison.clone(),
            content_class: classes::comparison(),
            published_class: classes::comparison_published(),
            subject: command.subject.clone(),
            description: command.description.clone(),
            register_doi: command.register_doi,
        })
    }

    // -- related resources and figures --------------------------------------

    pub fn create_related_resource(
        &self,
        contributor: &ContributorId,
        comparison: &ThingId,
        command: &RelatedItemCommand,
    ) -> ScholiaResult<ThingId> {
        self.create_related(
            contributor,
            comparison,
            command,
            classes::comparison_related_resource(),
            predicates::has_related_resource(),
        )
    }

    pub fn create_related_figure(
        &self,
        contributor: &ContributorId,
        comparison: &ThingId,
        command: &RelatedItemCommand,
    ) -> ScholiaResult<ThingId> {
        self.create_related(
            contributor,
            comparison,
            command,
            classes::comparison_related_figure(),
            predicates::has_related_figure(),
        )
    }

    fn create_related(
        &self,
        contributor: &ContributorId,
        comparison: &ThingId,
        command: &RelatedItemCommand,
        class: ThingId,
        link: ThingId,
    ) -> ScholiaResult<ThingId> {
        super::resolve_modifiable(
            self.store,
            comparison,
            &classes::comparison(),
            &classes::comparison_published(),
            |id| WorkflowError::ComparisonNotFound { id },
        )?;
        let id = self.store.create_resource(
            NewResource::labelled(command.label.clone(), contributor.clone())
                .with_classes([class]),
        )?;
        self.apply_related_fields(contributor, &id, command)?;
        self.store
            .create_statement(comparison.clone(), link, id.clone(), contributor.clone())?;
        Ok(id)
    }

    pub fn update_related_item(
        &self,
        contributor: &ContributorId,
        comparison: &ThingId,
        item: &ThingId,
        command: &RelatedItemCommand,
    ) -> ScholiaResult<()> {
        self.resolve_related(comparison, item)?;
        self.store.update_label(item, &command.label)?;
        self.apply_related_fields(contributor, item, command)
    }

    /// Detach and delete a related resource/figure and its literals.
    pub fn delete_related_item(
        &self,
        comparison: &ThingId,
        item: &ThingId,
    ) -> ScholiaResult<()> {
        let link = self.resolve_related(comparison, item)?;
        let mut stale: BTreeSet<StatementId> = self
            .store
            .statements_about(item)
            .iter()
            .map(|s| s.id.clone())
            .collect();
        stale.insert(link);
        self.store.delete_statements(&stale);
        Ok(())
    }

    /// The related resources (not figures) attached to a comparison.
    pub fn find_related_resources(&self, comparison: &ThingId) -> Vec<RelatedItem> {
        self.find_related(comparison, predicates::has_related_resource())
    }

    pub fn find_related_figures(&self, comparison: &ThingId) -> Vec<RelatedItem> {
        self.find_related(comparison, predicates::has_related_figure())
    }

    fn find_related(&self, comparison: &ThingId, link: ThingId) -> Vec<RelatedItem> {
        let single = SinglePropertyUpdater::new(self.store);
        self.store
            .find_statements(
                &StatementFilter::by_subject(comparison.clone()).with_predicate(link),
                PageRequest::ALL,
            )
            .content
            .iter()
            .filter_map(|s| {
                let resource = self.store.find_resource(&s.object)?;
                Some(RelatedItem {
                    id: resource.id.clone(),
                    label: resource.label,
                    image: single.current_literal(&resource.id, &predicates::has_image()),
                    url: single.current_literal(&resource.id, &predicates::has_url()),
                    description: single.current_literal(&resource.id, &predicates::description()),
                })
            })
            .collect()
    }

    fn resolve_related(
        &self,
        comparison: &ThingId,
        item: &ThingId,
    ) -> ScholiaResult<StatementId> {
        let linked = self
            .store
            .statements_about(comparison)
            .into_iter()
            .find(|s| {
                s.object == *item
                    && (s.predicate == predicates::has_related_resource()
                        || s.predicate == predicates::has_related_figure())
            });
        match linked {
            Some(statement) => Ok(statement.id),
            None => Err(GraphError::ThingNotFound { id: item.clone() }.into()),
        }
    }

    fn apply_related_fields(
        &self,
        contributor: &ContributorId,
        id: &ThingId,
        command: &RelatedItemCommand,
    ) -> ScholiaResult<()> {
        let single = SinglePropertyUpdater::new(self.store);
        single.set_optional_literal(
            contributor,
            id,
            &predicates::has_image(),
            command.image.as_deref(),
            None,
        )?;
        single.set_optional_literal(
            contributor,
            id,
            &predicates::has_url(),
            command.url.as_deref(),
            None,
        )?;
        single.set_optional_literal(
            contributor,
            id,
            &predicates::description(),
            command.description.as_deref(),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScholiaError;
    use crate::vocab::seed_well_known;

    fn contributor() -> ContributorId {
        ContributorId::unknown()
    }

    fn seeded() -> (GraphStore, Vec<ThingId>, ThingId) {
        let store = GraphStore::new();
        seed_well_known(&store).unwrap();
        let contributions: Vec<ThingId> = (0..2)
            .map(|i| {
                store
                    .create_resource(
                        NewResource::labelled(format!("contribution {i}"), contributor())
                            .with_classes([classes::contribution()]),
                    )
                    .unwrap()
            })
            .collect();
        let field = store
            .create_resource(
                NewResource::labelled("machine learning", contributor())
                    .with_classes([classes::research_field()]),
            )
            .unwrap();
        (store, contributions, field)
    }

    fn create_command(contributions: &[ThingId], field: &ThingId) -> CreateComparisonCommand {
        CreateComparisonCommand {
            contributor: contributor(),
            title: "A comparison of models".into(),
            description: Some("Benchmarks across datasets".into()),
            research_fields: vec![field.clone()],
            contributions: contributions.to_vec(),
            references: vec!["doi:10.1000/1".into()],
            is_anonymized: false,
            authors: vec![Author::named("Jane Doe").with_orcid("0000-0002-1825-0097")],
        }
    }

    #[test]
    fn create_materializes_all_fields() {
        let (store, contributions, field) = seeded();
        let service = ComparisonService::new(&store);
        let id = service
            .create(&create_command(&contributions, &field))
            .unwrap();

        let resource = store.find_resource(&id).unwrap();
        assert!(resource.is_a(&classes::comparison()));
        assert_eq!(resource.label, "A comparison of models");

        let single = SinglePropertyUpdater::new(&store);
        assert_eq!(
            single
                .current_literal(&id, &predicates::description())
                .as_deref(),
            Some("Benchmarks across datasets")
        );
        assert_eq!(
            single
                .current_literal(&id, &predicates::is_anonymized())
                .as_deref(),
            Some("false")
        );

        let compared = store.find_statements(
            &StatementFilter::by_subject(id.clone())
                .with_predicate(predicates::compares_contribution()),
            PageRequest::ALL,
        );
        assert_eq!(compared.total, 2);
    }

    #[test]
    fn create_requires_a_contribution() {
        let (store, _, field) = seeded();
        let service = ComparisonService::new(&store);
        let mut command = create_command(&[], &field);
        command.contributions.clear();
        let err = service.create(&command).unwrap_err();
        assert!(matches!(
            err,
            ScholiaError::Workflow(WorkflowError::MissingRequiredValue {
                field: "contributions"
            })
        ));
    }

    #[test]
    fn find_by_contribution_links_back() {
        let (store, contributions, field) = seeded();
        let service = ComparisonService::new(&store);
        let id = service
            .create(&create_command(&contributions, &field))
            .unwrap();
        let found = service.find_by_contribution(&contributions[0]);
        assert_eq!(found, vec![id]);
    }

    #[test]
    fn update_diffs_contributions() {
        let (store, contributions, field) = seeded();
        let service = ComparisonService::new(&store);
        let id = service
            .create(&create_command(&contributions, &field))
            .unwrap();
        let extra = store
            .create_resource(
                NewResource::labelled("contribution extra", contributor())
                    .with_classes([classes::contribution()]),
            )
            .unwrap();

        service
            .update(
                &contributor(),
                &id,
                &UpdateComparisonCommand {
                    contributions: Some(vec![contributions[0].clone(), extra.clone()]),
                    ..Default::default()
                },
            )
            .unwrap();

        let compared: Vec<ThingId> = store
            .find_statements(
                &StatementFilter::by_subject(id)
                    .with_predicate(predicates::compares_contribution()),
                PageRequest::ALL,
            )
            .content
            .iter()
            .map(|s| s.object.clone())
            .collect();
        assert_eq!(compared.len(), 2);
        assert!(compared.contains(&extra));
        assert!(!compared.contains(&contributions[1]));
    }

    #[test]
    fn blank_title_update_is_rejected_before_mutation() {
        let (store, contributions, field) = seeded();
        let service = ComparisonService::new(&store);
        let id = service
            .create(&create_command(&contributions, &field))
            .unwrap();
        let err = service
            .update(
                &contributor(),
                &id,
                &UpdateComparisonCommand {
                    title: Some("  ".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ScholiaError::Workflow(WorkflowError::InvalidField { field: "title", .. })
        ));
        assert_eq!(
            store.find_resource(&id).unwrap().label,
            "A comparison of models"
        );
    }

    #[test]
    fn related_resource_crud() {
        let (store, contributions, field) = seeded();
        let service = ComparisonService::new(&store);
        let comparison = service
            .create(&create_command(&contributions, &field))
            .unwrap();

        let item = service
            .create_related_resource(
                &contributor(),
                &comparison,
                &RelatedItemCommand {
                    label: "dataset homepage".into(),
                    image: None,
                    url: Some("https://example.org/data".into()),
                    description: Some("the dataset".into()),
                },
            )
            .unwrap();

        let found = service.find_related_resources(&comparison);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url.as_deref(), Some("https://example.org/data"));

        service
            .update_related_item(
                &contributor(),
                &comparison,
                &item,
                &RelatedItemCommand {
                    label: "dataset homepage".into(),
                    image: None,
                    url: Some("https://example.org/data-v2".into()),
                    description: None,
                },
            )
            .unwrap();
        let found = service.find_related_resources(&comparison);
        assert_eq!(found[0].url.as_deref(), Some("https://example.org/data-v2"));
        assert!(found[0].description.is_none());

        service.delete_related_item(&comparison, &item).unwrap();
        assert!(service.find_related_resources(&comparison).is_empty());
        assert!(store.statements_about(&item).is_empty());
    }

    #[test]
    fn figures_and_resources_are_kept_apart() {
        let (store, contributions, field) = seeded();
        let service = ComparisonService::new(&store);
        let comparison = service
            .create(&create_command(&contributions, &field))
            .unwrap();
        service
            .create_related_figure(
                &contributor(),
                &comparison,
                &RelatedItemCommand {
                    label: "figure 1".into(),
                    image: Some("https://example.org/fig.png".into()),
                    url: None,
                    description: None,
                },
            )
            .unwrap();
        assert_eq!(service.find_related_figures(&comparison).len(), 1);
        assert!(service.find_related_resources(&comparison).is_empty());
    }
}
