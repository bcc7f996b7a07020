//! Smart reviews: living survey articles built from ordered text sections.
//!
//! A smart review draft is a Resource with class `SmartReview`; its sections
//! are `Section` resources linked via `hasSection`, each holding its body as
//! a `description` literal. Section order is the creation order of the link
//! statements, so updates rebuild the links while reusing unchanged section
//! resources. Smart reviews may be republished; `LatestVersion` migrates.

use std::collections::BTreeSet;

use crate::actions::authors::{validate_authors, Author, AuthorListWriter};
use crate::actions::properties::{CollectionPropertyUpdater, SinglePropertyUpdater};
use crate::actions::validators::LabelValidator;
use crate::actions::{run_pipeline, Action};
use crate::error::{ScholiaResult, WorkflowError};
use crate::publish::{PublishCommand, PublishingService};
use crate::statement::StatementId;
use crate::store::{GraphStore, NewResource, PageRequest, StatementFilter};
use crate::thing::{ContributorId, ThingId};
use crate::vocab::{classes, predicates};

/// One ordered text section of a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub text: Option<String>,
}

impl Section {
    pub fn new(heading: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSmartReviewCommand {
    pub contributor: ContributorId,
    pub title: String,
    pub research_fields: Vec<ThingId>,
    pub authors: Vec<Author>,
    pub sections: Vec<Section>,
}

/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateSmartReviewCommand {
    pub title: Option<String>,
    pub research_fields: Option<Vec<ThingId>>,
    pub authors: Option<Vec<Author>>,
    pub sections: Option<Vec<Section>>,
}

#[derive(Debug, Clone)]
pub struct PublishSmartReviewCommand {
    pub contributor: ContributorId,
    pub smart_review: ThingId,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub register_doi: bool,
}

pub struct SmartReviewService<'a> {
    store: &'a GraphStore,
}

impl<'a> SmartReviewService<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    pub fn create(&self, command: &CreateSmartReviewCommand) -> ScholiaResult<ThingId> {
        let store = self.store;
        let steps: Vec<Box<dyn Action<CreateSmartReviewCommand, Option<ThingId>> + '_>> = vec![
            Box::new(LabelValidator::new(
                "title",
                |c: &CreateSmartReviewCommand| Some(c.title.clone()),
            )),
            Box::new(|c: &CreateSmartReviewCommand, state: Option<ThingId>| {
                super::validate_research_fields(store, &c.research_fields)?;
                Ok(state)
            }),
            Box::new(|c: &CreateSmartReviewCommand, state: Option<ThingId>| {
                validate_authors(&c.authors)?;
                Ok(state)
            }),
            Box::new(|c: &CreateSmartReviewCommand, state: Option<ThingId>| {
                validate_sections(&c.sections)?;
                Ok(state)
            }),
            Box::new(|c: &CreateSmartReviewCommand, _: Option<ThingId>| {
                let id = store.create_resource(
                    NewResource::labelled(c.title.clone(), c.contributor.clone())
                        .with_classes([classes::smart_review()]),
                )?;
                tracing::info!(id = %id, "created smart review draft");
                Ok(Some(id))
            }),
            Box::new(|c: &CreateSmartReviewCommand, state: Option<ThingId>| {
                let id = state.clone().expect("draft created by previous step");
                CollectionPropertyUpdater::new(store).set_objects(
                    &c.contributor,
                    &id,
                    &predicates::has_research_field(),
                    &c.research_fields.iter().cloned().collect(),
                )?;
                if !c.authors.is_empty() {
                    AuthorListWriter::new(store).create(&c.contributor, &id, &c.authors)?;
                }
                self.write_sections(&c.contributor, &id, &c.sections)?;
                Ok(state)
            }),
        ];
        let id = run_pipeline(&steps, command, None)?;
        Ok(id.expect("pipeline produced a draft ID"))
    }

    pub fn update(
        &self,
        contributor: &ContributorId,
        id: &ThingId,
        command: &UpdateSmartReviewCommand,
    ) -> ScholiaResult<()> {
        super::resolve_modifiable(
            self.store,
            id,
            &classes::smart_review(),
            &classes::smart_review_published(),
            |id| WorkflowError::SmartReviewNotFound { id },
        )?;
        if let Some(ref title) = command.title {
            LabelValidator::new("title", |c: &UpdateSmartReviewCommand| c.title.clone())
                .execute(command, ())?;
            self.store.update_label(id, title)?;
        }
        if let Some(ref fields) = command.research_fields {
            super::validate_research_fields(self.store, fields)?;
            CollectionPropertyUpdater::new(self.store).set_objects(
                contributor,
                id,
                &predicates::has_research_field(),
                &fields.iter().cloned().collect(),
            )?;
        }
        if let Some(ref authors) = command.authors {
            validate_authors(authors)?;
            AuthorListWriter::new(self.store).update(contributor, id, authors)?;
        }
        if let Some(ref sections) = command.sections {
            validate_sections(sections)?;
            self.write_sections(contributor, id, sections)?;
        }
        Ok(())
    }

    /// Sections of a review, in order.
    pub fn read_sections(&self, id: &ThingId) -> Vec<Section> {
        let mut links = self.store.find_statements(
            &StatementFilter::by_subject(id.clone()).with_predicate(predicates::has_section()),
            PageRequest::ALL,
        );
        links.content.reverse();
        let single = SinglePropertyUpdater::new(self.store);
        links
            .content
            .iter()
            .filter_map(|s| {
                let resource = self.store.find_resource(&s.object)?;
                Some(Section {
                    heading: resource.label,
                    text: single.current_literal(&s.object, &predicates::description()),
                })
            })
            .collect()
    }

    /// Rebuild the `hasSection` links to the desired sections, reusing
    /// section resources whose heading and text are unchanged.
    fn write_sections(
        &self,
        contributor: &ContributorId,
        id: &ThingId,
        sections: &[Section],
    ) -> ScholiaResult<()> {
        let links = self.store.find_statements(
            &StatementFilter::by_subject(id.clone()).with_predicate(predicates::has_section()),
            PageRequest::ALL,
        );
        let single = SinglePropertyUpdater::new(self.store);
        let mut reusable: Vec<(ThingId, Section)> = links
            .content
            .iter()
            .filter_map(|s| {
                let resource = self.store.find_resource(&s.object)?;
                let section = Section {
                    heading: resource.label,
                    text: single.current_literal(&s.object, &predicates::description()),
                };
                Some((s.object.clone(), section))
            })
            .collect();

        let stale: BTreeSet<StatementId> = links.content.iter().map(|s| s.id.clone()).collect();
        self.store.delete_statements(&stale);

        for section in sections {
            let element = match reusable.iter().position(|(_, s)| s == section) {
                Some(idx) => reusable.swap_remove(idx).0,
                None => {
                    let resource = self.store.create_resource(
                        NewResource::labelled(section.heading.clone(), contributor.clone())
                            .with_classes([classes::section()]),
                    )?;
                    single.set_optional_literal(
                        contributor,
                        &resource,
                        &predicates::description(),
                        section.text.as_deref(),
                        None,
                    )?;
                    resource
                }
            };
            self.store.create_statement(
                id.clone(),
                predicates::has_section(),
                element,
                contributor.clone(),
            )?;
        }

        // Dropped sections lose their body statements as well.
        for (orphan, _) in reusable {
            let stale: BTreeSet<StatementId> = self
                .store
                .statements_about(&orphan)
                .iter()
                .map(|s| s.id.clone())
                .collect();
            self.store.delete_statements(&stale);
        }
        Ok(())
    }

    /// Publish the draft. Smart reviews may republish; `LatestVersion`
    /// migrates to the newest version.
    pub fn publish(
        &self,
        publisher: &PublishingService<'_>,
        command: &PublishSmartReviewCommand,
    ) -> ScholiaResult<ThingId> {
        self.store
            .find_resource(&command.smart_review)
            .filter(|r| r.is_a(&classes::smart_review()))
            .ok_or_else(|| WorkflowError::SmartReviewNotFound {
                id: command.smart_review.clone(),
            })?;
        publisher.publish(&PublishCommand {
            contributor: command.contributor.clone(),
            target: command.smart_review.clone(),
            content_class: classes::smart_review(),
            published_class: classes::smart_review_published(),
            subject: command.subject.clone(),
            description: command.description.clone(),
            register_doi: command.register_doi,
        })
    }
}

fn validate_sections(sections: &[Section]) -> ScholiaResult<()> {
    for section in sections {
        crate::thing::validate_label(&section.heading).map_err(|e| {
            WorkflowError::InvalidField {
                field: "section heading",
                reason: e.to_string(),
            }
        })?;
    }
    Ok(())
}
