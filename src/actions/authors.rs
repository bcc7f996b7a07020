//! Author lists: validation and graph materialization.
//!
//! Authors are stored as an ordered `List` resource attached to the content
//! resource via `hasAuthors`. Plain names become literal elements; authors
//! carrying an ORCID or homepage become `Author` resources with those values
//! as literal properties. Updates reuse elements whose content is unchanged
//! so their statement history survives.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::actions::properties::SinglePropertyUpdater;
use crate::error::{ScholiaResult, WorkflowError};
use crate::statement::StatementId;
use crate::store::{GraphStore, NewResource, PageRequest, StatementFilter};
use crate::thing::{validate_label, ContributorId, ThingId};
use crate::vocab::{classes, predicates};

static ORCID_RE: OnceLock<Regex> = OnceLock::new();

fn orcid_regex() -> &'static Regex {
    ORCID_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").unwrap())
}

/// One author as supplied by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub orcid: Option<String>,
    pub homepage: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orcid: None,
            homepage: None,
        }
    }

    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }
}

/// Validate an author collection: names non-blank, ORCIDs well-formed and
/// unique within the list.
pub fn validate_authors(authors: &[Author]) -> ScholiaResult<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for author in authors {
        validate_label(&author.name).map_err(|e| WorkflowError::InvalidField {
            field: "author name",
            reason: e.to_string(),
        })?;
        if let Some(ref orcid) = author.orcid {
            if !orcid_regex().is_match(orcid) {
                return Err(WorkflowError::InvalidOrcid {
                    value: orcid.clone(),
                }
                .into());
            }
            if !seen.insert(orcid) {
                return Err(WorkflowError::DuplicateAuthor {
                    value: orcid.clone(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Maintains the author list of a content resource.
pub struct AuthorListWriter<'a> {
    store: &'a GraphStore,
}

impl<'a> AuthorListWriter<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// The `List` resource attached via `hasAuthors`, if one exists.
    pub fn find_list(&self, subject: &ThingId) -> Option<ThingId> {
        let page = self.store.find_statements(
            &StatementFilter::by_subject(subject.clone())
                .with_predicate(predicates::has_authors()),
            PageRequest::SINGLE,
        );
        page.first().map(|s| s.object.clone())
    }

    /// Authors currently stored for a subject, in list order.
    pub fn read_authors(&self, subject: &ThingId) -> Vec<Author> {
        let Some(list) = self.find_list(subject) else {
            return Vec::new();
        };
        let mut elements = self.store.find_statements(
            &StatementFilter::by_subject(list).with_predicate(predicates::has_list_element()),
            PageRequest::ALL,
        );
        // List order is creation order.
        elements.content.reverse();
        elements
            .content
            .iter()
            .filter_map(|s| self.read_author(&s.object))
            .collect()
    }

    fn read_author(&self, id: &ThingId) -> Option<Author> {
        match self.store.get_thing(id)? {
            crate::thing::Thing::Literal(literal) => Some(Author::named(literal.label)),
            crate::thing::Thing::Resource(resource) => {
                let single = SinglePropertyUpdater::new(self.store);
                Some(Author {
                    name: resource.label,
                    orcid: single.current_literal(id, &predicates::has_orcid()),
                    homepage: single.current_literal(id, &predicates::has_website()),
                })
            }
            _ => None,
        }
    }

    /// Create the author list for a subject that has none yet.
    pub fn create(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        authors: &[Author],
    ) -> ScholiaResult<ThingId> {
        validate_authors(authors)?;
        let list = self.store.create_resource(
            NewResource::labelled("authors list", contributor.clone())
                .with_classes([classes::list()]),
        )?;
        for author in authors {
            let element = self.materialize_author(contributor, author)?;
            self.store.create_statement(
                list.clone(),
                predicates::has_list_element(),
                element,
                contributor.clone(),
            )?;
        }
        self.store.create_statement(
            subject.clone(),
            predicates::has_authors(),
            list.clone(),
            contributor.clone(),
        )?;
        Ok(list)
    }

    /// Replace the author list contents, reusing unchanged author resources.
    pub fn update(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        authors: &[Author],
    ) -> ScholiaResult<ThingId> {
        validate_authors(authors)?;
        let Some(list) = self.find_list(subject) else {
            return self.create(contributor, subject, authors);
        };

        let elements = self.store.find_statements(
            &StatementFilter::by_subject(list.clone())
                .with_predicate(predicates::has_list_element()),
            PageRequest::ALL,
        );
        let mut reusable: Vec<(ThingId, Author)> = elements
            .content
            .iter()
            .filter_map(|s| Some((s.object.clone(), self.read_author(&s.object)?)))
            .collect();

        // Old element statements are rebuilt to restore ordering; author
        // resources with identical content are reused.
        let stale: BTreeSet<StatementId> =
            elements.content.iter().map(|s| s.id.clone()).collect();
        self.store.delete_statements(&stale);

        for author in authors {
            let element = match reusable.iter().position(|(_, a)| a == author) {
                Some(idx) => reusable.swap_remove(idx).0,
                None => self.materialize_author(contributor, author)?,
            };
            self.store.create_statement(
                list.clone(),
                predicates::has_list_element(),
                element,
                contributor.clone(),
            )?;
        }
        Ok(list)
    }

    /// A plain name becomes a literal element; identifiers force a resource.
    fn materialize_author(
        &self,
        contributor: &ContributorId,
        author: &Author,
    ) -> ScholiaResult<ThingId> {
        if author.orcid.is_none() && author.homepage.is_none() {
            return self
                .store
                .create_literal(crate::store::NewLiteral::plain(
                    author.name.clone(),
                    contributor.clone(),
                ));
        }
        let id = self.store.create_resource(
            NewResource::labelled(author.name.clone(), contributor.clone())
                .with_classes([classes::author()]),
        )?;
        let single = SinglePropertyUpdater::new(self.store);
        single.set_optional_literal(
            contributor,
            &id,
            &predicates::has_orcid(),
            author.orcid.as_deref(),
            None,
        )?;
        single.set_optional_literal(
            contributor,
            &id,
            &predicates::has_website(),
            author.homepage.as_deref(),
            None,
        )?;
        Ok(id)
    }
}
