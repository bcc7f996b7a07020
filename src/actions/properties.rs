//! Property mutators: maintain single-valued and multi-valued properties of a
//! resource as statements.
//!
//! Updates are minimal diffs. A statement whose value is already correct is
//! left untouched (its ID and timestamps survive); only statements that must
//! change are deleted and re-created. Literal objects are never edited in
//! place; a changed value means a fresh Literal.

use std::collections::BTreeSet;

use crate::error::{ScholiaResult, WorkflowError};
use crate::statement::StatementId;
use crate::store::{GraphStore, NewLiteral, PageRequest, StatementFilter};
use crate::thing::{ContributorId, ThingId};

/// Maintains single-valued literal or object properties of a subject.
pub struct SinglePropertyUpdater<'a> {
    store: &'a GraphStore,
}

impl<'a> SinglePropertyUpdater<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Current literal value of `(subject, predicate)`, if any.
    pub fn current_literal(&self, subject: &ThingId, predicate: &ThingId) -> Option<String> {
        let page = self.store.find_statements(
            &StatementFilter::by_subject(subject.clone()).with_predicate(predicate.clone()),
            PageRequest::SINGLE,
        );
        let statement = page.first()?;
        self.store
            .get_thing(&statement.object)?
            .as_literal()
            .map(|l| l.label.clone())
    }

    /// Set a required literal property: create when absent, leave untouched
    /// when the stored value already matches, otherwise replace.
    pub fn set_required_literal(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        predicate: &ThingId,
        value: &str,
        datatype: Option<&str>,
    ) -> ScholiaResult<()> {
        self.apply_literal(contributor, subject, predicate, Some(value), datatype)
    }

    /// Set or clear an optional literal property. `None` deletes any stored
    /// value.
    pub fn set_optional_literal(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        predicate: &ThingId,
        value: Option<&str>,
        datatype: Option<&str>,
    ) -> ScholiaResult<()> {
        self.apply_literal(contributor, subject, predicate, value, datatype)
    }

    fn apply_literal(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        predicate: &ThingId,
        value: Option<&str>,
        datatype: Option<&str>,
    ) -> ScholiaResult<()> {
        let existing = self.store.find_statements(
            &StatementFilter::by_subject(subject.clone()).with_predicate(predicate.clone()),
            PageRequest::ALL,
        );

        if let Some(value) = value {
            let already_correct = existing.content.len() == 1
                && existing.first().is_some_and(|s| {
                    self.store
                        .get_thing(&s.object)
                        .and_then(|t| t.as_literal().map(|l| l.label == value))
                        .unwrap_or(false)
                });
            if already_correct {
                return Ok(());
            }
        }

        let stale: BTreeSet<StatementId> =
            existing.content.iter().map(|s| s.id.clone()).collect();
        self.store.delete_statements(&stale);

        if let Some(value) = value {
            let literal = match datatype {
                Some(dt) => NewLiteral::typed(value, dt, contributor.clone()),
                None => NewLiteral::plain(value, contributor.clone()),
            };
            let object = self.store.create_literal(literal)?;
            self.store.create_statement(
                subject.clone(),
                predicate.clone(),
                object,
                contributor.clone(),
            )?;
        }
        Ok(())
    }

    /// Set or clear a single object-valued property (the object is an
    /// existing Thing, not a fresh Literal).
    pub fn set_optional_object(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        predicate: &ThingId,
        object: Option<&ThingId>,
    ) -> ScholiaResult<()> {
        let existing = self.store.find_statements(
            &StatementFilter::by_subject(subject.clone()).with_predicate(predicate.clone()),
            PageRequest::ALL,
        );
        if let Some(object) = object {
            if existing.content.len() == 1
                && existing.first().is_some_and(|s| s.object == *object)
            {
                return Ok(());
            }
        }
        let stale: BTreeSet<StatementId> =
            existing.content.iter().map(|s| s.id.clone()).collect();
        self.store.delete_statements(&stale);
        if let Some(object) = object {
            self.store.create_statement(
                subject.clone(),
                predicate.clone(),
                object.clone(),
                contributor.clone(),
            )?;
        }
        Ok(())
    }

    /// Like [`set_optional_object`](Self::set_optional_object) but a `None`
    /// is a workflow error for required properties.
    pub fn set_required_object(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        predicate: &ThingId,
        field: &'static str,
        object: Option<&ThingId>,
    ) -> ScholiaResult<()> {
        let object = object.ok_or(WorkflowError::MissingRequiredValue { field })?;
        self.set_optional_object(contributor, subject, predicate, Some(object))
    }
}

/// Maintains multi-valued properties as a set-diff over statements.
pub struct CollectionPropertyUpdater<'a> {
    store: &'a GraphStore,
}

impl<'a> CollectionPropertyUpdater<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Reconcile `(subject, predicate)` statements with the desired object
    /// set. Statements already pointing at a desired object are kept.
    pub fn set_objects(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        predicate: &ThingId,
        desired: &BTreeSet<ThingId>,
    ) -> ScholiaResult<()> {
        let existing = self.store.find_statements(
            &StatementFilter::by_subject(subject.clone()).with_predicate(predicate.clone()),
            PageRequest::ALL,
        );

        let mut covered: BTreeSet<ThingId> = BTreeSet::new();
        let mut stale: BTreeSet<StatementId> = BTreeSet::new();
        for statement in &existing.content {
            // Keep the first statement per desired object, drop the rest.
            if desired.contains(&statement.object) && covered.insert(statement.object.clone()) {
                continue;
            }
            stale.insert(statement.id.clone());
        }
        self.store.delete_statements(&stale);

        for object in desired {
            if !covered.contains(object) {
                self.store.create_statement(
                    subject.clone(),
                    predicate.clone(),
                    object.clone(),
                    contributor.clone(),
                )?;
            }
        }
        Ok(())
    }

    /// Reconcile a multi-valued literal property by label. Values already
    /// present keep their statement and Literal; missing values get a fresh
    /// Literal each.
    pub fn set_literal_labels(
        &self,
        contributor: &ContributorId,
        subject: &ThingId,
        predicate: &ThingId,
        desired: &[String],
    ) -> ScholiaResult<()> {
        let wanted: BTreeSet<&str> = desired.iter().map(String::as_str).collect();
        let existing = self.store.find_statements(
            &StatementFilter::by_subject(subject.clone()).with_predicate(predicate.clone()),
            PageRequest::ALL,
        );

        let mut covered: BTreeSet<String> = BTreeSet::new();
        let mut stale: BTreeSet<StatementId> = BTreeSet::new();
        for statement in &existing.content {
            let label = self
                .store
                .get_thing(&statement.object)
                .and_then(|t| t.as_literal().map(|l| l.label.clone()));
            match label {
                Some(label) if wanted.contains(label.as_str()) => {
                    // Keep one statement per value, drop duplicates.
                    if !covered.insert(label) {
                        stale.insert(statement.id.clone());
                    }
                }
                _ => {
                    stale.insert(statement.id.clone());
                }
            }
        }
        self.store.delete_statements(&stale);

        for value in wanted {
            if !covered.contains(value) {
                let object = self
                    .store
                    .create_literal(NewLiteral::plain(value, contributor.clone()))?;
                self.store.create_statement(
                    subject.clone(),
                    predicate.clone(),
                    object,
                    contributor.clone(),
                )?;
            }
        }
        Ok(())
    }
}
