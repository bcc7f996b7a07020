//! The statement store: durable, identity-consistent storage of Things and
//! Statements, and the query surface every workflow is built on.
//!
//! [`GraphStore`] keeps the live graph in concurrent hashmaps (DashMap) with
//! subject/object adjacency indexes; [`durable::DurableGraph`] persists it to
//! redb with full ACID guarantees. Any backing engine satisfying these
//! operations is substitutable; workflows only see this module's API.

pub mod cache;
pub mod durable;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rand::Rng;

use crate::error::{GraphError, ScholiaResult};
use crate::statement::{recency_key, Statement, StatementId};
use crate::thing::{
    now_millis, validate_label, Class, ContributorId, ExtractionMethod, Literal, ObservatoryId,
    OrganizationId, Predicate, Resource, Thing, ThingId, Visibility, XSD_STRING,
};

use cache::ClassCache;

/// Upper bound on probe-then-retry ID allocation attempts.
const MAX_ID_ATTEMPTS: usize = 64;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A page request: zero-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// Everything in one page.
    pub const ALL: PageRequest = PageRequest {
        page: 0,
        size: usize::MAX,
    };

    /// Exactly one entry; used for single-valued property lookups.
    pub const SINGLE: PageRequest = PageRequest { page: 0, size: 1 };

    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// A page of results plus the total count for the same filter.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.content.first()
    }

    fn from_sorted(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let content: Vec<T> = all
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Page {
            content,
            total,
            page: request.page,
            size: request.size,
        }
    }
}

// ---------------------------------------------------------------------------
// Statement filters
// ---------------------------------------------------------------------------

/// Filter for [`GraphStore::find_statements`]. At least one field should be
/// set by convention; an empty filter scans the whole store.
///
/// `object_classes` matches when the object's class set intersects it; the
/// pseudo-classes `Literal`, `Resource`, `Predicate`, and `Class` match the
/// Thing variant itself.
#[derive(Debug, Clone, Default)]
pub struct StatementFilter {
    pub subject: Option<ThingId>,
    pub predicate: Option<ThingId>,
    pub object: Option<ThingId>,
    pub object_classes: BTreeSet<ThingId>,
}

impl StatementFilter {
    pub fn by_subject(subject: ThingId) -> Self {
        Self {
            subject: Some(subject),
            ..Default::default()
        }
    }

    pub fn by_object(object: ThingId) -> Self {
        Self {
            object: Some(object),
            ..Default::default()
        }
    }

    pub fn with_predicate(mut self, predicate: ThingId) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_object_class(mut self, class: ThingId) -> Self {
        self.object_classes.insert(class);
        self
    }

    fn matches(&self, statement: &Statement, store: &GraphStore) -> bool {
        if let Some(ref subject) = self.subject {
            if statement.subject != *subject {
                return false;
            }
        }
        if let Some(ref predicate) = self.predicate {
            if statement.predicate != *predicate {
                return false;
            }
        }
        if let Some(ref object) = self.object {
            if statement.object != *object {
                return false;
            }
        }
        if !self.object_classes.is_empty() {
            let Some(thing) = store.get_thing(&statement.object) else {
                return false;
            };
            if !object_class_intersects(&thing, &self.object_classes) {
                return false;
            }
        }
        true
    }
}

fn object_class_intersects(thing: &Thing, wanted: &BTreeSet<ThingId>) -> bool {
    let variant_class = match thing {
        Thing::Resource(_) => "Resource",
        Thing::Literal(_) => "Literal",
        Thing::Predicate(_) => "Predicate",
        Thing::Class(_) => "Class",
    };
    if wanted.contains(&ThingId::from(variant_class)) {
        return true;
    }
    match thing {
        Thing::Resource(r) => r.classes.iter().any(|c| wanted.contains(c)),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Creation commands
// ---------------------------------------------------------------------------

/// Command for creating a Resource. An explicit `id` fails with `DuplicateId`
/// if already taken; `None` allocates one.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub id: Option<ThingId>,
    pub label: String,
    pub classes: BTreeSet<ThingId>,
    pub contributor: ContributorId,
    pub observatory_id: Option<ObservatoryId>,
    pub organization_id: Option<OrganizationId>,
    pub extraction_method: ExtractionMethod,
    pub visibility: Visibility,
}

impl NewResource {
    pub fn labelled(label: impl Into<String>, contributor: ContributorId) -> Self {
        Self {
            id: None,
            label: label.into(),
            classes: BTreeSet::new(),
            contributor,
            observatory_id: None,
            organization_id: None,
            extraction_method: ExtractionMethod::default(),
            visibility: Visibility::default(),
        }
    }

    pub fn with_classes(mut self, classes: impl IntoIterator<Item = ThingId>) -> Self {
        self.classes.extend(classes);
        self
    }
}

/// Command for creating a Literal.
#[derive(Debug, Clone)]
pub struct NewLiteral {
    pub id: Option<ThingId>,
    pub label: String,
    /// Defaults to `xsd:string` when `None`.
    pub datatype: Option<String>,
    pub contributor: ContributorId,
}

impl NewLiteral {
    pub fn plain(label: impl Into<String>, contributor: ContributorId) -> Self {
        Self {
            id: None,
            label: label.into(),
            datatype: None,
            contributor,
        }
    }

    pub fn typed(
        label: impl Into<String>,
        datatype: impl Into<String>,
        contributor: ContributorId,
    ) -> Self {
        Self {
            id: None,
            label: label.into(),
            datatype: Some(datatype.into()),
            contributor,
        }
    }
}

/// Command for creating a Predicate.
#[derive(Debug, Clone)]
pub struct NewPredicate {
    pub id: Option<ThingId>,
    pub label: String,
    pub contributor: ContributorId,
}

/// Command for creating a Class.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub id: Option<ThingId>,
    pub label: String,
    pub uri: Option<String>,
    pub contributor: ContributorId,
}

/// Whole-field endpoint replacement for a statement (rare bulk-edit path).
#[derive(Debug, Clone, Default)]
pub struct StatementUpdate {
    pub subject: Option<ThingId>,
    pub predicate: Option<ThingId>,
    pub object: Option<ThingId>,
}

// ---------------------------------------------------------------------------
// The store
// ---------------------------------------------------------------------------

/// In-memory statement store with dual adjacency indexes.
///
/// Shared mutable resource: callers wrap multi-step workflows in a single
/// transaction boundary at the workflow entry point; the store itself only
/// guarantees per-operation consistency.
pub struct GraphStore {
    things: DashMap<ThingId, Thing>,
    statements: DashMap<StatementId, Statement>,
    /// Subject → statement IDs (outgoing edges).
    by_subject: DashMap<ThingId, Vec<StatementId>>,
    /// Object → statement IDs (incoming edges).
    by_object: DashMap<ThingId, Vec<StatementId>>,
    /// Class URI → class ID, for the one-class-per-URI invariant.
    uri_index: DashMap<String, ThingId>,
    class_cache: ClassCache,
    next_resource: AtomicU64,
    next_literal: AtomicU64,
    next_predicate: AtomicU64,
    next_class: AtomicU64,
    next_statement: AtomicU64,
}

impl GraphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            things: DashMap::new(),
            statements: DashMap::new(),
            by_subject: DashMap::new(),
            by_object: DashMap::new(),
            uri_index: DashMap::new(),
            class_cache: ClassCache::new(),
            next_resource: AtomicU64::new(1),
            next_literal: AtomicU64::new(1),
            next_predicate: AtomicU64::new(1),
            next_class: AtomicU64::new(1),
            next_statement: AtomicU64::new(1),
        }
    }

    // -- identity ----------------------------------------------------------

    /// Probe-then-retry ID allocation.
    ///
    /// Generates a candidate from the per-kind counter and probes the global
    /// ThingId space; on collision (an explicit ID squatting the number) the
    /// counter skips ahead by a random stride and retries. Two concurrent
    /// writers can transiently race here; the retry loop tolerates it rather
    /// than eliminating it (accepted limitation).
    fn allocate_thing_id(&self, prefix: char, counter: &AtomicU64) -> Result<ThingId, GraphError> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ID_ATTEMPTS {
            let n = counter.fetch_add(1, Ordering::Relaxed);
            let candidate = ThingId::from(format!("{prefix}{n}"));
            if !self.things.contains_key(&candidate) {
                return Ok(candidate);
            }
            counter.fetch_add(rng.gen_range(1..16), Ordering::Relaxed);
        }
        Err(GraphError::AllocationFailed {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn allocate_statement_id(&self) -> Result<StatementId, GraphError> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ID_ATTEMPTS {
            let n = self.next_statement.fetch_add(1, Ordering::Relaxed);
            let candidate = StatementId::from(format!("S{n}"));
            if !self.statements.contains_key(&candidate) {
                return Ok(candidate);
            }
            self.next_statement
                .fetch_add(rng.gen_range(1..16), Ordering::Relaxed);
        }
        Err(GraphError::AllocationFailed {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn claim_explicit_id(&self, id: &ThingId) -> Result<(), GraphError> {
        if self.things.contains_key(id) {
            return Err(GraphError::DuplicateId { id: id.clone() });
        }
        Ok(())
    }

    // -- thing creation ----------------------------------------------------

    pub fn create_resource(&self, command: NewResource) -> ScholiaResult<ThingId> {
        validate_label(&command.label)?;
        let id = match command.id {
            Some(id) => {
                self.claim_explicit_id(&id)?;
                id
            }
            None => self.allocate_thing_id('R', &self.next_resource)?,
        };
        let resource = Resource {
            id: id.clone(),
            label: command.label,
            classes: command.classes,
            created_by: command.contributor,
            created_at: now_millis(),
            observatory_id: command.observatory_id,
            organization_id: command.organization_id,
            extraction_method: command.extraction_method,
            visibility: command.visibility,
            verified: None,
        };
        tracing::debug!(id = %id, label = %resource.label, "created resource");
        self.things.insert(id.clone(), Thing::Resource(resource));
        Ok(id)
    }

    pub fn create_literal(&self, command: NewLiteral) -> ScholiaResult<ThingId> {
        validate_label(&command.label)?;
        let id = match command.id {
            Some(id) => {
                self.claim_explicit_id(&id)?;
                id
            }
            None => self.allocate_thing_id('L', &self.next_literal)?,
        };
        let literal = Literal {
            id: id.clone(),
            label: command.label,
            datatype: command.datatype.unwrap_or_else(|| XSD_STRING.to_owned()),
            created_by: command.contributor,
            created_at: now_millis(),
        };
        self.things.insert(id.clone(), Thing::Literal(literal));
        Ok(id)
    }

    pub fn create_predicate(&self, command: NewPredicate) -> ScholiaResult<ThingId> {
        validate_label(&command.label)?;
        let id = match command.id {
            Some(id) => {
                self.claim_explicit_id(&id)?;
                id
            }
            None => self.allocate_thing_id('P', &self.next_predicate)?,
        };
        let predicate = Predicate {
            id: id.clone(),
            label: command.label,
            created_by: command.contributor,
            created_at: now_millis(),
        };
        self.things.insert(id.clone(), Thing::Predicate(predicate));
        Ok(id)
    }

    pub fn create_class(&self, command: NewClass) -> ScholiaResult<ThingId> {
        validate_label(&command.label)?;
        if let Some(ref uri) = command.uri {
            if let Some(holder) = self.uri_index.get(uri) {
                return Err(GraphError::UriAlreadyInUse {
                    uri: uri.clone(),
                    id: holder.value().clone(),
                }
                .into());
            }
        }
        let id = match command.id {
            Some(id) => {
                self.claim_explicit_id(&id)?;
                id
            }
            None => self.allocate_thing_id('C', &self.next_class)?,
        };
        if let Some(ref uri) = command.uri {
            self.uri_index.insert(uri.clone(), id.clone());
        }
        let class = Class {
            id: id.clone(),
            label: command.label,
            uri: command.uri,
            created_by: command.contributor,
            created_at: now_millis(),
        };
        self.things.insert(id.clone(), Thing::Class(class));
        Ok(id)
    }

    // -- thing lookup ------------------------------------------------------

    pub fn get_thing(&self, id: &ThingId) -> Option<Thing> {
        self.things.get(id).map(|r| r.value().clone())
    }

    pub fn find_resource(&self, id: &ThingId) -> Option<Resource> {
        match self.get_thing(id)? {
            Thing::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Class lookup through the read-through cache.
    pub fn find_class(&self, id: &ThingId) -> Option<Class> {
        self.class_cache.get_or_load(id, || {
            self.things.get(id).and_then(|t| t.value().as_class().cloned())
        })
    }

    pub fn thing_count(&self) -> usize {
        self.things.len()
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    // -- thing mutation ----------------------------------------------------

    pub fn update_label(&self, id: &ThingId, label: &str) -> ScholiaResult<()> {
        validate_label(label)?;
        let mut entry = self
            .things
            .get_mut(id)
            .ok_or_else(|| GraphError::ThingNotFound { id: id.clone() })?;
        match entry.value_mut() {
            Thing::Resource(r) => r.label = label.to_owned(),
            Thing::Literal(l) => l.label = label.to_owned(),
            Thing::Predicate(p) => p.label = label.to_owned(),
            Thing::Class(c) => {
                c.label = label.to_owned();
                self.class_cache.invalidate(id);
            }
        }
        Ok(())
    }

    /// Set a class URI. Rejected when the class already holds a different URI
    /// or another class holds the requested one.
    pub fn update_uri(&self, id: &ThingId, uri: &str) -> ScholiaResult<()> {
        if let Some(holder) = self.uri_index.get(uri) {
            if holder.value() != id {
                return Err(GraphError::UriAlreadyInUse {
                    uri: uri.to_owned(),
                    id: holder.value().clone(),
                }
                .into());
            }
            return Ok(());
        }
        let mut entry = self
            .things
            .get_mut(id)
            .ok_or_else(|| GraphError::ThingNotFound { id: id.clone() })?;
        let Thing::Class(class) = entry.value_mut() else {
            return Err(GraphError::ThingNotFound { id: id.clone() }.into());
        };
        match class.uri {
            Some(_) => Err(GraphError::UriUpdateNotAllowed { id: id.clone() }.into()),
            None => {
                class.uri = Some(uri.to_owned());
                self.uri_index.insert(uri.to_owned(), id.clone());
                self.class_cache.invalidate(id);
                Ok(())
            }
        }
    }

    /// Replace a resource's class set.
    pub fn update_classes(&self, id: &ThingId, classes: BTreeSet<ThingId>) -> ScholiaResult<()> {
        let mut entry = self
            .things
            .get_mut(id)
            .ok_or_else(|| GraphError::ThingNotFound { id: id.clone() })?;
        let Thing::Resource(resource) = entry.value_mut() else {
            return Err(GraphError::ThingNotFound { id: id.clone() }.into());
        };
        resource.classes = classes;
        Ok(())
    }

    /// Remove a single class from a resource, if present.
    pub fn remove_class(&self, id: &ThingId, class: &ThingId) -> ScholiaResult<()> {
        let mut entry = self
            .things
            .get_mut(id)
            .ok_or_else(|| GraphError::ThingNotFound { id: id.clone() })?;
        let Thing::Resource(resource) = entry.value_mut() else {
            return Err(GraphError::ThingNotFound { id: id.clone() }.into());
        };
        resource.classes.remove(class);
        Ok(())
    }

    pub fn set_visibility(&self, id: &ThingId, visibility: Visibility) -> ScholiaResult<()> {
        let mut entry = self
            .things
            .get_mut(id)
            .ok_or_else(|| GraphError::ThingNotFound { id: id.clone() })?;
        let Thing::Resource(resource) = entry.value_mut() else {
            return Err(GraphError::ThingNotFound { id: id.clone() }.into());
        };
        resource.visibility = visibility;
        Ok(())
    }

    // -- statements --------------------------------------------------------

    /// Create a statement after resolving all three endpoints.
    ///
    /// Creating an exact `(subject, predicate, object)` duplicate returns the
    /// existing statement's ID instead of minting a second edge.
    pub fn create_statement(
        &self,
        subject: ThingId,
        predicate: ThingId,
        object: ThingId,
        contributor: ContributorId,
    ) -> ScholiaResult<StatementId> {
        if !self.things.contains_key(&subject) {
            return Err(GraphError::SubjectNotFound { id: subject }.into());
        }
        match self.things.get(&predicate) {
            Some(thing) if thing.value().is_predicate() => {}
            _ => return Err(GraphError::PredicateNotFound { id: predicate }.into()),
        }
        if !self.things.contains_key(&object) {
            return Err(GraphError::ObjectNotFound { id: object }.into());
        }

        if let Some(existing) = self.find_exact(&subject, &predicate, &object) {
            return Ok(existing);
        }

        let id = self.allocate_statement_id()?;
        let statement = Statement {
            id: id.clone(),
            subject: subject.clone(),
            predicate,
            object: object.clone(),
            created_by: contributor,
            created_at: now_millis(),
        };
        self.by_subject
            .entry(subject)
            .or_default()
            .push(id.clone());
        self.by_object.entry(object).or_default().push(id.clone());
        self.statements.insert(id.clone(), statement);
        Ok(id)
    }

    fn find_exact(
        &self,
        subject: &ThingId,
        predicate: &ThingId,
        object: &ThingId,
    ) -> Option<StatementId> {
        let ids = self.by_subject.get(subject)?;
        ids.value()
            .iter()
            .filter_map(|sid| self.statements.get(sid))
            .find(|s| s.value().predicate == *predicate && s.value().object == *object)
            .map(|s| s.value().id.clone())
    }

    pub fn get_statement(&self, id: &StatementId) -> Option<Statement> {
        self.statements.get(id).map(|r| r.value().clone())
    }

    /// Filtered, paged statement query. The total is computed from the same
    /// filter as the page content.
    pub fn find_statements(&self, filter: &StatementFilter, page: PageRequest) -> Page<Statement> {
        let mut matched: Vec<Statement> = self
            .candidate_statements(filter)
            .into_iter()
            .filter(|s| filter.matches(s, self))
            .collect();
        matched.sort_by_key(recency_key);
        Page::from_sorted(matched, page)
    }

    fn candidate_statements(&self, filter: &StatementFilter) -> Vec<Statement> {
        let from_index = |index: &DashMap<ThingId, Vec<StatementId>>, key: &ThingId| {
            index
                .get(key)
                .map(|ids| {
                    ids.value()
                        .iter()
                        .filter_map(|sid| self.statements.get(sid).map(|s| s.value().clone()))
                        .collect()
                })
                .unwrap_or_default()
        };
        if let Some(ref subject) = filter.subject {
            from_index(&self.by_subject, subject)
        } else if let Some(ref object) = filter.object {
            from_index(&self.by_object, object)
        } else {
            self.statements.iter().map(|s| s.value().clone()).collect()
        }
    }

    /// All outgoing statements of a subject, most recent first.
    pub fn statements_about(&self, subject: &ThingId) -> Vec<Statement> {
        let mut out: Vec<Statement> = self
            .by_subject
            .get(subject)
            .map(|ids| {
                ids.value()
                    .iter()
                    .filter_map(|sid| self.statements.get(sid).map(|s| s.value().clone()))
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by_key(recency_key);
        out
    }

    /// Idempotent bulk delete: unknown IDs are a no-op, not an error.
    pub fn delete_statements(&self, ids: &BTreeSet<StatementId>) {
        for id in ids {
            let Some((_, statement)) = self.statements.remove(id) else {
                continue;
            };
            if let Some(mut subject_ids) = self.by_subject.get_mut(&statement.subject) {
                subject_ids.value_mut().retain(|sid| sid != id);
            }
            if let Some(mut object_ids) = self.by_object.get_mut(&statement.object) {
                object_ids.value_mut().retain(|sid| sid != id);
            }
        }
    }

    /// Whole-field endpoint replacement; re-validates every changed endpoint.
    pub fn update_statement(&self, id: &StatementId, update: StatementUpdate) -> ScholiaResult<()> {
        let current = self
            .get_statement(id)
            .ok_or_else(|| GraphError::StatementNotFound {
                id: id.as_str().to_owned(),
            })?;

        let subject = update.subject.unwrap_or(current.subject.clone());
        let predicate = update.predicate.unwrap_or(current.predicate.clone());
        let object = update.object.unwrap_or(current.object.clone());

        if !self.things.contains_key(&subject) {
            return Err(GraphError::SubjectNotFound { id: subject }.into());
        }
        match self.things.get(&predicate) {
            Some(thing) if thing.value().is_predicate() => {}
            _ => return Err(GraphError::PredicateNotFound { id: predicate }.into()),
        }
        if !self.things.contains_key(&object) {
            return Err(GraphError::ObjectNotFound { id: object }.into());
        }

        if subject != current.subject {
            if let Some(mut ids) = self.by_subject.get_mut(&current.subject) {
                ids.value_mut().retain(|sid| sid != id);
            }
            self.by_subject
                .entry(subject.clone())
                .or_default()
                .push(id.clone());
        }
        if object != current.object {
            if let Some(mut ids) = self.by_object.get_mut(&current.object) {
                ids.value_mut().retain(|sid| sid != id);
            }
            self.by_object
                .entry(object.clone())
                .or_default()
                .push(id.clone());
        }

        self.statements.insert(
            id.clone(),
            Statement {
                id: id.clone(),
                subject,
                predicate,
                object,
                ..current
            },
        );
        Ok(())
    }

    // -- bulk access (persistence + traversal) ------------------------------

    pub fn all_things(&self) -> Vec<Thing> {
        self.things.iter().map(|t| t.value().clone()).collect()
    }

    pub fn all_statements(&self) -> Vec<Statement> {
        self.statements.iter().map(|s| s.value().clone()).collect()
    }

    /// Bulk-load entities when restoring from persistent storage.
    ///
    /// Counters resume past the highest numeric suffix seen per namespace.
    pub fn bulk_load(
        &self,
        things: impl IntoIterator<Item = Thing>,
        statements: impl IntoIterator<Item = Statement>,
    ) {
        let bump = |counter: &AtomicU64, n: u64| {
            counter.fetch_max(n + 1, Ordering::Relaxed);
        };
        for thing in things {
            let id = thing.id().clone();
            if let Some(n) = id.numeric_suffix() {
                match (&thing, id.as_str().chars().next()) {
                    (Thing::Resource(_), Some('R')) => bump(&self.next_resource, n),
                    (Thing::Literal(_), Some('L')) => bump(&self.next_literal, n),
                    (Thing::Predicate(_), Some('P')) => bump(&self.next_predicate, n),
                    (Thing::Class(_), Some('C')) => bump(&self.next_class, n),
                    _ => {}
                }
            }
            if let Thing::Class(ref class) = thing {
                if let Some(ref uri) = class.uri {
                    self.uri_index.insert(uri.clone(), id.clone());
                }
            }
            self.things.insert(id, thing);
        }
        for statement in statements {
            if let Some(n) = statement.id.numeric_suffix() {
                bump(&self.next_statement, n);
            }
            self.by_subject
                .entry(statement.subject.clone())
                .or_default()
                .push(statement.id.clone());
            self.by_object
                .entry(statement.object.clone())
                .or_default()
                .push(statement.id.clone());
            self.statements.insert(statement.id.clone(), statement);
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("things", &self.thing_count())
            .field("statements", &self.statement_count())
            .finish()
    }
}
