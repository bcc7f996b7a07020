//! Versioning and publishing.
//!
//! Publishing freezes a draft into an immutable version: a new Resource
//! carrying `{<Type>Published, LatestVersion}`, a bundle snapshot of the
//! draft's subgraph stored in a repository separate from the live graph, a
//! `hasPublishedVersion` link from the draft, and optionally a DOI attached
//! via `P26`. The draft itself stays editable; the version never changes.

use dashmap::DashMap;

use crate::actions::authors::AuthorListWriter;
use crate::actions::properties::SinglePropertyUpdater;
use crate::bundle::{fetch_bundle, BundleConfiguration};
use crate::doi::{DoiRegistration, DoiService};
use crate::error::{PublishError, ScholiaResult};
use crate::statement::Statement;
use crate::store::{GraphStore, NewResource, PageRequest, StatementFilter};
use crate::thing::{now_millis, ContributorId, ThingId};
use crate::vocab::{classes, predicates};

/// Command driving a publish, assembled by the content-type services.
#[derive(Debug, Clone)]
pub struct PublishCommand {
    pub contributor: ContributorId,
    /// The draft being published.
    pub target: ThingId,
    /// Role class the draft must carry (`Comparison`, `SmartReview`).
    pub content_class: ThingId,
    /// Class stamped onto the version resource.
    pub published_class: ThingId,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub register_doi: bool,
}

/// Frozen copy of a draft's subgraph at publish time.
#[derive(Debug, Clone)]
pub struct PublishedSnapshot {
    pub version: ThingId,
    pub root: ThingId,
    pub statements: Vec<Statement>,
    pub published_at: u64,
}

/// Storage for published snapshots, keyed by version ID.
///
/// Separate from the live graph; snapshots are write-once and never deleted.
#[derive(Debug, Default)]
pub struct PublishedRepository {
    snapshots: DashMap<ThingId, PublishedSnapshot>,
}

impl PublishedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot. An existing snapshot under the same version ID is
    /// kept; snapshots are immutable.
    pub fn save(&self, snapshot: PublishedSnapshot) {
        self.snapshots
            .entry(snapshot.version.clone())
            .or_insert(snapshot);
    }

    pub fn get(&self, version: &ThingId) -> Option<PublishedSnapshot> {
        self.snapshots.get(version).map(|s| s.value().clone())
    }

    pub fn contains(&self, version: &ThingId) -> bool {
        self.snapshots.contains_key(version)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

pub struct PublishingService<'a> {
    store: &'a GraphStore,
    repository: &'a PublishedRepository,
    doi: Option<&'a dyn DoiService>,
}

impl<'a> PublishingService<'a> {
    pub fn new(
        store: &'a GraphStore,
        repository: &'a PublishedRepository,
        doi: Option<&'a dyn DoiService>,
    ) -> Self {
        Self {
            store,
            repository,
            doi,
        }
    }

    /// Publish a draft; returns the version resource's ID.
    pub fn publish(&self, command: &PublishCommand) -> ScholiaResult<ThingId> {
        if command.register_doi && self.doi.is_none() {
            return Err(PublishError::DoiRegistration {
                message: "a DOI was requested but no registrar is configured".into(),
            }
            .into());
        }
        let draft = self
            .store
            .find_resource(&command.target)
            .filter(|r| r.is_a(&command.content_class))
            .ok_or_else(|| PublishError::NotPublishable {
                id: command.target.clone(),
                class: command.content_class.clone(),
            })?;

        let version = self.store.create_resource(
            NewResource::labelled(draft.label.clone(), command.contributor.clone())
                .with_classes([command.published_class.clone(), classes::latest_version()]),
        )?;

        let single = SinglePropertyUpdater::new(self.store);
        let description = command
            .description
            .clone()
            .or_else(|| single.current_literal(&draft.id, &predicates::description()));
        if let Some(ref description) = description {
            single.set_required_literal(
                &command.contributor,
                &version,
                &predicates::description(),
                description,
                None,
            )?;
        }
        if let Some(ref subject) = command.subject {
            single.set_required_literal(
                &command.contributor,
                &version,
                &predicates::has_subject(),
                subject,
                None,
            )?;
        }
        let authors = AuthorListWriter::new(self.store);
        let draft_authors = authors.read_authors(&draft.id);
        if !draft_authors.is_empty() {
            authors.create(&command.contributor, &version, &draft_authors)?;
        }

        let bundle = fetch_bundle(self.store, &draft.id, &BundleConfiguration::default());
        self.repository.save(PublishedSnapshot {
            version: version.clone(),
            root: draft.id.clone(),
            statements: bundle.statements,
            published_at: now_millis(),
        });

        let previous: Vec<ThingId> = self
            .store
            .find_statements(
                &StatementFilter::by_subject(draft.id.clone())
                    .with_predicate(predicates::has_published_version()),
                PageRequest::ALL,
            )
            .content
            .iter()
            .map(|s| s.object.clone())
            .collect();
        self.store.create_statement(
            draft.id.clone(),
            predicates::has_published_version(),
            version.clone(),
            command.contributor.clone(),
        )?;
        for prior in previous {
            self.store.remove_class(&prior, &classes::latest_version())?;
        }

        if command.register_doi {
            if let Some(doi) = self.doi {
                let registered = doi.register(&DoiRegistration {
                    suffix: version.as_str().to_owned(),
                    title: draft.label.clone(),
                    creators: draft_authors.iter().map(|a| a.name.clone()).collect(),
                    resource_type: command.published_class.as_str().to_owned(),
                    url: None,
                })?;
                single.set_required_literal(
                    &command.contributor,
                    &version,
                    &predicates::has_doi(),
                    registered.as_str(),
                    None,
                )?;
            }
        }

        tracing::info!(draft = %draft.id, version = %version, "published content");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::authors::Author;
    use crate::doi::PrefixDoiService;
    use crate::error::ScholiaError;
    use crate::vocab::seed_well_known;

    fn contributor() -> ContributorId {
        ContributorId::unknown()
    }

    fn draft_store() -> (GraphStore, ThingId) {
        let store = GraphStore::new();
        seed_well_known(&store).unwrap();
        let draft = store
            .create_resource(
                NewResource::labelled("a review of things", contributor())
                    .with_classes([classes::smart_review()]),
            )
            .unwrap();
        let single = SinglePropertyUpdater::new(&store);
        single
            .set_required_literal(
                &contributor(),
                &draft,
                &predicates::description(),
                "an overview",
                None,
            )
            .unwrap();
        AuthorListWriter::new(&store)
            .create(&contributor(), &draft, &[Author::named("Jane Doe")])
            .unwrap();
        (store, draft)
    }

    fn command(target: &ThingId) -> PublishCommand {
        PublishCommand {
            contributor: contributor(),
            target: target.clone(),
            content_class: classes::smart_review(),
            published_class: classes::smart_review_published(),
            subject: Some("reviews".into()),
            description: None,
            register_doi: false,
        }
    }

    #[test]
    fn publish_creates_a_frozen_version() {
        let (store, draft) = draft_store();
        let repository = PublishedRepository::new();
        let service = PublishingService::new(&store, &repository, None);

        let version = service.publish(&command(&draft)).unwrap();

        let resource = store.find_resource(&version).unwrap();
        assert!(resource.is_a(&classes::smart_review_published()));
        assert!(resource.is_a(&classes::latest_version()));

        let snapshot = repository.get(&version).unwrap();
        assert_eq!(snapshot.root, draft);
        assert!(!snapshot.statements.is_empty());

        // Copied fields live on the version.
        let single = SinglePropertyUpdater::new(&store);
        assert_eq!(
            single
                .current_literal(&version, &predicates::description())
                .as_deref(),
            Some("an overview")
        );
        assert_eq!(
            single
                .current_literal(&version, &predicates::has_subject())
                .as_deref(),
            Some("reviews")
        );
        assert_eq!(
            AuthorListWriter::new(&store).read_authors(&version).len(),
            1
        );
    }

    #[test]
    fn snapshot_is_immune_to_later_draft_edits() {
        let (store, draft) = draft_store();
        let repository = PublishedRepository::new();
        let service = PublishingService::new(&store, &repository, None);
        let version = service.publish(&command(&draft)).unwrap();
        let frozen = repository.get(&version).unwrap().statements.len();

        SinglePropertyUpdater::new(&store)
            .set_required_literal(
                &contributor(),
                &draft,
                &predicates::description(),
                "rewritten after publish",
                None,
            )
            .unwrap();

        assert_eq!(repository.get(&version).unwrap().statements.len(), frozen);
    }

    #[test]
    fn latest_version_migrates_on_republish() {
        let (store, draft) = draft_store();
        let repository = PublishedRepository::new();
        let service = PublishingService::new(&store, &repository, None);

        let first = service.publish(&command(&draft)).unwrap();
        let second = service.publish(&command(&draft)).unwrap();

        assert!(!store
            .find_resource(&first)
            .unwrap()
            .is_a(&classes::latest_version()));
        assert!(store
            .find_resource(&second)
            .unwrap()
            .is_a(&classes::latest_version()));
        assert_eq!(repository.len(), 2);
    }

    #[test]
    fn wrong_class_is_not_publishable() {
        let (store, _) = draft_store();
        let repository = PublishedRepository::new();
        let service = PublishingService::new(&store, &repository, None);
        let plain = store
            .create_resource(NewResource::labelled("not a review", contributor()))
            .unwrap();
        let err = service.publish(&command(&plain)).unwrap_err();
        assert!(matches!(
            err,
            ScholiaError::Publish(PublishError::NotPublishable { .. })
        ));
    }

    #[test]
    fn doi_request_without_a_registrar_is_an_error() {
        let (store, draft) = draft_store();
        let repository = PublishedRepository::new();
        let service = PublishingService::new(&store, &repository, None);
        let mut cmd = command(&draft);
        cmd.register_doi = true;

        let err = service.publish(&cmd).unwrap_err();
        assert!(matches!(
            err,
            ScholiaError::Publish(PublishError::DoiRegistration { .. })
        ));

        // Nothing was published.
        let links = store.find_statements(
            &StatementFilter::by_subject(draft.clone())
                .with_predicate(predicates::has_published_version()),
            PageRequest::ALL,
        );
        assert!(links.is_empty());
        assert!(repository.is_empty());
    }

    #[test]
    fn doi_is_attached_when_requested() {
        let (store, draft) = draft_store();
        let repository = PublishedRepository::new();
        let registrar = PrefixDoiService::new("10.5555");
        let service = PublishingService::new(&store, &repository, Some(&registrar));
        let mut cmd = command(&draft);
        cmd.register_doi = true;

        let version = service.publish(&cmd).unwrap();
        let doi = SinglePropertyUpdater::new(&store)
            .current_literal(&version, &predicates::has_doi())
            .unwrap();
        assert_eq!(doi, format!("10.5555/{version}"));
    }
}
