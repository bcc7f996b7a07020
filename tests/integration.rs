//! End-to-end workflow tests across the public API.

use scholia::actions::authors::Author;
use scholia::bundle::{fetch_bundle, BundleConfiguration};
use scholia::content::comparison::{
    ComparisonService, CreateComparisonCommand, PublishComparisonCommand, RelatedItemCommand,
    UpdateComparisonCommand,
};
use scholia::content::smart_review::{
    CreateSmartReviewCommand, PublishSmartReviewCommand, Section, SmartReviewService,
    UpdateSmartReviewCommand,
};
use scholia::doi::PrefixDoiService;
use scholia::error::{PublishError, ScholiaError, WorkflowError};
use scholia::publish::{PublishedRepository, PublishingService};
use scholia::store::{GraphStore, NewResource, PageRequest, StatementFilter};
use scholia::thing::{ContributorId, ThingId};
use scholia::vocab::{classes, predicates, seed_well_known};

fn contributor() -> ContributorId {
    ContributorId::unknown()
}

struct World {
    store: GraphStore,
    contributions: Vec<ThingId>,
    field: ThingId,
}

impl World {
    fn new() -> Self {
        let store = GraphStore::new();
        seed_well_known(&store).unwrap();
        let contributions = (0..3)
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
                NewResource::labelled("knowledge representation", contributor())
                    .with_classes([classes::research_field()]),
            )
            .unwrap();
        World {
            store,
            contributions,
            field,
        }
    }

    fn comparison_command(&self) -> CreateComparisonCommand {
        CreateComparisonCommand {
            contributor: contributor(),
            title: "Comparing graph stores".into(),
            description: Some("A side-by-side of triple stores".into()),
            research_fields: vec![self.field.clone()],
            contributions: self.contributions[..2].to_vec(),
            references: vec!["doi:10.1000/1".into(), "doi:10.1000/2".into()],
            is_anonymized: false,
            authors: vec![
                Author::named("Jane Doe").with_orcid("0000-0002-1825-0097"),
                Author::named("John Roe"),
            ],
        }
    }
}

#[test]
fn comparison_lifecycle_create_find_publish_republish() {
    let world = World::new();
    let service = ComparisonService::new(&world.store);
    let repository = PublishedRepository::new();
    let registrar = PrefixDoiService::new("10.5555");
    let publisher = PublishingService::new(&world.store, &repository, Some(&registrar));

    // Create.
    let comparison = service.create(&world.comparison_command()).unwrap();

    // Find by compared contribution.
    let found = service.find_by_contribution(&world.contributions[0]);
    assert_eq!(found, vec![comparison.clone()]);
    assert!(service
        .find_by_contribution(&world.contributions[2])
        .is_empty());

    // Publish with a DOI.
    let publish_command = PublishComparisonCommand {
        contributor: contributor(),
        comparison: comparison.clone(),
        subject: Some("graph stores".into()),
        description: None,
        register_doi: true,
    };
    let version = service.publish(&publisher, &publish_command).unwrap();

    let version_resource = world.store.find_resource(&version).unwrap();
    assert!(version_resource.is_a(&classes::comparison_published()));
    assert!(version_resource.is_a(&classes::latest_version()));
    assert!(repository.contains(&version));

    let doi = world.store.find_statements(
        &StatementFilter::by_subject(version.clone()).with_predicate(predicates::has_doi()),
        PageRequest::ALL,
    );
    assert_eq!(doi.total, 1);

    // Republishing a comparison fails; the first version stays latest.
    let err = service.publish(&publisher, &publish_command).unwrap_err();
    assert!(matches!(
        err,
        ScholiaError::Publish(PublishError::AlreadyPublished { .. })
    ));
    assert!(world
        .store
        .find_resource(&version)
        .unwrap()
        .is_a(&classes::latest_version()));
    assert_eq!(repository.len(), 1);
}

#[test]
fn published_snapshot_survives_draft_edits() {
    let world = World::new();
    let service = ComparisonService::new(&world.store);
    let repository = PublishedRepository::new();
    let publisher = PublishingService::new(&world.store, &repository, None);

    let comparison = service.create(&world.comparison_command()).unwrap();
    let version = service
        .publish(
            &publisher,
            &PublishComparisonCommand {
                contributor: contributor(),
                comparison: comparison.clone(),
                subject: None,
                description: None,
                register_doi: false,
            },
        )
        .unwrap();
    let frozen = repository.get(&version).unwrap();

    // The draft stays editable after publishing.
    service
        .update(
            &contributor(),
            &comparison,
            &UpdateComparisonCommand {
                title: Some("Comparing graph stores, revised".into()),
                contributions: Some(world.contributions.clone()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(
        world.store.find_resource(&comparison).unwrap().label,
        "Comparing graph stores, revised"
    );
    let snapshot = repository.get(&version).unwrap();
    assert_eq!(snapshot.statements.len(), frozen.statements.len());

    // The version resource itself rejects modification.
    let err = service
        .update(
            &contributor(),
            &version,
            &UpdateComparisonCommand {
                title: Some("tampering".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ScholiaError::Workflow(WorkflowError::NotModifiable { .. })
    ));
}

#[test]
fn comparison_bundle_covers_fields_and_terminates() {
    let world = World::new();
    let service = ComparisonService::new(&world.store);
    let comparison = service.create(&world.comparison_command()).unwrap();

    // A cycle through the draft must not hang the traversal.
    world
        .store
        .create_statement(
            world.contributions[0].clone(),
            predicates::has_related_resource(),
            comparison.clone(),
            contributor(),
        )
        .unwrap();

    let bundle = fetch_bundle(
        &world.store,
        &comparison,
        &BundleConfiguration::to_depth(5),
    );
    assert!(!bundle.is_empty());

    let compared = bundle.objects_of(&comparison, &predicates::compares_contribution());
    assert_eq!(compared.len(), 2);

    // Ordering: newest first.
    for pair in bundle.statements.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn related_items_round_trip_through_the_service() {
    let world = World::new();
    let service = ComparisonService::new(&world.store);
    let comparison = service.create(&world.comparison_command()).unwrap();

    let resource = service
        .create_related_resource(
            &contributor(),
            &comparison,
            &RelatedItemCommand {
                label: "benchmark suite".into(),
                image: None,
                url: Some("https://example.org/bench".into()),
                description: Some("the benchmark harness".into()),
            },
        )
        .unwrap();
    service
        .create_related_figure(
            &contributor(),
            &comparison,
            &RelatedItemCommand {
                label: "throughput plot".into(),
                image: Some("https://example.org/plot.svg".into()),
                url: None,
                description: None,
            },
        )
        .unwrap();

    assert_eq!(service.find_related_resources(&comparison).len(), 1);
    assert_eq!(service.find_related_figures(&comparison).len(), 1);

    service.delete_related_item(&comparison, &resource).unwrap();
    assert!(service.find_related_resources(&comparison).is_empty());
    assert_eq!(service.find_related_figures(&comparison).len(), 1);
}

#[test]
fn smart_review_lifecycle_with_section_diffing() {
    let world = World::new();
    let service = SmartReviewService::new(&world.store);
    let repository = PublishedRepository::new();
    let publisher = PublishingService::new(&world.store, &repository, None);

    let review = service
        .create(&CreateSmartReviewCommand {
            contributor: contributor(),
            title: "The state of graph stores".into(),
            research_fields: vec![world.field.clone()],
            authors: vec![Author::named("Jane Doe")],
            sections: vec![
                Section::new("Introduction", "Setting the scene."),
                Section::new("Survey", "The systems considered."),
            ],
        })
        .unwrap();

    let first = service
        .publish(
            &publisher,
            &PublishSmartReviewCommand {
                contributor: contributor(),
                smart_review: review.clone(),
                subject: Some("graph stores".into()),
                description: Some("version one".into()),
                register_doi: false,
            },
        )
        .unwrap();

    // Revise sections and republish; LatestVersion migrates.
    service
        .update(
            &contributor(),
            &review,
            &UpdateSmartReviewCommand {
                sections: Some(vec![
                    Section::new("Introduction", "Setting the scene."),
                    Section::new("Survey", "The systems considered."),
                    Section::new("Outlook", "Where the field goes next."),
                ]),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(service.read_sections(&review).len(), 3);

    let second = service
        .publish(
            &publisher,
            &PublishSmartReviewCommand {
                contributor: contributor(),
                smart_review: review,
                subject: None,
                description: None,
                register_doi: false,
            },
        )
        .unwrap();

    assert!(!world
        .store
        .find_resource(&first)
        .unwrap()
        .is_a(&classes::latest_version()));
    assert!(world
        .store
        .find_resource(&second)
        .unwrap()
        .is_a(&classes::latest_version()));
    assert_eq!(repository.len(), 2);
}

#[test]
fn workflow_errors_carry_the_offending_id() {
    let world = World::new();
    let service = ComparisonService::new(&world.store);
    let mut command = world.comparison_command();
    command.contributions = vec![ThingId::from("R99999")];
    let err = service.create(&command).unwrap_err();
    match err {
        ScholiaError::Workflow(WorkflowError::ContributionNotFound { id }) => {
            assert_eq!(id, ThingId::from("R99999"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
