//! Durability tests: the graph must survive a persist/restore cycle intact.

use tempfile::TempDir;

use scholia::actions::authors::Author;
use scholia::content::comparison::{ComparisonService, CreateComparisonCommand};
use scholia::store::durable::DurableGraph;
use scholia::store::{GraphStore, NewResource, PageRequest, StatementFilter};
use scholia::thing::{ContributorId, ThingId};
use scholia::vocab::{classes, predicates, seed_well_known};

fn contributor() -> ContributorId {
    ContributorId::unknown()
}

fn populated_store() -> (GraphStore, ThingId) {
    let store = GraphStore::new();
    seed_well_known(&store).unwrap();
    let contribution = store
        .create_resource(
            NewResource::labelled("a contribution", contributor())
                .with_classes([classes::contribution()]),
        )
        .unwrap();
    let service = ComparisonService::new(&store);
    let comparison = service
        .create(&CreateComparisonCommand {
            contributor: contributor(),
            title: "Persistent comparison".into(),
            description: Some("survives restarts".into()),
            research_fields: vec![],
            contributions: vec![contribution],
            references: vec!["doi:10.1000/9".into()],
            is_anonymized: true,
            authors: vec![Author::named("Jane Doe").with_orcid("0000-0002-1825-0097")],
        })
        .unwrap();
    (store, comparison)
}

#[test]
fn full_workflow_state_round_trips_through_redb() {
    let dir = TempDir::new().unwrap();
    let (store, comparison) = populated_store();

    let durable = DurableGraph::open(dir.path()).unwrap();
    durable.persist(&store).unwrap();
    drop(durable);
    drop(store);

    let restored = DurableGraph::open(dir.path()).unwrap().restore().unwrap();
    let resource = restored.find_resource(&comparison).unwrap();
    assert!(resource.is_a(&classes::comparison()));
    assert_eq!(resource.label, "Persistent comparison");

    // Statements and their endpoints resolve after restore.
    let statements = restored.statements_about(&comparison);
    assert!(!statements.is_empty());
    for statement in &statements {
        assert!(restored.get_thing(&statement.object).is_some());
    }

    // Filter queries keep working against the restored adjacency indexes.
    let anonymized = restored.find_statements(
        &StatementFilter::by_subject(comparison.clone())
            .with_predicate(predicates::is_anonymized()),
        PageRequest::ALL,
    );
    assert_eq!(anonymized.total, 1);
}

#[test]
fn restored_store_allocates_fresh_ids() {
    let dir = TempDir::new().unwrap();
    let (store, _) = populated_store();
    let existing: Vec<ThingId> = store.all_things().iter().map(|t| t.id().clone()).collect();

    let durable = DurableGraph::open(dir.path()).unwrap();
    durable.persist(&store).unwrap();

    let restored = durable.restore().unwrap();
    for _ in 0..20 {
        let id = restored
            .create_resource(NewResource::labelled("fresh", contributor()))
            .unwrap();
        assert!(!existing.contains(&id));
    }
}

#[test]
fn repeated_persist_is_stable() {
    let dir = TempDir::new().unwrap();
    let (store, _) = populated_store();
    let durable = DurableGraph::open(dir.path()).unwrap();

    durable.persist(&store).unwrap();
    durable.persist(&store).unwrap();

    let restored = durable.restore().unwrap();
    assert_eq!(restored.thing_count(), store.thing_count());
    assert_eq!(restored.statement_count(), store.statement_count());
}
