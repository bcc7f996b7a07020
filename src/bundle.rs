//! Bundle traversal: bounded subgraph fetch from a root Thing.
//!
//! A bundle is a transient query result — the connected subgraph reachable
//! from a root, produced by a breadth-first, depth-bounded walk over outgoing
//! statements. The live graph contains cycles (research-field hierarchies
//! reference each other), so the traversal tracks the best depth each node
//! was reached at and never re-expands a node at an equal-or-greater depth.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::statement::{recency_key, Statement, StatementId};
use crate::store::GraphStore;
use crate::thing::{Thing, ThingId};

/// Configuration for a bundle fetch.
#[derive(Debug, Clone)]
pub struct BundleConfiguration {
    /// Statements at levels `<= min_level` are excluded from the result
    /// (but still traversed).
    pub min_level: Option<usize>,
    /// Branches stop expanding once this depth is exceeded.
    pub max_level: Option<usize>,
    /// Edges into resources carrying any of these classes are pruned: the
    /// statement is excluded and traversal does not continue past it.
    pub blacklist: BTreeSet<ThingId>,
    /// When non-empty, only resources whose classes intersect this set are
    /// expanded further; the statement reaching a non-matching resource is
    /// still included.
    pub whitelist: BTreeSet<ThingId>,
    /// When false, statements whose subject is the root are excluded from
    /// the result but still seed the traversal.
    pub include_first_level: bool,
}

impl Default for BundleConfiguration {
    fn default() -> Self {
        Self {
            min_level: None,
            max_level: None,
            blacklist: BTreeSet::new(),
            whitelist: BTreeSet::new(),
            include_first_level: true,
        }
    }
}

impl BundleConfiguration {
    pub fn to_depth(max_level: usize) -> Self {
        Self {
            max_level: Some(max_level),
            ..Default::default()
        }
    }
}

/// A materialized subgraph reachable from `root`, most recent statement first.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub root: ThingId,
    pub statements: Vec<Statement>,
}

impl Bundle {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Objects of bundle statements with the given subject and predicate.
    pub fn objects_of(&self, subject: &ThingId, predicate: &ThingId) -> Vec<&ThingId> {
        self.statements
            .iter()
            .filter(|s| s.subject == *subject && s.predicate == *predicate)
            .map(|s| &s.object)
            .collect()
    }
}

/// Fetch the bounded subgraph reachable from `root`.
///
/// Terminates on cyclic graphs; result ordering is `created_at` descending
/// with the statement-ID suffix as tie-break.
pub fn fetch_bundle(store: &GraphStore, root: &ThingId, config: &BundleConfiguration) -> Bundle {
    // Best depth each node was expanded at; a node reached again at an
    // equal-or-greater depth is not re-expanded.
    let mut best_depth: HashMap<ThingId, usize> = HashMap::new();
    let mut included: HashSet<StatementId> = HashSet::new();
    let mut statements: Vec<Statement> = Vec::new();
    let mut queue: VecDeque<(ThingId, usize)> = VecDeque::new();

    best_depth.insert(root.clone(), 0);
    queue.push_back((root.clone(), 0));

    while let Some((node, depth)) = queue.pop_front() {
        let level = depth + 1;
        if let Some(max) = config.max_level {
            if level > max {
                continue;
            }
        }

        for statement in store.statements_about(&node) {
            let object = store.get_thing(&statement.object);

            // Blacklisted objects prune both the edge and the subtree.
            if let Some(Thing::Resource(ref resource)) = object {
                if resource.classes.iter().any(|c| config.blacklist.contains(c)) {
                    continue;
                }
            }

            let below_min = config.min_level.is_some_and(|min| level <= min);
            let first_level_hidden = !config.include_first_level && statement.subject == *root;
            if !below_min && !first_level_hidden && included.insert(statement.id.clone()) {
                statements.push(statement.clone());
            }

            // Only resources are expanded; literals, predicates, and classes
            // are terminal. The whitelist gates expansion, not inclusion.
            let Some(Thing::Resource(resource)) = object else {
                continue;
            };
            if !config.whitelist.is_empty()
                && !resource.classes.iter().any(|c| config.whitelist.contains(c))
            {
                continue;
            }
            let revisit_shallower = best_depth
                .get(&statement.object)
                .is_none_or(|&d| level < d);
            if revisit_shallower {
                best_depth.insert(statement.object.clone(), level);
                queue.push_back((statement.object.clone(), level));
            }
        }
    }

    statements.sort_by_key(recency_key);
    Bundle {
        root: root.clone(),
        statements,
    }
}
