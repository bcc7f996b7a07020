//! scholia — a scholarly knowledge-graph content backend.
//!
//! Everything in the system is a statement: typed `(subject, predicate,
//! object)` edges over four kinds of [`thing::Thing`] (resources, literals,
//! predicates, classes). Higher-level content types such as comparisons and
//! smart reviews are Resource roles expressed through class sets and
//! well-known predicates, built and maintained by composable action
//! pipelines.
//!
//! The main layers, bottom to top:
//!
//! - [`thing`] / [`statement`]: the entity model and statement edges.
//! - [`store`]: the concurrent statement store, ID allocation, filtered
//!   queries, and redb persistence.
//! - [`bundle`]: bounded breadth-first subgraph traversal.
//! - [`actions`]: the pipeline framework plus the shared step vocabulary
//!   (validators, property mutators, author lists).
//! - [`content`]: comparison and smart-review services.
//! - [`publish`] / [`doi`]: versioning, snapshots, and DOI registration.

pub mod actions;
pub mod bundle;
pub mod config;
pub mod content;
pub mod doi;
pub mod error;
pub mod publish;
pub mod statement;
pub mod store;
pub mod thing;
pub mod vocab;

pub use bundle::{fetch_bundle, Bundle, BundleConfiguration};
pub use config::ScholiaConfig;
pub use error::{ScholiaError, ScholiaResult};
pub use statement::{Statement, StatementId};
pub use store::{GraphStore, Page, PageRequest, StatementFilter};
pub use thing::{Thing, ThingId};
