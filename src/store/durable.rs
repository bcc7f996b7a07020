//! ACID-durable persistence for the graph store, backed by redb.
//!
//! Things and Statements are written as bincode values into dedicated tables
//! inside a single write transaction, so a persisted snapshot is always
//! internally consistent. Restores rebuild all in-memory indexes and resume
//! the ID allocators past the highest persisted suffix.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};

use crate::error::{ScholiaResult, StoreError};
use crate::statement::Statement;
use crate::store::GraphStore;
use crate::thing::Thing;

const THINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("things");
const STATEMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("statements");
const META_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("meta");

const SCHEMA_VERSION: &[u8] = b"1";

fn redb_err(context: &str, e: impl std::fmt::Display) -> StoreError {
    StoreError::Redb {
        message: format!("{context}: {e}"),
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization {
        message: format!("failed to serialize graph entity: {e}"),
    })
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization {
        message: format!("failed to deserialize graph entity: {e}"),
    })
}

/// Durable graph persistence: open, persist, restore.
pub struct DurableGraph {
    db: Arc<Database>,
}

impl DurableGraph {
    /// Open or create the database file in the given directory.
    pub fn open(data_dir: &Path) -> ScholiaResult<Self> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io { source: e })?;
        let db_path = data_dir.join("scholia.redb");
        let db = Database::create(&db_path).map_err(|e| {
            redb_err(&format!("failed to open redb at {}", db_path.display()), e)
        })?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Write the full store in one transaction.
    pub fn persist(&self, store: &GraphStore) -> ScholiaResult<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| redb_err("begin_write failed", e))?;
        // Rows for things and statements deleted since the last persist must
        // not survive, so the tables are recreated from scratch.
        txn.delete_table(THINGS_TABLE)
            .map_err(|e| redb_err("delete_table(things) failed", e))?;
        txn.delete_table(STATEMENTS_TABLE)
            .map_err(|e| redb_err("delete_table(statements) failed", e))?;
        {
            let mut things = txn
                .open_table(THINGS_TABLE)
                .map_err(|e| redb_err("open_table(things) failed", e))?;
            for thing in store.all_things() {
                let encoded = encode(&thing)?;
                things
                    .insert(thing.id().as_str(), encoded.as_slice())
                    .map_err(|e| redb_err("insert(thing) failed", e))?;
            }
            let mut statements = txn
                .open_table(STATEMENTS_TABLE)
                .map_err(|e| redb_err("open_table(statements) failed", e))?;
            for statement in store.all_statements() {
                let encoded = encode(&statement)?;
                statements
                    .insert(statement.id.as_str(), encoded.as_slice())
                    .map_err(|e| redb_err("insert(statement) failed", e))?;
            }
            let mut meta = txn
                .open_table(META_TABLE)
                .map_err(|e| redb_err("open_table(meta) failed", e))?;
            meta.insert("schema_version", SCHEMA_VERSION)
                .map_err(|e| redb_err("insert(meta) failed", e))?;
        }
        txn.commit().map_err(|e| redb_err("commit failed", e))?;
        tracing::info!(
            things = store.thing_count(),
            statements = store.statement_count(),
            "persisted graph store"
        );
        Ok(())
    }

    /// Rebuild a store from disk. An empty or fresh database yields an empty
    /// store.
    pub fn restore(&self) -> ScholiaResult<GraphStore> {
        let store = GraphStore::new();
        let txn = self
            .db
            .begin_read()
            .map_err(|e| redb_err("begin_read failed", e))?;

        let mut things: Vec<Thing> = Vec::new();
        match txn.open_table(THINGS_TABLE) {
            Ok(table) => {
                let iter = table
                    .iter()
                    .map_err(|e| redb_err("iter(things) failed", e))?;
                for entry in iter {
                    let (_, value) = entry.map_err(|e| redb_err("read(thing) failed", e))?;
                    things.push(decode(value.value())?);
                }
            }
            Err(redb::TableError::TableDoesNotExist(_)) => {}
            Err(e) => return Err(redb_err("open_table(things) failed", e).into()),
        }

        let mut statements: Vec<Statement> = Vec::new();
        match txn.open_table(STATEMENTS_TABLE) {
            Ok(table) => {
                let iter = table
                    .iter()
                    .map_err(|e| redb_err("iter(statements) failed", e))?;
                for entry in iter {
                    let (_, value) = entry.map_err(|e| redb_err("read(statement) failed", e))?;
                    statements.push(decode(value.value())?);
                }
            }
            Err(redb::TableError::TableDoesNotExist(_)) => {}
            Err(e) => return Err(redb_err("open_table(statements) failed", e).into()),
        }

        store.bulk_load(things, statements);
        tracing::info!(
            things = store.thing_count(),
            statements = store.statement_count(),
            "restored graph store"
        );
        Ok(store)
    }
}

impl std::fmt::Debug for DurableGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableGraph").finish()
    }
}
