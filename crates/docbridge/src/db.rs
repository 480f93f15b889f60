mod collections;
pub use collections::CollectionsDb;

mod tables;
pub use tables::TablesDb;

use crate::{Collection, Connection, Mode};

use docbridge_core::{
    async_trait,
    driver::{operation::Command, Response},
    schema::db::{TableDefinition, UdtDefinition},
    stmt::Document,
    wire::{serialize_document, WireValue},
    Error, Result, Schema,
};

use std::{fmt::Debug, sync::Arc};

/// Keyspace-level operations.
///
/// Each [`Mode`] has its own implementation. Calls that belong to the other
/// mode fail with a mode mismatch error without reaching the remote API.
#[async_trait]
pub trait Database: Debug + Send + Sync {
    fn connection(&self) -> &Connection;

    fn mode(&self) -> Mode {
        self.connection().mode()
    }

    async fn create_collection(&self, name: &str, options: Option<Document>) -> Result<Collection>;

    async fn drop_collection(&self, name: &str) -> Result<()>;

    async fn list_collections(&self) -> Result<Vec<String>>;

    async fn create_table(&self, name: &str, definition: TableDefinition) -> Result<Collection>;

    async fn drop_table(&self, name: &str) -> Result<()>;

    async fn list_tables(&self) -> Result<Vec<String>>;

    async fn create_type(&self, definition: UdtDefinition) -> Result<()>;

    /// Compiles `schema`, creates the UDTs it references and then its table,
    /// and returns an adapter for the table.
    async fn sync_table(&self, schema: Arc<Schema>) -> Result<Collection>;

    /// Sends `body` as a raw keyspace-level command.
    async fn run_command(&self, body: Document) -> Result<WireValue> {
        let conn = self.connection();
        let op = Command {
            keyspace: conn.keyspace()?,
            collection: None,
            body: serialize_document(&body),
        };

        match conn.exec(op.into()).await? {
            Response::Raw(value) => Ok(value),
            other => Err(Error::invalid_result(format!(
                "expected a raw response, got {}",
                other.kind_name()
            ))),
        }
    }
}

fn mismatch<T>(operation: &str, mode: Mode) -> Result<T> {
    Err(Error::mode_mismatch(operation, mode.name()))
}
