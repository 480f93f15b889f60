use super::{mismatch, Database};
use crate::{Collection, Connection, Mode};

use docbridge_core::{
    async_trait,
    driver::operation::{CreateCollection, DropCollection, ListCollections},
    schema::db::{TableDefinition, UdtDefinition},
    stmt::Document,
    wire::serialize_document,
    Result, Schema,
};

use std::sync::Arc;

/// Database facade for schema-less collections.
#[derive(Debug, Clone)]
pub struct CollectionsDb {
    conn: Connection,
}

impl CollectionsDb {
    pub fn new(conn: Connection) -> CollectionsDb {
        CollectionsDb { conn }
    }
}

#[async_trait]
impl Database for CollectionsDb {
    fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn create_collection(&self, name: &str, options: Option<Document>) -> Result<Collection> {
        let op = CreateCollection {
            keyspace: self.conn.keyspace()?,
            name: name.to_string(),
            options: options.as_ref().map(serialize_document),
        };

        self.conn.exec(op.into()).await?;
        Ok(self.conn.collection(name))
    }

    async fn drop_collection(&self, name: &str) -> Result<()> {
        let op = DropCollection {
            keyspace: self.conn.keyspace()?,
            name: name.to_string(),
        };

        self.conn.exec(op.into()).await?;
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let op = ListCollections {
            keyspace: self.conn.keyspace()?,
        };

        self.conn.exec(op.into()).await?.into_names()
    }

    async fn create_table(&self, _name: &str, _definition: TableDefinition) -> Result<Collection> {
        mismatch("createTable", Mode::Collections)
    }

    async fn drop_table(&self, _name: &str) -> Result<()> {
        mismatch("dropTable", Mode::Collections)
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        mismatch("listTables", Mode::Collections)
    }

    async fn create_type(&self, _definition: UdtDefinition) -> Result<()> {
        mismatch("createType", Mode::Collections)
    }

    async fn sync_table(&self, _schema: Arc<Schema>) -> Result<Collection> {
        mismatch("syncTable", Mode::Collections)
    }
}
