use super::{mismatch, Database};
use crate::{Collection, Connection, Mode};

use docbridge_core::{
    async_trait,
    driver::operation::{CreateTable, CreateType, DropTable, ListTables},
    schema::{
        db::{TableDefinition, UdtDefinition},
        Compiler,
    },
    stmt::Document,
    Result, Schema,
};

use std::sync::Arc;

/// Database facade for typed tables.
#[derive(Debug, Clone)]
pub struct TablesDb {
    conn: Connection,
}

impl TablesDb {
    pub fn new(conn: Connection) -> TablesDb {
        TablesDb { conn }
    }
}

#[async_trait]
impl Database for TablesDb {
    fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn create_collection(&self, _name: &str, _options: Option<Document>) -> Result<Collection> {
        mismatch("createCollection", Mode::Tables)
    }

    async fn drop_collection(&self, _name: &str) -> Result<()> {
        mismatch("dropCollection", Mode::Tables)
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        mismatch("listCollections", Mode::Tables)
    }

    async fn create_table(&self, name: &str, definition: TableDefinition) -> Result<Collection> {
        let op = CreateTable {
            keyspace: self.conn.keyspace()?,
            name: name.to_string(),
            definition,
            if_not_exists: true,
        };

        self.conn.exec(op.into()).await?;
        Ok(self.conn.collection(name))
    }

    async fn drop_table(&self, name: &str) -> Result<()> {
        let op = DropTable {
            keyspace: self.conn.keyspace()?,
            name: name.to_string(),
        };

        self.conn.exec(op.into()).await?;
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let op = ListTables {
            keyspace: self.conn.keyspace()?,
        };

        self.conn.exec(op.into()).await?.into_names()
    }

    async fn create_type(&self, definition: UdtDefinition) -> Result<()> {
        let op = CreateType {
            keyspace: self.conn.keyspace()?,
            definition,
            if_not_exists: true,
        };

        self.conn.exec(op.into()).await?;
        Ok(())
    }

    async fn sync_table(&self, schema: Arc<Schema>) -> Result<Collection> {
        let compiled = Compiler::new().compile(&schema)?;

        for definition in compiled.udts.into_values() {
            tracing::debug!(udt = %definition.name, "creating type");
            self.create_type(definition).await?;
        }

        self.create_table(&compiled.name, compiled.table).await?;
        Ok(self.conn.model(schema))
    }
}
