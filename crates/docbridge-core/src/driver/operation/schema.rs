use super::{Operation, Target};
use crate::{
    schema::db::{TableDefinition, UdtDefinition},
    wire::WireDocument,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCollection {
    pub keyspace: String,
    pub name: String,

    /// Collection options (vector settings, indexing rules), sent verbatim
    pub options: Option<WireDocument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropCollection {
    pub keyspace: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListCollections {
    pub keyspace: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub keyspace: String,
    pub name: String,
    pub definition: TableDefinition,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub keyspace: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListTables {
    pub keyspace: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateType {
    pub keyspace: String,
    pub definition: UdtDefinition,
    pub if_not_exists: bool,
}

/// Create an index on a table column.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    pub target: Target,
    pub name: String,
    pub column: String,
    pub options: Option<WireDocument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListIndexes {
    pub target: Target,
}

macro_rules! impl_into_operation {
    ( $( $ty:ident ),* ) => {
        $(
            impl From<$ty> for Operation {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )*
    };
}

impl_into_operation!(
    CreateCollection,
    DropCollection,
    ListCollections,
    CreateTable,
    DropTable,
    ListTables,
    CreateType,
    CreateIndex,
    ListIndexes
);
