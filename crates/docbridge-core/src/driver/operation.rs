mod command;
pub use command::Command;

mod count;
pub use count::{CountDocuments, EstimatedDocumentCount};

mod delete;
pub use delete::{DeleteMany, DeleteOne};

mod find;
pub use find::{Find, FindOne};

mod find_and_modify;
pub use find_and_modify::{FindOneAndDelete, FindOneAndReplace, FindOneAndUpdate, ReturnDocument};

mod insert;
pub use insert::{InsertMany, InsertOne};

mod keyspace;
pub use keyspace::{CreateKeyspace, ListKeyspaces};

mod schema;
pub use schema::{
    CreateCollection, CreateIndex, CreateTable, CreateType, DropCollection, DropTable,
    ListCollections, ListIndexes, ListTables,
};

mod update;
pub use update::{ReplaceOne, UpdateMany, UpdateOne};

/// What a data operation acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub keyspace: String,
    pub name: String,
    pub kind: TargetKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Collection,
    Table,
}

/// A single remote API command.
///
/// Documents, filters and updates are already in wire form.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Find(Find),
    FindOne(FindOne),
    InsertOne(InsertOne),
    InsertMany(InsertMany),
    UpdateOne(UpdateOne),
    UpdateMany(UpdateMany),
    ReplaceOne(ReplaceOne),
    DeleteOne(DeleteOne),
    DeleteMany(DeleteMany),
    FindOneAndUpdate(FindOneAndUpdate),
    FindOneAndReplace(FindOneAndReplace),
    FindOneAndDelete(FindOneAndDelete),
    CountDocuments(CountDocuments),
    EstimatedDocumentCount(EstimatedDocumentCount),

    CreateCollection(CreateCollection),
    DropCollection(DropCollection),
    ListCollections(ListCollections),
    CreateTable(CreateTable),
    DropTable(DropTable),
    ListTables(ListTables),
    CreateType(CreateType),
    CreateIndex(CreateIndex),
    ListIndexes(ListIndexes),

    CreateKeyspace(CreateKeyspace),
    ListKeyspaces(ListKeyspaces),

    /// Raw command, sent without translation
    Command(Command),
}

impl Operation {
    /// The remote command name, e.g. `findOneAndUpdate`.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Find(_) => "find",
            Operation::FindOne(_) => "findOne",
            Operation::InsertOne(_) => "insertOne",
            Operation::InsertMany(_) => "insertMany",
            Operation::UpdateOne(_) => "updateOne",
            Operation::UpdateMany(_) => "updateMany",
            Operation::ReplaceOne(_) => "findOneAndReplace",
            Operation::DeleteOne(_) => "deleteOne",
            Operation::DeleteMany(_) => "deleteMany",
            Operation::FindOneAndUpdate(_) => "findOneAndUpdate",
            Operation::FindOneAndReplace(_) => "findOneAndReplace",
            Operation::FindOneAndDelete(_) => "findOneAndDelete",
            Operation::CountDocuments(_) => "countDocuments",
            Operation::EstimatedDocumentCount(_) => "estimatedDocumentCount",
            Operation::CreateCollection(_) => "createCollection",
            Operation::DropCollection(_) => "deleteCollection",
            Operation::ListCollections(_) => "findCollections",
            Operation::CreateTable(_) => "createTable",
            Operation::DropTable(_) => "dropTable",
            Operation::ListTables(_) => "listTables",
            Operation::CreateType(_) => "createType",
            Operation::CreateIndex(_) => "createIndex",
            Operation::ListIndexes(_) => "listIndexes",
            Operation::CreateKeyspace(_) => "createKeyspace",
            Operation::ListKeyspaces(_) => "findKeyspaces",
            Operation::Command(_) => "command",
        }
    }

    /// The collection or table a data operation targets.
    pub fn target(&self) -> Option<&Target> {
        Some(match self {
            Operation::Find(op) => &op.target,
            Operation::FindOne(op) => &op.target,
            Operation::InsertOne(op) => &op.target,
            Operation::InsertMany(op) => &op.target,
            Operation::UpdateOne(op) => &op.target,
            Operation::UpdateMany(op) => &op.target,
            Operation::ReplaceOne(op) => &op.target,
            Operation::DeleteOne(op) => &op.target,
            Operation::DeleteMany(op) => &op.target,
            Operation::FindOneAndUpdate(op) => &op.target,
            Operation::FindOneAndReplace(op) => &op.target,
            Operation::FindOneAndDelete(op) => &op.target,
            Operation::CountDocuments(op) => &op.target,
            Operation::EstimatedDocumentCount(op) => &op.target,
            Operation::CreateIndex(op) => &op.target,
            Operation::ListIndexes(op) => &op.target,
            _ => return None,
        })
    }
}
