mod admin;
mod data;
mod schema;

use docbridge_core::{
    driver::{operation::Target, Operation},
    wire::{WireDocument, WireValue},
};

use std::time::Duration;

/// An operation translated into a Data API request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Request {
    /// Remote command name, for logging
    pub(crate) name: &'static str,

    pub(crate) route: Route,

    pub(crate) body: WireValue,

    /// Overrides the client's default timeout
    pub(crate) timeout: Option<Duration>,

    pub(crate) expect: Expect,
}

/// Which endpoint a command is posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    /// The API root, for keyspace administration
    Api,

    Keyspace(String),

    Collection { keyspace: String, name: String },
}

/// How to read the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expect {
    Documents,
    Document,
    Inserted,
    Updated,
    Deleted,
    Count { upper_bound: Option<u64> },

    /// A list of names under the given `status` key
    Names(&'static str),

    Raw,
    Ok,
}

impl Route {
    fn target(target: &Target) -> Route {
        Route::Collection {
            keyspace: target.keyspace.clone(),
            name: target.name.clone(),
        }
    }
}

pub(crate) fn request(op: Operation) -> Request {
    let name = op.name();

    match op {
        Operation::Find(op) => data::find(name, op),
        Operation::FindOne(op) => data::find_one(name, op),
        Operation::InsertOne(op) => data::insert_one(name, op),
        Operation::InsertMany(op) => data::insert_many(name, op),
        Operation::UpdateOne(op) => data::update_one(name, op),
        Operation::UpdateMany(op) => data::update_many(name, op),
        Operation::ReplaceOne(op) => data::replace_one(name, op),
        Operation::DeleteOne(op) => data::delete_one(name, op),
        Operation::DeleteMany(op) => data::delete_many(name, op),
        Operation::FindOneAndUpdate(op) => data::find_one_and_update(name, op),
        Operation::FindOneAndReplace(op) => data::find_one_and_replace(name, op),
        Operation::FindOneAndDelete(op) => data::find_one_and_delete(name, op),
        Operation::CountDocuments(op) => data::count_documents(name, op),
        Operation::EstimatedDocumentCount(op) => data::estimated_document_count(name, op),
        Operation::CreateCollection(op) => schema::create_collection(name, op),
        Operation::DropCollection(op) => schema::drop_collection(name, op),
        Operation::ListCollections(op) => schema::list_collections(name, op),
        Operation::CreateTable(op) => schema::create_table(name, op),
        Operation::DropTable(op) => schema::drop_table(name, op),
        Operation::ListTables(op) => schema::list_tables(name, op),
        Operation::CreateType(op) => schema::create_type(name, op),
        Operation::CreateIndex(op) => schema::create_index(name, op),
        Operation::ListIndexes(op) => schema::list_indexes(name, op),
        Operation::CreateKeyspace(op) => admin::create_keyspace(name, op),
        Operation::ListKeyspaces(_) => admin::list_keyspaces(name),
        Operation::Command(op) => admin::command(op),
    }
}

/// Accumulates a command's fields and its nested `options` object. Absent
/// values are left out of the body.
#[derive(Debug, Default)]
struct Body {
    fields: WireDocument,
    options: WireDocument,
}

impl Body {
    fn new() -> Body {
        Body::default()
    }

    fn field(mut self, key: &str, value: impl Into<WireValue>) -> Body {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    fn field_opt<T: Into<WireValue>>(self, key: &str, value: Option<T>) -> Body {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    fn option(mut self, key: &str, value: impl Into<WireValue>) -> Body {
        self.options.insert(key.to_string(), value.into());
        self
    }

    fn option_opt<T: Into<WireValue>>(self, key: &str, value: Option<T>) -> Body {
        match value {
            Some(value) => self.option(key, value),
            None => self,
        }
    }

    /// Sets a boolean option only when it is `true`.
    fn flag(self, key: &str, value: bool) -> Body {
        if value {
            self.option(key, true)
        } else {
            self
        }
    }

    fn finish(mut self, name: &str) -> WireValue {
        if !self.options.is_empty() {
            self.fields
                .insert("options".to_string(), WireValue::Object(self.options));
        }

        let mut command = WireDocument::new();
        command.insert(name.to_string(), WireValue::Object(self.fields));
        WireValue::Object(command)
    }
}
