mod cast;
use cast::cast_document;

mod results;
pub use results::{DeleteResult, InsertManyResult, InsertOneResult, UpdateResult};

mod sort;
use sort::normalize_sort;

mod upsert;
use upsert::{inject_replacement_id, inject_update_id};

use crate::{
    options::{
        DeleteOptions, FindOneAndDeleteOptions, FindOneAndModifyOptions, FindOneOptions,
        FindOptions, InsertManyOptions, UpdateOptions,
    },
    Connection, Cursor, Mode,
};

use docbridge_core::{
    doc,
    driver::{
        self,
        operation::{
            Command, CountDocuments, CreateIndex, DeleteMany, DeleteOne, EstimatedDocumentCount,
            Find, FindOne, FindOneAndDelete, FindOneAndReplace, FindOneAndUpdate, InsertMany,
            InsertOne, ListIndexes, ReplaceOne, Target, UpdateMany, UpdateOne,
        },
        Operation, Response,
    },
    schema::app::hooks,
    stmt::{Document, Value, ID_FIELD},
    types::TrackedDocument,
    wire::{
        deserialize, serialize_document, serialize_filter, serialize_update, Deserializer,
        WireDocument, WireValue,
    },
    Error, Result, Schema,
};

use std::sync::Arc;

/// Translates collection calls into remote API commands for one collection,
/// or one table in tables mode.
#[derive(Debug, Clone)]
pub struct Collection {
    conn: Connection,
    name: String,

    /// When set, writes are cast and validated, and projections are
    /// augmented with selected hidden fields
    schema: Option<Arc<Schema>>,

    deserializer: Arc<Deserializer>,
}

impl Collection {
    pub(crate) fn new(conn: Connection, name: String, schema: Option<Arc<Schema>>) -> Collection {
        let deserializer = match &schema {
            Some(schema) => Deserializer::for_schema(schema),
            None => Deserializer::new(),
        };

        Collection {
            conn,
            name,
            schema,
            deserializer: Arc::new(deserializer),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    /// Queries the collection. The returned cursor sends no request until it
    /// is first advanced.
    pub async fn find(&self, filter: Document, options: FindOptions) -> Result<Cursor> {
        let op = Find {
            target: self.target()?,
            filter: serialize_filter(&filter),
            sort: normalize_sort(options.sort.as_ref()),
            projection: self.projection(options.projection),
            limit: options.limit,
            skip: options.skip,
            include_similarity: options.include_similarity,
            include_sort_vector: options.include_sort_vector,
            page_state: None,
        };

        Ok(Cursor::new(self.conn.clone(), op, self.deserializer.clone()))
    }

    pub async fn find_one(
        &self,
        filter: Document,
        options: FindOneOptions,
    ) -> Result<Option<Document>> {
        let op = FindOne {
            target: self.target()?,
            filter: serialize_filter(&filter),
            sort: normalize_sort(options.sort.as_ref()),
            projection: self.projection(options.projection),
            include_similarity: options.include_similarity,
        };

        let document = self.exec(op).await?.into_document()?;
        self.document(document)
    }

    pub async fn insert_one(&self, doc: Document) -> Result<InsertOneResult> {
        let doc = self.prepare(doc)?;
        let op = InsertOne {
            target: self.target()?,
            document: serialize_document(&doc),
        };

        let inserted_id = self
            .exec(op)
            .await?
            .into_inserted()?
            .into_iter()
            .next()
            .map(deserialize)
            .or_else(|| doc.id().cloned())
            .ok_or_else(|| Error::invalid_result("insertOne acknowledged no id"))?;

        Ok(InsertOneResult { inserted_id })
    }

    /// Inserts `docs`, split into requests no larger than the remote accepts.
    ///
    /// With `ordered`, requests are sent one after another and the first
    /// failure stops the insert.
    pub async fn insert_many(
        &self,
        docs: Vec<Document>,
        options: InsertManyOptions,
    ) -> Result<InsertManyResult> {
        let documents = docs
            .into_iter()
            .map(|doc| self.prepare(doc).map(|doc| serialize_document(&doc)))
            .collect::<Result<Vec<_>>>()?;

        let chunk_size = self.conn.capability().max_insert_many.max(1);
        let mut inserted_ids = Vec::with_capacity(documents.len());

        for chunk in documents.chunks(chunk_size) {
            let op = InsertMany {
                target: self.target()?,
                documents: chunk.to_vec(),
                ordered: options.ordered,
            };

            let ids = self.exec(op).await?.into_inserted()?;
            inserted_ids.extend(ids.into_iter().map(deserialize));
        }

        Ok(InsertManyResult { inserted_ids })
    }

    /// Updates the first matching document.
    ///
    /// An upsert without an `_id` in the filter or the update gets one under
    /// `$setOnInsert`.
    pub async fn update_one(
        &self,
        filter: Document,
        mut update: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult> {
        if options.upsert {
            inject_update_id(&filter, &mut update);
        }

        let op = UpdateOne {
            target: self.target()?,
            filter: serialize_filter(&filter),
            update: serialize_update(&update),
            sort: normalize_sort(options.sort.as_ref()),
            upsert: options.upsert,
        };

        let result = self.exec(op).await?.into_updated()?;
        Ok(update_result(result))
    }

    pub async fn update_many(
        &self,
        filter: Document,
        update: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult> {
        let op = UpdateMany {
            target: self.target()?,
            filter: serialize_filter(&filter),
            update: serialize_update(&update),
            upsert: options.upsert,
        };

        let result = self.exec(op).await?.into_updated()?;
        Ok(update_result(result))
    }

    pub async fn replace_one(
        &self,
        filter: Document,
        replacement: Document,
        options: UpdateOptions,
    ) -> Result<UpdateResult> {
        let mut replacement = self.prepare(replacement)?;

        if options.upsert {
            inject_replacement_id(&filter, &mut replacement);
        }

        let op = ReplaceOne {
            target: self.target()?,
            filter: serialize_filter(&filter),
            replacement: serialize_document(&replacement),
            sort: normalize_sort(options.sort.as_ref()),
            upsert: options.upsert,
        };

        let result = self.exec(op).await?.into_updated()?;
        Ok(update_result(result))
    }

    pub async fn delete_one(&self, filter: Document, options: DeleteOptions) -> Result<DeleteResult> {
        let op = DeleteOne {
            target: self.target()?,
            filter: serialize_filter(&filter),
            sort: normalize_sort(options.sort.as_ref()),
        };

        let deleted_count = self.exec(op).await?.into_deleted()?;
        Ok(DeleteResult { deleted_count })
    }

    /// Deletes every matching document. The count is `None` when the remote
    /// did not report one.
    pub async fn delete_many(&self, filter: Document) -> Result<DeleteResult> {
        let op = DeleteMany {
            target: self.target()?,
            filter: serialize_filter(&filter),
        };

        let deleted_count = self.exec(op).await?.into_deleted()?;
        Ok(DeleteResult { deleted_count })
    }

    pub async fn find_one_and_update(
        &self,
        filter: Document,
        mut update: Document,
        options: FindOneAndModifyOptions,
    ) -> Result<Option<Document>> {
        if options.upsert {
            inject_update_id(&filter, &mut update);
        }

        let op = FindOneAndUpdate {
            target: self.target()?,
            filter: serialize_filter(&filter),
            update: serialize_update(&update),
            sort: normalize_sort(options.sort.as_ref()),
            projection: self.projection(options.projection),
            upsert: options.upsert,
            return_document: options.return_document,
        };

        let document = self.exec(op).await?.into_document()?;
        self.document(document)
    }

    pub async fn find_one_and_replace(
        &self,
        filter: Document,
        replacement: Document,
        options: FindOneAndModifyOptions,
    ) -> Result<Option<Document>> {
        let mut replacement = self.prepare(replacement)?;

        if options.upsert {
            inject_replacement_id(&filter, &mut replacement);
        }

        let op = FindOneAndReplace {
            target: self.target()?,
            filter: serialize_filter(&filter),
            replacement: serialize_document(&replacement),
            sort: normalize_sort(options.sort.as_ref()),
            projection: self.projection(options.projection),
            upsert: options.upsert,
            return_document: options.return_document,
        };

        let document = self.exec(op).await?.into_document()?;
        self.document(document)
    }

    pub async fn find_one_and_delete(
        &self,
        filter: Document,
        options: FindOneAndDeleteOptions,
    ) -> Result<Option<Document>> {
        let op = FindOneAndDelete {
            target: self.target()?,
            filter: serialize_filter(&filter),
            sort: normalize_sort(options.sort.as_ref()),
            projection: self.projection(options.projection),
        };

        let document = self.exec(op).await?.into_document()?;
        self.document(document)
    }

    /// Counts matching documents. Fails if there are more than
    /// `upper_bound`.
    pub async fn count_documents(&self, filter: Document, upper_bound: u64) -> Result<u64> {
        let op = CountDocuments {
            target: self.target()?,
            filter: serialize_filter(&filter),
            upper_bound,
        };

        match self.exec(op).await? {
            Response::Count { more: true, .. } => Err(Error::invalid_result(format!(
                "more than {upper_bound} documents match"
            ))),
            response => response.into_count(),
        }
    }

    pub async fn estimated_document_count(&self) -> Result<u64> {
        let op = EstimatedDocumentCount {
            target: self.target()?,
        };

        self.exec(op).await?.into_count()
    }

    /// Sends `body` as a raw command to this collection, bypassing
    /// translation.
    pub async fn run_command(&self, body: Document) -> Result<WireValue> {
        let op = Command {
            keyspace: self.conn.keyspace()?,
            collection: Some(self.name.clone()),
            body: serialize_document(&body),
        };

        match self.exec(op).await? {
            Response::Raw(value) => Ok(value),
            other => Err(Error::invalid_result(format!(
                "expected a raw response, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Writes the changes recorded on `doc` with a single `updateOne` by id,
    /// then clears them.
    pub async fn save(&self, doc: &mut TrackedDocument) -> Result<()> {
        let Some(update) = doc.to_update() else {
            return Ok(());
        };

        if let Some(schema) = &self.schema {
            schema.validate(&doc.to_document())?;
        }

        let id = doc
            .id()
            .cloned()
            .ok_or_else(|| Error::validation_required(ID_FIELD))?;

        self.update_one(doc! { ID_FIELD => id }, update, UpdateOptions::default())
            .await?;

        doc.commit();
        Ok(())
    }

    /// Creates an index on a table column.
    pub async fn create_index(
        &self,
        name: impl Into<String>,
        column: impl Into<String>,
        options: Option<Document>,
    ) -> Result<()> {
        self.require_tables("createIndex")?;

        let op = CreateIndex {
            target: self.target()?,
            name: name.into(),
            column: column.into(),
            options: options.as_ref().map(serialize_document),
        };

        self.exec(op).await?;
        Ok(())
    }

    pub async fn list_indexes(&self) -> Result<Vec<String>> {
        self.require_tables("listIndexes")?;

        let op = ListIndexes {
            target: self.target()?,
        };

        self.exec(op).await?.into_names()
    }

    pub fn aggregate(&self, _pipeline: &[Document]) -> Result<Cursor> {
        Err(Error::unsupported_operation("aggregate"))
    }

    pub fn bulk_write(&self, _operations: &[Document]) -> Result<()> {
        Err(Error::unsupported_operation("bulkWrite"))
    }

    pub fn bulk_save(&self, _documents: &[TrackedDocument]) -> Result<()> {
        Err(Error::unsupported_operation("bulkSave"))
    }

    pub fn watch(&self) -> Result<Cursor> {
        Err(Error::unsupported_operation("watch"))
    }

    pub fn distinct(&self, _field: &str, _filter: &Document) -> Result<Vec<Value>> {
        Err(Error::unsupported_operation("distinct"))
    }

    pub fn start_transaction(&self) -> Result<()> {
        Err(Error::unsupported_operation("startTransaction"))
    }

    fn target(&self) -> Result<Target> {
        self.conn.target(&self.name)
    }

    async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        self.conn.exec(op.into()).await
    }

    fn require_tables(&self, operation: &str) -> Result<()> {
        match self.conn.mode() {
            Mode::Tables => Ok(()),
            Mode::Collections => Err(Error::unsupported_operation(operation)),
        }
    }

    /// Casts and validates a document about to be written.
    fn prepare(&self, doc: Document) -> Result<Document> {
        let Some(schema) = &self.schema else {
            return Ok(doc);
        };

        let doc = cast_document(schema, doc)?;
        schema.validate(&doc)?;
        Ok(doc)
    }

    fn projection(&self, mut projection: Option<Document>) -> Option<WireDocument> {
        if let Some(schema) = &self.schema {
            hooks::augment_projection(schema, &mut projection);
        }

        projection
            .filter(|projection| !projection.is_empty())
            .map(|projection| serialize_document(&projection))
    }

    fn document(&self, document: Option<WireDocument>) -> Result<Option<Document>> {
        document
            .map(|document| {
                self.deserializer
                    .deserialize_document(WireValue::Object(document))
            })
            .transpose()
    }
}

fn update_result(result: driver::UpdateResult) -> UpdateResult {
    UpdateResult {
        matched_count: result.matched,
        modified_count: result.modified,
        upserted_id: result.upserted_id.map(deserialize),
    }
}
