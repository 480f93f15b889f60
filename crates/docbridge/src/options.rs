//! Per-call options of [`Collection`](crate::Collection) operations.

use docbridge_core::{driver::operation::ReturnDocument, stmt::Document};

#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Sort directions, or a `{"$meta": ...}` vector or lexical sort
    pub sort: Option<Document>,
    pub projection: Option<Document>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub include_similarity: bool,
    pub include_sort_vector: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FindOneOptions {
    pub sort: Option<Document>,
    pub projection: Option<Document>,
    pub include_similarity: bool,
}

#[derive(Debug, Clone)]
pub struct InsertManyOptions {
    /// Insert in input order and stop at the first failure. Defaults to
    /// `true`.
    pub ordered: bool,
}

/// Options of `update_one`, `update_many` and `replace_one`.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub upsert: bool,

    /// Ignored by `update_many`
    pub sort: Option<Document>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub sort: Option<Document>,
}

/// Options of `find_one_and_update` and `find_one_and_replace`.
#[derive(Debug, Clone, Default)]
pub struct FindOneAndModifyOptions {
    pub upsert: bool,
    pub sort: Option<Document>,
    pub projection: Option<Document>,
    pub return_document: ReturnDocument,
}

#[derive(Debug, Clone, Default)]
pub struct FindOneAndDeleteOptions {
    pub sort: Option<Document>,
    pub projection: Option<Document>,
}

impl FindOptions {
    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn include_similarity(mut self) -> Self {
        self.include_similarity = true;
        self
    }

    pub fn include_sort_vector(mut self) -> Self {
        self.include_sort_vector = true;
        self
    }
}

impl FindOneOptions {
    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }
}

impl Default for InsertManyOptions {
    fn default() -> Self {
        InsertManyOptions { ordered: true }
    }
}

impl UpdateOptions {
    pub fn upsert(mut self) -> Self {
        self.upsert = true;
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }
}

impl FindOneAndModifyOptions {
    pub fn upsert(mut self) -> Self {
        self.upsert = true;
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn return_after(mut self) -> Self {
        self.return_document = ReturnDocument::After;
        self
    }
}
