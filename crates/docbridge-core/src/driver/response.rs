use crate::{
    wire::{WireDocument, WireValue},
    Error, Result,
};

/// Result of a remote operation, in wire form.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A page of documents
    Documents(Documents),

    /// The single document returned by `findOne` and find-and-modify
    /// operations
    Document(Option<WireDocument>),

    /// Ids of inserted documents, in the order the remote reports them
    Inserted(Vec<WireValue>),

    Updated(UpdateResult),

    /// Number of deleted documents. `None` when the remote did not report an
    /// exact count.
    Deleted(Option<u64>),

    /// `more` is set when the count stopped at the requested upper bound
    Count { count: u64, more: bool },

    /// Names of collections, tables, keyspaces, or indexes
    Names(Vec<String>),

    /// Unprocessed response body of a raw command
    Raw(WireValue),

    /// Acknowledged with no payload
    Ok,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Documents {
    pub documents: Vec<WireDocument>,

    /// State to pass back to fetch the following page
    pub next_page_state: Option<String>,

    /// Vector the remote sorted by, when requested
    pub sort_vector: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateResult {
    pub matched: u64,
    pub modified: u64,
    pub upserted_id: Option<WireValue>,
}

impl Response {
    pub fn documents(documents: Vec<WireDocument>) -> Response {
        Response::Documents(Documents {
            documents,
            ..Documents::default()
        })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Response::Documents(_) => "documents",
            Response::Document(_) => "document",
            Response::Inserted(_) => "inserted",
            Response::Updated(_) => "updated",
            Response::Deleted(_) => "deleted",
            Response::Count { .. } => "count",
            Response::Names(_) => "names",
            Response::Raw(_) => "raw",
            Response::Ok => "ok",
        }
    }

    pub fn into_documents(self) -> Result<Documents> {
        match self {
            Response::Documents(documents) => Ok(documents),
            other => Err(other.unexpected("documents")),
        }
    }

    pub fn into_document(self) -> Result<Option<WireDocument>> {
        match self {
            Response::Document(document) => Ok(document),
            other => Err(other.unexpected("document")),
        }
    }

    pub fn into_inserted(self) -> Result<Vec<WireValue>> {
        match self {
            Response::Inserted(ids) => Ok(ids),
            other => Err(other.unexpected("inserted")),
        }
    }

    pub fn into_updated(self) -> Result<UpdateResult> {
        match self {
            Response::Updated(result) => Ok(result),
            other => Err(other.unexpected("updated")),
        }
    }

    pub fn into_deleted(self) -> Result<Option<u64>> {
        match self {
            Response::Deleted(count) => Ok(count),
            other => Err(other.unexpected("deleted")),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Response::Count { count, .. } => Ok(count),
            other => Err(other.unexpected("count")),
        }
    }

    pub fn into_names(self) -> Result<Vec<String>> {
        match self {
            Response::Names(names) => Ok(names),
            other => Err(other.unexpected("names")),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::invalid_result(format!(
            "expected a {expected} response, got {}",
            self.kind_name()
        ))
    }
}
