use super::{Operation, Target};
use crate::wire::WireDocument;

/// Query a collection or table. Returns one page of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Find {
    pub target: Target,

    pub filter: WireDocument,

    /// Omitted from the request when `None`
    pub sort: Option<WireDocument>,

    pub projection: Option<WireDocument>,

    pub limit: Option<u64>,

    pub skip: Option<u64>,

    /// Return each document's similarity score with a vector sort
    pub include_similarity: bool,

    /// Return the vector used for sorting
    pub include_sort_vector: bool,

    /// Page state of the page to fetch; `None` requests the first page
    pub page_state: Option<String>,
}

/// Fetch the first document matching a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FindOne {
    pub target: Target,
    pub filter: WireDocument,
    pub sort: Option<WireDocument>,
    pub projection: Option<WireDocument>,
    pub include_similarity: bool,
}

impl From<Find> for Operation {
    fn from(value: Find) -> Self {
        Self::Find(value)
    }
}

impl From<FindOne> for Operation {
    fn from(value: FindOne) -> Self {
        Self::FindOne(value)
    }
}
