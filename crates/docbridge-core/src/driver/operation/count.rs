use super::{Operation, Target};
use crate::wire::WireDocument;

/// Exact count of matching documents, up to `upper_bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountDocuments {
    pub target: Target,
    pub filter: WireDocument,
    pub upper_bound: u64,
}

/// Approximate count of every document in a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedDocumentCount {
    pub target: Target,
}

impl From<CountDocuments> for Operation {
    fn from(value: CountDocuments) -> Self {
        Self::CountDocuments(value)
    }
}

impl From<EstimatedDocumentCount> for Operation {
    fn from(value: EstimatedDocumentCount) -> Self {
        Self::EstimatedDocumentCount(value)
    }
}
