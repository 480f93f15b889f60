use super::{Operation, Target};
use crate::wire::WireDocument;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOne {
    pub target: Target,
    pub filter: WireDocument,
    pub sort: Option<WireDocument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteMany {
    pub target: Target,
    pub filter: WireDocument,
}

impl From<DeleteOne> for Operation {
    fn from(value: DeleteOne) -> Self {
        Self::DeleteOne(value)
    }
}

impl From<DeleteMany> for Operation {
    fn from(value: DeleteMany) -> Self {
        Self::DeleteMany(value)
    }
}
