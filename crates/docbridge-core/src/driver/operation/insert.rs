use super::{Operation, Target};
use crate::wire::WireDocument;

#[derive(Debug, Clone, PartialEq)]
pub struct InsertOne {
    pub target: Target,
    pub document: WireDocument,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertMany {
    pub target: Target,
    pub documents: Vec<WireDocument>,

    /// Stop at the first failure and insert in input order
    pub ordered: bool,
}

impl From<InsertOne> for Operation {
    fn from(value: InsertOne) -> Self {
        Self::InsertOne(value)
    }
}

impl From<InsertMany> for Operation {
    fn from(value: InsertMany) -> Self {
        Self::InsertMany(value)
    }
}
