use super::{Operation, Target};
use crate::wire::WireDocument;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOne {
    pub target: Target,
    pub filter: WireDocument,
    pub update: WireDocument,
    pub sort: Option<WireDocument>,
    pub upsert: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMany {
    pub target: Target,
    pub filter: WireDocument,
    pub update: WireDocument,
    pub upsert: bool,
}

/// Replace the first matching document. The remote API has no `replaceOne`
/// command, so drivers issue `findOneAndReplace` without a projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceOne {
    pub target: Target,
    pub filter: WireDocument,
    pub replacement: WireDocument,
    pub sort: Option<WireDocument>,
    pub upsert: bool,
}

impl From<UpdateOne> for Operation {
    fn from(value: UpdateOne) -> Self {
        Self::UpdateOne(value)
    }
}

impl From<UpdateMany> for Operation {
    fn from(value: UpdateMany) -> Self {
        Self::UpdateMany(value)
    }
}

impl From<ReplaceOne> for Operation {
    fn from(value: ReplaceOne) -> Self {
        Self::ReplaceOne(value)
    }
}
