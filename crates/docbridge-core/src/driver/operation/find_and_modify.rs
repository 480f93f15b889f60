use super::{Operation, Target};
use crate::wire::WireDocument;

/// Which version of the document a find-and-modify returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnDocument {
    #[default]
    Before,
    After,
}

impl ReturnDocument {
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnDocument::Before => "before",
            ReturnDocument::After => "after",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindOneAndUpdate {
    pub target: Target,
    pub filter: WireDocument,
    pub update: WireDocument,
    pub sort: Option<WireDocument>,
    pub projection: Option<WireDocument>,
    pub upsert: bool,
    pub return_document: ReturnDocument,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindOneAndReplace {
    pub target: Target,
    pub filter: WireDocument,
    pub replacement: WireDocument,
    pub sort: Option<WireDocument>,
    pub projection: Option<WireDocument>,
    pub upsert: bool,
    pub return_document: ReturnDocument,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindOneAndDelete {
    pub target: Target,
    pub filter: WireDocument,
    pub sort: Option<WireDocument>,
    pub projection: Option<WireDocument>,
}

impl From<FindOneAndUpdate> for Operation {
    fn from(value: FindOneAndUpdate) -> Self {
        Self::FindOneAndUpdate(value)
    }
}

impl From<FindOneAndReplace> for Operation {
    fn from(value: FindOneAndReplace) -> Self {
        Self::FindOneAndReplace(value)
    }
}

impl From<FindOneAndDelete> for Operation {
    fn from(value: FindOneAndDelete) -> Self {
        Self::FindOneAndDelete(value)
    }
}
