use super::Operation;
use crate::wire::WireDocument;

/// A raw command posted to the keyspace, or to one of its collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub keyspace: String,
    pub collection: Option<String>,
    pub body: WireDocument,
}

impl From<Command> for Operation {
    fn from(value: Command) -> Self {
        Self::Command(value)
    }
}
