use super::Operation;

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateKeyspace {
    pub name: String,

    /// Overrides the client timeout for this request
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListKeyspaces;

impl From<CreateKeyspace> for Operation {
    fn from(value: CreateKeyspace) -> Self {
        Self::CreateKeyspace(value)
    }
}

impl From<ListKeyspaces> for Operation {
    fn from(value: ListKeyspaces) -> Self {
        Self::ListKeyspaces(value)
    }
}
