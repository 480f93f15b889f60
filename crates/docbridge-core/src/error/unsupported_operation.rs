use super::Error;

/// Error when an operation has no counterpart on the remote API.
///
/// Raised immediately, before anything is sent: transactions, aggregation
/// pipelines, bulk writes, change streams, `distinct`, and index management
/// in collections mode.
#[derive(Debug)]
pub(super) struct UnsupportedOperation {
    operation: Box<str>,
}

impl std::error::Error for UnsupportedOperation {}

impl core::fmt::Display for UnsupportedOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "operation not supported: {}", self.operation)
    }
}

impl Error {
    /// Creates an unsupported operation error naming the operation.
    pub fn unsupported_operation(operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperation(UnsupportedOperation {
            operation: operation.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported operation error.
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperation(_))
    }
}
