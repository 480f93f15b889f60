use super::Error;

/// Error when a data operation is issued before the connection is ready.
#[derive(Debug)]
pub(super) struct NotConnected {
    state: &'static str,
}

impl std::error::Error for NotConnected {}

impl core::fmt::Display for NotConnected {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not connected (connection is {})", self.state)
    }
}

impl Error {
    /// Creates a not connected error carrying the current connection state.
    pub fn not_connected(state: &'static str) -> Error {
        Error::from(super::ErrorKind::NotConnected(NotConnected { state }))
    }

    /// Returns `true` if this error is a not connected error.
    pub fn is_not_connected(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NotConnected(_))
    }
}
