use super::Error;

/// Error when a database facade is asked for an operation that belongs to the
/// other operating mode (creating a collection while in tables mode, or the
/// reverse).
#[derive(Debug)]
pub(super) struct ModeMismatch {
    operation: Box<str>,
    mode: &'static str,
}

impl std::error::Error for ModeMismatch {}

impl core::fmt::Display for ModeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "`{}` is not available in {} mode",
            self.operation, self.mode
        )
    }
}

impl Error {
    pub fn mode_mismatch(operation: impl Into<String>, mode: &'static str) -> Error {
        Error::from(super::ErrorKind::ModeMismatch(ModeMismatch {
            operation: operation.into().into(),
            mode,
        }))
    }

    pub fn is_mode_mismatch(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ModeMismatch(_))
    }
}
