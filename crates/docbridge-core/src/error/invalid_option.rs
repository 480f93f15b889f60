use super::Error;

/// Error when a custom field type is configured with an invalid option.
///
/// Raised while the schema is being defined (for example a vector field with
/// a zero dimension, or a vectorize field without a provider), never on the
/// first query.
#[derive(Debug)]
pub(super) struct InvalidOption {
    option: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidOption {}

impl core::fmt::Display for InvalidOption {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid option `{}`: {}", self.option, self.message)
    }
}

impl Error {
    /// Creates an invalid option error naming the offending option.
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOption(InvalidOption {
            option: option.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid option error.
    pub fn is_invalid_option(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOption(_))
    }
}
