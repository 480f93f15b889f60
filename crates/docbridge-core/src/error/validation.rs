/// Error when a value fails validation constraints.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) path: Box<str>,
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// Vector length does not match the declared dimension
    Dimension { expected: usize, actual: usize },

    /// A required field is missing or null
    Required,

    /// Free-form failure
    Message(Box<str>),
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "validation failed at `{}`: ", self.path)?;

        match &self.kind {
            ValidationErrorKind::Dimension { expected, actual } => {
                write!(f, "expected {} dimensions, got {}", expected, actual)
            }
            ValidationErrorKind::Required => f.write_str("value is required"),
            ValidationErrorKind::Message(message) => f.write_str(message),
        }
    }
}

impl super::Error {
    /// Creates a dimension mismatch validation error.
    pub fn validation_dimension(
        path: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> super::Error {
        Self::validation_kind(path, ValidationErrorKind::Dimension { expected, actual })
    }

    /// Creates a required-field validation error.
    pub fn validation_required(path: impl Into<String>) -> super::Error {
        Self::validation_kind(path, ValidationErrorKind::Required)
    }

    /// Creates a validation error with a custom message.
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> super::Error {
        Self::validation_kind(
            path,
            ValidationErrorKind::Message(message.into().into()),
        )
    }

    fn validation_kind(path: impl Into<String>, kind: ValidationErrorKind) -> super::Error {
        super::Error::from(super::ErrorKind::Validation(ValidationError {
            path: path.into().into(),
            kind,
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}
