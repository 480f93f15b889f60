use super::Error;

/// Error when the connection state machine is asked to make an illegal move.
#[derive(Debug)]
pub(super) struct InvalidStateTransition {
    from: &'static str,
    to: &'static str,
}

impl std::error::Error for InvalidStateTransition {}

impl core::fmt::Display for InvalidStateTransition {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid connection state transition from `{}` to `{}`",
            self.from, self.to
        )
    }
}

impl Error {
    pub fn invalid_state_transition(from: &'static str, to: &'static str) -> Error {
        Error::from(super::ErrorKind::InvalidStateTransition(
            InvalidStateTransition { from, to },
        ))
    }

    pub fn is_invalid_state_transition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidStateTransition(_))
    }
}
