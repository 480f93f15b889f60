use docbridge_core::{Error, Result};

/// Readiness of a [`Connection`](super::Connection).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::Disconnected => "disconnected",
            State::Connecting => "connecting",
            State::Connected => "connected",
        }
    }

    /// Returns `to` if the transition is legal.
    ///
    /// ```text
    /// disconnected -> connecting -> connected
    ///                 connecting -> disconnected   (failure)
    ///                 connected  -> disconnected   (close)
    /// ```
    pub fn transition(self, to: State) -> Result<State> {
        use State::*;

        match (self, to) {
            (Disconnected, Connecting)
            | (Connecting, Connected)
            | (Connecting, Disconnected)
            | (Connected, Disconnected) => Ok(to),
            (from, to) => Err(Error::invalid_state_transition(from.name(), to.name())),
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
