use std::time::Duration;

/// Which kind of remote storage a connection works with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Schema-less JSON collections
    #[default]
    Collections,

    /// Typed tables with compiled column definitions
    Tables,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Collections => "collections",
            Mode::Tables => "tables",
        }
    }
}

/// Options applied when a [`Connection`](super::Connection) opens.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub(crate) mode: Mode,
    pub(crate) buffer_commands: bool,
    pub(crate) admin_timeout: Option<Duration>,
    pub(crate) create_keyspace: bool,
    pub(crate) application_token: Option<String>,
    pub(crate) auth_header_name: Option<String>,
}

impl ConnectOptions {
    pub fn new() -> ConnectOptions {
        ConnectOptions::default()
    }

    pub fn mode(mut self, mode: Mode) -> ConnectOptions {
        self.mode = mode;
        self
    }

    /// Queue commands issued while connecting instead of failing them.
    /// Enabled by default.
    pub fn buffer_commands(mut self, enabled: bool) -> ConnectOptions {
        self.buffer_commands = enabled;
        self
    }

    /// Timeout for keyspace creation. Other requests use the client's own
    /// timeout.
    pub fn admin_timeout(mut self, timeout: Duration) -> ConnectOptions {
        self.admin_timeout = Some(timeout);
        self
    }

    /// Create the keyspace while connecting.
    pub fn create_keyspace(mut self, enabled: bool) -> ConnectOptions {
        self.create_keyspace = enabled;
        self
    }

    /// Token used when the connection string carries none.
    pub fn application_token(mut self, token: impl Into<String>) -> ConnectOptions {
        self.application_token = Some(token.into());
        self
    }

    /// Auth header used when the connection string names none.
    pub fn auth_header_name(mut self, name: impl Into<String>) -> ConnectOptions {
        self.auth_header_name = Some(name.into());
        self
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }
}

impl Default for ConnectOptions {
    fn default() -> Self {
        ConnectOptions {
            mode: Mode::Collections,
            buffer_commands: true,
            admin_timeout: None,
            create_keyspace: false,
            application_token: None,
            auth_header_name: None,
        }
    }
}
