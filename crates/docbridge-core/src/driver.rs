mod capability;
pub use capability::Capability;

mod connection_url;
pub use connection_url::{ConnectionUrl, DEFAULT_AUTH_HEADER};

mod response;
pub use response::{Documents, Response, UpdateResult};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Result};

use std::{fmt::Debug, sync::Arc};

/// Factory for connections to a remote Data API.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes what the remote API supports.
    fn capability(&self) -> &Capability;

    /// Opens a client bound to the endpoint and credentials in `url`.
    async fn connect(&self, url: &ConnectionUrl) -> Result<Arc<dyn Client>>;
}

/// An open handle to the remote API.
#[async_trait]
pub trait Client: Debug + Send + Sync + 'static {
    /// Execute a single remote operation
    async fn exec(&self, op: Operation) -> Result<Response>;

    /// Release resources held by the client. Called at most once.
    async fn close(&self) -> Result<()>;
}
