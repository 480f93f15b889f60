mod buffer;
use buffer::CommandBuffer;

mod options;
pub use options::{ConnectOptions, Mode};

mod state;
pub use state::State;

use crate::{Collection, CollectionsDb, Database, TablesDb};

use docbridge_core::{
    driver::{
        operation::{CreateKeyspace, Target, TargetKind},
        Capability, Client, ConnectionUrl, Driver, Operation, Response,
    },
    Error, Result, Schema,
};

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{oneshot, watch};

/// A logical connection to one keyspace of a remote Data API.
///
/// Cloning is cheap; clones share the same underlying client and state.
#[derive(Debug, Clone)]
pub struct Connection {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    driver: Arc<dyn Driver>,
    options: ConnectOptions,
    inner: Mutex<Inner>,

    /// Broadcasts every state change to [`Connection::ready`] waiters
    state_tx: watch::Sender<State>,
}

enum Dispatch {
    Now(Arc<dyn Client>, Operation),
    Queued(oneshot::Receiver<Result<Response>>),
}

#[derive(Debug, Default)]
struct Inner {
    state: State,
    client: Option<Arc<dyn Client>>,
    url: Option<ConnectionUrl>,
    buffer: CommandBuffer,

    /// Set while commands buffered during `connecting` are being released.
    /// New commands keep queueing behind them until the buffer is empty.
    draining: bool,
}

impl Connection {
    pub fn new(driver: impl Driver) -> Connection {
        Connection::with_options(driver, ConnectOptions::default())
    }

    pub fn with_options(driver: impl Driver, options: ConnectOptions) -> Connection {
        let (state_tx, _) = watch::channel(State::Disconnected);

        Connection {
            shared: Arc::new(Shared {
                driver: Arc::new(driver),
                options,
                inner: Mutex::new(Inner::default()),
                state_tx,
            }),
        }
    }

    /// Opens the connection described by `url` and waits until it is ready.
    ///
    /// Commands issued by other tasks while this call is in progress are
    /// queued when buffering is enabled and run, in order, once the client is
    /// connected. If opening fails, every queued command fails with the same
    /// error.
    ///
    /// Connecting runs on its own task. Dropping the returned future stops
    /// the wait, not the connect attempt.
    pub async fn open(&self, url: &str) -> Result<()> {
        let mut url = ConnectionUrl::parse(url)?;

        if url.application_token.is_none() {
            url.application_token = self.shared.options.application_token.clone();
        }

        if url.auth_header_name.is_none() {
            url.auth_header_name = self.shared.options.auth_header_name.clone();
        }

        {
            let mut inner = self.lock()?;
            self.transition(&mut inner, State::Connecting)?;
            inner.url = Some(url.clone());
        }

        tracing::debug!(keyspace = %url.keyspace, mode = self.mode().name(), "connecting");

        let task = tokio::spawn({
            let conn = self.clone();
            async move { conn.connect(url).await }
        });

        match task.await {
            Ok(result) => result,
            Err(join_err) => {
                let err = docbridge_core::err!("connect task failed: {join_err}");
                self.abandon(&err)?;
                Err(err)
            }
        }
    }

    /// Drives a connect attempt started by `open` to a settled state.
    async fn connect(&self, url: ConnectionUrl) -> Result<()> {
        match self.establish(&url).await {
            Ok(client) => {
                {
                    let mut inner = self.lock()?;
                    self.transition(&mut inner, State::Connected)?;
                    inner.client = Some(client.clone());
                    inner.draining = true;
                }

                self.drain(client).await
            }
            Err(err) => {
                self.abandon(&err)?;
                Err(err)
            }
        }
    }

    /// Moves a connecting connection back to disconnected and fails every
    /// buffered command with `err`.
    fn abandon(&self, err: &Error) -> Result<()> {
        let mut inner = self.lock()?;

        if inner.state == State::Connecting {
            self.transition(&mut inner, State::Disconnected)?;
            inner.url = None;
        }

        let rejected = inner.buffer.reject(err);
        tracing::debug!(rejected, error = %err, "connection failed; rejected buffered commands");
        Ok(())
    }

    async fn establish(&self, url: &ConnectionUrl) -> Result<Arc<dyn Client>> {
        let capability = self.shared.driver.capability();

        if self.mode() == Mode::Tables && !capability.tables {
            return Err(Error::invalid_option(
                "mode",
                "the remote API does not support tables",
            ));
        }

        let client = self.shared.driver.connect(url).await?;

        if self.shared.options.create_keyspace {
            if capability.keyspace_admin {
                let op = CreateKeyspace {
                    name: url.keyspace.clone(),
                    timeout: self.shared.options.admin_timeout,
                };

                if let Err(err) = client.exec(op.into()).await {
                    let _ = client.close().await;
                    return Err(err);
                }
            } else {
                tracing::warn!(keyspace = %url.keyspace, "remote API cannot create keyspaces; skipping");
            }
        }

        Ok(client)
    }

    /// Runs buffered commands in FIFO order until the queue stays empty.
    ///
    /// Stops once `client` is no longer the live client; commands it already
    /// took fail with a not-connected error.
    async fn drain(&self, client: Arc<dyn Client>) -> Result<()> {
        loop {
            let queue = {
                let mut inner = self.lock()?;

                if !inner.is_live(&client) {
                    return Ok(());
                }

                if inner.buffer.is_empty() {
                    inner.draining = false;
                    return Ok(());
                }

                inner.buffer.take()
            };

            tracing::debug!(released = queue.len(), "releasing buffered commands");

            for buffered in queue {
                let live = self.lock()?.is_live(&client);

                let result = if live {
                    client.exec(buffered.op).await
                } else {
                    Err(Error::not_connected(State::Disconnected.name()))
                };

                let _ = buffered.tx.send(result);
            }
        }
    }

    /// Waits until the connection is connected.
    ///
    /// Fails with a not-connected error if the connection is, or ends up,
    /// disconnected.
    pub async fn ready(&self) -> Result<()> {
        let mut rx = self.shared.state_tx.subscribe();

        loop {
            match *rx.borrow_and_update() {
                State::Connected => return Ok(()),
                State::Disconnected => return Err(Error::not_connected("disconnected")),
                State::Connecting => {}
            }

            if rx.changed().await.is_err() {
                return Err(Error::not_connected("disconnected"));
            }
        }
    }

    /// Closes the connection. Closing an already closed connection does
    /// nothing, and the remote client is closed exactly once even when
    /// several tasks close concurrently.
    pub async fn close(&self) -> Result<()> {
        if self.state() == State::Connecting {
            // Let the pending open finish so there is a client to close
            let _ = self.ready().await;
        }

        let client = {
            let mut inner = self.lock()?;

            let Some(client) = inner.client.take() else {
                return Ok(());
            };

            self.transition(&mut inner, State::Disconnected)?;
            inner.url = None;
            inner.draining = false;

            let rejected = inner.buffer.reject(&Error::not_connected(State::Disconnected.name()));
            if rejected > 0 {
                tracing::debug!(rejected, "closed with commands still buffered");
            }

            client
        };

        tracing::debug!("closing connection");
        client.close().await
    }

    pub fn state(&self) -> State {
        *self.shared.state_tx.borrow()
    }

    pub fn mode(&self) -> Mode {
        self.shared.options.mode
    }

    pub fn capability(&self) -> &Capability {
        self.shared.driver.capability()
    }

    /// The keyspace this connection was opened on.
    pub fn keyspace(&self) -> Result<String> {
        let inner = self.lock()?;
        match &inner.url {
            Some(url) => Ok(url.keyspace.clone()),
            None => Err(Error::not_connected(inner.state.name())),
        }
    }

    /// The database facade for this connection's mode.
    pub fn db(&self) -> Arc<dyn Database> {
        match self.mode() {
            Mode::Collections => Arc::new(CollectionsDb::new(self.clone())),
            Mode::Tables => Arc::new(TablesDb::new(self.clone())),
        }
    }

    /// Returns an adapter for the named collection, or table in tables mode.
    pub fn collection(&self, name: impl Into<String>) -> Collection {
        Collection::new(self.clone(), name.into(), None)
    }

    /// Returns an adapter that shapes documents and projections with
    /// `schema`. The collection is named after the schema.
    pub fn model(&self, schema: Arc<Schema>) -> Collection {
        Collection::new(self.clone(), schema.name.clone(), Some(schema))
    }

    pub(crate) fn target(&self, name: &str) -> Result<Target> {
        Ok(Target {
            keyspace: self.keyspace()?,
            name: name.to_string(),
            kind: match self.mode() {
                Mode::Collections => TargetKind::Collection,
                Mode::Tables => TargetKind::Table,
            },
        })
    }

    /// Executes `op`, queueing it first if the connection is still
    /// connecting and buffering is enabled.
    pub(crate) async fn exec(&self, op: Operation) -> Result<Response> {
        let dispatch = {
            let mut inner = self.lock()?;

            match inner.state {
                State::Connected if !inner.draining => match inner.client.clone() {
                    Some(client) => Dispatch::Now(client, op),
                    None => return Err(Error::not_connected(inner.state.name())),
                },
                State::Connected => Dispatch::Queued(inner.buffer.push(op)),
                State::Connecting if self.shared.options.buffer_commands => {
                    let rx = inner.buffer.push(op);
                    tracing::debug!(queued = inner.buffer.len(), "buffered command while connecting");
                    Dispatch::Queued(rx)
                }
                state => return Err(Error::not_connected(state.name())),
            }
        };

        match dispatch {
            Dispatch::Now(client, op) => {
                tracing::trace!(op = op.name(), target = ?op.target().map(|target| &target.name), "dispatch");
                client.exec(op).await
            }
            Dispatch::Queued(rx) => match rx.await {
                Ok(result) => result,
                Err(_) => Err(Error::not_connected("disconnected")),
            },
        }
    }

    fn transition(&self, inner: &mut Inner, to: State) -> Result<()> {
        let from = inner.state;
        inner.state = from.transition(to)?;
        self.shared.state_tx.send_replace(to);

        tracing::debug!(%from, %to, "connection state changed");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.shared
            .inner
            .lock()
            .map_err(|_| docbridge_core::err!("connection state lock poisoned"))
    }
}

impl Inner {
    /// Whether `client` is still the connected client.
    fn is_live(&self, client: &Arc<dyn Client>) -> bool {
        self.state == State::Connected
            && self
                .client
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, client))
    }
}
