use docbridge_core::{
    async_trait,
    driver::{
        Capability, Client, ConnectionUrl, Driver, Operation, Response, UpdateResult,
    },
    wire::{WireDocument, WireValue},
    Error, Result,
};

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use tokio::sync::oneshot;

use crate::ExecLog;

/// An in-memory driver that records every operation and answers from a
/// script, falling back to plausible defaults.
///
/// Clones share state, so a test keeps one handle while the connection owns
/// another.
#[derive(Debug, Clone)]
pub struct MockDriver {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    capability: Capability,
    ops: Arc<Mutex<Vec<DriverOp>>>,
    script: Mutex<VecDeque<Result<Response>>>,

    /// Holds `connect` until the paired [`Gate`] opens
    gate: Mutex<Option<oneshot::Receiver<()>>>,

    /// Holds the next `exec` until the paired [`Gate`] opens
    exec_gate: Mutex<Option<oneshot::Receiver<()>>>,
    connect_error: Mutex<Option<Error>>,
    urls: Mutex<Vec<ConnectionUrl>>,
    connects: AtomicUsize,
    closes: AtomicUsize,
    generated_ids: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Result<Response>,
}

/// Releases a connect attempt held by [`MockDriver::gate`].
#[derive(Debug)]
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn open(self) {
        let _ = self.0.send(());
    }
}

impl MockDriver {
    pub fn new() -> MockDriver {
        MockDriver::with_capability(Capability::DATA_API)
    }

    pub fn with_capability(capability: Capability) -> MockDriver {
        MockDriver {
            shared: Arc::new(Shared {
                capability,
                ops: Arc::new(Mutex::new(vec![])),
                script: Mutex::new(VecDeque::new()),
                gate: Mutex::new(None),
                exec_gate: Mutex::new(None),
                connect_error: Mutex::new(None),
                urls: Mutex::new(vec![]),
                connects: AtomicUsize::new(0),
                closes: AtomicUsize::new(0),
                generated_ids: AtomicUsize::new(0),
            }),
        }
    }

    /// Makes the next connect attempt wait until the returned gate opens.
    pub fn gate(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        *self.shared.gate.lock().unwrap() = Some(rx);
        Gate(tx)
    }

    /// Makes the next executed operation wait until the returned gate opens.
    pub fn hold_exec(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        *self.shared.exec_gate.lock().unwrap() = Some(rx);
        Gate(tx)
    }

    /// Makes connect attempts fail with `err`.
    pub fn fail_connect(&self, err: Error) {
        *self.shared.connect_error.lock().unwrap() = Some(err);
    }

    /// Queues the result of the next executed operation.
    pub fn respond(&self, result: Result<Response>) {
        self.shared.script.lock().unwrap().push_back(result);
    }

    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.shared.ops.clone())
    }

    pub fn connects(&self) -> usize {
        self.shared.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.shared.closes.load(Ordering::SeqCst)
    }

    /// The URL of the most recent connect attempt.
    pub fn last_url(&self) -> Option<ConnectionUrl> {
        self.shared.urls.lock().unwrap().last().cloned()
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        MockDriver::new()
    }
}

#[async_trait]
impl Driver for MockDriver {
    fn capability(&self) -> &Capability {
        &self.shared.capability
    }

    async fn connect(&self, url: &ConnectionUrl) -> Result<Arc<dyn Client>> {
        self.shared.connects.fetch_add(1, Ordering::SeqCst);
        self.shared.urls.lock().unwrap().push(url.clone());

        let gate = self.shared.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(err) = self.shared.connect_error.lock().unwrap().clone() {
            return Err(err);
        }

        Ok(Arc::new(MockClient {
            shared: self.shared.clone(),
        }))
    }
}

#[derive(Debug)]
struct MockClient {
    shared: Arc<Shared>,
}

#[async_trait]
impl Client for MockClient {
    async fn exec(&self, operation: Operation) -> Result<Response> {
        let gate = self.shared.exec_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let scripted = self.shared.script.lock().unwrap().pop_front();
        let response = match scripted {
            Some(response) => response,
            None => Ok(self.default_response(&operation)),
        };

        self.shared.ops.lock().unwrap().push(DriverOp {
            operation,
            response: response.clone(),
        });

        response
    }

    async fn close(&self) -> Result<()> {
        self.shared.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl MockClient {
    fn default_response(&self, operation: &Operation) -> Response {
        match operation {
            Operation::Find(_) => Response::documents(vec![]),
            Operation::FindOne(_)
            | Operation::FindOneAndUpdate(_)
            | Operation::FindOneAndReplace(_)
            | Operation::FindOneAndDelete(_) => Response::Document(None),
            Operation::InsertOne(op) => Response::Inserted(vec![self.id_of(&op.document)]),
            Operation::InsertMany(op) => Response::Inserted(
                op.documents
                    .iter()
                    .map(|document| self.id_of(document))
                    .collect(),
            ),
            Operation::UpdateOne(_) | Operation::UpdateMany(_) | Operation::ReplaceOne(_) => {
                Response::Updated(UpdateResult {
                    matched: 1,
                    modified: 1,
                    upserted_id: None,
                })
            }
            Operation::DeleteOne(_) => Response::Deleted(Some(1)),
            Operation::DeleteMany(_) => Response::Deleted(Some(0)),
            Operation::CountDocuments(_) | Operation::EstimatedDocumentCount(_) => {
                Response::Count {
                    count: 0,
                    more: false,
                }
            }
            Operation::ListCollections(_)
            | Operation::ListTables(_)
            | Operation::ListIndexes(_)
            | Operation::ListKeyspaces(_) => Response::Names(vec![]),
            Operation::Command(_) => Response::Raw(serde_json::json!({ "status": { "ok": 1 } })),
            _ => Response::Ok,
        }
    }

    /// The document's `_id`, or a generated one like the remote would assign.
    fn id_of(&self, document: &WireDocument) -> WireValue {
        match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let n = self.shared.generated_ids.fetch_add(1, Ordering::SeqCst);
                WireValue::String(format!("generated-{n}"))
            }
        }
    }
}
