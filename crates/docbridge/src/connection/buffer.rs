use docbridge_core::{
    driver::{Operation, Response},
    Error, Result,
};

use std::collections::VecDeque;
use tokio::sync::oneshot;

/// A command issued while the connection was not ready yet.
#[derive(Debug)]
pub(crate) struct Buffered {
    pub(crate) op: Operation,
    pub(crate) tx: oneshot::Sender<Result<Response>>,
}

/// FIFO of commands waiting for the connection to become ready.
#[derive(Debug, Default)]
pub(crate) struct CommandBuffer {
    queue: VecDeque<Buffered>,
}

impl CommandBuffer {
    /// Queues `op`. The receiver resolves once the command has been released
    /// and executed, or rejected.
    pub(crate) fn push(&mut self, op: Operation) -> oneshot::Receiver<Result<Response>> {
        let (tx, rx) = oneshot::channel();
        self.queue.push_back(Buffered { op, tx });
        rx
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Removes every queued command, oldest first.
    pub(crate) fn take(&mut self) -> VecDeque<Buffered> {
        std::mem::take(&mut self.queue)
    }

    /// Fails every queued command with `err`. Returns how many were rejected.
    pub(crate) fn reject(&mut self, err: &Error) -> usize {
        let queue = self.take();
        let len = queue.len();

        for buffered in queue {
            // The caller may have stopped waiting
            let _ = buffered.tx.send(Err(err.clone()));
        }

        len
    }
}
