use crate::DriverOp;

use docbridge_core::{
    driver::{Operation, Response},
    Result,
};
use std::sync::{Arc, Mutex};

/// Read side of a [`MockDriver`](crate::MockDriver)'s operation log.
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Remote command names, oldest first.
    pub fn names(&self) -> Vec<&'static str> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.name())
            .collect()
    }

    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .any(|op| predicate(&op.operation))
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    pub fn has_find(&self) -> bool {
        self.any(|op| matches!(op, Operation::Find(_)))
    }

    pub fn has_insert(&self) -> bool {
        self.any(|op| matches!(op, Operation::InsertOne(_) | Operation::InsertMany(_)))
    }

    pub fn has_update(&self) -> bool {
        self.any(|op| matches!(op, Operation::UpdateOne(_) | Operation::UpdateMany(_)))
    }

    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Removes the oldest entry.
    pub fn pop(&mut self) -> Option<(Operation, Result<Response>)> {
        let mut ops = self.ops.lock().unwrap();
        (!ops.is_empty()).then(|| {
            let DriverOp { operation, response } = ops.remove(0);
            (operation, response)
        })
    }

    /// Removes the oldest operation, panicking when the log is empty.
    pub fn pop_op(&mut self) -> Operation {
        match self.pop() {
            Some((operation, _)) => operation,
            None => panic!("expected another operation in the log"),
        }
    }

    /// Runs `f` over every recorded entry, oldest first.
    pub fn with_ops<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[DriverOp]) -> R,
    {
        let ops = self.ops.lock().unwrap();
        f(&ops)
    }
}
