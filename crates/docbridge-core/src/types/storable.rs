use crate::stmt::Value;

/// An update clause a container contributes to the next write, e.g.
/// `{"$push": {"tags": {"$each": [...]}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicUpdate {
    /// Update operator, `$push`, `$pullAll` or `$set`
    pub operator: &'static str,
    pub path: String,
    pub value: Value,
}

/// Interface between container types and the document they live in.
pub trait Storable {
    /// The value to store when the whole container is written.
    fn to_wire_value(&self) -> Value;

    /// Flags the owning document's path as modified.
    fn mark_dirty(&mut self);

    /// The single pending atomic mutation, if any.
    fn pending_atomic_update(&self) -> Option<AtomicUpdate>;

    /// Forgets the pending mutation after a successful write.
    fn commit(&mut self);
}
