use super::{AtomicUpdate, ChangeTracker, Storable};
use crate::{
    schema::app::Primitive,
    stmt::Value,
    Result,
};

/// A collection of unique values with change tracking.
///
/// Mutations are recorded as a single pending descriptor because the remote
/// API accepts only one kind of set mutation per write. Consecutive adds
/// coalesce into one append batch and consecutive deletes into one remove
/// batch. Mixing the two, or clearing, collapses the descriptor into a full
/// replace of the current contents. Once a replace is pending, every later
/// mutation refreshes the replace.
#[derive(Debug, Clone)]
pub struct ValueSet {
    items: Vec<Value>,
    element: Option<Primitive>,
    path: String,
    tracker: Option<ChangeTracker>,
    pending: Option<SetUpdate>,
}

/// Pending set mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SetUpdate {
    Append(Vec<Value>),
    Remove(Vec<Value>),
    Replace(Vec<Value>),
}

impl ValueSet {
    pub fn new(path: impl Into<String>, element: Option<Primitive>) -> ValueSet {
        ValueSet {
            items: vec![],
            element,
            path: path.into(),
            tracker: None,
            pending: None,
        }
    }

    /// Builds a set from an array, a set, or a single value, casting every
    /// element and dropping duplicates.
    pub fn cast(path: impl Into<String>, element: Option<Primitive>, input: Value) -> Result<ValueSet> {
        let mut set = ValueSet::new(path, element);

        let values = match input {
            Value::Null => vec![],
            Value::Array(items) | Value::Set(items) => items,
            value => vec![value],
        };

        for value in values {
            let value = set.cast_element(value)?;
            if !set.items.contains(&value) {
                set.items.push(value);
            }
        }

        Ok(set)
    }

    /// Attaches the owning document's change tracker.
    pub fn with_tracker(mut self, tracker: ChangeTracker) -> ValueSet {
        self.tracker = Some(tracker);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    pub fn pending(&self) -> Option<&SetUpdate> {
        self.pending.as_ref()
    }

    /// Adds a value. Returns `false` if it was already present.
    pub fn add(&mut self, value: impl Into<Value>) -> Result<bool> {
        let value = self.cast_element(value.into())?;
        if self.items.contains(&value) {
            return Ok(false);
        }

        self.items.push(value.clone());
        self.mark_dirty();

        self.pending = Some(match self.pending.take() {
            None => SetUpdate::Append(vec![value]),
            Some(SetUpdate::Append(mut batch)) => {
                batch.push(value);
                SetUpdate::Append(batch)
            }
            Some(SetUpdate::Remove(_) | SetUpdate::Replace(_)) => {
                SetUpdate::Replace(self.items.clone())
            }
        });

        Ok(true)
    }

    /// Removes a value. Returns `false` if it was not present.
    pub fn delete(&mut self, value: impl Into<Value>) -> Result<bool> {
        let value = self.cast_element(value.into())?;
        let Some(index) = self.items.iter().position(|item| *item == value) else {
            return Ok(false);
        };

        self.items.remove(index);
        self.mark_dirty();

        self.pending = Some(match self.pending.take() {
            None => SetUpdate::Remove(vec![value]),
            Some(SetUpdate::Remove(mut batch)) => {
                batch.push(value);
                SetUpdate::Remove(batch)
            }
            Some(SetUpdate::Append(_) | SetUpdate::Replace(_)) => {
                SetUpdate::Replace(self.items.clone())
            }
        });

        Ok(true)
    }

    /// Replaces the contents with `input`. Always records a full replace.
    pub fn replace_all(&mut self, input: Value) -> Result<()> {
        let replacement = ValueSet::cast(self.path.clone(), self.element, input)?;
        self.items = replacement.items;
        self.mark_dirty();
        self.pending = Some(SetUpdate::Replace(self.items.clone()));
        Ok(())
    }

    /// Removes every value. Always records a full replace.
    pub fn clear(&mut self) {
        self.items.clear();
        self.mark_dirty();
        self.pending = Some(SetUpdate::Replace(vec![]));
    }

    fn cast_element(&self, value: Value) -> Result<Value> {
        let value = match self.element {
            Some(primitive) => primitive.cast(value)?,
            None => value,
        };

        Ok(value)
    }
}

impl Storable for ValueSet {
    fn to_wire_value(&self) -> Value {
        Value::Set(self.items.clone())
    }

    fn mark_dirty(&mut self) {
        if let Some(tracker) = &self.tracker {
            tracker.mark(&self.path);
        }
    }

    fn pending_atomic_update(&self) -> Option<AtomicUpdate> {
        let (operator, value) = match self.pending.as_ref()? {
            SetUpdate::Append(batch) => (
                "$push",
                Value::Document(crate::doc! { "$each" => Value::Array(batch.clone()) }),
            ),
            SetUpdate::Remove(batch) => ("$pullAll", Value::Array(batch.clone())),
            SetUpdate::Replace(items) => ("$set", Value::Set(items.clone())),
        };

        Some(AtomicUpdate {
            operator,
            path: self.path.clone(),
            value,
        })
    }

    fn commit(&mut self) {
        self.pending = None;
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &ValueSet) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().all(|item| other.items.contains(item))
    }
}
