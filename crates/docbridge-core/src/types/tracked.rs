use super::{ChangeTracker, Storable, ValueSet};
use crate::{
    schema::app::{FieldTy, Schema},
    stmt::{Document, Value, ID_FIELD},
    Result,
};

use indexmap::IndexMap;

/// A document together with the changes made to it since it was loaded or
/// last saved.
///
/// Set-typed fields are held as [`ValueSet`] containers so that their
/// mutations can be written as atomic set updates.
#[derive(Debug, Clone)]
pub struct TrackedDocument {
    doc: Document,
    sets: IndexMap<String, ValueSet>,
    tracker: ChangeTracker,
}

impl TrackedDocument {
    /// Wraps a document without any schema knowledge.
    pub fn new(doc: Document) -> TrackedDocument {
        TrackedDocument {
            doc,
            sets: IndexMap::new(),
            tracker: ChangeTracker::new(),
        }
    }

    /// Wraps a document, turning every set-typed field of `schema` into a
    /// tracked container.
    pub fn hydrate(mut doc: Document, schema: &Schema) -> Result<TrackedDocument> {
        let tracker = ChangeTracker::new();
        let mut sets = IndexMap::new();

        for field in schema.fields() {
            let FieldTy::Set(set) = &field.ty else {
                continue;
            };

            let input = doc.remove(&field.path).unwrap_or(Value::Null);
            let container = ValueSet::cast(field.path.clone(), set.value.ty.as_primitive(), input)?
                .with_tracker(tracker.clone());
            sets.insert(field.path.clone(), container);
        }

        Ok(TrackedDocument { doc, sets, tracker })
    }

    pub fn id(&self) -> Option<&Value> {
        self.doc.id()
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.doc.get(path)
    }

    /// Returns the tracked container for a set-typed field.
    pub fn set_field(&mut self, path: &str) -> Option<&mut ValueSet> {
        self.sets.get_mut(path)
    }

    /// Assigns a field, marking it modified.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();

        if let Some(container) = self.sets.get_mut(path) {
            return container.replace_all(value);
        }

        self.doc.insert(path, value);
        self.tracker.mark(path);
        Ok(())
    }

    /// Removes a field, marking it modified.
    pub fn unset(&mut self, path: &str) {
        self.doc.remove(path);
        self.tracker.mark(path);
    }

    pub fn is_modified(&self) -> bool {
        !self.tracker.modified_paths().is_empty()
    }

    /// The full document, containers included.
    pub fn to_document(&self) -> Document {
        let mut doc = self.doc.clone();
        for (path, container) in &self.sets {
            doc.insert(path.clone(), container.to_wire_value());
        }
        doc
    }

    /// Builds the update for every modified path, or `None` when nothing
    /// changed.
    ///
    /// Set containers contribute their pending atomic update; other fields
    /// become `$set`, or `$unset` when removed or nulled.
    pub fn to_update(&self) -> Option<Document> {
        let mut update = Document::new();

        for path in self.tracker.modified_paths() {
            if path == ID_FIELD {
                continue;
            }

            let (operator, value) = match self.sets.get(&path) {
                Some(container) => match container.pending_atomic_update() {
                    Some(atomic) => (atomic.operator, atomic.value),
                    None => continue,
                },
                None => match self.doc.get(&path) {
                    Some(value) if !value.is_null() => ("$set", value.clone()),
                    _ => ("$unset", Value::from("")),
                },
            };

            if let Some(clause) = update.entry_document(operator) {
                clause.insert(path, value);
            }
        }

        if update.is_empty() {
            None
        } else {
            Some(update)
        }
    }

    /// Forgets all recorded changes after a successful write.
    pub fn commit(&mut self) {
        self.tracker.clear();
        for container in self.sets.values_mut() {
            container.commit();
        }
    }
}
