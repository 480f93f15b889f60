use docbridge_core::stmt::{Document, ObjectId, Value, ID_FIELD};

/// Update operators whose fields are written on insert.
const INSERTING_OPERATORS: [&str; 2] = ["$set", "$setOnInsert"];

/// Gives an upserted document a client-generated id.
///
/// Adds `_id` under `$setOnInsert` unless the filter or the update already
/// pins one. Returns the injected id.
pub(crate) fn inject_update_id(filter: &Document, update: &mut Document) -> Option<ObjectId> {
    if filter.contains_key(ID_FIELD) || update.contains_key(ID_FIELD) {
        return None;
    }

    let pinned = INSERTING_OPERATORS.iter().any(|operator| {
        matches!(update.get(operator), Some(Value::Document(clause)) if clause.contains_key(ID_FIELD))
    });

    if pinned {
        return None;
    }

    let clause = update.entry_document("$setOnInsert")?;
    let id = ObjectId::new();
    clause.insert(ID_FIELD, id);

    tracing::trace!(%id, "injected upsert id");
    Some(id)
}

/// Gives an upserted replacement document a client-generated id, unless the
/// filter or the replacement already has one.
pub(crate) fn inject_replacement_id(
    filter: &Document,
    replacement: &mut Document,
) -> Option<ObjectId> {
    if filter.contains_key(ID_FIELD) || replacement.contains_key(ID_FIELD) {
        return None;
    }

    let id = ObjectId::new();
    replacement.insert(ID_FIELD, id);

    tracing::trace!(%id, "injected upsert id");
    Some(id)
}
