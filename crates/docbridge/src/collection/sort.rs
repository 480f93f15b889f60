use docbridge_core::{
    stmt::{Document, Value},
    wire::{serialize, WireDocument},
};

/// Key whose value replaces a sort entry verbatim.
pub(crate) const META_KEY: &str = "$meta";

/// Converts a sort specification to its wire form.
///
/// An entry of the form `{"$meta": x}` is replaced by `x`, which passes vector
/// and lexical sorts through untouched. Null entries are dropped. Returns
/// `None` when nothing is left, as the remote rejects an empty sort.
pub(crate) fn normalize_sort(sort: Option<&Document>) -> Option<WireDocument> {
    let sort = sort?;
    let mut wire = WireDocument::new();

    for (key, value) in sort.iter() {
        let value = match value {
            Value::Document(spec) => spec.get(META_KEY).unwrap_or(value),
            value => value,
        };

        if value.is_null() {
            continue;
        }

        wire.insert(key.clone(), serialize(value));
    }

    if wire.is_empty() {
        None
    } else {
        Some(wire)
    }
}
