//! Conversion between mapping-layer [`Value`]s and the remote API's JSON.
//!
//! Both directions are total. Strings, numbers and booleans pass through
//! unchanged, so serializing an already wire-safe value is a no-op.
//!
//! [`Value`]: crate::stmt::Value

mod deserialize;
pub use deserialize::{deserialize, Deserializer};

mod serialize;
pub use serialize::{serialize, serialize_document, serialize_filter, serialize_update};

/// A JSON value as sent to or received from the remote API.
pub type WireValue = serde_json::Value;

/// A JSON object as sent to or received from the remote API.
pub type WireDocument = serde_json::Map<String, serde_json::Value>;

/// Reserved key carrying a document's vector in collections mode.
pub const VECTOR_KEY: &str = "$vector";

/// Reserved key carrying the text to embed server-side in collections mode.
pub const VECTORIZE_KEY: &str = "$vectorize";

pub(crate) const DATE_KEY: &str = "$date";
pub(crate) const BINARY_KEY: &str = "$binary";
pub(crate) const UUID_KEY: &str = "$uuid";
pub(crate) const OBJECT_ID_KEY: &str = "$objectId";
