mod binary;
pub use binary::{Binary, BinarySubtype};

mod custom;
pub use custom::{CustomValue, ToWire};

mod document;
pub use document::Document;

mod object_id;
pub use object_id::ObjectId;

mod value;
pub use value::Value;

pub use bigdecimal::num_bigint::BigInt;
pub use bigdecimal::BigDecimal;

/// Name of the identifier field every stored document carries.
pub const ID_FIELD: &str = "_id";
