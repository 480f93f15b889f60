//! Physical storage definitions produced by the schema compiler and sent to
//! the remote API's create-table and create-type commands.

mod column;
pub use column::{Column, ValueType};

mod table;
pub use table::TableDefinition;

mod ty;
pub use ty::ScalarType;

mod udt;
pub use udt::UdtDefinition;
