//! Container and scalar types that take part in change tracking while
//! serializing to the remote API's own format.

mod set;
pub use set::{SetUpdate, ValueSet};

mod storable;
pub use storable::{AtomicUpdate, Storable};

mod tracked;
pub use tracked::TrackedDocument;

mod tracker;
pub use tracker::ChangeTracker;

mod vector;
pub use vector::{cast_vector, Vectorize, VectorizeService};
