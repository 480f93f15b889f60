pub mod app;
pub use app::Schema;

mod builder;
pub use builder::{CompiledSchema, Compiler};

pub mod db;

/// Separator between the segments of a nested field path.
pub const PATH_SEPARATOR: char = '.';

/// Deepest nesting a field path may declare.
pub const MAX_PATH_DEPTH: usize = 2;
