pub mod collection;
pub use collection::Collection;

pub mod connection;
pub use connection::{ConnectOptions, Connection, Mode, State};

pub mod cursor;
pub use cursor::Cursor;

pub mod db;
pub use db::{CollectionsDb, Database, TablesDb};

pub mod options;

pub use docbridge_core::{
    bail, doc, driver, err, schema, stmt, types, wire, Error, Result, Schema,
};
