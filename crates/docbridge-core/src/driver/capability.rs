#[derive(Debug, Clone)]
pub struct Capability {
    /// Supports schema-less collections
    pub collections: bool,

    /// Supports typed tables, user-defined types, and table indexes
    pub tables: bool,

    /// Supports keyspace administration (create and list)
    pub keyspace_admin: bool,

    /// Most documents a single `insertMany` request may carry. Larger inserts
    /// are split into several requests.
    pub max_insert_many: usize,
}

impl Capability {
    /// Capabilities of the hosted JSON Data API.
    pub const DATA_API: Self = Self {
        collections: true,
        tables: true,
        keyspace_admin: true,
        max_insert_many: 100,
    };

    /// Capabilities of a Data API deployment that predates typed tables.
    pub const DATA_API_COLLECTIONS_ONLY: Self = Self {
        tables: false,
        ..Self::DATA_API
    };
}
