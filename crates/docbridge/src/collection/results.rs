use docbridge_core::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct InsertOneResult {
    pub inserted_id: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertManyResult {
    /// Ids in the order the remote acknowledged them
    pub inserted_ids: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteResult {
    /// `None` when the remote did not report an exact count
    pub deleted_count: Option<u64>,
}
