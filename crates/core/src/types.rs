use indexmap::IndexMap;

/// Parameter values keyed by parameter name, in authoring order.
pub type Params = IndexMap<String, String>;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
