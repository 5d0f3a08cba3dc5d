/// All backend primary keys are integer row ids.
pub type DbId = i64;

/// All client-side timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
