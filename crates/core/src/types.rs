/// Primary keys are UUIDv7, so ids sort in creation order.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity id.
pub fn new_id() -> EntityId {
    uuid::Uuid::now_v7()
}
