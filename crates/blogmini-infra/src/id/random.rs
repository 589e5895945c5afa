use blogmini_core::ports::IdGenerator;
use uuid::Uuid;

/// Random v4 UUID ids. Unique, but not sortable by creation time.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
