//! # BlogMini Infrastructure
//!
//! Concrete implementations of the ports defined in `blogmini-core`:
//! post storage (JSON file, in-memory) and id generation.

pub mod id;
pub mod storage;

pub use id::{TimestampIdGenerator, UuidIdGenerator};
pub use storage::{InMemoryPostRepository, JsonFilePostRepository};
