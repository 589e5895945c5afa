//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod id;
mod repository;

pub use id::IdGenerator;
pub use repository::{BaseRepository, PostRepository};
