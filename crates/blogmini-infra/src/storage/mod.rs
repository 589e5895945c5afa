//! Post storage - a JSON file on disk, with an in-memory fallback.

mod json_file;
mod memory;

pub use json_file::JsonFilePostRepository;
pub use memory::InMemoryPostRepository;
