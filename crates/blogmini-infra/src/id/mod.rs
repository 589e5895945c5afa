//! Post id generators.

mod clock;
mod random;

pub use clock::TimestampIdGenerator;
pub use random::UuidIdGenerator;
