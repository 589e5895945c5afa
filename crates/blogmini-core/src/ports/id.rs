/// Source of unique post identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce an id never returned before by this generator.
    fn next_id(&self) -> String;
}
