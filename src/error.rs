use thiserror::Error;

/// Typed failures callers are expected to match on. Everything else in the
/// crate travels as a plain `anyhow::Error`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A versioned save lost the race: the collection was rewritten after
    /// the caller's read. Retry against a fresh load/version pair.
    #[error("version conflict on '{key}': expected {expected}, found {found}")]
    Conflict {
        key: String,
        expected: i64,
        found: i64,
    },
}
