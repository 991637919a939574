use thiserror::Error;

/// Error type shared by the recurrence expander, balance projector, and cron
/// adapter.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The rule carries an out-of-range field or no resolvable anchoring
    /// mode. Callers translate this into a client error (HTTP 400).
    #[error("invalid recurrence rule: {0}")]
    InvalidRule(String),
    /// The projection input cannot be processed as supplied. Callers
    /// translate this into "error computing balances" (HTTP 500).
    #[error("invalid projection input: {0}")]
    ProjectionInput(String),
}
