// Error types for roster edits.

use thiserror::Error;

/// Rejected roster input. The roster is left unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("participant name must not be empty")]
    EmptyName,

    #[error("unknown group `{0}` (expected Adult or Kid)")]
    UnknownGroup(String),
}
