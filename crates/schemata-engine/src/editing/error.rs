use crate::editing::keys::BlockKey;

/// Failure taxonomy for the editing core
///
/// Every failure is fail-closed: the operation that raised it committed no
/// state change, so the caller's document remains in its prior valid state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Selection references a block key absent from the document. Treated as
    /// a host precondition violation and surfaced immediately.
    #[error("selection references missing block: {key}")]
    BlockNotFound { key: BlockKey },

    /// Insertion token outside the fixed `half|main|bar|inverse` vocabulary.
    #[error("unsupported insertion kind: {token:?}")]
    UnsupportedInsertionKind { token: String },

    /// Document construction saw the same key twice.
    #[error("duplicate block key: {key}")]
    DuplicateKey { key: BlockKey },
}
