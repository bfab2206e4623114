use thiserror::Error;

/// Errors reported by matrix and network operations.
///
/// Every error is detected synchronously at the call that violates the
/// contract and aborts that operation before any weight is mutated. Nothing
/// is retried internally; recovery is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetError {
    /// Operand dimensions disagree with what the operation requires.
    #[error("shape mismatch in {op}: expected {expected}, got {found}")]
    Shape {
        op: &'static str,
        expected: String,
        found: String,
    },

    /// A network was declared with fewer than one input or output.
    #[error("invalid topology: {inputs} inputs and {outputs} outputs (both must be at least 1)")]
    InvalidTopology { inputs: usize, outputs: usize },
}
