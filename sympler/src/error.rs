use thiserror::Error;

/// Errors arising while building or inverting symplectic encoding matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// More logical qubits were requested than physical qubits exist.
    #[error("invalid code configuration: {logical_count} logical qubits on {qubit_count} physical qubits")]
    InvalidConfiguration { qubit_count: usize, logical_count: usize },

    /// A generator set or vector has the wrong size for the code.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The requested generator mapping cannot be realized by any symplectic
    /// matrix.
    #[error("inconsistent generator set: {0}")]
    InconsistentGenerators(String),

    /// The matrix is not a member of the binary symplectic group.
    #[error("matrix is not symplectic")]
    NotSymplectic,
}
