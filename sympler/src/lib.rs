pub mod encoding;
pub mod error;
pub mod form;
pub mod pauli;
pub mod search;
pub mod transvection;

pub use encoding::{encoding_matrix, encoding_matrix_between, unencoded_stabilizers};
pub use error::EncodingError;
pub use form::{SymplecticForm, anti_commutes_with, commutes_with, invert_symplectic};
pub use pauli::{
    PauliObservable, PauliParseError, pauli_from_vector, vector_from_pauli, vectors_from_paulis,
};
pub use search::{anticommuting_vector, anticommuting_vector_fixing};
pub use transvection::Transvection;
