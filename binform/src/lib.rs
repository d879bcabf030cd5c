pub mod matrix;
pub use matrix::{BitMatrix, BitSlice, EchelonForm};

pub mod vec;
pub use vec::{BitVec, ParseBitsError};
