use binform::BitVec;
use derive_more::{Display, FromStr};
use thiserror::Error;

/// A phase-free single-qubit Pauli observable.
#[derive(Clone, Copy, Debug, Display, FromStr, PartialEq, Eq, Hash)]
pub enum PauliObservable {
    I,
    X,
    Y,
    Z,
}

impl PauliObservable {
    #[must_use]
    pub fn from_bits(x_bit: bool, z_bit: bool) -> Self {
        match (x_bit, z_bit) {
            (false, false) => Self::I,
            (true, false) => Self::X,
            (true, true) => Self::Y,
            (false, true) => Self::Z,
        }
    }

    #[must_use]
    pub fn x_bit(self) -> bool {
        matches!(self, Self::X | Self::Y)
    }

    #[must_use]
    pub fn z_bit(self) -> bool {
        matches!(self, Self::Y | Self::Z)
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::I => 'I',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }
}

impl TryFrom<char> for PauliObservable {
    type Error = PauliParseError;

    fn try_from(symbol: char) -> Result<Self, PauliParseError> {
        match symbol.to_ascii_uppercase() {
            'I' => Ok(Self::I),
            'X' => Ok(Self::X),
            'Y' => Ok(Self::Y),
            'Z' => Ok(Self::Z),
            _ => Err(PauliParseError { symbol }),
        }
    }
}

/// The input contained a character other than `I`, `X`, `Y` or `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized Pauli symbol {symbol:?}")]
pub struct PauliParseError {
    pub symbol: char,
}

/// The binary symplectic row of a Pauli string: X-support in the first
/// half, Z-support in the second, `Y` contributing to both.
///
/// ```
/// use sympler::vector_from_pauli;
///
/// let vector = vector_from_pauli("XZZXI").unwrap();
/// assert_eq!(vector.to_string(), "1001001100");
/// ```
///
/// # Errors
///
/// Returns [`PauliParseError`] on the first character outside `IXYZ`
/// (lowercase accepted).
pub fn vector_from_pauli(pauli: &str) -> Result<BitVec, PauliParseError> {
    let observables = pauli
        .chars()
        .map(PauliObservable::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let qubit_count = observables.len();
    let mut vector = BitVec::zeros(2 * qubit_count);
    for (qubit_index, observable) in observables.iter().enumerate() {
        if observable.x_bit() {
            vector.assign_index(qubit_index, true);
        }
        if observable.z_bit() {
            vector.assign_index(qubit_count + qubit_index, true);
        }
    }
    Ok(vector)
}

/// The Pauli string of a binary symplectic row; inverse of
/// [`vector_from_pauli`].
///
/// # Panics
///
/// Will panic if the vector has odd length.
#[must_use]
pub fn pauli_from_vector(vector: &BitVec) -> String {
    assert_eq!(vector.len() % 2, 0, "vector length must be even");
    let qubit_count = vector.len() / 2;
    let mut pauli = String::with_capacity(qubit_count);
    for qubit_index in 0..qubit_count {
        let observable = PauliObservable::from_bits(
            vector.index(qubit_index),
            vector.index(qubit_count + qubit_index),
        );
        pauli.push(observable.symbol());
    }
    pauli
}

/// Parses a whole generator set of Pauli strings.
///
/// # Errors
///
/// Returns [`PauliParseError`] for the first unrecognized character in
/// any of the strings.
pub fn vectors_from_paulis(paulis: &[&str]) -> Result<Vec<BitVec>, PauliParseError> {
    paulis.iter().map(|pauli| vector_from_pauli(pauli)).collect()
}
