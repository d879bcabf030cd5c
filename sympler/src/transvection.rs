use crate::form::SymplecticForm;
use binform::{BitMatrix, BitVec};

/// A symplectic transvection `T_h = I + Ω·(h ⊗ h) mod 2`.
///
/// Acting on row vectors, `v·T_h = v + ⟨v, h⟩·h`: observables commuting
/// with the direction `h` are fixed, anticommuting ones are translated by
/// `h`. Every transvection is symplectic and is its own inverse; the zero
/// direction gives the identity.
///
/// # Examples
///
/// ```
/// use binform::BitVec;
/// use sympler::Transvection;
///
/// let transvection = Transvection::new("0110".parse().unwrap());
/// let x0 = BitVec::unit(0, 4);
/// assert_eq!(transvection.apply(&x0), "1110".parse().unwrap());
/// // applying twice is the identity
/// assert_eq!(transvection.apply(&transvection.apply(&x0)), x0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transvection {
    vector: BitVec,
}

impl Transvection {
    /// # Panics
    ///
    /// Will panic if the direction vector has odd length.
    #[must_use]
    pub fn new(vector: BitVec) -> Self {
        assert_eq!(vector.len() % 2, 0, "direction vector length must be even");
        Self { vector }
    }

    /// The direction vector `h`.
    #[must_use]
    pub fn vector(&self) -> &BitVec {
        &self.vector
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.vector.len() / 2
    }

    /// The action on a row vector: `v + ⟨v, h⟩·h`, without materializing
    /// the matrix.
    ///
    /// # Panics
    ///
    /// Will panic if `vector` and the direction have different lengths.
    #[must_use]
    pub fn apply(&self, vector: &BitVec) -> BitVec {
        let mut image = vector.clone();
        if self.form().product(vector, &self.vector) {
            image ^= &self.vector;
        }
        image
    }

    /// The matrix of the transvection; `apply` is multiplication by it.
    #[must_use]
    pub fn matrix(&self) -> BitMatrix {
        let conjugated = self.form().conjugate(&self.vector);
        let mut matrix = BitMatrix::identity(self.vector.len());
        for row_index in conjugated.support() {
            for column_index in self.vector.support() {
                matrix.negate((row_index, column_index));
            }
        }
        matrix
    }

    /// `M · T_h`, folding this transvection into an accumulated product
    /// row by row.
    ///
    /// # Panics
    ///
    /// Will panic if the column count of `matrix` differs from the
    /// direction length.
    #[must_use]
    pub fn apply_right(&self, matrix: &BitMatrix) -> BitMatrix {
        assert_eq!(
            matrix.column_count(),
            self.vector.len(),
            "column count must match the direction length"
        );
        let mut result = BitMatrix::zeros(matrix.row_count(), matrix.column_count());
        for (row_index, row) in matrix.rows().enumerate() {
            result.assign_row(row_index, &self.apply(&row.to_bitvec()));
        }
        result
    }

    fn form(&self) -> SymplecticForm {
        SymplecticForm::new(self.qubit_count())
    }
}

impl From<BitVec> for Transvection {
    fn from(vector: BitVec) -> Self {
        Self::new(vector)
    }
}
