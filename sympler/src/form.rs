use crate::error::EncodingError;
use binform::{BitMatrix, BitVec};

/// The binary symplectic form on length-`2n` row vectors over GF(2).
///
/// A length-`2n` vector represents a projective Pauli observable on `n`
/// qubits: the first `n` coordinates are the X part, the last `n` the Z
/// part. The Gram matrix of the form is `Ω = [[0, Iₙ], [Iₙ, 0]]`, so the
/// product of `u` and `v` is `Σᵢ uᵢ·v₍ₙ₊ᵢ₎ + u₍ₙ₊ᵢ₎·vᵢ (mod 2)`, which is
/// zero exactly when the observables commute.
///
/// The struct pins down the coordinate convention (X part first, row
/// vectors acting from the left) as an explicit value rather than an
/// implicit convention of each call site.
///
/// # Examples
///
/// ```
/// use sympler::SymplecticForm;
///
/// let form = SymplecticForm::new(2);
/// let x0 = form.x_unit(0);
/// let z0 = form.z_unit(0);
/// assert!(form.product(&x0, &z0));
/// assert!(!form.product(&x0, &form.x_unit(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymplecticForm {
    qubit_count: usize,
}

impl SymplecticForm {
    #[must_use]
    pub fn new(qubit_count: usize) -> Self {
        Self { qubit_count }
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Dimension of the underlying vector space, twice the qubit count.
    #[must_use]
    pub fn dimension(&self) -> usize {
        2 * self.qubit_count
    }

    /// The Gram matrix `Ω`. Its own inverse: `Ω·Ω = I`.
    #[must_use]
    pub fn matrix(&self) -> BitMatrix {
        let qubit_count = self.qubit_count;
        let mut omega = BitMatrix::zeros(2 * qubit_count, 2 * qubit_count);
        for index in 0..qubit_count {
            omega.set((index, qubit_count + index), true);
            omega.set((qubit_count + index, index), true);
        }
        omega
    }

    /// The X half of `vector` (first `n` coordinates).
    ///
    /// # Panics
    ///
    /// Will panic if `vector` does not have length `2n`.
    #[must_use]
    pub fn x_part(&self, vector: &BitVec) -> BitVec {
        self.assert_dimension_of(vector);
        vector.extract(0..self.qubit_count)
    }

    /// The Z half of `vector` (last `n` coordinates).
    ///
    /// # Panics
    ///
    /// Will panic if `vector` does not have length `2n`.
    #[must_use]
    pub fn z_part(&self, vector: &BitVec) -> BitVec {
        self.assert_dimension_of(vector);
        vector.extract(self.qubit_count..self.dimension())
    }

    /// The symplectic product `⟨left, right⟩`.
    ///
    /// # Panics
    ///
    /// Will panic if either vector does not have length `2n`.
    #[must_use]
    pub fn product(&self, left: &BitVec, right: &BitVec) -> bool {
        self.x_part(left).dot(&self.z_part(right)) ^ self.z_part(left).dot(&self.x_part(right))
    }

    /// `vector·Ω`: the X and Z halves swapped, so that
    /// `product(u, v) == conjugate(u).dot(v)`.
    ///
    /// # Panics
    ///
    /// Will panic if `vector` does not have length `2n`.
    #[must_use]
    pub fn conjugate(&self, vector: &BitVec) -> BitVec {
        let x_half = self.x_part(vector);
        let z_half = self.z_part(vector);
        z_half.iter().chain(x_half.iter()).collect()
    }

    /// Whether `matrix` preserves the form: `Mᵀ·Ω·M = Ω`.
    #[must_use]
    pub fn is_symplectic(&self, matrix: &BitMatrix) -> bool {
        let omega = self.matrix();
        matrix.shape() == (self.dimension(), self.dimension())
            && &(&matrix.transposed() * &omega) * matrix == omega
    }

    /// The canonical X observable on `qubit_index`, the unit vector at
    /// `qubit_index`.
    ///
    /// # Panics
    ///
    /// Will panic if `qubit_index` is out of range.
    #[must_use]
    pub fn x_unit(&self, qubit_index: usize) -> BitVec {
        assert!(qubit_index < self.qubit_count, "qubit index out of range");
        BitVec::unit(qubit_index, self.dimension())
    }

    /// The canonical Z observable on `qubit_index`, the unit vector at
    /// `n + qubit_index`.
    ///
    /// # Panics
    ///
    /// Will panic if `qubit_index` is out of range.
    #[must_use]
    pub fn z_unit(&self, qubit_index: usize) -> BitVec {
        assert!(qubit_index < self.qubit_count, "qubit index out of range");
        BitVec::unit(self.qubit_count + qubit_index, self.dimension())
    }

    fn assert_dimension_of(&self, vector: &BitVec) {
        assert_eq!(
            vector.len(),
            self.dimension(),
            "vector length must be twice the qubit count"
        );
    }
}

/// Whether two observables in binary symplectic form anticommute.
///
/// # Panics
///
/// Will panic if the vectors have different or odd lengths.
#[must_use]
pub fn anti_commutes_with(left: &BitVec, right: &BitVec) -> bool {
    assert_eq!(left.len(), right.len(), "vector lengths differ");
    assert_eq!(left.len() % 2, 0, "vector length must be even");
    SymplecticForm::new(left.len() / 2).product(left, right)
}

/// Whether two observables in binary symplectic form commute.
///
/// # Panics
///
/// Will panic if the vectors have different or odd lengths.
#[must_use]
pub fn commutes_with(left: &BitVec, right: &BitVec) -> bool {
    !anti_commutes_with(left, right)
}

/// The inverse of a symplectic matrix, `F⁻¹ = Ω·Fᵀ·Ω`.
///
/// Uses the form-preservation identity instead of Gaussian elimination, and
/// rejects matrices outside the symplectic group rather than returning a
/// non-inverse.
///
/// # Errors
///
/// Returns [`EncodingError::NotSymplectic`] unless `matrix` is square with
/// even dimension and preserves the form.
pub fn invert_symplectic(matrix: &BitMatrix) -> Result<BitMatrix, EncodingError> {
    let (row_count, column_count) = matrix.shape();
    if row_count != column_count || row_count % 2 != 0 {
        return Err(EncodingError::NotSymplectic);
    }
    let form = SymplecticForm::new(row_count / 2);
    if !form.is_symplectic(matrix) {
        return Err(EncodingError::NotSymplectic);
    }
    let omega = form.matrix();
    Ok(&(&omega * &matrix.transposed()) * &omega)
}
