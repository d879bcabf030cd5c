use binform::{BitMatrix, BitVec, EchelonForm};

use crate::error::EncodingError;
use crate::form::SymplecticForm;

/// Finds a vector that anticommutes with both `left` and `right`.
///
/// # Errors
///
/// Returns [`EncodingError::InconsistentGenerators`] when no such vector
/// exists, which can only happen for degenerate inputs (for instance a
/// zero vector, which commutes with everything).
pub fn anticommuting_vector(
    form: &SymplecticForm,
    left: &BitVec,
    right: &BitVec,
) -> Result<BitVec, EncodingError> {
    anticommuting_vector_fixing(form, left, right, &[])
}

/// Finds a vector that anticommutes with both `left` and `right` while
/// commuting with every vector in `fixed`.
///
/// Each requirement `⟨u, z⟩ = b` on the unknown `z` is one linear
/// equation `conjugate(u)·z = b`, so the whole search is a single
/// elimination pass instead of a scan over all `2^(2n)` candidates.
///
/// # Errors
///
/// Returns [`EncodingError::InconsistentGenerators`] when the system has
/// no solution.
pub fn anticommuting_vector_fixing(
    form: &SymplecticForm,
    left: &BitVec,
    right: &BitVec,
    fixed: &[BitVec],
) -> Result<BitVec, EncodingError> {
    let mut constraints = Vec::with_capacity(2 + fixed.len());
    constraints.push(form.conjugate(left));
    constraints.push(form.conjugate(right));
    constraints.extend(fixed.iter().map(|vector| form.conjugate(vector)));
    let mut target = BitVec::zeros(constraints.len());
    target.assign_index(0, true);
    target.assign_index(1, true);
    EchelonForm::new(BitMatrix::from_rows(&constraints))
        .solve(&target)
        .ok_or_else(|| {
            EncodingError::InconsistentGenerators(
                "the commutation constraints have no solution".into(),
            )
        })
}

/// Brute-force counterparts of the solver above, enumerating every
/// candidate vector and returning the first match. Usable only for a
/// handful of qubits; kept as an independent reference for tests.
pub mod exhaustive {
    use binform::BitVec;

    use crate::form::SymplecticForm;

    /// First vector in enumeration order that anticommutes with both
    /// `left` and `right`, or `None` when none exists.
    ///
    /// # Panics
    ///
    /// Will panic if the form dimension does not fit in a machine word.
    #[must_use]
    pub fn anticommuting_vector(
        form: &SymplecticForm,
        left: &BitVec,
        right: &BitVec,
    ) -> Option<BitVec> {
        anticommuting_vector_fixing(form, left, right, &[])
    }

    /// First vector in enumeration order that anticommutes with both
    /// `left` and `right` while commuting with every vector in `fixed`,
    /// or `None` when none exists.
    ///
    /// Candidates are ordered with the first coordinate most
    /// significant, so the all-zeros vector comes first and the
    /// all-ones vector last.
    ///
    /// # Panics
    ///
    /// Will panic if the form dimension does not fit in a machine word.
    #[must_use]
    pub fn anticommuting_vector_fixing(
        form: &SymplecticForm,
        left: &BitVec,
        right: &BitVec,
        fixed: &[BitVec],
    ) -> Option<BitVec> {
        let dimension = form.dimension();
        assert!(
            dimension < usize::BITS as usize,
            "dimension too large for exhaustive enumeration"
        );
        for counter in 0..1usize << dimension {
            let candidate: BitVec = (0..dimension)
                .map(|position| counter >> (dimension - 1 - position) & 1 == 1)
                .collect();
            if form.product(left, &candidate)
                && form.product(right, &candidate)
                && fixed.iter().all(|vector| !form.product(vector, &candidate))
            {
                return Some(candidate);
            }
        }
        None
    }
}
