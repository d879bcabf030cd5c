use binform::{BitMatrix, BitVec};
use smallvec::SmallVec;

use crate::error::EncodingError;
use crate::form::SymplecticForm;
use crate::search;
use crate::transvection::Transvection;

/// The stabilizer generators of the trivial `(n, k)` code: a single Z on
/// each of the `n - k` check qubits, as rows of length `2n`.
///
/// # Errors
///
/// Returns [`EncodingError::InvalidConfiguration`] when `logical_count`
/// exceeds `qubit_count`.
pub fn unencoded_stabilizers(
    qubit_count: usize,
    logical_count: usize,
) -> Result<Vec<BitVec>, EncodingError> {
    if logical_count > qubit_count {
        return Err(EncodingError::InvalidConfiguration {
            qubit_count,
            logical_count,
        });
    }
    let form = SymplecticForm::new(qubit_count);
    Ok((logical_count..qubit_count).map(|qubit_index| form.z_unit(qubit_index)).collect())
}

/// A symplectic matrix `F` mapping the trivial code onto the given one:
/// row-vector multiplication by `F` sends the i-th unencoded generator to
/// `stabilizers[i]`.
///
/// ```
/// use binform::BitVec;
/// use sympler::encoding_matrix;
///
/// let z1z2: BitVec = "0011".parse().unwrap();  // ZZ on two qubits
/// let encoding = encoding_matrix(2, 1, &[z1z2.clone()]).unwrap();
///
/// let unencoded: BitVec = "0001".parse().unwrap();  // Z on qubit 1
/// assert_eq!(&unencoded * &encoding, z1z2);
/// ```
///
/// # Errors
///
/// Returns [`EncodingError::InvalidConfiguration`] for `logical_count >
/// qubit_count`, [`EncodingError::DimensionMismatch`] when the generator
/// count or a generator length disagrees with the code parameters, and
/// [`EncodingError::InconsistentGenerators`] when the generators are
/// dependent or fail to commute.
pub fn encoding_matrix(
    qubit_count: usize,
    logical_count: usize,
    stabilizers: &[BitVec],
) -> Result<BitMatrix, EncodingError> {
    let sources = unencoded_stabilizers(qubit_count, logical_count)?;
    if stabilizers.len() != sources.len() {
        return Err(EncodingError::DimensionMismatch {
            what: "stabilizer generator count",
            expected: sources.len(),
            actual: stabilizers.len(),
        });
    }
    let form = SymplecticForm::new(qubit_count);
    encoding_matrix_between(&form, &sources, stabilizers)
}

/// A symplectic matrix `F` with `sources[i]·F = targets[i]` for every `i`,
/// assembled as a product of at most two transvections per generator
/// (Algorithm 1 of arXiv:1803.06987).
///
/// Both generator sets must be independent and mutually commuting; this
/// guarantees the extension exists, so the per-step searches cannot come
/// up empty. The construction is deterministic.
///
/// # Errors
///
/// Returns [`EncodingError::DimensionMismatch`] when the set sizes or
/// vector lengths disagree with the form, and
/// [`EncodingError::InconsistentGenerators`] when either set is
/// dependent or contains an anticommuting pair.
pub fn encoding_matrix_between(
    form: &SymplecticForm,
    sources: &[BitVec],
    targets: &[BitVec],
) -> Result<BitMatrix, EncodingError> {
    if targets.len() != sources.len() {
        return Err(EncodingError::DimensionMismatch {
            what: "target generator count",
            expected: sources.len(),
            actual: targets.len(),
        });
    }
    validate_generators(form, sources, "source generators")?;
    validate_generators(form, targets, "target generators")?;

    let mut encoding = BitMatrix::identity(form.dimension());
    for (index, target) in targets.iter().enumerate() {
        let image = &sources[index] * &encoding;
        for transvection in step_transvections(form, &image, target, &targets[..index])? {
            encoding = transvection.apply_right(&encoding);
        }
    }
    Ok(encoding)
}

fn validate_generators(
    form: &SymplecticForm,
    vectors: &[BitVec],
    role: &'static str,
) -> Result<(), EncodingError> {
    for vector in vectors {
        if vector.len() != form.dimension() {
            return Err(EncodingError::DimensionMismatch {
                what: "generator length",
                expected: form.dimension(),
                actual: vector.len(),
            });
        }
    }
    if BitMatrix::from_rows(vectors).rank() != vectors.len() {
        return Err(EncodingError::InconsistentGenerators(format!(
            "{role} are linearly dependent"
        )));
    }
    for i in 0..vectors.len() {
        for j in 0..i {
            if form.product(&vectors[i], &vectors[j]) {
                return Err(EncodingError::InconsistentGenerators(format!(
                    "{role} do not mutually commute"
                )));
            }
        }
    }
    Ok(())
}

/// The transvections taking `image` to `target` while fixing every vector
/// of `fixed`: none when the two agree, one when they anticommute, two
/// through an intermediate vector otherwise.
fn step_transvections(
    form: &SymplecticForm,
    image: &BitVec,
    target: &BitVec,
    fixed: &[BitVec],
) -> Result<SmallVec<[Transvection; 2]>, EncodingError> {
    let mut transvections = SmallVec::new();
    if image == target {
        return Ok(transvections);
    }
    if form.product(image, target) {
        transvections.push(Transvection::new(image ^ target));
    } else {
        let middle = search::anticommuting_vector_fixing(form, image, target, fixed)?;
        transvections.push(Transvection::new(target ^ &middle));
        transvections.push(Transvection::new(image ^ &middle));
    }
    Ok(transvections)
}
