use crate::vec::{BitVec, ParseBitsError, WORD_BITS, dot_of, support_of, word_count};
use std::ops::{BitXor, BitXorAssign, Index, Mul};
use std::str::FromStr;

/// Word-packed matrix over GF(2) with row-major storage.
///
/// Rows are independently word-aligned; bits past the column count are kept
/// zero in every row so word-wise row operations are valid.
///
/// # Examples
///
/// ```
/// use binform::BitMatrix;
///
/// let matrix: BitMatrix = "10|11".parse().unwrap();
/// assert_eq!(&matrix * &matrix.inverted(), BitMatrix::identity(2));
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    words: Vec<u64>,
    row_count: usize,
    column_count: usize,
}

/// Borrowed view of a single matrix row.
#[derive(Clone, Copy)]
pub struct BitSlice<'life> {
    words: &'life [u64],
    bit_length: usize,
}

impl BitMatrix {
    #[must_use]
    pub fn zeros(row_count: usize, column_count: usize) -> Self {
        Self {
            words: vec![0; row_count * word_count(column_count)],
            row_count,
            column_count,
        }
    }

    #[must_use]
    pub fn identity(dimension: usize) -> Self {
        let mut result = Self::zeros(dimension, dimension);
        for index in 0..dimension {
            result.set((index, index), true);
        }
        result
    }

    /// # Panics
    ///
    /// Will panic if the rows have unequal lengths.
    #[must_use]
    pub fn from_rows(rows: &[BitVec]) -> Self {
        let column_count = rows.first().map_or(0, BitVec::len);
        let mut matrix = Self::zeros(rows.len(), column_count);
        for (row_index, row) in rows.iter().enumerate() {
            matrix.assign_row(row_index, row);
        }
        matrix
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.column_count)
    }

    /// # Panics
    ///
    /// Will panic if the index is out of range.
    #[must_use]
    pub fn get(&self, index: (usize, usize)) -> bool {
        assert!(
            index.0 < self.row_count && index.1 < self.column_count,
            "matrix index out of range"
        );
        self.row_words(index.0)[index.1 / WORD_BITS] >> (index.1 % WORD_BITS) & 1 == 1
    }

    /// # Panics
    ///
    /// Will panic if the index is out of range.
    pub fn set(&mut self, index: (usize, usize), value: bool) {
        assert!(
            index.0 < self.row_count && index.1 < self.column_count,
            "matrix index out of range"
        );
        let mask = 1u64 << (index.1 % WORD_BITS);
        let word = &mut self.row_words_mut(index.0)[index.1 / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// # Panics
    ///
    /// Will panic if the index is out of range.
    pub fn negate(&mut self, index: (usize, usize)) {
        assert!(
            index.0 < self.row_count && index.1 < self.column_count,
            "matrix index out of range"
        );
        self.row_words_mut(index.0)[index.1 / WORD_BITS] ^= 1u64 << (index.1 % WORD_BITS);
    }

    /// # Panics
    ///
    /// Will panic if the row index is out of range.
    #[must_use]
    pub fn row(&self, row_index: usize) -> BitSlice<'_> {
        BitSlice {
            words: self.row_words(row_index),
            bit_length: self.column_count,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = BitSlice<'_>> {
        (0..self.row_count).map(move |row_index| self.row(row_index))
    }

    /// # Panics
    ///
    /// Will panic if `bits` does not match the column count.
    pub fn assign_row(&mut self, row_index: usize, bits: &BitVec) {
        assert_eq!(bits.len(), self.column_count, "row length mismatch");
        self.row_words_mut(row_index).copy_from_slice(bits.words());
    }

    pub fn swap_rows(&mut self, left_row_index: usize, right_row_index: usize) {
        if left_row_index == right_row_index {
            return;
        }
        let stride = self.stride();
        for offset in 0..stride {
            self.words
                .swap(left_row_index * stride + offset, right_row_index * stride + offset);
        }
    }

    /// XOR the row at `from_index` into the row at `to_index`.
    pub fn add_into_row(&mut self, to_index: usize, from_index: usize) {
        let stride = self.stride();
        for offset in 0..stride {
            let from_word = self.words[from_index * stride + offset];
            self.words[to_index * stride + offset] ^= from_word;
        }
    }

    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut result = Self::zeros(self.column_count, self.row_count);
        for row_index in 0..self.row_count {
            for column_index in self.row(row_index).support() {
                result.set((column_index, row_index), true);
            }
        }
        result
    }

    /// Reduce to reduced row-echelon form in place, returning the rank
    /// profile (the pivot column of each nonzero row).
    pub fn echelonize(&mut self) -> Vec<usize> {
        let mut pivot = pivot_of(self, (0, 0));
        let mut rank_profile = Vec::with_capacity(self.row_count.min(self.column_count));
        for row_index in 0..self.row_count {
            if pivot.1 >= self.column_count {
                break;
            }
            self.swap_rows(pivot.0, row_index);
            pivot.0 = row_index;
            rank_profile.push(pivot.1);
            reduce(self, pivot);
            pivot = pivot_of(self, (pivot.0 + 1, pivot.1 + 1));
        }
        rank_profile
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.clone().echelonize().len()
    }

    /// # Panics
    ///
    /// Will panic if the matrix is not invertible.
    #[must_use]
    pub fn inverted(&self) -> BitMatrix {
        assert_eq!(self.row_count, self.column_count, "only square matrices can be inverted");
        let echelon_form = EchelonForm::new(self.clone());
        assert_eq!(echelon_form.pivots.len(), self.row_count, "matrix is not invertible");
        debug_assert_eq!(&echelon_form.transform * self, BitMatrix::identity(self.row_count));
        echelon_form.transform
    }

    /// Matrix product over GF(2).
    ///
    /// # Panics
    ///
    /// Will panic if the dimensions are incompatible.
    #[must_use]
    pub fn dot(&self, other: &BitMatrix) -> BitMatrix {
        assert_eq!(
            self.column_count,
            other.row_count,
            "dimension mismatch in matrix product"
        );
        let mut result = BitMatrix::zeros(self.row_count, other.column_count);
        let stride = result.stride();
        for row_index in 0..self.row_count {
            for support_index in self.row(row_index).support() {
                for offset in 0..stride {
                    let from_word = other.words[support_index * stride + offset];
                    result.words[row_index * stride + offset] ^= from_word;
                }
            }
        }
        result
    }

    /// The row-vector product `left · self`, computed as the XOR of the rows
    /// selected by the support of `left`.
    ///
    /// # Panics
    ///
    /// Will panic if `left` does not match the row count.
    #[must_use]
    pub fn right_multiply(&self, left: &BitVec) -> BitVec {
        assert_eq!(left.len(), self.row_count, "dimension mismatch in vector-matrix product");
        let mut result = BitVec::zeros(self.column_count);
        for row_index in left.support() {
            result.bitxor_words(self.row_words(row_index));
        }
        result
    }

    fn stride(&self) -> usize {
        word_count(self.column_count)
    }

    fn row_words(&self, row_index: usize) -> &[u64] {
        let stride = self.stride();
        &self.words[row_index * stride..(row_index + 1) * stride]
    }

    fn row_words_mut(&mut self, row_index: usize) -> &mut [u64] {
        let stride = self.stride();
        &mut self.words[row_index * stride..(row_index + 1) * stride]
    }
}

impl BitSlice<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bit_length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bit_length == 0
    }

    /// # Panics
    ///
    /// Will panic if `position` is out of range.
    #[must_use]
    pub fn index(&self, position: usize) -> bool {
        assert!(position < self.bit_length, "bit index {position} out of range");
        self.words[position / WORD_BITS] >> (position % WORD_BITS) & 1 == 1
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    #[must_use]
    pub fn weight(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Parity of the bitwise AND with `other`.
    ///
    /// # Panics
    ///
    /// Will panic if the lengths differ.
    #[must_use]
    pub fn dot(&self, other: &BitVec) -> bool {
        assert_eq!(self.bit_length, other.len(), "length mismatch in dot");
        dot_of(self.words, other.words())
    }

    /// Indices of the ones, in increasing order.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        support_of(self.words)
    }

    #[must_use]
    pub fn to_bitvec(&self) -> BitVec {
        BitVec::from_raw_words(self.words.to_vec(), self.bit_length)
    }
}

/// Result of reduced row-echelon form computation with a recorded transform.
#[derive(Debug, Clone)]
pub struct EchelonForm {
    /// The matrix in reduced row-echelon form.
    pub matrix: BitMatrix,
    /// Transform matrix `T` such that `T * original = matrix`.
    pub transform: BitMatrix,
    /// Column indices of the pivot positions (rank profile).
    pub pivots: Vec<usize>,
}

impl EchelonForm {
    #[must_use]
    pub fn new(mut matrix: BitMatrix) -> Self {
        let mut transform = BitMatrix::identity(matrix.row_count());
        let mut pivot = pivot_of(&matrix, (0, 0));
        let mut pivots = Vec::with_capacity(matrix.row_count().min(matrix.column_count()));

        for row_index in 0..matrix.row_count() {
            if pivot.1 >= matrix.column_count() {
                break;
            }
            matrix.swap_rows(pivot.0, row_index);
            transform.swap_rows(pivot.0, row_index);
            pivot.0 = row_index;
            pivots.push(pivot.1);
            reduce_with_transform(&mut matrix, &mut transform, pivot);
            pivot = pivot_of(&matrix, (pivot.0 + 1, pivot.1 + 1));
        }

        Self { matrix, transform, pivots }
    }

    /// Solve `A·x = target` for the matrix `A` this echelon form was built
    /// from, returning the particular solution with every free variable set
    /// to zero, or `None` when the system is inconsistent.
    ///
    /// # Panics
    ///
    /// Will panic if `target` does not match the row count of `A`.
    #[must_use]
    pub fn solve(&self, target: &BitVec) -> Option<BitVec> {
        assert_eq!(
            target.len(),
            self.matrix.row_count(),
            "target length must match the row count"
        );
        // A·x = target is equivalent to rref·x = transform·target.
        let transformed = &self.transform * target;
        if transformed.support().any(|row_index| row_index >= self.pivots.len()) {
            return None;
        }
        let mut solution = BitVec::zeros(self.matrix.column_count());
        for (row_index, &column_index) in self.pivots.iter().enumerate() {
            if transformed.index(row_index) {
                solution.assign_index(column_index, true);
            }
        }
        Some(solution)
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }
}

fn pivot_of(matrix: &BitMatrix, starting_at: (usize, usize)) -> (usize, usize) {
    let (mut row_index, mut column_index) = starting_at;
    if row_index >= matrix.row_count() || column_index >= matrix.column_count() {
        return (row_index, column_index);
    }
    while !matrix.get((row_index, column_index)) {
        row_index += 1;
        if row_index == matrix.row_count() {
            column_index += 1;
            row_index = starting_at.0;
            if column_index == matrix.column_count() {
                break;
            }
        }
    }
    (row_index, column_index)
}

fn reduce(matrix: &mut BitMatrix, pivot: (usize, usize)) {
    for row_index in 0..matrix.row_count() {
        if row_index != pivot.0 && matrix.get((row_index, pivot.1)) {
            matrix.add_into_row(row_index, pivot.0);
        }
    }
}

fn reduce_with_transform(matrix: &mut BitMatrix, transform: &mut BitMatrix, pivot: (usize, usize)) {
    for row_index in 0..matrix.row_count() {
        if row_index != pivot.0 && matrix.get((row_index, pivot.1)) {
            matrix.add_into_row(row_index, pivot.0);
            transform.add_into_row(row_index, pivot.0);
        }
    }
}

impl Mul for &BitMatrix {
    type Output = BitMatrix;

    fn mul(self, other: Self) -> Self::Output {
        self.dot(other)
    }
}

impl Mul<&BitVec> for &BitMatrix {
    type Output = BitVec;

    fn mul(self, right: &BitVec) -> Self::Output {
        assert_eq!(
            right.len(),
            self.column_count(),
            "dimension mismatch in matrix-vector product"
        );
        self.rows().map(|row| row.dot(right)).collect()
    }
}

impl Mul<&BitMatrix> for &BitVec {
    type Output = BitVec;

    fn mul(self, matrix: &BitMatrix) -> Self::Output {
        matrix.right_multiply(self)
    }
}

impl BitXorAssign<&BitMatrix> for BitMatrix {
    fn bitxor_assign(&mut self, other: &BitMatrix) {
        assert_eq!(self.shape(), other.shape(), "shape mismatch in xor");
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word ^= other_word;
        }
    }
}

impl BitXor for &BitMatrix {
    type Output = BitMatrix;

    fn bitxor(self, other: Self) -> Self::Output {
        let mut clone = self.clone();
        clone ^= other;
        clone
    }
}

impl Index<(usize, usize)> for BitMatrix {
    type Output = bool;

    fn index(&self, index: (usize, usize)) -> &bool {
        if self.get(index) { &true } else { &false }
    }
}

impl std::fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "[")?;
        }
        for row_index in 0..self.row_count {
            for column_index in 0..self.column_count {
                let value = i32::from(self.get((row_index, column_index)));
                write!(f, "{value}")?;
            }
            if f.alternate() {
                write!(f, "|")?;
            } else {
                writeln!(f)?;
            }
        }
        if f.alternate() {
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitMatrix(shape={:?},value={:#})", self.shape(), self)
    }
}

impl FromStr for BitMatrix {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::<BitVec>::new();
        for row_string in s.split(&['|', '[', ']', '(', ')', ';', '\n']) {
            let row: BitVec = row_string.parse()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }
        let column_count = rows.first().map_or(0, BitVec::len);
        if rows.iter().any(|row| row.len() != column_count) {
            return Err(ParseBitsError);
        }
        Ok(BitMatrix::from_rows(&rows))
    }
}
