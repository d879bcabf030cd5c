use rand::Rng;
use std::ops::{BitXor, BitXorAssign, Index, Range};
use std::str::FromStr;

pub(crate) const WORD_BITS: usize = u64::BITS as usize;

#[must_use]
pub(crate) fn word_count(bit_length: usize) -> usize {
    bit_length.div_ceil(WORD_BITS)
}

pub(crate) fn support_of(words: &[u64]) -> impl Iterator<Item = usize> + '_ {
    words.iter().enumerate().flat_map(|(word_index, word)| {
        let mut remaining = *word;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let bit = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            Some(word_index * WORD_BITS + bit)
        })
    })
}

pub(crate) fn dot_of(left: &[u64], right: &[u64]) -> bool {
    let ones: u32 = left
        .iter()
        .zip(right)
        .map(|(word, other_word)| (word & other_word).count_ones())
        .sum();
    ones % 2 == 1
}

/// Word-packed vector over GF(2).
///
/// Bits are stored little-endian within `u64` words; bits at positions past
/// the length are kept zero so that word-wise equality, XOR and dot products
/// are valid.
///
/// # Examples
///
/// ```
/// use binform::BitVec;
///
/// let u: BitVec = "0110".parse().unwrap();
/// let v: BitVec = "0011".parse().unwrap();
/// assert_eq!(u.weight(), 2);
/// assert!(u.dot(&v));
/// assert_eq!((&u ^ &v).to_string(), "0101");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    words: Vec<u64>,
    bit_length: usize,
}

impl BitVec {
    #[must_use]
    pub fn zeros(bit_length: usize) -> Self {
        Self {
            words: vec![0; word_count(bit_length)],
            bit_length,
        }
    }

    #[must_use]
    pub fn ones(bit_length: usize) -> Self {
        let mut result = Self {
            words: vec![u64::MAX; word_count(bit_length)],
            bit_length,
        };
        result.mask_tail();
        result
    }

    /// The vector with a single one at `position`.
    ///
    /// # Panics
    ///
    /// Will panic if `position` is out of range.
    #[must_use]
    pub fn unit(position: usize, bit_length: usize) -> Self {
        let mut result = Self::zeros(bit_length);
        result.assign_index(position, true);
        result
    }

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

    /// # Panics
    ///
    /// Will panic if `position` is out of range.
    pub fn assign_index(&mut self, position: usize, value: bool) {
        assert!(position < self.bit_length, "bit index {position} out of range");
        let mask = 1u64 << (position % WORD_BITS);
        if value {
            self.words[position / WORD_BITS] |= mask;
        } else {
            self.words[position / WORD_BITS] &= !mask;
        }
    }

    /// # Panics
    ///
    /// Will panic if `position` is out of range.
    pub fn negate_index(&mut self, position: usize) {
        assert!(position < self.bit_length, "bit index {position} out of range");
        self.words[position / WORD_BITS] ^= 1u64 << (position % WORD_BITS);
    }

    /// # Panics
    ///
    /// Will panic if the lengths differ.
    pub fn bitxor_assign(&mut self, other: &Self) {
        assert_eq!(self.bit_length, other.bit_length, "length mismatch in xor");
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word ^= other_word;
        }
    }

    /// Parity of the bitwise AND of the two vectors.
    ///
    /// # Panics
    ///
    /// Will panic if the lengths differ.
    #[must_use]
    pub fn dot(&self, other: &Self) -> bool {
        assert_eq!(self.bit_length, other.bit_length, "length mismatch in dot");
        dot_of(&self.words, &other.words)
    }

    #[must_use]
    pub fn weight(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn parity(&self) -> bool {
        self.weight() % 2 == 1
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Indices of the ones, in increasing order.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        support_of(&self.words)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_length).map(|position| self.index(position))
    }

    /// The sub-vector over `range`.
    ///
    /// # Panics
    ///
    /// Will panic if the range is out of bounds.
    #[must_use]
    pub fn extract(&self, range: Range<usize>) -> Self {
        assert!(range.end <= self.bit_length, "extraction range out of bounds");
        range.map(|position| self.index(position)).collect()
    }

    /// Overwrite every bit with a fresh sample from `rng`.
    pub fn assign_random(&mut self, rng: &mut impl Rng) {
        for word in &mut self.words {
            *word = rng.r#gen();
        }
        self.mask_tail();
    }

    fn mask_tail(&mut self) {
        let tail_bits = self.bit_length % WORD_BITS;
        if tail_bits != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= (1u64 << tail_bits) - 1;
        }
    }

    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }

    pub(crate) fn from_raw_words(words: Vec<u64>, bit_length: usize) -> Self {
        debug_assert_eq!(words.len(), word_count(bit_length));
        Self { words, bit_length }
    }

    pub(crate) fn bitxor_words(&mut self, words: &[u64]) {
        debug_assert_eq!(self.words.len(), words.len());
        for (word, other_word) in self.words.iter_mut().zip(words) {
            *word ^= other_word;
        }
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<BitIter: IntoIterator<Item = bool>>(iter: BitIter) -> Self {
        let mut words = Vec::new();
        let mut bit_length = 0;
        for bit in iter {
            if bit_length % WORD_BITS == 0 {
                words.push(0);
            }
            if bit {
                words[bit_length / WORD_BITS] |= 1u64 << (bit_length % WORD_BITS);
            }
            bit_length += 1;
        }
        Self { words, bit_length }
    }
}

impl BitXorAssign<&BitVec> for BitVec {
    fn bitxor_assign(&mut self, other: &BitVec) {
        BitVec::bitxor_assign(self, other);
    }
}

impl BitXor for &BitVec {
    type Output = BitVec;

    fn bitxor(self, other: Self) -> Self::Output {
        let mut clone = self.clone();
        clone ^= other;
        clone
    }
}

impl Index<usize> for BitVec {
    type Output = bool;

    fn index(&self, position: usize) -> &bool {
        if BitVec::index(self, position) { &true } else { &false }
    }
}

impl std::fmt::Display for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", i32::from(bit))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitVec({self})")
    }
}

/// Error produced when parsing bit containers from strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBitsError;

impl std::fmt::Display for ParseBitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed bit string")
    }
}

impl std::error::Error for ParseBitsError {}

impl FromStr for BitVec {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Vec::<bool>::new();
        for char in s.chars() {
            match char {
                '0' | '.' => bits.push(false),
                '1' => bits.push(true),
                ' ' | ',' => {}
                _ => return Err(ParseBitsError),
            }
        }
        Ok(bits.into_iter().collect())
    }
}
