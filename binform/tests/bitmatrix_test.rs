use binform::{BitMatrix, BitVec, EchelonForm};
use itertools::iproduct;
use proptest::prelude::*;
use rand::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

macro_rules! bitmatrix {
    ($($t:tt)+) => {
        BitMatrix::from_str(stringify!($($t)+)).unwrap()
    };
}

proptest! {
    #[test]
    fn shape(row_count in 0..60usize, column_count in 0..60usize) {
        let matrix = BitMatrix::zeros(row_count, column_count);
        assert_eq!(matrix.row_count(), row_count);
        assert_eq!(matrix.column_count(), column_count);
        assert_eq!(matrix.shape(), (row_count, column_count));
    }

    #[test]
    fn zeros(row_count in 0..60usize, column_count in 0..60usize) {
        let matrix = BitMatrix::zeros(row_count, column_count);
        for index in iproduct!(0..matrix.row_count(), 0..matrix.column_count()) {
            assert!(!matrix[index]);
        }
    }

    #[test]
    fn indexing(matrix in arbitrary_bitmatrix(60)) {
        for row_index in 0..matrix.row_count() {
            let row = matrix.row(row_index);
            for column_index in 0..matrix.column_count() {
                assert_eq!(matrix[(row_index, column_index)], matrix.get((row_index, column_index)));
                assert_eq!(row.index(column_index), matrix.get((row_index, column_index)));
            }
        }
    }

    #[test]
    fn rows_round_trip(matrix in arbitrary_bitmatrix(60)) {
        let rows: Vec<BitVec> = matrix.rows().map(|row| row.to_bitvec()).collect();
        assert_eq!(BitMatrix::from_rows(&rows), matrix);
    }

    #[test]
    fn swap_rows(matrix in nonempty_bitmatrix(60), raw_row_indexes in (0..60usize, 0..60usize)) {
        let row_indexes = [raw_row_indexes.0 % matrix.row_count(), raw_row_indexes.1 % matrix.row_count()];
        let mut swapped = matrix.clone();
        swapped.swap_rows(row_indexes[0], row_indexes[1]);
        for column_index in 0..matrix.column_count() {
            assert_eq!(matrix[(row_indexes[0], column_index)], swapped[(row_indexes[1], column_index)]);
        }
        for row_index in (0..matrix.row_count()).collect::<HashSet<usize>>().difference(&HashSet::from(row_indexes)) {
            for column_index in 0..matrix.column_count() {
                assert_eq!(matrix[(*row_index, column_index)], swapped[(*row_index, column_index)]);
            }
        }
    }

    #[test]
    fn add_into_row(matrix in nonempty_bitmatrix(60), raw_row_indexes in (0..60usize, 0..60usize)) {
        let to_index = raw_row_indexes.0 % matrix.row_count();
        let from_index = raw_row_indexes.1 % matrix.row_count();
        prop_assume!(to_index != from_index);
        let mut added = matrix.clone();
        added.add_into_row(to_index, from_index);
        let expected = &matrix.row(to_index).to_bitvec() ^ &matrix.row(from_index).to_bitvec();
        assert_eq!(added.row(to_index).to_bitvec(), expected);
        assert_eq!(added.row(from_index).to_bitvec(), matrix.row(from_index).to_bitvec());
    }

    #[test]
    fn xor((left, right) in equal_shape_bitmatrices(60)) {
        let sum = &left ^ &right;
        for index in iproduct!(0..left.row_count(), 0..left.column_count()) {
            assert_eq!(sum[index], left[index] ^ right[index]);
        }
        assert_eq!(sum, &right ^ &left);
    }

    #[test]
    fn xor_inplace((mut left, right) in equal_shape_bitmatrices(60)) {
        let sum = &left ^ &right;
        left ^= &right;
        assert_eq!(sum, left);
    }

    #[test]
    fn equality(left in arbitrary_bitmatrix(60), right in arbitrary_bitmatrix(60)) {
        let mut are_equal = left.shape() == right.shape();
        if are_equal {
            for row_index in 0..left.row_count() {
                for column_index in 0..right.column_count() {
                    let index = (row_index, column_index);
                    are_equal &= left[index] == right[index];
                }
            }
        }
        assert_eq!(left == right, are_equal);
    }

    #[test]
    fn transpose(matrix in arbitrary_bitmatrix(60)) {
        let transposed = matrix.transposed();
        assert_eq!(transposed.shape(), (matrix.column_count(), matrix.row_count()));
        for row_index in 0..matrix.row_count() {
            for column_index in 0..matrix.column_count() {
                assert_eq!(matrix[(row_index, column_index)], transposed[(column_index, row_index)]);
            }
        }
        assert_eq!(transposed.transposed(), matrix);
    }

    #[test]
    fn matrix_product_entries((left, right) in composable_bitmatrices(30)) {
        let product = &left * &right;
        assert_eq!(product.shape(), (left.row_count(), right.column_count()));
        let right_transposed = right.transposed();
        for row_index in 0..product.row_count() {
            let row = left.row(row_index).to_bitvec();
            for column_index in 0..product.column_count() {
                let column = right_transposed.row(column_index).to_bitvec();
                assert_eq!(product[(row_index, column_index)], row.dot(&column));
            }
        }
    }

    #[test]
    fn vector_matrix_products_agree(matrix in nonempty_bitmatrix(30)) {
        let vector = random_bitvec(matrix.row_count());
        // (v·M)ᵀ = Mᵀ·vᵀ
        assert_eq!(&vector * &matrix, &matrix.transposed() * &vector);
        assert_eq!(matrix.right_multiply(&vector), &vector * &matrix);
    }

    #[test]
    fn inverse(matrix in invertible_bitmatrix(60)) {
        let inverted = matrix.inverted();
        let identity = BitMatrix::identity(matrix.row_count());
        assert_eq!(&matrix * &inverted, identity);
        assert_eq!(&inverted * &matrix, identity);
    }

    #[test]
    fn echelon_form(matrix in arbitrary_bitmatrix(60)) {
        let mut echeloned = matrix.clone();
        let profile = echeloned.echelonize();
        assert!(is_rref(&echeloned, &profile));
        assert!(preserves_rowspan_of(&matrix, &echeloned, &profile));
        assert_eq!(profile.len(), matrix.rank());
    }

    #[test]
    fn echelon_form_transform(matrix in arbitrary_bitmatrix(60)) {
        let echelon_form = EchelonForm::new(matrix.clone());
        assert_eq!(&echelon_form.transform * &matrix, echelon_form.matrix);
        assert_eq!(echelon_form.rank(), echelon_form.pivots.len());
        assert!(is_rref(&echelon_form.matrix, &echelon_form.pivots));
    }

    #[test]
    fn echelon_form_solve(matrix in nonempty_bitmatrix(5)) {
        check_solve_of(&matrix);
    }

    #[test]
    fn display_parse_round_trip(matrix in nonempty_bitmatrix(30)) {
        let rendered = format!("{matrix:#}");
        assert_eq!(BitMatrix::from_str(&rendered).unwrap(), matrix);
    }
}

#[test]
fn test_echelon_form_random() {
    for _ in 0..50 {
        let matrix = random_bitmatrix(100, 100);
        let echelon_form = EchelonForm::new(matrix.clone());
        assert!(is_rref(&echelon_form.matrix, &echelon_form.pivots));
        assert_eq!(&echelon_form.transform * &matrix, echelon_form.matrix);
    }
    for _ in 0..50 {
        let matrix = random_bitmatrix(50, 100);
        let echelon_form = EchelonForm::new(matrix.clone());
        assert!(is_rref(&echelon_form.matrix, &echelon_form.pivots));
        assert_eq!(&echelon_form.transform * &matrix, echelon_form.matrix);
    }
}

#[test]
fn test_mul() {
    let x = bitmatrix!(
        |01|
        |10|);
    let id = bitmatrix!(
        |10|
        |01|);
    assert_eq!(&x * &x, id);
    assert_eq!(&x * &id, x);
    assert_eq!(&id * &x, x);

    // multiplication is associative
    for _ in 0..100 {
        let a = random_bitmatrix(10, 10);
        let b = random_bitmatrix(10, 10);
        let c = random_bitmatrix(10, 10);
        assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    }

    // multiplication by zero is zero
    for _ in 0..100 {
        let a = random_bitmatrix(10, 10);
        let z = BitMatrix::zeros(10, 10);
        assert_eq!(&a * &z, z);
    }
}

#[test]
fn test_mul_non_square() {
    let sizes = [(10, 20, 15), (20, 10, 30), (65, 130, 65)];
    for (rows_a, inner, cols_b) in sizes {
        let a = random_bitmatrix(rows_a, inner);
        let b = random_bitmatrix(inner, cols_b);
        assert_eq!((&a * &b).shape(), (rows_a, cols_b));
        let id = BitMatrix::identity(inner);
        assert_eq!(&a * &id, a);
        assert_eq!(&id * &b, b);
    }
}

#[test]
fn test_echelon_form_examples() {
    let matrix = bitmatrix!(
        |0011|
        |1111|);
    let echelon_form = EchelonForm::new(matrix.clone());
    assert_eq!(&echelon_form.transform * &matrix, echelon_form.matrix);
    assert_eq!(echelon_form.pivots, vec![0, 2]);
    assert_eq!(echelon_form.matrix, bitmatrix!(|1100|0011|));
    check_solve_of(&matrix);
}

#[test]
fn test_solve_underdetermined_system() {
    // Two constraints in four unknowns; every target is reachable.
    let matrix = bitmatrix!(
        |1010|
        |0101|);
    let echelon_form = EchelonForm::new(matrix.clone());
    for target_index in 0..4usize {
        let target = bitvec_from_usize(target_index, 2);
        let solution = echelon_form.solve(&target).expect("full-rank system must be solvable");
        assert_eq!(&matrix * &solution, target);
    }
}

#[test]
fn test_solve_inconsistent_system() {
    // Second row repeats the first, so mismatched targets are unreachable.
    let matrix = bitmatrix!(
        |1010|
        |1010|);
    let echelon_form = EchelonForm::new(matrix.clone());
    let target = bitvec_from_usize(0b01, 2);
    assert!(echelon_form.solve(&target).is_none());
    let consistent = bitvec_from_usize(0b11, 2);
    assert!(echelon_form.solve(&consistent).is_some());
}

fn check_solve_of(matrix: &BitMatrix) {
    let echelon_form = EchelonForm::new(matrix.clone());
    let reachable = column_combinations_of(matrix);
    let target_count = 1usize << matrix.row_count();

    for target_index in 0..target_count {
        let target = bitvec_from_usize(target_index, matrix.row_count());
        let solution = echelon_form.solve(&target);
        if reachable.contains(&target) {
            let solution = solution.expect("expected a solution but got None");
            assert_eq!(matrix * &solution, target);
        } else {
            assert!(solution.is_none());
        }
    }
}

fn is_rref(matrix: &BitMatrix, with_profile: &[usize]) -> bool {
    let expected_profile = leading_ones_of(matrix);
    expected_profile == with_profile && columns_are_pivots_of(matrix, with_profile)
}

fn leading_ones_of(matrix: &BitMatrix) -> Vec<usize> {
    let mut profile = vec![];
    for row in matrix.rows() {
        match row.support().next() {
            Some(pivot) => profile.push(pivot),
            None => break,
        }
    }
    profile
}

fn columns_are_pivots_of(matrix: &BitMatrix, column_indexes: &[usize]) -> bool {
    column_indexes.iter().all(|&column_index| {
        let weight = (0..matrix.row_count())
            .filter(|&row_index| matrix.get((row_index, column_index)))
            .count();
        weight == 1
    })
}

fn preserves_rowspan_of(matrix: &BitMatrix, rref_matrix: &BitMatrix, profile: &[usize]) -> bool {
    for row in matrix.rows() {
        let mut reduced = row.to_bitvec();
        for (row_index, &column_index) in profile.iter().enumerate() {
            if reduced.index(column_index) {
                reduced ^= &rref_matrix.row(row_index).to_bitvec();
            }
        }
        if !reduced.is_zero() {
            return false;
        }
    }
    true
}

fn bitvec_from_usize(value: usize, size: usize) -> BitVec {
    (0..size).map(|bit| value >> bit & 1 == 1).collect()
}

fn column_combinations_of(matrix: &BitMatrix) -> HashSet<BitVec> {
    let mut all_combinations = HashSet::new();
    let combination_count = 1usize << matrix.column_count();
    for combination in 0..combination_count {
        let selected = bitvec_from_usize(combination, matrix.column_count());
        all_combinations.insert(matrix * &selected);
    }
    all_combinations
}

prop_compose! {
    fn arbitrary_bitmatrix(max_dimension: usize)(shape in (0..=max_dimension, 0..=max_dimension)) -> BitMatrix {
        random_bitmatrix(shape.0, shape.1)
    }
}

prop_compose! {
    fn nonempty_bitmatrix(max_dimension: usize)(shape in (1..=max_dimension, 1..=max_dimension)) -> BitMatrix {
        random_bitmatrix(shape.0, shape.1)
    }
}

prop_compose! {
    fn equal_shape_bitmatrices(max_dimension: usize)(shape in (1..=max_dimension, 1..=max_dimension)) -> (BitMatrix, BitMatrix) {
        (random_bitmatrix(shape.0, shape.1), random_bitmatrix(shape.0, shape.1))
    }
}

prop_compose! {
    fn composable_bitmatrices(max_dimension: usize)(shape in (1..=max_dimension, 1..=max_dimension, 1..=max_dimension)) -> (BitMatrix, BitMatrix) {
        (random_bitmatrix(shape.0, shape.1), random_bitmatrix(shape.1, shape.2))
    }
}

prop_compose! {
    fn invertible_bitmatrix(max_dimension: usize)(dimension in 1..=max_dimension) -> BitMatrix {
        let mut matrix = BitMatrix::identity(dimension);
        for _ in 0..dimension.pow(2) {
            let from_index = thread_rng().gen_range(0..dimension);
            let to_index = thread_rng().gen_range(0..dimension);
            if from_index != to_index {
                matrix.add_into_row(to_index, from_index);
            }
        }
        for _ in 0..dimension {
            let from_index = thread_rng().gen_range(0..dimension);
            let to_index = thread_rng().gen_range(0..dimension);
            matrix.swap_rows(from_index, to_index);
        }
        matrix
    }
}

fn random_bitmatrix(row_count: usize, column_count: usize) -> BitMatrix {
    let mut matrix = BitMatrix::zeros(row_count, column_count);
    for row_index in 0..row_count {
        matrix.assign_row(row_index, &random_bitvec(column_count));
    }
    matrix
}

fn random_bitvec(bit_length: usize) -> BitVec {
    let mut vector = BitVec::zeros(bit_length);
    vector.assign_random(&mut thread_rng());
    vector
}
