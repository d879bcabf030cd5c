use sympler::{
    encoding_matrix, invert_symplectic, pauli_from_vector, unencoded_stabilizers,
    vectors_from_paulis,
};

fn main() {
    // The five-qubit code: four cyclic stabilizer generators on n = 5.
    let generators = ["XZZXI", "IXZZX", "XIXZZ", "ZXIXZ"];
    let stabilizers = vectors_from_paulis(&generators).unwrap();

    let encoding = encoding_matrix(5, 1, &stabilizers).unwrap();
    println!("Encoding matrix F:");
    println!("{encoding}");

    // Each unencoded single-Z generator lands on its stabilizer.
    let unencoded = unencoded_stabilizers(5, 1).unwrap();
    println!("Generator images under F:");
    for source in &unencoded {
        let image = source * &encoding;
        println!("  {} -> {}", pauli_from_vector(source), pauli_from_vector(&image));
    }

    let inverse = invert_symplectic(&encoding).unwrap();
    let restored = unencoded
        .iter()
        .zip(&stabilizers)
        .all(|(source, stabilizer)| &(stabilizer * &inverse) == source);
    println!("\nInverse maps the code back to single-Z checks: {restored}");
}
