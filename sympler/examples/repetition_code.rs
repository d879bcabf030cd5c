use binform::BitVec;
use sympler::{SymplecticForm, Transvection, encoding_matrix_between, vectors_from_paulis};

fn main() {
    // Three-qubit bit-flip code: ZZI and IZZ on n = 3, one logical qubit.
    let form = SymplecticForm::new(3);
    let sources: Vec<BitVec> = vec![form.z_unit(1), form.z_unit(2)];
    let targets = vectors_from_paulis(&["ZZI", "IZZ"]).unwrap();

    let encoding = encoding_matrix_between(&form, &sources, &targets).unwrap();
    println!("Encoding matrix F:");
    println!("{encoding}");
    println!("F is symplectic: {}", form.is_symplectic(&encoding));

    for (index, target) in targets.iter().enumerate() {
        let image = &sources[index] * &encoding;
        println!(
            "  generator {index}: image matches target: {}",
            image == *target
        );
    }

    // A transvection moves any vector it anticommutes with along its
    // direction; this is the only primitive the construction needs.
    let direction: BitVec = "100100".parse().unwrap();
    let transvection = Transvection::new(direction);
    let moved = transvection.apply(&form.z_unit(0));
    println!("\nZ(0) under a Y(0)-transvection: {moved}");
}
