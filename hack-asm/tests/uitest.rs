use insta::assert_debug_snapshot;

use hack_asm::{compile, read_and_format};

macro_rules! assert_snapshot {
    ($file:literal) => {
        let program = read_and_format($file).unwrap();
        let binary = compile(&program).unwrap();
        assert_debug_snapshot!(binary);
    };
}

#[test]
fn compile_add() {
    assert_snapshot!("./tests/fixtures/add.asm");
}

#[test]
fn compile_loop_resolves_label_and_variable() {
    let program = read_and_format("./tests/fixtures/loop.asm").unwrap();
    let binary = compile(&program).unwrap();

    assert_eq!(binary.len(), 6);
    // `sum` is the first referenced variable, allocated at RAM 16.
    assert_eq!(binary[2], format!("0{:015b}", 16));
    // `LOOP` binds to the index of the instruction right after `M=D+M`.
    assert_eq!(binary[4], format!("0{:015b}", 4));
}
