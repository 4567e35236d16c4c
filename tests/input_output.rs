//==============================================
// File: tests/input_output.rs
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Integration tests for console I/O
// Objective: Check entrada typing, prompts and number rendering
//==============================================

#[path = "support/util.rs"]
mod util;

use pretty_assertions::assert_eq;
use redcode::MemoryAccess;
use util::run_red_with_input;

#[test]
fn prompts_are_printed_without_newline() {
    let src = r#"
nombre = entrada("Nombre: ")
mostrar("Hola " + nombre)
"#;
    let (_, output) = run_red_with_input(src, "Ana\n");
    assert_eq!(output, "Nombre: Hola Ana\n");
}

#[test]
fn input_typing_rules() {
    let src = r#"
vn edad = entrada("")
vt codigo = entrada("")
numero = entrada("")
palabra = entrada("")
vt previo = "x"
previo = entrada("")
"#;
    let (interp, _) = run_red_with_input(src, "abc\n123\n7.5\nhola\n99\n");
    let memory = interp.memory();
    assert_eq!(memory.read_number("edad"), 0.0);
    assert_eq!(memory.read_text("codigo"), "123");
    assert!(!memory.has_number("codigo"));
    assert_eq!(memory.read_number("numero"), 7.5);
    assert_eq!(memory.read_text("palabra"), "hola");
    assert_eq!(memory.read_text("previo"), "99");
}

#[test]
fn undeclared_assignment_follows_the_value_kind() {
    let src = r#"
vt nombre = "Ana"
copia = nombre
vn edad = 30
doble = edad * 2
"#;
    let (interp, _) = run_red_with_input(src, "");
    let memory = interp.memory();
    assert_eq!(memory.read_text("copia"), "Ana");
    assert!(!memory.has_number("copia"));
    assert_eq!(memory.read_number("doble"), 60.0);
}

#[test]
fn end_of_input_reads_as_empty_text() {
    let (interp, output) = run_red_with_input("dato = entrada(\"> \")\nmostrar(\"[\" + dato + \"]\")\n", "");
    assert_eq!(output, "> []\n");
    assert!(interp.memory().has_text("dato"));
}

#[test]
fn numbers_print_without_trailing_zeros() {
    let src = "vn precio = 68000\nvn mitad = 5 / 2\nmostrar(precio)\nmostrar(mitad)\nmostrar(\"total: \" + (precio / 3))\n";
    let (_, output) = run_red_with_input(src, "");
    assert_eq!(output, "68000\n2.5\ntotal: 22666.666667\n");
}

//==============================================
// End of file
//==============================================
