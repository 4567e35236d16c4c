//==============================================
// File: tests/control_flow.rs
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Integration tests for control flow
// Objective: Run si/mientras/cada/contar scripts and check what they print
//==============================================

#[path = "support/util.rs"]
mod util;

use pretty_assertions::assert_eq;
use redcode::MemoryAccess;
use util::{lines, run_red_source, run_red_with_input};

#[test]
fn exactly_one_branch_of_an_if_else_runs() {
    let src = r#"
vn x = 10
si(x > 5)
    mostrar("mayor")
sino
    mostrar("menor")
si!
si(x < 5)
    mostrar("a")
sino
    mostrar("b")
si!
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["mayor", "b"]);
}

#[test]
fn while_loop_with_nested_if() {
    let src = r#"
vn i = 0
vn pares = 0
mientras(i < 10)
    si(i % 2 == 0)
        pares = pares + 1
    si!
    i = i + 1
mientras!
mostrar("pares: " + pares)
"#;
    assert_eq!(run_red_source(src), "pares: 5\n");
}

#[test]
fn for_each_visits_every_element() {
    let src = r#"
ln numeros = [1, 2, 3]
vn suma = 0
cada(n en numeros)
    suma = suma + n
cada!
mostrar(suma)
lt nombres = ["ana", "luis"]
cada(nombre en nombres)
    mostrar("hola " + nombre)
cada!
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["6", "hola ana", "hola luis"]);
}

#[test]
fn for_each_over_an_empty_or_missing_list_is_skipped() {
    let src = r#"
ln vacia = []
cada(x en vacia)
    mostrar("nunca")
cada!
cada(x en inexistente)
    mostrar("nunca")
cada!
mostrar("fin")
"#;
    assert_eq!(run_red_source(src), "fin\n");
}

#[test]
fn count_is_inclusive() {
    let src = "contar(i de 1 a 5)\nmostrar(i)\ncontar!\n";
    assert_eq!(lines(&run_red_source(src)), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn count_bounds_may_be_named_a() {
    let src = r#"
funcion rango(a, b)
    vn veces = 0
    contar(i de a a b)
        veces = veces + 1
    contar!
    retornar veces
funcion!
mostrar(rango(2, 4))
vn a = 7
contar(k de a a 8)
    mostrar(k)
contar!
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["3", "7", "8"]);
}

#[test]
fn count_with_start_past_end_runs_zero_times() {
    let src = "contar(i de 5 a 1)\nmostrar(i)\ncontar!\nmostrar(\"fin\")\n";
    assert_eq!(run_red_source(src), "fin\n");
}

#[test]
fn nested_counts_restart_the_inner_loop() {
    let src = r#"
vn total = 0
contar(i de 1 a 3)
    contar(j de 1 a 2)
        total = total + i * j
    contar!
contar!
mostrar(total)
"#;
    assert_eq!(run_red_source(src), "18\n");
}

#[test]
fn boolean_operators_in_conditions() {
    let src = r#"
vn a = 5
si(a > 3 Y NO (a > 10))
    mostrar("uno")
si!
si(a > 30 o a == 5)
    mostrar("dos")
si!
si(5 > 3 Y 2 < 1)
    mostrar("nunca")
si!
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["uno", "dos"]);
}

#[test]
fn text_conditions_compare_exactly() {
    let src = r#"
vt clave = "abc"
si(clave == "abc")
    mostrar("igual")
si!
si("abc" != clave)
    mostrar("nunca")
si!
"#;
    assert_eq!(run_red_source(src), "igual\n");
}

#[test]
fn comments_and_blank_lines_do_not_shift_jumps() {
    let src = r#"
// encabezado

vn x = 1 // uno

si(x == 1) // comentario
    mostrar("x = " + x) // fin
si!
mostrar("url: http://redsync")
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["x = 1", "url: http://redsync"]);
}

#[test]
fn stray_closers_are_ignored() {
    let src = "si!\ncada!\nmostrar(\"sigue\")\n";
    assert_eq!(run_red_source(src), "sigue\n");
}

#[test]
fn loop_variables_are_bound_in_the_current_frame() {
    let (interp, _) = run_red_with_input("contar(k de 1 a 2)\ncontar!\n", "");
    assert_eq!(interp.memory().read_number("k"), 3.0);
    assert_eq!(interp.memory().current().number("k"), Some(3.0));
}

//==============================================
// End of file
//==============================================
