//==============================================
// File: tests/functions.rs
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Integration tests for user functions
// Objective: Cover returns, dynamic scope, recursion and host calls
//==============================================

#[path = "support/util.rs"]
mod util;

use pretty_assertions::assert_eq;
use redcode::{Interpreter, MemoryAccess, Value};
use util::{lines, run_red_source, run_red_with_input};

#[test]
fn same_body_adds_numbers_and_joins_text() {
    let src = r#"
funcion sumar(a, b)
    retornar a + b
funcion!
mostrar(sumar(2, 3))
mostrar(sumar("ab", "cd"))
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["5", "abcd"]);
}

#[test]
fn assignments_reach_the_caller_but_declarations_stay_local() {
    let src = r#"
vn contador = 0
funcion incrementar()
    contador = contador + 1
funcion!
funcion local()
    vn temporal = 99
    vn contador = 500
funcion!
x = incrementar()
x = incrementar()
x = local()
mostrar(contador)
"#;
    let (interp, output) = run_red_with_input(src, "");
    assert_eq!(output, "2\n");
    assert!(!interp.memory().has_number("temporal"));
    assert_eq!(interp.memory().depth(), 1);
}

#[test]
fn recursion_returns_through_each_frame() {
    let src = r#"
funcion factorial(n)
    si(n <= 1)
        retornar 1
    si!
    retornar n * factorial(n - 1)
funcion!
mostrar(factorial(5))
"#;
    assert_eq!(run_red_source(src), "120\n");
}

#[test]
fn recursive_calls_keep_their_own_loop_progress() {
    let src = r#"
ln datos = [1, 2]
vn visitas = 0
funcion recorre(nivel)
    cada(v en datos)
        visitas = visitas + 1
        si(nivel < 2)
            x = recorre(nivel + 1)
        si!
    cada!
    retornar 0
funcion!
x = recorre(1)
mostrar(visitas)
"#;
    assert_eq!(run_red_source(src), "6\n");
}

#[test]
fn text_returns_concatenate() {
    let src = r#"
funcion saludo(nombre)
    retornar "Hola, " + nombre + "!"
funcion!
vt msg = saludo("Ana")
mostrar(msg)
"#;
    assert_eq!(run_red_source(src), "Hola, Ana!\n");
}

#[test]
fn definitions_are_skipped_by_sequential_flow() {
    let src = r#"
mostrar("antes")
funcion nunca()
    mostrar("dentro")
funcion!
mostrar("despues")
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["antes", "despues"]);
}

#[test]
fn arguments_are_evaluated_in_the_caller_scope() {
    let src = r#"
vn n = 4
funcion doble(n)
    retornar n * 2
funcion!
mostrar(doble(n + 1))
mostrar(n)
"#;
    assert_eq!(lines(&run_red_source(src)), vec!["10", "4"]);
}

#[test]
fn host_calls_use_the_same_rules() {
    let mut interp = Interpreter::from_source("funcion area(vn b, vn h)\nretornar b * h / 2\nfuncion!\n");
    assert_eq!(interp.call_function("area", &["3", "4"]).value, Value::Number(6.0));
    assert_eq!(interp.call_function("desconocida", &[]).value, Value::Number(0.0));
}

//==============================================
// End of file
//==============================================
