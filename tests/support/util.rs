//==============================================
// File: tests/support/util.rs
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Shared helpers for integration tests
// Objective: Run RedCode source against a captured console
//==============================================

#![allow(dead_code)]

use redcode::{Console, Interpreter};

/// Runs `source` with empty stdin and returns everything it printed.
pub fn run_red_source(source: &str) -> String {
    run_red_with_input(source, "").1
}

/// Runs `source` reading `input` as stdin. Returns the finished interpreter
/// for memory inspection together with the printed output.
pub fn run_red_with_input(source: &str, input: &str) -> (Interpreter, String) {
    let (console, output) = Console::captured(input);
    let mut interpreter = Interpreter::from_source(source).with_console(console);
    interpreter.run();
    (interpreter, output.contents())
}

/// Output lines, for assertions that ignore the trailing newline.
pub fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

//==============================================
// End of file
//==============================================
