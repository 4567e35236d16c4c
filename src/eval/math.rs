//==================================================
// File: eval/math.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arithmetic evaluation
// Objective: Two-stack precedence evaluator over + - * / % ^ ** with unary
//            minus, user function calls, list indexing and variables
//==================================================

use tracing::trace;

use super::{call_parts, index_parts, parse_number_prefix, split_call_args};
use crate::interpreter::Interpreter;
use crate::memory::MemoryAccess;

//==================================================
// Section 1.0 - Operators
//==================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Open,
}

impl Op {
    /// Reads the operator starting at `chars[at]`, returning it with its
    /// width in characters.
    fn read(chars: &[char], at: usize) -> Option<(Op, usize)> {
        let op = match chars.get(at)? {
            '+' => Op::Add,
            '-' => Op::Sub,
            '*' if chars.get(at + 1) == Some(&'*') => return Some((Op::Pow, 2)),
            '*' => Op::Mul,
            '/' => Op::Div,
            '%' => Op::Rem,
            '^' => Op::Pow,
            _ => return None,
        };
        Some((op, 1))
    }

    fn precedence(self) -> u8 {
        match self {
            Op::Pow => 3,
            Op::Mul | Op::Div | Op::Rem => 2,
            Op::Add | Op::Sub => 1,
            Op::Open => 0,
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div if b != 0.0 => a / b,
            Op::Rem if b != 0.0 => a % b,
            Op::Div | Op::Rem => 0.0,
            Op::Pow => a.powf(b),
            Op::Open => 0.0,
        }
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '^')
}

/// Pops two operands and applies `op`. With fewer than two operands the
/// operator is dropped.
fn reduce(values: &mut Vec<f64>, op: Op) {
    if values.len() < 2 {
        return;
    }
    let b = values.pop().unwrap_or_default();
    let a = values.pop().unwrap_or_default();
    values.push(op.apply(a, b));
}

fn push_operator(values: &mut Vec<f64>, ops: &mut Vec<Op>, op: Op) {
    while let Some(&top) = ops.last() {
        if top == Op::Open || top.precedence() < op.precedence() {
            break;
        }
        ops.pop();
        reduce(values, top);
    }
    ops.push(op);
}

/// True when `token` is a numeric literal that ends in an exponent marker,
/// so a following sign belongs to the literal (`2e-3`).
fn ends_in_exponent(token: &[char]) -> bool {
    match token.split_last() {
        Some((last, head)) if matches!(last, 'e' | 'E') => {
            !head.is_empty()
                && head.iter().all(|c| c.is_ascii_digit() || *c == '.')
                && head.iter().any(char::is_ascii_digit)
        }
        _ => false,
    }
}

/// Returns the end of the operand that starts at `start`: the first
/// operator outside parentheses and brackets, or an unmatched `)`.
fn scan_operand(chars: &[char], start: usize) -> usize {
    let mut parens = 0usize;
    let mut brackets = 0usize;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' => parens += 1,
            ')' if parens == 0 => break,
            ')' => parens -= 1,
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            _ => {}
        }
        if is_operator_char(c) && parens == 0 && brackets == 0 {
            let exponent_sign = matches!(c, '+' | '-') && ends_in_exponent(&chars[start..i]);
            if !exponent_sign {
                break;
            }
        }
        i += 1;
    }
    i
}

//==================================================
// Section 2.0 - Evaluator
//==================================================

impl Interpreter {
    /// Evaluates an arithmetic expression. Anything that cannot be resolved
    /// contributes 0; division and modulo by zero yield 0.
    pub fn eval_math(&mut self, expr: &str) -> f64 {
        let chars: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() {
            return 0.0;
        }

        let mut values: Vec<f64> = Vec::new();
        let mut ops: Vec<Op> = Vec::new();
        let mut expecting_operand = true;
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '(' => {
                    ops.push(Op::Open);
                    expecting_operand = true;
                    i += 1;
                }
                ')' => {
                    while let Some(op) = ops.pop() {
                        if op == Op::Open {
                            break;
                        }
                        reduce(&mut values, op);
                    }
                    expecting_operand = false;
                    i += 1;
                }
                '-' if expecting_operand => {
                    let end = scan_operand(&chars, i + 1);
                    let token: String = chars[i..end].iter().collect();
                    values.push(self.resolve_operand(&token));
                    expecting_operand = false;
                    i = end;
                }
                c if is_operator_char(c) => {
                    let Some((op, width)) = Op::read(&chars, i) else {
                        i += 1;
                        continue;
                    };
                    push_operator(&mut values, &mut ops, op);
                    expecting_operand = true;
                    i += width;
                }
                _ => {
                    let end = scan_operand(&chars, i);
                    let token: String = chars[i..end].iter().collect();
                    values.push(self.resolve_operand(&token));
                    expecting_operand = false;
                    i = end.max(i + 1);
                }
            }
        }

        while let Some(op) = ops.pop() {
            if op != Op::Open {
                reduce(&mut values, op);
            }
        }
        values.last().copied().unwrap_or(0.0)
    }

    /// Resolves one operand: a parenthesised group, a negated operand, a
    /// user function call, list indexing, a numeric variable or a literal.
    fn resolve_operand(&mut self, token: &str) -> f64 {
        let token = token.trim();
        if token.is_empty() {
            return 0.0;
        }
        if token.starts_with('(') {
            return self.eval_math(token);
        }
        if let Some(rest) = token.strip_prefix('-') {
            return match parse_number_prefix(token) {
                Some(value) => value,
                None => -self.resolve_operand(rest),
            };
        }

        if let Some((name, inner)) = call_parts(token) {
            if self.program().functions().contains(name) {
                let args = split_call_args(inner);
                trace!(function = name, "call from arithmetic");
                return self.invoke_function(name, &args).value.as_number();
            }
        }

        if let Some((name, inner)) = index_parts(token) {
            if !token.contains(']') {
                return 0.0;
            }
            let name = name.to_string();
            let index = self.eval_math(inner);
            return list_item(self.memory.number_list(&name), index).unwrap_or(0.0);
        }

        if let Some(value) = self.memory.number(token) {
            return value;
        }
        parse_number_prefix(token).unwrap_or(0.0)
    }
}

/// Looks up `values[index]`, truncating the index toward zero.
pub(crate) fn list_item<T: Clone>(values: Option<&[T]>, index: f64) -> Option<T> {
    let index = usize::try_from(index as i64).ok()?;
    values?.get(index).cloned()
}


//==================================================
// End of file
//==================================================
