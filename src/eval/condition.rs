//==================================================
// File: eval/condition.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Condition evaluation
// Objective: Boolean layer over Y / O / NO with grouping, and a comparison
//            layer for text and numeric operands
//==================================================

use tracing::trace;

use super::find_unquoted;
use crate::interpreter::Interpreter;

/// Numeric equality tolerance.
pub const EPSILON: f64 = 1e-5;

/// Comparison operators, two-character forms first.
const COMPARISONS: [&str; 6] = ["==", "!=", ">=", "<=", ">", "<"];

//==================================================
// Section 1.0 - Boolean Operators
//==================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolOp {
    And,
    Or,
    Not,
}

impl BoolOp {
    fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("y") {
            Some(BoolOp::And)
        } else if word.eq_ignore_ascii_case("o") {
            Some(BoolOp::Or)
        } else if word.eq_ignore_ascii_case("no") {
            Some(BoolOp::Not)
        } else {
            None
        }
    }
}

fn is_boundary(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => c.is_whitespace() || c == '(' || c == ')',
    }
}

/// Finds the boolean operator words that sit outside quotes and parentheses,
/// as `(start, end, op)` byte ranges.
fn operator_words(expr: &str) -> Vec<(usize, usize, BoolOp)> {
    let mut found = Vec::new();
    let mut in_quotes = false;
    let mut depth = 0i32;
    let mut prev: Option<char> = None;
    let mut iter = expr.char_indices().peekable();

    while let Some((pos, c)) = iter.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth -= 1,
            _ if !in_quotes && depth == 0 && c.is_alphabetic() && is_boundary(prev) => {
                let mut end = pos + c.len_utf8();
                while let Some(&(next_pos, next)) = iter.peek() {
                    if !next.is_alphanumeric() && next != '_' {
                        break;
                    }
                    end = next_pos + next.len_utf8();
                    iter.next();
                }
                let next = expr[end..].chars().next();
                if is_boundary(next) {
                    if let Some(op) = BoolOp::from_word(&expr[pos..end]) {
                        found.push((pos, end, op));
                    }
                }
                prev = expr[..end].chars().next_back();
                continue;
            }
            _ => {}
        }
        prev = Some(c);
    }
    found
}

/// Splits `expr` around every operator word of kind `op`.
fn split_on<'a>(expr: &'a str, words: &[(usize, usize, BoolOp)], op: BoolOp) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for &(from, to, kind) in words {
        if kind == op {
            parts.push(&expr[start..from]);
            start = to;
        }
    }
    parts.push(&expr[start..]);
    parts
}

/// Returns the inside of `expr` when one pair of parentheses wraps all of it.
fn strip_group(expr: &str) -> Option<&str> {
    if !expr.starts_with('(') || !expr.ends_with(')') {
        return None;
    }
    let mut in_quotes = false;
    let mut depth = 0i32;
    for (pos, c) in expr.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                depth -= 1;
                if depth == 0 {
                    return (pos == expr.len() - 1).then(|| &expr[1..pos]);
                }
            }
            _ => {}
        }
    }
    None
}

//==================================================
// Section 2.0 - Evaluation
//==================================================

impl Interpreter {
    /// Evaluates a condition. `O` binds loosest, then `Y`, then `NO`; a
    /// parenthesised group is evaluated as a whole. Empty conditions are false.
    pub fn eval_condition(&mut self, expr: &str) -> bool {
        let expr = expr.trim();
        if expr.is_empty() {
            return false;
        }
        let words = operator_words(expr);

        if words.iter().any(|w| w.2 == BoolOp::Or) {
            return split_on(expr, &words, BoolOp::Or)
                .into_iter()
                .fold(false, |acc, part| self.eval_condition(part) || acc);
        }
        if words.iter().any(|w| w.2 == BoolOp::And) {
            return split_on(expr, &words, BoolOp::And)
                .into_iter()
                .fold(true, |acc, part| self.eval_condition(part) && acc);
        }
        if let Some(&(0, end, BoolOp::Not)) = words.first() {
            return !self.eval_condition(&expr[end..]);
        }
        if let Some(inner) = strip_group(expr) {
            return self.eval_condition(inner);
        }
        self.compare(expr)
    }

    /// Comparison layer: the first operator found splits the expression.
    /// Text operands support only `==` and `!=`. Without an operator the
    /// expression is true when its arithmetic value is non-zero.
    fn compare(&mut self, expr: &str) -> bool {
        let Some((op, pos)) = COMPARISONS
            .iter()
            .find_map(|op| find_unquoted(expr, op).map(|pos| (*op, pos)))
        else {
            return self.eval_math(expr) != 0.0;
        };
        let left = expr[..pos].trim();
        let right = expr[pos + op.len()..].trim();

        if self.is_textual(left) || self.is_textual(right) {
            let a = self.eval_text(left);
            let b = self.eval_text(right);
            trace!(%a, %b, op, "text comparison");
            return match op {
                "==" => a == b,
                "!=" => a != b,
                _ => false,
            };
        }

        let a = self.eval_math(left);
        let b = self.eval_math(right);
        match op {
            "==" => (a - b).abs() < EPSILON,
            "!=" => (a - b).abs() > EPSILON,
            ">=" => a >= b,
            "<=" => a <= b,
            ">" => a > b,
            "<" => a < b,
            _ => false,
        }
    }
}


//==================================================
// End of file
//==================================================
