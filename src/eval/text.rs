//==================================================
// File: eval/text.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Text evaluation
// Objective: Concatenate `+`-separated segments, resolving literals, calls,
//            lists, indexing and variables into display text
//==================================================

use super::math::list_item;
use super::{
    call_parts, format_number, format_number_list, format_text_list, index_parts,
    split_call_args, split_top_level, unquote,
};
use crate::interpreter::Interpreter;
use crate::memory::MemoryAccess;

impl Interpreter {
    /// Evaluates a text expression: every top-level `+` segment is resolved
    /// to text and the pieces are concatenated.
    pub fn eval_text(&mut self, expr: &str) -> String {
        let mut out = String::new();
        for segment in split_top_level(expr, '+') {
            let rendered = self.text_segment(segment.trim());
            out.push_str(&rendered);
        }
        out
    }

    /// True when `expr` should be evaluated as text rather than arithmetic:
    /// some segment is a quoted literal, a text variable or an element of a
    /// text list.
    pub fn is_textual(&self, expr: &str) -> bool {
        split_top_level(expr, '+').iter().any(|segment| {
            let segment = segment.trim();
            if segment.starts_with('"') || self.memory.has_text(segment) {
                return true;
            }
            if self.memory.text_list(segment).is_some() {
                return true;
            }
            match index_parts(segment) {
                Some((name, _)) if !segment.contains('(') => {
                    self.memory.text_list(name).is_some()
                }
                _ => false,
            }
        })
    }

    fn text_segment(&mut self, segment: &str) -> String {
        if segment.is_empty() {
            return String::new();
        }
        if let Some(literal) = unquote(segment) {
            return literal.to_string();
        }
        if segment.starts_with('(') && segment.ends_with(')') {
            return format_number(self.eval_math(segment));
        }

        if let Some((name, inner)) = call_parts(segment) {
            if self.program().functions().contains(name) {
                let args = split_call_args(inner);
                return self.invoke_function(name, &args).value.to_text();
            }
        }

        if let Some(values) = self.memory.number_list(segment) {
            return format_number_list(values);
        }
        if let Some(values) = self.memory.text_list(segment) {
            return format_text_list(values);
        }

        if segment.contains(']') {
            if let Some((name, inner)) = index_parts(segment) {
                let name = name.to_string();
                let index = self.eval_math(inner);
                if let Some(values) = self.memory.text_list(&name) {
                    return list_item(Some(values), index).unwrap_or_default();
                }
                if let Some(values) = self.memory.number_list(&name) {
                    return format_number(list_item(Some(values), index).unwrap_or(0.0));
                }
            }
        }

        if let Some(text) = self.memory.text(segment) {
            return text.to_string();
        }
        if let Some(value) = self.memory.number(segment) {
            return format_number(value);
        }
        if segment.chars().any(|c| c.is_ascii_digit()) {
            return format_number(self.eval_math(segment));
        }
        segment.to_string()
    }
}


//==================================================
// End of file
//==================================================
