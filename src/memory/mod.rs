//==================================================
// File: memory/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Dynamic-scope memory model for RedCode
// Objective: Frames of numeric/text variables and lists, loop progress
//            counters, and the accessor primitives shared with modules
//==================================================

use std::collections::HashMap;

use crate::eval::format_number;

//==================================================
// Section 1.0 - Values
//==================================================

/// A scalar RedCode value. Scripts only know numbers and text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::Number(0.0)
    }
}

impl Value {
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Numeric view of the value; text reads as 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(_) => 0.0,
        }
    }

    /// Text view of the value; numbers use the RedCode decimal rendering.
    pub fn to_text(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(t) => t.clone(),
        }
    }
}

//==================================================
// Section 2.0 - Frames
//==================================================

/// One scope: variables, lists and the progress counters of loops entered
/// while this frame was on top.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    numbers: HashMap<String, f64>,
    texts: HashMap<String, String>,
    number_lists: HashMap<String, Vec<f64>>,
    text_lists: HashMap<String, Vec<String>>,
    loop_counters: HashMap<usize, usize>,
}

impl Frame {
    pub fn number(&self, name: &str) -> Option<f64> {
        self.numbers.get(name).copied()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    pub fn number_list(&self, name: &str) -> Option<&[f64]> {
        self.number_lists.get(name).map(Vec::as_slice)
    }

    pub fn text_list(&self, name: &str) -> Option<&[String]> {
        self.text_lists.get(name).map(Vec::as_slice)
    }

    pub fn loop_counter(&self, line: usize) -> Option<usize> {
        self.loop_counters.get(&line).copied()
    }
}

//==================================================
// Section 3.0 - Accessor Primitives
//==================================================

/// Memory operations exposed to native modules and external data sources.
///
/// Reads search from the innermost frame outwards. Writes update the nearest
/// frame that already binds the name, or create it in the current frame;
/// `force_local` always writes to the current frame.
pub trait MemoryAccess {
    fn read_number(&self, name: &str) -> f64;
    fn read_text(&self, name: &str) -> String;
    fn has_number(&self, name: &str) -> bool;
    fn has_text(&self, name: &str) -> bool;
    fn write_number(&mut self, name: &str, value: f64, force_local: bool);
    fn write_text(&mut self, name: &str, value: &str, force_local: bool);
    fn number_list(&self, name: &str) -> Option<&[f64]>;
    fn text_list(&self, name: &str) -> Option<&[String]>;
}

//==================================================
// Section 4.0 - Call Stack
//==================================================

/// Ordered frames, outermost first. The outermost frame is created with the
/// stack and is never popped.
#[derive(Debug, Clone)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

impl CallStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Discards the current frame. The program frame stays in place.
    pub fn pop_frame(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> &Frame {
        // The stack is never empty: `new` seeds it and `pop_frame` keeps one.
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Frame {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.frames.iter().rev().find_map(|frame| frame.number(name))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.frames.iter().rev().find_map(|frame| frame.text(name))
    }

    /// Binds a value of either kind, following the write rules of
    /// [`MemoryAccess`].
    pub fn bind(&mut self, name: &str, value: &Value, force_local: bool) {
        match value {
            Value::Number(n) => self.write_number(name, *n, force_local),
            Value::Text(t) => self.write_text(name, t, force_local),
        }
    }

    pub fn number_list_mut(&mut self, name: &str) -> Option<&mut Vec<f64>> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.number_lists.get_mut(name))
    }

    pub fn text_list_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.text_lists.get_mut(name))
    }

    /// Stores a numeric list in the current frame, replacing any list of
    /// that name there.
    pub fn set_number_list(&mut self, name: &str, values: Vec<f64>) {
        self.current_mut()
            .number_lists
            .insert(name.to_string(), values);
    }

    pub fn set_text_list(&mut self, name: &str, values: Vec<String>) {
        self.current_mut().text_lists.insert(name.to_string(), values);
    }

    pub fn loop_counter(&self, line: usize) -> Option<usize> {
        self.current().loop_counter(line)
    }

    pub fn set_loop_counter(&mut self, line: usize, value: usize) {
        self.current_mut().loop_counters.insert(line, value);
    }

    /// Moves the counter of the loop opened at `line` forward, if that loop
    /// is active in the current frame.
    pub fn advance_loop_counter(&mut self, line: usize) {
        if let Some(counter) = self.current_mut().loop_counters.get_mut(&line) {
            *counter += 1;
        }
    }

    pub fn clear_loop_counter(&mut self, line: usize) {
        self.current_mut().loop_counters.remove(&line);
    }
}

impl MemoryAccess for CallStack {
    fn read_number(&self, name: &str) -> f64 {
        self.number(name).unwrap_or(0.0)
    }

    fn read_text(&self, name: &str) -> String {
        self.text(name).map(str::to_string).unwrap_or_default()
    }

    fn has_number(&self, name: &str) -> bool {
        self.number(name).is_some()
    }

    fn has_text(&self, name: &str) -> bool {
        self.text(name).is_some()
    }

    fn write_number(&mut self, name: &str, value: f64, force_local: bool) {
        if !force_local {
            if let Some(slot) = self
                .frames
                .iter_mut()
                .rev()
                .find_map(|frame| frame.numbers.get_mut(name))
            {
                *slot = value;
                return;
            }
        }
        self.current_mut().numbers.insert(name.to_string(), value);
    }

    fn write_text(&mut self, name: &str, value: &str, force_local: bool) {
        if !force_local {
            if let Some(slot) = self
                .frames
                .iter_mut()
                .rev()
                .find_map(|frame| frame.texts.get_mut(name))
            {
                *slot = value.to_string();
                return;
            }
        }
        self.current_mut()
            .texts
            .insert(name.to_string(), value.to_string());
    }

    fn number_list(&self, name: &str) -> Option<&[f64]> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.number_list(name))
    }

    fn text_list(&self, name: &str) -> Option<&[String]> {
        self.frames.iter().rev().find_map(|frame| frame.text_list(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_prefers_innermost_binding() {
        let mut stack = CallStack::new();
        stack.write_number("x", 1.0, false);
        stack.push_frame();
        stack.write_number("x", 2.0, true);
        assert_eq!(stack.read_number("x"), 2.0);
        stack.pop_frame();
        assert_eq!(stack.read_number("x"), 1.0);
    }

    #[test]
    fn plain_write_updates_enclosing_binding() {
        let mut stack = CallStack::new();
        stack.write_text("nombre", "ana", false);
        stack.push_frame();
        stack.write_text("nombre", "luis", false);
        assert!(stack.current().text("nombre").is_none());
        stack.pop_frame();
        assert_eq!(stack.read_text("nombre"), "luis");
    }

    #[test]
    fn unknown_names_read_as_neutral_values() {
        let stack = CallStack::new();
        assert_eq!(stack.read_number("nada"), 0.0);
        assert_eq!(stack.read_text("nada"), "");
        assert!(stack.number_list("nada").is_none());
    }

    #[test]
    fn program_frame_is_never_popped() {
        let mut stack = CallStack::new();
        assert!(stack.pop_frame().is_none());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn loop_counters_belong_to_the_current_frame() {
        let mut stack = CallStack::new();
        stack.set_loop_counter(4, 0);
        stack.push_frame();
        assert_eq!(stack.loop_counter(4), None);
        stack.set_loop_counter(4, 2);
        stack.advance_loop_counter(4);
        assert_eq!(stack.loop_counter(4), Some(3));
        stack.pop_frame();
        assert_eq!(stack.loop_counter(4), Some(0));
    }

    #[test]
    fn list_mutation_reaches_outer_frames() {
        let mut stack = CallStack::new();
        stack.set_number_list("datos", vec![1.0, 2.0]);
        stack.push_frame();
        if let Some(values) = stack.number_list_mut("datos") {
            values.push(3.0);
        }
        stack.pop_frame();
        assert_eq!(stack.number_list("datos"), Some(&[1.0, 2.0, 3.0][..]));
    }
}

//==================================================
// End of file
//==================================================
