//==================================================
// File: interpreter/engine.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Execution engine
// Objective: Walk the program counter over a line range, dispatching each
//            classified statement and following the jump table
//==================================================

use tracing::{debug, trace};

use super::{Interpreter, ReturnValue};
use crate::eval::parse_number_exact;
use crate::memory::{MemoryAccess, Value};
use crate::script::Program;
use crate::script::statement::{Statement, ValueKind};

/// What the engine does after one line.
enum Flow {
    Next,
    Jump(usize),
    Return(ReturnValue),
}

//==================================================
// Section 1.0 - Program Counter Loop
//==================================================

impl Interpreter {
    /// Executes lines `start..end` (or to the end of the program). Returns
    /// early with an active value when a `retornar` runs.
    pub(crate) fn execute_block(&mut self, start: usize, end: Option<usize>) -> ReturnValue {
        let program = self.shared_program();
        let limit = end.map_or(program.len(), |end| end.min(program.len()));
        let mut pc = start;

        while pc < limit {
            let flow = self.step(&program, pc, limit);
            match flow {
                Flow::Next => pc += 1,
                Flow::Jump(target) => pc = target,
                Flow::Return(value) => return value,
            }
        }
        ReturnValue::default()
    }

    fn step(&mut self, program: &Program, pc: usize, limit: usize) -> Flow {
        let Some(line) = program.line(pc) else {
            return Flow::Jump(limit);
        };
        trace!(pc, line = line.text(), "dispatch");
        // Unmatched openers have no entry: their remainder is unreachable.
        let jump = || program.jumps().get(pc).unwrap_or(limit);

        match line.statement() {
            Statement::If { condition } | Statement::While { condition } => {
                if self.eval_condition(condition) {
                    Flow::Next
                } else {
                    Flow::Jump(jump())
                }
            }
            Statement::Else | Statement::Function { .. } => Flow::Jump(jump()),
            Statement::EndIf | Statement::EndFunction => Flow::Next,
            Statement::EndWhile => program.jumps().get(pc).map_or(Flow::Next, Flow::Jump),
            Statement::ForEach { variable, list } => {
                if self.for_each_has_item(pc, variable, list) {
                    Flow::Next
                } else {
                    Flow::Jump(jump())
                }
            }
            Statement::EndForEach => match program.jumps().get(pc) {
                Some(opener) => {
                    self.memory.advance_loop_counter(opener);
                    Flow::Jump(opener)
                }
                None => Flow::Next,
            },
            Statement::Count {
                variable,
                start,
                end,
            } => {
                if self.count_in_range(pc, variable, start, end) {
                    Flow::Next
                } else {
                    Flow::Jump(jump())
                }
            }
            Statement::EndCount => match program.jumps().get(pc) {
                Some(opener) => {
                    if let Some(Statement::Count { variable, .. }) =
                        program.line(opener).map(|line| line.statement())
                    {
                        let next = self.memory.read_number(variable) + 1.0;
                        self.memory.write_number(variable, next, false);
                    }
                    Flow::Jump(opener)
                }
                None => Flow::Next,
            },
            Statement::Return { expr } => Flow::Return(self.eval_return(expr)),
            Statement::Import { module } => {
                self.import_from_script(module);
                Flow::Next
            }
            statement => {
                if !self.run_command(line.keyword(), line.arguments()) {
                    self.execute_simple(statement);
                }
                Flow::Next
            }
        }
    }

    //==================================================
    // Section 2.0 - Loops
    //==================================================

    /// Binds the next element of `list` to `variable`, or clears the loop
    /// counter once the list is exhausted.
    fn for_each_has_item(&mut self, pc: usize, variable: &str, list: &str) -> bool {
        let index = match self.memory.loop_counter(pc) {
            Some(index) => index,
            None => {
                self.memory.set_loop_counter(pc, 0);
                0
            }
        };

        let item = if let Some(values) = self.memory.number_list(list) {
            values.get(index).map(|v| Value::Number(*v))
        } else {
            self.memory
                .text_list(list)
                .and_then(|values| values.get(index))
                .map(|v| Value::Text(v.clone()))
        };

        match item {
            Some(value) => {
                self.memory.bind(variable, &value, true);
                true
            }
            None => {
                self.memory.clear_loop_counter(pc);
                false
            }
        }
    }

    /// Initialises the induction variable on first entry, then tests it
    /// against the (re-evaluated) upper bound.
    fn count_in_range(&mut self, pc: usize, variable: &str, start: &str, end: &str) -> bool {
        if self.memory.loop_counter(pc).is_none() {
            let first = self.eval_math(start);
            self.memory.write_number(variable, first, true);
            self.memory.set_loop_counter(pc, 1);
        }
        let upper = self.eval_math(end);
        if self.memory.read_number(variable) > upper {
            self.memory.clear_loop_counter(pc);
            return false;
        }
        true
    }

    //==================================================
    // Section 3.0 - Returns
    //==================================================

    fn eval_return(&mut self, expr: &str) -> ReturnValue {
        let expr = if expr.is_empty() { "0" } else { expr };
        let textual = self.is_textual(expr) || (expr.contains('"') && expr.contains('+'));
        let value = if textual {
            Value::Text(self.eval_text(expr))
        } else {
            Value::Number(self.eval_math(expr))
        };
        debug!(?value, "retornar");
        ReturnValue {
            value,
            active: true,
        }
    }

    //==================================================
    // Section 4.0 - Simple Statements
    //==================================================

    fn execute_simple(&mut self, statement: &Statement) {
        match statement {
            Statement::Show { expr } => {
                let text = self.eval_text(expr);
                self.console.print_line(&text);
            }
            Statement::ListLiteral { kind, name, items } => match kind {
                ValueKind::Number => {
                    let values = items.iter().map(|item| self.eval_math(item)).collect();
                    self.memory.set_number_list(name, values);
                }
                ValueKind::Text => {
                    let values = items.iter().map(|item| self.eval_text(item)).collect();
                    self.memory.set_text_list(name, values);
                }
            },
            Statement::ListMethod {
                list,
                method,
                argument,
            } => self.list_method(list, method, argument),
            Statement::Assign {
                declared,
                name,
                value,
            } => self.assign(*declared, name, value),
            Statement::Input {
                declared,
                name,
                prompt,
            } => self.input(*declared, name, prompt),
            _ => {}
        }
    }

    fn list_method(&mut self, list: &str, method: &str, argument: &str) {
        if self.memory.number_list(list).is_some() {
            let element = match method {
                "agregar" | "eliminar" => self.eval_math(argument),
                _ => 0.0,
            };
            let Some(values) = self.memory.number_list_mut(list) else {
                return;
            };
            match method {
                "agregar" => values.push(element),
                "eliminar" => remove_at(values, element),
                "ordenar" => values.sort_by(f64::total_cmp),
                "invertir" => values.reverse(),
                _ => debug!(list, method, "unknown list method"),
            }
        } else if self.memory.text_list(list).is_some() {
            let (element, index) = match method {
                "agregar" => (self.eval_text(argument), 0.0),
                "eliminar" => (String::new(), self.eval_math(argument)),
                _ => (String::new(), 0.0),
            };
            let Some(values) = self.memory.text_list_mut(list) else {
                return;
            };
            match method {
                "agregar" => values.push(element),
                "eliminar" => remove_at(values, index),
                "ordenar" => values.sort(),
                "invertir" => values.reverse(),
                _ => debug!(list, method, "unknown list method"),
            }
        } else {
            debug!(list, method, "method call on unknown list");
        }
    }

    /// Declared kind wins; otherwise text when the value has a quote, the
    /// name already holds text, or the value reads as text.
    fn assign(&mut self, declared: Option<ValueKind>, name: &str, value: &str) {
        let force_local = declared.is_some();
        let textual = match declared {
            Some(kind) => kind == ValueKind::Text,
            None => value.contains('"') || self.memory.has_text(name) || self.is_textual(value),
        };
        if textual {
            let text = self.eval_text(value);
            self.memory.write_text(name, &text, force_local);
        } else {
            let number = self.eval_math(value);
            self.memory.write_number(name, number, force_local);
        }
    }

    /// `nombre = entrada(prompt)`: prints the prompt and stores one line of
    /// input, typed by declaration, then existing binding, then content.
    fn input(&mut self, declared: Option<ValueKind>, name: &str, prompt: &str) {
        let prompt = self.eval_text(prompt);
        self.console.print(&prompt);
        let answer = self.console.read_line();
        let parsed = parse_number_exact(&answer);

        let as_number = match declared {
            Some(kind) => kind == ValueKind::Number,
            None if self.memory.has_text(name) => false,
            None if self.memory.has_number(name) => true,
            None => parsed.is_some(),
        };
        let force_local = declared.is_some();
        if as_number {
            self.memory
                .write_number(name, parsed.unwrap_or(0.0), force_local);
        } else {
            self.memory.write_text(name, &answer, force_local);
        }
    }
}

/// Removes `values[index]` when the truncated index is in range.
fn remove_at<T>(values: &mut Vec<T>, index: f64) {
    if let Ok(index) = usize::try_from(index as i64) {
        if index < values.len() {
            values.remove(index);
        }
    }
}


//==================================================
// End of file
//==================================================
