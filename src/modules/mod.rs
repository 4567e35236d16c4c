//==================================================
// File: modules/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Native module plumbing
// Objective: Command registry, the context handed to commands, the external
//            data source extension point, and shared argument helpers
//==================================================

pub mod archivos;
pub mod random;
pub mod sistema;
pub mod tiempo;
pub mod web;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::RuntimeConfig;
use crate::eval::{format_number, parse_number_exact};
use crate::interpreter::Console;
use crate::memory::MemoryAccess;

//==================================================
// Section 1.0 - Errors
//==================================================

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("[ERROR] Modulo '{module}' no encontrado.")]
    NotFound { module: String },
    #[error("bridge file '{}' could not be read", .path.display())]
    Bridge {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to '{url}' failed: {message}")]
    Fetch { url: String, message: String },
}

//==================================================
// Section 2.0 - Command Registry
//==================================================

/// Everything a command may touch while it runs.
pub struct ModuleContext<'a> {
    pub memory: &'a mut dyn MemoryAccess,
    pub console: &'a mut Console,
    pub config: &'a RuntimeConfig,
}

/// A module command. Receives the raw text between the call's parentheses.
pub type ModuleCommand = fn(&mut ModuleContext<'_>, &str);

#[derive(Clone, Default)]
pub struct ModuleRegistry {
    commands: HashMap<String, ModuleCommand>,
}

impl ModuleRegistry {
    pub fn register(&mut self, name: &str, command: ModuleCommand) {
        self.commands.insert(name.to_string(), command);
    }

    pub fn command(&self, name: &str) -> Option<ModuleCommand> {
        self.commands.get(name).copied()
    }

    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }
}

//==================================================
// Section 3.0 - External Data
//==================================================

/// A producer of `(variable, value)` pairs polled once by the interpreter.
pub trait DataSource {
    fn poll(&mut self) -> Result<Vec<(String, String)>, ModuleError>;
}

//==================================================
// Section 4.0 - Argument Helpers
//==================================================

/// Splits command arguments on `,`, trimming spaces and dropping quotes.
pub fn split_args(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|arg| {
            arg.trim()
                .chars()
                .filter(|c| *c != '"' && *c != '\'')
                .collect()
        })
        .collect()
}

/// Stores `value` as a number when all of it parses as one, else as text.
pub fn store_detected(memory: &mut dyn MemoryAccess, name: &str, value: &str) {
    match parse_number_exact(value) {
        Some(number) if !value.trim().is_empty() => memory.write_number(name, number, false),
        _ => memory.write_text(name, value, false),
    }
}

/// Resolves an argument that may name a variable: an existing numeric
/// variable (formatted), then a text variable, then the literal itself.
pub fn resolve_operand(memory: &dyn MemoryAccess, token: &str) -> String {
    if memory.has_number(token) {
        format_number(memory.read_number(token))
    } else if memory.has_text(token) {
        memory.read_text(token)
    } else {
        token.to_string()
    }
}

/// Keeps the characters allowed in a variable name.
pub fn clean_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::CallStack;

    #[test]
    fn arguments_lose_quotes_and_padding() {
        assert_eq!(
            split_args(r#" "datos.json" , 'clave', valor "#),
            vec!["datos.json", "clave", "valor"]
        );
    }

    #[test]
    fn detected_values_keep_their_kind() {
        let mut memory = CallStack::new();
        store_detected(&mut memory, "precio", "68000.5");
        store_detected(&mut memory, "moneda", "BTC");
        store_detected(&mut memory, "mezcla", "12abc");
        assert_eq!(memory.read_number("precio"), 68000.5);
        assert_eq!(memory.read_text("moneda"), "BTC");
        assert_eq!(memory.read_text("mezcla"), "12abc");
    }

    #[test]
    fn operands_prefer_variables() {
        let mut memory = CallStack::new();
        memory.write_number("total", 3.0, false);
        memory.write_text("ruta", "a.json", false);
        assert_eq!(resolve_operand(&memory, "total"), "3");
        assert_eq!(resolve_operand(&memory, "ruta"), "a.json");
        assert_eq!(resolve_operand(&memory, "b.json"), "b.json");
    }

    #[test]
    fn installers_fill_the_registry() {
        let mut registry = ModuleRegistry::default();
        let mut memory = CallStack::new();
        let (mut console, _) = Console::captured("");
        let config = RuntimeConfig::default();
        let mut ctx = ModuleContext {
            memory: &mut memory,
            console: &mut console,
            config: &config,
        };
        sistema::install(&mut registry, &mut ctx);
        random::install(&mut registry, &mut ctx);
        assert_eq!(
            registry.command_names(),
            vec![
                "random.elegir",
                "random.numero",
                "sistema.esperar",
                "sistema.limpiar"
            ]
        );
        assert!(registry.command("random.tirar").is_none());
    }
}

//==================================================
// End of file
//==================================================
