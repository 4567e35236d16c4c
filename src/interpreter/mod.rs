//==================================================
// File: interpreter/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: RedCode interpreter state
// Objective: Own the linked program, call stack, module registry, console
//            and configuration of one running script
//==================================================

pub mod call;
pub mod console;
pub mod engine;
pub mod errors;

use std::rc::Rc;

use tracing::{info, warn};

pub use console::{CapturedOutput, Console};
pub use errors::{ErrorCode, ScriptError};

use crate::config::RuntimeConfig;
use crate::memory::{CallStack, Value};
use crate::modules::{DataSource, ModuleCommand, ModuleContext, ModuleError, ModuleRegistry};
use crate::script::Program;
use crate::stdlib_registry::StdlibRegistry;

//==================================================
// Section 1.0 - Return Values
//==================================================

/// Result of running a block. `active` is set only while a `retornar` is
/// unwinding its own block; callers receive it cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnValue {
    pub value: Value,
    pub active: bool,
}

//==================================================
// Section 2.0 - Interpreter
//==================================================

pub struct Interpreter {
    program: Rc<Program>,
    pub(crate) memory: CallStack,
    modules: ModuleRegistry,
    stdlib: StdlibRegistry,
    pub(crate) console: Console,
    config: RuntimeConfig,
    pub(crate) call_depth: usize,
}

impl Interpreter {
    pub fn new(program: Program) -> Self {
        Self::with_config(program, RuntimeConfig::default())
    }

    pub fn with_config(program: Program, config: RuntimeConfig) -> Self {
        Self {
            program: Rc::new(program),
            memory: CallStack::new(),
            modules: ModuleRegistry::default(),
            stdlib: StdlibRegistry::with_defaults(),
            console: Console::stdio(),
            config,
            call_depth: 0,
        }
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(Program::from_source(source))
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub(crate) fn shared_program(&self) -> Rc<Program> {
        Rc::clone(&self.program)
    }

    pub fn memory(&self) -> &CallStack {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut CallStack {
        &mut self.memory
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn stdlib_mut(&mut self) -> &mut StdlibRegistry {
        &mut self.stdlib
    }

    /// Makes `name` callable from scripts without an `importar`.
    pub fn register_command(&mut self, name: &str, command: ModuleCommand) {
        self.modules.register(name, command);
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.modules.command(name).is_some()
    }

    /// Runs the whole program from its first line.
    pub fn run(&mut self) -> ReturnValue {
        let result = self.execute_block(0, None);
        self.console.flush();
        result
    }

    /// Installs the commands of an importable module.
    pub fn import_module(&mut self, name: &str) -> Result<(), ModuleError> {
        let installer = self
            .stdlib
            .resolve(name)
            .ok_or_else(|| ModuleError::NotFound {
                module: name.to_string(),
            })?;
        let mut context = ModuleContext {
            memory: &mut self.memory,
            console: &mut self.console,
            config: &self.config,
        };
        installer(&mut self.modules, &mut context);
        info!(module = name, "module imported");
        Ok(())
    }

    /// Copies every entry delivered by `source` into the current frame's
    /// scope, numbers as numbers and everything else as text.
    pub fn import_data(&mut self, source: &mut dyn DataSource) -> Result<usize, ModuleError> {
        let entries = source.poll()?;
        for (name, value) in &entries {
            crate::modules::store_detected(&mut self.memory, name, value);
        }
        info!(entries = entries.len(), "external data imported");
        Ok(entries.len())
    }

    /// Runs the registered command `name` with its raw argument text.
    pub(crate) fn run_command(&mut self, name: &str, arguments: &str) -> bool {
        let Some(command) = self.modules.command(name) else {
            return false;
        };
        let mut context = ModuleContext {
            memory: &mut self.memory,
            console: &mut self.console,
            config: &self.config,
        };
        command(&mut context, arguments);
        true
    }

    pub(crate) fn import_from_script(&mut self, name: &str) {
        if let Err(err) = self.import_module(name) {
            warn!(code = errors::module_error_code(&err).as_str(), error = %err, "import failed");
            self.console.print_line(&err.to_string());
        }
    }
}


//==================================================
// End of file
//==================================================
