//==================================================
// File: lib.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: RedCode library root
// Objective: Expose the script loader, memory model, evaluators,
//            interpreter, native modules, configuration and logging
//==================================================

pub mod config;
pub mod eval;
pub mod interpreter;
pub mod logging;
pub mod memory;
pub mod modules;
pub mod script;
pub mod stdlib_registry;

pub use config::RuntimeConfig;
pub use interpreter::{CapturedOutput, Console, Interpreter, ReturnValue, ScriptError};
pub use memory::{CallStack, MemoryAccess, Value};
pub use script::{Program, Script};

//==================================================
// End of file
//==================================================
