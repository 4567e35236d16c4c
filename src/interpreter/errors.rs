//==================================================
// File: interpreter/errors.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Interpreter error surface
// Objective: The fatal load error plus stable diagnostic codes for the
//            recoverable conditions reported on the console
//==================================================

use std::io;

use thiserror::Error;

use crate::modules::ModuleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Load,
    ModuleNotFound,
    ModuleIo,
    Fetch,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Load => "E001",
            ErrorCode::ModuleNotFound => "E002",
            ErrorCode::ModuleIo => "E003",
            ErrorCode::Fetch => "E004",
        }
    }
}

/// The only condition that stops a script before it starts.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("No se pudo abrir '{path}'")]
    Load {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ScriptError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScriptError::Load { .. } => ErrorCode::Load,
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code().as_str()
    }
}

pub fn module_error_code(error: &ModuleError) -> ErrorCode {
    match error {
        ModuleError::NotFound { .. } => ErrorCode::ModuleNotFound,
        ModuleError::Bridge { .. } => ErrorCode::ModuleIo,
        ModuleError::Fetch { .. } => ErrorCode::Fetch,
    }
}


//==================================================
// End of file
//==================================================
