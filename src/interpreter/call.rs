//==================================================
// File: interpreter/call.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: User function invocation
// Objective: Evaluate arguments in the caller's scope, run the body in a
//            fresh frame, and hand back an inactive return value
//==================================================

use tracing::{debug, warn};

use super::{Interpreter, ReturnValue};
use crate::memory::Value;

impl Interpreter {
    /// Calls the user function `name` with raw argument texts. Unknown names
    /// and calls past the depth limit return a neutral value.
    pub(crate) fn invoke_function(&mut self, name: &str, raw_args: &[String]) -> ReturnValue {
        let Some(info) = self.program().functions().get(name).cloned() else {
            debug!(function = name, "call to unknown function");
            return ReturnValue::default();
        };
        if self.call_depth >= self.config().max_call_depth {
            warn!(
                function = name,
                depth = self.call_depth,
                "call depth limit reached"
            );
            return ReturnValue::default();
        }

        // Missing arguments leave their parameter unbound.
        let bindings: Vec<(String, Value)> = info
            .params
            .iter()
            .zip(raw_args)
            .map(|(param, raw)| {
                let raw = raw.trim();
                let value = if self.is_textual(raw) {
                    Value::Text(self.eval_text(raw))
                } else {
                    Value::Number(self.eval_math(raw))
                };
                (param.clone(), value)
            })
            .collect();

        debug!(function = name, args = bindings.len(), "invoke");
        self.memory.push_frame();
        for (param, value) in &bindings {
            self.memory.bind(param, value, true);
        }
        self.call_depth += 1;
        let mut result = self.execute_block(info.entry, info.end);
        self.call_depth -= 1;
        self.memory.pop_frame();

        result.active = false;
        debug!(function = name, value = ?result.value, "return");
        result
    }

    /// Calls a user function from the host, as if written `name(args...)`.
    pub fn call_function(&mut self, name: &str, args: &[&str]) -> ReturnValue {
        let raw: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        self.invoke_function(name, &raw)
    }
}


//==================================================
// End of file
//==================================================
