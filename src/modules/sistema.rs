//==================================================
// File: modules/sistema.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: `sistema` native module
// Objective: Console clearing and blocking sleeps
//==================================================

use std::thread;
use std::time::Duration;

use tracing::debug;

use super::{ModuleContext, ModuleRegistry};

pub fn install(registry: &mut ModuleRegistry, _context: &mut ModuleContext<'_>) {
    registry.register("sistema.limpiar", limpiar);
    registry.register("sistema.esperar", esperar);
}

fn limpiar(ctx: &mut ModuleContext<'_>, _raw: &str) {
    ctx.console.clear();
}

/// Milliseconds from the digits in `raw`; `None` when there are none.
fn wait_millis(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

fn esperar(_ctx: &mut ModuleContext<'_>, raw: &str) {
    if let Some(ms) = wait_millis(raw) {
        debug!(ms, "sleeping");
        thread::sleep(Duration::from_millis(ms));
    }
}


//==================================================
// End of file
//==================================================
