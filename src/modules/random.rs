//==================================================
// File: modules/random.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: `random` native module
// Objective: Uniform integers and uniform picks from script lists
//==================================================

use rand::Rng;

use super::{ModuleContext, ModuleRegistry, split_args};
use crate::memory::MemoryAccess;

pub fn install(registry: &mut ModuleRegistry, _context: &mut ModuleContext<'_>) {
    registry.register("random.numero", numero);
    registry.register("random.elegir", elegir);
}

/// A literal integer bound, or the value of the numeric variable it names.
fn bound(memory: &dyn MemoryAccess, token: &str) -> i64 {
    token
        .parse::<i64>()
        .unwrap_or_else(|_| memory.read_number(token) as i64)
}

/// `random.numero(var, min, max)`: integer in `[min, max]`.
fn numero(ctx: &mut ModuleContext<'_>, raw: &str) {
    let args = split_args(raw);
    let [var, low, high, ..] = args.as_slice() else {
        return;
    };
    let low = bound(&*ctx.memory, low);
    let high = bound(&*ctx.memory, high);
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let value = rand::thread_rng().gen_range(low..=high);
    ctx.memory.write_number(var, value as f64, false);
}

/// `random.elegir(var, lista)`: one element of a numeric or text list.
fn elegir(ctx: &mut ModuleContext<'_>, raw: &str) {
    let args = split_args(raw);
    let [var, list, ..] = args.as_slice() else {
        return;
    };
    let mut rng = rand::thread_rng();
    if let Some(values) = ctx.memory.number_list(list) {
        if values.is_empty() {
            return;
        }
        let picked = values[rng.gen_range(0..values.len())];
        ctx.memory.write_number(var, picked, false);
    } else if let Some(values) = ctx.memory.text_list(list) {
        if values.is_empty() {
            return;
        }
        let picked = values[rng.gen_range(0..values.len())].clone();
        ctx.memory.write_text(var, &picked, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::interpreter::Console;
    use crate::memory::CallStack;

    fn with_context(memory: &mut CallStack, run: impl FnOnce(&mut ModuleContext<'_>)) {
        let (mut console, _) = Console::captured("");
        let config = RuntimeConfig::default();
        let mut ctx = ModuleContext {
            memory,
            console: &mut console,
            config: &config,
        };
        run(&mut ctx);
    }

    #[test]
    fn numbers_stay_in_reversed_bounds() {
        let mut memory = CallStack::new();
        memory.write_number("tope", 3.0, false);
        for _ in 0..50 {
            with_context(&mut memory, |ctx| numero(ctx, "dado, tope, 1"));
            let value = memory.read_number("dado");
            assert!((1.0..=3.0).contains(&value));
            assert_eq!(value.fract(), 0.0);
        }
    }

    #[test]
    fn picks_come_from_the_list() {
        let mut memory = CallStack::new();
        memory.set_text_list("colores", vec!["rojo".into(), "azul".into()]);
        with_context(&mut memory, |ctx| elegir(ctx, "color, colores"));
        let color = memory.read_text("color");
        assert!(color == "rojo" || color == "azul");

        with_context(&mut memory, |ctx| elegir(ctx, "otro, nada"));
        assert!(!memory.has_text("otro"));
    }
}

//==================================================
// End of file
//==================================================
