//==================================================
// File: modules/archivos.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: `archivos` native module
// Objective: Flat JSON object files: create, write a key, read a key into a
//            variable, and print a file
//==================================================

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value as JsonValue};
use tracing::warn;

use super::{ModuleContext, ModuleRegistry, resolve_operand, split_args};

const FOOTER: &str = "------------------------------------";

pub fn install(registry: &mut ModuleRegistry, _context: &mut ModuleContext<'_>) {
    registry.register("archivos.crear", crear);
    registry.register("archivos.escribir", escribir);
    registry.register("archivos.leer", leer);
    registry.register("archivos.inspeccionar", inspeccionar);
}

//==================================================
// Section 1.0 - JSON Helpers
//==================================================

/// Reads the object stored at `path`; missing or malformed files read as
/// an empty object.
pub fn read_object(path: &Path) -> Map<String, JsonValue> {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| serde_json::from_str::<JsonValue>(&text).ok())
        .and_then(|value| match value {
            JsonValue::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default()
}

/// Pretty-prints `object` with four-space indentation.
pub fn render_object(object: &Map<String, JsonValue>) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    object.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Digits with an optional leading `-` and at most one `.`.
fn looks_numeric(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    !body.is_empty()
        && body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.matches('.').count() <= 1
}

fn json_value(text: &str) -> JsonValue {
    if looks_numeric(text) {
        if let Ok(integer) = text.parse::<i64>() {
            return JsonValue::from(integer);
        }
        if let Some(number) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return JsonValue::Number(number);
        }
    }
    JsonValue::String(text.to_string())
}

//==================================================
// Section 2.0 - Commands
//==================================================

/// `archivos.crear(archivo)`
fn crear(ctx: &mut ModuleContext<'_>, raw: &str) {
    let args = split_args(raw);
    let Some(name) = args.first().filter(|name| !name.is_empty()) else {
        return;
    };
    let path = resolve_operand(&*ctx.memory, name);
    if Path::new(&path).exists() {
        return;
    }
    if let Err(err) = fs::write(&path, "{\n}") {
        warn!(path = %path, error = %err, "could not create file");
    }
}

/// `archivos.escribir(archivo, clave, valor)`
fn escribir(ctx: &mut ModuleContext<'_>, raw: &str) {
    let args = split_args(raw);
    let [name, key, value, ..] = args.as_slice() else {
        return;
    };
    let path = resolve_operand(&*ctx.memory, name);
    let value = resolve_operand(&*ctx.memory, value);

    let mut object = read_object(Path::new(&path));
    object.insert(key.clone(), json_value(&value));
    let written = render_object(&object)
        .map_err(|err| err.to_string())
        .and_then(|text| fs::write(&path, text).map_err(|err| err.to_string()));
    if let Err(err) = written {
        warn!(path = %path, error = %err, "could not write file");
    }
}

/// `archivos.leer(archivo, clave, var)`
fn leer(ctx: &mut ModuleContext<'_>, raw: &str) {
    let args = split_args(raw);
    let [name, key, var, ..] = args.as_slice() else {
        return;
    };
    let path = resolve_operand(&*ctx.memory, name);
    let object = read_object(Path::new(&path));
    match object.get(key.as_str()) {
        Some(JsonValue::Number(number)) => {
            ctx.memory
                .write_number(var, number.as_f64().unwrap_or(0.0), false);
        }
        Some(JsonValue::String(text)) => ctx.memory.write_text(var, text, false),
        Some(other) => ctx.memory.write_text(var, &other.to_string(), false),
        None => {}
    }
}

/// `archivos.inspeccionar(archivo)`
fn inspeccionar(ctx: &mut ModuleContext<'_>, raw: &str) {
    let args = split_args(raw);
    let Some(name) = args.first().filter(|name| !name.is_empty()) else {
        return;
    };
    let path = resolve_operand(&*ctx.memory, name);
    ctx.console
        .print_line(&format!("--- CONTENIDO JSON ({path}) ---"));
    match fs::read_to_string(&path) {
        Ok(content) => {
            for line in content.lines() {
                ctx.console.print_line(line);
            }
        }
        Err(_) => ctx
            .console
            .print_line("[ERROR] No se pudo abrir el archivo."),
    }
    ctx.console.print_line(FOOTER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::interpreter::Console;
    use crate::memory::{CallStack, MemoryAccess};

    fn call(memory: &mut CallStack, command: fn(&mut ModuleContext<'_>, &str), raw: &str) -> String {
        let (mut console, output) = Console::captured("");
        let config = RuntimeConfig::default();
        let mut ctx = ModuleContext {
            memory,
            console: &mut console,
            config: &config,
        };
        command(&mut ctx, raw);
        output.contents()
    }

    #[test]
    fn write_then_read_keeps_order_and_kinds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("partida.json");
        let file = file.to_string_lossy().to_string();
        let mut memory = CallStack::new();
        memory.write_text("ruta", &file, false);
        memory.write_number("puntos", 68000.0, false);

        call(&mut memory, crear, "ruta");
        call(&mut memory, escribir, "ruta, nombre, \"Ana\"");
        call(&mut memory, escribir, "ruta, puntos, puntos");
        call(&mut memory, escribir, "ruta, nombre, Luis");

        let content = fs::read_to_string(&file).expect("written");
        assert_eq!(
            content,
            "{\n    \"nombre\": \"Luis\",\n    \"puntos\": 68000\n}"
        );

        call(&mut memory, leer, "ruta, puntos, copia");
        call(&mut memory, leer, "ruta, nombre, quien");
        call(&mut memory, leer, "ruta, falta, nada");
        assert_eq!(memory.read_number("copia"), 68000.0);
        assert_eq!(memory.read_text("quien"), "Luis");
        assert!(!memory.has_text("nada") && !memory.has_number("nada"));
    }

    #[test]
    fn create_does_not_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("x.json");
        fs::write(&file, "{\"a\": 1}").expect("seed");
        let mut memory = CallStack::new();
        call(&mut memory, crear, &file.to_string_lossy());
        assert_eq!(fs::read_to_string(&file).expect("read"), "{\"a\": 1}");
    }

    #[test]
    fn inspect_missing_file() {
        let mut memory = CallStack::new();
        let out = call(&mut memory, inspeccionar, "no_existe_123.json");
        assert_eq!(
            out,
            format!(
                "--- CONTENIDO JSON (no_existe_123.json) ---\n[ERROR] No se pudo abrir el archivo.\n{FOOTER}\n"
            )
        );
    }

    #[test]
    fn numeric_detection() {
        assert!(looks_numeric("-12.5"));
        assert!(!looks_numeric("1.2.3"));
        assert!(!looks_numeric("-"));
        assert_eq!(json_value("7"), JsonValue::from(7));
        assert_eq!(json_value("abc"), JsonValue::from("abc"));
    }
}

//==================================================
// End of file
//==================================================
