//==================================================
// File: modules/tiempo.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: `tiempo` native module
// Objective: Local time, date and year readings stored into script variables
//==================================================

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use super::{ModuleContext, ModuleRegistry, clean_identifier};

pub fn install(registry: &mut ModuleRegistry, _context: &mut ModuleContext<'_>) {
    registry.register("tiempo.hora", hora);
    registry.register("tiempo.fecha", fecha);
    for alias in ["tiempo.anio", "tiempo.anho", "tiempo.year", "tiempo.año"] {
        registry.register(alias, anio);
    }
}

/// `var, fmt`: the variable keeps identifier characters only, the format
/// keeps alphanumerics upper-cased.
fn parse_arguments(raw: &str) -> (String, String) {
    let (var, fmt) = raw.split_once(',').unwrap_or((raw, ""));
    let fmt = fmt
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect();
    (clean_identifier(var), fmt)
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_hour(at: &NaiveDateTime, fmt: &str) -> String {
    match fmt {
        "H" => format!("{:02}", at.hour()),
        "HM" => format!("{:02}:{:02}", at.hour(), at.minute()),
        _ => format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second()),
    }
}

pub fn format_date(at: &NaiveDateTime, fmt: &str) -> String {
    match fmt {
        "D" => at.day().to_string(),
        "DM" => format!("{:02}/{:02}", at.day(), at.month()),
        _ => format!("{:02}/{:02}/{}", at.day(), at.month(), at.year()),
    }
}

fn hora(ctx: &mut ModuleContext<'_>, raw: &str) {
    let (var, fmt) = parse_arguments(raw);
    if !var.is_empty() {
        ctx.memory.write_text(&var, &format_hour(&now(), &fmt), false);
    }
}

fn fecha(ctx: &mut ModuleContext<'_>, raw: &str) {
    let (var, fmt) = parse_arguments(raw);
    if !var.is_empty() {
        ctx.memory.write_text(&var, &format_date(&now(), &fmt), false);
    }
}

fn anio(ctx: &mut ModuleContext<'_>, raw: &str) {
    let (var, _) = parse_arguments(raw);
    if !var.is_empty() {
        ctx.memory.write_number(&var, f64::from(now().year()), false);
    }
}


//==================================================
// End of file
//==================================================
