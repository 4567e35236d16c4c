//==================================================
// File: script/linker.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Control-flow linking
// Objective: One pass over the classified lines that pairs openers with
//            closers into a jump table and collects function definitions
//==================================================

use std::collections::HashMap;

use tracing::debug;

use super::Line;
use super::statement::Statement;

//==================================================
// Section 1.0 - Jump Table
//==================================================

/// Line index of a control construct mapped to the line execution continues at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    targets: HashMap<usize, usize>,
}

impl JumpTable {
    pub fn get(&self, line: usize) -> Option<usize> {
        self.targets.get(&line).copied()
    }

    pub fn record(&mut self, from: usize, to: usize) {
        self.targets.insert(from, to);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Entries ordered by source line.
    pub fn entries(&self) -> Vec<(usize, usize)> {
        let mut entries: Vec<(usize, usize)> =
            self.targets.iter().map(|(from, to)| (*from, *to)).collect();
        entries.sort_unstable();
        entries
    }
}

//==================================================
// Section 2.0 - Function Table
//==================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    /// First line of the body.
    pub entry: usize,
    /// The `funcion!` line, when the definition is closed.
    pub end: Option<usize>,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionInfo>,
}

impl FunctionTable {
    pub fn get(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//==================================================
// Section 3.0 - Linking Pass
//==================================================

#[derive(Debug, Clone, Default)]
pub struct Links {
    pub jumps: JumpTable,
    pub functions: FunctionTable,
}

/// Pairs every opener with its closer. A closer with nothing pending is
/// ignored; an opener that is never closed gets no jump entry.
pub fn link(lines: &[Line]) -> Links {
    let mut links = Links::default();
    let mut conditionals: Vec<usize> = Vec::new();
    let mut loops: Vec<usize> = Vec::new();
    let mut functions: Vec<(usize, Option<String>)> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        match line.statement() {
            Statement::If { .. } => conditionals.push(index),
            Statement::Else => {
                if let Some(origin) = conditionals.pop() {
                    links.jumps.record(origin, index + 1);
                } else {
                    debug!(line = index, "sino without pending si");
                }
                conditionals.push(index);
            }
            Statement::EndIf => match conditionals.pop() {
                Some(origin) => links.jumps.record(origin, index),
                None => debug!(line = index, "si! without pending si"),
            },
            Statement::While { .. } | Statement::ForEach { .. } | Statement::Count { .. } => {
                loops.push(index)
            }
            Statement::EndWhile | Statement::EndForEach | Statement::EndCount => {
                match loops.pop() {
                    Some(origin) => {
                        links.jumps.record(index, origin);
                        links.jumps.record(origin, index + 1);
                    }
                    None => debug!(line = index, "loop closer without pending opener"),
                }
            }
            Statement::Function { signature } => {
                let name = signature.as_ref().map(|signature| {
                    links.functions.functions.insert(
                        signature.name.clone(),
                        FunctionInfo {
                            entry: index + 1,
                            end: None,
                            params: signature.params.clone(),
                        },
                    );
                    signature.name.clone()
                });
                functions.push((index, name));
            }
            Statement::EndFunction => match functions.pop() {
                Some((origin, name)) => {
                    links.jumps.record(origin, index);
                    if let Some(info) = name
                        .as_deref()
                        .and_then(|name| links.functions.functions.get_mut(name))
                    {
                        if info.entry == origin + 1 {
                            info.end = Some(index);
                        }
                    }
                }
                None => debug!(line = index, "funcion! without pending funcion"),
            },
            _ => {}
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;

    fn link_source(source: &str) -> Links {
        let script = Script::parse(source);
        let lines: Vec<Line> = script.lines().iter().map(|text| Line::new(text)).collect();
        link(&lines)
    }

    #[test]
    fn if_else_chain() {
        let links = link_source("si(x)\na = 1\nsino\na = 2\nsi!\n");
        assert_eq!(links.jumps.get(0), Some(3));
        assert_eq!(links.jumps.get(2), Some(4));
    }

    #[test]
    fn if_without_else_jumps_to_closer() {
        let links = link_source("si(x)\na = 1\nsi!\n");
        assert_eq!(links.jumps.entries(), vec![(0, 2)]);
    }

    #[test]
    fn loops_record_both_directions() {
        let links = link_source("mientras(x)\ncontar(i de 1 a 3)\ncontar!\nmientras!\n");
        assert_eq!(links.jumps.get(1), Some(3));
        assert_eq!(links.jumps.get(2), Some(1));
        assert_eq!(links.jumps.get(0), Some(4));
        assert_eq!(links.jumps.get(3), Some(0));
    }

    #[test]
    fn functions_register_entry_end_and_params() {
        let links = link_source("funcion suma(vn a, vn b)\nretornar a + b\nfuncion!\nmostrar(1)\n");
        let info = links.functions.get("suma").expect("registered");
        assert_eq!(info.entry, 1);
        assert_eq!(info.end, Some(2));
        assert_eq!(info.params, vec!["a", "b"]);
        assert_eq!(links.jumps.get(0), Some(2));
    }

    #[test]
    fn malformed_nesting_is_tolerated() {
        let links = link_source("si!\nmientras!\nfuncion!\nsi(x)\n");
        assert!(links.jumps.is_empty());
    }
}

//==================================================
// End of file
//==================================================
