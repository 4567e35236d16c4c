//==================================================
// File: script/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: RedCode source handling
// Objective: Load and clean script text, classify lines, and hold the
//            linked program (lines, jump table, function table)
//==================================================

pub mod linker;
pub mod statement;

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::interpreter::errors::ScriptError;
use linker::{FunctionTable, JumpTable, link};
use statement::Statement;

//==================================================
// Section 1.0 - Source Text
//==================================================

/// Cleaned script text: comments removed, lines trimmed, blank lines dropped.
/// Indices into [`Script::lines`] are the program counter values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn parse(source: &str) -> Self {
        let lines = source
            .lines()
            .map(|raw| strip_comment(raw).trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Load {
            path: path.display().to_string(),
            source,
        })?;
        let script = Self::parse(&source);
        info!(path = %path.display(), lines = script.lines.len(), "script loaded");
        Ok(script)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cuts `line` at the first `//` outside double quotes.
pub fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut prev = '\0';
    for (pos, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '/' if prev == '/' && !in_quotes => return &line[..pos - 1],
            _ => {}
        }
        prev = c;
    }
    line
}

//==================================================
// Section 2.0 - Lines
//==================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    text: String,
    keyword: String,
    statement: Statement,
}

impl Line {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            keyword: statement::keyword(text).to_string(),
            statement: Statement::classify(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Raw argument text handed to module commands.
    pub fn arguments(&self) -> &str {
        statement::paren_body(&self.text)
    }
}

//==================================================
// Section 3.0 - Linked Program
//==================================================

/// A classified and linked script. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Program {
    lines: Vec<Line>,
    jumps: JumpTable,
    functions: FunctionTable,
}

impl Program {
    pub fn new(script: &Script) -> Self {
        let lines: Vec<Line> = script.lines().iter().map(|text| Line::new(text)).collect();
        let links = link(&lines);
        info!(
            lines = lines.len(),
            jumps = links.jumps.len(),
            functions = links.functions.len(),
            "program linked"
        );
        Self {
            lines,
            jumps: links.jumps,
            functions: links.functions,
        }
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(&Script::parse(source))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        Ok(Self::new(&Script::load(path)?))
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn jumps(&self) -> &JumpTable {
        &self.jumps
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Human-readable listing of lines, jumps and functions.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== lineas ==");
        for (index, line) in self.lines.iter().enumerate() {
            let _ = writeln!(out, "{index:>4} | {}", line.text());
        }
        let _ = writeln!(out, "== saltos ==");
        for (from, to) in self.jumps.entries() {
            let _ = writeln!(out, "{from:>4} -> {to}");
        }
        let _ = writeln!(out, "== funciones ==");
        for name in self.functions.names() {
            if let Some(info) = self.functions.get(name) {
                let end = info
                    .end
                    .map_or_else(|| "-".to_string(), |end| end.to_string());
                let _ = writeln!(
                    out,
                    "{name}({}) entrada={} fin={end}",
                    info.params.join(", "),
                    info.entry
                );
            }
        }
        out
    }
}


//==================================================
// End of file
//==================================================
