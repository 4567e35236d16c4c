//==================================================
// File: script/statement.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Line classification
// Objective: Turn each trimmed source line into a tagged statement once,
//            so the engine never re-parses keywords while running
//==================================================

use crate::eval::{find_unquoted, split_top_level, unquote};

//==================================================
// Section 1.0 - Statement Types
//==================================================

/// Declared kind of a `vn` / `vt` binding or an `ln` / `lt` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Text,
}

/// Name and parameter names of a `funcion` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If { condition: String },
    Else,
    EndIf,
    While { condition: String },
    EndWhile,
    ForEach { variable: String, list: String },
    EndForEach,
    Count { variable: String, start: String, end: String },
    EndCount,
    Function { signature: Option<FunctionSignature> },
    EndFunction,
    Return { expr: String },
    Import { module: String },
    Show { expr: String },
    ListLiteral { kind: ValueKind, name: String, items: Vec<String> },
    ListMethod { list: String, method: String, argument: String },
    Assign { declared: Option<ValueKind>, name: String, value: String },
    Input { declared: Option<ValueKind>, name: String, prompt: String },
    /// Anything else. Module commands are resolved at run time by keyword.
    Other,
}

//==================================================
// Section 2.0 - Lexical Pieces
//==================================================

/// Leading keyword of a line: the first whitespace-separated token, cut at
/// its first `(`.
pub fn keyword(text: &str) -> &str {
    let token = text.split_whitespace().next().unwrap_or("");
    match token.find('(') {
        Some(open) => &token[..open],
        None => token,
    }
}

/// Text between the first `(` and the last `)`, or empty.
pub fn paren_body(text: &str) -> &str {
    match (text.find('('), text.rfind(')')) {
        (Some(open), Some(close)) if close > open => &text[open + 1..close],
        _ => "",
    }
}

/// Position of the assignment `=`: the first unquoted `=` that is not part
/// of a comparison operator.
fn assignment_position(text: &str) -> Option<usize> {
    let pos = find_unquoted(text, "=")?;
    let before = text[..pos].chars().next_back();
    let after = text[pos + 1..].chars().next();
    if matches!(before, Some('=' | '!' | '<' | '>')) || after == Some('=') {
        return None;
    }
    Some(pos)
}

fn declared_kind(token: &str) -> Option<ValueKind> {
    match token {
        "vn" => Some(ValueKind::Number),
        "vt" => Some(ValueKind::Text),
        _ => None,
    }
}

//==================================================
// Section 3.0 - Classification
//==================================================

impl Statement {
    /// Classifies one trimmed, comment-free line.
    pub fn classify(text: &str) -> Statement {
        let keyword = keyword(text);
        match keyword {
            "si" => Statement::If {
                condition: paren_body(text).to_string(),
            },
            "sino" => Statement::Else,
            "si!" => Statement::EndIf,
            "mientras" => Statement::While {
                condition: paren_body(text).to_string(),
            },
            "mientras!" => Statement::EndWhile,
            "cada" => parse_for_each(paren_body(text)),
            "cada!" => Statement::EndForEach,
            "contar" => parse_count(paren_body(text)),
            "contar!" => Statement::EndCount,
            "funcion" => Statement::Function {
                signature: parse_signature(text),
            },
            "funcion!" => Statement::EndFunction,
            "retornar" => Statement::Return {
                expr: text["retornar".len()..].trim().to_string(),
            },
            "importar" => {
                let module = paren_body(text).trim();
                Statement::Import {
                    module: unquote(module).unwrap_or(module).trim().to_string(),
                }
            }
            "mostrar" => Statement::Show {
                expr: paren_body(text).to_string(),
            },
            "ln" | "lt" if text.contains('[') => {
                let kind = if keyword == "ln" {
                    ValueKind::Number
                } else {
                    ValueKind::Text
                };
                parse_list_literal(text, kind).unwrap_or(Statement::Other)
            }
            _ if keyword.contains('.') && !keyword.contains('=') => {
                parse_list_method(text, keyword).unwrap_or(Statement::Other)
            }
            _ => parse_assignment(text).unwrap_or(Statement::Other),
        }
    }
}

fn parse_for_each(body: &str) -> Statement {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    let variable = tokens.first().copied().unwrap_or("").to_string();
    let list = match tokens.iter().position(|t| *t == "en") {
        Some(at) => tokens.get(at + 1).copied(),
        None => tokens.get(2).copied(),
    }
    .unwrap_or("")
    .to_string();
    Statement::ForEach { variable, list }
}

/// `v de ini a fin`. Bounds may be expressions with spaces; without the
/// `de` / `a` markers the positional form `v _ ini _ fin` is used.
fn parse_count(body: &str) -> Statement {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    let variable = tokens.first().copied().unwrap_or("").to_string();
    let de = tokens.iter().position(|t| *t == "de");
    // The start bound owns at least one token.
    let a = de.and_then(|de| {
        tokens
            .get(de + 2..)?
            .iter()
            .position(|t| *t == "a")
            .map(|offset| de + 2 + offset)
    });
    let (start, end) = match (de, a) {
        (Some(de), Some(a)) => (tokens[de + 1..a].join(" "), tokens[a + 1..].join(" ")),
        _ => (
            tokens.get(2).copied().unwrap_or("").to_string(),
            tokens.get(4).copied().unwrap_or("").to_string(),
        ),
    };
    Statement::Count {
        variable,
        start,
        end,
    }
}

/// `funcion nombre(tipo a, b)`: each parameter keeps its last token.
fn parse_signature(text: &str) -> Option<FunctionSignature> {
    let open = text.find('(')?;
    let close = open + text[open..].find(')')?;
    let name = text[..open].split_whitespace().nth(1)?.to_string();
    let params = text[open + 1..close]
        .split(',')
        .filter_map(|decl| decl.split_whitespace().last())
        .map(str::to_string)
        .collect();
    Some(FunctionSignature { name, params })
}

fn parse_list_literal(text: &str, kind: ValueKind) -> Option<Statement> {
    let eq = text.find('=')?;
    let name = text[..eq].split_whitespace().nth(1)?.to_string();
    let rest = &text[eq + 1..];
    let open = rest.find('[')?;
    let close = rest.rfind(']')?;
    if close < open {
        return None;
    }
    let items = split_top_level(&rest[open + 1..close], ',')
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    Some(Statement::ListLiteral { kind, name, items })
}

fn parse_list_method(text: &str, keyword: &str) -> Option<Statement> {
    let (list, method) = keyword.split_once('.')?;
    Some(Statement::ListMethod {
        list: list.to_string(),
        method: method.to_string(),
        argument: paren_body(text).to_string(),
    })
}

fn parse_assignment(text: &str) -> Option<Statement> {
    let eq = assignment_position(text)?;
    let lhs: Vec<&str> = text[..eq].split_whitespace().collect();
    let (declared, name) = match lhs.as_slice() {
        [name] => (None, *name),
        [kind, name] => (Some(declared_kind(kind)?), *name),
        _ => return None,
    };
    let value = text[eq + 1..].trim();
    if keyword(value) == "entrada" {
        return Some(Statement::Input {
            declared,
            name: name.to_string(),
            prompt: paren_body(value).to_string(),
        });
    }
    Some(Statement::Assign {
        declared,
        name: name.to_string(),
        value: value.to_string(),
    })
}


//==================================================
// End of file
//==================================================
