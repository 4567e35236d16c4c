//==================================================
// File: eval/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Expression evaluation for RedCode
// Objective: Arithmetic, text and condition evaluators plus the lexical
//            helpers they share (smart splitting, literals, formatting)
//==================================================

pub mod condition;
pub mod math;
pub mod text;

//==================================================
// Section 1.0 - Number Rendering
//==================================================

/// Renders a number with six fixed decimals, then drops trailing zeros and
/// a dangling decimal point: `68000.0` prints as `68000`, `2.5` as `2.5`.
pub fn format_number(value: f64) -> String {
    // Avoid printing "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    let mut rendered = format!("{value:.6}");
    if rendered.contains('.') {
        let kept = rendered.trim_end_matches('0').len();
        rendered.truncate(kept);
        if rendered.ends_with('.') {
            rendered.pop();
        }
    }
    rendered
}

/// Renders a numeric list as `[1, 2, 3]`.
pub fn format_number_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format_number(*v)).collect();
    format!("[{}]", items.join(", "))
}

/// Renders a text list as `["a", "b"]`.
pub fn format_text_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
    format!("[{}]", items.join(", "))
}

//==================================================
// Section 2.0 - Lexical Helpers
//==================================================

/// Splits `source` on `delimiter`, ignoring delimiters inside double quotes,
/// parentheses or brackets. Always yields at least one (possibly empty) part.
pub fn split_top_level(source: &str, delimiter: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut parens = 0i32;
    let mut brackets = 0i32;

    for c in source.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => parens += 1,
            ')' if !in_quotes => parens -= 1,
            '[' if !in_quotes => brackets += 1,
            ']' if !in_quotes => brackets -= 1,
            _ => {}
        }
        if c == delimiter && !in_quotes && parens == 0 && brackets == 0 {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

/// Splits the text between a call's parentheses into raw arguments. An
/// empty argument list yields no arguments.
pub fn split_call_args(inner: &str) -> Vec<String> {
    let args = split_top_level(inner, ',');
    if args.len() == 1 && args[0].trim().is_empty() {
        Vec::new()
    } else {
        args
    }
}

/// Returns the contents of a double-quoted literal.
pub fn unquote(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// Splits `name(args)` into its name and the text between the first `(` and
/// the last `)`.
pub fn call_parts(token: &str) -> Option<(&str, &str)> {
    let open = token.find('(')?;
    let close = token.rfind(')')?;
    if close <= open {
        return None;
    }
    Some((token[..open].trim(), &token[open + 1..close]))
}

/// Splits `name[index]` into the list name and the index expression.
pub fn index_parts(token: &str) -> Option<(&str, &str)> {
    let open = token.find('[')?;
    let rest = &token[open + 1..];
    let inner = match rest.find(']') {
        Some(close) => &rest[..close],
        None => rest,
    };
    Some((token[..open].trim(), inner))
}

/// Finds `needle` outside double-quoted text.
pub fn find_unquoted(haystack: &str, needle: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (pos, c) in haystack.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
            continue;
        }
        if !in_quotes && haystack[pos..].starts_with(needle) {
            return Some(pos);
        }
    }
    None
}

//==================================================
// Section 3.0 - Numeric Literals
//==================================================

/// Parses the longest numeric prefix of `text` (after leading whitespace):
/// optional sign, digits, fraction and exponent. `"12abc"` yields 12.
pub fn parse_number_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end].parse().ok()
}

/// Parses `text` only when the whole (trimmed) string is a number.
pub fn parse_number_exact(text: &str) -> Option<f64> {
    let text = text.trim();
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(format_number(68000.0), "68000");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn lists_render_as_literals() {
        assert_eq!(format_number_list(&[1.0, 2.0, 3.0]), "[1, 2, 3]");
        assert_eq!(
            format_text_list(&["a".to_string(), "b".to_string()]),
            "[\"a\", \"b\"]"
        );
        assert_eq!(format_number_list(&[]), "[]");
    }

    #[test]
    fn split_respects_quotes_and_nesting() {
        let parts = split_top_level(r#""a,b", f(1, 2), x[1,2], 4"#, ',');
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], r#""a,b""#);
        assert_eq!(parts[1].trim(), "f(1, 2)");
    }

    #[test]
    fn empty_argument_lists_have_no_arguments() {
        assert!(split_call_args("  ").is_empty());
        assert_eq!(split_call_args("a, b").len(), 2);
    }

    #[test]
    fn numeric_prefixes_follow_strtod() {
        assert_eq!(parse_number_prefix("12abc"), Some(12.0));
        assert_eq!(parse_number_prefix("-2.5e3"), Some(-2500.0));
        assert_eq!(parse_number_prefix("3e"), Some(3.0));
        assert_eq!(parse_number_prefix(".5"), Some(0.5));
        assert_eq!(parse_number_prefix("abc"), None);
        assert_eq!(parse_number_prefix("-"), None);
    }

    #[test]
    fn exact_parse_rejects_words() {
        assert_eq!(parse_number_exact(" 42 "), Some(42.0));
        assert_eq!(parse_number_exact("42x"), None);
        assert_eq!(parse_number_exact("inf"), None);
    }

    #[test]
    fn call_and_index_parts() {
        assert_eq!(call_parts("suma(1, 2)"), Some(("suma", "1, 2")));
        assert_eq!(call_parts("suma"), None);
        assert_eq!(index_parts("lista[i + 1]"), Some(("lista", "i + 1")));
    }

    #[test]
    fn unquoted_search_skips_strings() {
        assert_eq!(find_unquoted(r#""a==b" == x"#, "=="), Some(7));
        assert_eq!(find_unquoted(r#""<" < x"#, "<"), Some(4));
    }
}

//==================================================
// End of file
//==================================================
