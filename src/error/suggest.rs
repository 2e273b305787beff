//! Fix-it hints attached to diagnostics
//!
//! Syntax errors get their hint from a fixed table keyed by a substring of
//! the message. Lexical errors are keyed by the offending character, and
//! undefined names are matched against declared ones by edit distance.

use strsim::levenshtein;

/// `(message fragment, hint)`; the first fragment contained in the message wins.
const SYNTAX_HINTS: &[(&str, &str)] = &[
    ("Expected '=' after", "Add '=' followed by a value"),
    ("Expected '[' after 'stdout'", "Write output as stdout[text {variable}]"),
    ("Expected ']' after stdout", "Close the output statement with ']'"),
    ("Expected variable name inside {}", "Put a variable name between '{' and '}'"),
    ("Expected '}'", "Close the interpolation or type annotation with '}'"),
    ("Expected variable name", "Variable names start with a letter or '_'"),
    ("Expected type", "Use one of the types: string, int, float, bool"),
    ("Expected ')'", "Close the parenthesized expression with ')'"),
    ("Expected ']' after '['", "Array declarations are written name[] = [...]"),
    ("Expected ']' after array", "Close the array with ']'"),
    ("Expected '[' after type", "Give the array size in brackets, e.g. {int}[10]"),
    ("Expected array literal", "Initialize arrays with [element1, element2, ...]"),
    ("Expected array size", "Array sizes are non-negative integer literals"),
    ("Expected array syntax", "Use name[] = [...] or name{type}[size]"),
    ("out of range", "Use a smaller number"),
    ("Expected expression", "Provide a literal, variable, or parenthesized expression"),
    (
        "Unexpected token at start of statement",
        "Statements start with 'new', 'bl', or 'stdout'",
    ),
];

/// Look up the hint for a syntax error message
pub fn syntax_hint(message: &str) -> &'static str {
    SYNTAX_HINTS
        .iter()
        .find(|(fragment, _)| message.contains(fragment))
        .map(|(_, hint)| *hint)
        .unwrap_or("")
}

/// Hint for a character the tokenizer could not place
pub fn lexical_hint(c: char) -> &'static str {
    match c {
        '!' => "Use '!=' for inequality; there is no negation operator",
        '\'' => "String literals use double quotes",
        '&' | '|' => "Logical operators are not supported",
        _ => "Remove this character",
    }
}

/// Up to three candidates within a length-scaled edit distance of `needle`.
pub fn similar_names<'a>(needle: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let max_dist = match needle.len() {
        0..=3 => 1,
        4..=6 => 2,
        _ => 3,
    };

    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter(|c| !c.is_empty() && *c != needle)
        .map(|c| (levenshtein(needle, c), c))
        .filter(|(d, _)| *d <= max_dist)
        .collect();
    scored.sort_by(|(da, a), (db, b)| da.cmp(db).then(a.cmp(b)));

    scored.into_iter().take(3).map(|(_, c)| c).collect()
}

pub fn did_you_mean<'a>(needle: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let names = similar_names(needle, candidates);
    match names.as_slice() {
        [] => None,
        [only] => Some(format!("did you mean `{}`?", only)),
        _ => Some(format!(
            "did you mean one of: {}?",
            names
                .iter()
                .map(|n| format!("`{}`", n))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}
