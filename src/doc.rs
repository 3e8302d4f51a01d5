//! Pulling the "Usage:" body and option-description lines out of the
//! developer's full help text. Grounded on `original_source/docopt.py`'s
//! `printable_usage`, `formal_usage`, and `parse_doc_options`.

use std::sync::LazyLock;

use regex::Regex;

static USAGE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)usage:").expect("static regex"));
static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("static regex"));

/// Isolate the "Usage:" section: the text between a case-insensitive
/// `usage:` header and the next blank line, header included. Per
/// `spec.md` §6's help-text contract.
pub fn usage_section(full_doc: &str) -> Option<String> {
    let m = USAGE_HEADER.find(full_doc)?;
    let after_header = &full_doc[m.start()..];
    let body = match BLANK_LINE.find(after_header) {
        Some(blank) => &after_header[..blank.start()],
        None => after_header,
    };
    Some(body.trim().to_string())
}

/// Drop the leading `usage:` token and the program name, and replace
/// any further occurrence of the program name with `|` so multi-line
/// invocations parse as alternation. Mirrors `docopt.py`'s
/// `formal_usage`.
pub fn formal_usage(usage_section: &str) -> String {
    let mut words = usage_section.split_whitespace();
    words.next(); // "usage:" (or "Usage:", etc.)
    let program = match words.next() {
        Some(p) => p,
        None => return String::new(),
    };
    words
        .map(|w| if w == program { "|" } else { w })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split the full doc text on lines that begin (after indentation)
/// with `-`, returning each such line's raw text including the
/// leading `-`. Mirrors `docopt.py`'s
/// `re.split('^ *-|\n *-', doc)[1:]` plus the `'-' + s` rejoin.
pub fn option_description_lines(full_doc: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in full_doc.lines() {
        let trimmed = raw_line.trim_start();
        if trimmed.starts_with('-') {
            lines.push(trimmed.to_string());
        }
    }
    lines
}
