//! The option descriptor table: `spec.md` §4.2, built by scanning the
//! doc's option-description lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::doc;
use crate::leaf::Value;

static DEFAULT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[default: (.*)\]").expect("static regex"));

/// One parsed option-description record.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub short: Option<String>,
    pub long: Option<String>,
    pub argcount: u8,
    pub default: Value,
}

impl Descriptor {
    pub fn name(&self) -> Option<&str> {
        self.long.as_deref().or(self.short.as_deref())
    }

    /// Parse one descriptor line, e.g. `"-v, --verbose  Be verbose."`
    /// or `"--speed=<kn>  Speed in knots. [default: 10]"`.
    ///
    /// Grounded on `docopt.py`'s `option()`: split on the first run of
    /// two-or-more spaces into an options segment and a description;
    /// normalize `,`/`=` to whitespace in the options segment; a bare
    /// (non-dash-prefixed) token implies `argcount = 1`.
    pub fn parse_line(line: &str) -> Descriptor {
        let trimmed = line.trim();
        let (options_segment, description) = split_two_spaces(trimmed);

        let normalized = options_segment.replace(',', " ").replace('=', " ");
        let mut short = None;
        let mut long = None;
        let mut argcount = 0u8;

        for token in normalized.split_whitespace() {
            if let Some(rest) = token.strip_prefix("--") {
                long = Some(format!("--{rest}"));
            } else if let Some(rest) = token.strip_prefix('-') {
                short = Some(format!("-{rest}"));
            } else {
                argcount = 1;
            }
        }

        let default = if argcount == 1 {
            match DEFAULT_TAG.captures(description) {
                Some(caps) => Value::Str(caps[1].to_string()),
                None => Value::Bool(false),
            }
        } else {
            Value::Bool(false)
        };

        Descriptor {
            short,
            long,
            argcount,
            default,
        }
    }
}

fn split_two_spaces(line: &str) -> (&str, &str) {
    match line.find("  ") {
        Some(idx) => {
            let options = &line[..idx];
            let rest = line[idx..].trim_start();
            (options, rest)
        }
        None => (line, ""),
    }
}

/// The full option descriptor table, parsed once from the developer's
/// doc string.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub descriptors: Vec<Descriptor>,
}

impl Table {
    pub fn from_doc(full_doc: &str) -> Table {
        let descriptors = doc::option_description_lines(full_doc)
            .iter()
            .map(|line| Descriptor::parse_line(line))
            .collect();
        Table { descriptors }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }

    /// All descriptors whose short form is exactly `name`. More than
    /// one means the doc string itself declares the same short option
    /// twice — a developer-side bug, not a user-side ambiguity like
    /// long-option prefixes.
    pub fn by_short(&self, name: &str) -> Vec<&Descriptor> {
        self.descriptors
            .iter()
            .filter(|d| d.short.as_deref() == Some(name))
            .collect()
    }

    pub fn by_long(&self, name: &str) -> Option<&Descriptor> {
        self.descriptors
            .iter()
            .find(|d| d.long.as_deref() == Some(name))
    }

    /// All descriptors whose long form, dashes stripped, starts with
    /// `raw` (prefix match, `spec.md` §4.3.1).
    pub fn long_prefix_matches(&self, raw: &str) -> Vec<&Descriptor> {
        self.descriptors
            .iter()
            .filter(|d| {
                d.long
                    .as_deref()
                    .map(|l| l.trim_start_matches('-').starts_with(raw))
                    .unwrap_or(false)
            })
            .collect()
    }
}
