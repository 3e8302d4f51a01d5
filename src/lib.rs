#![warn(missing_docs)]

//! # Introduction
//!
//! `usagematch` turns a program's own human-readable help text into a
//! command-line argument parser. You write a conventional "usage"
//! message describing the program's invocations, plus option
//! descriptions, the way you'd write it for a user anyway; this crate
//! derives a grammar from that text and matches the real argument
//! vector against it at runtime, producing a name → value mapping.
//!
//! There is no macro, no derive, and no builder for the grammar — the
//! doc string *is* the specification. This is deliberately unlike
//! [`just-getopt`](https://docs.rs/just-getopt), the crate this one
//! grew out of: that crate wants you to describe options
//! programmatically; this one wants you to describe them the way a
//! `--help` flag already does.
//!
//! # Example
//!
//! ```
//! use usagematch::{parse, Request};
//!
//! const DOC: &str = "\
//! Naval Fate.
//!
//! Usage:
//!   naval_fate ship new <name>...
//!   naval_fate ship move <name> <x> <y> [--speed=<kn>]
//!   naval_fate -h | --help
//!
//! Options:
//!   -h, --help     Show this screen.
//!   --speed=<kn>   Speed in knots [default: 10].
//! ";
//!
//! let argv: Vec<String> = vec!["ship".into(), "move".into(), "Enterprise".into(),
//!                               "1".into(), "2".into(), "--speed=20".into()];
//! match parse(DOC, &argv, true, None).unwrap() {
//!     Request::Matched(values) => {
//!         assert!(values.as_bool("ship"));
//!         assert!(values.as_bool("move"));
//!         assert_eq!(values.as_str("<name>"), Some("Enterprise"));
//!         assert_eq!(values.as_str("--speed"), Some("20"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Parsing Rules
//!
//! The grammar comes from the text between a case-insensitive
//! `usage:` header and the next blank line. Supported constructs:
//!
//!  - `(...)`: a required group — all of its members must appear.
//!  - `[...]`: an optional group — members may be omitted.
//!  - `[options]`: shorthand for "any option from the Options: list,
//!    in any order, any number of times."
//!  - `a | b`: alternation — exactly one side is chosen, picking
//!    whichever consumes the most of the actual argv.
//!  - `atom...`: one or more repetitions of the preceding atom.
//!  - `<name>` or `ALLCAPS`: a positional argument.
//!  - a bare word: a literal command, like `git`'s `commit` or `push`.
//!
//! Option descriptions (the `Options:` section, or any line starting
//! with `-` after indentation) give each option its short form, long
//! form, whether it takes a value, and an optional `[default: ...]`.
//!
//! See `spec.md`/`SPEC_FULL.md` in the repository for the full
//! grammar and matching semantics this crate implements.
//!
//! # Non-goals
//!
//! This crate does not validate argument *types* — everything is a
//! string, a list of strings, or a flag count. It does not perform
//! shell completion, and it does not load options from files or
//! environment variables.

mod argv_lexer;
mod descriptor;
mod doc;
mod error;
mod leaf;
mod matcher;
mod normalize;
mod option_lexer;
mod pattern;
mod result;
mod token_stream;
mod usage_lexer;

pub use descriptor::{Descriptor, Table as DescriptorTable};
pub use error::{DeveloperError, Error, UserError};
pub use leaf::Value;
pub use result::ValueMap;

/// What happened when [`parse`] ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// `-h`/`--help` was given: the caller should print the full doc
    /// text and exit successfully. Stdio/exit plumbing is out of
    /// scope for this crate (`spec.md` §1); this variant carries
    /// everything a caller needs to do it.
    Help(String),
    /// `--version` was given: the caller should print this string and
    /// exit successfully.
    Version(String),
    /// The argv matched the usage grammar.
    Matched(ValueMap),
}

/// Parse `argv` against the usage grammar and option descriptions
/// found in `doc`.
///
/// `help`, if true, makes a matched `-h`/`--help` short-circuit to
/// [`Request::Help`] before the full grammar is matched. `version`,
/// if given, does the same for `--version` with [`Request::Version`].
/// This mirrors `spec.md` §6's help/version side interfaces: the
/// checks run after argv lexing but before matching.
///
/// On a malformed argv, a missing required pattern, an unknown flag,
/// an ambiguous prefix, or leftover tokens, returns
/// [`Error::User`] carrying the printable usage text. On a usage
/// string that references an option never declared in the option
/// descriptions (or otherwise malformed doc), returns
/// [`Error::Developer`] — a bug in the calling program, not the
/// end user's command line.
pub fn parse(
    doc: &str,
    argv: &[String],
    help: bool,
    version: Option<&str>,
) -> Result<Request, Error> {
    let usage = doc::usage_section(doc)
        .ok_or_else(|| error::DeveloperError::new("doc has no \"usage:\" section"))?;
    let table = descriptor::Table::from_doc(doc);

    let argv_leaves = argv_lexer::lex(argv, &table, &usage)?;
    log::debug!("lexed {} argv leaves", argv_leaves.len());

    if help && has_matched_flag(&argv_leaves, Some("-h"), Some("--help")) {
        return Ok(Request::Help(doc.trim().to_string()));
    }
    if let Some(version) = version {
        if has_matched_flag(&argv_leaves, None, Some("--version")) {
            return Ok(Request::Version(version.to_string()));
        }
    }

    let (mut tree, pool) = usage_lexer::parse(doc, &table)?;
    let pool = normalize::normalize(&mut tree, pool);

    let (matched, residue, collected) =
        matcher::match_pattern(&tree, &pool, argv_leaves.clone(), Vec::new());

    if matched && residue.is_empty() {
        let map = result::assemble(&table, &argv_leaves, &tree, &pool, collected);
        Ok(Request::Matched(map))
    } else {
        log::debug!("match failed or left residue: {residue:?}");
        Err(error::UserError::new("usage error", usage).into())
    }
}

fn has_matched_flag(leaves: &[leaf::Leaf], short: Option<&str>, long: Option<&str>) -> bool {
    leaves.iter().any(|l| match l {
        leaf::Leaf::Option {
            short: s,
            long: lg,
            value,
            ..
        } => {
            (short.is_some() && s.as_deref() == short || long.is_some() && lg.as_deref() == long)
                && matches!(value, leaf::Value::Bool(true))
        }
        _ => false,
    })
}
