//! Converts a runtime argument vector into a flat sequence of typed
//! leaves, per `spec.md` §4.3. Grounded on `docopt.py`'s `parse_args`.

use crate::descriptor::Table;
use crate::error::Error;
use crate::leaf::Leaf;
use crate::option_lexer::{parse_long, parse_shorts};
use crate::token_stream::TokenStream;

/// Lex `argv` against `table`, producing leaves in argv order.
pub fn lex(argv: &[String], table: &Table, usage: &str) -> Result<Vec<Leaf>, Error> {
    let mut tokens = TokenStream::from_tokens(argv.iter().cloned());
    let mut out = Vec::new();

    while let Some(tok) = tokens.consume(None) {
        if tok == "--" {
            log::trace!("argv lexer: -- terminator, remaining tokens are raw positionals");
            for rest in tokens.remaining().to_vec() {
                out.push(Leaf::raw_argument(rest));
            }
            break;
        } else if let Some(raw) = tok.strip_prefix("--") {
            let leaf = parse_long(raw, table, &mut tokens, false, usage)?;
            log::trace!("argv lexer: long option {tok:?} -> {leaf:?}");
            out.push(leaf);
        } else if tok.starts_with('-') && tok != "-" {
            let raw = &tok[1..];
            let leaves = parse_shorts(raw, table, &mut tokens, false, usage)?;
            log::trace!("argv lexer: short stack {tok:?} -> {leaves:?}");
            out.extend(leaves);
        } else {
            out.push(Leaf::raw_argument(tok));
        }
    }

    Ok(out)
}
