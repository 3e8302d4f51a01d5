//! The usage lexer and pattern parser: `spec.md` §4.4. Grounded on
//! `docopt.py`'s `parse_pattern`/`parse_expr`/`parse_seq`/`parse_atom`.

use crate::descriptor::Table;
use crate::doc;
use crate::error::{DeveloperError, Error};
use crate::leaf::{Leaf, Pool};
use crate::option_lexer::{parse_long, parse_shorts};
use crate::pattern::Pattern;
use crate::token_stream::TokenStream;

/// Parse the full doc's usage section into a `Required` root pattern
/// plus the leaf pool it references. `table` supplies the descriptors
/// that long/short option tokens in the usage text must resolve
/// against.
pub fn parse(full_doc: &str, table: &Table) -> Result<(Pattern, Pool), Error> {
    let section = doc::usage_section(full_doc)
        .ok_or_else(|| DeveloperError::new("doc has no \"usage:\" section"))?;
    let formal = doc::formal_usage(&section);
    let spaced = pad_metachars(&formal);
    let mut tokens = TokenStream::from_str(&spaced);
    let mut pool = Pool::new();

    let result = parse_expr(&mut tokens, table, &mut pool)?;
    if tokens.peek(None).is_some() {
        return Err(DeveloperError::new(format!(
            "unexpected token {:?} in usage pattern",
            tokens.peek(None)
        ))
        .into());
    }
    Ok((Pattern::Required(result), pool))
}

fn pad_metachars(source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i..].starts_with(&['.', '.', '.']) {
            out.push(' ');
            out.push_str("...");
            out.push(' ');
            i += 3;
        } else if "[]()|".contains(chars[i]) {
            out.push(' ');
            out.push(chars[i]);
            out.push(' ');
            i += 1;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// `expr ::= seq ( '|' seq )*`
fn parse_expr(tokens: &mut TokenStream, table: &Table, pool: &mut Pool) -> Result<Vec<Pattern>, Error> {
    let mut seq = parse_seq(tokens, table, pool)?;

    if tokens.peek(None) != Some("|") {
        return Ok(seq);
    }

    if seq.len() > 1 {
        seq = vec![Pattern::Required(seq)];
    }
    let mut result = seq;
    while tokens.peek(None) == Some("|") {
        tokens.consume(None);
        let mut next = parse_seq(tokens, table, pool)?;
        if next.len() > 1 {
            next = vec![Pattern::Required(next)];
        }
        result.extend(next);
    }

    if result.len() == 1 {
        Ok(result)
    } else {
        Ok(vec![Pattern::Either(result)])
    }
}

/// `seq ::= ( atom [ '...' ] )*`, terminated by `)`, `]`, `|`, or end.
fn parse_seq(tokens: &mut TokenStream, table: &Table, pool: &mut Pool) -> Result<Vec<Pattern>, Error> {
    let mut result = Vec::new();
    loop {
        match tokens.peek(None) {
            None | Some(")") | Some("]") | Some("|") => break,
            _ => {}
        }
        let mut atom = parse_atom(tokens, table, pool)?;
        if tokens.peek(None) == Some("...") {
            tokens.consume(None);
            if atom.len() == 1 {
                atom = vec![Pattern::OneOrMore(Box::new(atom.into_iter().next().unwrap()))];
            } else {
                atom = vec![Pattern::OneOrMore(Box::new(Pattern::Required(atom)))];
            }
        }
        result.extend(atom);
    }
    Ok(result)
}

/// `atom ::= '(' expr ')' | '[' expr ']' | '[options]' | '--' |
/// long-option | short-stack | argument | command`
fn parse_atom(tokens: &mut TokenStream, table: &Table, pool: &mut Pool) -> Result<Vec<Pattern>, Error> {
    let token = tokens
        .consume(None)
        .ok_or_else(|| DeveloperError::new("unexpected end of usage pattern"))?;

    match token.as_str() {
        "(" => {
            let inner = parse_expr(tokens, table, pool)?;
            if tokens.consume(None).as_deref() != Some(")") {
                return Err(DeveloperError::new("unmatched '(' in usage pattern").into());
            }
            Ok(vec![Pattern::Required(inner)])
        }
        "[" => {
            if tokens.peek(None) == Some("options") {
                tokens.consume(None);
                if tokens.consume(None).as_deref() != Some("]") {
                    return Err(DeveloperError::new("unmatched '[' in usage pattern").into());
                }
                return Ok(vec![Pattern::Optional(vec![Pattern::AnyOptions])]);
            }
            let inner = parse_expr(tokens, table, pool)?;
            if tokens.consume(None).as_deref() != Some("]") {
                return Err(DeveloperError::new("unmatched '[' in usage pattern").into());
            }
            Ok(vec![Pattern::Optional(inner)])
        }
        "--" => Ok(vec![]),
        _ if token.starts_with("--") => {
            let leaf = parse_long(&token[2..], table, tokens, true, "")?;
            Ok(vec![Pattern::Leaf(pool.insert(leaf))])
        }
        _ if token.starts_with('-') && token != "-" => {
            let leaves = parse_shorts(&token[1..], table, tokens, true, "")?;
            Ok(leaves
                .into_iter()
                .map(|l| Pattern::Leaf(pool.insert(l)))
                .collect())
        }
        _ if is_argument_token(&token) => Ok(vec![Pattern::Leaf(pool.insert(Leaf::argument(token)))]),
        _ => Ok(vec![Pattern::Leaf(pool.insert(Leaf::command(token)))]),
    }
}

fn is_argument_token(token: &str) -> bool {
    (token.starts_with('<') && token.ends_with('>'))
        || (token.chars().any(|c| c.is_alphabetic()) && token.chars().all(|c| !c.is_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::leaf::Leaf;

    fn table_with_verbose_and_file() -> Table {
        Table {
            descriptors: vec![
                Descriptor::parse_line("-v, --verbose  Be verbose."),
                Descriptor::parse_line("-f, --file=<f>  [default: x]"),
            ],
        }
    }

    #[test]
    fn pad_metachars_spaces_brackets_pipe_and_ellipsis() {
        let out = pad_metachars("(-a|-b)<x>...");
        assert_eq!(
            out.split_whitespace().collect::<Vec<_>>(),
            vec!["(", "-a", "|", "-b", ")", "<x>", "..."]
        );
    }

    #[test]
    fn simple_required_sequence() {
        let doc = "Usage: prog --verbose <f>\n\nOptions:\n  -v, --verbose  Be verbose.\n  -f, --file=<f>  A file.\n";
        let table = Table::from_doc(doc);
        let (tree, pool) = parse(doc, &table).unwrap();
        match tree {
            Pattern::Required(children) => {
                assert_eq!(children.len(), 2);
                match &children[0] {
                    Pattern::Leaf(id) => assert!(matches!(pool.get(*id), Leaf::Option { .. })),
                    _ => panic!(),
                }
                match &children[1] {
                    Pattern::Leaf(id) => assert!(matches!(pool.get(*id), Leaf::Argument { .. })),
                    _ => panic!(),
                }
            }
            _ => panic!("expected Required root"),
        }
    }

    #[test]
    fn optional_group_wraps_in_optional() {
        let doc = "Usage: prog [-v]\n\nOptions:\n  -v, --verbose  Be verbose.\n";
        let table = Table::from_doc(doc);
        let (tree, _pool) = parse(doc, &table).unwrap();
        match tree {
            Pattern::Required(children) => {
                assert_eq!(children.len(), 1);
                assert!(matches!(children[0], Pattern::Optional(_)));
            }
            _ => panic!(),
        }
    }

    #[test]
    fn options_shortcut_expands_to_any_options() {
        let doc = "Usage: prog [options] <f>\n\nOptions:\n  -v, --verbose  Be verbose.\n";
        let table = Table::from_doc(doc);
        let (tree, _pool) = parse(doc, &table).unwrap();
        match tree {
            Pattern::Required(children) => match &children[0] {
                Pattern::Optional(inner) => assert_eq!(inner, &vec![Pattern::AnyOptions]),
                _ => panic!(),
            },
            _ => panic!(),
        }
    }

    #[test]
    fn alternation_wraps_multi_element_branches_in_required() {
        let doc = "Usage: prog (-a | -a -b)\n\nOptions:\n  -a  A.\n  -b  B.\n";
        let table = Table::from_doc(doc);
        let (tree, _pool) = parse(doc, &table).unwrap();
        match tree {
            Pattern::Required(children) => match &children[0] {
                Pattern::Required(inner) => match &inner[0] {
                    Pattern::Either(branches) => {
                        assert_eq!(branches.len(), 2);
                        assert!(matches!(branches[0], Pattern::Leaf(_)));
                        assert!(matches!(branches[1], Pattern::Required(_)));
                    }
                    _ => panic!(),
                },
                _ => panic!(),
            },
            _ => panic!(),
        }
    }

    #[test]
    fn repetition_wraps_preceding_atom_in_one_or_more() {
        let doc = "Usage: prog <f>...\n\n";
        let table = table_with_verbose_and_file();
        let (tree, _pool) = parse(doc, &table).unwrap();
        match tree {
            Pattern::Required(children) => assert!(matches!(children[0], Pattern::OneOrMore(_))),
            _ => panic!(),
        }
    }

    #[test]
    fn command_word_becomes_command_leaf() {
        let doc = "Usage: prog ship new <name>\n\n";
        let table = Table::default();
        let (tree, pool) = parse(doc, &table).unwrap();
        match tree {
            Pattern::Required(children) => {
                assert_eq!(children.len(), 3);
                match &children[0] {
                    Pattern::Leaf(id) => assert!(matches!(pool.get(*id), Leaf::Command { .. })),
                    _ => panic!(),
                }
            }
            _ => panic!(),
        }
    }

    #[test]
    fn usage_referencing_unknown_option_is_developer_error() {
        let doc = "Usage: prog --nope\n\n";
        let table = Table::default();
        let err = parse(doc, &table).unwrap_err();
        assert!(matches!(err, Error::Developer(_)));
    }
}
