//! Long- and short-option lexing shared between the argv lexer
//! (`spec.md` §4.3) and the usage pattern parser (`spec.md` §4.4),
//! which parse options the same way but disagree on which error kind
//! an unresolved option raises. Grounded on `docopt.py`'s
//! `parse_long`/`parse_shorts` and on `just-getopt`'s
//! `is_long_option_prefix`/`get_short_option_series` family.

use crate::descriptor::Table;
use crate::error::{DeveloperError, Error, UserError};
use crate::leaf::{Leaf, Value};
use crate::token_stream::TokenStream;

/// Long-option lexing result: a single resolved [`Leaf::Option`], or
/// an error. `is_pattern` selects [`Error::Developer`] (usage text)
/// vs. [`Error::User`] (argv) per `spec.md` §4.4/§7.
pub fn parse_long(
    raw: &str,
    table: &Table,
    tokens: &mut TokenStream,
    is_pattern: bool,
    usage: &str,
) -> Result<Leaf, Error> {
    let (name, inline_value) = match raw.split_once('=') {
        Some((n, v)) => (n, Some(v.to_string())),
        None => (raw, None),
    };

    let matches = table.long_prefix_matches(name);
    let descriptor = match matches.as_slice() {
        [] => {
            return Err(if is_pattern {
                DeveloperError::new(format!(
                    "--{name} in usage is not mentioned in the option descriptions"
                ))
                .into()
            } else {
                UserError::new(format!("--{name} is not recognized"), usage).into()
            });
        }
        [one] => (*one).clone(),
        many => {
            let candidates = many
                .iter()
                .map(|d| d.long.clone().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(if is_pattern {
                DeveloperError::new(format!(
                    "--{name} in usage is not a unique prefix: {candidates}?"
                ))
                .into()
            } else {
                UserError::new(
                    format!("--{name} is ambiguous; candidates: {candidates}"),
                    usage,
                )
                .into()
            });
        }
    };

    let value = if descriptor.argcount == 1 {
        match inline_value {
            Some(v) => v,
            None => match tokens.consume(None) {
                Some(v) => v,
                None => {
                    let label = descriptor.long.clone().unwrap_or_else(|| format!("--{name}"));
                    return Err(if is_pattern {
                        DeveloperError::new(format!("{label} in usage requires argument")).into()
                    } else {
                        UserError::new(format!("{label} requires argument"), usage).into()
                    });
                }
            },
        }
    } else {
        if inline_value.is_some() {
            let label = descriptor.long.clone().unwrap_or_else(|| format!("--{name}"));
            return Err(if is_pattern {
                DeveloperError::new(format!("{label} in usage must not have an argument")).into()
            } else {
                UserError::new(format!("{label} must not have an argument"), usage).into()
            });
        }
        String::new()
    };

    let value = if descriptor.argcount == 1 {
        Value::Str(value)
    } else {
        Value::Bool(true)
    };

    Ok(Leaf::Option {
        short: descriptor.short.clone(),
        long: descriptor.long.clone(),
        argcount: descriptor.argcount,
        value,
    })
}

/// Short-stack lexing: `raw` is everything after the leading `-`.
/// Repeatedly resolves one character at a time per `spec.md` §4.3.2.
pub fn parse_shorts(
    raw: &str,
    table: &Table,
    tokens: &mut TokenStream,
    is_pattern: bool,
    usage: &str,
) -> Result<Vec<Leaf>, Error> {
    let mut remaining: Vec<char> = raw.chars().collect();
    let mut out = Vec::new();

    while !remaining.is_empty() {
        let c = remaining[0];
        let name = c.to_string();
        let descriptor = match table.by_short(&format!("-{name}")).as_slice() {
            [] => {
                return Err(if is_pattern {
                    DeveloperError::new(format!(
                        "-{name} in usage is not mentioned in the option descriptions"
                    ))
                    .into()
                } else {
                    UserError::new(format!("-{name} is not recognized"), usage).into()
                });
            }
            [one] => (*one).clone(),
            many => {
                return Err(DeveloperError::new(format!(
                    "-{name} is specified ambiguously {} times",
                    many.len()
                ))
                .into());
            }
        };
        remaining.remove(0);

        let value = if descriptor.argcount == 0 {
            Value::Bool(true)
        } else {
            let rest: String = remaining.drain(..).collect();
            let value = if !rest.is_empty() {
                rest
            } else {
                match tokens.consume(None) {
                    Some(v) => v,
                    None => {
                        return Err(if is_pattern {
                            DeveloperError::new(format!("-{name} in usage requires argument"))
                                .into()
                        } else {
                            UserError::new(format!("-{name} requires argument"), usage).into()
                        });
                    }
                }
            };
            Value::Str(value)
        };

        out.push(Leaf::Option {
            short: descriptor.short.clone(),
            long: descriptor.long.clone(),
            argcount: descriptor.argcount,
            value,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;

    fn table() -> Table {
        Table {
            descriptors: vec![
                Descriptor::parse_line("-v, --verbose  Be verbose."),
                Descriptor::parse_line("-f, --file=<f>  [default: x]"),
            ],
        }
    }

    #[test]
    fn long_flag_with_no_value() {
        let t = table();
        let mut ts = TokenStream::from_tokens(Vec::<String>::new());
        let leaf = parse_long("verbose", &t, &mut ts, false, "usage").unwrap();
        match leaf {
            Leaf::Option { value, argcount, .. } => {
                assert_eq!(argcount, 0);
                assert_eq!(value, Value::Bool(true));
            }
            _ => panic!(),
        }
    }

    #[test]
    fn long_value_from_next_token() {
        let t = table();
        let mut ts = TokenStream::from_tokens(["out.txt"]);
        let leaf = parse_long("file", &t, &mut ts, false, "usage").unwrap();
        match leaf {
            Leaf::Option { value, .. } => assert_eq!(value, Value::Str("out.txt".to_string())),
            _ => panic!(),
        }
    }

    #[test]
    fn long_value_inline_with_equals() {
        let t = table();
        let mut ts = TokenStream::from_tokens(Vec::<String>::new());
        let leaf = parse_long("file=out.txt", &t, &mut ts, false, "usage").unwrap();
        match leaf {
            Leaf::Option { value, .. } => assert_eq!(value, Value::Str("out.txt".to_string())),
            _ => panic!(),
        }
    }

    #[test]
    fn long_missing_argument_is_user_error() {
        let t = table();
        let mut ts = TokenStream::from_tokens(Vec::<String>::new());
        let err = parse_long("file", &t, &mut ts, false, "usage").unwrap_err();
        assert!(matches!(err, Error::User(_)));
    }

    #[test]
    fn unknown_long_is_user_error_in_argv_developer_error_in_pattern() {
        let t = table();
        let mut ts1 = TokenStream::from_tokens(Vec::<String>::new());
        assert!(matches!(
            parse_long("bogus", &t, &mut ts1, false, "usage").unwrap_err(),
            Error::User(_)
        ));
        let mut ts2 = TokenStream::from_tokens(Vec::<String>::new());
        assert!(matches!(
            parse_long("bogus", &t, &mut ts2, true, "usage").unwrap_err(),
            Error::Developer(_)
        ));
    }

    #[test]
    fn stacked_shorts_value_takes_rest_of_stack() {
        let t = table();
        let mut ts = TokenStream::from_tokens(Vec::<String>::new());
        let leaves = parse_shorts("f123", &t, &mut ts, false, "usage").unwrap();
        assert_eq!(leaves.len(), 1);
        match &leaves[0] {
            Leaf::Option { value, .. } => assert_eq!(*value, Value::Str("123".to_string())),
            _ => panic!(),
        }
    }

    #[test]
    fn stacked_short_with_ambiguous_descriptor_is_developer_error() {
        let t = Table {
            descriptors: vec![
                Descriptor::parse_line("-v  Verbose."),
                Descriptor::parse_line("-v  Also verbose (doc bug)."),
            ],
        };
        let mut ts = TokenStream::from_tokens(Vec::<String>::new());
        let err = parse_shorts("v", &t, &mut ts, false, "usage").unwrap_err();
        assert!(matches!(err, Error::Developer(_)));
    }

    #[test]
    fn stacked_shorts_all_flags() {
        let t = Table {
            descriptors: vec![
                Descriptor::parse_line("-a  A."),
                Descriptor::parse_line("-b  B."),
                Descriptor::parse_line("-c  C."),
            ],
        };
        let mut ts = TokenStream::from_tokens(Vec::<String>::new());
        let leaves = parse_shorts("abc", &t, &mut ts, false, "usage").unwrap();
        assert_eq!(leaves.len(), 3);
        for l in &leaves {
            match l {
                Leaf::Option { value, .. } => assert_eq!(*value, Value::Bool(true)),
                _ => panic!(),
            }
        }
    }
}
