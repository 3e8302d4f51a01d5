//! Black-box scenarios exercised through the public API only, covering
//! the parts of `spec.md` §8's table not already covered by the inline
//! tests in `src/lib.rs`: long-option prefix matching, short stacking,
//! and a couple of full multi-alternative usage grammars.

use usagematch::{parse, Error, Request};

const PREFIX_DOC: &str = "\
Usage: p [options]

Options:
  --verbose  Be verbose.
  --verify   Verify checksums.
";

#[test]
fn unambiguous_long_prefix_resolves() {
    let argv = vec!["--verbo".to_string()];
    match parse(PREFIX_DOC, &argv, true, None).unwrap() {
        Request::Matched(values) => assert!(values.as_bool("--verbose")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn ambiguous_long_prefix_is_a_user_error() {
    let argv = vec!["--verb".to_string()];
    let err = parse(PREFIX_DOC, &argv, true, None).unwrap_err();
    assert!(matches!(err, Error::User(_)));
}

const STACK_DOC: &str = "\
Usage: p [-a] [-b] [-c]

Options:
  -a  A.
  -b  B.
  -c  C.
";

#[test]
fn stacked_short_options_all_resolve() {
    let argv = vec!["-abc".to_string()];
    match parse(STACK_DOC, &argv, true, None).unwrap() {
        Request::Matched(values) => {
            assert!(values.as_bool("-a"));
            assert!(values.as_bool("-b"));
            assert!(values.as_bool("-c"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

const NAVAL_DOC: &str = "\
Naval Fate.

Usage:
  naval_fate ship new <name>...
  naval_fate ship <name> move <x> <y> [--speed=<kn>]
  naval_fate ship shoot <x> <y>
  naval_fate mine (set | remove) <x> <y> [--moored | --drifting]
  naval_fate -h | --help
  naval_fate --version

Options:
  -h, --help     Show this screen.
  --version      Show version.
  --speed=<kn>   Speed in knots [default: 10].
  --moored       Moored (anchored) mine.
  --drifting     Drifting mine.
";

#[test]
fn naval_fate_ship_new_accumulates_names() {
    let argv = vec![
        "ship".to_string(),
        "new".to_string(),
        "Enterprise".to_string(),
        "Defiant".to_string(),
    ];
    match parse(NAVAL_DOC, &argv, true, Some("2.0")).unwrap() {
        Request::Matched(values) => {
            assert!(values.as_bool("ship"));
            assert!(values.as_bool("new"));
            assert_eq!(
                values.as_list("<name>"),
                &["Enterprise".to_string(), "Defiant".to_string()]
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn naval_fate_mine_set_with_drifting_flag() {
    let argv = vec![
        "mine".to_string(),
        "set".to_string(),
        "10".to_string(),
        "20".to_string(),
        "--drifting".to_string(),
    ];
    match parse(NAVAL_DOC, &argv, true, Some("2.0")).unwrap() {
        Request::Matched(values) => {
            assert!(values.as_bool("mine"));
            assert!(values.as_bool("set"));
            assert!(values.as_bool("--drifting"));
            assert!(!values.as_bool("--moored"));
            assert_eq!(values.as_str("<x>"), Some("10"));
            assert_eq!(values.as_str("<y>"), Some("20"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn naval_fate_version_short_circuits() {
    let argv = vec!["--version".to_string()];
    match parse(NAVAL_DOC, &argv, true, Some("naval_fate 2.0")).unwrap() {
        Request::Version(text) => assert_eq!(text, "naval_fate 2.0"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn naval_fate_help_short_circuits_even_with_other_garbage() {
    let argv = vec!["--help".to_string()];
    match parse(NAVAL_DOC, &argv, true, Some("2.0")).unwrap() {
        Request::Help(text) => assert!(text.contains("Naval Fate")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn naval_fate_unmatched_command_is_a_user_error() {
    let argv = vec!["scuttle".to_string()];
    let err = parse(NAVAL_DOC, &argv, true, Some("2.0")).unwrap_err();
    assert!(matches!(err, Error::User(_)));
}

#[test]
fn parsing_is_idempotent_across_repeated_calls() {
    let argv = vec!["ship".to_string(), "shoot".to_string(), "3".to_string(), "4".to_string()];
    let first = parse(NAVAL_DOC, &argv, true, Some("2.0")).unwrap();
    let second = parse(NAVAL_DOC, &argv, true, Some("2.0")).unwrap();
    assert_eq!(first, second);
}
