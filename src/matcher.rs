//! The backtracking matcher: `spec.md` §4.6. Grounded on `docopt.py`'s
//! per-class `match` methods, translated to an enum-dispatched
//! function since [`Pattern`] is a closed tagged sum (`spec.md` §9's
//! "Polymorphism" note).

use crate::leaf::{Leaf, Pool, Value};
use crate::pattern::Pattern;

/// The accumulator of matched leaves, built up as the tree is walked.
pub type Collected = Vec<Leaf>;

/// Match `pattern` against `left`, the remaining lexed argv leaves.
/// Returns `(matched, residual left, collected)`. On failure `left`
/// and `collected` are returned unchanged, per `spec.md` §4.6.
pub fn match_pattern(
    pattern: &Pattern,
    pool: &Pool,
    left: Vec<Leaf>,
    collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    match pattern {
        Pattern::Leaf(id) => match_leaf(pool.get(*id), left, collected),
        Pattern::Required(children) => match_required(children, pool, left, collected),
        Pattern::Optional(children) => match_optional(children, pool, left, collected),
        Pattern::OneOrMore(child) => match_one_or_more(child, pool, left, collected),
        Pattern::Either(children) => match_either(children, pool, left, collected),
        Pattern::AnyOptions => match_any_options(left, collected),
    }
}

fn match_leaf(leaf: &Leaf, left: Vec<Leaf>, collected: Collected) -> (bool, Vec<Leaf>, Collected) {
    match leaf {
        Leaf::Argument { name, value } => match_argument(name.as_deref(), value, left, collected),
        Leaf::Command { name, .. } => match_command(name, left, collected),
        Leaf::Option { short, long, .. } => {
            match_option(short.as_deref(), long.as_deref(), left, collected)
        }
    }
}

fn match_argument(
    name: Option<&str>,
    value: &Value,
    mut left: Vec<Leaf>,
    mut collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    let pos = left.iter().position(Leaf::is_argument);
    let Some(idx) = pos else {
        return (false, left, collected);
    };
    let matched = left.remove(idx);
    let matched_value = match &matched {
        Leaf::Argument {
            value: Value::Str(s),
            ..
        } => s.clone(),
        Leaf::Argument {
            value: Value::None, ..
        } => String::new(),
        _ => unreachable!(),
    };

    if value.is_list() {
        let existing = collected
            .iter_mut()
            .find(|l| matches!(l, Leaf::Argument { name: n, value: Value::List(_), .. } if n.as_deref() == name));
        match existing {
            Some(Leaf::Argument {
                value: Value::List(items),
                ..
            }) => items.push(matched_value),
            _ => collected.push(Leaf::Argument {
                name: name.map(str::to_string),
                value: Value::List(vec![matched_value]),
            }),
        }
    } else {
        collected.push(Leaf::Argument {
            name: name.map(str::to_string),
            value: Value::Str(matched_value),
        });
    }

    (true, left, collected)
}

fn match_command(
    name: &str,
    mut left: Vec<Leaf>,
    mut collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    let pos = left.iter().position(|l| match l {
        Leaf::Argument {
            value: Value::Str(s),
            ..
        } => s == name,
        _ => false,
    });
    let Some(idx) = pos else {
        return (false, left, collected);
    };
    left.remove(idx);
    collected.push(Leaf::Command {
        name: name.to_string(),
        value: true,
    });
    (true, left, collected)
}

fn match_option(
    short: Option<&str>,
    long: Option<&str>,
    left: Vec<Leaf>,
    collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    let before = left.len();
    let mut removed_one = false;
    let mut kept = Vec::with_capacity(left.len());
    for leaf in left {
        let is_match = !removed_one
            && matches!(&leaf, Leaf::Option { short: s, long: l, .. } if s.as_deref() == short && l.as_deref() == long);
        if is_match {
            removed_one = true;
        } else {
            kept.push(leaf);
        }
    }
    let matched = kept.len() != before;
    (matched, kept, collected)
}

fn match_any_options(left: Vec<Leaf>, collected: Collected) -> (bool, Vec<Leaf>, Collected) {
    let before = left.len();
    let kept: Vec<Leaf> = left.into_iter().filter(|l| !l.is_option()).collect();
    let matched = kept.len() != before;
    (matched, kept, collected)
}

fn match_required(
    children: &[Pattern],
    pool: &Pool,
    left: Vec<Leaf>,
    collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    let original_left = left.clone();
    let original_collected = collected.clone();
    let mut l = left;
    let mut c = collected;
    for child in children {
        let (matched, new_l, new_c) = match_pattern(child, pool, l, c);
        if !matched {
            return (false, original_left, original_collected);
        }
        l = new_l;
        c = new_c;
    }
    (true, l, c)
}

fn match_optional(
    children: &[Pattern],
    pool: &Pool,
    left: Vec<Leaf>,
    collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    let mut l = left;
    let mut c = collected;
    for child in children {
        let (_matched, new_l, new_c) = match_pattern(child, pool, l, c);
        l = new_l;
        c = new_c;
    }
    (true, l, c)
}

fn match_one_or_more(
    child: &Pattern,
    pool: &Pool,
    left: Vec<Leaf>,
    collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    let original_left = left.clone();
    let original_collected = collected.clone();
    let mut l = left;
    let mut c = collected;
    let mut times = 0;
    loop {
        let (matched, new_l, new_c) = match_pattern(child, pool, l.clone(), c.clone());
        if matched {
            times += 1;
        }
        let unchanged = !matched || new_l.len() == l.len();
        l = new_l;
        c = new_c;
        if unchanged {
            break;
        }
    }
    if times >= 1 {
        (true, l, c)
    } else {
        (false, original_left, original_collected)
    }
}

fn match_either(
    children: &[Pattern],
    pool: &Pool,
    left: Vec<Leaf>,
    collected: Collected,
) -> (bool, Vec<Leaf>, Collected) {
    let mut best: Option<(Vec<Leaf>, Collected)> = None;
    for child in children {
        let (matched, new_l, new_c) = match_pattern(child, pool, left.clone(), collected.clone());
        if !matched {
            continue;
        }
        let better = match &best {
            None => true,
            Some((best_l, _)) => new_l.len() < best_l.len(),
        };
        if better {
            log::trace!("either: branch with residue {} beats previous", new_l.len());
            best = Some((new_l, new_c));
        }
    }
    match best {
        Some((l, c)) => (true, l, c),
        None => (false, left, collected),
    }
}
