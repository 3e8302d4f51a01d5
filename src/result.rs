//! Result assembly: `spec.md` §4.7. Combines descriptor defaults,
//! argv-lexed options, usage-pattern leaf defaults, and the matcher's
//! collected leaves into the final name→value mapping. Grounded on
//! `docopt.py`'s final `Dict((a.name, a.value) for a in ...)` in its
//! `docopt()` function.

use std::collections::HashMap;

use crate::descriptor::Table;
use crate::leaf::{Leaf, Pool, Value};
use crate::matcher::Collected;
use crate::pattern::Pattern;

/// The parsed command line: a name→value mapping. Order of insertion
/// during assembly determines final values (later wins); iteration
/// order over the finished map carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap(HashMap<String, Value>);

impl ValueMap {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `true` unless the value is absent, `false`, `None`, or an empty
    /// list — i.e. the option/argument/command was actually given.
    pub fn is_present(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Str(_)) => true,
            Some(Value::List(items)) => !items.is_empty(),
            Some(Value::None) | None => false,
        }
    }

    pub fn as_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Value::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(Value::Bool(true)))
    }

    pub fn as_list(&self, name: &str) -> &[String] {
        match self.0.get(name) {
            Some(Value::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

/// Assemble the final [`ValueMap`] for a successful match.
pub fn assemble(
    table: &Table,
    argv_leaves: &[Leaf],
    usage_tree: &Pattern,
    pool: &Pool,
    collected: Collected,
) -> ValueMap {
    let mut map = ValueMap::default();

    for descriptor in table.iter() {
        if let Some(name) = descriptor.name() {
            map.insert(name, descriptor.default.clone());
        }
    }

    for leaf in argv_leaves {
        if let Leaf::Option { value, .. } = leaf {
            if let Some(name) = leaf.name() {
                map.insert(name, value.clone());
            }
        }
    }

    for id in usage_tree.flat() {
        match pool.get(id) {
            Leaf::Argument { name, value } => {
                if let Some(name) = name {
                    let default = if value.is_list() {
                        Value::List(Vec::new())
                    } else {
                        Value::None
                    };
                    map.insert(name.clone(), default);
                }
            }
            Leaf::Command { name, .. } => {
                map.insert(name.clone(), Value::Bool(false));
            }
            Leaf::Option { .. } => {}
        }
    }

    for leaf in collected {
        match leaf {
            Leaf::Argument { name: Some(name), value } => map.insert(name, value),
            Leaf::Command { name, value } => map.insert(name, Value::Bool(value)),
            _ => {}
        }
    }

    map
}
