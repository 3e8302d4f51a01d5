//! Atomic matchables: [`Leaf`] and its [`Value`], plus the interning
//! [`Pool`] that gives usage-tree leaves stable identity.
//!
//! Leaves that are structurally equal must, within a single usage
//! pattern tree, refer to the *same* pool entry so that a mutation
//! applied during normalization (marking an [`Leaf::Argument`] as
//! accumulating) is visible at every grammar position that names it.
//! See `spec.md` §3 and §9.

use std::fmt;

/// A leaf's resolved (or not-yet-resolved) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// No value yet (an [`Leaf::Option`] before matching, or a scalar
    /// [`Leaf::Argument`] with nothing assigned).
    None,
    /// A boolean flag value.
    Bool(bool),
    /// A single string value.
    Str(String),
    /// An accumulated list of string values.
    List(Vec<String>),
}

impl Value {
    /// `true` if this value is the accumulating list form.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => write!(f, "{items:?}"),
        }
    }
}

/// An atomic matchable: a positional argument, a literal command word,
/// or a `-x`/`--xyz` option switch. See `spec.md` §3.
#[derive(Debug, Clone)]
pub enum Leaf {
    /// A positional `<arg>`/`ARG` placeholder, or (when `name` is
    /// `None`) a raw token taken verbatim from argv after `--`.
    Argument { name: Option<String>, value: Value },
    /// A literal word appearing in the usage grammar.
    Command { name: String, value: bool },
    /// A switch, with its resolved argument-count and current value.
    Option {
        short: Option<String>,
        long: Option<String>,
        argcount: u8,
        value: Value,
    },
}

impl Leaf {
    /// An argument placeholder with no value yet.
    pub fn argument(name: impl Into<String>) -> Self {
        Leaf::Argument {
            name: Some(name.into()),
            value: Value::None,
        }
    }

    /// A raw positional token taken verbatim from argv (used for
    /// tokens following a bare `--`).
    pub fn raw_argument(value: impl Into<String>) -> Self {
        Leaf::Argument {
            name: None,
            value: Value::Str(value.into()),
        }
    }

    /// A literal command word, unmatched.
    pub fn command(name: impl Into<String>) -> Self {
        Leaf::Command {
            name: name.into(),
            value: false,
        }
    }

    /// An option's name: the long form if present, else the short form.
    ///
    /// Per `spec.md` §3: "Option `name` is defined as `long` if
    /// present else `short`."
    pub fn name(&self) -> Option<&str> {
        match self {
            Leaf::Argument { name, .. } => name.as_deref(),
            Leaf::Command { name, .. } => Some(name.as_str()),
            Leaf::Option { short, long, .. } => long.as_deref().or(short.as_deref()),
        }
    }

    pub fn is_option(&self) -> bool {
        matches!(self, Leaf::Option { .. })
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, Leaf::Argument { .. })
    }
}

/// Structural equality as defined by `spec.md` §3: arguments compare
/// by name, commands by name, options by `(short, long)`. Values are
/// deliberately excluded so that a not-yet-resolved placeholder and a
/// matched instance of the same grammar position still dedupe.
impl PartialEq for Leaf {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Leaf::Argument { name: a, .. }, Leaf::Argument { name: b, .. }) => a == b,
            (Leaf::Command { name: a, .. }, Leaf::Command { name: b, .. }) => a == b,
            (
                Leaf::Option {
                    short: sa, long: la, ..
                },
                Leaf::Option {
                    short: sb, long: lb, ..
                },
            ) => sa == sb && la == lb,
            _ => false,
        }
    }
}

/// A stable index into a [`Pool`].
pub type LeafId = usize;

/// An interning table of usage-tree leaf prototypes.
///
/// `spec.md` §9 notes that, in a language without shared mutable
/// object identity, leaf sharing should be realized "by a stable
/// index into an interning table of leaf prototypes; the matcher
/// writes into a parallel mutable state array addressed by index."
/// `Pool` is exactly that table: pattern nodes hold [`LeafId`]s, never
/// owned [`Leaf`] values.
#[derive(Debug, Default, Clone)]
pub struct Pool {
    leaves: Vec<Leaf>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a leaf, returning its id. Does not dedupe; that is
    /// [`Pool::fix_identities`]'s job, run once after the whole usage
    /// tree has been parsed.
    pub fn insert(&mut self, leaf: Leaf) -> LeafId {
        self.leaves.push(leaf);
        self.leaves.len() - 1
    }

    pub fn get(&self, id: LeafId) -> &Leaf {
        &self.leaves[id]
    }

    pub fn get_mut(&mut self, id: LeafId) -> &mut Leaf {
        &mut self.leaves[id]
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Mark the argument at `id` as accumulating: its value becomes an
    /// (initially empty) list. A no-op on non-argument leaves.
    pub fn mark_accumulating(&mut self, id: LeafId) {
        if let Leaf::Argument { value, .. } = &mut self.leaves[id] {
            if !value.is_list() {
                *value = Value::List(Vec::new());
            }
        }
    }

    /// Deduplicate the pool by structural equality, returning the
    /// deduplicated pool and a remap table from old ids to new ids.
    /// The first-seen instance of each equivalence class survives, so
    /// every later occurrence in the tree is rewritten to point at it
    /// — this is `fix_identities` from `spec.md` §4.5.
    pub fn fix_identities(self) -> (Pool, Vec<LeafId>) {
        let mut unique: Vec<Leaf> = Vec::new();
        let mut remap = Vec::with_capacity(self.leaves.len());
        for leaf in self.leaves {
            let canonical = unique.iter().position(|u| *u == leaf);
            match canonical {
                Some(idx) => remap.push(idx),
                None => {
                    unique.push(leaf);
                    remap.push(unique.len() - 1);
                }
            }
        }
        (Pool { leaves: unique }, remap)
    }
}
