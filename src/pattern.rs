//! The composite pattern tree: [`Pattern`] nodes over [`LeafId`]s, and
//! the either-normal-form worklist expansion used only for
//! accumulation detection (`spec.md` §4.5, §9).

use crate::leaf::LeafId;

/// A node in the usage grammar tree. Leaves are referenced by
/// [`LeafId`], not owned, so that [`crate::leaf::Pool::fix_identities`]
/// can unify equal leaves across branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A single atomic matchable.
    Leaf(LeafId),
    /// All children must match in order.
    Required(Vec<Pattern>),
    /// Children are attempted in order; non-match is not a failure.
    Optional(Vec<Pattern>),
    /// The child must match at least once, then repeatedly until a
    /// fixed point.
    OneOrMore(Box<Pattern>),
    /// Exactly one alternative is chosen (minimum-residue rule).
    Either(Vec<Pattern>),
    /// Matches and consumes any remaining `Option` leaves.
    AnyOptions,
}

impl Pattern {
    /// All [`LeafId`]s mentioned anywhere in this subtree, in
    /// depth-first order, duplicates included. Mirrors `docopt.py`'s
    /// `Pattern.flat` property.
    pub fn flat(&self) -> Vec<LeafId> {
        let mut out = Vec::new();
        self.flat_into(&mut out);
        out
    }

    fn flat_into(&self, out: &mut Vec<LeafId>) {
        match self {
            Pattern::Leaf(id) => out.push(*id),
            Pattern::Required(children) | Pattern::Optional(children) | Pattern::Either(children) => {
                for c in children {
                    c.flat_into(out);
                }
            }
            Pattern::OneOrMore(child) => child.flat_into(out),
            Pattern::AnyOptions => {}
        }
    }

    /// Rewrite every leaf reference in this subtree through `remap`
    /// (the table returned by [`crate::leaf::Pool::fix_identities`]).
    pub fn remap_leaves(&mut self, remap: &[LeafId]) {
        match self {
            Pattern::Leaf(id) => *id = remap[*id],
            Pattern::Required(children) | Pattern::Optional(children) | Pattern::Either(children) => {
                for c in children {
                    c.remap_leaves(remap);
                }
            }
            Pattern::OneOrMore(child) => child.remap_leaves(remap),
            Pattern::AnyOptions => {}
        }
    }

    /// The either-normal form: a flat list of branches, each branch a
    /// flat list of [`LeafId`]s enumerating one path through the
    /// grammar. Used only to detect arguments that occur more than
    /// once within some branch (`spec.md` §4.5); never used for
    /// actual matching.
    ///
    /// Implemented as the worklist expansion the spec describes:
    /// `Either` splits into one push per alternative, `Required`/
    /// `Optional` inline their children, and `OneOrMore(p)` inlines
    /// `p` twice (enough to observe duplication, not a semantic
    /// unrolling of repetition).
    pub fn either_branches(&self) -> Vec<Vec<LeafId>> {
        let mut groups: Vec<Vec<Pattern>> = vec![vec![self.clone()]];
        let mut finished: Vec<Vec<LeafId>> = Vec::new();

        while let Some(mut children) = groups.pop() {
            if let Some(idx) = children.iter().position(|c| matches!(c, Pattern::Either(_))) {
                let either = children.remove(idx);
                if let Pattern::Either(alts) = either {
                    for alt in alts {
                        let mut next = vec![alt];
                        next.extend(children.iter().cloned());
                        groups.push(next);
                    }
                }
            } else if let Some(idx) = children
                .iter()
                .position(|c| matches!(c, Pattern::Required(_)))
            {
                let required = children.remove(idx);
                if let Pattern::Required(inner) = required {
                    let mut next = inner;
                    next.extend(children);
                    groups.push(next);
                }
            } else if let Some(idx) = children
                .iter()
                .position(|c| matches!(c, Pattern::Optional(_)))
            {
                let optional = children.remove(idx);
                if let Pattern::Optional(inner) = optional {
                    let mut next = inner;
                    next.extend(children);
                    groups.push(next);
                }
            } else if let Some(idx) = children
                .iter()
                .position(|c| matches!(c, Pattern::OneOrMore(_)))
            {
                let one_or_more = children.remove(idx);
                if let Pattern::OneOrMore(inner) = one_or_more {
                    let mut next = vec![(*inner).clone(), (*inner).clone()];
                    next.extend(children);
                    groups.push(next);
                }
            } else {
                let mut branch = Vec::new();
                for c in &children {
                    branch.extend(c.flat());
                }
                finished.push(branch);
            }
        }

        finished
    }
}
