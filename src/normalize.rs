//! Pattern normalization: the two passes `spec.md` §4.5 requires
//! before matching. Run once, right after parsing the usage text.

use crate::leaf::Pool;
use crate::pattern::Pattern;

/// Identity-fix `tree` against `pool` (dedupe leaves, rewrite
/// references), then flag accumulating arguments. Returns the fixed
/// pool; `tree` is rewritten in place.
pub fn normalize(tree: &mut Pattern, pool: Pool) -> Pool {
    let (mut pool, remap) = pool.fix_identities();
    tree.remap_leaves(&remap);
    log::trace!(
        "fix_identities: {} leaf occurrences deduped to {} pool entries",
        remap.len(),
        pool.len()
    );

    for branch in tree.either_branches() {
        let mut seen = std::collections::HashMap::new();
        for id in branch {
            *seen.entry(id).or_insert(0) += 1;
        }
        for (id, count) in seen {
            if count > 1 {
                log::debug!("leaf {id} repeats {count} times in a branch; marking accumulating");
                pool.mark_accumulating(id);
            }
        }
    }

    pool
}
