//! Split and merge of whole splay trees.
//!
//! Both operations do exactly one splay, so they are amortised
//! logarithmic. Node indices are preserved: a node belongs to a different
//! tree afterwards, but it is never moved in the arena.

use crate::splay::splay;
use crate::types::Node;
use crate::util::{get_l, get_p, get_r, leftmost, rightmost, set_p, set_r};

/// Splits the tree at `root` into keys `<= key` (left) and keys `> key`
/// (right).
///
/// The deepest node whose key is `<= key` is splayed to the root and its
/// right subtree detached. When every key is greater than `key` the minimum
/// is splayed instead and the whole tree is returned as the right half. A
/// `key` not present in the tree splits at the nearest boundary.
pub fn split_by_key<N, K, F, C>(
    arena: &mut [N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> (Option<u32>, Option<u32>)
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    split_where(arena, root, |n| comparator(key_of(n), key) <= 0)
}

/// Like [`split_by_key`], but the left half holds keys strictly `< key`.
pub fn split_before_key<N, K, F, C>(
    arena: &mut [N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> (Option<u32>, Option<u32>)
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    split_where(arena, root, |n| comparator(key_of(n), key) < 0)
}

/// Joins two trees where every key of `left` is `<=` every key of `right`.
///
/// The maximum of `left` is splayed to its root and `right` becomes its
/// right subtree. An empty side returns the other one unchanged.
pub fn merge<N: Node>(arena: &mut [N], left: Option<u32>, right: Option<u32>) -> Option<u32> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => {
            debug_assert!(get_p(arena, left).is_none());
            debug_assert!(get_p(arena, right).is_none());
            let max = splay(arena, rightmost(arena, left));
            set_r(arena, max, Some(right));
            set_p(arena, right, Some(max));
            Some(max)
        }
    }
}

/// Splits off the prefix of nodes satisfying `goes_left`, which must be
/// monotone over key order (true for a prefix, then false).
fn split_where<N, P>(arena: &mut [N], root: Option<u32>, goes_left: P) -> (Option<u32>, Option<u32>)
where
    N: Node,
    P: Fn(&N) -> bool,
{
    let Some(root) = root else {
        return (None, None);
    };
    debug_assert!(get_p(arena, root).is_none());

    let mut candidate = None;
    let mut curr = Some(root);
    while let Some(i) = curr {
        curr = if goes_left(&arena[i as usize]) {
            candidate = Some(i);
            get_r(arena, i)
        } else {
            get_l(arena, i)
        };
    }

    match candidate {
        None => {
            let min = splay(arena, leftmost(arena, root));
            (None, Some(min))
        }
        Some(candidate) => {
            let left = splay(arena, candidate);
            let right = get_r(arena, left);
            set_r(arena, left, None);
            if let Some(right) = right {
                set_p(arena, right, None);
            }
            (Some(left), right)
        }
    }
}
