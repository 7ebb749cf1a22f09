//! Traversal and plain-BST helpers over arena-indexed nodes.
//!
//! Key-based helpers (`find`, `insert`) take a `key_of` accessor closure
//! and a three-way `comparator`, so callers can keep keys wherever their
//! node layout puts them.

use crate::types::Node;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node of the subtree rooted at `idx`.
pub fn leftmost<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(l) = get_l(arena, idx) {
        idx = l;
    }
    idx
}

/// Rightmost node of the subtree rooted at `idx`.
pub fn rightmost<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(r) = get_r(arena, idx) {
        idx = r;
    }
    idx
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    root.map(|r| leftmost(arena, r))
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    root.map(|r| rightmost(arena, r))
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return Some(leftmost(arena, r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return Some(rightmost(arena, l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Root of the tree containing `idx`, found by following parent links.
pub fn root_of<N: Node>(arena: &[N], mut idx: u32) -> u32 {
    while let Some(p) = get_p(arena, idx) {
        idx = p;
    }
    idx
}

/// Node indices of the tree in key order.
///
/// Walks successor links rather than recursing, so degenerate (path
/// shaped) trees do not grow the call stack.
pub fn in_order<N: Node>(arena: &[N], root: Option<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut curr = first(arena, root);
    while let Some(i) = curr {
        out.push(i);
        curr = next(arena, i);
    }
    out
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let mut count = 0;
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        count += 1;
        stack.extend(get_l(arena, i));
        stack.extend(get_r(arena, i));
    }
    count
}

/// Links the detached `nodes`, given in key order, into a height-balanced
/// tree and returns its root. The middle element (rounding down) becomes
/// the root of each range.
pub fn link_balanced<N: Node>(arena: &mut [N], nodes: &[u32]) -> Option<u32> {
    link_range(arena, nodes, None)
}

fn link_range<N: Node>(arena: &mut [N], nodes: &[u32], parent: Option<u32>) -> Option<u32> {
    if nodes.is_empty() {
        return None;
    }
    let mid = (nodes.len() - 1) / 2;
    let idx = nodes[mid];
    set_p(arena, idx, parent);
    let l = link_range(arena, &nodes[..mid], Some(idx));
    let r = link_range(arena, &nodes[mid + 1..], Some(idx));
    set_l(arena, idx, l);
    set_r(arena, idx, r);
    Some(idx)
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, key_of(&arena[i as usize]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Attaches `node` as the left child of `parent`, which must not have one.
pub fn attach_left<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    debug_assert!(get_l(arena, parent).is_none());
    set_l(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}

/// Attaches `node` as the right child of `parent`, which must not have one.
pub fn attach_right<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    debug_assert!(get_r(arena, parent).is_none());
    set_r(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}

/// Plain BST insert of the detached `node` at the first empty slot found by
/// descent. Equal keys descend right. Returns the (possibly new) root.
pub fn insert<N, K, F, C>(
    arena: &mut [N],
    root: Option<u32>,
    node: u32,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let Some(mut curr) = root else {
        return Some(node);
    };

    loop {
        let cmp = {
            let key = key_of(&arena[node as usize]);
            let curr_key = key_of(&arena[curr as usize]);
            comparator(key, curr_key)
        };

        let next = if cmp < 0 {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };

        match next {
            Some(nxt) => curr = nxt,
            None => {
                if cmp < 0 {
                    attach_left(arena, node, curr);
                } else {
                    attach_right(arena, node, curr);
                }
                return root;
            }
        }
    }
}
