//! Splay-tree rotations.
//!
//! [`rotate_left`] / [`rotate_right`] lift a node one level over its
//! parent. [`splay`] lifts a node all the way to the root using zig,
//! zig-zig and zig-zag steps; the two-level steps are done in one pass
//! (`ll_splay`, `rr_splay`, `lr_splay`, `rl_splay`) instead of as two
//! single rotations.

use crate::types::Node;
use crate::util::{get_l, get_p, get_r, set_l, set_p, set_r};

// ── single-level rotations ────────────────────────────────────────────────

/// Rotates `x` over its parent, where `x` is the parent's left child.
///
/// ```text
///       p            x
///      / \          / \
///     x   c   →    a   p
///    / \              / \
///   a   b            b   c
/// ```
///
/// No-op when `x` is a root.
pub fn rotate_right<N: Node>(arena: &mut [N], x: u32) {
    let Some(p) = get_p(arena, x) else {
        return;
    };
    debug_assert_eq!(get_l(arena, p), Some(x));
    let g = get_p(arena, p);
    let b = get_r(arena, x);
    set_l(arena, p, b);
    if let Some(b) = b {
        set_p(arena, b, Some(p));
    }
    set_r(arena, x, Some(p));
    set_p(arena, p, Some(x));
    set_p(arena, x, g);
    replace_child(arena, g, p, x);
}

/// Rotates `x` over its parent, where `x` is the parent's right child.
///
/// ```text
///     p                x
///    / \              / \
///   a   x     →      p   c
///      / \          / \
///     b   c        a   b
/// ```
///
/// No-op when `x` is a root.
pub fn rotate_left<N: Node>(arena: &mut [N], x: u32) {
    let Some(p) = get_p(arena, x) else {
        return;
    };
    debug_assert_eq!(get_r(arena, p), Some(x));
    let g = get_p(arena, p);
    let b = get_l(arena, x);
    set_r(arena, p, b);
    if let Some(b) = b {
        set_p(arena, b, Some(p));
    }
    set_l(arena, x, Some(p));
    set_p(arena, p, Some(x));
    set_p(arena, x, g);
    replace_child(arena, g, p, x);
}

// ── double-level rotations ────────────────────────────────────────────────

/// Zig-zig: `c3` is the left child of `c2`, which is the left child of `c1`.
fn ll_splay<N: Node>(arena: &mut [N], c3: u32, c2: u32, c1: u32) {
    let b = get_r(arena, c2);
    let c = get_r(arena, c3);
    let p = get_p(arena, c1);
    set_p(arena, c3, p);
    set_r(arena, c3, Some(c2));
    set_p(arena, c2, Some(c3));
    set_l(arena, c2, c);
    set_r(arena, c2, Some(c1));
    set_p(arena, c1, Some(c2));
    set_l(arena, c1, b);
    if let Some(b) = b {
        set_p(arena, b, Some(c1));
    }
    if let Some(c) = c {
        set_p(arena, c, Some(c2));
    }
    replace_child(arena, p, c1, c3);
}

/// Zig-zig: `c3` is the right child of `c2`, which is the right child of `c1`.
fn rr_splay<N: Node>(arena: &mut [N], c3: u32, c2: u32, c1: u32) {
    let b = get_l(arena, c2);
    let c = get_l(arena, c3);
    let p = get_p(arena, c1);
    set_p(arena, c3, p);
    set_l(arena, c3, Some(c2));
    set_p(arena, c2, Some(c3));
    set_l(arena, c2, Some(c1));
    set_r(arena, c2, c);
    set_p(arena, c1, Some(c2));
    set_r(arena, c1, b);
    if let Some(b) = b {
        set_p(arena, b, Some(c1));
    }
    if let Some(c) = c {
        set_p(arena, c, Some(c2));
    }
    replace_child(arena, p, c1, c3);
}

/// Zig-zag: `c3` is the right child of `c2`, which is the left child of `c1`.
///
/// ```text
///       c1             c3
///      /              /  \
///    c2       →     c2    c1
///      \              \   /
///       c3             c d
///      /  \
///     c    d
/// ```
fn lr_splay<N: Node>(arena: &mut [N], c3: u32, c2: u32, c1: u32) {
    let c = get_l(arena, c3);
    let d = get_r(arena, c3);
    let p = get_p(arena, c1);
    set_p(arena, c3, p);
    set_l(arena, c3, Some(c2));
    set_r(arena, c3, Some(c1));
    set_p(arena, c2, Some(c3));
    set_r(arena, c2, c);
    set_p(arena, c1, Some(c3));
    set_l(arena, c1, d);
    if let Some(c) = c {
        set_p(arena, c, Some(c2));
    }
    if let Some(d) = d {
        set_p(arena, d, Some(c1));
    }
    replace_child(arena, p, c1, c3);
}

/// Zig-zag: `c3` is the left child of `c2`, which is the right child of `c1`.
fn rl_splay<N: Node>(arena: &mut [N], c3: u32, c2: u32, c1: u32) {
    let c = get_r(arena, c3);
    let d = get_l(arena, c3);
    let p = get_p(arena, c1);
    set_p(arena, c3, p);
    set_l(arena, c3, Some(c1));
    set_r(arena, c3, Some(c2));
    set_p(arena, c2, Some(c3));
    set_l(arena, c2, c);
    set_p(arena, c1, Some(c3));
    set_r(arena, c1, d);
    if let Some(c) = c {
        set_p(arena, c, Some(c2));
    }
    if let Some(d) = d {
        set_p(arena, d, Some(c1));
    }
    replace_child(arena, p, c1, c3);
}

// ── top-level splay ───────────────────────────────────────────────────────

/// Splays `node` to the root of its tree and returns it.
///
/// Returns immediately when `node` is already a root.
pub fn splay<N: Node>(arena: &mut [N], node: u32) -> u32 {
    while let Some(p) = get_p(arena, node) {
        let node_is_left = get_l(arena, p) == Some(node);
        match get_p(arena, p) {
            None => {
                if node_is_left {
                    rotate_right(arena, node);
                } else {
                    rotate_left(arena, node);
                }
            }
            Some(g) => {
                let parent_is_left = get_l(arena, g) == Some(p);
                match (parent_is_left, node_is_left) {
                    (true, true) => ll_splay(arena, node, p, g),
                    (true, false) => lr_splay(arena, node, p, g),
                    (false, true) => rl_splay(arena, node, p, g),
                    (false, false) => rr_splay(arena, node, p, g),
                }
            }
        }
    }
    node
}

// ── internal helper ───────────────────────────────────────────────────────

/// Re-points the slot of `p` that held `old` at `new`. No-op for a root.
fn replace_child<N: Node>(arena: &mut [N], p: Option<u32>, old: u32, new: u32) {
    if let Some(p) = p {
        if get_l(arena, p) == Some(old) {
            set_l(arena, p, Some(new));
        } else {
            set_r(arena, p, Some(new));
        }
    }
}
