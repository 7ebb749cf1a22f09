//! Arena-based splay-tree utilities.
//!
//! Nodes live in a caller-owned slice and every "pointer" is an
//! `Option<u32>` index into it. All functions take the arena plus node
//! indices, so several independent trees can share one arena and a node's
//! index never changes while rotations move it around.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait |
//! [`splay`] | single rotations and bottom-up [`splay`](splay::splay) |
//! [`split`] | [`split_by_key`], [`split_before_key`], [`merge`] |
//! [`util`] | traversal (`first`, `next`, …), `find`, BST `insert`, `link_balanced` |

pub mod split;
pub mod splay;
pub mod types;
pub mod util;

pub use splay::{rotate_left, rotate_right, splay};
pub use split::{merge, split_before_key, split_by_key};
pub use types::Node;
pub use util::{
    find, first, in_order, insert, last, leftmost, link_balanced, next, prev, rightmost, root_of,
    size,
};
