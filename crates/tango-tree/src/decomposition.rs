//! Preferred-path decomposition and the two ways of keeping the auxiliary
//! forest in step with it.
//!
//! | Function | Role |
//! |----------|------|
//! | [`mark_preferred_along_path`] | re-mark preferred children after an access |
//! | [`rebuild_aux_trees`] | rebuild the whole forest from the marking |
//! | [`apply_flips`] | split and merge only the chains that changed |
//!
//! A chain is cut or joined at the key interval of the lower subtree: the
//! members of a chain that lie below node `c` are exactly the members whose
//! keys fall between the smallest and largest key under `c`.

use splay_forest::split::{merge, split_before_key, split_by_key};

use crate::auxiliary::AuxForest;
use crate::reference::{compare, ReferenceTree, Removed};
use crate::trace::trace_log;

/// A reference node whose preferred child changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flip {
    pub node: u32,
    pub old: Option<u32>,
    pub new: Option<u32>,
}

/// Clears every preferred marker, then marks `path` (root first) so that
/// each node on it prefers the next one. The last node of the path keeps
/// no preferred child. Returns the nodes whose marker changed.
pub fn mark_preferred_along_path<K>(refs: &mut ReferenceTree<K>, path: &[u32]) -> Vec<Flip> {
    let before: Vec<Option<u32>> = refs.nodes.iter_mut().map(|n| n.preferred.take()).collect();
    for pair in path.windows(2) {
        refs.nodes[pair[0] as usize].preferred = Some(pair[1]);
    }
    before
        .into_iter()
        .enumerate()
        .filter_map(|(i, old)| {
            let new = refs.nodes[i].preferred;
            (old != new).then_some(Flip {
                node: i as u32,
                old,
                new,
            })
        })
        .collect()
}

/// Discards the whole forest and builds one auxiliary tree per maximal
/// preferred chain.
pub fn rebuild_aux_trees<K: Ord + Clone>(refs: &mut ReferenceTree<K>, forest: &mut AuxForest<K>) {
    forest.clear(refs);
    let Some(root) = refs.root else {
        return;
    };

    let mut chain = Vec::new();
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        let (p, l, r) = {
            let node = &refs.nodes[n as usize];
            (node.p, node.l, node.r)
        };
        stack.extend(r);
        stack.extend(l);

        let is_head = match p {
            None => true,
            Some(p) => refs.nodes[p as usize].preferred != Some(n),
        };
        if !is_head {
            continue;
        }
        chain.clear();
        let mut curr = Some(n);
        while let Some(c) = curr {
            chain.push(c);
            curr = refs.nodes[c as usize].preferred;
        }
        forest.build_chain(refs, &chain);
    }
    trace_log!(chains = forest.tree_count(), "rebuilt auxiliary forest");
}

fn aux_of<K>(refs: &ReferenceTree<K>, node: u32) -> u32 {
    match refs.nodes[node as usize].aux_ref {
        Some(aux) => aux,
        None => panic!("reference node {node} has no auxiliary node"),
    }
}

/// Splits the chain through `parent -> child` in two. Both nodes must be
/// in the same auxiliary tree.
pub fn cut<K: Ord + Clone>(
    refs: &ReferenceTree<K>,
    forest: &mut AuxForest<K>,
    parent: u32,
    child: u32,
) {
    let (lo, hi) = refs.subtree_bounds(child);
    let root = forest.root_of(aux_of(refs, parent));
    forest.roots.remove(&root);

    let (below, rest) =
        split_before_key(&mut forest.nodes, Some(root), refs.key(lo), |n| &n.key, compare);
    let (inside, above) = split_by_key(&mut forest.nodes, rest, refs.key(hi), |n| &n.key, compare);
    let outside = merge(&mut forest.nodes, below, above);

    forest.roots.extend(inside);
    forest.roots.extend(outside);
    trace_log!(upper = parent, lower = child, "cut preferred edge");
}

/// Joins the chain starting at `child` onto the chain ending at `parent`.
/// The two must be in different auxiliary trees.
pub fn link<K: Ord + Clone>(
    refs: &ReferenceTree<K>,
    forest: &mut AuxForest<K>,
    parent: u32,
    child: u32,
) {
    let (lo, _) = refs.subtree_bounds(child);
    let upper = forest.root_of(aux_of(refs, parent));
    let lower = forest.root_of(aux_of(refs, child));
    debug_assert_ne!(upper, lower);
    forest.roots.remove(&upper);
    forest.roots.remove(&lower);

    let (before, after) =
        split_before_key(&mut forest.nodes, Some(upper), refs.key(lo), |n| &n.key, compare);
    let head = merge(&mut forest.nodes, before, Some(lower));
    let joined = merge(&mut forest.nodes, head, after);

    forest.roots.extend(joined);
    trace_log!(upper = parent, lower = child, "linked preferred edge");
}

/// Brings the forest in line with a re-marking: every dropped preferred
/// edge is cut before any new edge is linked.
pub fn apply_flips<K: Ord + Clone>(
    refs: &ReferenceTree<K>,
    forest: &mut AuxForest<K>,
    flips: &[Flip],
) {
    for flip in flips {
        if let Some(old) = flip.old {
            cut(refs, forest, flip.node, old);
        }
    }
    for flip in flips {
        if let Some(new) = flip.new {
            link(refs, forest, flip.node, new);
        }
    }
}

/// Removes reference node `z` and patches the forest locally.
///
/// Every preferred edge touching `z` or its successor is cut first, so both
/// sit alone in their auxiliary trees. After the splice the markers the
/// reference tree repaired are linked back in.
pub(crate) fn remove_node<K: Ord + Clone>(
    refs: &mut ReferenceTree<K>,
    forest: &mut AuxForest<K>,
    z: u32,
) -> Removed<K> {
    let (zp, zl, zr) = {
        let node = refs.node(z);
        (node.p, node.l, node.r)
    };
    let successor = match (zl, zr) {
        (Some(_), Some(zr)) => Some(refs.subtree_bounds(zr).0),
        _ => None,
    };
    let successor_parent = successor
        .and_then(|y| refs.node(y).p)
        .filter(|&p| p != z);

    let mut edges: Vec<(u32, u32)> = Vec::new();
    for u in [Some(z), successor].into_iter().flatten() {
        let node = refs.node(u);
        if let Some(p) = node.p {
            if refs.node(p).preferred == Some(u) && !edges.contains(&(p, u)) {
                edges.push((p, u));
            }
        }
        if let Some(c) = node.preferred {
            if !edges.contains(&(u, c)) {
                edges.push((u, c));
            }
        }
    }
    for &(p, c) in &edges {
        cut(refs, forest, p, c);
    }

    let z_aux = aux_of(refs, z);
    forest.release(refs, z_aux);
    let removed = refs.remove(z);
    let relocate = |i: u32| removed.relocation.map_or(i, |r| r.apply(i));
    if let Some(relocation) = removed.relocation {
        let aux = aux_of(refs, relocation.to);
        forest.nodes[aux as usize].reference = relocation.to;
    }

    for u in [zp, successor, successor_parent].into_iter().flatten().map(relocate) {
        let Some(c) = refs.node(u).preferred else {
            continue;
        };
        if forest.root_of(aux_of(refs, u)) != forest.root_of(aux_of(refs, c)) {
            link(refs, forest, u, c);
        }
    }
    removed
}
