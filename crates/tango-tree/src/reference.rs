//! The reference tree: a plain BST over every key whose shape never
//! changes on access.
//!
//! Nodes live in one arena and link to each other by index. Each node also
//! carries its preferred-child marker and the index of the auxiliary node
//! that wraps it.

use std::cmp::Ordering;

use splay_forest::types::Node;
use splay_forest::util::{find, in_order, insert, leftmost, link_balanced, rightmost};

pub(crate) fn compare<K: Ord>(a: &K, b: &K) -> i32 {
    a.cmp(b) as i32
}

#[derive(Clone, Debug)]
pub struct RefNode<K> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    pub(crate) key: K,
    /// The child most recently descended into, if the last access through
    /// this node continued below it.
    pub(crate) preferred: Option<u32>,
    pub(crate) aux_ref: Option<u32>,
}

impl<K> RefNode<K> {
    pub fn new(key: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            key,
            preferred: None,
            aux_ref: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn preferred(&self) -> Option<u32> {
        self.preferred
    }

    pub fn aux_ref(&self) -> Option<u32> {
        self.aux_ref
    }
}

impl<K> Node for RefNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }
    fn l(&self) -> Option<u32> {
        self.l
    }
    fn r(&self) -> Option<u32> {
        self.r
    }
    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }
    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }
    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

/// The arena's last node was moved into the slot freed by a removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relocation {
    pub from: u32,
    pub to: u32,
}

impl Relocation {
    /// Translates an index taken before the removal.
    pub fn apply(&self, idx: u32) -> u32 {
        if idx == self.from {
            self.to
        } else {
            idx
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removed<K> {
    pub key: K,
    pub relocation: Option<Relocation>,
}

#[derive(Clone, Debug)]
pub struct ReferenceTree<K> {
    pub(crate) root: Option<u32>,
    pub(crate) nodes: Vec<RefNode<K>>,
}

impl<K> Default for ReferenceTree<K> {
    fn default() -> Self {
        Self {
            root: None,
            nodes: Vec::new(),
        }
    }
}

impl<K: Ord> ReferenceTree<K> {
    /// Builds a height-balanced tree over `sorted_keys`, which must be
    /// strictly increasing. Node `i` holds `sorted_keys[i]`.
    pub fn build_balanced(sorted_keys: Vec<K>) -> Self {
        let mut nodes: Vec<RefNode<K>> = sorted_keys.into_iter().map(RefNode::new).collect();
        let order: Vec<u32> = (0..nodes.len() as u32).collect();
        let root = link_balanced(&mut nodes, &order);
        Self { root, nodes }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: u32) -> &RefNode<K> {
        &self.nodes[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.nodes[idx as usize].key
    }

    pub fn search(&self, key: &K) -> Option<u32> {
        find(&self.nodes, self.root, key, |n| &n.key, compare)
    }

    /// Inserts `key` as a new leaf. Returns the node holding the key and
    /// whether it was newly created; an existing key is left untouched.
    pub fn insert(&mut self, key: K) -> (u32, bool) {
        if let Some(found) = self.search(&key) {
            return (found, false);
        }
        let idx = self.nodes.len() as u32;
        self.nodes.push(RefNode::new(key));
        self.root = insert(&mut self.nodes, self.root, idx, |n| &n.key, compare);
        (idx, true)
    }

    /// Nodes visited by a search for `key`, from the root down. Ends at the
    /// node holding `key`, or at the last node tried when it is absent.
    pub fn collect_path(&self, key: &K) -> Vec<u32> {
        let mut path = Vec::new();
        let mut curr = self.root;
        while let Some(i) = curr {
            path.push(i);
            let node = &self.nodes[i as usize];
            curr = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.l,
                Ordering::Greater => node.r,
            };
        }
        path
    }

    /// First and last node, in key order, of the subtree rooted at `idx`.
    pub fn subtree_bounds(&self, idx: u32) -> (u32, u32) {
        (leftmost(&self.nodes, idx), rightmost(&self.nodes, idx))
    }

    pub fn in_order(&self) -> Vec<u32> {
        in_order(&self.nodes, self.root)
    }

    pub fn keys_in_order(&self) -> Vec<&K> {
        self.in_order()
            .into_iter()
            .map(|i| &self.nodes[i as usize].key)
            .collect()
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(u32, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((i, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[i as usize];
            stack.extend(node.l.map(|l| (l, depth + 1)));
            stack.extend(node.r.map(|r| (r, depth + 1)));
        }
        height
    }

    /// Unlinks node `z` and compacts the arena.
    ///
    /// A node with two children is replaced by its in-order successor.
    /// Preferred markers around the splice are repaired so every marker
    /// still names a child and no surviving chain loses a member it kept.
    /// The caller must drop `z`'s auxiliary node first, and must translate
    /// any index it holds through the returned relocation.
    pub fn remove(&mut self, z: u32) -> Removed<K> {
        let (zp, zl, zr, z_pref) = {
            let node = &self.nodes[z as usize];
            (node.p, node.l, node.r, node.preferred)
        };

        let replacement = match (zl, zr) {
            (Some(zl), Some(zr)) => {
                let y = leftmost(&self.nodes, zr);
                let y_pref = self.nodes[y as usize].preferred;
                if y != zr {
                    let yp = self.nodes[y as usize].p;
                    let w = self.nodes[y as usize].r;
                    self.transplant(y, w);
                    if let Some(yp) = yp {
                        let parent = &mut self.nodes[yp as usize];
                        if parent.preferred == Some(y) {
                            parent.preferred = if y_pref.is_some() { w } else { None };
                        }
                    }
                    self.nodes[y as usize].r = Some(zr);
                    self.nodes[zr as usize].p = Some(y);
                }
                self.transplant(z, Some(y));
                self.nodes[y as usize].l = Some(zl);
                self.nodes[zl as usize].p = Some(y);
                self.nodes[y as usize].preferred = if z_pref == Some(y) { y_pref } else { z_pref };
                Some(y)
            }
            (child, None) | (None, child) => {
                self.transplant(z, child);
                // the chain through z continues into its only child
                child.filter(|_| z_pref.is_some())
            }
        };

        if let Some(zp) = zp {
            let parent = &mut self.nodes[zp as usize];
            if parent.preferred == Some(z) {
                parent.preferred = replacement;
            }
        }

        let (node, relocation) = self.release(z);
        Removed {
            key: node.key,
            relocation,
        }
    }

    /// Puts `v` where `u` hangs in the tree. `u` keeps its own links.
    fn transplant(&mut self, u: u32, v: Option<u32>) {
        let up = self.nodes[u as usize].p;
        match up {
            None => self.root = v,
            Some(p) => {
                let parent = &mut self.nodes[p as usize];
                if parent.l == Some(u) {
                    parent.l = v;
                } else {
                    parent.r = v;
                }
            }
        }
        if let Some(v) = v {
            self.nodes[v as usize].p = up;
        }
    }

    /// Frees the slot of the unlinked node `z` by moving the last node into
    /// it and redirecting every link to the moved node.
    fn release(&mut self, z: u32) -> (RefNode<K>, Option<Relocation>) {
        let last = (self.nodes.len() - 1) as u32;
        let node = self.nodes.swap_remove(z as usize);
        if z == last {
            return (node, None);
        }

        let (p, l, r) = {
            let moved = &self.nodes[z as usize];
            (moved.p, moved.l, moved.r)
        };
        match p {
            None => self.root = Some(z),
            Some(p) => {
                let parent = &mut self.nodes[p as usize];
                if parent.l == Some(last) {
                    parent.l = Some(z);
                } else {
                    parent.r = Some(z);
                }
                if parent.preferred == Some(last) {
                    parent.preferred = Some(z);
                }
            }
        }
        for c in [l, r].into_iter().flatten() {
            self.nodes[c as usize].p = Some(z);
        }
        (node, Some(Relocation { from: last, to: z }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tree: &ReferenceTree<i32>) -> Vec<i32> {
        tree.keys_in_order().into_iter().copied().collect()
    }

    fn idx(tree: &ReferenceTree<i32>, key: i32) -> u32 {
        tree.search(&key).unwrap()
    }

    fn assert_links(tree: &ReferenceTree<i32>) {
        if let Some(root) = tree.root {
            assert_eq!(tree.nodes[root as usize].p, None);
        }
        for (i, node) in tree.nodes.iter().enumerate() {
            for c in [node.l, node.r].into_iter().flatten() {
                assert_eq!(tree.nodes[c as usize].p, Some(i as u32));
            }
            if let Some(pref) = node.preferred {
                assert!(node.l == Some(pref) || node.r == Some(pref));
            }
        }
        let order = keys(tree);
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(order.len(), tree.len());
    }

    fn walkthrough() -> ReferenceTree<i32> {
        ReferenceTree::build_balanced(vec![10, 20, 30, 40, 50, 60, 70])
    }

    #[test]
    fn build_balanced_shape() {
        let tree = walkthrough();
        assert_eq!(tree.root, Some(3));
        assert_eq!(tree.key(3), &40);
        assert_eq!(tree.node(3).l.map(|i| *tree.key(i)), Some(20));
        assert_eq!(tree.node(3).r.map(|i| *tree.key(i)), Some(60));
        assert_eq!(tree.height(), 3);
        assert_links(&tree);

        let empty = ReferenceTree::<i32>::build_balanced(Vec::new());
        assert_eq!(empty.root, None);
        assert_eq!(empty.height(), 0);
    }

    #[test]
    fn collect_path_present_and_absent() {
        let tree = walkthrough();
        let path: Vec<i32> = tree.collect_path(&50).iter().map(|&i| *tree.key(i)).collect();
        assert_eq!(path, vec![40, 60, 50]);
        let path: Vec<i32> = tree.collect_path(&45).iter().map(|&i| *tree.key(i)).collect();
        assert_eq!(path, vec![40, 60, 50]);
        assert!(ReferenceTree::<i32>::default().collect_path(&1).is_empty());
    }

    #[test]
    fn insert_adds_leaf_and_keeps_duplicates_out() {
        let mut tree = walkthrough();
        let (n, created) = tree.insert(25);
        assert!(created);
        assert_eq!(tree.node(n).p, Some(idx(&tree, 30)));
        assert_eq!(tree.node(idx(&tree, 30)).l, Some(n));

        let (again, created) = tree.insert(25);
        assert!(!created);
        assert_eq!(again, n);
        assert_eq!(tree.len(), 8);
        assert_links(&tree);
    }

    #[test]
    fn subtree_bounds_of_inner_node() {
        let tree = walkthrough();
        let (lo, hi) = tree.subtree_bounds(idx(&tree, 60));
        assert_eq!((*tree.key(lo), *tree.key(hi)), (50, 70));
    }

    #[test]
    fn remove_leaf_clears_parent_marker() {
        let mut tree = walkthrough();
        let p = idx(&tree, 60);
        tree.nodes[p as usize].preferred = Some(idx(&tree, 70));
        let removed = tree.remove(idx(&tree, 70));
        assert_eq!(removed.key, 70);
        assert_eq!(removed.relocation, None);
        assert_eq!(tree.node(idx(&tree, 60)).preferred, None);
        assert_links(&tree);
    }

    #[test]
    fn remove_with_successor_inside_right_subtree() {
        let mut tree = walkthrough();
        tree.insert(25);
        // chain 40 -> 20 -> 30 -> 25
        let (n40, n20, n30, n25) = (idx(&tree, 40), idx(&tree, 20), idx(&tree, 30), idx(&tree, 25));
        tree.nodes[n40 as usize].preferred = Some(n20);
        tree.nodes[n20 as usize].preferred = Some(n30);
        tree.nodes[n30 as usize].preferred = Some(n25);

        let removed = tree.remove(n40);
        assert_eq!(removed.key, 40);
        assert_eq!(tree.key(tree.root.unwrap()), &50);
        assert_eq!(keys(&tree), vec![10, 20, 25, 30, 50, 60, 70]);

        let n50 = idx(&tree, 50);
        assert_eq!(tree.node(n50).preferred, Some(idx(&tree, 20)));
        assert_eq!(tree.node(n50).r, Some(idx(&tree, 60)));
        assert_eq!(tree.node(idx(&tree, 60)).l, None);
        assert_links(&tree);
    }

    #[test]
    fn remove_successor_repairs_markers_of_its_old_parent() {
        let mut tree = ReferenceTree::build_balanced(vec![10, 20, 30, 40, 60, 70, 80]);
        tree.insert(50);
        tree.insert(55);
        // 70 -> 60 -> 50 -> 55; 50 moves up to replace 40, 55 takes its place
        let (n70, n60, n50, n55) = (idx(&tree, 70), idx(&tree, 60), idx(&tree, 50), idx(&tree, 55));
        tree.nodes[n70 as usize].preferred = Some(n60);
        tree.nodes[n60 as usize].preferred = Some(n50);
        tree.nodes[n50 as usize].preferred = Some(n55);
        tree.remove(idx(&tree, 40));
        assert_eq!(tree.key(tree.root.unwrap()), &50);
        assert_eq!(tree.node(idx(&tree, 60)).preferred, Some(idx(&tree, 55)));
        assert_eq!(tree.node(idx(&tree, 70)).preferred, Some(idx(&tree, 60)));
        assert_eq!(tree.node(idx(&tree, 50)).preferred, None);
        assert_links(&tree);

        let mut tree = ReferenceTree::build_balanced(vec![1, 2, 3, 4, 5, 6, 7]);
        // 6 -> 5 where 5 ends the chain: 6 is left with no preferred child
        let (n6, n5) = (idx(&tree, 6), idx(&tree, 5));
        tree.nodes[n6 as usize].preferred = Some(n5);
        tree.remove(idx(&tree, 4));
        assert_eq!(tree.key(tree.root.unwrap()), &5);
        assert_eq!(tree.node(idx(&tree, 6)).preferred, None);
        assert_links(&tree);
    }

    #[test]
    fn remove_compacts_and_relocates_last_node() {
        let mut tree = walkthrough();
        let last_key = *tree.key(6);
        let removed = tree.remove(idx(&tree, 20));
        assert_eq!(removed.relocation, Some(Relocation { from: 6, to: 1 }));
        assert_eq!(tree.key(1), &last_key);
        assert_eq!(tree.len(), 6);
        assert_links(&tree);
    }

    #[test]
    fn remove_down_to_empty() {
        let mut tree = walkthrough();
        for k in [40, 10, 70, 30, 50, 20, 60] {
            tree.remove(idx(&tree, k));
            assert_links(&tree);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root, None);
    }
}
