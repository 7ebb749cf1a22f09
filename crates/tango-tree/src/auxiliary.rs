//! Auxiliary trees: one splay tree per preferred path, keyed by the keys of
//! the reference nodes on that path.
//!
//! All auxiliary nodes share one arena. An auxiliary tree is identified by
//! the index of its current root, which changes on every split and merge;
//! `roots` always holds the live set.

use std::collections::BTreeSet;

use splay_forest::types::Node;
use splay_forest::util::{in_order, link_balanced, root_of};

use crate::reference::ReferenceTree;

#[derive(Clone, Debug)]
pub struct AuxNode<K> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    pub(crate) key: K,
    /// Reference node this auxiliary node stands for.
    pub(crate) reference: u32,
}

impl<K> AuxNode<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn reference(&self) -> u32 {
        self.reference
    }
}

impl<K> Node for AuxNode<K> {
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

#[derive(Clone, Debug)]
pub struct AuxForest<K> {
    pub(crate) nodes: Vec<AuxNode<K>>,
    pub(crate) roots: BTreeSet<u32>,
}

impl<K> Default for AuxForest<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: BTreeSet::new(),
        }
    }
}

impl<K: Ord + Clone> AuxForest<K> {
    /// Number of auxiliary nodes across all trees.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tree_count(&self) -> usize {
        self.roots.len()
    }

    pub fn roots(&self) -> impl Iterator<Item = u32> + '_ {
        self.roots.iter().copied()
    }

    pub fn node(&self, idx: u32) -> &AuxNode<K> {
        &self.nodes[idx as usize]
    }

    /// Root of the auxiliary tree containing `idx`.
    pub fn root_of(&self, idx: u32) -> u32 {
        root_of(&self.nodes, idx)
    }

    /// Reference nodes of the tree rooted at `root`, in key order.
    pub fn members(&self, root: u32) -> Vec<u32> {
        in_order(&self.nodes, Some(root))
            .into_iter()
            .map(|a| self.nodes[a as usize].reference)
            .collect()
    }

    pub fn keys(&self, root: u32) -> Vec<&K> {
        in_order(&self.nodes, Some(root))
            .into_iter()
            .map(|a| &self.nodes[a as usize].key)
            .collect()
    }

    /// Key sets of every auxiliary tree, ordered by their smallest key.
    pub fn partitions(&self) -> Vec<Vec<&K>> {
        let mut parts: Vec<Vec<&K>> = self.roots().map(|root| self.keys(root)).collect();
        parts.sort();
        parts
    }

    fn alloc(&mut self, refs: &mut ReferenceTree<K>, reference: u32) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(AuxNode {
            p: None,
            l: None,
            r: None,
            key: refs.nodes[reference as usize].key.clone(),
            reference,
        });
        refs.nodes[reference as usize].aux_ref = Some(idx);
        idx
    }

    /// Wraps a reference node that belongs to no chain yet in a tree of
    /// its own.
    pub(crate) fn singleton(&mut self, refs: &mut ReferenceTree<K>, reference: u32) -> u32 {
        let idx = self.alloc(refs, reference);
        self.roots.insert(idx);
        idx
    }

    /// Builds one balanced tree over the reference nodes of a chain. The
    /// chain may be given in path order; members are sorted by key first.
    pub(crate) fn build_chain(&mut self, refs: &mut ReferenceTree<K>, chain: &[u32]) -> Option<u32> {
        let mut members = chain.to_vec();
        members.sort_by(|&a, &b| refs.nodes[a as usize].key.cmp(&refs.nodes[b as usize].key));
        let wrapped: Vec<u32> = members.into_iter().map(|r| self.alloc(refs, r)).collect();
        let root = link_balanced(&mut self.nodes, &wrapped);
        self.roots.extend(root);
        root
    }

    /// Drops every auxiliary tree and detaches all reference nodes.
    pub(crate) fn clear(&mut self, refs: &mut ReferenceTree<K>) {
        for node in &self.nodes {
            if let Some(r) = refs.nodes.get_mut(node.reference as usize) {
                r.aux_ref = None;
            }
        }
        self.nodes.clear();
        self.roots.clear();
    }

    /// Frees the auxiliary node `idx`, which must be the only node of its
    /// tree. The last node of the arena moves into the freed slot.
    pub(crate) fn release(&mut self, refs: &mut ReferenceTree<K>, idx: u32) {
        debug_assert!(self.roots.contains(&idx));
        debug_assert!(self.nodes[idx as usize].l.is_none() && self.nodes[idx as usize].r.is_none());

        self.roots.remove(&idx);
        let last = (self.nodes.len() - 1) as u32;
        let node = self.nodes.swap_remove(idx as usize);
        refs.nodes[node.reference as usize].aux_ref = None;
        if idx == last {
            return;
        }

        let (p, l, r, reference) = {
            let moved = &self.nodes[idx as usize];
            (moved.p, moved.l, moved.r, moved.reference)
        };
        match p {
            None => {
                self.roots.remove(&last);
                self.roots.insert(idx);
            }
            Some(p) => {
                let parent = &mut self.nodes[p as usize];
                if parent.l == Some(last) {
                    parent.l = Some(idx);
                } else {
                    parent.r = Some(idx);
                }
            }
        }
        for c in [l, r].into_iter().flatten() {
            self.nodes[c as usize].p = Some(idx);
        }
        refs.nodes[reference as usize].aux_ref = Some(idx);
    }
}
