#![allow(dead_code)]

use std::collections::HashSet;

use splay_forest::types::Node;
use splay_forest::util::in_order;

#[derive(Clone, Debug)]
pub struct TestNode {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: i32,
}

impl TestNode {
    pub fn new(k: i32) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
        }
    }
}

impl Node for TestNode {
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

pub fn cmp_i32(a: &i32, b: &i32) -> i32 {
    a.cmp(b) as i32
}

pub fn key_of(node: &TestNode) -> &i32 {
    &node.k
}

pub fn inorder_keys(arena: &[TestNode], root: Option<u32>) -> Vec<i32> {
    in_order(arena, root)
        .into_iter()
        .map(|i| arena[i as usize].k)
        .collect()
}

/// Balanced tree over `keys` (must be sorted); node `i` holds `keys[i]`.
pub fn balanced_tree(keys: &[i32]) -> (Vec<TestNode>, Option<u32>) {
    fn link(arena: &mut [TestNode], lo: usize, hi: usize, parent: Option<u32>) -> Option<u32> {
        if lo >= hi {
            return None;
        }
        let mid = (lo + hi - 1) / 2;
        arena[mid].p = parent;
        arena[mid].l = link(arena, lo, mid, Some(mid as u32));
        arena[mid].r = link(arena, mid + 1, hi, Some(mid as u32));
        Some(mid as u32)
    }

    let mut arena: Vec<TestNode> = keys.iter().map(|&k| TestNode::new(k)).collect();
    let len = arena.len();
    let root = link(&mut arena, 0, len, None);
    (arena, root)
}

pub fn depth(arena: &[TestNode], mut idx: u32) -> usize {
    let mut d = 0;
    while let Some(p) = arena[idx as usize].p {
        d += 1;
        idx = p;
    }
    d
}

pub fn assert_tree_links(arena: &[TestNode], root: Option<u32>) {
    fn walk(arena: &[TestNode], idx: u32, expected_parent: Option<u32>, visited: &mut HashSet<u32>) {
        assert!(visited.insert(idx), "cycle detected at node {idx}");
        let node = &arena[idx as usize];

        assert_eq!(node.p, expected_parent);
        if let Some(parent) = node.p {
            let parent_node = &arena[parent as usize];
            assert!(parent_node.l == Some(idx) || parent_node.r == Some(idx));
        }

        if let Some(l) = node.l {
            assert!(arena[l as usize].k < node.k, "left child out of order at {idx}");
            walk(arena, l, Some(idx), visited);
        }
        if let Some(r) = node.r {
            assert!(arena[r as usize].k > node.k, "right child out of order at {idx}");
            walk(arena, r, Some(idx), visited);
        }
    }

    let mut visited = HashSet::<u32>::new();
    if let Some(root) = root {
        assert_eq!(arena[root as usize].p, None, "root has a parent");
        walk(arena, root, None, &mut visited);
    }
}
