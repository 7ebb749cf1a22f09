mod common;

use common::{assert_tree_links, balanced_tree, cmp_i32, inorder_keys, key_of, TestNode};
use splay_forest::util::{
    find, first, in_order, insert, last, link_balanced, next, prev, root_of, size,
};

fn build_tree(keys: &[i32]) -> (Vec<TestNode>, Option<u32>) {
    let mut arena = Vec::<TestNode>::new();
    let mut root = None;
    for key in keys {
        arena.push(TestNode::new(*key));
        let idx = (arena.len() - 1) as u32;
        root = insert(&mut arena, root, idx, key_of, cmp_i32);
    }
    (arena, root)
}

#[test]
fn util_first_next_last_prev_matrix() {
    let (arena, root) = balanced_tree(&[5, 7, 10, 15, 20, 30]);
    assert_eq!(first(&arena, root).map(|i| arena[i as usize].k), Some(5));
    assert_eq!(last(&arena, root).map(|i| arena[i as usize].k), Some(30));
    assert_eq!(inorder_keys(&arena, root), vec![5, 7, 10, 15, 20, 30]);

    let node_20 = find(&arena, root, &20, key_of, cmp_i32).unwrap();
    assert_eq!(prev(&arena, node_20).map(|i| arena[i as usize].k), Some(15));
    assert_eq!(next(&arena, node_20).map(|i| arena[i as usize].k), Some(30));

    let node_5 = find(&arena, root, &5, key_of, cmp_i32).unwrap();
    assert_eq!(prev(&arena, node_5), None);
    let node_30 = find(&arena, root, &30, key_of, cmp_i32).unwrap();
    assert_eq!(next(&arena, node_30), None);
}

#[test]
fn util_empty_tree_matrix() {
    let arena: Vec<TestNode> = Vec::new();
    assert_eq!(first(&arena, None), None);
    assert_eq!(last(&arena, None), None);
    assert_eq!(size(&arena, None), 0);
    assert!(in_order(&arena, None).is_empty());
    assert_eq!(find(&arena, None, &1, key_of, cmp_i32), None);
}

#[test]
fn util_size_find_root_of_matrix() {
    let (arena, root) = balanced_tree(&[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(size(&arena, root), 8);
    assert_eq!(find(&arena, root, &6, key_of, cmp_i32), Some(5));
    assert_eq!(find(&arena, root, &99, key_of, cmp_i32), None);
    for i in 0..8 {
        assert_eq!(Some(root_of(&arena, i)), root);
    }
}

#[test]
fn util_insert_shape_matrix() {
    let (arena0, root0) = build_tree(&[1]);
    assert_eq!(root0, Some(0));
    assert_tree_links(&arena0, root0);

    let (arena1, root1) = build_tree(&[1, 2, -1]);
    assert_eq!(root1, Some(0));
    assert_eq!(arena1[0].r, Some(1));
    assert_eq!(arena1[0].l, Some(2));
    assert_tree_links(&arena1, root1);

    let (arena2, root2) = build_tree(&[1, 0, -1]);
    assert_eq!(arena2[0].l, Some(1));
    assert_eq!(arena2[1].l, Some(2));
    assert_tree_links(&arena2, root2);

    let (arena3, root3) = build_tree(&[1, 5, 2, 3]);
    assert_eq!(arena3[0].r, Some(1));
    assert_eq!(arena3[1].l, Some(2));
    assert_eq!(arena3[2].r, Some(3));
    assert_tree_links(&arena3, root3);
    assert_eq!(inorder_keys(&arena3, root3), vec![1, 2, 3, 5]);
}

#[test]
fn util_in_order_on_degenerate_path_matrix() {
    let keys: Vec<i32> = (0..2_000).collect();
    let (arena, root) = build_tree(&keys);
    assert_eq!(size(&arena, root), keys.len());
    assert_eq!(inorder_keys(&arena, root), keys);
}

#[test]
fn util_link_balanced_matrix() {
    let mut arena: Vec<TestNode> = [10, 20, 30, 40, 50, 60, 70].map(TestNode::new).to_vec();
    let nodes: Vec<u32> = (0..7).collect();
    let root = link_balanced(&mut arena, &nodes);

    assert_eq!(root, Some(3));
    assert_eq!(arena[3].l, Some(1));
    assert_eq!(arena[3].r, Some(5));
    assert_eq!(arena[1].l, Some(0));
    assert_eq!(arena[1].r, Some(2));
    assert_tree_links(&arena, root);
    assert_eq!(inorder_keys(&arena, root), vec![10, 20, 30, 40, 50, 60, 70]);

    // an even count puts the lower middle at the root
    let mut arena: Vec<TestNode> = [1, 2, 3, 4].map(TestNode::new).to_vec();
    let root = link_balanced(&mut arena, &[0, 1, 2, 3]);
    assert_eq!(root, Some(1));
    assert_eq!(arena[1].r, Some(2));
    assert_eq!(arena[2].r, Some(3));

    assert_eq!(link_balanced(&mut arena, &[]), None);
}
