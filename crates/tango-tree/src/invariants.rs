//! Whole-structure consistency check.
//!
//! Linear in the number of keys. Run after every mutation in debug builds
//! and whenever [`TangoConfig::verify_invariants`](crate::TangoConfig) is
//! set.

use splay_forest::util::in_order;

use crate::auxiliary::AuxForest;
use crate::error::InvariantViolation;
use crate::reference::ReferenceTree;

pub(crate) fn check<K: Ord + Clone>(
    refs: &ReferenceTree<K>,
    forest: &AuxForest<K>,
) -> Result<(), InvariantViolation> {
    check_reference(refs, forest)?;
    let owner = check_partition(refs, forest)?;
    check_chains(refs, forest, &owner)
}

/// Links, key order and markers of the reference tree, plus each node's
/// pointer into the forest.
fn check_reference<K: Ord>(
    refs: &ReferenceTree<K>,
    forest: &AuxForest<K>,
) -> Result<(), InvariantViolation> {
    let total = refs.nodes.len();
    if let Some(root) = refs.root {
        if refs.nodes[root as usize].p.is_some() {
            return Err(InvariantViolation::BrokenLink { node: root });
        }
    }

    let mut reachable = 0;
    let mut stack: Vec<u32> = refs.root.into_iter().collect();
    while let Some(i) = stack.pop() {
        reachable += 1;
        if reachable > total {
            return Err(InvariantViolation::BrokenLink { node: i });
        }
        let node = &refs.nodes[i as usize];
        for c in [node.l, node.r].into_iter().flatten() {
            if refs.nodes[c as usize].p != Some(i) {
                return Err(InvariantViolation::BrokenLink { node: c });
            }
            stack.push(c);
        }
        if let Some(pref) = node.preferred {
            if node.l != Some(pref) && node.r != Some(pref) {
                return Err(InvariantViolation::StalePreferred { node: i });
            }
        }
        let wrapped = node
            .aux_ref
            .and_then(|a| forest.nodes.get(a as usize))
            .is_some_and(|aux| aux.reference == i && aux.key == node.key);
        if !wrapped {
            return Err(InvariantViolation::StaleAuxRef { node: i });
        }
    }
    if reachable != total {
        return Err(InvariantViolation::DetachedNodes {
            reachable,
            allocated: total,
        });
    }

    let order = refs.in_order();
    for pair in order.windows(2) {
        if refs.nodes[pair[0] as usize].key >= refs.nodes[pair[1] as usize].key {
            return Err(InvariantViolation::OutOfOrder { node: pair[1] });
        }
    }
    Ok(())
}

/// Every reference node is wrapped exactly once, and every auxiliary tree
/// is a well-linked BST. Returns the auxiliary root owning each reference
/// node.
fn check_partition<K: Ord>(
    refs: &ReferenceTree<K>,
    forest: &AuxForest<K>,
) -> Result<Vec<Option<u32>>, InvariantViolation> {
    let total = refs.nodes.len();
    let mut owner: Vec<Option<u32>> = vec![None; total];
    let mut covered = 0;

    for root in forest.roots.iter().copied() {
        if forest.nodes.get(root as usize).map_or(true, |n| n.p.is_some()) {
            return Err(InvariantViolation::BrokenAuxLink { node: root });
        }
        let mut stack = vec![root];
        while let Some(a) = stack.pop() {
            let aux = &forest.nodes[a as usize];
            for c in [aux.l, aux.r].into_iter().flatten() {
                if forest.nodes.get(c as usize).map_or(true, |n| n.p != Some(a)) {
                    return Err(InvariantViolation::BrokenAuxLink { node: c });
                }
                stack.push(c);
            }
            let r = aux.reference;
            let Some(slot) = owner.get_mut(r as usize) else {
                return Err(InvariantViolation::BrokenAuxLink { node: a });
            };
            if slot.is_some() {
                return Err(InvariantViolation::DuplicateMember { node: r });
            }
            *slot = Some(root);
            covered += 1;
            if refs.nodes[r as usize].aux_ref != Some(a) {
                return Err(InvariantViolation::StaleAuxRef { node: r });
            }
        }

        let order = in_order(&forest.nodes, Some(root));
        for pair in order.windows(2) {
            if forest.nodes[pair[0] as usize].key >= forest.nodes[pair[1] as usize].key {
                return Err(InvariantViolation::BrokenAuxLink { node: pair[1] });
            }
        }
    }

    if covered != total {
        return Err(InvariantViolation::PartitionMismatch {
            reference: total,
            auxiliary: covered,
        });
    }
    if forest.nodes.len() != covered {
        return Err(InvariantViolation::PartitionMismatch {
            reference: total,
            auxiliary: forest.nodes.len(),
        });
    }
    Ok(owner)
}

/// Each auxiliary tree holds exactly one maximal preferred chain.
fn check_chains<K: Ord + Clone>(
    refs: &ReferenceTree<K>,
    forest: &AuxForest<K>,
    owner: &[Option<u32>],
) -> Result<(), InvariantViolation> {
    for root in forest.roots.iter().copied() {
        let mut members: Vec<u32> = forest.members(root);
        let mut heads = members.iter().copied().filter(|&m| match refs.nodes[m as usize].p {
            None => true,
            Some(p) => refs.nodes[p as usize].preferred != Some(m),
        });
        let (Some(head), None) = (heads.next(), heads.next()) else {
            return Err(InvariantViolation::ChainMismatch { root });
        };

        let mut chain = Vec::with_capacity(members.len());
        let mut curr = Some(head);
        while let Some(c) = curr {
            if owner[c as usize] != Some(root) {
                return Err(InvariantViolation::ChainMismatch { root });
            }
            chain.push(c);
            curr = refs.nodes[c as usize].preferred;
        }
        chain.sort_unstable();
        members.sort_unstable();
        if chain != members {
            return Err(InvariantViolation::ChainMismatch { root });
        }
    }
    Ok(())
}
