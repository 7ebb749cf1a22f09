//! The public ordered-set surface.

use std::fmt::Debug;

use crate::auxiliary::AuxForest;
use crate::config::{RebuildPolicy, TangoConfig};
use crate::decomposition::{apply_flips, mark_preferred_along_path, rebuild_aux_trees, remove_node};
use crate::error::{InvariantViolation, TangoError};
use crate::invariants;
use crate::reference::ReferenceTree;
use crate::trace::{debug_log, trace_log};

/// An ordered set of distinct keys kept as a tango tree.
///
/// The reference tree fixes the shape; accesses only move preferred
/// markers and regroup the auxiliary splay trees.
///
/// ```
/// use tango_tree::Tango;
///
/// let mut set = Tango::build([10, 20, 30, 40, 50, 60, 70]).unwrap();
/// assert_eq!(set.access(&50), Ok(&50));
/// assert_eq!(set.auxiliary_partitions()[3], vec![&40, &50, &60]);
///
/// set.insert(25);
/// assert_eq!(set.remove(&40), Some(40));
/// assert!(set.access(&40).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Tango<K> {
    reference: ReferenceTree<K>,
    forest: AuxForest<K>,
    config: TangoConfig,
}

impl<K: Ord + Clone + Debug> Default for Tango<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone + Debug> Tango<K> {
    pub fn new() -> Self {
        Self::with_config(TangoConfig::default())
    }

    pub fn with_config(config: TangoConfig) -> Self {
        Self {
            reference: ReferenceTree::default(),
            forest: AuxForest::default(),
            config,
        }
    }

    /// Builds a balanced tango tree over strictly increasing `keys`, with
    /// every node on a preferred path of its own.
    pub fn build<I: IntoIterator<Item = K>>(keys: I) -> Result<Self, TangoError> {
        Self::build_with_config(keys, TangoConfig::default())
    }

    pub fn build_with_config<I: IntoIterator<Item = K>>(
        keys: I,
        config: TangoConfig,
    ) -> Result<Self, TangoError> {
        let keys: Vec<K> = keys.into_iter().collect();
        if let Some(i) = keys.windows(2).position(|w| w[0] >= w[1]) {
            return Err(TangoError::UnsortedKeys { index: i + 1 });
        }

        let mut reference = ReferenceTree::build_balanced(keys);
        let mut forest = AuxForest::default();
        rebuild_aux_trees(&mut reference, &mut forest);
        debug_log!(
            len = reference.len(),
            height = reference.height(),
            policy = ?config.policy,
            "built tango tree"
        );

        let tango = Self {
            reference,
            forest,
            config,
        };
        tango.verify();
        Ok(tango)
    }

    pub fn config(&self) -> &TangoConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Height of the reference tree in nodes.
    pub fn height(&self) -> usize {
        self.reference.height()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.reference.search(key).is_some()
    }

    /// Looks `key` up without touching the preferred paths.
    pub fn search(&self, key: &K) -> Result<&K, TangoError> {
        self.reference
            .search(key)
            .map(|i| self.reference.key(i))
            .ok_or(TangoError::KeyNotFound)
    }

    /// Looks `key` up and makes the root-to-key search path the preferred
    /// path. Every other node loses its preferred child. A missing key
    /// leaves the structure untouched.
    pub fn access(&mut self, key: &K) -> Result<&K, TangoError> {
        let path = self.reference.collect_path(key);
        let Some(&target) = path.last().filter(|&&i| self.reference.key(i) == key) else {
            trace_log!(?key, "access miss");
            return Err(TangoError::KeyNotFound);
        };

        let flips = mark_preferred_along_path(&mut self.reference, &path);
        match self.config.policy {
            RebuildPolicy::Full => rebuild_aux_trees(&mut self.reference, &mut self.forest),
            RebuildPolicy::Incremental => apply_flips(&self.reference, &mut self.forest, &flips),
        }
        trace_log!(
            ?key,
            depth = path.len(),
            flips = flips.len(),
            "access"
        );
        self.verify();
        Ok(self.reference.key(target))
    }

    /// Inserts `key` as a new leaf in its own preferred path. Inserting a
    /// present key changes nothing. Returns the stored key.
    pub fn insert(&mut self, key: K) -> &K {
        let (idx, created) = self.reference.insert(key);
        match self.config.policy {
            RebuildPolicy::Full => rebuild_aux_trees(&mut self.reference, &mut self.forest),
            RebuildPolicy::Incremental if created => {
                self.forest.singleton(&mut self.reference, idx);
            }
            RebuildPolicy::Incremental => {}
        }
        trace_log!(key = ?self.reference.key(idx), created, "insert");
        self.verify();
        self.reference.key(idx)
    }

    /// Removes `key` and returns it, or `None` when it is absent.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let z = self.reference.search(key)?;
        let removed = match self.config.policy {
            RebuildPolicy::Full => {
                self.forest.clear(&mut self.reference);
                let removed = self.reference.remove(z);
                rebuild_aux_trees(&mut self.reference, &mut self.forest);
                removed
            }
            RebuildPolicy::Incremental => remove_node(&mut self.reference, &mut self.forest, z),
        };
        trace_log!(
            key = ?removed.key,
            relocated = removed.relocation.is_some(),
            "remove"
        );
        self.verify();
        Some(removed.key)
    }

    /// All keys in increasing order.
    pub fn keys_in_order(&self) -> Vec<&K> {
        self.reference.keys_in_order()
    }

    /// Key sets of the current preferred paths, one per auxiliary tree,
    /// ordered by their smallest key.
    pub fn auxiliary_partitions(&self) -> Vec<Vec<&K>> {
        self.forest.partitions()
    }

    /// Keys of the preferred path holding `key`, in increasing order.
    pub fn preferred_path_of(&self, key: &K) -> Option<Vec<&K>> {
        let idx = self.reference.search(key)?;
        let aux = self.reference.node(idx).aux_ref()?;
        Some(self.forest.keys(self.forest.root_of(aux)))
    }

    pub fn reference(&self) -> &ReferenceTree<K> {
        &self.reference
    }

    pub fn forest(&self) -> &AuxForest<K> {
        &self.forest
    }

    /// Checks every structural invariant linking the reference tree to its
    /// auxiliary forest.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariants::check(&self.reference, &self.forest)
    }

    fn verify(&self) {
        if !(cfg!(debug_assertions) || self.config.verify_invariants) {
            return;
        }
        if let Err(violation) = self.check_invariants() {
            panic!("tango tree invariant violated: {violation}");
        }
    }
}
