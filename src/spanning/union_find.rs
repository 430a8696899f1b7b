use ahash::{HashMap, HashMapExt};

use crate::graphs::Vertex;

/// Disjoint sets over arbitrary vertices, with path compression and union by
/// rank.
///
/// Every element is its own parent until it is merged. `find` of an element
/// the forest has not seen yet registers it as a singleton.
#[derive(Clone, Debug)]
pub struct DisjointSetForest<V: Vertex> {
    parent: HashMap<V, V>,
    rank: HashMap<V, u8>,
    number_of_sets: usize,
}

impl<V: Vertex> Default for DisjointSetForest<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> DisjointSetForest<V> {
    pub fn new() -> DisjointSetForest<V> {
        DisjointSetForest {
            parent: HashMap::new(),
            rank: HashMap::new(),
            number_of_sets: 0,
        }
    }

    pub fn from_elements(elements: impl IntoIterator<Item = V>) -> DisjointSetForest<V> {
        let mut forest = DisjointSetForest::new();
        for element in elements {
            forest.make_set(element);
        }
        forest
    }

    /// Adds `element` as a singleton. Returns false if it is already known.
    pub fn make_set(&mut self, element: V) -> bool {
        if self.parent.contains_key(&element) {
            return false;
        }
        self.parent.insert(element.clone(), element.clone());
        self.rank.insert(element, 0);
        self.number_of_sets += 1;
        true
    }

    /// Representative of the set containing `element`. Every vertex on the
    /// walk to the root is afterwards linked to the root directly.
    pub fn find(&mut self, element: &V) -> V {
        if !self.parent.contains_key(element) {
            self.make_set(element.clone());
            return element.clone();
        }

        let mut root = element.clone();
        while let Some(parent) = self.parent.get(&root).filter(|parent| *parent != &root) {
            root = parent.clone();
        }

        let mut current = element.clone();
        while current != root {
            let next = match self.parent.insert(current, root.clone()) {
                Some(next) => next,
                None => break,
            };
            current = next;
        }

        root
    }

    /// Merges the sets of `a` and `b`. Returns false, and changes nothing, if
    /// they already share a representative.
    pub fn union(&mut self, a: &V, b: &V) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let rank_a = self.rank(&root_a);
        let rank_b = self.rank(&root_b);
        let (root, child) = if rank_a < rank_b {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };
        if rank_a == rank_b {
            self.rank.insert(root.clone(), rank_a.saturating_add(1));
        }
        self.parent.insert(child, root);
        self.number_of_sets -= 1;
        true
    }

    pub fn same_set(&mut self, a: &V, b: &V) -> bool {
        self.find(a) == self.find(b)
    }

    pub fn number_of_sets(&self) -> usize {
        self.number_of_sets
    }

    /// Number of elements over all sets.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn rank(&self, root: &V) -> u8 {
        self.rank.get(root).copied().unwrap_or(0)
    }
}
