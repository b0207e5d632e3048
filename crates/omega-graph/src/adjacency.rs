//! Finite in-memory rooted graph backed by adjacency lists.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::rooted::RootedGraph;

type EdgeList<V> = SmallVec<[V; 4]>;

/// Explicit finite graph: a root list plus per-vertex adjacency lists.
///
/// Vertices and neighbours enumerate in insertion order, so two traversals
/// over the same construction sequence observe identical sequences. That
/// determinism is what makes counterexample traces reproducible.
///
/// The shape hints default to the conservative `true`/`true`;
/// [`into_tree`] and [`with_hints`] narrow them for callers that know
/// better. The hints are taken at face value.
///
/// [`into_tree`]: AdjacencyGraph::into_tree
/// [`with_hints`]: AdjacencyGraph::with_hints
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<V> {
    roots: Vec<V>,
    edges: IndexMap<V, EdgeList<V>>,
    has_cycles: bool,
    has_sharing: bool,
}

impl<V: Clone + Eq + Hash + fmt::Debug> AdjacencyGraph<V> {
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            edges: IndexMap::new(),
            has_cycles: true,
            has_sharing: true,
        }
    }

    /// Build from explicit roots and an edge list. Every mentioned vertex
    /// is registered in first-mention order.
    pub fn from_edges(
        roots: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = (V, V)>,
    ) -> Self {
        let mut graph = Self::new();
        for root in roots {
            graph.add_root(root);
        }
        for (source, target) in edges {
            graph.add_edge(source, target);
        }
        graph
    }

    pub fn add_root(&mut self, vertex: V) {
        self.edges.entry(vertex.clone()).or_default();
        self.roots.push(vertex);
    }

    pub fn add_edge(&mut self, source: V, target: V) {
        self.edges.entry(target.clone()).or_default();
        self.edges.entry(source).or_default().push(target);
    }

    /// Declare this graph cycle- and sharing-free. Wrong declarations make
    /// tree traversals over it unsound; nothing checks them.
    pub fn into_tree(mut self) -> Self {
        self.has_cycles = false;
        self.has_sharing = false;
        self
    }

    pub fn with_hints(mut self, has_cycles: bool, has_sharing: bool) -> Self {
        self.has_cycles = has_cycles;
        self.has_sharing = has_sharing;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|list| list.len()).sum()
    }

    /// All registered vertices in first-mention order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.edges.keys()
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.edges.contains_key(vertex)
    }
}

impl<V: Clone + Eq + Hash + fmt::Debug> Default for AdjacencyGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash + fmt::Debug> RootedGraph for AdjacencyGraph<V> {
    type Vertex = V;
    type Roots = std::vec::IntoIter<V>;
    type Neighbours = smallvec::IntoIter<[V; 4]>;

    fn roots(&self) -> Self::Roots {
        self.roots.clone().into_iter()
    }

    fn neighbours(&self, vertex: &V) -> Self::Neighbours {
        self.edges
            .get(vertex)
            .cloned()
            .unwrap_or_default()
            .into_iter()
    }

    fn has_cycles(&self) -> bool {
        self.has_cycles
    }

    fn has_sharing(&self) -> bool {
        self.has_sharing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours_preserve_insertion_order() {
        let graph = AdjacencyGraph::from_edges([1u32], [(1, 3), (1, 2), (2, 1)]);
        let order: Vec<u32> = graph.neighbours(&1).collect();
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn test_neighbours_restart() {
        let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (1, 3)]);
        let first: Vec<u32> = graph.neighbours(&1).collect();
        let second: Vec<u32> = graph.neighbours(&1).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_vertex_has_no_neighbours() {
        let graph = AdjacencyGraph::from_edges([1u32], [(1, 2)]);
        assert_eq!(graph.neighbours(&99).count(), 0);
    }

    #[test]
    fn test_edges_register_both_endpoints() {
        let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 3)]);
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains(&3));
    }

    #[test]
    fn test_hints_default_conservative_and_narrowable() {
        let graph = AdjacencyGraph::from_edges([1u32], [(1, 2)]);
        assert!(graph.has_cycles());
        assert!(graph.has_sharing());
        assert!(!graph.is_tree());

        let tree = graph.into_tree();
        assert!(tree.is_tree());
    }
}
