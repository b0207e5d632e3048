//! Lazy rooted graph unfolded from a successor function.

use std::fmt;
use std::hash::Hash;

use crate::rooted::RootedGraph;

/// Rooted graph given by explicit roots and a successor closure.
///
/// This is the adapter between an operational semantics ("which states
/// follow this one") and the traversal machinery: no part of the state
/// space exists until a traversal asks for it. The closure must be
/// deterministic, always producing the same successors in the same order
/// for a given vertex.
pub struct SuccessorGraph<V, F> {
    roots: Vec<V>,
    successors: F,
    has_cycles: bool,
    has_sharing: bool,
}

impl<V, F> SuccessorGraph<V, F>
where
    V: Clone + Eq + Hash + fmt::Debug,
    F: Fn(&V) -> Vec<V>,
{
    pub fn new(roots: Vec<V>, successors: F) -> Self {
        Self {
            roots,
            successors,
            has_cycles: true,
            has_sharing: true,
        }
    }

    pub fn with_hints(mut self, has_cycles: bool, has_sharing: bool) -> Self {
        self.has_cycles = has_cycles;
        self.has_sharing = has_sharing;
        self
    }
}

impl<V, F> RootedGraph for SuccessorGraph<V, F>
where
    V: Clone + Eq + Hash + fmt::Debug,
    F: Fn(&V) -> Vec<V>,
{
    type Vertex = V;
    type Roots = std::vec::IntoIter<V>;
    type Neighbours = std::vec::IntoIter<V>;

    fn roots(&self) -> Self::Roots {
        self.roots.clone().into_iter()
    }

    fn neighbours(&self, vertex: &V) -> Self::Neighbours {
        (self.successors)(vertex).into_iter()
    }

    fn has_cycles(&self) -> bool {
        self.has_cycles
    }

    fn has_sharing(&self) -> bool {
        self.has_sharing
    }
}

impl<V: fmt::Debug, F> fmt::Debug for SuccessorGraph<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuccessorGraph")
            .field("roots", &self.roots)
            .field("has_cycles", &self.has_cycles)
            .field("has_sharing", &self.has_sharing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successors_computed_on_demand() {
        let graph = SuccessorGraph::new(vec![0u32], |n: &u32| vec![(n + 1) % 5]);
        assert_eq!(graph.neighbours(&0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(graph.neighbours(&4).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_neighbours_restart() {
        let graph = SuccessorGraph::new(vec![0u32], |n: &u32| vec![n + 1, n + 2]);
        let first: Vec<u32> = graph.neighbours(&7).collect();
        let second: Vec<u32> = graph.neighbours(&7).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![8, 9]);
    }

    #[test]
    fn test_hints_narrowable() {
        let graph =
            SuccessorGraph::new(vec![0u32], |n: &u32| if *n < 3 { vec![n + 1] } else { vec![] })
                .with_hints(false, false);
        assert!(graph.is_tree());
    }
}
