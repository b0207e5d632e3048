//! The rooted-graph contract consumed by every traversal in this workspace.

use std::fmt;
use std::hash::Hash;

/// A graph given by an enumerable set of starting vertices and, per vertex,
/// an enumerable neighbour sequence.
///
/// Implementations enumerate lazily. Both [`roots`] and [`neighbours`]
/// return a fresh, finite, restartable iterator on every call: a caller may
/// ask for the same vertex's neighbours repeatedly (a nested search re-roots
/// at a vertex the outer search has already finished) and must observe the
/// same vertices in the same order each time. Enumeration is expected to be
/// free of side effects.
///
/// The iterator types are owned rather than borrowed so that traversal
/// frames can hold a partially consumed neighbour sequence while the search
/// descends below the vertex that produced it.
///
/// [`roots`]: RootedGraph::roots
/// [`neighbours`]: RootedGraph::neighbours
pub trait RootedGraph {
    /// Vertex type. Equality and hashing define vertex identity; the graph
    /// assigns no identity of its own.
    type Vertex: Clone + Eq + Hash + fmt::Debug;
    /// Fresh enumeration of the roots.
    type Roots: Iterator<Item = Self::Vertex>;
    /// Fresh enumeration of one vertex's neighbours.
    type Neighbours: Iterator<Item = Self::Vertex>;

    fn roots(&self) -> Self::Roots;

    fn neighbours(&self, vertex: &Self::Vertex) -> Self::Neighbours;

    /// Hint: may this graph contain cycles? Defaults to the safe answer.
    fn has_cycles(&self) -> bool {
        true
    }

    /// Hint: may two distinct paths from a root meet in one vertex?
    /// Defaults to the safe answer.
    fn has_sharing(&self) -> bool {
        true
    }

    /// A graph is a tree exactly when it declares neither cycles nor
    /// sharing.
    ///
    /// Tree graphs admit a traversal configuration that keeps no visited
    /// set at all. The hints are declarations, not measurements: claiming
    /// tree shape for a graph that does share or cycle yields duplicated
    /// visits or non-termination. There is no safety net.
    fn is_tree(&self) -> bool {
        !self.has_cycles() && !self.has_sharing()
    }
}
