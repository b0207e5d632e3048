//! Stack frames of the explicit depth-first traversal.

use std::fmt;
use std::iter::Peekable;

use omega_graph::RootedGraph;

/// Pending enumeration held by a frame: the root sequence for a sentinel
/// frame, a neighbour sequence for every other frame.
pub enum PendingIter<G: RootedGraph> {
    Roots(G::Roots),
    Neighbours(G::Neighbours),
}

impl<G: RootedGraph> Iterator for PendingIter<G> {
    type Item = G::Vertex;

    fn next(&mut self) -> Option<G::Vertex> {
        match self {
            PendingIter::Roots(iter) => iter.next(),
            PendingIter::Neighbours(iter) => iter.next(),
        }
    }
}

impl<G: RootedGraph> fmt::Debug for PendingIter<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingIter::Roots(_) => f.write_str("PendingIter::Roots"),
            PendingIter::Neighbours(_) => f.write_str("PendingIter::Neighbours"),
        }
    }
}

/// One frame of the traversal stack: the vertex under exploration (`None`
/// for the root sentinel), its partially consumed pending sequence, and an
/// auxiliary payload for algorithms layered on the engine.
pub struct Frame<G: RootedGraph, A = ()> {
    vertex: Option<G::Vertex>,
    pending: Peekable<PendingIter<G>>,
    aux: A,
}

impl<G: RootedGraph, A> Frame<G, A> {
    /// The sentinel frame over the graph's roots.
    pub fn sentinel(graph: &G) -> Self
    where
        A: Default,
    {
        Frame {
            vertex: None,
            pending: PendingIter::Roots(graph.roots()).peekable(),
            aux: A::default(),
        }
    }

    /// A frame for a freshly discovered vertex, pending its neighbours.
    pub fn discovered(graph: &G, vertex: G::Vertex) -> Self
    where
        A: Default,
    {
        let pending = PendingIter::Neighbours(graph.neighbours(&vertex)).peekable();
        Frame {
            vertex: Some(vertex),
            pending,
            aux: A::default(),
        }
    }

    /// A sentinel-like frame over one vertex's neighbours, used when a
    /// nested search re-roots at an already visited vertex.
    pub fn rerooted(graph: &G, at: &G::Vertex) -> Self
    where
        A: Default,
    {
        Frame {
            vertex: None,
            pending: PendingIter::Neighbours(graph.neighbours(at)).peekable(),
            aux: A::default(),
        }
    }

    pub fn vertex(&self) -> Option<&G::Vertex> {
        self.vertex.as_ref()
    }

    pub fn is_sentinel(&self) -> bool {
        self.vertex.is_none()
    }

    pub fn aux(&self) -> &A {
        &self.aux
    }

    pub fn aux_mut(&mut self) -> &mut A {
        &mut self.aux
    }

    pub(crate) fn next_pending(&mut self) -> Option<G::Vertex> {
        self.pending.next()
    }

    pub(crate) fn peek_pending(&mut self) -> Option<&G::Vertex> {
        self.pending.peek()
    }

    pub(crate) fn take_vertex(&mut self) -> Option<G::Vertex> {
        self.vertex.take()
    }
}

impl<G: RootedGraph, A: fmt::Debug> fmt::Debug for Frame<G, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("vertex", &self.vertex)
            .field("aux", &self.aux)
            .finish_non_exhaustive()
    }
}
