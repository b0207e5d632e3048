//! Mutable exploration state: the frame stack plus a known-set.

use std::fmt;

use omega_graph::RootedGraph;

use crate::frame::Frame;
use crate::known::KnownSet;

/// The complete state of one traversal: a stack of [`Frame`]s over a
/// known-set strategy `K`, with an auxiliary payload `A` on every frame.
///
/// A configuration carries no verdicts and no policy; engines drive it and
/// callbacks read and annotate it. `initial` returns it to the canonical
/// start state at any time, and a configuration left behind by a stopped
/// run resumes exactly where it was.
pub struct Configuration<G: RootedGraph, K, A = ()> {
    stack: Vec<Frame<G, A>>,
    known: K,
}

impl<G: RootedGraph, K> Configuration<G, K> {
    pub fn new(known: K) -> Self {
        Self {
            stack: Vec::new(),
            known,
        }
    }
}

impl<G: RootedGraph, K, A> Configuration<G, K, A> {
    /// Like [`Configuration::new`] for configurations whose frames carry a
    /// non-unit payload; the payload type is fixed by use.
    pub fn with_aux(known: K) -> Self {
        Self {
            stack: Vec::new(),
            known,
        }
    }

    pub fn push(&mut self, frame: Frame<G, A>) {
        self.stack.push(frame);
    }

    /// Remove and return the top frame.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty. The engines never pop past the
    /// terminal state, so an empty pop is a bug in the caller rather than a
    /// runtime condition to recover from.
    pub fn pop(&mut self) -> Frame<G, A> {
        match self.stack.pop() {
            Some(frame) => frame,
            None => panic!("popped an empty traversal stack"),
        }
    }

    pub fn peek(&self) -> Option<&Frame<G, A>> {
        self.stack.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Frame<G, A>> {
        self.stack.last_mut()
    }

    /// True once the stack has emptied, the terminal state of a run.
    pub fn is_terminal(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of vertex frames on the stack. Assumes the single bottom
    /// sentinel placed by [`Configuration::initial`] or
    /// [`Configuration::reroot_at`].
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// The vertex of the top frame, `None` for a sentinel top.
    pub fn top_vertex(&self) -> Option<&G::Vertex> {
        self.stack.last().and_then(Frame::vertex)
    }

    pub fn top_aux_mut(&mut self) -> Option<&mut A> {
        self.stack.last_mut().map(Frame::aux_mut)
    }

    /// Read access to the frame stack, bottom to top.
    pub fn stack(&self) -> &[Frame<G, A>] {
        &self.stack
    }

    /// The vertices currently on the stack, oldest first, sentinels
    /// excluded. This is the live path from a root to the current position,
    /// as used for counterexample traces.
    pub fn stack_vertices(&self) -> impl Iterator<Item = &G::Vertex> + '_ {
        self.stack.iter().filter_map(Frame::vertex)
    }

    pub fn known(&self) -> &K {
        &self.known
    }

    pub fn known_mut(&mut self) -> &mut K {
        &mut self.known
    }

    pub(crate) fn advance_top(&mut self) -> Option<G::Vertex> {
        self.stack.last_mut().and_then(Frame::next_pending)
    }

    pub(crate) fn peek_top_pending(&mut self) -> Option<&G::Vertex> {
        self.stack.last_mut().and_then(|frame| frame.peek_pending())
    }
}

impl<G, K, A> Configuration<G, K, A>
where
    G: RootedGraph,
    K: KnownSet<G::Vertex>,
    A: Default,
{
    /// Reset to the canonical start state: empty known-set and a single
    /// sentinel frame pending the graph's roots. Idempotent.
    pub fn initial(&mut self, graph: &G) {
        self.known.clear();
        self.stack.clear();
        self.stack.push(Frame::sentinel(graph));
    }

    /// Replace the stack with a sentinel frame over `at`'s neighbours,
    /// keeping the known-set as it stands. Entry point for secondary
    /// searches that re-root at an already visited vertex and must build on
    /// the primary search's discoveries.
    pub fn reroot_at(&mut self, graph: &G, at: &G::Vertex) {
        self.stack.clear();
        self.stack.push(Frame::rerooted(graph, at));
    }

    pub fn knows(&self, vertex: &G::Vertex) -> bool {
        self.known.knows(vertex)
    }

    /// Mark `vertex` known and push its frame.
    pub fn discover(&mut self, graph: &G, vertex: G::Vertex) {
        self.known.insert(&vertex);
        self.stack.push(Frame::discovered(graph, vertex));
    }
}

impl<G, K, A> fmt::Debug for Configuration<G, K, A>
where
    G: RootedGraph,
    K: KnownSet<G::Vertex>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("depth", &self.depth())
            .field("known", &self.known.len())
            .finish_non_exhaustive()
    }
}
