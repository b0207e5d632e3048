//! Event capture for instrumentation and cross-engine equivalence checks.

use omega_graph::RootedGraph;

use crate::callback::{Callbacks, Flow};
use crate::config::Configuration;
use crate::frame::Frame;

/// One observable callback occurrence, with owned vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraversalEvent<V> {
    /// `target` discovered over the edge `source -> target`.
    Entry { source: Option<V>, target: V },
    /// An edge led to the already known `target`.
    Known { source: Option<V>, target: V },
    /// `vertex` exhausted its neighbours and left the stack.
    Exit { vertex: V },
}

/// Records the full ordered event sequence of a run.
///
/// The iterative and relational engines must produce identical sequences on
/// identical graphs; the equivalence tests compare two recorders verbatim.
#[derive(Clone, Debug)]
pub struct Recorder<V> {
    pub events: Vec<TraversalEvent<V>>,
}

impl<V> Recorder<V> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn entry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, TraversalEvent::Entry { .. }))
            .count()
    }

    pub fn known_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, TraversalEvent::Known { .. }))
            .count()
    }

    pub fn exit_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, TraversalEvent::Exit { .. }))
            .count()
    }
}

impl<V> Default for Recorder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: RootedGraph, K, A> Callbacks<G, K, A> for Recorder<G::Vertex> {
    fn on_entry(
        &mut self,
        source: Option<&G::Vertex>,
        target: &G::Vertex,
        _config: &mut Configuration<G, K, A>,
    ) -> Flow {
        self.events.push(TraversalEvent::Entry {
            source: source.cloned(),
            target: target.clone(),
        });
        Flow::Continue
    }

    fn on_known(
        &mut self,
        source: Option<&G::Vertex>,
        target: &G::Vertex,
        _config: &mut Configuration<G, K, A>,
    ) -> Flow {
        self.events.push(TraversalEvent::Known {
            source: source.cloned(),
            target: target.clone(),
        });
        Flow::Continue
    }

    fn on_exit(
        &mut self,
        vertex: &G::Vertex,
        _frame: &mut Frame<G, A>,
        _config: &mut Configuration<G, K, A>,
    ) -> Flow {
        self.events.push(TraversalEvent::Exit {
            vertex: vertex.clone(),
        });
        Flow::Continue
    }
}
