//! The traversal re-expressed as an explicit action/transition relation.
//!
//! [`StepRelation`] splits one engine step into "decide the next action"
//! and "apply it". The generic sequencer [`run_relation`] then replays the
//! same state machine as the iterative engine, while [`SyncProduct`]
//! composes the traversal with a second relation keyed on the same actions,
//! so observers can be modeled as components of a product system instead of
//! imperative hooks.
//!
//! Both engines are observationally equivalent: identical callback
//! sequences and identical final configurations on every graph. The
//! equivalence is demonstrated by tests rather than by one engine
//! delegating to the other.

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;
use tracing::trace;

use omega_graph::RootedGraph;

use crate::callback::{Callbacks, Flow};
use crate::config::Configuration;
use crate::engine::{EngineOptions, RunOutcome};
use crate::known::KnownSet;

/// One observable step of the traversal state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraversalAction<V> {
    /// Consume the edge to the fresh `target`, mark it known, push its
    /// frame and fire `on_entry`.
    Discover { source: Option<V>, target: V },
    /// Consume the edge to the already known `target` and fire `on_known`.
    Revisit { source: Option<V>, target: V },
    /// Pop the exhausted top frame; fires `on_exit` unless the frame is a
    /// sentinel (`vertex: None`).
    Backtrack { vertex: Option<V> },
}

/// Rejected applications of an action to a configuration it was not
/// decided against. [`run_relation`] feeds a relation its own decisions,
/// which always apply; only externally supplied actions can be rejected.
///
/// Vertices are rendered to strings so the error type stays free of the
/// graph's type parameters.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{action} applied to a configuration with no pending neighbour")]
    NoPendingNeighbour { action: &'static str },
    #[error("{action} expected pending neighbour {expected}, found {found}")]
    NeighbourMismatch {
        action: &'static str,
        expected: String,
        found: String,
    },
    #[error("{action} does not match the discovery state of {vertex}")]
    DiscoveryMismatch {
        action: &'static str,
        vertex: String,
    },
    #[error("backtrack expected top frame {expected}, found {found}")]
    BacktrackMismatch { expected: String, found: String },
    #[error("backtrack applied to an empty stack")]
    EmptyStack,
}

/// A state/action/transition relation: repeatedly asked to decide the next
/// action, then to execute it.
pub trait StepRelation {
    type State;
    type Action: fmt::Debug;

    /// Decide the next action, or `None` when the state is terminal.
    ///
    /// Takes the state mutably because deciding may need to peek (and
    /// thereby cache) the next pending neighbour; the decision is still
    /// observationally read-only.
    fn next_action(&mut self, state: &mut Self::State) -> Option<Self::Action>;

    /// Execute `action` against `state`.
    fn apply(&mut self, state: &mut Self::State, action: Self::Action) -> Result<Flow, StepError>;
}

/// The traversal engine as a relation over [`Configuration`] states.
pub struct TraversalRelation<'g, G, K, A, C> {
    graph: &'g G,
    callbacks: C,
    options: EngineOptions,
    _marker: PhantomData<fn() -> (K, A)>,
}

impl<'g, G: RootedGraph, K, A, C> TraversalRelation<'g, G, K, A, C> {
    pub fn new(graph: &'g G, callbacks: C, options: EngineOptions) -> Self {
        Self {
            graph,
            callbacks,
            options,
            _marker: PhantomData,
        }
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    pub fn into_callbacks(self) -> C {
        self.callbacks
    }
}

impl<'g, G, K, A, C> StepRelation for TraversalRelation<'g, G, K, A, C>
where
    G: RootedGraph,
    K: KnownSet<G::Vertex>,
    A: Default,
    C: Callbacks<G, K, A>,
{
    type State = Configuration<G, K, A>;
    type Action = TraversalAction<G::Vertex>;

    fn next_action(&mut self, state: &mut Self::State) -> Option<Self::Action> {
        if state.is_terminal() {
            return None;
        }
        let may_descend = self
            .options
            .depth_bound
            .map_or(true, |bound| state.depth() <= bound);
        if may_descend {
            if let Some(target) = state.peek_top_pending().cloned() {
                let source = state.top_vertex().cloned();
                let action = if state.knows(&target) {
                    TraversalAction::Revisit { source, target }
                } else {
                    TraversalAction::Discover { source, target }
                };
                return Some(action);
            }
        }
        let vertex = state.top_vertex().cloned();
        Some(TraversalAction::Backtrack { vertex })
    }

    fn apply(&mut self, state: &mut Self::State, action: Self::Action) -> Result<Flow, StepError> {
        trace!(?action, "apply");
        match action {
            TraversalAction::Discover { source, target } => {
                let Some(next) = state.advance_top() else {
                    return Err(StepError::NoPendingNeighbour { action: "discover" });
                };
                if next != target {
                    return Err(StepError::NeighbourMismatch {
                        action: "discover",
                        expected: format!("{target:?}"),
                        found: format!("{next:?}"),
                    });
                }
                if state.knows(&target) {
                    return Err(StepError::DiscoveryMismatch {
                        action: "discover",
                        vertex: format!("{target:?}"),
                    });
                }
                state.discover(self.graph, target.clone());
                Ok(self.callbacks.on_entry(source.as_ref(), &target, state))
            }
            TraversalAction::Revisit { source, target } => {
                let Some(next) = state.advance_top() else {
                    return Err(StepError::NoPendingNeighbour { action: "revisit" });
                };
                if next != target {
                    return Err(StepError::NeighbourMismatch {
                        action: "revisit",
                        expected: format!("{target:?}"),
                        found: format!("{next:?}"),
                    });
                }
                if !state.knows(&target) {
                    return Err(StepError::DiscoveryMismatch {
                        action: "revisit",
                        vertex: format!("{target:?}"),
                    });
                }
                Ok(self.callbacks.on_known(source.as_ref(), &target, state))
            }
            TraversalAction::Backtrack { vertex } => {
                if state.is_terminal() {
                    return Err(StepError::EmptyStack);
                }
                if state.top_vertex() != vertex.as_ref() {
                    return Err(StepError::BacktrackMismatch {
                        expected: format!("{vertex:?}"),
                        found: format!("{:?}", state.top_vertex()),
                    });
                }
                let mut frame = state.pop();
                match frame.take_vertex() {
                    None => Ok(Flow::Continue),
                    Some(vertex) => Ok(self.callbacks.on_exit(&vertex, &mut frame, state)),
                }
            }
        }
    }
}

/// Drive a relation to termination, a `Stop` verdict, or `should_stop`.
///
/// Polling mirrors the iterative engine: the predicate is consulted once
/// per available action and never on a terminal state.
pub fn run_relation<R, P>(
    relation: &mut R,
    state: &mut R::State,
    mut should_stop: P,
) -> Result<RunOutcome, StepError>
where
    R: StepRelation,
    P: FnMut() -> bool,
{
    loop {
        let Some(action) = relation.next_action(state) else {
            return Ok(RunOutcome::Completed);
        };
        if should_stop() {
            return Ok(RunOutcome::Stopped);
        }
        if relation.apply(state, action)?.is_stop() {
            return Ok(RunOutcome::Stopped);
        }
    }
}

/// The reactive side of a synchronous product: executes the driving
/// relation's actions against its own state.
pub trait ActionRelation<Act> {
    type State;

    fn apply(&mut self, state: &mut Self::State, action: &Act) -> Result<Flow, StepError>;
}

/// Synchronous product of a step relation and an action relation: the left
/// side decides, both sides execute, either side may stop the run.
///
/// The right side executes first, on a borrowed action; a rejection there
/// leaves the left state untouched.
pub struct SyncProduct<L, R> {
    pub left: L,
    pub right: R,
}

impl<L, R> SyncProduct<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> StepRelation for SyncProduct<L, R>
where
    L: StepRelation,
    R: ActionRelation<L::Action>,
{
    type State = (L::State, R::State);
    type Action = L::Action;

    fn next_action(&mut self, state: &mut Self::State) -> Option<Self::Action> {
        self.left.next_action(&mut state.0)
    }

    fn apply(&mut self, state: &mut Self::State, action: Self::Action) -> Result<Flow, StepError> {
        let right_flow = self.right.apply(&mut state.1, &action)?;
        let left_flow = self.left.apply(&mut state.0, action)?;
        Ok(if left_flow.is_stop() || right_flow.is_stop() {
            Flow::Stop
        } else {
            Flow::Continue
        })
    }
}
