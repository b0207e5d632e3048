//! The iterative traversal engine.
//!
//! [`run_until`] drives a [`Configuration`] through the depth-first state
//! machine one step at a time. Each step evaluates the top frame and
//! performs exactly one of:
//!
//! 1. consume the frame's next pending neighbour, firing
//!    [`Callbacks::on_entry`] for a fresh vertex (after marking it known
//!    and pushing its frame) or [`Callbacks::on_known`] for a seen one;
//! 2. pop the exhausted frame, firing [`Callbacks::on_exit`] unless it is
//!    the root sentinel, which leaves silently.
//!
//! An empty stack is the terminal state. The optional depth bound caps
//! descent: a frame at the bound behaves as if its pending sequence were
//! empty, so vertices past the bound are silently never discovered, an
//! under-approximation of reachability the caller opted into.
//!
//! Cancellation has a single polling point, immediately before the top
//! frame is evaluated. Stopping, whether by predicate or by callback
//! verdict, leaves the configuration untouched beyond the work already
//! done; a further call resumes the run exactly where it halted.

use tracing::trace;

use omega_graph::RootedGraph;

use crate::callback::Callbacks;
use crate::config::Configuration;
use crate::known::KnownSet;

/// Engine tuning knobs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum number of edges from a root at which a vertex may still be
    /// discovered; `None` is unbounded. Bound 0 discovers exactly the
    /// roots.
    pub depth_bound: Option<usize>,
}

impl EngineOptions {
    pub fn bounded(depth_bound: usize) -> Self {
        Self {
            depth_bound: Some(depth_bound),
        }
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The stack emptied: every reachable vertex within the bound was
    /// entered and exited.
    Completed,
    /// A callback or the termination predicate requested a halt. The
    /// configuration is resumable.
    Stopped,
}

impl RunOutcome {
    pub fn is_completed(self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// Run to natural termination or the first callback `Stop`.
pub fn run<G, K, A, C>(
    graph: &G,
    config: &mut Configuration<G, K, A>,
    callbacks: &mut C,
    options: &EngineOptions,
) -> RunOutcome
where
    G: RootedGraph,
    K: KnownSet<G::Vertex>,
    A: Default,
    C: Callbacks<G, K, A>,
{
    run_until(graph, config, callbacks, options, || false)
}

/// Run until natural termination, a callback `Stop`, or `should_stop`.
///
/// The predicate is polled once per step while the configuration is
/// non-terminal; a terminal configuration completes without a final poll.
pub fn run_until<G, K, A, C, P>(
    graph: &G,
    config: &mut Configuration<G, K, A>,
    callbacks: &mut C,
    options: &EngineOptions,
    mut should_stop: P,
) -> RunOutcome
where
    G: RootedGraph,
    K: KnownSet<G::Vertex>,
    A: Default,
    C: Callbacks<G, K, A>,
    P: FnMut() -> bool,
{
    loop {
        if config.is_terminal() {
            return RunOutcome::Completed;
        }
        if should_stop() {
            trace!("stop requested");
            return RunOutcome::Stopped;
        }

        // A discovery from the current top frame would sit `depth()` edges
        // from a root; past the bound the frame counts as exhausted.
        let may_descend = options
            .depth_bound
            .map_or(true, |bound| config.depth() <= bound);

        let next = if may_descend {
            config.advance_top()
        } else {
            None
        };

        match next {
            Some(target) => {
                let source = config.top_vertex().cloned();
                if config.knows(&target) {
                    trace!(?source, ?target, "revisit");
                    if callbacks.on_known(source.as_ref(), &target, config).is_stop() {
                        return RunOutcome::Stopped;
                    }
                } else {
                    trace!(?source, ?target, "discover");
                    config.discover(graph, target.clone());
                    if callbacks.on_entry(source.as_ref(), &target, config).is_stop() {
                        return RunOutcome::Stopped;
                    }
                }
            }
            None => {
                let mut frame = config.pop();
                match frame.take_vertex() {
                    None => {
                        trace!("sentinel exhausted");
                    }
                    Some(vertex) => {
                        trace!(?vertex, "backtrack");
                        if callbacks.on_exit(&vertex, &mut frame, config).is_stop() {
                            return RunOutcome::Stopped;
                        }
                    }
                }
            }
        }
    }
}
