//! The observation seam between the engines and algorithms layered on them.

use omega_graph::RootedGraph;

use crate::config::Configuration;
use crate::frame::Frame;

/// Verdict returned by every callback: keep driving the traversal, or halt
/// immediately with the configuration left as it stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    Continue,
    Stop,
}

impl Flow {
    pub fn is_stop(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

/// Hooks fired by both engines at the three observable traversal moments.
///
/// - [`on_entry`]: `target` was just discovered over an edge from `source`
///   and its frame pushed; fires before any of `target`'s neighbours are
///   examined. `source` is `None` when the edge originates at the root
///   sentinel.
/// - [`on_known`]: an edge led to the already known `target`; fires for
///   back-, cross- and sharing-edges alike.
/// - [`on_exit`]: `vertex` ran out of pending neighbours and its frame was
///   popped; `frame` is that popped frame and the configuration's top is
///   now the parent. Sentinel pops are silent.
///
/// Every hook defaults to a no-op that continues, so implementations
/// override only the moments they observe.
///
/// [`on_entry`]: Callbacks::on_entry
/// [`on_known`]: Callbacks::on_known
/// [`on_exit`]: Callbacks::on_exit
pub trait Callbacks<G: RootedGraph, K, A> {
    fn on_entry(
        &mut self,
        _source: Option<&G::Vertex>,
        _target: &G::Vertex,
        _config: &mut Configuration<G, K, A>,
    ) -> Flow {
        Flow::Continue
    }

    fn on_known(
        &mut self,
        _source: Option<&G::Vertex>,
        _target: &G::Vertex,
        _config: &mut Configuration<G, K, A>,
    ) -> Flow {
        Flow::Continue
    }

    fn on_exit(
        &mut self,
        _vertex: &G::Vertex,
        _frame: &mut Frame<G, A>,
        _config: &mut Configuration<G, K, A>,
    ) -> Flow {
        Flow::Continue
    }
}

/// Callbacks that observe nothing: a bare reachability sweep.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCallbacks;

impl<G: RootedGraph, K, A> Callbacks<G, K, A> for NoCallbacks {}
