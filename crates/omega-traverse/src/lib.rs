//! Resumable depth-first traversal over lazily enumerated rooted graphs.
//!
//! The crate separates a traversal into three replaceable pieces:
//!
//! - a [`Configuration`]: the mutable search state, a stack of [`Frame`]s
//!   plus a [`KnownSet`] membership strategy chosen at construction;
//! - [`Callbacks`]: the observation seam, fired at discovery, revisit and
//!   exit of vertices, each able to halt the run;
//! - an engine that drives the configuration. Two are provided, the
//!   iterative loop in [`engine`] and the action/transition rendition in
//!   [`relation`], and they are observationally equivalent: same callback
//!   sequence, same final configuration, on every graph.
//!
//! # Ordering contract
//!
//! One engine step looks at the top frame and does exactly one of:
//! consume the next pending neighbour (firing [`Callbacks::on_entry`] for a
//! fresh vertex or [`Callbacks::on_known`] for a seen one), or pop the
//! exhausted frame (firing [`Callbacks::on_exit`] unless it is the root
//! sentinel). Entries are therefore pre-order, exits post-order, and a
//! vertex is entered at most once per run. A depth bound truncates descent
//! silently; a stop request leaves the configuration intact and resumable.
//!
//! ```
//! use omega_graph::AdjacencyGraph;
//! use omega_traverse::{engine, Configuration, EngineOptions, Recorder, StandardKnown};
//!
//! let graph = AdjacencyGraph::from_edges([1], [(1, 2), (1, 3)]);
//! let mut config = Configuration::new(StandardKnown::for_graph(&graph));
//! config.initial(&graph);
//! let mut recorder = Recorder::new();
//! let outcome = engine::run(&graph, &mut config, &mut recorder, &EngineOptions::default());
//! assert!(outcome.is_completed());
//! assert_eq!(recorder.entry_count(), 3);
//! ```

pub mod callback;
pub mod config;
pub mod engine;
pub mod frame;
pub mod known;
pub mod record;
pub mod relation;

pub use callback::{Callbacks, Flow, NoCallbacks};
pub use config::Configuration;
pub use engine::{run, run_until, EngineOptions, RunOutcome};
pub use frame::Frame;
pub use known::{KnownSet, StandardKnown};
pub use record::{Recorder, TraversalEvent};
pub use relation::{
    run_relation, ActionRelation, StepError, StepRelation, SyncProduct, TraversalAction,
    TraversalRelation,
};
