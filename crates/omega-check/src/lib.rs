//! On-the-fly Büchi emptiness checking over lazily enumerated graphs.
//!
//! Given a rooted graph and an accepting predicate on its vertices, the
//! checkers in this crate decide whether some reachable cycle passes
//! through an accepting vertex, without ever materializing the graph. A
//! violated check comes back with a witness vertex and a root-anchored
//! trace that closes the cycle.
//!
//! Two interchangeable checkers are provided: [`NestedDfs`], the
//! Gaiser-Schwoon blue/red nested depth-first search, and
//! [`WeightedNestedDfs`], its weighted refinement that resolves more
//! cycles in the primary search. They agree on every verdict.
//!
//! [`ProductGraph`] connects the checkers to ω-regular property checking:
//! it is the lazy synchronous product of a system graph with a property
//! automaton, ready to be fed to either checker.
//!
//! ```
//! use omega_check::NestedDfs;
//! use omega_graph::AdjacencyGraph;
//!
//! // 1 -> 2 -> 1 with vertex 2 accepting: an accepting cycle exists.
//! let graph = AdjacencyGraph::from_edges([1], [(1, 2), (2, 1)]);
//! let mut checker = NestedDfs::new(&graph, |v: &u32| *v == 2);
//! let answer = checker.check();
//! assert!(!answer.holds);
//! assert_eq!(answer.witness, Some(1));
//! assert_eq!(answer.trace, vec![1, 2]);
//! ```

pub mod answer;
pub mod color;
pub mod nested;
pub mod product;

pub use answer::{CheckOutcome, CheckStats, EmptinessAnswer};
pub use color::{Color, ColorMap};
pub use nested::{CheckerOptions, NestedDfs, WeightedNestedDfs};
pub use product::{BuchiAutomaton, ExplicitAutomaton, ProductGraph};
