//! Rooted-graph abstractions for on-the-fly state-space exploration.
//!
//! A [`RootedGraph`] is the lazy graph interface consumed by the traversal
//! and emptiness-checking crates: a finite set of root vertices plus, per
//! vertex, a finite neighbour enumeration, both produced on demand. Nothing
//! is materialized up front, so the interface covers both explicit graphs
//! and state spaces unfolded from an operational semantics.
//!
//! Two implementations are provided:
//!
//! - [`AdjacencyGraph`]: finite, in-memory, deterministic in insertion
//!   order.
//! - [`SuccessorGraph`]: explicit roots plus a successor closure, for
//!   graphs that exist only while they are being walked.
//!
//! [`Fingerprint`] supplies the 64-bit canonical keys used when exploration
//! state is tracked per equivalence class of vertices instead of per
//! vertex.

pub mod adjacency;
pub mod fingerprint;
pub mod rooted;
pub mod successor;

pub use adjacency::AdjacencyGraph;
pub use fingerprint::{Fingerprint, Fnv1a};
pub use rooted::RootedGraph;
pub use successor::SuccessorGraph;
