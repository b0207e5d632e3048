//! Known-set strategies: how a traversal remembers what it has seen.

use std::fmt;
use std::hash::Hash;

use omega_graph::{Fingerprint, RootedGraph};
use rustc_hash::FxHashSet;

/// Membership book-keeping behind [`Configuration::knows`].
///
/// Strategies are values picked when the configuration is built, not
/// subtypes of the configuration. The engine needs only `knows` and
/// `insert`; `clear` serves re-initialization and `len` introspection.
///
/// [`Configuration::knows`]: crate::Configuration::knows
pub trait KnownSet<V> {
    /// Has this vertex (or its equivalence class) been discovered?
    fn knows(&self, vertex: &V) -> bool;

    /// Record a discovery.
    fn insert(&mut self, vertex: &V);

    /// Forget everything recorded so far.
    fn clear(&mut self);

    /// Number of distinct discoveries recorded.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Projection from a vertex to its canonical key.
pub type ReduceFn<V> = Box<dyn Fn(&V) -> Fingerprint>;

/// The stock strategies.
///
/// - `Tree`: nothing is recorded and nothing is ever known. Sound only for
///   graphs without cycles or sharing; on anything else it duplicates work
///   or diverges. The shape hints are trusted as declared.
/// - `Vertices`: vertices stored as-is under their own equality and hash.
/// - `Reduced`: vertices projected to a [`Fingerprint`] first, so every
///   member of an equivalence class counts as one discovery.
pub enum StandardKnown<V> {
    Tree,
    Vertices(FxHashSet<V>),
    Reduced {
        seen: FxHashSet<Fingerprint>,
        reduce: ReduceFn<V>,
    },
}

impl<V: Clone + Eq + Hash> StandardKnown<V> {
    pub fn tree() -> Self {
        StandardKnown::Tree
    }

    pub fn vertices() -> Self {
        StandardKnown::Vertices(FxHashSet::default())
    }

    pub fn reduced(reduce: impl Fn(&V) -> Fingerprint + 'static) -> Self {
        StandardKnown::Reduced {
            seen: FxHashSet::default(),
            reduce: Box::new(reduce),
        }
    }

    /// The cheapest sound stock strategy for a graph's declared shape.
    pub fn for_graph<G>(graph: &G) -> Self
    where
        G: RootedGraph<Vertex = V>,
    {
        if graph.is_tree() {
            Self::tree()
        } else {
            Self::vertices()
        }
    }
}

impl<V: Clone + Eq + Hash> KnownSet<V> for StandardKnown<V> {
    fn knows(&self, vertex: &V) -> bool {
        match self {
            StandardKnown::Tree => false,
            StandardKnown::Vertices(set) => set.contains(vertex),
            StandardKnown::Reduced { seen, reduce } => seen.contains(&reduce(vertex)),
        }
    }

    fn insert(&mut self, vertex: &V) {
        match self {
            StandardKnown::Tree => {}
            StandardKnown::Vertices(set) => {
                set.insert(vertex.clone());
            }
            StandardKnown::Reduced { seen, reduce } => {
                seen.insert(reduce(vertex));
            }
        }
    }

    fn clear(&mut self) {
        match self {
            StandardKnown::Tree => {}
            StandardKnown::Vertices(set) => set.clear(),
            StandardKnown::Reduced { seen, .. } => seen.clear(),
        }
    }

    fn len(&self) -> usize {
        match self {
            StandardKnown::Tree => 0,
            StandardKnown::Vertices(set) => set.len(),
            StandardKnown::Reduced { seen, .. } => seen.len(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for StandardKnown<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardKnown::Tree => f.write_str("StandardKnown::Tree"),
            StandardKnown::Vertices(set) => {
                f.debug_tuple("StandardKnown::Vertices").field(set).finish()
            }
            StandardKnown::Reduced { seen, .. } => f
                .debug_struct("StandardKnown::Reduced")
                .field("seen", &seen.len())
                .finish_non_exhaustive(),
        }
    }
}
