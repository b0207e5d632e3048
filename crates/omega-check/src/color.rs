//! Vertex colors and the shared color map of the nested search.

use std::hash::Hash;
use std::rc::Rc;

use omega_graph::Fingerprint;
use rustc_hash::FxHashMap;

/// Exploration state of a vertex in the nested depth-first search.
///
/// Transitions only move forward in declaration order: WHITE to CYAN at
/// discovery, CYAN to BLUE or RED at exit, BLUE to RED when the secondary
/// search passes through. A downward transition is a checker bug and is
/// debug-asserted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// Never seen.
    White,
    /// On the primary search's stack: an ancestor of the current position.
    Cyan,
    /// Exited, not yet proven clear of accepting cycles.
    Blue,
    /// Exited and proven unable to reach the primary stack.
    Red,
}

/// Projection used when colors are tracked per equivalence class.
pub type ReduceFn<V> = Rc<dyn Fn(&V) -> Fingerprint>;

#[derive(Clone, Copy, Debug)]
struct ColorEntry {
    color: Color,
    weight: u64,
}

impl Default for ColorEntry {
    fn default() -> Self {
        Self {
            color: Color::White,
            weight: 0,
        }
    }
}

/// Color, and accepting-weight snapshot, per vertex.
///
/// Under a reducer the map keys on fingerprints, so all vertices of one
/// equivalence class share a single entry; without one it keys on the
/// vertices themselves. Unmapped vertices read as WHITE with weight 0.
///
/// One map is shared by reference between the primary and secondary
/// searches of a check. Execution is strictly sequential, so plain interior
/// mutability is all the sharing needs.
pub struct ColorMap<V> {
    reduce: Option<ReduceFn<V>>,
    by_vertex: FxHashMap<V, ColorEntry>,
    by_key: FxHashMap<Fingerprint, ColorEntry>,
}

impl<V: Clone + Eq + Hash> ColorMap<V> {
    pub fn new() -> Self {
        Self {
            reduce: None,
            by_vertex: FxHashMap::default(),
            by_key: FxHashMap::default(),
        }
    }

    pub fn with_reducer(reduce: ReduceFn<V>) -> Self {
        Self {
            reduce: Some(reduce),
            by_vertex: FxHashMap::default(),
            by_key: FxHashMap::default(),
        }
    }

    pub fn color(&self, vertex: &V) -> Color {
        match self.key_of(vertex) {
            Some(key) => self.by_key.get(&key).map_or(Color::White, |e| e.color),
            None => self.by_vertex.get(vertex).map_or(Color::White, |e| e.color),
        }
    }

    /// Advance a vertex's color.
    pub fn set_color(&mut self, vertex: &V, color: Color) {
        let entry = self.entry_mut(vertex);
        debug_assert!(
            color > entry.color,
            "color transition {:?} -> {:?} moves backward",
            entry.color,
            color
        );
        entry.color = color;
    }

    pub fn weight(&self, vertex: &V) -> u64 {
        match self.key_of(vertex) {
            Some(key) => self.by_key.get(&key).map_or(0, |e| e.weight),
            None => self.by_vertex.get(vertex).map_or(0, |e| e.weight),
        }
    }

    pub fn set_weight(&mut self, vertex: &V, weight: u64) {
        self.entry_mut(vertex).weight = weight;
    }

    /// Number of vertices (or classes) that have left WHITE.
    pub fn len(&self) -> usize {
        self.by_vertex.len() + self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.by_vertex.clear();
        self.by_key.clear();
    }

    fn key_of(&self, vertex: &V) -> Option<Fingerprint> {
        self.reduce.as_deref().map(|reduce| reduce(vertex))
    }

    fn entry_mut(&mut self, vertex: &V) -> &mut ColorEntry {
        match self.key_of(vertex) {
            Some(key) => self.by_key.entry(key).or_default(),
            None => self.by_vertex.entry(vertex.clone()).or_default(),
        }
    }
}

impl<V: Clone + Eq + Hash> Default for ColorMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for ColorMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorMap")
            .field("tracked", &(self.by_vertex.len() + self.by_key.len()))
            .field("reduced", &self.reduce.is_some())
            .finish_non_exhaustive()
    }
}
