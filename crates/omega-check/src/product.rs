//! Product of a transition system and a Büchi property automaton.
//!
//! The emptiness checkers consume any rooted graph, so checking an
//! ω-regular property of a system means handing them the synchronous
//! product of the system's state graph with the property's (negated)
//! automaton. [`ProductGraph`] builds that product lazily: nothing beyond
//! the pair under exploration ever exists.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use omega_graph::RootedGraph;

/// A state-labelled Büchi automaton over system vertices: transitions are
/// guarded by the vertex being entered.
pub trait BuchiAutomaton<V> {
    type State: Clone + Eq + Hash + fmt::Debug;

    /// States the automaton may start in, before reading any vertex.
    fn initial_states(&self) -> Vec<Self::State>;

    /// States reachable from `state` when the run moves onto `input`.
    fn successors(&self, state: &Self::State, input: &V) -> Vec<Self::State>;

    fn is_accepting(&self, state: &Self::State) -> bool;
}

/// Lazy synchronous product of a system graph and a property automaton.
///
/// Roots pair every system root with every automaton initial state; the
/// automaton has not read the root vertex at that point, so properties
/// constraining the first vertex encode it in the initial states'
/// transitions. An edge `(s, q) -> (s', q')` exists when `s -> s'` in the
/// system and `q'` is an automaton successor of `q` on input `s'`.
///
/// A product vertex is accepting exactly when its automaton component is;
/// [`ProductGraph::accepting`] is the matching checker predicate.
pub struct ProductGraph<'a, G, B> {
    system: &'a G,
    automaton: &'a B,
}

impl<'a, G, B> ProductGraph<'a, G, B>
where
    G: RootedGraph,
    B: BuchiAutomaton<G::Vertex>,
{
    pub fn new(system: &'a G, automaton: &'a B) -> Self {
        Self { system, automaton }
    }

    pub fn accepting(&self, vertex: &(G::Vertex, B::State)) -> bool {
        self.automaton.is_accepting(&vertex.1)
    }
}

impl<'a, G, B> RootedGraph for ProductGraph<'a, G, B>
where
    G: RootedGraph,
    B: BuchiAutomaton<G::Vertex>,
{
    type Vertex = (G::Vertex, B::State);
    type Roots = std::vec::IntoIter<Self::Vertex>;
    type Neighbours = std::vec::IntoIter<Self::Vertex>;

    fn roots(&self) -> Self::Roots {
        let initial = self.automaton.initial_states();
        let mut roots = Vec::new();
        for system_root in self.system.roots() {
            for state in &initial {
                roots.push((system_root.clone(), state.clone()));
            }
        }
        roots.into_iter()
    }

    fn neighbours(&self, vertex: &Self::Vertex) -> Self::Neighbours {
        let (system_vertex, state) = vertex;
        let mut neighbours = Vec::new();
        for successor in self.system.neighbours(system_vertex) {
            for next_state in self.automaton.successors(state, &successor) {
                neighbours.push((successor.clone(), next_state));
            }
        }
        neighbours.into_iter()
    }

    // A product cycle projects onto a system cycle, so the automaton adds
    // no cycles of its own; nondeterminism adds sharing freely.
    fn has_cycles(&self) -> bool {
        self.system.has_cycles()
    }

    fn has_sharing(&self) -> bool {
        true
    }
}

impl<'a, G, B> fmt::Debug for ProductGraph<'a, G, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductGraph").finish_non_exhaustive()
    }
}

type Guard<V> = Box<dyn Fn(&V) -> bool>;

/// Table-driven automaton with numbered states and guarded transitions,
/// for tests and small hand-written properties.
pub struct ExplicitAutomaton<V> {
    initial: Vec<u32>,
    accepting: FxHashSet<u32>,
    transitions: Vec<(u32, Guard<V>, u32)>,
}

impl<V> ExplicitAutomaton<V> {
    pub fn new(initial: impl IntoIterator<Item = u32>) -> Self {
        Self {
            initial: initial.into_iter().collect(),
            accepting: FxHashSet::default(),
            transitions: Vec::new(),
        }
    }

    pub fn accept(mut self, state: u32) -> Self {
        self.accepting.insert(state);
        self
    }

    pub fn transition(mut self, from: u32, guard: impl Fn(&V) -> bool + 'static, to: u32) -> Self {
        self.transitions.push((from, Box::new(guard), to));
        self
    }
}

impl<V> BuchiAutomaton<V> for ExplicitAutomaton<V> {
    type State = u32;

    fn initial_states(&self) -> Vec<u32> {
        self.initial.clone()
    }

    fn successors(&self, state: &u32, input: &V) -> Vec<u32> {
        self.transitions
            .iter()
            .filter(|(from, guard, _)| from == state && guard(input))
            .map(|(_, _, to)| *to)
            .collect()
    }

    fn is_accepting(&self, state: &u32) -> bool {
        self.accepting.contains(state)
    }
}

impl<V> fmt::Debug for ExplicitAutomaton<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitAutomaton")
            .field("initial", &self.initial)
            .field("accepting", &self.accepting)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
