//! Nested depth-first search for Büchi emptiness.
//!
//! [`NestedDfs`] is the blue/red nested DFS of Gaiser and Schwoon
//! ("Comparison of Algorithms for Checking Emptiness of Büchi Automata",
//! MEMICS 2009). The primary search keeps stack vertices CYAN, so an edge
//! into CYAN closes a cycle; if either endpoint of that edge is accepting
//! the cycle is a violation on the spot. An accepting vertex that exits
//! without that shortcut, and without every child already RED, launches a
//! secondary search over its descendants: reaching any CYAN vertex from
//! there closes a cycle through the exiting accepting vertex.
//!
//! [`WeightedNestedDfs`] adds the weighted edge test of Couvreur,
//! Duret-Lutz and Poitrenaud ("On-the-fly emptiness checks for generalized
//! Büchi automata", SPIN 2005): each vertex records how many accepting
//! vertices sat on the stack when it was discovered, and an edge into CYAN
//! whose endpoints differ in that count must span an accepting vertex.
//! The verdict never changes; cycles are just caught earlier, which makes
//! many secondary searches unnecessary.
//!
//! Both checkers agree on `holds` for every input. Witness, trace and
//! statistics may differ.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use tracing::debug;

use omega_graph::{Fingerprint, RootedGraph};
use omega_traverse::callback::{Callbacks, Flow};
use omega_traverse::config::Configuration;
use omega_traverse::engine::{self, EngineOptions, RunOutcome};
use omega_traverse::frame::Frame;
use omega_traverse::known::KnownSet;

use crate::answer::{CheckOutcome, CheckStats, EmptinessAnswer};
use crate::color::{Color, ColorMap, ReduceFn};

/// Knobs shared by both checkers.
pub struct CheckerOptions<V> {
    /// Depth bound for the primary search, in edges from a root; `None` is
    /// unbounded. Truncation can only err toward `holds`: a cycle past the
    /// bound goes unseen. The approximation is the caller's choice and is
    /// not reported.
    pub depth_bound: Option<usize>,
    /// Track colors per fingerprint class instead of per vertex. Vertices
    /// of one class are indistinguishable to the search; witnesses and
    /// traces still carry the concrete vertices that were walked.
    pub reducer: Option<ReduceFn<V>>,
}

impl<V> CheckerOptions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth_bound(mut self, bound: usize) -> Self {
        self.depth_bound = Some(bound);
        self
    }

    pub fn with_reducer(mut self, reduce: impl Fn(&V) -> Fingerprint + 'static) -> Self {
        self.reducer = Some(Rc::new(reduce));
        self
    }
}

impl<V> Default for CheckerOptions<V> {
    fn default() -> Self {
        Self {
            depth_bound: None,
            reducer: None,
        }
    }
}

impl<V> fmt::Debug for CheckerOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerOptions")
            .field("depth_bound", &self.depth_bound)
            .field("reduced", &self.reducer.is_some())
            .finish()
    }
}

// ==== known-set strategies over the shared color map ========================

/// Primary-search discovery: known once any color, discoveries turn CYAN.
struct BlueKnown<V> {
    colors: Rc<RefCell<ColorMap<V>>>,
}

impl<V: Clone + Eq + Hash> KnownSet<V> for BlueKnown<V> {
    fn knows(&self, vertex: &V) -> bool {
        self.colors.borrow().color(vertex) != Color::White
    }

    fn insert(&mut self, vertex: &V) {
        self.colors.borrow_mut().set_color(vertex, Color::Cyan);
    }

    fn clear(&mut self) {
        self.colors.borrow_mut().clear();
    }

    fn len(&self) -> usize {
        self.colors.borrow().len()
    }
}

/// Secondary-search discovery: only BLUE vertices are worth re-exploring,
/// and exploring one turns it RED. At launch time nothing reachable from
/// the re-root is WHITE, so treating WHITE as known is inert.
struct RedKnown<V> {
    colors: Rc<RefCell<ColorMap<V>>>,
}

impl<V: Clone + Eq + Hash> KnownSet<V> for RedKnown<V> {
    fn knows(&self, vertex: &V) -> bool {
        self.colors.borrow().color(vertex) != Color::Blue
    }

    fn insert(&mut self, vertex: &V) {
        self.colors.borrow_mut().set_color(vertex, Color::Red);
    }

    fn clear(&mut self) {
        unreachable!("secondary searches share the primary color map and never restart");
    }

    fn len(&self) -> usize {
        self.colors.borrow().len()
    }
}

// ==== the searches ==========================================================

/// Per-frame book-keeping of the primary search.
#[derive(Clone, Copy, Debug, Default)]
struct BlueAux {
    /// True while every processed child of this frame's vertex is RED.
    /// Set optimistically at entry, falsified by the first non-RED child.
    all_children_red: bool,
}

struct BlueSearch<'s, G: RootedGraph, F> {
    graph: &'s G,
    accepting: &'s F,
    colors: Rc<RefCell<ColorMap<G::Vertex>>>,
    answer: &'s mut EmptinessAnswer<G::Vertex>,
    stats: &'s mut CheckStats,
    /// Weighted edge test on or off.
    weighted: bool,
    /// Accepting vertices currently on the stack.
    weight: u64,
}

impl<'s, G, F> BlueSearch<'s, G, F>
where
    G: RootedGraph,
    F: Fn(&G::Vertex) -> bool,
{
    /// Search `vertex`'s descendants for a path back to the CYAN stack.
    /// `vertex` is accepting and already popped, so any CYAN hit closes an
    /// accepting cycle. Returns `Stop` when a violation was recorded.
    fn run_red_search(
        &mut self,
        vertex: &G::Vertex,
        config: &Configuration<G, BlueKnown<G::Vertex>, BlueAux>,
    ) -> Flow {
        self.stats.red_searches += 1;
        debug!(from = ?vertex, "secondary search");

        let mut prefix: Vec<G::Vertex> = config.stack_vertices().cloned().collect();
        prefix.push(vertex.clone());

        let mut red_config = Configuration::new(RedKnown {
            colors: Rc::clone(&self.colors),
        });
        red_config.reroot_at(self.graph, vertex);
        let mut red = RedSearch {
            colors: Rc::clone(&self.colors),
            answer: &mut *self.answer,
            prefix: &prefix,
        };
        // The secondary search is never depth-bounded: it only walks
        // vertices the primary search already discovered.
        match engine::run(self.graph, &mut red_config, &mut red, &EngineOptions::default()) {
            RunOutcome::Stopped => Flow::Stop,
            RunOutcome::Completed => Flow::Continue,
        }
    }
}

impl<'s, G, F> Callbacks<G, BlueKnown<G::Vertex>, BlueAux> for BlueSearch<'s, G, F>
where
    G: RootedGraph,
    F: Fn(&G::Vertex) -> bool,
{
    fn on_entry(
        &mut self,
        _source: Option<&G::Vertex>,
        target: &G::Vertex,
        config: &mut Configuration<G, BlueKnown<G::Vertex>, BlueAux>,
    ) -> Flow {
        self.stats.entered += 1;
        if let Some(aux) = config.top_aux_mut() {
            aux.all_children_red = true;
        }
        if self.weighted {
            // Snapshot before counting the vertex itself.
            self.colors.borrow_mut().set_weight(target, self.weight);
            if (self.accepting)(target) {
                self.weight += 1;
            }
        }
        Flow::Continue
    }

    fn on_known(
        &mut self,
        source: Option<&G::Vertex>,
        target: &G::Vertex,
        config: &mut Configuration<G, BlueKnown<G::Vertex>, BlueAux>,
    ) -> Flow {
        self.stats.revisits += 1;
        let target_color = self.colors.borrow().color(target);
        if target_color == Color::Cyan {
            let source_accepting = source.map_or(false, |s| (self.accepting)(s));
            let target_accepting = (self.accepting)(target);
            let spans_accepting = self.weighted && {
                let colors = self.colors.borrow();
                let source_weight = source.map_or(0, |s| colors.weight(s));
                source_weight != colors.weight(target)
            };
            if source_accepting || target_accepting || spans_accepting {
                debug!(witness = ?target, "accepting cycle closed on the stack");
                self.answer.holds = false;
                self.answer.witness = Some(target.clone());
                self.answer.trace = config.stack_vertices().cloned().collect();
                return Flow::Stop;
            }
        }
        if target_color != Color::Red {
            if let Some(aux) = config.top_aux_mut() {
                aux.all_children_red = false;
            }
        }
        Flow::Continue
    }

    fn on_exit(
        &mut self,
        vertex: &G::Vertex,
        frame: &mut Frame<G, BlueAux>,
        config: &mut Configuration<G, BlueKnown<G::Vertex>, BlueAux>,
    ) -> Flow {
        if self.weighted && (self.accepting)(vertex) {
            self.weight -= 1;
        }
        if frame.aux().all_children_red {
            self.colors.borrow_mut().set_color(vertex, Color::Red);
            return Flow::Continue;
        }
        if (self.accepting)(vertex) {
            if self.run_red_search(vertex, config).is_stop() {
                return Flow::Stop;
            }
            self.colors.borrow_mut().set_color(vertex, Color::Red);
            return Flow::Continue;
        }
        self.colors.borrow_mut().set_color(vertex, Color::Blue);
        if let Some(aux) = config.top_aux_mut() {
            aux.all_children_red = false;
        }
        Flow::Continue
    }
}

struct RedSearch<'r, V> {
    colors: Rc<RefCell<ColorMap<V>>>,
    answer: &'r mut EmptinessAnswer<V>,
    /// Root-to-accepting-vertex path of the primary search at launch.
    prefix: &'r [V],
}

impl<'r, G> Callbacks<G, RedKnown<G::Vertex>, ()> for RedSearch<'r, G::Vertex>
where
    G: RootedGraph,
{
    fn on_known(
        &mut self,
        _source: Option<&G::Vertex>,
        target: &G::Vertex,
        config: &mut Configuration<G, RedKnown<G::Vertex>, ()>,
    ) -> Flow {
        if self.colors.borrow().color(target) == Color::Cyan {
            debug!(witness = ?target, "secondary search reached the stack");
            self.answer.holds = false;
            self.answer.witness = Some(target.clone());
            let mut trace = self.prefix.to_vec();
            trace.extend(config.stack_vertices().cloned());
            self.answer.trace = trace;
            return Flow::Stop;
        }
        Flow::Continue
    }
}

// ==== public checkers =======================================================

fn run_nested<G, F, P>(
    graph: &G,
    accepting: &F,
    options: &CheckerOptions<G::Vertex>,
    stats: &mut CheckStats,
    weighted: bool,
    should_stop: P,
) -> CheckOutcome<G::Vertex>
where
    G: RootedGraph,
    F: Fn(&G::Vertex) -> bool,
    P: FnMut() -> bool,
{
    *stats = CheckStats::default();
    let colors = Rc::new(RefCell::new(match options.reducer.clone() {
        Some(reduce) => ColorMap::with_reducer(reduce),
        None => ColorMap::new(),
    }));
    let mut answer = EmptinessAnswer::new();

    debug!(weighted, depth_bound = ?options.depth_bound, "emptiness check");

    let mut config = Configuration::with_aux(BlueKnown {
        colors: Rc::clone(&colors),
    });
    config.initial(graph);
    let mut blue = BlueSearch {
        graph,
        accepting,
        colors: Rc::clone(&colors),
        answer: &mut answer,
        stats,
        weighted,
        weight: 0,
    };
    let engine_options = EngineOptions {
        depth_bound: options.depth_bound,
    };
    let outcome = engine::run_until(graph, &mut config, &mut blue, &engine_options, should_stop);

    match outcome {
        RunOutcome::Completed => CheckOutcome::Conclusive(answer),
        RunOutcome::Stopped if answer.is_violation() => CheckOutcome::Conclusive(answer),
        RunOutcome::Stopped => CheckOutcome::Interrupted {
            explored: colors.borrow().len(),
        },
    }
}

/// The Gaiser-Schwoon nested depth-first search.
///
/// One checker owns one graph reference and one accepting predicate;
/// every [`check`] starts from a fresh color map.
///
/// [`check`]: NestedDfs::check
pub struct NestedDfs<'g, G: RootedGraph, F> {
    graph: &'g G,
    accepting: F,
    options: CheckerOptions<G::Vertex>,
    stats: CheckStats,
}

impl<'g, G, F> NestedDfs<'g, G, F>
where
    G: RootedGraph,
    F: Fn(&G::Vertex) -> bool,
{
    pub fn new(graph: &'g G, accepting: F) -> Self {
        Self::with_options(graph, accepting, CheckerOptions::default())
    }

    pub fn with_options(graph: &'g G, accepting: F, options: CheckerOptions<G::Vertex>) -> Self {
        Self {
            graph,
            accepting,
            options,
            stats: CheckStats::default(),
        }
    }

    /// Run to a verdict.
    pub fn check(&mut self) -> EmptinessAnswer<G::Vertex> {
        match run_nested(
            self.graph,
            &self.accepting,
            &self.options,
            &mut self.stats,
            false,
            || false,
        ) {
            CheckOutcome::Conclusive(answer) => answer,
            CheckOutcome::Interrupted { .. } => {
                unreachable!("a check without a termination predicate cannot be interrupted")
            }
        }
    }

    /// Run until a verdict or until `should_stop` reports true. A check
    /// that already found its violation reports it even when the predicate
    /// fires on the same step.
    pub fn check_until(&mut self, should_stop: impl FnMut() -> bool) -> CheckOutcome<G::Vertex> {
        run_nested(
            self.graph,
            &self.accepting,
            &self.options,
            &mut self.stats,
            false,
            should_stop,
        )
    }

    /// Counters of the most recent check.
    pub fn stats(&self) -> &CheckStats {
        &self.stats
    }
}

/// The Couvreur-Duret-Lutz-Poitrenaud weighted nested depth-first search.
///
/// Same verdicts as [`NestedDfs`] on every input; the weighted edge test
/// lets the primary search recognize cycles whose accepting vertex lies
/// strictly between the endpoints of the closing edge, so fewer secondary
/// searches run.
pub struct WeightedNestedDfs<'g, G: RootedGraph, F> {
    graph: &'g G,
    accepting: F,
    options: CheckerOptions<G::Vertex>,
    stats: CheckStats,
}

impl<'g, G, F> WeightedNestedDfs<'g, G, F>
where
    G: RootedGraph,
    F: Fn(&G::Vertex) -> bool,
{
    pub fn new(graph: &'g G, accepting: F) -> Self {
        Self::with_options(graph, accepting, CheckerOptions::default())
    }

    pub fn with_options(graph: &'g G, accepting: F, options: CheckerOptions<G::Vertex>) -> Self {
        Self {
            graph,
            accepting,
            options,
            stats: CheckStats::default(),
        }
    }

    /// Run to a verdict.
    pub fn check(&mut self) -> EmptinessAnswer<G::Vertex> {
        match run_nested(
            self.graph,
            &self.accepting,
            &self.options,
            &mut self.stats,
            true,
            || false,
        ) {
            CheckOutcome::Conclusive(answer) => answer,
            CheckOutcome::Interrupted { .. } => {
                unreachable!("a check without a termination predicate cannot be interrupted")
            }
        }
    }

    /// Run until a verdict or until `should_stop` reports true.
    pub fn check_until(&mut self, should_stop: impl FnMut() -> bool) -> CheckOutcome<G::Vertex> {
        run_nested(
            self.graph,
            &self.accepting,
            &self.options,
            &mut self.stats,
            true,
            should_stop,
        )
    }

    /// Counters of the most recent check.
    pub fn stats(&self) -> &CheckStats {
        &self.stats
    }
}
