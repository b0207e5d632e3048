//! End-to-end emptiness scenarios, cross-checker agreement against a
//! brute-force oracle, and counterexample validity.

use std::collections::HashMap;

use proptest::prelude::*;

use omega_check::{
    CheckOutcome, CheckerOptions, EmptinessAnswer, ExplicitAutomaton, NestedDfs, ProductGraph,
    WeightedNestedDfs,
};
use omega_graph::{AdjacencyGraph, Fingerprint, RootedGraph, SuccessorGraph};

/// Two paths from the root meet in vertex 3; vertex 3 closes a cycle back
/// to the root.
fn sharing_graph() -> AdjacencyGraph<u32> {
    AdjacencyGraph::from_edges([1], [(1, 2), (1, 4), (2, 3), (3, 1), (4, 5), (5, 3)])
}

/// Reference decision: is some accepting vertex reachable from a root and
/// on a cycle? Transitive closure over the finite vertex set.
fn has_accepting_cycle(graph: &AdjacencyGraph<u32>, accepting: impl Fn(&u32) -> bool) -> bool {
    let vertices: Vec<u32> = graph.vertices().copied().collect();
    let index: HashMap<u32, usize> = vertices.iter().enumerate().map(|(i, v)| (*v, i)).collect();
    let n = vertices.len();

    let mut reach = vec![vec![false; n]; n];
    for (i, v) in vertices.iter().enumerate() {
        for w in graph.neighbours(v) {
            reach[i][index[&w]] = true;
        }
    }
    for k in 0..n {
        for i in 0..n {
            if reach[i][k] {
                for j in 0..n {
                    if reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
    }

    let mut from_root = vec![false; n];
    for root in graph.roots() {
        let r = index[&root];
        from_root[r] = true;
        for j in 0..n {
            if reach[r][j] {
                from_root[j] = true;
            }
        }
    }

    vertices
        .iter()
        .enumerate()
        .any(|(i, v)| accepting(v) && from_root[i] && reach[i][i])
}

/// A violation's trace must be a real path: root-anchored, edge-connected,
/// containing the witness, with a closing edge back to it.
fn assert_valid_counterexample(graph: &AdjacencyGraph<u32>, answer: &EmptinessAnswer<u32>) {
    assert!(answer.is_violation());
    let witness = answer.witness.expect("violations carry a witness");
    assert!(
        answer.trace.contains(&witness),
        "witness {witness} not on trace {:?}",
        answer.trace
    );

    let roots: Vec<u32> = graph.roots().collect();
    assert!(roots.contains(&answer.trace[0]));
    for pair in answer.trace.windows(2) {
        let succ: Vec<u32> = graph.neighbours(&pair[0]).collect();
        assert!(succ.contains(&pair[1]), "edge {} -> {} missing", pair[0], pair[1]);
    }
    let last = answer.trace.last().expect("violation traces are non-empty");
    let succ: Vec<u32> = graph.neighbours(last).collect();
    assert!(
        succ.contains(&witness),
        "closing edge {last} -> {witness} missing"
    );
}

// ==== concrete scenarios ====================================================

#[test]
fn test_empty_graph_holds() {
    let graph: AdjacencyGraph<u32> = AdjacencyGraph::new();
    let mut checker = NestedDfs::new(&graph, |_: &u32| true);
    let answer = checker.check();
    assert!(answer.holds);
    assert_eq!(answer.witness, None);
    assert!(answer.trace.is_empty());
}

#[test]
fn test_finite_tree_holds() {
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (1, 3), (2, 4)]).into_tree();
    let mut checker = NestedDfs::new(&graph, |_: &u32| false);
    assert!(checker.check().holds);
}

#[test]
fn test_two_cycle_with_accepting_vertices_fails() {
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 1)]);
    let mut checker = NestedDfs::new(&graph, |_: &u32| true);
    let answer = checker.check();
    assert_valid_counterexample(&graph, &answer);
    assert_eq!(answer.witness, Some(1));
}

#[test]
fn test_lasso_without_accepting_loop_holds() {
    // 1 -> 2 -> 3 -> 2: a cycle exists but visits nothing accepting.
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 3), (3, 2)]);
    let mut checker = NestedDfs::new(&graph, |_: &u32| false);
    assert!(checker.check().holds);
}

#[test]
fn test_sharing_graph_with_accepting_root_fails() {
    let graph = sharing_graph();
    let mut checker = NestedDfs::new(&graph, |v: &u32| *v == 1);
    let answer = checker.check();
    assert_valid_counterexample(&graph, &answer);
    assert_eq!(answer.witness, Some(1));
    assert_eq!(answer.trace, vec![1, 2, 3]);
}

#[test]
fn test_self_loop_on_accepting_vertex_fails() {
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 2)]);
    let mut checker = NestedDfs::new(&graph, |v: &u32| *v == 2);
    let answer = checker.check();
    assert_valid_counterexample(&graph, &answer);
    assert_eq!(answer.witness, Some(2));
    assert_eq!(answer.trace, vec![1, 2]);
}

#[test]
fn test_depth_bound_one_sees_roots_and_children_only() {
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 3), (3, 4), (4, 3)]);
    let accepting = |v: &u32| *v >= 3;

    let options = CheckerOptions::new().with_depth_bound(1);
    let mut bounded = NestedDfs::with_options(&graph, accepting, options);
    assert!(bounded.check().holds);
    assert_eq!(bounded.stats().entered, 2);

    let mut full = NestedDfs::new(&graph, accepting);
    assert!(!full.check().holds);
}

// ==== secondary search ======================================================

#[test]
fn test_secondary_search_finds_cycle_the_edge_test_misses() {
    // 1 -> 2 -> 3 -> 1 with only 2 accepting: the closing edge 3 -> 1 has
    // non-accepting endpoints, so the plain edge test cannot fire.
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 3), (3, 1)]);

    let mut plain = NestedDfs::new(&graph, |v: &u32| *v == 2);
    let answer = plain.check();
    assert_valid_counterexample(&graph, &answer);
    assert_eq!(answer.witness, Some(1));
    assert_eq!(answer.trace, vec![1, 2, 3]);
    assert!(plain.stats().red_searches >= 1);

    // The weighted test spans the accepting vertex and resolves the same
    // cycle with no secondary search at all.
    let mut weighted = WeightedNestedDfs::new(&graph, |v: &u32| *v == 2);
    let answer = weighted.check();
    assert_valid_counterexample(&graph, &answer);
    assert_eq!(weighted.stats().red_searches, 0);
}

#[test]
fn test_clean_secondary_search_lets_the_check_continue() {
    // Accepting vertex 2 reaches the non-accepting cycle 5 <-> 6, already
    // exited BLUE when 2 exits. Its secondary search walks the cycle, finds
    // no way back to the stack, and the check concludes cleanly.
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 5), (5, 6), (6, 5), (2, 6), (1, 2)]);
    let mut checker = NestedDfs::new(&graph, |v: &u32| *v == 2);
    assert!(checker.check().holds);
    assert_eq!(checker.stats().red_searches, 1);
}

#[test]
fn test_all_red_children_skip_the_secondary_search() {
    // Both accepting vertices exit with every child already RED, so no
    // secondary search is needed to prove them safe.
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 3)]);
    let mut checker = NestedDfs::new(&graph, |v: &u32| *v >= 2);
    assert!(checker.check().holds);
    assert_eq!(checker.stats().red_searches, 0);
}

// ==== interchangeability ====================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_both_checkers_match_the_oracle(
        edges in prop::collection::vec((0u32..7, 0u32..7), 0..24),
        roots in prop::collection::vec(0u32..7, 1..3),
        accepting_mask in 0u32..128,
    ) {
        let graph = AdjacencyGraph::from_edges(roots, edges);
        let accepting = |v: &u32| accepting_mask & (1 << *v) != 0;
        let expected = has_accepting_cycle(&graph, accepting);

        let mut plain = NestedDfs::new(&graph, accepting);
        let plain_answer = plain.check();
        prop_assert_eq!(plain_answer.holds, !expected);

        let mut weighted = WeightedNestedDfs::new(&graph, accepting);
        let weighted_answer = weighted.check();
        prop_assert_eq!(weighted_answer.holds, !expected);

        if expected {
            assert_valid_counterexample(&graph, &plain_answer);
            assert_valid_counterexample(&graph, &weighted_answer);
        }
    }

    #[test]
    fn prop_dags_always_hold(
        edges in prop::collection::vec((0u32..10, 0u32..10), 0..30),
        accepting_mask in 0u32..1024,
    ) {
        // Keep only upward edges: no cycles can form.
        let dag_edges: Vec<(u32, u32)> = edges.into_iter().filter(|(a, b)| a < b).collect();
        let graph = AdjacencyGraph::from_edges([0u32], dag_edges);
        let accepting = |v: &u32| accepting_mask & (1 << *v) != 0;

        let mut checker = NestedDfs::new(&graph, accepting);
        prop_assert!(checker.check().holds);
        let mut weighted = WeightedNestedDfs::new(&graph, accepting);
        prop_assert!(weighted.check().holds);
    }
}

// ==== options ===============================================================

#[test]
fn test_reducer_collapses_equivalent_vertices() {
    // Vertices are (id, noise); the search keys on id alone.
    let graph = SuccessorGraph::new(vec![(0u32, 0u32)], |&(id, noise): &(u32, u32)| match id {
        0 => vec![(1, noise), (1, noise + 1)],
        1 => vec![(2, 0)],
        _ => Vec::new(),
    });
    let options = CheckerOptions::new().with_reducer(|&(id, _): &(u32, u32)| Fingerprint::of(&id));
    let mut checker = NestedDfs::with_options(&graph, |_: &(u32, u32)| false, options);
    assert!(checker.check().holds);
    // (1, 0) and (1, 1) count as a single discovery.
    assert_eq!(checker.stats().entered, 3);
    assert_eq!(checker.stats().revisits, 1);
}

#[test]
fn test_interrupted_check_reports_extent_only() {
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 3), (3, 1)]);
    let mut checker = NestedDfs::new(&graph, |_: &u32| false);
    let mut polls = 0u32;
    let outcome = checker.check_until(|| {
        polls += 1;
        polls > 2
    });
    match outcome {
        CheckOutcome::Interrupted { explored } => assert!(explored >= 1),
        CheckOutcome::Conclusive(_) => panic!("expected an interruption"),
    }
}

#[test]
fn test_violation_beats_late_interruption() {
    let graph = AdjacencyGraph::from_edges([1u32], [(1, 2), (2, 1)]);
    let mut checker = NestedDfs::new(&graph, |_: &u32| true);
    // The predicate would fire eventually, but the violation lands first.
    let mut polls = 0u32;
    let outcome = checker.check_until(|| {
        polls += 1;
        polls > 100
    });
    let answer = outcome.conclusive().expect("violation before interruption");
    assert!(!answer.holds);
}

// ==== property automata =====================================================

fn eventually_locked() -> ExplicitAutomaton<u32> {
    // Accepts runs that from some point on stay in vertices >= 1.
    ExplicitAutomaton::new([0])
        .transition(0, |_| true, 0)
        .transition(0, |v| *v >= 1, 1)
        .transition(1, |v| *v >= 1, 1)
        .accept(1)
}

#[test]
fn test_product_check_detects_trapped_run() {
    // 0 -> 1 -> 1: the system can stay in 1 forever.
    let system = AdjacencyGraph::from_edges([0u32], [(0, 1), (1, 1)]);
    let automaton = eventually_locked();
    let product = ProductGraph::new(&system, &automaton);
    let mut checker = NestedDfs::new(&product, |pair: &(u32, u32)| product.accepting(pair));
    let answer = checker.check();
    assert!(!answer.holds);
    let (system_vertex, state) = answer.witness.expect("violations carry a witness");
    assert_eq!(system_vertex, 1);
    assert_eq!(state, 1);
}

#[test]
fn test_product_check_holds_for_alternating_system() {
    // 0 -> 1 -> 0: every run leaves vertex 1 again, so no run locks in.
    let system = AdjacencyGraph::from_edges([0u32], [(0, 1), (1, 0)]);
    let automaton = eventually_locked();
    let product = ProductGraph::new(&system, &automaton);
    let mut checker = NestedDfs::new(&product, |pair: &(u32, u32)| product.accepting(pair));
    assert!(checker.check().holds);
}
