//! Checker outputs: emptiness answers, outcomes, and search statistics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Verdict of an emptiness check.
///
/// `holds` means the search found no reachable accepting cycle. On a
/// violation, `witness` is the vertex at which the cycle closes and `trace`
/// is a real path from a root to the vertex whose edge back to the witness
/// closes the cycle; the witness is always a member of the trace.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmptinessAnswer<V> {
    pub holds: bool,
    pub witness: Option<V>,
    pub trace: Vec<V>,
}

impl<V> EmptinessAnswer<V> {
    /// The optimistic start: holds, with nothing to show.
    pub fn new() -> Self {
        Self {
            holds: true,
            witness: None,
            trace: Vec::new(),
        }
    }

    pub fn is_violation(&self) -> bool {
        !self.holds
    }
}

impl<V> Default for EmptinessAnswer<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a cancellable check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome<V> {
    /// The search ran to a verdict.
    Conclusive(EmptinessAnswer<V>),
    /// The termination predicate fired first. No verdict materialized;
    /// only the exploration extent is reported.
    Interrupted { explored: usize },
}

impl<V> CheckOutcome<V> {
    pub fn conclusive(self) -> Option<EmptinessAnswer<V>> {
        match self {
            CheckOutcome::Conclusive(answer) => Some(answer),
            CheckOutcome::Interrupted { .. } => None,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, CheckOutcome::Interrupted { .. })
    }
}

/// Search counters, reset at the start of every check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckStats {
    /// Vertices discovered by the primary search.
    pub entered: u64,
    /// Edges that led to an already known vertex.
    pub revisits: u64,
    /// Secondary searches launched.
    pub red_searches: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_answer_holds() {
        let answer: EmptinessAnswer<u32> = EmptinessAnswer::new();
        assert!(answer.holds);
        assert!(!answer.is_violation());
        assert_eq!(answer.witness, None);
        assert!(answer.trace.is_empty());
    }

    #[test]
    fn test_outcome_projection() {
        let conclusive: CheckOutcome<u32> = CheckOutcome::Conclusive(EmptinessAnswer::new());
        assert!(!conclusive.is_interrupted());
        assert!(conclusive.conclusive().is_some());

        let interrupted: CheckOutcome<u32> = CheckOutcome::Interrupted { explored: 7 };
        assert!(interrupted.is_interrupted());
        assert!(interrupted.conclusive().is_none());
    }
}
