// src/reward.rs
//
// Pluggable scoring of graph constructions.
//
// A RewardRule turns a construction snapshot into a scalar reward plus a
// witness flag. The environment applies the rule after every decision, so
// rules see partial constructions (undecided slots decoded as absent edges)
// as well as complete ones.

use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Sentinel reward magnitude for constructions that violate a hard
/// structural requirement (disconnected graphs under the default rule).
pub const INF: f64 = 1_000_000.0;

/// Outcome of scoring a single construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Scalar reward for the construction.
    pub reward: f64,
    /// Whether the construction satisfies the target property.
    pub witness: bool,
}

/// Error raised by a scoring rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreError {
    pub message: String,
}

impl ScoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scoring rule failed: {}", self.message)
    }
}

impl std::error::Error for ScoreError {}

/// Scoring rule applied to every construction snapshot.
pub trait RewardRule {
    /// Stable rule name, used in telemetry and harness output.
    fn name(&self) -> &'static str;

    /// Score a construction snapshot.
    ///
    /// A positive witness flag ends the episode; an error triggers the
    /// environment's forced-termination guard instead of propagating.
    fn score(&self, graph: &Graph) -> Result<Score, ScoreError>;
}

/// Default rule: search for a connected graph with more vertices than edges.
///
/// `reward = |V| - |E|`; a disconnected graph scores `-INF` regardless of its
/// counts; any positive reward marks the construction as a witness.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeConjecture;

impl RewardRule for TreeConjecture {
    fn name(&self) -> &'static str {
        "tree-conjecture"
    }

    fn score(&self, graph: &Graph) -> Result<Score, ScoreError> {
        let mut reward = graph.vertex_count() as f64 - graph.edge_count() as f64;
        if !graph.is_connected() {
            reward = -INF;
        }
        Ok(Score {
            reward,
            witness: reward > 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::decision_count;

    fn score(n: usize, decisions: &[u8]) -> Score {
        TreeConjecture
            .score(&Graph::from_decisions(n, decisions))
            .unwrap()
    }

    #[test]
    fn test_disconnected_graph_scores_minus_inf() {
        let s = score(3, &[1, 0, 0]);
        assert_eq!(s.reward, -INF);
        assert!(!s.witness);
    }

    #[test]
    fn test_empty_graph_scores_minus_inf() {
        let s = score(4, &[0; 6]);
        assert_eq!(s.reward, -INF);
        assert!(!s.witness);
    }

    #[test]
    fn test_spanning_tree_is_a_witness() {
        // Star on 4 vertices: 3 edges, connected, reward 4 - 3 = 1.
        let s = score(4, &[1, 1, 1, 0, 0, 0]);
        assert_eq!(s.reward, 1.0);
        assert!(s.witness);
    }

    #[test]
    fn test_path_on_three_vertices_is_a_witness() {
        let s = score(3, &[1, 1, 0]);
        assert_eq!(s.reward, 1.0);
        assert!(s.witness);
    }

    #[test]
    fn test_dense_connected_graph_is_not_a_witness() {
        // Complete graph on 4 vertices: reward 4 - 6 = -2.
        let s = score(4, &vec![1u8; decision_count(4)]);
        assert_eq!(s.reward, -2.0);
        assert!(!s.witness);
    }

    #[test]
    fn test_triangle_is_not_a_witness() {
        // Connected but |V| == |E|, so the reward is not positive.
        let s = score(3, &[1, 1, 1]);
        assert_eq!(s.reward, 0.0);
        assert!(!s.witness);
    }
}
