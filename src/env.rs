// src/env.rs
//
// Gym-style graph-construction environment.
//
// One episode decides the N(N-1)/2 unordered vertex pairs of a graph on N
// labeled vertices, one binary decision per step in canonical pair order.
// After each decision the current construction is decoded and scored; the
// episode ends when the scoring rule reports a witness or the decision
// vector is exhausted. The environment only ever reports success; printing,
// plotting, or halting on a witness is the driver's business.

use serde::{Deserialize, Serialize};

use crate::graph::{decision_count, Graph};
use crate::reward::{RewardRule, Score, ScoreError, TreeConjecture, INF};
use crate::spaces::{ActionSpace, ObservationSpace};

/// Errors surfaced by the environment API.
///
/// Both variants are caller mistakes; neither leaves the environment in a
/// partially mutated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// Action outside `{0, 1}`. Raised before any mutation.
    InvalidAction { action: u8 },
    /// Vertex count too small to form a decision vector.
    InvalidVertexCount { vertices: usize },
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::InvalidAction { action } => {
                write!(f, "invalid action {action}: must be 0 or 1")
            }
            EnvError::InvalidVertexCount { vertices } => {
                write!(f, "invalid vertex count {vertices}: need at least 2")
            }
        }
    }
}

impl std::error::Error for EnvError {}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The scoring rule reported a witness construction.
    WitnessFound,
    /// Every entry of the decision vector has been decided.
    DecisionsExhausted,
    /// The scoring rule failed; the episode was ended defensively.
    ScoringFailure,
}

/// Auxiliary per-step information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Index of the next undecided slot.
    pub cursor: usize,
    /// Total number of slots in the decision vector.
    pub decision_count: usize,
    /// Termination reason, set once the episode is done.
    pub termination: Option<TerminationReason>,
    /// Error message from the scoring rule when termination was forced.
    ///
    /// Kept separate from `termination` so a forced stop is never mistaken
    /// for clean exhaustion of the decision vector.
    pub scoring_error: Option<String>,
}

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Full decision vector after the step.
    pub observation: Vec<u8>,
    /// Reward for the current construction.
    pub reward: f64,
    /// Whether the episode has terminated.
    pub done: bool,
    /// Additional information about the step.
    pub info: StepInfo,
}

/// Uniform interaction surface consumed by generic drivers.
pub trait Environment {
    /// Reset to the initial state and return the initial observation.
    fn reset(&mut self) -> Vec<u8>;

    /// Advance the environment by one action.
    fn step(&mut self, action: u8) -> Result<StepResult, EnvError>;

    /// Descriptor for the observation domain.
    fn observation_space(&self) -> ObservationSpace;

    /// Descriptor for the action domain.
    fn action_space(&self) -> ActionSpace;
}

/// Graph-construction environment.
///
/// The observable state is the full binary decision vector, one entry per
/// unordered vertex pair in canonical order. A cursor tracks the next
/// undecided slot; entries at or past the cursor are placeholder zeros and
/// decode as absent edges. All transitions are deterministic.
pub struct GraphEnv {
    vertices: usize,
    decision_count: usize,
    decisions: Vec<u8>,
    cursor: usize,
    done: bool,
    termination: Option<TerminationReason>,
    rule: Box<dyn RewardRule>,
}

impl std::fmt::Debug for GraphEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphEnv")
            .field("vertices", &self.vertices)
            .field("decision_count", &self.decision_count)
            .field("decisions", &self.decisions)
            .field("cursor", &self.cursor)
            .field("done", &self.done)
            .field("termination", &self.termination)
            .finish_non_exhaustive()
    }
}

impl GraphEnv {
    /// Create an environment with the default [`TreeConjecture`] rule.
    pub fn new(vertices: usize) -> Result<Self, EnvError> {
        Self::with_rule(vertices, Box::new(TreeConjecture))
    }

    /// Create an environment with a custom scoring rule.
    pub fn with_rule(vertices: usize, rule: Box<dyn RewardRule>) -> Result<Self, EnvError> {
        if vertices < 2 {
            return Err(EnvError::InvalidVertexCount { vertices });
        }
        let decision_count = decision_count(vertices);
        Ok(Self {
            vertices,
            decision_count,
            decisions: vec![0; decision_count],
            cursor: 0,
            done: false,
            termination: None,
            rule,
        })
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn decision_count(&self) -> usize {
        self.decision_count
    }

    /// Index of the next undecided slot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the current episode has terminated.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Current decision vector (the observable state).
    pub fn decisions(&self) -> &[u8] {
        &self.decisions
    }

    /// Current construction decoded from the decision vector.
    pub fn graph(&self) -> Graph {
        Graph::from_decisions(self.vertices, &self.decisions)
    }

    /// Reset to the blank construction and return the initial observation.
    ///
    /// Callable at any time, including mid-episode.
    pub fn reset(&mut self) -> Vec<u8> {
        self.decisions.iter_mut().for_each(|d| *d = 0);
        self.cursor = 0;
        self.done = false;
        self.termination = None;
        self.decisions.clone()
    }

    /// Decide the next slot of the decision vector.
    ///
    /// Returns the full decision vector as the observation, the reward of
    /// the resulting construction, the terminal flag, and per-step info
    /// carrying at least the cursor.
    ///
    /// Invalid actions fail before any mutation. Once a terminal result has
    /// been reported, further steps are no-ops that keep reporting
    /// `done = true` with reward 0; callers are expected to reset instead.
    pub fn step(&mut self, action: u8) -> Result<StepResult, EnvError> {
        if action > 1 {
            return Err(EnvError::InvalidAction { action });
        }
        if self.done {
            return Ok(StepResult {
                observation: self.decisions.clone(),
                reward: 0.0,
                done: true,
                info: self.info(None),
            });
        }

        self.decisions[self.cursor] = action;
        self.cursor += 1;

        let mut scoring_error = None;
        let score = match self.score_current() {
            Ok(score) => score,
            Err(err) => {
                // Forced-termination guard: the construction was already
                // mutated, so re-decode and re-score once rather than leave
                // the episode inconsistent. If the rule still fails, fall
                // back to the worst known reward.
                scoring_error = Some(err.to_string());
                self.score_current().unwrap_or(Score {
                    reward: -INF,
                    witness: false,
                })
            }
        };

        if scoring_error.is_some() {
            self.done = true;
            self.termination = Some(TerminationReason::ScoringFailure);
        } else if score.witness {
            self.done = true;
            self.termination = Some(TerminationReason::WitnessFound);
        } else if self.cursor == self.decision_count {
            self.done = true;
            self.termination = Some(TerminationReason::DecisionsExhausted);
        }

        Ok(StepResult {
            observation: self.decisions.clone(),
            reward: score.reward,
            done: self.done,
            info: self.info(scoring_error),
        })
    }

    /// No-op. Rendering a construction belongs to the driving harness.
    pub fn render(&self) {}

    fn score_current(&self) -> Result<Score, ScoreError> {
        let graph = Graph::from_decisions(self.vertices, &self.decisions);
        self.rule.score(&graph)
    }

    fn info(&self, scoring_error: Option<String>) -> StepInfo {
        StepInfo {
            cursor: self.cursor,
            decision_count: self.decision_count,
            termination: self.termination,
            scoring_error,
        }
    }
}

impl Environment for GraphEnv {
    fn reset(&mut self) -> Vec<u8> {
        GraphEnv::reset(self)
    }

    fn step(&mut self, action: u8) -> Result<StepResult, EnvError> {
        GraphEnv::step(self, action)
    }

    fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::multi_binary(self.decision_count)
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::discrete(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rule that always fails, for exercising the forced-termination guard.
    struct FailingRule;

    impl RewardRule for FailingRule {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn score(&self, _graph: &Graph) -> Result<Score, ScoreError> {
            Err(ScoreError::new("synthetic failure"))
        }
    }

    #[test]
    fn test_construction_rejects_small_vertex_counts() {
        assert_eq!(
            GraphEnv::new(0).unwrap_err(),
            EnvError::InvalidVertexCount { vertices: 0 }
        );
        assert_eq!(
            GraphEnv::new(1).unwrap_err(),
            EnvError::InvalidVertexCount { vertices: 1 }
        );
        assert!(GraphEnv::new(2).is_ok());
    }

    #[test]
    fn test_initial_state_is_blank() {
        let env = GraphEnv::new(4).unwrap();
        assert_eq!(env.decision_count(), 6);
        assert_eq!(env.cursor(), 0);
        assert!(!env.is_done());
        assert_eq!(env.graph().edge_count(), 0);
    }

    #[test]
    fn test_invalid_action_mutates_nothing() {
        let mut env = GraphEnv::new(3).unwrap();
        env.step(1).unwrap();
        let before_cursor = env.cursor();
        let before_obs = env.decisions().to_vec();

        let err = env.step(2).unwrap_err();
        assert_eq!(err, EnvError::InvalidAction { action: 2 });
        assert_eq!(env.cursor(), before_cursor);
        assert_eq!(env.decisions(), before_obs.as_slice());
    }

    #[test]
    fn test_scoring_failure_forces_termination() {
        let mut env = GraphEnv::with_rule(3, Box::new(FailingRule)).unwrap();
        let result = env.step(1).unwrap();
        assert!(result.done);
        assert_eq!(
            result.info.termination,
            Some(TerminationReason::ScoringFailure)
        );
        assert_eq!(result.reward, -INF);
        assert!(result
            .info
            .scoring_error
            .as_deref()
            .unwrap()
            .contains("synthetic failure"));
    }

    #[test]
    fn test_spaces_describe_the_env() {
        let env = GraphEnv::new(5).unwrap();
        assert_eq!(env.action_space(), ActionSpace::discrete(2));
        assert_eq!(env.observation_space(), ObservationSpace::multi_binary(10));
        assert!(env.observation_space().contains(&vec![0u8; 10]));
    }
}
