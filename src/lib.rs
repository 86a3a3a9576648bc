//! Graphgym core library.
//!
//! A Gym-style environment for searching the space of graphs on N labeled
//! vertices, one edge-decision at a time. A driver builds a construction by
//! deciding, in canonical pair order, whether each unordered vertex pair is
//! connected; after every decision the construction is scored against a
//! pluggable rule, and a positive reward marks a witness of the target
//! structural property.
//!
//! # Architecture
//!
//! - **Graph** (`graph`): pure decoding of binary decision vectors into
//!   graph snapshots, plus the canonical pair indexing.
//!
//! - **Reward** (`reward`): the `RewardRule` trait and the default
//!   `TreeConjecture` rule (connected graphs with more vertices than edges).
//!
//! - **Environment** (`env`): the `GraphEnv` state machine with the standard
//!   `reset / step / observation_space / action_space` surface, and the
//!   `Environment` trait generic drivers consume.
//!
//! - **Runner** (`runner`): episode mechanics driving a `Policy` against the
//!   environment; includes a seeded `RandomPolicy`.
//!
//! - **Telemetry** (`telemetry`): per-step sinks (no-op, JSONL) for offline
//!   analysis of episodes.
//!
//! The environment is single-threaded and synchronous; concurrent search
//! trials must each own their own instance.

pub mod env;
pub mod graph;
pub mod reward;
pub mod runner;
pub mod spaces;
pub mod telemetry;

// --- Re-exports for ergonomic external use ---------------------------------

pub use env::{EnvError, Environment, GraphEnv, StepInfo, StepResult, TerminationReason};
pub use graph::{decision_count, pair_index, Graph};
pub use reward::{RewardRule, Score, ScoreError, TreeConjecture, INF};
pub use runner::{run_episode, EpisodeConfig, EpisodeSummary, Policy, RandomPolicy};
pub use spaces::{ActionSpace, ObservationSpace};
pub use telemetry::{EpisodeSink, JsonlSink, NoopSink, StepRecord};
