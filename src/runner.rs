// src/runner.rs
//
// Episode mechanics for driving the environment with a policy.
//
// The runner owns nothing about graph construction: it resets the
// environment, asks a policy for one action per undecided slot, forwards
// each transition to a telemetry sink, and summarises the episode. Search
// algorithms beyond random exploration plug in through the Policy trait.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::env::{EnvError, GraphEnv, TerminationReason};
use crate::spaces::ActionSpace;
use crate::telemetry::{EpisodeSink, StepRecord};

/// Decision-making interface for episode drivers.
pub trait Policy {
    /// Pick the next action given the current observation and cursor.
    fn select_action(&mut self, observation: &[u8], cursor: usize) -> u8;
}

/// Uniform random policy with deterministic seeding.
pub struct RandomPolicy {
    space: ActionSpace,
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Create a policy sampling uniformly from `{0, 1}`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            space: ActionSpace::discrete(2),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &[u8], _cursor: usize) -> u8 {
        self.space.sample(&mut self.rng)
    }
}

/// Configuration for one episode.
#[derive(Debug, Clone)]
pub struct EpisodeConfig {
    /// Episode ID for logging.
    pub episode_id: u64,
    /// Cap on steps; `None` runs until the environment terminates.
    pub max_steps: Option<u64>,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            episode_id: 0,
            max_steps: None,
        }
    }
}

impl EpisodeConfig {
    pub fn with_episode_id(mut self, episode_id: u64) -> Self {
        self.episode_id = episode_id;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

/// Summary of a completed episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode ID.
    pub episode_id: u64,
    /// Steps executed.
    pub steps: u64,
    /// Sum of step rewards over the episode.
    pub total_reward: f64,
    /// Reward of the final step.
    pub final_reward: f64,
    /// Why the episode ended; `None` if the step cap cut it short.
    pub termination: Option<TerminationReason>,
    /// Final decision vector when the episode produced a witness.
    pub witness: Option<Vec<u8>>,
}

/// Run one episode: reset the environment, then step the policy until the
/// environment terminates or the step cap is reached.
pub fn run_episode(
    env: &mut GraphEnv,
    policy: &mut dyn Policy,
    config: &EpisodeConfig,
    sink: &mut dyn EpisodeSink,
) -> Result<EpisodeSummary, EnvError> {
    let mut observation = env.reset();
    let mut steps = 0u64;
    let mut total_reward = 0.0;
    let mut final_reward = 0.0;
    let mut termination = None;
    let mut witness = None;

    loop {
        if let Some(cap) = config.max_steps {
            if steps >= cap {
                break;
            }
        }

        let action = policy.select_action(&observation, env.cursor());
        let result = env.step(action)?;
        steps += 1;
        total_reward += result.reward;
        final_reward = result.reward;
        termination = result.info.termination;
        sink.log_step(&StepRecord::from_result(
            config.episode_id,
            steps,
            action,
            &result,
        ));
        observation = result.observation;

        if result.done {
            if termination == Some(TerminationReason::WitnessFound) {
                witness = Some(observation.clone());
            }
            break;
        }
    }

    Ok(EpisodeSummary {
        episode_id: config.episode_id,
        steps,
        total_reward,
        final_reward,
        termination,
        witness,
    })
}
