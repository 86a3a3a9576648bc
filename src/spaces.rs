// src/spaces.rs
//
// Typed descriptors for the environment's action and observation domains.
//
// Generic drivers query these to size their policies and to sample valid
// actions without knowing anything about graph construction.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Discrete action domain `{0, .., cardinality - 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    /// Number of distinct actions.
    pub cardinality: u8,
}

impl ActionSpace {
    pub fn discrete(cardinality: u8) -> Self {
        Self { cardinality }
    }

    pub fn contains(&self, action: u8) -> bool {
        action < self.cardinality
    }

    /// Sample a uniformly random valid action.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u8 {
        rng.gen_range(0..self.cardinality)
    }
}

/// Fixed-length binary observation domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationSpace {
    /// Number of entries in the observation vector.
    pub len: usize,
    /// Inclusive lower bound per entry.
    pub low: u8,
    /// Inclusive upper bound per entry.
    pub high: u8,
}

impl ObservationSpace {
    pub fn multi_binary(len: usize) -> Self {
        Self {
            len,
            low: 0,
            high: 1,
        }
    }

    pub fn contains(&self, observation: &[u8]) -> bool {
        observation.len() == self.len
            && observation
                .iter()
                .all(|&v| v >= self.low && v <= self.high)
    }
}
