//! Error types for the placement model, the game, and configuration.

use crate::game::challenge::{ChallengeAction, ChallengeState, ChallengeType};
use crate::game::model::GameState;
use crate::physics::particle::ParticleId;
use thiserror::Error;

/// A challenge command was issued in a state that does not define it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid state transition: {action} is not defined in state {state:?}")]
pub struct InvalidStateTransition {
    pub state: ChallengeState,
    pub action: ChallengeAction,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    InvalidStateTransition(#[from] InvalidStateTransition),

    /// A challenge command arrived while no challenge is being presented
    #[error("{action} requires an active challenge, but the game is in {state:?}")]
    NoActiveChallenge {
        state: GameState,
        action: ChallengeAction,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fatal configuration problems, raised at startup or challenge generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("challenges per level must be at least 1, got {0}")]
    ChallengesPerLevel(usize),

    #[error("max attempts must be at least 1, got {0}")]
    MaxAttempts(u32),

    #[error("level {level} does not exist (levels are 1..={max})")]
    UnknownLevel { level: usize, max: usize },

    #[error("proton count {0} is outside the supported element table")]
    UnsupportedProtonCount(u32),

    #[error("proton range {min}..={max} is empty")]
    EmptyProtonRange { min: u32, max: u32 },

    #[error("{challenge_type:?} answers stop at {cap} protons, below the level minimum of {min_protons}")]
    ChallengeTypeOutOfRange {
        challenge_type: ChallengeType,
        min_protons: u32,
        cap: u32,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no particle with id {0}")]
    UnknownParticle(ParticleId),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    #[error("signal emitted while its listeners were already being notified")]
    Reentrant,
}
