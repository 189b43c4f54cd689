pub mod challenge;
pub mod factory;
pub mod model;

pub use challenge::{ChallengeState, ChallengeType, GameChallenge};
pub use model::{GameModel, GameState};
