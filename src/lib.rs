pub mod app;
pub mod atom;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod physics;
pub mod simulation;

pub use atom::NumberAtom;
pub use config::GameConfig;
pub use error::{ConfigError, GameError, PlacementError};
pub use game::{GameModel, GameState};
pub use simulation::placement::BuildAnAtomModel;
