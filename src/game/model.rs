use crate::atom::NumberAtom;
use crate::config::GameConfig;
use crate::constants::{LEVEL_COUNT, POINTS_FIRST_ATTEMPT};
use crate::error::{ConfigError, GameError};
use crate::game::challenge::{ChallengeAction, ChallengeState, GameChallenge};
use crate::game::factory::{ChallengeFactory, level_definition};
use log::info;
use serde::{Deserialize, Serialize};

/// Where the game is between and during levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    ChoosingLevel,
    PresentingChallenges,
    LevelCompleted,
}

/// Sequences challenges into levels and keeps score.
#[derive(Debug)]
pub struct GameModel {
    config: GameConfig,
    factory: ChallengeFactory,
    state: GameState,
    level: Option<usize>,
    challenges: Vec<GameChallenge>,
    current_index: usize,
    score: u32,
    elapsed_time: f32,
    best_scores: [u32; LEVEL_COUNT],
    best_times: [Option<f32>; LEVEL_COUNT],
    new_best_score: bool,
}

impl GameModel {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_factory(config, ChallengeFactory::new())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_factory(config, ChallengeFactory::with_seed(seed))
    }

    pub fn with_factory(config: GameConfig, factory: ChallengeFactory) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
            factory,
            state: GameState::ChoosingLevel,
            level: None,
            challenges: Vec::new(),
            current_index: 0,
            score: 0,
            elapsed_time: 0.0,
            best_scores: [0; LEVEL_COUNT],
            best_times: [None; LEVEL_COUNT],
            new_best_score: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The 1-based level being played or last completed.
    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn challenges(&self) -> &[GameChallenge] {
        &self.challenges
    }

    /// 1-based position of the current challenge within the level.
    pub fn challenge_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn current_challenge(&self) -> Option<&GameChallenge> {
        match self.state {
            GameState::PresentingChallenges => self.challenges.get(self.current_index),
            _ => None,
        }
    }

    pub fn max_possible_score(&self) -> u32 {
        self.config.challenges_per_level as u32 * POINTS_FIRST_ATTEMPT
    }

    pub fn is_perfect_score(&self) -> bool {
        self.score == self.max_possible_score()
    }

    /// Whether the end-of-level reward should play.
    pub fn should_show_reward(&self) -> bool {
        self.state == GameState::LevelCompleted
            && (self.is_perfect_score() || self.config.show_reward)
    }

    pub fn best_score(&self, level: usize) -> Option<u32> {
        level.checked_sub(1).and_then(|i| self.best_scores.get(i)).copied()
    }

    pub fn best_time(&self, level: usize) -> Option<f32> {
        level
            .checked_sub(1)
            .and_then(|i| self.best_times.get(i))
            .copied()
            .flatten()
    }

    /// Set when the level just completed beat the previous best score.
    pub fn is_new_best_score(&self) -> bool {
        self.new_best_score
    }

    /// Starts a level from scratch, discarding any level in progress.
    pub fn start_level(&mut self, level: usize) -> Result<(), GameError> {
        level_definition(level)?;
        let challenges = self.factory.generate_level(
            level,
            self.config.challenges_per_level,
            self.config.max_attempts,
        )?;

        info!("starting level {level} with {} challenges", challenges.len());
        self.challenges = challenges;
        self.level = Some(level);
        self.current_index = 0;
        self.score = 0;
        self.elapsed_time = 0.0;
        self.new_best_score = false;
        self.state = GameState::PresentingChallenges;
        Ok(())
    }

    pub fn submit(&mut self, submitted: &NumberAtom) -> Result<ChallengeState, GameError> {
        let challenge = self.active_challenge(ChallengeAction::Submit)?;
        let earned = challenge.submit(submitted)?;
        let state = challenge.state();
        self.score += earned;
        Ok(state)
    }

    pub fn try_again(&mut self) -> Result<ChallengeState, GameError> {
        let challenge = self.active_challenge(ChallengeAction::TryAgain)?;
        challenge.try_again()?;
        Ok(challenge.state())
    }

    pub fn display_correct_answer(&mut self) -> Result<ChallengeState, GameError> {
        let challenge = self.active_challenge(ChallengeAction::DisplayCorrectAnswer)?;
        challenge.display_correct_answer()?;
        Ok(challenge.state())
    }

    /// Finishes the current challenge and moves to the next one, or completes
    /// the level after the last.
    pub fn next(&mut self) -> Result<GameState, GameError> {
        self.active_challenge(ChallengeAction::Next)?.next()?;

        if self.current_index + 1 < self.challenges.len() {
            self.current_index += 1;
        } else {
            self.complete_level();
        }
        Ok(self.state)
    }

    /// Clears the score and any level in progress and goes back to level
    /// selection. Best scores survive.
    pub fn reset(&mut self) {
        self.challenges.clear();
        self.current_index = 0;
        self.score = 0;
        self.elapsed_time = 0.0;
        self.level = None;
        self.new_best_score = false;
        self.state = GameState::ChoosingLevel;
    }

    /// Advances the level timer while challenges are being presented.
    pub fn step(&mut self, dt: f32) {
        if self.config.timer_enabled && self.state == GameState::PresentingChallenges {
            self.elapsed_time += dt;
        }
    }

    fn active_challenge(&mut self, action: ChallengeAction) -> Result<&mut GameChallenge, GameError> {
        let state = self.state;
        let challenge = match state {
            GameState::PresentingChallenges => self.challenges.get_mut(self.current_index),
            _ => None,
        };
        challenge.ok_or(GameError::NoActiveChallenge { state, action })
    }

    fn complete_level(&mut self) {
        self.state = GameState::LevelCompleted;
        let Some(index) = self.level.and_then(|level| level.checked_sub(1)) else {
            return;
        };

        self.new_best_score = self.score > self.best_scores[index];
        if self.new_best_score {
            self.best_scores[index] = self.score;
        }
        if self.config.timer_enabled && self.is_perfect_score() {
            let best = &mut self.best_times[index];
            if best.is_none_or(|time| self.elapsed_time < time) {
                *best = Some(self.elapsed_time);
            }
        }

        info!(
            "level {} complete: score {}/{} in {:.1}s",
            index + 1,
            self.score,
            self.max_possible_score(),
            self.elapsed_time
        );
    }
}
