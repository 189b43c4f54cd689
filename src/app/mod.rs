use crate::atom::NumberAtom;
use crate::config::GameConfig;
use crate::constants::LEVEL_COUNT;
use crate::game::{GameModel, GameState};
use crate::physics::particle::{ParticleId, ParticleKind};
use crate::simulation::placement::{BuildAnAtomModel, ReleaseOutcome};
use log::{debug, info, warn};
use std::cell::Cell;
use std::rc::Rc;

pub type AppError = Box<dyn std::error::Error + Send + Sync>;
pub type AppResult<T> = Result<T, AppError>;

const FRAME_TIME: f32 = 1.0 / 60.0;

/// Headless driver that plays the game through the same commands a user
/// interface would issue.
pub struct App {
    build: BuildAnAtomModel,
    game: GameModel,
    last_snapshot: Rc<Cell<NumberAtom>>,
}

impl App {
    pub fn new(config: GameConfig) -> AppResult<Self> {
        Self::with_game(GameModel::new(config)?)
    }

    pub fn with_game(game: GameModel) -> AppResult<Self> {
        let mut build = BuildAnAtomModel::new();
        let last_snapshot = Rc::new(Cell::new(NumberAtom::default()));

        let snapshot = Rc::clone(&last_snapshot);
        build.on_reconfigured(move |atom| {
            debug!("atom reconfigured: {atom}");
            snapshot.set(*atom);
        });

        Ok(Self {
            build,
            game,
            last_snapshot,
        })
    }

    pub fn build_model(&self) -> &BuildAnAtomModel {
        &self.build
    }

    pub fn game(&self) -> &GameModel {
        &self.game
    }

    /// The most recent atom reported by the reconfiguration signal.
    pub fn last_snapshot(&self) -> NumberAtom {
        self.last_snapshot.get()
    }

    /// Empties the play area and drags particles from the buckets into the
    /// atom until it matches `target`.
    pub fn build_atom(&mut self, target: &NumberAtom) -> AppResult<NumberAtom> {
        self.build.reset();

        let wanted = [
            (ParticleKind::Proton, target.proton_count),
            (ParticleKind::Neutron, target.neutron_count),
            (ParticleKind::Electron, target.electron_count),
        ];
        for (kind, count) in wanted {
            let ids: Vec<ParticleId> = self
                .build
                .bucket(kind)
                .contents()
                .map(|particle| particle.id())
                .take(count as usize)
                .collect();
            if ids.len() < count as usize {
                return Err(format!("not enough {kind}s to build {target}").into());
            }

            for &id in &ids {
                self.build.grab(id)?;
                self.build.drag_to(id, self.build.atom().center())?;
            }
            for (id, outcome) in ids.iter().zip(self.build.release_batch(&ids)?) {
                if outcome != ReleaseOutcome::JoinedAtom {
                    warn!("{kind} {id} did not join the atom: {outcome:?}");
                }
            }
        }

        self.settle();
        Ok(self.build.atom().to_number_atom())
    }

    /// Plays a whole level, answering every challenge correctly. Returns the
    /// final score.
    pub fn play_level(&mut self, level: usize) -> AppResult<u32> {
        self.game.start_level(level)?;

        while let Some(challenge) = self.game.current_challenge() {
            let challenge_type = challenge.challenge_type();
            let answer = *challenge.answer_atom();
            let submission = if challenge_type.uses_schematic() {
                self.build_atom(&answer)?
            } else {
                answer
            };

            let state = self.game.submit(&submission)?;
            info!(
                "challenge {} ({challenge_type:?}): submitted {submission}, {state:?}",
                self.game.challenge_number()
            );
            self.game.step(FRAME_TIME);
            if self.game.next()? == GameState::LevelCompleted {
                break;
            }
        }

        Ok(self.game.score())
    }

    /// Advances both models by one frame.
    pub fn step(&mut self, dt: f32) {
        self.build.step(dt);
        self.game.step(dt);
    }

    fn settle(&mut self) {
        for _ in 0..120 {
            self.build.step(FRAME_TIME);
        }
    }
}

/// Native entry point: reads `BAA_*` settings and plays every level.
pub fn start() -> AppResult<()> {
    env_logger::init();

    let config = GameConfig::from_env()?;
    info!("starting with {config:?}");
    let mut app = App::new(config)?;

    for level in 1..=LEVEL_COUNT {
        let score = app.play_level(level)?;
        let game = app.game();
        info!(
            "level {level}: {score}/{} points, reward: {}",
            game.max_possible_score(),
            game.should_show_reward()
        );
        app.game.reset();
    }
    Ok(())
}
