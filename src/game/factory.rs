use crate::atom::NumberAtom;
use crate::constants::{LEVEL_COUNT, NUM_ELECTRONS};
use crate::error::ConfigError;
use crate::game::challenge::{ChallengeType, GameChallenge};
use crate::physics::elements::Element;
use log::{debug, warn};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

// Attempts at drawing an answer atom not already used in the level.
const UNIQUE_ANSWER_ATTEMPTS: usize = 20;

/// What one game level asks about and how big its atoms get.
#[derive(Clone, Copy, Debug)]
pub struct LevelDefinition {
    pub min_protons: u32,
    pub max_protons: u32,
    /// Whether answer atoms may be ions.
    pub charged: bool,
    pub challenge_types: &'static [ChallengeType],
}

impl LevelDefinition {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for z in [self.min_protons, self.max_protons] {
            if !Element::is_supported(z) {
                return Err(ConfigError::UnsupportedProtonCount(z));
            }
        }
        if self.min_protons > self.max_protons {
            return Err(ConfigError::EmptyProtonRange {
                min: self.min_protons,
                max: self.max_protons,
            });
        }
        // Every offered type must be able to produce an answer inside the range.
        if let Some(&challenge_type) = self
            .challenge_types
            .iter()
            .find(|t| t.max_protons() < self.min_protons)
        {
            return Err(ConfigError::ChallengeTypeOutOfRange {
                challenge_type,
                min_protons: self.min_protons,
                cap: challenge_type.max_protons(),
            });
        }
        Ok(())
    }
}

pub static LEVELS: [LevelDefinition; LEVEL_COUNT] = [
    LevelDefinition {
        min_protons: 1,
        max_protons: 3,
        charged: false,
        challenge_types: &[
            ChallengeType::CountsToElement,
            ChallengeType::SchematicToElement,
            ChallengeType::CountsToMass,
            ChallengeType::SchematicToMassNumber,
        ],
    },
    LevelDefinition {
        min_protons: 1,
        max_protons: 10,
        charged: true,
        challenge_types: &[
            ChallengeType::CountsToCharge,
            ChallengeType::SchematicToCharge,
            ChallengeType::CountsToMass,
            ChallengeType::SchematicToMassNumber,
            ChallengeType::SchematicToElement,
        ],
    },
    LevelDefinition {
        min_protons: 1,
        max_protons: 10,
        charged: true,
        challenge_types: &[
            ChallengeType::CountsToSymbol,
            ChallengeType::SchematicToSymbol,
            ChallengeType::SymbolToCounts,
            ChallengeType::SymbolToSchematic,
        ],
    },
    LevelDefinition {
        min_protons: 1,
        max_protons: 18,
        charged: true,
        challenge_types: &[
            ChallengeType::CountsToSymbol,
            ChallengeType::SymbolToCounts,
            ChallengeType::CountsToCharge,
            ChallengeType::CountsToMass,
            ChallengeType::SchematicToSymbol,
        ],
    },
];

/// Level numbers are 1-based.
pub fn level_definition(level: usize) -> Result<&'static LevelDefinition, ConfigError> {
    level
        .checked_sub(1)
        .and_then(|index| LEVELS.get(index))
        .ok_or(ConfigError::UnknownLevel {
            level,
            max: LEVEL_COUNT,
        })
}

/// Draws challenge sets for a level from a seeded generator.
#[derive(Debug)]
pub struct ChallengeFactory {
    rng: ChaCha8Rng,
}

impl ChallengeFactory {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn generate_level(
        &mut self,
        level: usize,
        count: usize,
        max_attempts: u32,
    ) -> Result<Vec<GameChallenge>, ConfigError> {
        self.generate(level_definition(level)?, count, max_attempts)
    }

    /// Generates `count` challenges. Consecutive challenges never share a type
    /// when the level offers more than one.
    pub fn generate(
        &mut self,
        definition: &LevelDefinition,
        count: usize,
        max_attempts: u32,
    ) -> Result<Vec<GameChallenge>, ConfigError> {
        if count == 0 {
            return Err(ConfigError::ChallengesPerLevel(count));
        }
        definition.validate()?;

        let mut challenges: Vec<GameChallenge> = Vec::with_capacity(count);
        let mut previous: Option<ChallengeType> = None;
        for _ in 0..count {
            let challenge_type = self.pick_type(definition.challenge_types, previous)?;
            let answer = self.pick_unique_answer(definition, challenge_type, &challenges)?;
            debug!("generated {challenge_type:?} challenge with answer {answer}");
            challenges.push(GameChallenge::new(challenge_type, answer, max_attempts));
            previous = Some(challenge_type);
        }
        Ok(challenges)
    }

    fn pick_type(
        &mut self,
        types: &[ChallengeType],
        previous: Option<ChallengeType>,
    ) -> Result<ChallengeType, ConfigError> {
        let candidates: Vec<ChallengeType> = if types.len() > 1 {
            types
                .iter()
                .copied()
                .filter(|t| Some(*t) != previous)
                .collect()
        } else {
            types.to_vec()
        };
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(ConfigError::ChallengesPerLevel(0))
    }

    fn pick_unique_answer(
        &mut self,
        definition: &LevelDefinition,
        challenge_type: ChallengeType,
        existing: &[GameChallenge],
    ) -> Result<NumberAtom, ConfigError> {
        let mut answer = self.pick_answer(definition, challenge_type)?;
        for _ in 0..UNIQUE_ANSWER_ATTEMPTS {
            if !existing.iter().any(|c| *c.answer_atom() == answer) {
                return Ok(answer);
            }
            answer = self.pick_answer(definition, challenge_type)?;
        }
        warn!("no unused answer atom found for {challenge_type:?}; repeating {answer}");
        Ok(answer)
    }

    fn pick_answer(
        &mut self,
        definition: &LevelDefinition,
        challenge_type: ChallengeType,
    ) -> Result<NumberAtom, ConfigError> {
        // `validate` guarantees the capped range is not empty.
        let max_protons = definition.max_protons.min(challenge_type.max_protons());
        let protons = self.rng.gen_range(definition.min_protons..=max_protons);
        let element =
            Element::by_atomic_number(protons).ok_or(ConfigError::UnsupportedProtonCount(protons))?;

        let neutrons = *element
            .stable_neutrons
            .choose(&mut self.rng)
            .ok_or(ConfigError::UnsupportedProtonCount(protons))?;

        let mut electrons = protons as i32;
        if definition.charged {
            electrons -= self.rng.gen_range(-2..=2);
        }
        if challenge_type.uses_schematic() {
            electrons = electrons.min(NUM_ELECTRONS as i32);
        }

        Ok(NumberAtom::new(protons, neutrons, electrons.max(0) as u32))
    }
}

impl Default for ChallengeFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NUM_NEUTRONS, NUM_PROTONS};
    use crate::game::challenge::ChallengeState;

    #[test]
    fn generates_requested_number_of_fresh_challenges() {
        let mut factory = ChallengeFactory::with_seed(7);
        let challenges = factory.generate_level(2, 5, 2).unwrap();
        assert_eq!(challenges.len(), 5);
        for challenge in &challenges {
            assert_eq!(challenge.state(), ChallengeState::PresentingChallenge);
            assert_eq!(challenge.max_attempts(), 2);
            assert!(LEVELS[1].challenge_types.contains(&challenge.challenge_type()));
        }
    }

    #[test]
    fn consecutive_challenges_differ_in_type() {
        for seed in 0..20 {
            let mut factory = ChallengeFactory::with_seed(seed);
            for level in 1..=LEVEL_COUNT {
                let challenges = factory.generate_level(level, 10, 2).unwrap();
                for pair in challenges.windows(2) {
                    assert_ne!(pair[0].challenge_type(), pair[1].challenge_type());
                }
            }
        }
    }

    #[test]
    fn single_type_levels_may_repeat() {
        let definition = LevelDefinition {
            min_protons: 1,
            max_protons: 2,
            charged: false,
            challenge_types: &[ChallengeType::CountsToMass],
        };
        let challenges = ChallengeFactory::with_seed(1).generate(&definition, 3, 2).unwrap();
        assert!(challenges
            .iter()
            .all(|c| c.challenge_type() == ChallengeType::CountsToMass));
    }

    #[test]
    fn answers_stay_within_level_and_build_limits() {
        let mut factory = ChallengeFactory::with_seed(99);
        for level in 1..=LEVEL_COUNT {
            let definition = level_definition(level).unwrap();
            for challenge in factory.generate_level(level, 10, 2).unwrap() {
                let answer = challenge.answer_atom();
                let protons = definition.min_protons..=definition.max_protons;
                assert!(protons.contains(&answer.proton_count));
                assert!(answer.is_stable());
                if !definition.charged {
                    assert!(answer.is_neutral());
                }
                assert!(answer.charge().abs() <= 2);
                if challenge.challenge_type().uses_schematic() {
                    assert!(answer.proton_count as usize <= NUM_PROTONS);
                    assert!(answer.neutron_count as usize <= NUM_NEUTRONS);
                    assert!(answer.electron_count as usize <= NUM_ELECTRONS);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_challenges() {
        let a = ChallengeFactory::with_seed(3).generate_level(3, 5, 2).unwrap();
        let b = ChallengeFactory::with_seed(3).generate_level(3, 5, 2).unwrap();
        let key = |c: &GameChallenge| (c.challenge_type(), *c.answer_atom());
        assert_eq!(
            a.iter().map(key).collect::<Vec<_>>(),
            b.iter().map(key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn level_minimum_above_a_type_cap_is_rejected() {
        let definition = LevelDefinition {
            min_protons: 12,
            max_protons: 18,
            charged: true,
            challenge_types: &[ChallengeType::CountsToSymbol, ChallengeType::SchematicToElement],
        };
        assert_eq!(
            ChallengeFactory::with_seed(4).generate(&definition, 5, 2).unwrap_err(),
            ConfigError::ChallengeTypeOutOfRange {
                challenge_type: ChallengeType::SchematicToElement,
                min_protons: 12,
                cap: NUM_PROTONS as u32,
            }
        );

        let inverted = LevelDefinition {
            min_protons: 5,
            max_protons: 2,
            ..definition
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::EmptyProtonRange { min: 5, max: 2 })
        );
    }

    #[test]
    fn schematic_answers_respect_the_level_minimum() {
        let definition = LevelDefinition {
            min_protons: 8,
            max_protons: 18,
            charged: false,
            challenge_types: &[ChallengeType::SchematicToMassNumber, ChallengeType::CountsToMass],
        };
        let challenges = ChallengeFactory::with_seed(12).generate(&definition, 20, 2).unwrap();
        for challenge in &challenges {
            let protons = challenge.answer_atom().proton_count;
            assert!(protons >= 8);
            if challenge.challenge_type().uses_schematic() {
                assert!(protons as usize <= NUM_PROTONS);
            }
        }
    }

    #[test]
    fn unseeded_factory_generates_valid_levels() {
        let mut factory = ChallengeFactory::new();
        for level in 1..=LEVEL_COUNT {
            let challenges = factory.generate_level(level, 5, 2).unwrap();
            assert_eq!(challenges.len(), 5);
            assert!(challenges.iter().all(|c| c.answer_atom().is_stable()));
        }
    }

    #[test]
    fn configuration_errors_are_fatal() {
        let mut factory = ChallengeFactory::with_seed(0);
        assert_eq!(
            factory.generate_level(0, 5, 2).unwrap_err(),
            ConfigError::UnknownLevel { level: 0, max: LEVEL_COUNT }
        );
        assert_eq!(
            factory.generate_level(LEVEL_COUNT + 1, 5, 2).unwrap_err(),
            ConfigError::UnknownLevel { level: LEVEL_COUNT + 1, max: LEVEL_COUNT }
        );
        assert_eq!(
            factory.generate_level(1, 0, 2).unwrap_err(),
            ConfigError::ChallengesPerLevel(0)
        );

        let beyond_table = LevelDefinition {
            min_protons: 19,
            max_protons: 30,
            charged: false,
            challenge_types: &[ChallengeType::CountsToElement],
        };
        assert_eq!(
            factory.generate(&beyond_table, 1, 2).unwrap_err(),
            ConfigError::UnsupportedProtonCount(19)
        );
    }
}
