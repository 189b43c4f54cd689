//! A single quiz question and the state machine that scores it.
//!
//! Every command goes through [`transition`], a pure function of the current
//! state and the incoming event. Pairs it does not define are rejected with
//! [`InvalidStateTransition`].

use crate::atom::NumberAtom;
use crate::constants::POINTS_FIRST_ATTEMPT;
use crate::error::InvalidStateTransition;
use crate::physics::elements::MAX_SUPPORTED_PROTONS;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a challenge presents the atom and what the user has to answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeType {
    CountsToElement,
    CountsToCharge,
    CountsToMass,
    CountsToSymbol,
    SchematicToElement,
    SchematicToCharge,
    SchematicToMassNumber,
    SchematicToSymbol,
    SymbolToCounts,
    SymbolToSchematic,
}

/// The quantities a challenge type compares between answer and submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerCheck {
    ProtonCount,
    Charge,
    MassNumber,
    /// Proton count, mass number and charge, as written on an element symbol.
    Symbol,
    /// Every particle count.
    Counts,
}

impl ChallengeType {
    pub const ALL: [ChallengeType; 10] = [
        ChallengeType::CountsToElement,
        ChallengeType::CountsToCharge,
        ChallengeType::CountsToMass,
        ChallengeType::CountsToSymbol,
        ChallengeType::SchematicToElement,
        ChallengeType::SchematicToCharge,
        ChallengeType::SchematicToMassNumber,
        ChallengeType::SchematicToSymbol,
        ChallengeType::SymbolToCounts,
        ChallengeType::SymbolToSchematic,
    ];

    pub fn answer_check(self) -> AnswerCheck {
        match self {
            ChallengeType::CountsToElement | ChallengeType::SchematicToElement => {
                AnswerCheck::ProtonCount
            }
            ChallengeType::CountsToCharge | ChallengeType::SchematicToCharge => AnswerCheck::Charge,
            ChallengeType::CountsToMass | ChallengeType::SchematicToMassNumber => {
                AnswerCheck::MassNumber
            }
            ChallengeType::CountsToSymbol | ChallengeType::SchematicToSymbol => AnswerCheck::Symbol,
            ChallengeType::SymbolToCounts | ChallengeType::SymbolToSchematic => AnswerCheck::Counts,
        }
    }

    /// Whether the atom is drawn as particles, either shown to the user or
    /// built by them. Those atoms must fit in the buckets and the two shells.
    pub fn uses_schematic(self) -> bool {
        matches!(
            self,
            ChallengeType::SchematicToElement
                | ChallengeType::SchematicToCharge
                | ChallengeType::SchematicToMassNumber
                | ChallengeType::SchematicToSymbol
                | ChallengeType::SymbolToSchematic
        )
    }

    pub fn max_protons(self) -> u32 {
        if self.uses_schematic() {
            crate::constants::NUM_PROTONS as u32
        } else {
            MAX_SUPPORTED_PROTONS
        }
    }

    pub fn is_correct(self, answer: &NumberAtom, submitted: &NumberAtom) -> bool {
        match self.answer_check() {
            AnswerCheck::ProtonCount => answer.proton_count == submitted.proton_count,
            AnswerCheck::Charge => answer.charge() == submitted.charge(),
            AnswerCheck::MassNumber => answer.mass_number() == submitted.mass_number(),
            AnswerCheck::Symbol => {
                answer.proton_count == submitted.proton_count
                    && answer.mass_number() == submitted.mass_number()
                    && answer.charge() == submitted.charge()
            }
            AnswerCheck::Counts => answer == submitted,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeState {
    PresentingChallenge,
    PresentingTryAgain,
    ChallengeSolvedCorrectly,
    AttemptsExhausted,
    DisplayingCorrectAnswer,
    /// `next()` was accepted; the game model moves on.
    Finished,
}

/// Commands a user can send to a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChallengeAction {
    Submit,
    TryAgain,
    DisplayCorrectAnswer,
    Next,
}

impl fmt::Display for ChallengeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChallengeAction::Submit => "submit",
            ChallengeAction::TryAgain => "try again",
            ChallengeAction::DisplayCorrectAnswer => "display correct answer",
            ChallengeAction::Next => "next",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeEvent {
    /// The submission has already been checked against the answer.
    Submit { correct: bool },
    TryAgain,
    DisplayCorrectAnswer,
    Next,
}

impl ChallengeEvent {
    pub fn action(self) -> ChallengeAction {
        match self {
            ChallengeEvent::Submit { .. } => ChallengeAction::Submit,
            ChallengeEvent::TryAgain => ChallengeAction::TryAgain,
            ChallengeEvent::DisplayCorrectAnswer => ChallengeAction::DisplayCorrectAnswer,
            ChallengeEvent::Next => ChallengeAction::Next,
        }
    }
}

/// Side effect of an accepted transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Add the challenge's current point value to the score.
    AwardPoints,
    AttemptUsed,
    HalvePoints,
    ForfeitPoints,
    /// The challenge is over; advance to the next one or finish the level.
    Advance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub to: ChallengeState,
    pub effect: Effect,
}

/// The challenge transition table.
pub fn transition(
    state: ChallengeState,
    event: ChallengeEvent,
    attempts_used: u32,
    max_attempts: u32,
) -> Result<Transition, InvalidStateTransition> {
    use ChallengeEvent as E;
    use ChallengeState as S;

    let (to, effect) = match (state, event) {
        (S::PresentingChallenge, E::Submit { correct: true }) => {
            (S::ChallengeSolvedCorrectly, Effect::AwardPoints)
        }
        (S::PresentingChallenge, E::Submit { correct: false }) => {
            if attempts_used + 1 < max_attempts {
                (S::PresentingTryAgain, Effect::AttemptUsed)
            } else {
                (S::AttemptsExhausted, Effect::AttemptUsed)
            }
        }
        (S::PresentingTryAgain, E::TryAgain) => (S::PresentingChallenge, Effect::HalvePoints),
        (S::AttemptsExhausted, E::DisplayCorrectAnswer) => {
            (S::DisplayingCorrectAnswer, Effect::ForfeitPoints)
        }
        (S::ChallengeSolvedCorrectly | S::DisplayingCorrectAnswer, E::Next) => {
            (S::Finished, Effect::Advance)
        }
        (state, event) => {
            return Err(InvalidStateTransition {
                state,
                action: event.action(),
            });
        }
    };
    Ok(Transition { to, effect })
}

#[derive(Clone, Debug, Serialize)]
pub struct GameChallenge {
    challenge_type: ChallengeType,
    answer_atom: NumberAtom,
    state: ChallengeState,
    attempts_used: u32,
    max_attempts: u32,
    point_value: u32,
    points_awarded: u32,
}

impl GameChallenge {
    pub fn new(challenge_type: ChallengeType, answer_atom: NumberAtom, max_attempts: u32) -> Self {
        Self {
            challenge_type,
            answer_atom,
            state: ChallengeState::PresentingChallenge,
            attempts_used: 0,
            max_attempts,
            point_value: POINTS_FIRST_ATTEMPT,
            points_awarded: 0,
        }
    }

    pub fn challenge_type(&self) -> ChallengeType {
        self.challenge_type
    }

    pub fn answer_atom(&self) -> &NumberAtom {
        &self.answer_atom
    }

    pub fn state(&self) -> ChallengeState {
        self.state
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Points a correct submission would earn right now.
    pub fn point_value(&self) -> u32 {
        self.point_value
    }

    pub fn points_awarded(&self) -> u32 {
        self.points_awarded
    }

    pub fn check_answer(&self, submitted: &NumberAtom) -> bool {
        self.challenge_type.is_correct(&self.answer_atom, submitted)
    }

    /// Checks `submitted` against the answer. Returns the points earned,
    /// zero for a wrong answer.
    pub fn submit(&mut self, submitted: &NumberAtom) -> Result<u32, InvalidStateTransition> {
        let correct = self.check_answer(submitted);
        self.apply(ChallengeEvent::Submit { correct })?;
        Ok(if correct { self.points_awarded } else { 0 })
    }

    pub fn try_again(&mut self) -> Result<(), InvalidStateTransition> {
        self.apply(ChallengeEvent::TryAgain).map(drop)
    }

    pub fn display_correct_answer(&mut self) -> Result<(), InvalidStateTransition> {
        self.apply(ChallengeEvent::DisplayCorrectAnswer).map(drop)
    }

    pub fn next(&mut self) -> Result<(), InvalidStateTransition> {
        self.apply(ChallengeEvent::Next).map(drop)
    }

    fn apply(&mut self, event: ChallengeEvent) -> Result<Effect, InvalidStateTransition> {
        let Transition { to, effect } =
            transition(self.state, event, self.attempts_used, self.max_attempts)?;

        match effect {
            Effect::AwardPoints => self.points_awarded = self.point_value,
            Effect::AttemptUsed => self.attempts_used += 1,
            Effect::HalvePoints => self.point_value /= 2,
            Effect::ForfeitPoints => self.point_value = 0,
            Effect::Advance => {}
        }

        debug!(
            "{:?} challenge ({}): {:?} -> {:?} via {}",
            self.challenge_type,
            self.answer_atom,
            self.state,
            to,
            event.action()
        );
        self.state = to;
        Ok(effect)
    }
}
