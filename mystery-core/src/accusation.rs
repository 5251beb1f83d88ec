//! Accusation resolution.
//!
//! Every accusation costs an attempt, right or wrong. The solution is
//! revealed once, at the terminal transition, and never before.

use crate::case::Case;
use crate::character::{CharacterId, Roster};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from submitting an accusation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccusationError {
    /// The victim or someone outside the roster. No attempt is used.
    #[error("{0} cannot be accused")]
    InvalidTarget(CharacterId),

    #[error("the case is already closed")]
    AlreadyResolved,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// The full solution, handed out only when the game ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub case: Case,
    pub explanation: String,
    /// Time from game start to the final accusation.
    pub elapsed: Duration,
}

/// Result of one accusation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Wrong {
        accused: CharacterId,
        attempts_remaining: u32,
    },
    Win {
        resolution: Resolution,
    },
    Lose {
        accused: CharacterId,
        resolution: Resolution,
    },
}

impl Verdict {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Wrong { .. })
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Win { .. })
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Verdict::Wrong { .. } => None,
            Verdict::Win { resolution } | Verdict::Lose { resolution, .. } => Some(resolution),
        }
    }

    /// Player-facing text for this verdict.
    pub fn message(&self) -> String {
        match self {
            Verdict::Wrong {
                accused,
                attempts_remaining,
            } => format!(
                "Wrong! {accused} is not the killer. You have {attempts_remaining} {} remaining.",
                if *attempts_remaining == 1 { "attempt" } else { "attempts" }
            ),
            Verdict::Win { resolution } => format!("Correct! {}", resolution.explanation),
            Verdict::Lose { resolution, .. } => resolution.explanation.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Resolved(Outcome),
}

/// Two-state machine: active until a correct guess or no attempts remain.
#[derive(Debug, Clone)]
pub struct AccusationResolver {
    attempts_remaining: u32,
    state: State,
}

impl AccusationResolver {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts_remaining: max_attempts,
            state: State::Active,
        }
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            State::Active => None,
            State::Resolved(outcome) => Some(outcome),
        }
    }

    /// Accuse a suspect.
    ///
    /// Invalid targets are rejected before an attempt is consumed.
    pub fn submit(
        &mut self,
        case: &Case,
        roster: &Roster,
        accused: CharacterId,
        elapsed: Duration,
    ) -> Result<Verdict, AccusationError> {
        if self.is_resolved() {
            warn!(%accused, "accusation after the case was closed");
            return Err(AccusationError::AlreadyResolved);
        }
        if accused == roster.victim || !roster.is_suspect(accused) {
            warn!(%accused, "rejected accusation target");
            return Err(AccusationError::InvalidTarget(accused));
        }

        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);

        if case.is_killer(accused) {
            self.state = State::Resolved(Outcome::Won);
            info!(attempts_remaining = self.attempts_remaining, "case solved");
            return Ok(Verdict::Win {
                resolution: Resolution {
                    case: case.clone(),
                    explanation: explain(case, roster.victim),
                    elapsed,
                },
            });
        }

        if self.attempts_remaining == 0 {
            self.state = State::Resolved(Outcome::Lost);
            info!("out of attempts");
            return Ok(Verdict::Lose {
                accused,
                resolution: Resolution {
                    case: case.clone(),
                    explanation: format!(
                        "{} You're out of guesses - the killer got away.",
                        explain(case, roster.victim)
                    ),
                    elapsed,
                },
            });
        }

        Ok(Verdict::Wrong {
            accused,
            attempts_remaining: self.attempts_remaining,
        })
    }
}

fn explain(case: &Case, victim: CharacterId) -> String {
    format!(
        "{} killed {} using the {} in the {} {} because {}.",
        case.killer, victim, case.weapon, case.location, case.time_of_death, case.motive
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> Case {
        Case {
            killer: CharacterId::Michal,
            weapon: "poison".to_string(),
            location: "kitchen".to_string(),
            time_of_death: "at midnight".to_string(),
            motive: "Omri was about to reveal her secret".to_string(),
        }
    }

    fn submit(resolver: &mut AccusationResolver, id: CharacterId) -> Result<Verdict, AccusationError> {
        resolver.submit(&case(), &Roster::family(), id, Duration::from_secs(90))
    }

    #[test]
    fn test_wrong_then_win() {
        let mut resolver = AccusationResolver::new(3);

        let first = submit(&mut resolver, CharacterId::Rom).unwrap();
        assert_eq!(
            first,
            Verdict::Wrong {
                accused: CharacterId::Rom,
                attempts_remaining: 2
            }
        );
        assert!(first.resolution().is_none());

        let second = submit(&mut resolver, CharacterId::Rom).unwrap();
        assert!(matches!(second, Verdict::Wrong { attempts_remaining: 1, .. }));
        assert!(second.message().contains("1 attempt remaining"));

        let third = submit(&mut resolver, CharacterId::Michal).unwrap();
        assert!(third.is_correct());
        assert_eq!(resolver.attempts_remaining(), 0);
        assert_eq!(resolver.outcome(), Some(Outcome::Won));

        let resolution = third.resolution().unwrap();
        assert!(resolution.explanation.contains("poison"));
        assert!(resolution.explanation.contains("kitchen"));
        assert!(resolution.explanation.contains("Omri was about to reveal her secret"));
        assert_eq!(resolution.elapsed, Duration::from_secs(90));
        assert!(third.message().starts_with("Correct!"));
    }

    #[test]
    fn test_three_wrong_loses() {
        let mut resolver = AccusationResolver::new(3);
        submit(&mut resolver, CharacterId::Rachel).unwrap();
        submit(&mut resolver, CharacterId::Ilan).unwrap();
        let last = submit(&mut resolver, CharacterId::Neta).unwrap();

        match &last {
            Verdict::Lose { accused, resolution } => {
                assert_eq!(*accused, CharacterId::Neta);
                assert_eq!(resolution.case, case());
                assert!(resolution.explanation.contains("Michal killed Omri"));
                assert!(resolution.explanation.contains("out of guesses"));
            }
            other => panic!("expected a loss, got {other:?}"),
        }
        assert_eq!(resolver.outcome(), Some(Outcome::Lost));
    }

    #[test]
    fn test_correct_first_try_consumes_attempt() {
        let mut resolver = AccusationResolver::new(3);
        submit(&mut resolver, CharacterId::Michal).unwrap();
        assert_eq!(resolver.attempts_remaining(), 2);
    }

    #[test]
    fn test_invalid_target_keeps_attempts() {
        let mut resolver = AccusationResolver::new(3);
        assert_eq!(
            submit(&mut resolver, CharacterId::Omri),
            Err(AccusationError::InvalidTarget(CharacterId::Omri))
        );

        let roster = Roster::new(vec![CharacterId::Michal, CharacterId::Rom], CharacterId::Omri);
        assert_eq!(
            resolver.submit(&case(), &roster, CharacterId::Neta, Duration::ZERO),
            Err(AccusationError::InvalidTarget(CharacterId::Neta))
        );
        assert_eq!(resolver.attempts_remaining(), 3);
        assert!(!resolver.is_resolved());
    }

    #[test]
    fn test_closed_case_rejects_submissions() {
        let mut resolver = AccusationResolver::new(1);
        submit(&mut resolver, CharacterId::Michal).unwrap();
        assert_eq!(
            submit(&mut resolver, CharacterId::Michal),
            Err(AccusationError::AlreadyResolved)
        );

        let mut resolver = AccusationResolver::new(1);
        assert!(submit(&mut resolver, CharacterId::Rom).unwrap().is_terminal());
        assert_eq!(
            submit(&mut resolver, CharacterId::Michal),
            Err(AccusationError::AlreadyResolved)
        );
    }
}
