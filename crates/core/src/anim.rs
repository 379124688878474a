use crate::{AGENT_PLAY_ANIMATION, HUMAN_PLAY_ANIMATION};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

/// A card visually in transit to the discard pile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnimation {
    pub card: String,
    /// Degrees in `[-10, 10)`, so landed cards sit slightly askew.
    pub rotation_degrees: i8,
}

/// Handle for one agent-card flight. Completion fires exactly once per
/// token, enforced here rather than trusted to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationToken(u64);

#[derive(Debug)]
struct Flight {
    animation: PendingAnimation,
    done_at: Instant,
}

/// Runs at most one human and one agent card flight at a time.
#[derive(Debug)]
pub struct AnimationSequencer {
    rng: StdRng,
    human: Option<Flight>,
    agent: Option<(Flight, u64)>,
    next_token: u64,
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic rotations for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            human: None,
            agent: None,
            next_token: 0,
        }
    }

    fn flight(&mut self, card: &str, done_at: Instant) -> Flight {
        Flight {
            animation: PendingAnimation {
                card: card.to_string(),
                rotation_degrees: self.rng.gen_range(-10..10),
            },
            done_at,
        }
    }

    /// Start the human-card flight. Refused while one is already in the air.
    pub fn play_human(&mut self, card: &str, now: Instant) -> bool {
        if self.human.is_some() {
            return false;
        }
        let flight = self.flight(card, now + HUMAN_PLAY_ANIMATION);
        self.human = Some(flight);
        true
    }

    /// Start the agent-card flight. Refused while one is already in the air.
    pub fn start_agent(&mut self, card: &str, now: Instant) -> Option<AnimationToken> {
        if self.agent.is_some() {
            return None;
        }
        self.next_token += 1;
        let flight = self.flight(card, now + AGENT_PLAY_ANIMATION);
        self.agent = Some((flight, self.next_token));
        Some(AnimationToken(self.next_token))
    }

    /// Single-fire completion check for an agent flight: true exactly once,
    /// when the flight identified by `token` has landed.
    pub fn agent_done(&mut self, token: AnimationToken, now: Instant) -> bool {
        match &self.agent {
            Some((flight, id)) if *id == token.0 && now >= flight.done_at => {
                self.agent = None;
                true
            }
            _ => false,
        }
    }

    /// Expire the human flight. Agent flights are consumed by `agent_done`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(flight) = &self.human {
            if now >= flight.done_at {
                self.human = None;
            }
        }
    }

    /// Abandon both flights (new game, reset).
    pub fn reset(&mut self) {
        self.human = None;
        self.agent = None;
    }

    pub fn human_animation(&self) -> Option<&PendingAnimation> {
        self.human.as_ref().map(|flight| &flight.animation)
    }

    pub fn agent_animation(&self) -> Option<&PendingAnimation> {
        self.agent.as_ref().map(|(flight, _)| &flight.animation)
    }

    pub fn agent_active(&self) -> bool {
        self.agent.is_some()
    }
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self::new()
    }
}
