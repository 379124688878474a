use crate::anim::{AnimationSequencer, AnimationToken};
use crate::narrate::played_card;
use crate::{NARRATION_READ_DELAY, POST_ANIMATION_PAUSE};
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueuePhase {
    Idle,
    Presenting { token: AnimationToken },
    WaitingToDequeue { deadline: Instant },
}

/// Paces a batch of agent narrations down to human-readable speed: one
/// narration at a time, each either animated (a played card) or held for a
/// read delay (a draw), strictly FIFO.
#[derive(Debug)]
pub struct TurnQueueCoordinator {
    queue: VecDeque<String>,
    tracked_batch: Vec<String>,
    phase: QueuePhase,
}

impl TurnQueueCoordinator {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            tracked_batch: Vec::new(),
            phase: QueuePhase::Idle,
        }
    }

    /// The batch this queue was last fed. Stays put after the queue drains
    /// so an already-presented batch is never adopted twice.
    pub fn tracked_batch(&self) -> &[String] {
        &self.tracked_batch
    }

    /// Narrations not yet fully presented.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether a presentation is neither queued nor in progress.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.phase == QueuePhase::Idle
    }

    /// Adopt a new batch. Refused while a presentation is in progress; the
    /// controller re-offers once the queue reaches idle.
    pub fn try_ingest(&mut self, batch: &[String]) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.queue = batch.iter().cloned().collect();
        self.tracked_batch = batch.to_vec();
        true
    }

    /// Forget everything (new game, reset).
    pub fn reset(&mut self) {
        self.queue.clear();
        self.tracked_batch.clear();
        self.phase = QueuePhase::Idle;
    }

    /// Drive the state machine. Returns the narrations whose presentation
    /// began during this call, in order.
    pub fn advance(&mut self, anim: &mut AnimationSequencer, now: Instant) -> Vec<String> {
        let mut shown = Vec::new();
        loop {
            match self.phase {
                QueuePhase::Idle => {
                    let Some(head) = self.queue.front() else {
                        break;
                    };
                    shown.push(head.clone());
                    self.phase = match played_card(head)
                        .and_then(|card| anim.start_agent(card, now))
                    {
                        Some(token) => QueuePhase::Presenting { token },
                        None => QueuePhase::WaitingToDequeue {
                            deadline: now + NARRATION_READ_DELAY,
                        },
                    };
                }
                QueuePhase::Presenting { token } => {
                    if !anim.agent_done(token, now) {
                        break;
                    }
                    self.phase = QueuePhase::WaitingToDequeue {
                        deadline: now + POST_ANIMATION_PAUSE,
                    };
                }
                QueuePhase::WaitingToDequeue { deadline } => {
                    if now < deadline {
                        break;
                    }
                    self.queue.pop_front();
                    self.phase = QueuePhase::Idle;
                    if self.queue.is_empty() {
                        break;
                    }
                }
            }
        }
        shown
    }
}

impl Default for TurnQueueCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
