use crate::anim::{AnimationSequencer, PendingAnimation};
use crate::backend::{BackendError, GameBackend};
use crate::cards::{decode, DRAW_CARD_TOKEN};
use crate::gate::{self, GateInputs};
use crate::narrate::{format_narration, log_entry, YOU_PLAYED_PREFIX};
use crate::queue::TurnQueueCoordinator;
use crate::snapshot::{ColorChoice, Difficulty, GameSnapshot, Seat};
use crate::timer::TimerSlot;
use crate::MESSAGE_FADE;
use std::time::Instant;

/// Shown once a game has been created and it is the human's opening turn.
pub const GAME_STARTED_MESSAGE: &str = "Game started! Your turn first.";

/// Marker the server embeds in a snapshot message while a wild-card color
/// choice is outstanding.
const COLOR_PROMPT_MARKER: &str = "Choose a color";

/// The reconciliation controller: owns the authoritative snapshot and every
/// piece of transient presentation state derived from it, applies server
/// responses, recovers from failed mutating calls by re-fetching ground
/// truth, and paces queued agent actions through the turn queue.
#[derive(Debug)]
pub struct GameSession<B> {
    backend: B,
    snapshot: Option<GameSnapshot>,
    prev_agent_actions: Vec<String>,
    queue: TurnQueueCoordinator,
    anim: AnimationSequencer,
    turn_log: Vec<String>,
    action_message: Option<String>,
    message_fade: TimerSlot,
    error: Option<String>,
    pending_color_choice: bool,
    request_in_flight: bool,
    game_active: bool,
}

impl<B: GameBackend> GameSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_sequencer(backend, AnimationSequencer::new())
    }

    /// Construct with a chosen sequencer (tests seed its rotations).
    pub fn with_sequencer(backend: B, anim: AnimationSequencer) -> Self {
        Self {
            backend,
            snapshot: None,
            prev_agent_actions: Vec::new(),
            queue: TurnQueueCoordinator::new(),
            anim,
            turn_log: Vec::new(),
            action_message: None,
            message_fade: TimerSlot::default(),
            error: None,
            pending_color_choice: false,
            request_in_flight: false,
            game_active: false,
        }
    }

    // --- operations -----------------------------------------------------

    /// Start a fresh game, discarding every trace of the previous one.
    pub fn start_game(&mut self, difficulty: Difficulty, now: Instant) {
        self.error = None;
        self.pending_color_choice = false;
        self.snapshot = None;
        self.game_active = false;
        self.prev_agent_actions.clear();
        self.turn_log.clear();
        self.queue.reset();
        self.anim.reset();
        self.clear_message();
        match self.with_request(|backend| backend.start_game(difficulty)) {
            Ok(snapshot) => {
                self.game_active = true;
                self.apply_snapshot(snapshot, now);
                self.set_message(GAME_STARTED_MESSAGE.to_string(), now);
            }
            Err(err) => self.error = Some(fallback_text("Failed to start game", &err)),
        }
    }

    /// Submit the legal action for `token` (a hand card or `draw_card`).
    /// Silently refused while the gate is locked or the token is not among
    /// the snapshot's legal actions.
    pub fn play_action(&mut self, token: &str, now: Instant) {
        if self.locked() {
            return;
        }
        let Some(index) = self
            .snapshot
            .as_ref()
            .and_then(|snapshot| gate::legal_action_index(snapshot, token))
        else {
            return;
        };
        let was_wild = decode(token).is_wild();
        if token != DRAW_CARD_TOKEN && !was_wild {
            // Optimistic: the card takes off before the server confirms.
            self.anim.play_human(token, now);
        }
        self.error = None;
        match self.with_request(|backend| backend.play_action(index)) {
            Ok(snapshot) => {
                self.set_message(format_narration(&snapshot.message), now);
                if was_wild {
                    self.pending_color_choice = true;
                }
                self.apply_snapshot(snapshot, now);
            }
            Err(err) => {
                self.error = Some(fallback_text("Failed to play action", &err));
                self.recover(now);
            }
        }
    }

    /// Draw from the deck instead of playing a card.
    pub fn draw_card(&mut self, now: Instant) {
        self.play_action(DRAW_CARD_TOKEN, now);
    }

    /// Resolve a pending wild-card color choice. A client precondition: a
    /// no-op (no network call) unless a choice is actually pending.
    pub fn choose_color(&mut self, color: ColorChoice, now: Instant) {
        if !self.pending_color_choice || self.request_in_flight || self.winner().is_some() {
            return;
        }
        self.error = None;
        match self.with_request(|backend| backend.choose_color(color)) {
            Ok(snapshot) => {
                if let Some(token) = snapshot.message.strip_prefix(YOU_PLAYED_PREFIX) {
                    if decode(token).is_wild() {
                        self.anim.play_human(token, now);
                    }
                }
                self.pending_color_choice = false;
                self.set_message(format_narration(&snapshot.message), now);
                self.apply_snapshot(snapshot, now);
            }
            Err(err) => {
                self.error = Some(match err.detail() {
                    Some(detail) => format!("Color choice error: {detail}"),
                    None => format!("Failed to choose color: {err}"),
                });
                self.pending_color_choice = false;
                self.recover(now);
            }
        }
    }

    /// Re-fetch ground truth on the user's request.
    pub fn refresh(&mut self, now: Instant) {
        if !self.game_active {
            return;
        }
        self.error = None;
        self.sync_from_server(now, true);
    }

    /// Advance time-driven state: message fade, animation expiry, queued
    /// agent-turn presentation, and adoption of a batch that arrived while
    /// a presentation was still in progress.
    pub fn tick(&mut self, now: Instant) {
        if self.message_fade.fire(now) {
            self.action_message = None;
        }
        self.anim.tick(now);
        self.drive_queue(now);
        self.offer_batch(now);
    }

    /// The transport, mostly for tests asserting on recorded calls.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- presentation surface -------------------------------------------

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn action_message(&self) -> Option<&str> {
        self.action_message.as_deref()
    }

    pub fn turn_log(&self) -> &[String] {
        &self.turn_log
    }

    pub fn pending_color_choice(&self) -> bool {
        self.pending_color_choice
    }

    pub fn game_active(&self) -> bool {
        self.game_active
    }

    pub fn winner(&self) -> Option<Seat> {
        self.snapshot.as_ref().and_then(|snapshot| snapshot.winner)
    }

    pub fn human_animation(&self) -> Option<&PendingAnimation> {
        self.anim.human_animation()
    }

    pub fn agent_animation(&self) -> Option<&PendingAnimation> {
        self.anim.agent_animation()
    }

    /// The gate verdict, derived from scratch on every call.
    pub fn locked(&self) -> bool {
        gate::human_locked(&GateInputs {
            snapshot: self.snapshot.as_ref(),
            request_in_flight: self.request_in_flight,
            pending_color_choice: self.pending_color_choice,
            queued_agent_actions: self.queue.pending(),
            agent_animating: self.anim.agent_active(),
        })
    }

    pub fn card_playable(&self, token: &str) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|snapshot| gate::card_playable(snapshot, token))
    }

    pub fn draw_available(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(gate::draw_available)
    }

    // --- internals ------------------------------------------------------

    fn with_request<T>(&mut self, call: impl FnOnce(&mut B) -> T) -> T {
        self.request_in_flight = true;
        let out = call(&mut self.backend);
        self.request_in_flight = false;
        out
    }

    /// Recovery fetch after a failed mutating call. Keeps the action error
    /// on screen; only a failed recovery replaces it.
    fn recover(&mut self, now: Instant) {
        self.sync_from_server(now, false);
    }

    fn sync_from_server(&mut self, now: Instant, replace_error: bool) {
        match self.with_request(|backend| backend.query_state()) {
            Ok(Some(snapshot)) => {
                self.pending_color_choice = snapshot.message.contains(COLOR_PROMPT_MARKER);
                self.apply_snapshot(snapshot, now);
            }
            Ok(None) => {
                // Not an error: the server simply has no game for us.
                self.game_active = false;
                self.snapshot = None;
                self.pending_color_choice = false;
                self.queue.reset();
                self.anim.reset();
            }
            Err(err) => {
                if replace_error || self.error.is_none() {
                    self.error = Some(format!("Failed to fetch game state: {err}"));
                }
            }
        }
    }

    /// Apply an authoritative snapshot: rebuild the turn log on a genuinely
    /// new batch, adopt the batch into the queue, replace local state.
    fn apply_snapshot(&mut self, snapshot: GameSnapshot, now: Instant) {
        if !snapshot.agent_actions.is_empty()
            && snapshot.agent_actions != self.prev_agent_actions
        {
            self.turn_log = snapshot
                .agent_actions
                .iter()
                .map(|narration| log_entry(narration))
                .collect();
        }
        self.prev_agent_actions = snapshot.agent_actions.clone();
        self.snapshot = Some(snapshot);
        self.offer_batch(now);
    }

    /// Offer the current snapshot's batch to the queue. Refused batches
    /// (presentation in progress) are retried from `tick` once idle.
    fn offer_batch(&mut self, now: Instant) {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };
        if snapshot.agent_actions.is_empty()
            || snapshot.agent_actions.as_slice() == self.queue.tracked_batch()
        {
            return;
        }
        let batch = snapshot.agent_actions.clone();
        if self.queue.try_ingest(&batch) {
            self.drive_queue(now);
        }
    }

    fn drive_queue(&mut self, now: Instant) {
        for narration in self.queue.advance(&mut self.anim, now) {
            let formatted = format_narration(&narration);
            self.set_message(formatted, now);
        }
    }

    fn set_message(&mut self, message: String, now: Instant) {
        if message.is_empty() {
            return;
        }
        self.action_message = Some(message);
        self.message_fade.schedule(now + MESSAGE_FADE);
    }

    fn clear_message(&mut self) {
        self.action_message = None;
        self.message_fade.cancel();
    }
}

/// The server's own words when it sent any, a generic fallback otherwise.
fn fallback_text(fallback: &str, err: &BackendError) -> String {
    match err.detail() {
        Some(detail) => detail.to_string(),
        None => fallback.to_string(),
    }
}
