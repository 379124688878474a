use crate::cards::DRAW_CARD_TOKEN;
use crate::snapshot::{GameSnapshot, Seat};

/// Everything the enablement verdict depends on. Collected fresh at every
/// call site; the gate itself holds no state.
#[derive(Debug, Clone, Copy)]
pub struct GateInputs<'a> {
    pub snapshot: Option<&'a GameSnapshot>,
    pub request_in_flight: bool,
    pub pending_color_choice: bool,
    pub queued_agent_actions: usize,
    pub agent_animating: bool,
}

/// Whether the human is barred from acting right now.
pub fn human_locked(inputs: &GateInputs<'_>) -> bool {
    let Some(snapshot) = inputs.snapshot else {
        return true;
    };
    inputs.request_in_flight
        || inputs.pending_color_choice
        || snapshot.winner.is_some()
        || snapshot.current_player != Seat::Human
        || inputs.queued_agent_actions > 0
        || inputs.agent_animating
}

/// Whether this card may be submitted against this snapshot at all,
/// independent of the overall lock.
pub fn card_playable(snapshot: &GameSnapshot, token: &str) -> bool {
    snapshot
        .legal_actions
        .iter()
        .any(|action| action.action_str == token)
}

/// The index to submit for a token, valid only against this snapshot.
pub fn legal_action_index(snapshot: &GameSnapshot, token: &str) -> Option<u32> {
    snapshot
        .legal_actions
        .iter()
        .find(|action| action.action_str == token)
        .map(|action| action.action_index)
}

/// Whether drawing from the deck is currently a legal action.
pub fn draw_available(snapshot: &GameSnapshot) -> bool {
    card_playable(snapshot, DRAW_CARD_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::LegalAction;

    fn snapshot(current_player: Seat) -> GameSnapshot {
        GameSnapshot {
            player_hand: vec!["r-5".to_string(), "g-9".to_string()],
            agent_hand_size: 7,
            current_player,
            top_card: "r-2".to_string(),
            current_color: "r".to_string(),
            legal_actions: vec![
                LegalAction {
                    action_index: 3,
                    action_str: "r-5".to_string(),
                },
                LegalAction {
                    action_index: 60,
                    action_str: DRAW_CARD_TOKEN.to_string(),
                },
            ],
            discard_pile_top: Vec::new(),
            message: String::new(),
            agent_actions: Vec::new(),
            winner: None,
        }
    }

    fn open_inputs(snapshot: Option<&GameSnapshot>) -> GateInputs<'_> {
        GateInputs {
            snapshot,
            request_in_flight: false,
            pending_color_choice: false,
            queued_agent_actions: 0,
            agent_animating: false,
        }
    }

    #[test]
    fn unlocked_only_on_a_quiet_human_turn() {
        let snap = snapshot(Seat::Human);
        assert!(!human_locked(&open_inputs(Some(&snap))));
    }

    #[test]
    fn locked_without_a_snapshot() {
        assert!(human_locked(&open_inputs(None)));
    }

    #[test]
    fn locked_whenever_it_is_not_the_humans_turn() {
        let snap = snapshot(Seat::Agent);
        assert!(human_locked(&open_inputs(Some(&snap))));
    }

    #[test]
    fn each_blocking_input_locks_on_its_own() {
        let snap = snapshot(Seat::Human);
        let base = open_inputs(Some(&snap));

        assert!(human_locked(&GateInputs {
            request_in_flight: true,
            ..base
        }));
        assert!(human_locked(&GateInputs {
            pending_color_choice: true,
            ..base
        }));
        assert!(human_locked(&GateInputs {
            queued_agent_actions: 2,
            ..base
        }));
        assert!(human_locked(&GateInputs {
            agent_animating: true,
            ..base
        }));

        let mut won = snapshot(Seat::Human);
        won.winner = Some(Seat::Agent);
        assert!(human_locked(&open_inputs(Some(&won))));
    }

    #[test]
    fn playability_follows_the_legal_action_list() {
        let snap = snapshot(Seat::Human);
        assert!(card_playable(&snap, "r-5"));
        assert!(!card_playable(&snap, "g-9"));
        assert_eq!(legal_action_index(&snap, "r-5"), Some(3));
        assert_eq!(legal_action_index(&snap, "g-9"), None);
        assert!(draw_available(&snap));
    }
}
