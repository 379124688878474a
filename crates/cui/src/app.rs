use crossterm::event::{KeyCode, KeyEvent};
use runo_core::{decode, ColorChoice, Difficulty, GameBackend, GameSession, Seat};
use std::time::Instant;

/// Terminal-side state: the game session plus everything that only exists
/// for the shell (cursor, menu selection, popup visibility).
pub struct App<B: GameBackend> {
    pub session: GameSession<B>,
    pub difficulty: Difficulty,
    pub hand_cursor: usize,
    pub show_log: bool,
    pub show_help: bool,
    pub should_quit: bool,
}

impl<B: GameBackend> App<B> {
    pub fn new(backend: B, difficulty: Difficulty) -> Self {
        Self {
            session: GameSession::new(backend),
            difficulty,
            hand_cursor: 0,
            show_log: false,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.session.tick(now);
        self.normalize_cursor();
    }

    pub fn start_game(&mut self) {
        self.session.start_game(self.difficulty, Instant::now());
        self.hand_cursor = 0;
    }

    pub fn refresh(&mut self) {
        self.session.refresh(Instant::now());
        self.normalize_cursor();
    }

    /// Takes effect at the next new game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn hand(&self) -> &[String] {
        self.session
            .snapshot()
            .map(|snapshot| snapshot.player_hand.as_slice())
            .unwrap_or(&[])
    }

    pub fn hand_len(&self) -> usize {
        self.hand().len()
    }

    pub fn move_cursor(&mut self, down: bool) {
        let hand_len = self.hand_len();
        move_index(&mut self.hand_cursor, hand_len, down);
    }

    pub fn play_at_cursor(&mut self) {
        let Some(token) = self.hand().get(self.hand_cursor).cloned() else {
            return;
        };
        self.session.play_action(&token, Instant::now());
        self.normalize_cursor();
    }

    pub fn draw_card(&mut self) {
        self.session.draw_card(Instant::now());
        self.normalize_cursor();
    }

    /// While a wild-card color choice is pending, the four color keys answer
    /// it directly and are consumed before normal key mapping.
    pub fn handle_color_prompt_key(&mut self, key: KeyEvent) -> bool {
        if !self.session.pending_color_choice() {
            return false;
        }
        let color = match key.code {
            KeyCode::Char('r') => ColorChoice::Red,
            KeyCode::Char('g') => ColorChoice::Green,
            KeyCode::Char('b') => ColorChoice::Blue,
            KeyCode::Char('y') => ColorChoice::Yellow,
            _ => return false,
        };
        self.session.choose_color(color, Instant::now());
        true
    }

    pub fn turn_indicator(&self) -> &'static str {
        let Some(snapshot) = self.session.snapshot() else {
            return "No game in progress";
        };
        if snapshot.winner.is_some() {
            return "Game Over";
        }
        if self.session.pending_color_choice() {
            return "Choose a color";
        }
        match snapshot.current_player {
            Seat::Human => "Your Turn",
            Seat::Agent => "Agent's Turn",
        }
    }

    pub fn winner_banner(&self) -> Option<String> {
        let winner = self.session.snapshot()?.winner?;
        let name = match winner {
            Seat::Human => "HUMAN",
            Seat::Agent => "AGENT",
        };
        Some(format!("Game Over! Winner: {name}"))
    }

    pub fn card_label(&self, index: usize, token: &str) -> String {
        let cursor = if index == self.hand_cursor { ">" } else { " " };
        let playable = if !self.session.locked() && self.session.card_playable(token) {
            "*"
        } else {
            " "
        };
        format!("{cursor}{playable} {index:>2}: {}", decode(token).display_text())
    }

    fn normalize_cursor(&mut self) {
        let len = self.hand_len();
        if len == 0 {
            self.hand_cursor = 0;
        } else if self.hand_cursor >= len {
            self.hand_cursor = len - 1;
        }
    }
}

fn move_index(value: &mut usize, len: usize, forward: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if forward {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use runo_core::{BackendError, GameSnapshot, LegalAction};

    struct StubBackend {
        snapshot: GameSnapshot,
    }

    impl GameBackend for StubBackend {
        fn start_game(&mut self, _: Difficulty) -> Result<GameSnapshot, BackendError> {
            Ok(self.snapshot.clone())
        }

        fn query_state(&mut self) -> Result<Option<GameSnapshot>, BackendError> {
            Ok(Some(self.snapshot.clone()))
        }

        fn play_action(&mut self, _: u32) -> Result<GameSnapshot, BackendError> {
            Ok(self.snapshot.clone())
        }

        fn choose_color(&mut self, _: ColorChoice) -> Result<GameSnapshot, BackendError> {
            Ok(self.snapshot.clone())
        }
    }

    fn started_app() -> App<StubBackend> {
        let snapshot = GameSnapshot {
            player_hand: vec!["r-5".to_string(), "g-9".to_string(), "b-2".to_string()],
            agent_hand_size: 7,
            current_player: Seat::Human,
            top_card: "r-2".to_string(),
            current_color: "r".to_string(),
            legal_actions: vec![LegalAction {
                action_index: 0,
                action_str: "r-5".to_string(),
            }],
            discard_pile_top: Vec::new(),
            message: String::new(),
            agent_actions: Vec::new(),
            winner: None,
        };
        let mut app = App::new(StubBackend { snapshot }, Difficulty::Medium);
        app.start_game();
        app
    }

    #[test]
    fn cursor_wraps_around_the_hand() {
        let mut app = started_app();
        assert_eq!(app.hand_cursor, 0);
        app.move_cursor(false);
        assert_eq!(app.hand_cursor, 2);
        app.move_cursor(true);
        assert_eq!(app.hand_cursor, 0);
    }

    #[test]
    fn card_labels_mark_cursor_and_playability() {
        let app = started_app();
        assert_eq!(app.card_label(0, "r-5"), ">*  0: Red 5");
        assert_eq!(app.card_label(1, "g-9"), "    1: Green 9");
    }

    #[test]
    fn color_keys_pass_through_without_a_pending_choice() {
        let mut app = started_app();
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert!(!app.handle_color_prompt_key(key));
    }

    #[test]
    fn turn_indicator_tracks_the_session() {
        let mut app = started_app();
        assert_eq!(app.turn_indicator(), "Your Turn");
        app.session = GameSession::new(StubBackend {
            snapshot: started_app().session.snapshot().unwrap().clone(),
        });
        assert_eq!(app.turn_indicator(), "No game in progress");
    }
}
