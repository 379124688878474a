use crate::app::App;
use crate::input::InputAction;
use runo_core::{Difficulty, GameBackend};

pub fn dispatch<B: GameBackend>(app: &mut App<B>, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::ToggleLog => app.show_log = !app.show_log,
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::PlaySelected => app.play_at_cursor(),
        InputAction::DrawCard => app.draw_card(),
        InputAction::NewGame => app.start_game(),
        InputAction::Refresh => app.refresh(),
        InputAction::DifficultyEasy => app.set_difficulty(Difficulty::Easy),
        InputAction::DifficultyMedium => app.set_difficulty(Difficulty::Medium),
        InputAction::DifficultyHard => app.set_difficulty(Difficulty::Hard),
    }
}
