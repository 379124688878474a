use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    ToggleLog,
    MoveUp,
    MoveDown,
    PlaySelected,
    DrawCard,
    NewGame,
    Refresh,
    DifficultyEasy,
    DifficultyMedium,
    DifficultyHard,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('l') => InputAction::ToggleLog,
        KeyCode::Up | KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::PlaySelected,
        KeyCode::Char('d') => InputAction::DrawCard,
        KeyCode::Char('n') => InputAction::NewGame,
        KeyCode::Char('r') => InputAction::Refresh,
        KeyCode::Char('1') => InputAction::DifficultyEasy,
        KeyCode::Char('2') => InputAction::DifficultyMedium,
        KeyCode::Char('3') => InputAction::DifficultyHard,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn maps_basic_actions() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            InputAction::PlaySelected
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
            InputAction::DrawCard
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
            InputAction::NewGame
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            InputAction::Quit
        );
    }

    #[test]
    fn maps_difficulty_digits() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE)),
            InputAction::DifficultyEasy
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE)),
            InputAction::DifficultyHard
        );
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)),
            InputAction::None
        );
    }
}
