use super::state::InputMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands the keyboard can issue to the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiCommand {
    Quit,
    MoveUp,
    MoveDown,
    Top,
    Bottom,
    Assign,
    Refresh,
    StartScoreEdit,
    ScoreInput(char),
    ScoreBackspace,
    CommitScore,
    CancelScoreEdit,
    ScoreUp,
    ScoreDown,
    NextIndustry,
    PrevIndustry,
    ToggleQualified,
    ResetFilters,
    ClearToasts,
}

pub fn map_key(mode: InputMode, key: KeyEvent) -> Option<TuiCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(TuiCommand::Quit);
    }
    match mode {
        InputMode::EditScore => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(TuiCommand::ScoreInput(c)),
            KeyCode::Backspace => Some(TuiCommand::ScoreBackspace),
            KeyCode::Enter => Some(TuiCommand::CommitScore),
            KeyCode::Esc => Some(TuiCommand::CancelScoreEdit),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(TuiCommand::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(TuiCommand::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(TuiCommand::MoveUp),
            KeyCode::Char('g') | KeyCode::Home => Some(TuiCommand::Top),
            KeyCode::Char('G') | KeyCode::End => Some(TuiCommand::Bottom),
            KeyCode::Char('a') | KeyCode::Enter => Some(TuiCommand::Assign),
            KeyCode::Char('r') => Some(TuiCommand::Refresh),
            KeyCode::Char('s') => Some(TuiCommand::StartScoreEdit),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(TuiCommand::ScoreUp),
            KeyCode::Char('-') => Some(TuiCommand::ScoreDown),
            KeyCode::Char('i') | KeyCode::Tab => Some(TuiCommand::NextIndustry),
            KeyCode::Char('I') | KeyCode::BackTab => Some(TuiCommand::PrevIndustry),
            KeyCode::Char('f') => Some(TuiCommand::ToggleQualified),
            KeyCode::Char('x') => Some(TuiCommand::ResetFilters),
            KeyCode::Char('c') | KeyCode::Esc => Some(TuiCommand::ClearToasts),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_keys() {
        let m = InputMode::Normal;
        assert_eq!(map_key(m, key(KeyCode::Char('q'))), Some(TuiCommand::Quit));
        assert_eq!(map_key(m, key(KeyCode::Char('a'))), Some(TuiCommand::Assign));
        assert_eq!(map_key(m, key(KeyCode::Enter)), Some(TuiCommand::Assign));
        assert_eq!(map_key(m, key(KeyCode::Down)), Some(TuiCommand::MoveDown));
        assert_eq!(map_key(m, key(KeyCode::Char('f'))), Some(TuiCommand::ToggleQualified));
        assert_eq!(map_key(m, key(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_edit_mode_keys() {
        let m = InputMode::EditScore;
        assert_eq!(map_key(m, key(KeyCode::Char('7'))), Some(TuiCommand::ScoreInput('7')));
        assert_eq!(map_key(m, key(KeyCode::Char('q'))), None);
        assert_eq!(map_key(m, key(KeyCode::Enter)), Some(TuiCommand::CommitScore));
        assert_eq!(map_key(m, key(KeyCode::Esc)), Some(TuiCommand::CancelScoreEdit));
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputMode::Normal, ctrl_c), Some(TuiCommand::Quit));
        assert_eq!(map_key(InputMode::EditScore, ctrl_c), Some(TuiCommand::Quit));
    }
}
