use crossterm::event::KeyCode;
use taskdeck_core::InputState;

pub enum DialogAction {
    None,
    Cancel,
    Confirm,
}

/// Line editing shared by every single-field prompt.
pub fn handle_dialog_input(
    input: &mut InputState,
    key_code: KeyCode,
    allow_empty: bool,
) -> DialogAction {
    match key_code {
        KeyCode::Esc => DialogAction::Cancel,
        KeyCode::Enter => {
            if allow_empty || !input.is_empty() {
                DialogAction::Confirm
            } else {
                DialogAction::None
            }
        }
        other => {
            edit_input(input, other);
            DialogAction::None
        }
    }
}

/// Applies an editing key to `input`. Returns false for keys it ignores.
pub fn edit_input(input: &mut InputState, key_code: KeyCode) -> bool {
    match key_code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}
