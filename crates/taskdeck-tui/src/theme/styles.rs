use super::colors::*;
use ratatui::style::{Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn selected_row() -> Style {
    Style::default().bg(SELECTED_BG)
}

pub fn done_text() -> Style {
    Style::default()
        .fg(DONE_TEXT)
        .add_modifier(Modifier::CROSSED_OUT)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn group_header() -> Style {
    Style::default()
        .fg(GROUP_HEADER)
        .add_modifier(Modifier::BOLD)
}

pub fn type_badge() -> Style {
    Style::default().fg(TYPE_BADGE)
}

pub fn branch_badge() -> Style {
    Style::default().fg(BRANCH_BADGE)
}

pub fn time_text() -> Style {
    Style::default().fg(TIME_TEXT)
}

/// Plain or crossed out, depending on completion.
pub fn task_text(completed: bool) -> Style {
    if completed {
        done_text()
    } else {
        normal_text()
    }
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

pub fn success_text() -> Style {
    Style::default().fg(SUCCESS_COLOR)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
