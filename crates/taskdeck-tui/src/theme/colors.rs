use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const SELECTED_BG: Color = Color::Blue;

pub const DONE_TEXT: Color = Color::DarkGray;
pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;

pub const GROUP_HEADER: Color = Color::Cyan;
pub const TYPE_BADGE: Color = Color::Magenta;
pub const BRANCH_BADGE: Color = Color::LightBlue;
pub const TIME_TEXT: Color = Color::Green;

pub const POPUP_BG: Color = Color::Black;
pub const ERROR_COLOR: Color = Color::Red;
pub const SUCCESS_COLOR: Color = Color::Green;
