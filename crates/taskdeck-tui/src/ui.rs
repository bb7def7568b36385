use crate::app::{App, AppMode, Tab};
use crate::card_tab;
use crate::components::*;
use crate::form::FormField;
use crate::list_view::{self, row_line};
use crate::theme::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use taskdeck_domain::TaskRef;

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_tabs(app, frame, chunks[0]);
    match app.tab {
        Tab::List => render_list(app, frame, chunks[1]),
        Tab::Cards => render_cards(app, frame, chunks[1]),
    }
    render_footer(app, frame, chunks[2]);

    match &app.mode {
        AppMode::AddTask => render_form_popup(app, frame),
        AppMode::ConfirmDelete(id) => {
            let message = app
                .store
                .get(&TaskRef::Id(*id))
                .map(|task| format!("Delete '{} - {}'?", task.main_task, task.sub_task))
                .unwrap_or_else(|| "Delete this task?".to_string());
            render_confirm_popup(frame, "Confirm Delete", &message);
        }
        AppMode::LoadFile => render_input_popup(frame, "Load Tasks", "File:", &app.input),
        AppMode::Normal | AppMode::Search => {}
    }
}

fn render_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let selected = match app.tab {
        Tab::List => 0,
        Tab::Cards => 1,
    };
    let title = format!(
        "taskdeck - {} - type: {}{}",
        app.data_file().display(),
        app.type_filter,
        if app.search_query.is_empty() {
            String::new()
        } else {
            format!(" - search: {}", app.search_query)
        }
    );
    let tabs = Tabs::new(vec!["List [1]", "Cards [2]"])
        .select(selected)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(HIGHLIGHT_TEXT)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_border())
}

fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    let block = panel("Tasks");
    if app.list.is_empty() {
        let empty = Paragraph::new(Span::styled(list_view::EMPTY_MESSAGE, label_text())).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .list
        .rows()
        .iter()
        .map(|row| ListItem::new(row_line(row)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(selected_row());
    let mut state = ListState::default().with_selected(app.list.selection.get());
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_cards(app: &App, frame: &mut Frame, area: Rect) {
    let block = panel("Cards");
    if app.cards.document().is_empty() {
        let empty = Paragraph::new(Span::styled(card_tab::EMPTY_MESSAGE, label_text())).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app.cards.lines().into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(selected_row());
    let mut state = ListState::default().with_selected(app.cards.selection.get());
    frame.render_stateful_widget(list, area, &mut state);
}

fn help_text(app: &App) -> &'static str {
    match (&app.mode, app.tab) {
        (AppMode::Search, _) => "ESC: clear search | ENTER: keep search",
        (AppMode::ConfirmDelete(_), _) => "y: delete | n/ESC: cancel",
        (AppMode::LoadFile, _) => "ENTER: load | ESC: cancel",
        (AppMode::AddTask, _) => "Ctrl-S: add task | ESC: close form",
        (AppMode::Normal, Tab::List) => {
            "q: quit | n: new | space: toggle | d: delete | s: save | o: open | t: type | /: search | Tab: cards"
        }
        (AppMode::Normal, Tab::Cards) => {
            "q: quit | space: toggle | ENTER: expand | E/C: expand/collapse all | r: refresh | s: save | Tab: list"
        }
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let line = if app.mode == AppMode::Search {
        Line::from(vec![
            Span::styled(format!("/{}", app.input.as_str()), normal_text()),
            Span::styled(format!("   {}", help_text(app)), label_text()),
        ])
    } else if let Some(status) = &app.status {
        let style = if status.is_error {
            error_text()
        } else {
            success_text()
        };
        Line::from(Span::styled(status.text.clone(), style))
    } else {
        Line::from(Span::styled(help_text(app), label_text()))
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);

    if app.mode == AppMode::Search {
        frame.set_cursor_position((area.x + 2 + app.input.cursor_column() as u16, area.y + 1));
    }
}

fn render_form_popup(app: &App, frame: &mut Frame) {
    let inner = render_popup_with_block(frame, "New Task", 70, 70);
    let form = &app.form;

    let mut lines = Vec::new();
    let mut cursor = None;
    for (row, field) in FormField::all().iter().enumerate() {
        let focused = *field == form.field;
        let value = if focused {
            form.input.as_str().to_string()
        } else {
            form.field_value(*field)
        };
        let label = format!("{:>15}: ", field.label());
        if focused {
            cursor = Some((label.chars().count() + form.input.cursor_column(), row));
        }
        let label_style = if focused {
            highlight_text()
        } else {
            label_text()
        };
        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(value, normal_text()),
        ]));
    }

    lines.push(Line::from(""));
    if form.draft.checklist.is_empty() {
        lines.push(Line::styled("No checklist items", label_text()));
    } else {
        for item in &form.draft.checklist {
            lines.push(Line::from(vec![
                Span::styled("  [ ] ", label_text()),
                Span::styled(item.clone(), normal_text()),
            ]));
        }
    }

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::styled(error.clone(), error_text()));
    }
    lines.push(Line::styled(
        "Tab/Up/Down: move | ENTER: next or add item | Ctrl-N/P: type | Ctrl-D: drop item",
        label_text(),
    ));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    if let Some((x, y)) = cursor {
        frame.set_cursor_position((inner.x + x as u16, inner.y + y as u16));
    }
}
