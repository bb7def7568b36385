use crate::card_tab::CardTab;
use crate::dialog::{handle_dialog_input, DialogAction};
use crate::events::{should_quit, Event, EventHandler};
use crate::form::{FormAction, TaskForm};
use crate::list_view::ListView;
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use taskdeck_cards::{
    bridge_channel, BridgeEffect, BridgeReceiver, CardBridgeHandler, CardView, HtmlFileSurface,
    InboundMessage,
};
use taskdeck_core::{AppConfig, InputState};
use taskdeck_domain::commands::{AddTask, Command, CommandOutcome, RemoveTask};
use taskdeck_domain::{TaskId, TaskRef, TaskStore, ALL_TYPES};
use taskdeck_persistence::{JsonFileStore, LoadOutcome, PersistenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    List,
    Cards,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Search,
    AddTask,
    ConfirmDelete(TaskId),
    LoadFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub tab: Tab,
    pub store: TaskStore,
    pub config: AppConfig,
    pub list: ListView,
    pub cards: CardTab,
    pub form: TaskForm,
    pub input: InputState,
    pub type_filter: String,
    pub search_query: String,
    pub status: Option<StatusMessage>,
    persistence: JsonFileStore,
    bridge: CardBridgeHandler,
    bridge_rx: Option<BridgeReceiver>,
    card_mirror: Option<CardView<HtmlFileSurface>>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (bridge_tx, bridge_rx) = bridge_channel();
        let persistence = JsonFileStore::new(&config.data_file).with_backup(config.backup);
        let card_mirror = config
            .card_html
            .as_ref()
            .map(|path| CardView::new(HtmlFileSurface::new(path)));
        let form = TaskForm::new(config.categories.clone(), config.effective_default_weight());

        let mut app = Self {
            should_quit: false,
            mode: AppMode::Normal,
            tab: Tab::List,
            store: TaskStore::new(),
            config,
            list: ListView::new(),
            cards: CardTab::new(bridge_tx),
            form,
            input: InputState::new(),
            type_filter: ALL_TYPES.to_string(),
            search_query: String::new(),
            status: None,
            persistence,
            bridge: CardBridgeHandler::new(),
            bridge_rx: Some(bridge_rx),
            card_mirror,
        };
        app.refresh_views();
        app
    }

    pub fn data_file(&self) -> &std::path::Path {
        self.persistence.path()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Startup load. Failures are logged only.
    pub fn auto_load(&mut self) {
        match self.persistence.load() {
            LoadOutcome::Loaded(tasks) => {
                tracing::info!(
                    "Loaded {} task(s) from {}",
                    tasks.len(),
                    self.persistence.path().display()
                );
                self.store.replace_all(tasks);
                self.refresh_views();
            }
            LoadOutcome::NotFound => {
                tracing::info!("No task file at {}", self.persistence.path().display());
            }
            LoadOutcome::Invalid(reason) => {
                tracing::warn!(
                    "Could not load {}: {}",
                    self.persistence.path().display(),
                    reason
                );
            }
        }
    }

    /// Replaces the store with the file's tasks. On failure the store is
    /// left alone and the reason is shown.
    pub fn load_file(&mut self, path: PathBuf) {
        let candidate = JsonFileStore::new(&path).with_backup(self.config.backup);
        match candidate.load() {
            LoadOutcome::Loaded(tasks) => {
                let count = tasks.len();
                self.store.replace_all(tasks);
                self.persistence = candidate;
                self.refresh_views();
                self.set_status(format!("Loaded {} task(s) from {}", count, path.display()));
            }
            LoadOutcome::NotFound => {
                self.set_error(format!("File not found: {}", path.display()));
            }
            LoadOutcome::Invalid(reason) => {
                self.set_error(format!("Could not load {}: {}", path.display(), reason));
            }
        }
    }

    pub fn save(&mut self) {
        if self.store.is_empty() {
            self.set_error("No tasks to save".to_string());
            return;
        }
        match self.persistence.save(self.store.tasks()) {
            Ok(report) => {
                let mut text = format!(
                    "Saved {} task(s) to {}",
                    self.store.len(),
                    report.path.display()
                );
                if let Some(backup) = report.backup {
                    text.push_str(&format!(" (backup: {})", backup.display()));
                }
                self.set_status(text);
            }
            Err(e) => {
                tracing::error!("Save failed: {}", e);
                self.set_error(format!("Save failed: {}", e));
            }
        }
    }

    /// Runs a command against the store and re-derives every view from it.
    pub fn execute(&mut self, command: &dyn Command) -> bool {
        match command.execute(&mut self.store) {
            Ok(CommandOutcome::Applied) => {
                tracing::debug!("{}", command.description());
                self.refresh_views();
                true
            }
            Ok(CommandOutcome::Ignored) => {
                tracing::debug!("No-op: {}", command.description());
                false
            }
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        }
    }

    pub fn handle_bridge_message(&mut self, message: &InboundMessage) {
        match self.bridge.handle(&mut self.store, message) {
            Ok(BridgeEffect::Applied) => self.refresh_views(),
            // The page may show a stale toggle; put it back in step.
            Ok(BridgeEffect::Ignored) => self.cards.sync(self.store.document()),
            Err(e) => tracing::warn!("Card view message failed: {}", e),
        }
    }

    /// Applies every queued card view message.
    pub fn drain_bridge(&mut self) {
        let messages = match self.bridge_rx.as_mut() {
            Some(rx) => rx.drain(),
            None => return,
        };
        for message in messages {
            self.handle_bridge_message(&message);
        }
    }

    pub fn refresh_views(&mut self) {
        let visible = self.store.filtered(&self.type_filter, &self.search_query);
        self.list.rebuild(&visible);

        let doc = self.store.document();
        if let Some(mirror) = self.card_mirror.as_mut() {
            if let Err(e) = mirror.sync(doc.clone()) {
                tracing::warn!("Could not update card view file: {}", e);
            }
        }
        self.cards.sync(doc);
    }

    /// Full redraw of the card view.
    pub fn refresh_cards(&mut self) {
        let doc = self.store.document();
        if let Some(mirror) = self.card_mirror.as_mut() {
            if let Err(e) = mirror.refresh(doc.clone()) {
                tracing::warn!("Could not rewrite card view file: {}", e);
            }
        }
        self.cards.sync(doc);
        self.set_status("Card view refreshed".to_string());
    }

    /// `all`, then configured categories, then any other category in use.
    pub fn filter_options(&self) -> Vec<String> {
        let mut options = vec![ALL_TYPES.to_string()];
        options.extend(self.config.categories.iter().cloned());
        for category in self.store.categories() {
            if !options.iter().any(|o| o == category) {
                options.push(category.to_string());
            }
        }
        options
    }

    fn cycle_filter(&mut self) {
        let options = self.filter_options();
        let next = options
            .iter()
            .position(|o| *o == self.type_filter)
            .map_or(0, |idx| (idx + 1) % options.len());
        self.type_filter = options[next].clone();
        self.refresh_views();
    }

    fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            is_error: false,
        });
    }

    fn set_error(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            is_error: true,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode.clone() {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::AddTask => self.handle_form_key(key),
            AppMode::ConfirmDelete(id) => self.handle_confirm_delete_key(key, id),
            AppMode::LoadFile => self.handle_load_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if should_quit(&key) {
            self.quit();
            return;
        }
        self.status = None;

        match key.code {
            KeyCode::Char('1') => self.tab = Tab::List,
            KeyCode::Char('2') => self.tab = Tab::Cards,
            KeyCode::Tab => {
                self.tab = match self.tab {
                    Tab::List => Tab::Cards,
                    Tab::Cards => Tab::List,
                }
            }
            KeyCode::Char('j') | KeyCode::Down => match self.tab {
                Tab::List => self.list.next(),
                Tab::Cards => self.cards.next(),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.tab {
                Tab::List => self.list.prev(),
                Tab::Cards => self.cards.prev(),
            },
            KeyCode::Char(' ') => match self.tab {
                Tab::List => {
                    if let Some(command) = self.list.toggle_command() {
                        self.execute(command.as_ref());
                    }
                }
                Tab::Cards => self.cards.toggle_selected(),
            },
            KeyCode::Enter if self.tab == Tab::Cards => self.cards.toggle_expand(),
            KeyCode::Char('d') if self.tab == Tab::List => {
                if let Some(id) = self.list.delete_target() {
                    self.mode = AppMode::ConfirmDelete(id);
                }
            }
            KeyCode::Char('E') => self.cards.expand_all(),
            KeyCode::Char('C') => self.cards.collapse_all(),
            KeyCode::Char('r') => self.refresh_cards(),
            KeyCode::Char('n') => self.mode = AppMode::AddTask,
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('o') => {
                self.input = InputState::with_text(self.data_file().display().to_string());
                self.mode = AppMode::LoadFile;
            }
            KeyCode::Char('t') => self.cycle_filter(),
            KeyCode::Char('/') => {
                self.input = InputState::with_text(self.search_query.clone());
                self.mode = AppMode::Search;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match handle_dialog_input(&mut self.input, key.code, true) {
            DialogAction::Confirm => self.mode = AppMode::Normal,
            DialogAction::Cancel => {
                self.input.clear();
                self.mode = AppMode::Normal;
            }
            DialogAction::None => {}
        }
        let query = self.input.trimmed().to_string();
        if query != self.search_query {
            self.search_query = query;
            self.refresh_views();
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match self.form.handle_key(key) {
            FormAction::Cancel => self.mode = AppMode::Normal,
            FormAction::Submit => {
                if let Ok(task) = self.form.build() {
                    let description = format!("Added {} - {}", task.main_task, task.sub_task);
                    if self.execute(&AddTask { task }) {
                        self.form.advance();
                        self.set_status(description);
                    }
                }
            }
            FormAction::None => {}
        }

        let main_task = self.form.draft.main_task.trim();
        if !main_task.is_empty() && !self.form.branch_edited() {
            let suggested = self.store.next_branch_number(main_task);
            self.form.suggest_branch(suggested);
        }
    }

    fn handle_confirm_delete_key(&mut self, key: KeyEvent, id: TaskId) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let target = TaskRef::Id(id);
                if let Some(task) = self.store.get(&target) {
                    let label = format!("Deleted {} - {}", task.main_task, task.sub_task);
                    if self.execute(&RemoveTask { target }) {
                        self.set_status(label);
                    }
                }
                self.mode = AppMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_load_key(&mut self, key: KeyEvent) {
        match handle_dialog_input(&mut self.input, key.code, false) {
            DialogAction::Confirm => {
                let path = PathBuf::from(self.input.trimmed());
                self.mode = AppMode::Normal;
                self.load_file(path);
            }
            DialogAction::Cancel => self.mode = AppMode::Normal,
            DialogAction::None => {}
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let Some(mut bridge_rx) = self.bridge_rx.take() else {
            anyhow::bail!("card view bridge is already in use");
        };
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();

        let result = self.event_loop(&mut terminal, &mut events, &mut bridge_rx).await;

        events.stop();
        restore_terminal(&mut terminal)?;
        self.bridge_rx = Some(bridge_rx);
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut EventHandler,
        bridge_rx: &mut BridgeReceiver,
    ) -> anyhow::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Event::Key(key)) => self.handle_key(key),
                    Some(Event::Resize) | Some(Event::Tick) => {}
                    None => break,
                },
                Some(message) = bridge_rx.recv() => self.handle_bridge_message(&message),
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
