pub mod ui;

use anyhow::Context;
use chrono::{DateTime, Local};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    io::{self, stdin},
    time::Duration,
};
use studypunch::{
    category::Category,
    config::{Config, ConfigStore, FileConfigStore},
    form::{AddTaskForm, FormError},
    logging,
    runtime::{ClockTask, CrosstermEventSource, FixedTicker, Runner, TrackerEvent},
    tracker::{TaskId, TrackerState},
};
use tracing::{debug, info};

// Fallback wake-up when neither keys nor the clock produce events
const IDLE_TIMEOUT_MS: u64 = 5000;

/// study check-in tracker for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal dashboard for daily study check-ins: tick off tasks, punch in once a day, and watch points, levels, streaks and per-category progress."
)]
pub struct Cli {
    /// default duration in minutes for new tasks (15-180, step 15)
    #[clap(short = 'd', long)]
    duration: Option<u32>,

    /// default category for new tasks
    #[clap(short = 'c', long, value_enum)]
    category: Option<Category>,

    /// use a 12-hour clock in the header
    #[clap(long)]
    twelve_hour: bool,

    /// print the starting dashboard as JSON and exit
    #[clap(long)]
    summary: bool,

    /// log filter written to the state directory log file (RUST_LOG wins)
    #[clap(long, default_value = logging::DEFAULT_LEVEL)]
    log_level: String,
}

impl Cli {
    /// Layer command line overrides on top of the loaded config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(duration) = self.duration {
            config.default_duration = duration;
        }
        if let Some(category) = self.category {
            config.default_category = category;
        }
        if self.twelve_hour {
            config.clock_24h = false;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// View state wrapped around the session's tracker. Everything except
/// `tracker` is transient UI state.
#[derive(Debug)]
pub struct App {
    pub tracker: TrackerState,
    pub config: Config,
    pub selected: usize,
    pub form: AddTaskForm,
    pub form_open: bool,
    pub form_error: Option<FormError>,
    pub now: DateTime<Local>,
}

impl App {
    pub fn new(tracker: TrackerState, config: Config) -> Self {
        let form = AddTaskForm::new(config.default_category, config.default_duration);
        Self {
            tracker,
            config,
            selected: 0,
            form,
            form_open: false,
            form_error: None,
            now: Local::now(),
        }
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.tracker.tasks().get(self.selected).map(|t| t.id)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tracker.tasks().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.tracker.toggle_task(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.tracker.delete_task(id);
            self.selected = self
                .selected
                .min(self.tracker.tasks().len().saturating_sub(1));
        }
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
        self.form_error = None;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
        self.form_error = None;
    }

    pub fn submit_form(&mut self) {
        match self.form.validate() {
            Ok((name, category, duration)) => {
                if self.tracker.add_task(&name, category, duration).is_some() {
                    self.selected = self.tracker.tasks().len() - 1;
                }
                self.form.reset();
                self.close_form();
            }
            Err(e) => {
                debug!(error = %e, "add-task form rejected");
                self.form_error = Some(e);
            }
        }
    }

    /// Advance the clock reading. Returns true when the displayed time changed.
    pub fn on_tick(&mut self, now: DateTime<Local>) -> bool {
        let before = self.clock_label();
        self.now = now;
        self.clock_label() != before
    }

    pub fn clock_label(&self) -> String {
        if self.config.clock_24h {
            self.now.format("%H:%M").to_string()
        } else {
            self.now.format("%I:%M %p").to_string()
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        if self.form_open {
            self.handle_form_key(key);
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('a') => self.open_form(),
            KeyCode::Char('p') => self.tracker.punch(),
            _ => {}
        }
        Control::Continue
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab => self.form.next_category(),
            KeyCode::BackTab => self.form.prev_category(),
            KeyCode::Left => self.form.decrease_duration(),
            KeyCode::Right => self.form.increase_duration(),
            KeyCode::Backspace => {
                self.form.pop_char();
                self.form_error = None;
            }
            KeyCode::Char(c) => {
                self.form.push_char(c);
                self.form_error = None;
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.summary {
        let snapshot = TrackerState::seeded().snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init_logging(&cli.log_level);
    let config = cli.apply(FileConfigStore::new().load());
    info!(?config, "starting studypunch");

    // Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut app = App::new(TrackerState::seeded(), config);
    let result = start_tui(&mut terminal, &mut app);

    restore_terminal()?;
    terminal.show_cursor()?;

    info!(
        total_points = app.tracker.total_points(),
        streak = app.tracker.streak(),
        "session ended"
    );
    result
}

fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let source = CrosstermEventSource::new();
    // the clock lives exactly as long as the dashboard is mounted
    let mut clock = ClockTask::start(
        app.config.clock_interval(),
        source.sender(),
    );
    let runner = Runner::new(source, FixedTicker::new(Duration::from_millis(IDLE_TIMEOUT_MS)));

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            TrackerEvent::Tick => {
                if app.on_tick(Local::now()) {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            TrackerEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            TrackerEvent::Key(key) => {
                if app.handle_key(key) == Control::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    clock.stop();
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
    if app.form_open {
        ui::add_task::render_add_task(app, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn seeded_app() -> App {
        App::new(TrackerState::seeded(), Config::default())
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["studypunch"]);

        assert_eq!(cli.duration, None);
        assert_eq!(cli.category, None);
        assert!(!cli.twelve_hour);
        assert!(!cli.summary);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["studypunch", "-d", "90", "--category", "language"]);
        assert_eq!(cli.duration, Some(90));
        assert_eq!(cli.category, Some(Category::Language));

        let cli = Cli::parse_from(["studypunch", "--summary", "--twelve-hour"]);
        assert!(cli.summary);
        assert!(cli.twelve_hour);
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["studypunch", "-c", "knitting"]).is_err());
    }

    #[test]
    fn test_cli_apply_layers_on_config() {
        let cli = Cli::parse_from(["studypunch", "-c", "exercise", "--twelve-hour"]);
        let base = Config {
            default_duration: 60,
            ..Config::default()
        };

        let config = cli.apply(base);

        assert_eq!(config.default_duration, 60);
        assert_eq!(config.default_category, Category::Exercise);
        assert!(!config.clock_24h);
    }

    #[test]
    fn test_app_new_uses_config_defaults() {
        let config = Config {
            default_duration: 90,
            default_category: Category::Coding,
            ..Config::default()
        };

        let app = App::new(TrackerState::seeded(), config);

        assert_eq!(app.form.duration, 90);
        assert_eq!(app.form.category, Category::Coding);
        assert!(!app.form_open);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut app = seeded_app();

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, 0);

        for _ in 0..10 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.selected, 4);

        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn test_space_toggles_selected() {
        let mut app = seeded_app();

        app.handle_key(key(KeyCode::Char(' ')));

        assert!(app.tracker.task(1).unwrap().completed);
        assert_eq!(app.tracker.total_points(), 2510);

        app.handle_key(key(KeyCode::Enter));
        assert!(!app.tracker.task(1).unwrap().completed);
        assert_eq!(app.tracker.total_points(), 2480);
    }

    #[test]
    fn test_delete_selected_keeps_selection_in_range() {
        let mut app = seeded_app();
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Down));
        }

        app.handle_key(key(KeyCode::Char('d')));

        assert_eq!(app.tracker.tasks().len(), 4);
        assert_eq!(app.selected, 3);
        assert_eq!(app.tracker.total_points(), 2480);
    }

    #[test]
    fn test_delete_on_empty_list_is_noop() {
        let mut app = App::new(TrackerState::new(vec![], 0, 0), Config::default());

        app.handle_key(key(KeyCode::Delete));
        app.handle_key(key(KeyCode::Char(' ')));

        assert!(app.tracker.tasks().is_empty());
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_punch_key() {
        let mut app = seeded_app();

        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('p')));

        assert!(app.tracker.today_punched());
        assert_eq!(app.tracker.streak(), 16);
        assert_eq!(app.tracker.total_points(), 2530);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = seeded_app();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Control::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Control::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Control::Quit
        );
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = seeded_app();

        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.form_open);

        type_str(&mut app, "Read");
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.form_open);
        assert_eq!(app.tracker.tasks().len(), 6);
        let task = app.tracker.tasks().last().unwrap();
        assert_eq!(task.name, "Read");
        assert_eq!(task.category, Category::Reading);
        assert_eq!(task.duration, 60);
        assert_eq!(task.points, 40);
        assert_eq!(app.selected, 5);

        // form is reset for next time
        assert!(app.form.name.is_empty());
        assert_eq!(app.form.duration, 30);
    }

    #[test]
    fn test_form_keys_do_not_reach_dashboard() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::Char('a')));

        // 'q', 'p' and ' ' are text while the form is open
        type_str(&mut app, "q p");

        assert_eq!(app.form.name, "q p");
        assert!(!app.tracker.today_punched());
        assert!(!app.tracker.task(1).unwrap().completed);
    }

    #[test]
    fn test_empty_form_submit_keeps_form_open() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "   ");

        app.handle_key(key(KeyCode::Enter));

        assert!(app.form_open);
        assert_eq!(app.form_error, Some(FormError::EmptyName));
        assert_eq!(app.tracker.tasks().len(), 5);

        // typing clears the message
        type_str(&mut app, "x");
        assert_eq!(app.form_error, None);
    }

    #[test]
    fn test_cancel_form_leaves_tracker_untouched() {
        let mut app = seeded_app();
        let before = app.tracker.clone();

        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "draft");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Esc));

        assert!(!app.form_open);
        assert_eq!(app.tracker, before);
        // a cancelled draft survives for the next open
        assert_eq!(app.form.name, "draft");
        assert_eq!(app.form.category, Category::Coding);
    }

    #[test]
    fn test_form_category_cycling_keys() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::Char('a')));

        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.form.category, Category::Other);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.form.category, Category::Coding);
    }

    #[test]
    fn test_form_backspace() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "abc");

        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.form.name, "ab");
    }

    #[test]
    fn test_clock_label_formats() {
        let mut app = seeded_app();
        let t = Local.with_ymd_and_hms(2024, 12, 14, 15, 7, 0).unwrap();

        app.on_tick(t);
        assert_eq!(app.clock_label(), "15:07");

        app.config.clock_24h = false;
        assert_eq!(app.clock_label(), "03:07 PM");
    }

    #[test]
    fn test_on_tick_reports_visible_change() {
        let mut app = seeded_app();
        let t0 = Local.with_ymd_and_hms(2024, 12, 14, 9, 0, 0).unwrap();
        app.on_tick(t0);

        assert!(!app.on_tick(t0 + chrono::Duration::seconds(20)));
        assert!(app.on_tick(t0 + chrono::Duration::seconds(61)));
    }

    #[test]
    fn test_ticks_never_touch_tracker() {
        let mut app = seeded_app();
        let before = app.tracker.clone();

        app.on_tick(Local::now());

        assert_eq!(app.tracker, before);
    }

    #[test]
    fn test_ui_function_dashboard() {
        let app = seeded_app();
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| ui(&app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("2480"));
    }

    #[test]
    fn test_ui_function_with_form_open() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "Flashcards");

        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| ui(&app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Flashcards"));
    }

    #[test]
    fn test_ui_function_tiny_terminal() {
        let mut app = seeded_app();
        app.open_form();
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| ui(&app, f)).unwrap();
    }

    #[test]
    fn test_integration_full_session() {
        let mut app = seeded_app();

        // finish the two open seed tasks
        app.handle_key(key(KeyCode::Char(' ')));
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.tracker.total_points(), 2480 + 30 + 40);

        // add and complete a new one
        app.handle_key(key(KeyCode::Char('a')));
        type_str(&mut app, "Anki review");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char(' ')));

        app.handle_key(key(KeyCode::Char('p')));

        assert_eq!(app.tracker.completed_count(), 6);
        assert_eq!(app.tracker.progress_percent(), 100.0);
        assert_eq!(app.tracker.total_points(), 2480 + 30 + 40 + 25 + 50);
        assert_eq!(app.tracker.level(), 6);
        assert_eq!(app.tracker.streak(), 16);
    }
}
