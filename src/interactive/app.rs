//! TUI application state and logic

use super::rendering::{clue_tile_at, spinner_frame};
use crate::core::Word;
use crate::gateway::{GatewayError, SolverGateway};
use crate::session::{
    PendingRequest, Phase, RequestTicket, Resolution, SessionController, SubmitOutcome,
    Toggleable,
};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Gateway shared with worker threads
pub type SharedGateway = Arc<dyn SolverGateway + Send + Sync>;

type Reply = (RequestTicket, Result<Word, GatewayError>);

/// How long the event loop waits for input before checking for replies
const POLL_INTERVAL: Duration = Duration::from_millis(80);

/// Application state
pub struct App {
    pub controller: SessionController,
    pub cursor: usize,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    gateway: SharedGateway,
    replies: Receiver<Reply>,
    reply_tx: Sender<Reply>,
    tick: usize,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Statistics {
    pub sessions: usize,
    pub solved: usize,
}

impl App {
    /// Start a session and request its first suggestion in the background
    #[must_use]
    pub fn new(gateway: SharedGateway) -> Self {
        let (controller, request) = SessionController::new();
        let (reply_tx, replies) = mpsc::channel();

        let app = Self {
            controller,
            cursor: 0,
            messages: vec![Message {
                text: "Welcome! Click each letter to select clue colours.".to_string(),
                style: MessageStyle::Info,
            }],
            stats: Statistics {
                sessions: 1,
                solved: 0,
            },
            should_quit: false,
            gateway,
            replies,
            reply_tx,
            tick: 0,
        };
        app.dispatch(request);
        app
    }

    /// Run a solver request on a worker thread
    ///
    /// The reply comes back through the session's channel and is applied by
    /// `poll_replies`.
    fn dispatch(&self, request: PendingRequest) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.reply_tx.clone();

        thread::spawn(move || {
            let result = request.send(gateway.as_ref());
            if tx.send((request.ticket(), result)).is_err() {
                tracing::debug!("session closed before the solver replied");
            }
        });
    }

    /// Apply any solver replies that have arrived
    pub fn poll_replies(&mut self) {
        while let Ok((ticket, result)) = self.replies.try_recv() {
            match self.controller.resolve(ticket, result) {
                Ok(Resolution::Suggested(word)) => {
                    self.cursor = 0;
                    self.add_message(
                        &format!("Wordle Bot suggests {}", word.text().to_uppercase()),
                        MessageStyle::Info,
                    );
                }
                // The error text lives on the session state
                Ok(Resolution::Failed(_) | Resolution::Stale) => {}
                Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
            }
        }
    }

    /// Toggle a clue tile through the `Toggleable` capability
    pub fn toggle(&mut self, position: usize) {
        let target: &mut dyn Toggleable = &mut self.controller;
        match target.toggle_at(position) {
            Ok(()) => self.cursor = position,
            // Outside Ready the tiles are inert
            Err(e) if self.controller.phase() == Phase::Ready => {
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
            Err(_) => {}
        }
    }

    pub fn submit(&mut self) {
        // The submit affordance is disabled while a request is outstanding
        if self.controller.is_busy() {
            return;
        }

        match self.controller.submit() {
            Ok(SubmitOutcome::Won) => {
                self.stats.solved += 1;
                let turns = self.controller.state().history().len();
                let celebration = match turns {
                    1 => "🎯 HOLE IN ONE! You've won the game! 🌟",
                    2 => "🔥 MAGNIFICENT! You've won the game in two! 🔥",
                    3 => "✨ SPLENDID! You've won the game in three! ✨",
                    _ => "🎉 You've won the game! 🎉",
                };
                self.add_message(celebration, MessageStyle::Success);
                self.add_message("Press 'n' for a new session or 'q' to quit.", MessageStyle::Info);
            }
            Ok(SubmitOutcome::Request(request)) => self.dispatch(request),
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    pub fn retry(&mut self) {
        match self.controller.retry_initialization() {
            Ok(request) => {
                self.add_message("Retrying...", MessageStyle::Info);
                self.dispatch(request);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Throw the current session away and start another
    ///
    /// Replies still in flight for the old session are dropped with its
    /// channel.
    pub fn new_session(&mut self) {
        let (controller, request) = SessionController::new();
        let (reply_tx, replies) = mpsc::channel();

        self.controller = controller;
        self.replies = replies;
        self.reply_tx = reply_tx;
        self.cursor = 0;
        self.stats.sessions += 1;
        self.messages.clear();
        self.add_message("New session started!", MessageStyle::Info);
        self.dispatch(request);
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.controller.state().pending_clue().len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('n') => self.new_session(),
            KeyCode::Char('r') => self.retry(),
            KeyCode::Char(c @ '1'..='9') => {
                let position = (c as usize) - ('1' as usize);
                self.toggle(position);
            }
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Down => self.toggle(self.cursor),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(false),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(true),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    /// Toggle the tile under a left click, if any
    pub fn handle_click(&mut self, frame: Rect, column: u16, row: u16) {
        let len = self.controller.state().pending_clue().len();
        if let Some(position) = clue_tile_at(frame, len, column, row) {
            self.toggle(position);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    #[must_use]
    pub fn spinner(&self) -> &'static str {
        spinner_frame(self.tick)
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "TUI exited with error");
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.poll_replies();
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let frame = Rect::new(0, 0, size.width, size.height);
                    app.handle_click(frame, mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        app.advance_tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoryEntry;
    use crate::interactive::rendering::{layout, tile_areas};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Suggests words by turn number; an empty slot is a failure
    struct TurnGateway {
        words: Vec<Option<&'static str>>,
        calls: Mutex<Vec<usize>>,
    }

    impl TurnGateway {
        fn shared(words: &[Option<&'static str>]) -> Arc<Self> {
            Arc::new(Self {
                words: words.to_vec(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<usize> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SolverGateway for TurnGateway {
        fn suggest(&self, history: &[HistoryEntry]) -> Result<Word, GatewayError> {
            self.calls.lock().unwrap().push(history.len());
            match self.words.get(history.len()).copied().flatten() {
                Some(word) => Ok(Word::new(word).unwrap()),
                None => Err(GatewayError::Transport("solver unavailable".to_string())),
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Poll replies until `done` holds or two seconds pass
    fn wait_until(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !done(app) && Instant::now() < deadline {
            app.poll_replies();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(done(app), "timed out waiting for solver reply");
    }

    fn ready(app: &App) -> bool {
        app.controller.phase() == Phase::Ready
    }

    #[test]
    fn first_word_arrives_in_background() {
        let gateway = TurnGateway::shared(&[Some("crane")]);
        let mut app = App::new(gateway.clone());
        wait_until(&mut app, ready);

        let state = app.controller.state();
        assert_eq!(state.current_word().unwrap().text(), "crane");
        assert_eq!(state.pending_clue().to_string(), "xxxxx");
        assert_eq!(gateway.calls(), vec![0]);
    }

    #[test]
    fn keys_toggle_and_submit() {
        let gateway = TurnGateway::shared(&[Some("crane"), Some("spout")]);
        let mut app = App::new(gateway.clone());
        wait_until(&mut app, ready);

        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.controller.state().pending_clue().to_string(), "gyxxx");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.controller.phase(), Phase::Submitting);

        // Ignored while the request is outstanding
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('3')));

        wait_until(&mut app, |app| {
            app.controller.state().current_word().map(Word::text) == Some("spout")
        });
        assert_eq!(gateway.calls(), vec![0, 1]);
        assert_eq!(app.controller.state().history().len(), 1);
        assert_eq!(app.controller.state().pending_clue().to_string(), "xxxxx");
    }

    #[test]
    fn click_toggles_tile() {
        let gateway = TurnGateway::shared(&[Some("crane")]);
        let mut app = App::new(gateway);
        wait_until(&mut app, ready);

        let frame = Rect::new(0, 0, 100, 30);
        let tiles = tile_areas(layout(frame).input, 5);
        let third = tiles[2];
        app.handle_click(frame, third.x + 1, third.y + 1);

        assert_eq!(app.controller.state().pending_clue().to_string(), "xxyxx");
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn win_sends_no_request() {
        let gateway = TurnGateway::shared(&[Some("crane")]);
        let mut app = App::new(gateway.clone());
        wait_until(&mut app, ready);

        for position in 0..5 {
            app.toggle(position);
            app.toggle(position);
        }
        app.submit();

        assert_eq!(app.controller.phase(), Phase::Won);
        assert_eq!(app.stats.solved, 1);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(gateway.calls(), vec![0]);
    }

    #[test]
    fn failed_start_can_be_retried() {
        let gateway = TurnGateway::shared(&[None]);
        let mut app = App::new(gateway.clone());
        wait_until(&mut app, |app| app.controller.phase() == Phase::Errored);
        assert!(
            app.controller
                .state()
                .error_message()
                .unwrap()
                .starts_with("Failed to fetch initial word.")
        );

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.controller.phase(), Phase::Initializing);
        wait_until(&mut app, |app| app.controller.phase() == Phase::Errored);
        assert_eq!(gateway.calls(), vec![0, 0]);
    }

    #[test]
    fn failed_turn_keeps_clue() {
        let gateway = TurnGateway::shared(&[Some("crane"), None]);
        let mut app = App::new(gateway);
        wait_until(&mut app, ready);

        app.toggle(4);
        app.submit();
        wait_until(&mut app, |app| app.controller.state().error_message().is_some());

        let state = app.controller.state();
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.history().is_empty());
        assert_eq!(state.pending_clue().to_string(), "xxxxy");
    }

    #[test]
    fn new_session_resets_state() {
        let gateway = TurnGateway::shared(&[Some("crane")]);
        let mut app = App::new(gateway);
        wait_until(&mut app, ready);
        app.toggle(1);

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.stats.sessions, 2);
        assert_eq!(app.controller.phase(), Phase::Initializing);
        wait_until(&mut app, ready);
        assert_eq!(app.controller.state().pending_clue().to_string(), "xxxxx");
    }

    #[test]
    fn cursor_wraps() {
        let gateway = TurnGateway::shared(&[Some("crane")]);
        let mut app = App::new(gateway);
        wait_until(&mut app, ready);

        app.move_cursor(false);
        assert_eq!(app.cursor, 4);
        app.move_cursor(true);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn renders_header_and_suggestion() {
        use ratatui::backend::TestBackend;

        let gateway = TurnGateway::shared(&[Some("crane")]);
        let mut app = App::new(gateway);
        wait_until(&mut app, ready);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| crate::interactive::rendering::ui(f, &app))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(screen.contains("WORDLE BOT"));
        assert!(screen.contains("recommends your next guess"));
        assert!(screen.contains(" C "));
    }
}
