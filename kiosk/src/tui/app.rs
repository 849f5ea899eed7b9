//! Application state and event management for the review kiosk TUI.
//!
//! This module contains the front-end state, event types and the main loop
//! that drive the terminal interface. The main types are:
//!
//! - [`App`]: Front-end state wrapping the [`ReviewWidget`] with focus, theme and quit state
//! - [`FormFocus`]: Which form control receives keyboard input
//! - [`TuiEvent`]: Events that drive the TUI event loop
//! - [`EventHandler`]: Tick timer plus a blocking reader forwarding terminal input
//! - [`Theme`] / [`Symbols`]: Styling and glyph sets
//!
//! # Architecture
//!
//! The TUI uses an event-driven architecture where all state changes are triggered
//! by [`TuiEvent`] variants or by [`TimerFired`] completions from the review
//! component. [`App::run`] multiplexes both channels:
//!
//! 1. Terminal input (keyboard, mouse, resize) and periodic ticks from the [`EventHandler`]
//! 2. Splash and submission timer completions from the [`ReviewWidget`]
//!
//! Every processed event is followed by a render cycle.
//!
//! # Example
//!
//! ```ignore
//! use tokio::sync::mpsc;
//! use review_kiosk::form::ReviewWidget;
//! use review_kiosk::tui::{App, Tui};
//!
//! let (timer_tx, timer_rx) = mpsc::channel(16);
//! let widget = ReviewWidget::new(config.widget_config(), timer_tx);
//! let app = App::new(widget, config.brand.clone());
//!
//! let mut tui = Tui::new()?;
//! app.run(&mut tui, timer_rx).await?;
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::TuiError;
use crate::form::{ReviewWidget, TimerFired};
use crate::review::Aspect;
use crate::tui::terminal::Tui;
use crate::tui::{input, ui};

// =============================================================================
// Focus
// =============================================================================

/// Form control that can receive focus.
///
/// # Field Order
///
/// The natural tab order is:
/// 1. [`FormFocus::Name`] - Name text input
/// 2. [`FormFocus::Rating`] for each [`Aspect`] in display order
/// 3. [`FormFocus::Submit`] - Submit button
///
/// # Example
///
/// ```
/// use review_kiosk::review::Aspect;
/// use review_kiosk::tui::app::FormFocus;
///
/// let focus = FormFocus::default();
/// assert_eq!(focus, FormFocus::Name);
/// assert_eq!(focus.next(), FormFocus::Rating(Aspect::Quality));
/// assert_eq!(focus.prev(), FormFocus::Submit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    /// Name text input.
    #[default]
    Name,
    /// Star rating row for one aspect.
    Rating(Aspect),
    /// Submit button.
    Submit,
}

impl FormFocus {
    /// All focusable controls in tab order.
    pub const ORDER: [FormFocus; 5] = [
        FormFocus::Name,
        FormFocus::Rating(Aspect::Quality),
        FormFocus::Rating(Aspect::Punctuality),
        FormFocus::Rating(Aspect::Service),
        FormFocus::Submit,
    ];

    fn position(self) -> usize {
        match self {
            FormFocus::Name => 0,
            FormFocus::Rating(aspect) => 1 + aspect.index(),
            FormFocus::Submit => Self::ORDER.len() - 1,
        }
    }

    /// The next control in tab order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// The previous control in tab order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// The aspect of a focused rating row.
    #[must_use]
    pub fn aspect(self) -> Option<Aspect> {
        match self {
            FormFocus::Rating(aspect) => Some(aspect),
            _ => None,
        }
    }
}

// =============================================================================
// Theme and Symbols
// =============================================================================

/// Color theme for the TUI.
///
/// Provides consistent styling across all widgets. Two variants exist:
/// [`Theme::default()`] with colors and [`Theme::monochrome()`] for terminals
/// where `NO_COLOR` is set.
///
/// # Example
///
/// ```
/// use review_kiosk::tui::app::Theme;
///
/// let theme = Theme::default();
/// let mono_theme = Theme::monochrome();
/// let env_theme = Theme::from_env();
/// ```
#[derive(Debug, Clone)]
pub struct Theme {
    // Ratings
    /// Style for filled stars (default: yellow bold).
    pub star_filled: Style,
    /// Style for empty stars (default: dark gray).
    pub star_empty: Style,

    // Form
    /// Style for focused input fields (default: cyan bold).
    pub input_focused: Style,
    /// Style for unfocused input fields (default: gray).
    pub input_unfocused: Style,
    /// Style for input error states (default: red).
    pub input_error: Style,
    /// Style for form labels (default: white).
    pub label: Style,

    // Feedback
    /// Style for the success mark (default: green bold).
    pub success: Style,
    /// Style for the review link (default: blue underlined).
    pub link: Style,

    // Layout
    /// Style for unfocused borders (default: dark gray).
    pub border: Style,
    /// Style for focused borders (default: cyan).
    pub border_focused: Style,
    /// Style for titles (default: white bold).
    pub title: Style,
    /// Style for primary text (default: reset/terminal default).
    pub text_primary: Style,
    /// Style for secondary text (default: gray).
    pub text_secondary: Style,
    /// Style for muted/deemphasized text (default: dark gray).
    pub text_muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            star_filled: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            star_empty: Style::default().fg(Color::DarkGray),

            input_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            input_unfocused: Style::default().fg(Color::Gray),
            input_error: Style::default().fg(Color::Red),
            label: Style::default().fg(Color::White),

            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Creates a monochrome theme for `NO_COLOR` support.
    ///
    /// This theme uses only modifiers (bold, dim, underlined) without any
    /// color codes, per the [NO_COLOR standard](https://no-color.org/).
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            star_filled: Style::default().add_modifier(Modifier::BOLD),
            star_empty: Style::default().add_modifier(Modifier::DIM),

            input_focused: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            input_unfocused: Style::default().add_modifier(Modifier::DIM),
            input_error: Style::default().add_modifier(Modifier::BOLD),
            label: Style::default(),

            success: Style::default().add_modifier(Modifier::BOLD),
            link: Style::default().add_modifier(Modifier::UNDERLINED),

            border: Style::default(),
            border_focused: Style::default().add_modifier(Modifier::BOLD),
            title: Style::default().add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            text_muted: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Returns [`Theme::monochrome()`] if `NO_COLOR` is set, the default otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}

/// Symbol set for the TUI (unicode or ASCII).
///
/// # Example
///
/// ```
/// use review_kiosk::tui::app::{Symbols, UNICODE_SYMBOLS, ASCII_SYMBOLS};
///
/// assert_eq!(UNICODE_SYMBOLS.star_filled, "★");
/// assert_eq!(ASCII_SYMBOLS.star_filled, "*");
///
/// let symbols = Symbols::detect();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    /// Filled rating star.
    pub star_filled: &'static str,
    /// Empty rating star.
    pub star_empty: &'static str,
    /// Symbol for success/completion.
    pub success: &'static str,
    /// Symbol for failure/error.
    pub failure: &'static str,
    /// Arrow symbol for navigation/direction.
    pub arrow: &'static str,
    /// Spinner frames shown while submitting.
    pub spinner: &'static [&'static str],
}

/// Unicode symbol set for modern terminals.
///
/// | Symbol | Character |
/// |--------|-----------|
/// | `star_filled` | ★ |
/// | `star_empty` | ☆ |
/// | `success` | ✓ |
/// | `failure` | ✗ |
/// | `arrow` | → |
pub const UNICODE_SYMBOLS: Symbols = Symbols {
    star_filled: "★",
    star_empty: "☆",
    success: "✓",
    failure: "✗",
    arrow: "→",
    spinner: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
};

/// ASCII symbol set for maximum compatibility.
pub const ASCII_SYMBOLS: Symbols = Symbols {
    star_filled: "*",
    star_empty: ".",
    success: "[+]",
    failure: "[x]",
    arrow: "->",
    spinner: &["|", "/", "-", "\\"],
};

impl Symbols {
    /// Detects the symbol set for the current terminal.
    ///
    /// Returns [`ASCII_SYMBOLS`] when `TERM` contains `linux` or `vt100`,
    /// [`UNICODE_SYMBOLS`] otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var("TERM")
            .map(|t| t.contains("linux") || t.contains("vt100"))
            .unwrap_or(false)
        {
            ASCII_SYMBOLS
        } else {
            UNICODE_SYMBOLS
        }
    }

    /// Spinner frame for the given tick count.
    #[must_use]
    pub fn spinner_frame(&self, tick: u64) -> &'static str {
        self.spinner[(tick % self.spinner.len() as u64) as usize]
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::detect()
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Front-end state for the review kiosk TUI.
///
/// Wraps the [`ReviewWidget`] with presentation concerns the component does
/// not own: keyboard focus, styling, the last known terminal area (used for
/// mouse hit-testing) and the quit flag.
#[derive(Debug)]
pub struct App {
    /// The review component.
    pub widget: ReviewWidget,

    /// Focused form control.
    pub focus: FormFocus,

    /// Brand name shown on the splash screen.
    pub brand: String,

    /// Theme configuration.
    pub theme: Theme,

    /// Symbol set (unicode or ASCII).
    pub symbols: Symbols,

    /// Terminal area of the most recent frame.
    pub area: Rect,

    /// Number of ticks processed, drives the submit spinner.
    pub ticks: u64,

    /// Aspect whose star row is under the mouse pointer.
    pub pointer: Option<Aspect>,

    should_quit: bool,
}

impl App {
    /// Creates the front end for `widget` with the environment's theme and symbols.
    #[must_use]
    pub fn new(widget: ReviewWidget, brand: impl Into<String>) -> Self {
        Self {
            widget,
            focus: FormFocus::default(),
            brand: brand.into(),
            theme: Theme::from_env(),
            symbols: Symbols::detect(),
            area: Rect::default(),
            ticks: 0,
            pointer: None,
            should_quit: false,
        }
    }

    /// Returns `true` if the application should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Signals that the application should quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Moves focus, clearing the preview of a rating row being left.
    pub fn set_focus(&mut self, focus: FormFocus) {
        if let Some(aspect) = self.focus.aspect() {
            if focus != self.focus {
                self.widget.clear_hover(aspect);
            }
        }
        self.focus = focus;
    }

    /// Resets the component and returns focus to the name field.
    pub fn reset(&mut self) {
        self.widget.reset();
        self.focus = FormFocus::default();
        self.pointer = None;
    }

    /// Applies a single terminal event.
    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Tick => self.ticks = self.ticks.wrapping_add(1),
            TuiEvent::Key(key) => input::handle_key(self, key),
            TuiEvent::Mouse(mouse) => input::handle_mouse(self, mouse),
            TuiEvent::Resize(cols, rows) => self.area = Rect::new(0, 0, cols, rows),
        }
    }

    /// Applies a timer completion from the review component.
    pub fn handle_timer(&mut self, fired: TimerFired) {
        let was_form = self.widget.is_form();
        if self.widget.handle_timer(fired) && !was_form && self.widget.is_form() {
            self.focus = FormFocus::default();
        }
    }

    /// Runs the interactive loop until the user quits.
    ///
    /// Spawns an [`EventHandler`] for terminal input and ticks, and redraws
    /// after every event. The handler is shut down before returning.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Render`] if drawing fails and [`TuiError::Event`]
    /// if the input task fails.
    pub async fn run(
        mut self,
        tui: &mut Tui,
        mut timer_rx: mpsc::Receiver<TimerFired>,
    ) -> Result<(), TuiError> {
        let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handler_task = tokio::spawn(EventHandler::new(event_tx, shutdown_rx).run());

        let (cols, rows) = tui.size().map_err(TuiError::Render)?;
        self.area = Rect::new(0, 0, cols, rows);
        tui.draw(|frame| ui::render(frame, &self))
            .map_err(TuiError::Render)?;

        while !self.should_quit {
            tokio::select! {
                Some(fired) = timer_rx.recv() => self.handle_timer(fired),
                event = event_rx.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        debug!("Event channel closed");
                        break;
                    }
                },
            }

            tui.draw(|frame| ui::render(frame, &self))
                .map_err(TuiError::Render)?;
        }

        // Unblocks an input reader waiting on a full channel.
        drop(event_rx);
        let _ = shutdown_tx.send(());
        match handler_task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(TuiError::Event(e.to_string())),
            Err(join_error) => Err(TuiError::Event(join_error.to_string())),
        }
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Events that drive the TUI event loop.
///
/// # Event Sources
///
/// - **Tick**: Generated by an internal timer for animations
/// - **Key**: Forwarded from terminal input handling
/// - **Mouse**: Forwarded pointer movement and clicks
/// - **Resize**: Forwarded from terminal resize signals
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Periodic tick for animations.
    Tick,

    /// Key press from the user.
    Key(KeyEvent),

    /// Pointer movement or click.
    Mouse(MouseEvent),

    /// Terminal resize to (columns, rows).
    Resize(u16, u16),
}

/// Capacity of the terminal event channel.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Default tick rate for the event handler (80ms = ~12 FPS).
///
/// Only the submit spinner animates, so a slower rate than a dashboard
/// would use is enough.
pub const DEFAULT_TICK_RATE_MS: u64 = 80;

/// How long the input reader waits for terminal input before rechecking
/// the stop flag (10ms).
const DEFAULT_POLL_TIMEOUT_MS: u64 = 10;

/// Blocking source of terminal input for the [`EventHandler`].
///
/// `next_event` may block for up to `timeout`. `Ok(None)` means nothing
/// arrived in that window.
pub trait EventSource: Send + 'static {
    /// Waits up to `timeout` for the next input event.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying terminal cannot be read.
    fn next_event(&mut self, timeout: Duration) -> std::io::Result<Option<TuiEvent>>;
}

/// Reads key, mouse and resize events from the terminal with crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    /// Converts a crossterm event to a [`TuiEvent`].
    ///
    /// Focus and paste events are dropped.
    fn convert(event: CrosstermEvent) -> Option<TuiEvent> {
        match event {
            CrosstermEvent::Key(key_event) => Some(TuiEvent::Key(key_event)),
            CrosstermEvent::Mouse(mouse_event) => Some(TuiEvent::Mouse(mouse_event)),
            CrosstermEvent::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
            CrosstermEvent::Paste(_) => None,
        }
    }
}

impl EventSource for CrosstermEventSource {
    fn next_event(&mut self, timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(Self::convert(event::read()?))
    }
}

/// Handles terminal input and generates periodic tick events.
///
/// Terminal input is read by a single long-lived `spawn_blocking` task that
/// forwards every event with `blocking_send`, so nothing read from the
/// terminal is ever discarded. The async side uses `tokio::select!` over two
/// sources only:
///
/// - **Tick interval**: A tokio interval that fires at the configured tick rate
/// - **Shutdown signal**: A oneshot channel that triggers graceful termination
///
/// On shutdown the reader is told to stop and is joined before `run`
/// returns. It also stops on its own once the event receiver is dropped.
pub struct EventHandler {
    /// Channel sender for dispatching events to the main application.
    event_tx: mpsc::Sender<TuiEvent>,
    /// Receiver for the shutdown signal.
    shutdown_rx: oneshot::Receiver<()>,
    /// Tick rate.
    tick_rate: Duration,
    /// Where terminal input comes from.
    source: Box<dyn EventSource>,
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("tick_rate", &self.tick_rate)
            .finish_non_exhaustive()
    }
}

impl EventHandler {
    /// Creates a new `EventHandler` with the default tick rate.
    pub fn new(event_tx: mpsc::Sender<TuiEvent>, shutdown_rx: oneshot::Receiver<()>) -> Self {
        Self::with_tick_rate(
            event_tx,
            shutdown_rx,
            Duration::from_millis(DEFAULT_TICK_RATE_MS),
        )
    }

    /// Creates a new `EventHandler` with a custom tick rate.
    pub fn with_tick_rate(
        event_tx: mpsc::Sender<TuiEvent>,
        shutdown_rx: oneshot::Receiver<()>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate,
            source: Box::new(CrosstermEventSource),
        }
    }

    /// Replaces the terminal as the input source.
    #[must_use]
    pub fn with_source(mut self, source: impl EventSource) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Returns the configured tick rate.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Runs the event loop until a shutdown signal is received or the
    /// receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the blocking input reader panics.
    pub async fn run(self) -> std::io::Result<()> {
        let Self {
            event_tx,
            mut shutdown_rx,
            tick_rate,
            source,
        } = self;

        let stop = Arc::new(AtomicBool::new(false));
        let reader = tokio::task::spawn_blocking({
            let event_tx = event_tx.clone();
            let stop = Arc::clone(&stop);
            move || read_input(source, &event_tx, &stop)
        });

        let mut tick_interval = tokio::time::interval(tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // interval ticks immediately on creation
        tick_interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    debug!("EventHandler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if event_tx.send(TuiEvent::Tick).await.is_err() {
                        debug!("Event receiver dropped, exiting event loop");
                        break;
                    }
                }
            }
        }

        stop.store(true, Ordering::Relaxed);
        reader.await.map_err(|join_error| {
            tracing::error!("Terminal input reader panicked: {}", join_error);
            std::io::Error::other("Terminal input reader panicked")
        })
    }
}

/// Forwards input from `source` until `stop` is set or the receiver is gone.
///
/// Read failures (no terminal, e.g. in CI) are treated as "no event".
fn read_input(
    mut source: Box<dyn EventSource>,
    event_tx: &mpsc::Sender<TuiEvent>,
    stop: &AtomicBool,
) {
    let poll_timeout = Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS);

    while !stop.load(Ordering::Relaxed) {
        match source.next_event(poll_timeout) {
            Ok(Some(event)) => {
                if event_tx.blocking_send(event).is_err() {
                    debug!("Event receiver dropped, stopping input reader");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::trace!("Failed to read terminal event: {}", e);
                std::thread::sleep(poll_timeout);
            }
        }
    }
}
