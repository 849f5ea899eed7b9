//! Terminal front end for the review kiosk.
//!
//! A [`ratatui`] interface over the headless
//! [`ReviewWidget`](crate::form::ReviewWidget): splash screen, rating form,
//! thank-you view and the blocking validation notice.
//!
//! # Architecture
//!
//! The TUI follows a Model-View-Controller pattern:
//!
//! - **App** (`app`): Front-end state and the event loop (Model/Controller)
//! - **UI** (`ui`): Layout and rendering logic (View)
//! - **Input** (`input`): Keyboard and mouse handling
//! - **Terminal** (`terminal`): Terminal setup, teardown, and raw mode management
//! - **Widgets** (`widgets`): Reusable UI components
//!
//! # Usage
//!
//! ```ignore
//! use review_kiosk::tui::{install_panic_hook, App, Tui};
//!
//! install_panic_hook();
//! let mut tui = Tui::new()?;
//! App::new(widget, "Pietra Fina").run(&mut tui, timer_rx).await?;
//! ```

pub mod app;
pub mod input;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use app::{
    App, CrosstermEventSource, EventHandler, EventSource, FormFocus, Symbols, Theme, TuiEvent,
};
pub use terminal::{install_panic_hook, Tui};
