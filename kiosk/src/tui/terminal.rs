//! Terminal setup and RAII restoration for the review kiosk.
//!
//! [`Tui`] wraps a ratatui terminal. Creating it enables raw mode, enters the
//! alternate screen and turns on mouse capture so the star rows can react to
//! the pointer. Dropping it undoes all three.
//!
//! # Example
//!
//! ```ignore
//! use review_kiosk::tui::{Tui, install_panic_hook};
//!
//! install_panic_hook();
//!
//! let mut tui = Tui::new()?;
//! tui.draw(|frame| {
//!     // render widgets to frame
//! })?;
//! ```
//!
//! # Cleanup Behavior
//!
//! The terminal state is restored in three scenarios:
//!
//! 1. **Normal drop**: When [`Tui`] goes out of scope
//! 2. **Explicit restore**: By calling [`Tui::restore()`]
//! 3. **Panic hook**: Via [`install_panic_hook()`], even if the panic happens
//!    before the [`Drop`] handler runs

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Best-effort restoration used by the panic hook and [`Drop`].
fn reset_terminal() {
    let _ = execute!(io::stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Installs a panic hook that restores terminal state before displaying panic messages.
///
/// Call this **once** at startup, **before** creating any [`Tui`]. The hook
/// releases the mouse, shows the cursor, leaves the alternate screen and
/// disables raw mode, then delegates to the previous hook so the message is
/// printed to the normal screen.
pub fn install_panic_hook() {
    let previous_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        reset_terminal();
        previous_hook(panic_info);
    }));
}

/// A wrapper around ratatui's Terminal that provides RAII-based cleanup.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Set once restored so cleanup runs at most once.
    restored: bool,
}

impl Tui {
    /// Creates a new TUI instance.
    ///
    /// Enables raw mode, enters the alternate screen, hides the cursor and
    /// enables mouse capture. A failure part way through undoes the steps
    /// already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if any terminal initialization step fails.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();

        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide, EnableMouseCapture) {
            reset_terminal();
            return Err(e);
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(e) => {
                reset_terminal();
                return Err(e);
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draws a frame to the terminal using the provided closure.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Returns the current terminal size as (width, height).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be determined.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    /// Explicitly restores the terminal to its original state.
    ///
    /// Unlike the [`Drop`] implementation, errors are propagated. The
    /// [`Drop`] implementation skips cleanup once this has been called.
    ///
    /// # Errors
    ///
    /// Returns an error if any restoration step fails.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }

        self.restored = true;
        execute!(io::stdout(), DisableMouseCapture, Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;

        Ok(())
    }

    /// Clears the entire terminal screen.
    ///
    /// # Errors
    ///
    /// Returns an error if clearing fails.
    pub fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.restored {
            return;
        }

        // Errors are ignored: we may be unwinding and the terminal may
        // already be in a bad state.
        reset_terminal();
    }
}
