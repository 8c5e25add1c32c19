// crates/tui/src/lib.rs
//! Terminal deck browser for MentorScroll
//!
//! Draws the current card on top of its receding neighbours and drives a
//! [`DeckNavigator`](mentorscroll_deck::DeckNavigator) from arrow keys, mouse
//! drags and edge clicks.
//!
//! ```no_run
//! use mentorscroll_tui::{App, TuiApp};
//!
//! let app = App::new(Vec::new());
//! let mut tui = TuiApp::new(app).expect("terminal");
//! tui.run().expect("browser");
//! ```

mod app;
mod error;
mod events;
mod state;
mod theme;
pub mod ui;

pub use app::{timings_from, App};
pub use error::{TuiError, TuiResult};
pub use events::{edge_at, AppEvent, DragTracker, EventHandler};
pub use state::{BrowserState, QuizAnswer, View};
pub use theme::{palette_color, Theme, ThemeType};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Owns the terminal for the lifetime of a browsing session
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    events: EventHandler,
    restored: bool,
}

impl TuiApp {
    /// Switches the terminal to raw mode on the alternate screen
    pub fn new(app: App) -> TuiResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app,
            events: EventHandler::default(),
            restored: false,
        })
    }

    pub fn run(&mut self) -> TuiResult<()> {
        let result = self.app.run(&mut self.terminal, &self.events);
        self.cleanup()?;
        result
    }

    fn cleanup(&mut self) -> TuiResult<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let _ = BrowserState::new();
        let _: View = View::Deck;
        let _: ThemeType = ThemeType::Dark;
        let _ = DragTracker::new();
        let _ = EventHandler::default();
        let _ = palette_color("blue-600");
        let _: TuiResult<()> = Ok(());
    }

    #[test]
    fn test_app_creation() {
        let app = App::new(Vec::new());
        assert!(app.deck().is_empty());
        assert!(!app.should_quit());
    }
}
