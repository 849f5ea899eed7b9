//! Screen composition for the review kiosk.
//!
//! [`render`] dispatches on the component's [`ViewState`]:
//!
//! ```text
//! render() --> match app.widget.view() {
//!     Splash     --> render_splash_screen()
//!     FormActive --> render_form_screen()
//!     ThankYou   --> render_thank_you_screen()
//! }
//! ```
//!
//! A pending notice is drawn last, over whichever screen is active.
//!
//! # Example
//!
//! ```ignore
//! use review_kiosk::tui::ui::render;
//!
//! terminal.draw(|frame| render(frame, &app))?;
//! ```

use ratatui::{
    layout::{Alignment, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::form::ViewState;
use crate::tui::app::App;
use crate::tui::widgets::{logo_height, LogoWidget, NoticeWidget, ReviewFormWidget, ThankYouWidget};

/// Line shown under the logo while the splash is up.
const SPLASH_TAGLINE: &str = "We'd love to hear about your experience";

/// Renders the screen for the component's current view.
pub fn render(frame: &mut Frame, app: &App) {
    match app.widget.view() {
        ViewState::Splash => render_splash_screen(frame, app),
        ViewState::FormActive => render_form_screen(frame, app),
        ViewState::ThankYou => render_thank_you_screen(frame, app),
    }

    if let Some(notice) = app.widget.notice() {
        frame.render_widget(
            NoticeWidget::new(notice, &app.theme, &app.symbols),
            frame.area(),
        );
    }
}

/// Renders the brand logo with a tagline, vertically centered.
pub fn render_splash_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let logo_rows = logo_height(&app.brand, area.width);
    let block_height = (logo_rows + 2).min(area.height);
    let top = area.y + area.height.saturating_sub(block_height) / 2;

    let logo_area = Rect::new(area.x, top, area.width, logo_rows.min(area.height));
    frame.render_widget(
        LogoWidget::new(&app.brand, &app.theme, &app.symbols),
        logo_area,
    );

    let tagline_y = top + logo_rows + 1;
    if tagline_y < area.bottom() {
        let tagline = Paragraph::new(SPLASH_TAGLINE)
            .style(app.theme.text_secondary)
            .alignment(Alignment::Center);
        frame.render_widget(tagline, Rect::new(area.x, tagline_y, area.width, 1));
    }
}

/// Renders the rating form.
pub fn render_form_screen(frame: &mut Frame, app: &App) {
    let form = ReviewFormWidget::new(&app.widget, app.focus, &app.theme, &app.symbols)
        .ticks(app.ticks);
    frame.render_widget(form, frame.area());
}

/// Renders the confirmation with the review link.
pub fn render_thank_you_screen(frame: &mut Frame, app: &App) {
    let url = app.widget.redirect_url();
    let widget = ThankYouWidget::new(
        &app.widget.input().name,
        &url,
        &app.theme,
        &app.symbols,
    );
    frame.render_widget(widget, frame.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ReviewWidget, TimerFired, WidgetConfig};
    use crate::review::Aspect;
    use crate::tui::app::ASCII_SYMBOLS;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn create_test_terminal_with_size(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn create_test_terminal() -> Terminal<TestBackend> {
        create_test_terminal_with_size(80, 24)
    }

    fn app_with(config: WidgetConfig) -> App {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = App::new(ReviewWidget::new(config, tx), "Acme");
        app.symbols = ASCII_SYMBOLS;
        app
    }

    fn form_app() -> App {
        app_with(WidgetConfig {
            splash: None,
            ..WidgetConfig::default()
        })
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[tokio::test]
    async fn splash_shows_brand_and_tagline() {
        let mut terminal = create_test_terminal();
        let app = app_with(WidgetConfig::default());
        assert!(app.widget.is_splash());

        terminal.draw(|f| render(f, &app)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("A C M E"));
        assert!(content.contains(SPLASH_TAGLINE));
    }

    #[tokio::test]
    async fn splash_in_tiny_terminal_does_not_panic() {
        let mut terminal = create_test_terminal_with_size(6, 2);
        let app = app_with(WidgetConfig::default());

        terminal.draw(|f| render(f, &app)).unwrap();
    }

    #[test]
    fn form_view_dispatches_to_form() {
        let mut terminal = create_test_terminal();
        let app = form_app();

        terminal.draw(|f| render(f, &app)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("Rate Your Experience"));
        assert!(!content.contains("Press Enter to continue"));
    }

    #[test]
    fn notice_overlays_form() {
        let mut terminal = create_test_terminal();
        let mut app = form_app();
        let _ = app.widget.submit();

        terminal.draw(|f| render(f, &app)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("Attention"));
        assert!(content.contains("Press Enter to continue"));
    }

    #[tokio::test]
    async fn thank_you_shows_redirect_url() {
        let mut terminal = create_test_terminal_with_size(100, 24);
        let mut app = form_app();
        for aspect in Aspect::ALL {
            app.widget.set_rating(aspect, 5).unwrap();
        }
        app.widget.submit().unwrap();
        app.handle_timer(TimerFired::Submission(1));
        assert!(app.widget.is_thank_you());

        terminal.draw(|f| render(f, &app)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("Thank you!"));
        assert!(content.contains("https://search.google.com/local/writereview?placeid=PLACE_ID"));
    }

    #[test]
    fn form_in_small_terminal_shows_fallback() {
        let mut terminal = create_test_terminal_with_size(40, 12);
        let app = form_app();

        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(screen_text(&terminal).contains("Window too small"));
    }

    #[test]
    fn render_with_large_terminal() {
        let mut terminal = create_test_terminal_with_size(200, 60);
        let app = form_app();

        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
