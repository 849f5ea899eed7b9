//! Thank-you view shown after a completed submission.
//!
//! Confirms the review was received and shows the review-platform link as
//! plain text, followed by the start-over and quit key hints. The URL wraps
//! across lines in narrow terminals instead of being truncated.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::tui::app::{Symbols, Theme};

const MAX_PANEL_WIDTH: u16 = 72;
const PANEL_HEIGHT: u16 = 13;

/// Widget for the thank-you view.
#[derive(Debug)]
pub struct ThankYouWidget<'a> {
    name: &'a str,
    redirect_url: &'a str,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> ThankYouWidget<'a> {
    /// Creates the widget. `name` personalises the greeting when not blank.
    #[must_use]
    pub fn new(name: &'a str, redirect_url: &'a str, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            name,
            redirect_url,
            theme,
            symbols,
        }
    }

    fn greeting(&self) -> String {
        match self.name.trim() {
            "" => "Thank you!".to_string(),
            name => format!("Thank you, {name}!"),
        }
    }
}

impl Widget for ThankYouWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width.min(MAX_PANEL_WIDTH);
        let height = area.height.min(PANEL_HEIGHT);
        let panel = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(self.symbols.success, self.theme.success),
                Span::raw(" "),
                Span::styled(self.greeting(), self.theme.title),
            ]),
            Line::from(""),
            Line::styled("Your feedback has been received.", self.theme.text_secondary),
            Line::from(""),
            Line::styled(
                "Enjoyed the experience? Share it on our review page:",
                self.theme.text_primary,
            ),
            Line::styled(self.redirect_url, self.theme.link),
            Line::from(""),
            Line::from(vec![
                Span::styled("[r]", self.theme.input_focused),
                Span::styled(" Start over   ", self.theme.text_muted),
                Span::styled("[q]", self.theme.input_focused),
                Span::styled(" Quit", self.theme.text_muted),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_focused),
            )
            .render(panel, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::redirect_url_for;
    use crate::tui::app::{ASCII_SYMBOLS, UNICODE_SYMBOLS};

    fn render(name: &str, url: &str, area: Rect) -> String {
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        ThankYouWidget::new(name, url, &theme, &UNICODE_SYMBOLS).render(area, &mut buf);
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn greeting_uses_trimmed_name() {
        let theme = Theme::default();
        let widget = ThankYouWidget::new("  Ana ", "", &theme, &ASCII_SYMBOLS);
        assert_eq!(widget.greeting(), "Thank you, Ana!");

        let widget = ThankYouWidget::new("   ", "", &theme, &ASCII_SYMBOLS);
        assert_eq!(widget.greeting(), "Thank you!");
    }

    #[test]
    fn renders_link_and_hints() {
        let url = redirect_url_for("abc123");
        let content = render("", &url, Rect::new(0, 0, 100, 20));

        assert!(content.contains("Thank you!"));
        assert!(content.contains("✓"));
        assert!(content.contains(&url));
        assert!(content.contains("Start over"));
    }

    #[test]
    fn narrow_area_wraps_instead_of_panicking() {
        let url = redirect_url_for("abc123");
        let content = render("Ana", &url, Rect::new(0, 0, 30, 20));

        assert!(content.contains("Thank you, Ana!"));
        assert!(content.contains("writereview"));
    }

    #[test]
    fn empty_area_does_not_panic() {
        let _ = render("", "", Rect::new(0, 0, 0, 0));
    }
}
