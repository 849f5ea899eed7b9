//! Blocking alert drawn over the current view.
//!
//! The form stores a user-facing [`FormError`] as its notice; while it is
//! set the front end draws this overlay and only accepts the dismiss keys.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::FormError;
use crate::tui::app::{Symbols, Theme};

const NOTICE_WIDTH: u16 = 46;

/// Modal notice for a [`FormError`].
#[derive(Debug)]
pub struct NoticeWidget<'a> {
    error: &'a FormError,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> NoticeWidget<'a> {
    #[must_use]
    pub fn new(error: &'a FormError, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            error,
            theme,
            symbols,
        }
    }

    fn body(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];
        match self.error {
            FormError::IncompleteRatings { missing } => {
                lines.push(Line::styled(
                    "Please rate every aspect before submitting.",
                    self.theme.text_primary,
                ));
                lines.push(Line::from(""));
                for aspect in missing {
                    lines.push(Line::styled(
                        format!("{} {}", self.symbols.failure, aspect.label()),
                        self.theme.input_error,
                    ));
                }
            }
            other => lines.push(Line::styled(other.to_string(), self.theme.text_primary)),
        }
        lines.push(Line::from(""));
        lines.push(Line::styled("Press Enter to continue", self.theme.text_muted));
        lines
    }
}

impl Widget for NoticeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.body();
        let width = area.width.min(NOTICE_WIDTH);
        let height = area.height.min(lines.len() as u16 + 2);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        Clear.render(popup, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Attention ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(self.theme.input_error),
            )
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::Aspect;
    use crate::tui::app::ASCII_SYMBOLS;

    fn render(error: &FormError, area: Rect) -> String {
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        NoticeWidget::new(error, &theme, &ASCII_SYMBOLS).render(area, &mut buf);
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn lists_missing_aspects() {
        let error = FormError::IncompleteRatings {
            missing: vec![Aspect::Punctuality, Aspect::Service],
        };
        let content = render(&error, Rect::new(0, 0, 80, 24));

        assert!(content.contains("Attention"));
        assert!(content.contains("[x] Delivery Punctuality"));
        assert!(content.contains("[x] Attention & Service"));
        assert!(!content.contains("Final Product Quality"));
        assert!(content.contains("Press Enter to continue"));
    }

    #[test]
    fn other_errors_use_display_text() {
        let content = render(&FormError::SubmissionInFlight, Rect::new(0, 0, 80, 24));
        assert!(content.contains("already in progress"));
    }

    #[test]
    fn clears_what_is_underneath() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        for cell in buf.content.iter_mut() {
            cell.set_symbol("#");
        }

        NoticeWidget::new(&FormError::Locked, &theme, &ASCII_SYMBOLS).render(area, &mut buf);

        let center = buf[(40, 12)].symbol().to_string();
        assert_ne!(center, "#");
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let _ = render(&FormError::Locked, Rect::new(0, 0, 3, 2));
        let _ = render(&FormError::Locked, Rect::new(0, 0, 0, 0));
    }
}
