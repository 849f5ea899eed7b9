//! Review form widget.
//!
//! Renders the name input, one [`StarRatingWidget`] row per [`Aspect`], a
//! status line, the submit button and the direct review link inside a
//! centered panel.
//!
//! The geometry is computed by [`FormLayout`], which the input handler uses
//! to map pointer positions back to stars. Rendering and hit-testing share
//! the same layout, so a click always lands on the star that was drawn
//! under it.
//!
//! # Layout
//!
//! ```text
//! ╭──────── Rate Your Experience ────────╮
//! │                                      │
//! │  Your Name (optional)                │
//! │  ┌────────────────────────────────┐  │
//! │  │Ana_                            │  │
//! │  └────────────────────────────────┘  │
//! │                                      │
//! │  Final Product Quality               │
//! │  ★ ★ ★ ★ ☆  4/5                      │
//! │  ...                                 │
//! │  Tab next field  Enter submit        │
//! │            → Submit Review           │
//! │                                      │
//! │  Or review us directly on Google:    │
//! │  https://search.google.com/local/wri │
//! │  tereview?placeid=PLACE_ID           │
//! ╰──────────────────────────────────────╯
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use unicode_width::UnicodeWidthChar;

use crate::form::ReviewWidget;
use crate::review::{Aspect, AspectMap};
use crate::tui::app::{FormFocus, Symbols, Theme};
use crate::tui::widgets::star_rating::{star_at_offset, StarRatingWidget, STAR_ROW_WIDTH};

/// Minimum width of the form panel.
const MIN_FORM_WIDTH: u16 = 40;

/// Maximum width of the form panel.
const MAX_FORM_WIDTH: u16 = 60;

/// Height of the form content (excluding outer border).
pub const FORM_CONTENT_HEIGHT: u16 = 21;

/// Narrowest content area that still fits the name box and stars.
const MIN_CONTENT_WIDTH: u16 = 24;

/// Blank columns on each side of the content.
const H_PADDING: u16 = 2;

/// Row offsets inside the panel's inner area.
const NAME_LABEL_ROW: u16 = 1;
const NAME_INPUT_ROW: u16 = 2;
const FIRST_RATING_ROW: u16 = 6;
const ROWS_PER_RATING: u16 = 3;
const STATUS_ROW: u16 = 15;
const SUBMIT_ROW: u16 = 16;
const LINK_LABEL_ROW: u16 = 18;
const LINK_ROW: u16 = 19;
const LINK_ROWS: u16 = 2;

/// Label above the name input.
const NAME_LABEL: &str = "Your Name (optional)";

/// Label above the review link.
const LINK_LABEL: &str = "Or review us directly on Google:";

/// Panel title.
const FORM_TITLE: &str = " Rate Your Experience ";

/// Computes the panel for `area`: centered, width clamped to
/// `MIN_FORM_WIDTH..=MAX_FORM_WIDTH`, never larger than `area`.
fn centered_rect(area: Rect) -> Rect {
    let form_width = area.width.clamp(MIN_FORM_WIDTH, MAX_FORM_WIDTH);
    let form_height = FORM_CONTENT_HEIGHT + 2;

    let x = area.x + area.width.saturating_sub(form_width) / 2;
    let y = area.y + area.height.saturating_sub(form_height) / 2;

    Rect::new(
        x,
        y,
        form_width.min(area.width),
        form_height.min(area.height),
    )
}

/// Screen geometry of the review form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    /// Outer panel including its border.
    pub panel: Rect,
    /// Name label line.
    pub name_label: Rect,
    /// Bordered name input box (3 rows).
    pub name_input: Rect,
    /// Aspect label line per aspect.
    pub rating_labels: AspectMap<Rect>,
    /// Star line per aspect.
    pub star_rows: AspectMap<Rect>,
    /// Hint or progress line.
    pub status: Rect,
    /// Submit button line.
    pub submit: Rect,
    /// Label line above the review link.
    pub link_label: Rect,
    /// Review link, wrapped over two lines.
    pub link: Rect,
}

impl FormLayout {
    /// Lays the form out in `area`.
    ///
    /// Returns `None` when the area cannot hold the form; the widget then
    /// shows a "Window too small" message instead.
    #[must_use]
    pub fn compute(area: Rect) -> Option<Self> {
        let panel = centered_rect(area);
        let inner = Block::default().borders(Borders::ALL).inner(panel);
        if inner.width < MIN_CONTENT_WIDTH + 2 * H_PADDING || inner.height < FORM_CONTENT_HEIGHT {
            return None;
        }

        let x = inner.x + H_PADDING;
        let width = inner.width - 2 * H_PADDING;
        let line = |row: u16| Rect::new(x, inner.y + row, width, 1);

        let mut rating_labels = AspectMap::filled(Rect::default());
        let mut star_rows = AspectMap::filled(Rect::default());
        for aspect in Aspect::ALL {
            let row = FIRST_RATING_ROW + aspect.index() as u16 * ROWS_PER_RATING;
            rating_labels.set(aspect, line(row));
            star_rows.set(aspect, line(row + 1));
        }

        Some(Self {
            panel,
            name_label: line(NAME_LABEL_ROW),
            name_input: Rect::new(x, inner.y + NAME_INPUT_ROW, width, 3),
            rating_labels,
            star_rows,
            status: line(STATUS_ROW),
            submit: line(SUBMIT_ROW),
            link_label: line(LINK_LABEL_ROW),
            link: Rect::new(x, inner.y + LINK_ROW, width, LINK_ROWS),
        })
    }

    /// The aspect and star position under the cell at (`column`, `row`).
    #[must_use]
    pub fn star_at(&self, column: u16, row: u16) -> Option<(Aspect, u8)> {
        Aspect::ALL.into_iter().find_map(|aspect| {
            let stars = self.star_rows.get(aspect);
            if row != stars.y || column < stars.x {
                return None;
            }
            star_at_offset(column - stars.x).map(|position| (aspect, position))
        })
    }

    /// Returns `true` if (`column`, `row`) is inside the name input box.
    #[must_use]
    pub fn in_name_input(&self, column: u16, row: u16) -> bool {
        contains(self.name_input, column, row)
    }

    /// Returns `true` if (`column`, `row`) is on the submit button line.
    #[must_use]
    pub fn in_submit(&self, column: u16, row: u16) -> bool {
        contains(self.submit, column, row)
    }
}

/// The longest suffix of `name` that fits in `width` terminal cells.
fn name_tail(name: &str, width: usize) -> String {
    let mut used = 0;
    let start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .last()
        .map_or(name.len(), |(index, _)| index);
    name[start..].to_string()
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Widget for rendering the review form.
///
/// Stateless: everything it draws comes from the [`ReviewWidget`] and the
/// front end's focus.
#[derive(Debug)]
pub struct ReviewFormWidget<'a> {
    review: &'a ReviewWidget,
    focus: FormFocus,
    ticks: u64,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> ReviewFormWidget<'a> {
    #[must_use]
    pub fn new(
        review: &'a ReviewWidget,
        focus: FormFocus,
        theme: &'a Theme,
        symbols: &'a Symbols,
    ) -> Self {
        Self {
            review,
            focus,
            ticks: 0,
            theme,
            symbols,
        }
    }

    /// Tick count driving the progress spinner.
    #[must_use]
    pub fn ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    fn render_name_field(&self, layout: &FormLayout, buf: &mut Buffer) {
        let is_focused = self.focus == FormFocus::Name;

        let label_style = if is_focused {
            self.theme.label.add_modifier(Modifier::BOLD)
        } else {
            self.theme.label
        };
        Paragraph::new(NAME_LABEL)
            .style(label_style)
            .render(layout.name_label, buf);

        let (border_style, input_style) = if is_focused {
            (self.theme.border_focused, self.theme.input_focused)
        } else {
            (self.theme.border, self.theme.input_unfocused)
        };

        // Keep the end of a long name visible.
        let visible = usize::from(layout.name_input.width.saturating_sub(3));
        let mut text = name_tail(&self.review.input().name, visible);
        if is_focused && self.review.is_editable() {
            text.push('_');
        }

        Paragraph::new(text)
            .style(input_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .render(layout.name_input, buf);
    }

    fn render_rating(&self, aspect: Aspect, layout: &FormLayout, buf: &mut Buffer) {
        let is_focused = self.focus == FormFocus::Rating(aspect);

        let label_style = if is_focused {
            self.theme.label.add_modifier(Modifier::BOLD)
        } else {
            self.theme.label
        };
        let label = if is_focused {
            format!("{} {}", self.symbols.arrow, aspect.label())
        } else {
            aspect.label().to_string()
        };
        Paragraph::new(label)
            .style(label_style)
            .render(layout.rating_labels.get(aspect), buf);

        let hover = self.review.hover().get(aspect);
        StarRatingWidget::new(self.review.display_level(aspect), self.theme, self.symbols)
            .cursor((hover > 0).then_some(hover))
            .focused(is_focused)
            .render(layout.star_rows.get(aspect), buf);
    }

    fn render_status(&self, layout: &FormLayout, buf: &mut Buffer) {
        let (text, style) = if self.review.is_submitting() {
            (
                format!(
                    "{} Sending your review...",
                    self.symbols.spinner_frame(self.ticks)
                ),
                self.theme.text_secondary,
            )
        } else {
            let hint = match self.focus {
                FormFocus::Name => "Type your name  Tab next field".to_string(),
                FormFocus::Rating(_) => "Left/Right preview  1-5 or Enter rate".to_string(),
                FormFocus::Submit => "Enter submit  Tab back to the top".to_string(),
            };
            (hint, self.theme.text_muted)
        };

        Paragraph::new(text).style(style).render(layout.status, buf);
    }

    fn render_submit_button(&self, layout: &FormLayout, buf: &mut Buffer) {
        let is_focused = self.focus == FormFocus::Submit;

        let (text, style) = if self.review.is_submitting() {
            ("  Sending...  ".to_string(), self.theme.text_muted)
        } else if is_focused {
            (
                format!(" {} Submit Review ", self.symbols.arrow),
                self.theme
                    .input_focused
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
        } else {
            ("  Submit Review  ".to_string(), self.theme.input_unfocused)
        };

        Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .render(layout.submit, buf);
    }

    fn render_link(&self, layout: &FormLayout, buf: &mut Buffer) {
        Paragraph::new(LINK_LABEL)
            .style(self.theme.text_muted)
            .render(layout.link_label, buf);

        Paragraph::new(self.review.redirect_url())
            .style(self.theme.link)
            .wrap(Wrap { trim: false })
            .render(layout.link, buf);
    }
}

impl Widget for ReviewFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = centered_rect(area);
        let outer_block = Block::default()
            .title(FORM_TITLE)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .title_style(self.theme.title)
            .style(self.theme.text_primary);
        let inner_area = outer_block.inner(panel);
        outer_block.render(panel, buf);

        let Some(layout) = FormLayout::compute(area) else {
            Paragraph::new("Window too small")
                .style(self.theme.text_muted)
                .alignment(Alignment::Center)
                .render(inner_area, buf);
            return;
        };

        self.render_name_field(&layout, buf);
        for aspect in Aspect::ALL {
            self.render_rating(aspect, &layout, buf);
        }
        self.render_status(&layout, buf);
        self.render_submit_button(&layout, buf);
        self.render_link(&layout, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::WidgetConfig;
    use crate::tui::app::ASCII_SYMBOLS;
    use tokio::sync::mpsc;

    fn form_widget() -> ReviewWidget {
        let (tx, _rx) = mpsc::channel(8);
        let config = WidgetConfig {
            splash: None,
            ..WidgetConfig::default()
        };
        ReviewWidget::new(config, tx)
    }

    fn render(review: &ReviewWidget, focus: FormFocus, area: Rect) -> Buffer {
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        ReviewFormWidget::new(review, focus, &theme, &ASCII_SYMBOLS).render(area, &mut buf);
        buf
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut content = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                content.push_str(buf[(x, y)].symbol());
            }
            content.push('\n');
        }
        content
    }

    fn line_text(buf: &Buffer, rect: Rect) -> String {
        (rect.x..rect.right())
            .map(|x| buf[(x, rect.y)].symbol())
            .collect()
    }

    #[test]
    fn centered_rect_calculates_correct_position() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(area);

        assert_eq!(centered.width, MAX_FORM_WIDTH);
        assert_eq!(centered.height, FORM_CONTENT_HEIGHT + 2);
        assert_eq!(centered.x, 20);
        assert_eq!(centered.y, 13);
    }

    #[test]
    fn centered_rect_handles_small_area() {
        let area = Rect::new(0, 0, 30, 10);
        let centered = centered_rect(area);

        assert!(centered.right() <= area.width);
        assert!(centered.bottom() <= area.height);
    }

    #[test]
    fn layout_rows_are_distinct_and_ordered() {
        let layout = FormLayout::compute(Rect::new(0, 0, 80, 24)).unwrap();

        let rows = [
            layout.name_label.y,
            layout.name_input.y,
            layout.rating_labels.get(Aspect::Quality).y,
            layout.star_rows.get(Aspect::Quality).y,
            layout.rating_labels.get(Aspect::Punctuality).y,
            layout.star_rows.get(Aspect::Punctuality).y,
            layout.rating_labels.get(Aspect::Service).y,
            layout.star_rows.get(Aspect::Service).y,
            layout.status.y,
            layout.submit.y,
            layout.link_label.y,
            layout.link.y,
        ];
        assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(layout.link.bottom() < layout.panel.bottom());
    }

    #[test]
    fn layout_none_when_too_small() {
        assert!(FormLayout::compute(Rect::new(0, 0, 80, 10)).is_none());
        assert!(FormLayout::compute(Rect::new(0, 0, 20, 40)).is_none());
    }

    #[test]
    fn star_at_maps_cells_to_positions() {
        let layout = FormLayout::compute(Rect::new(0, 0, 80, 24)).unwrap();
        let row = layout.star_rows.get(Aspect::Punctuality);

        assert_eq!(layout.star_at(row.x, row.y), Some((Aspect::Punctuality, 1)));
        assert_eq!(
            layout.star_at(row.x + 4, row.y),
            Some((Aspect::Punctuality, 3))
        );
        assert_eq!(
            layout.star_at(row.x + STAR_ROW_WIDTH - 1, row.y),
            Some((Aspect::Punctuality, 5))
        );
        assert_eq!(layout.star_at(row.x + STAR_ROW_WIDTH, row.y), None);
        assert_eq!(layout.star_at(row.x.saturating_sub(1), row.y), None);
        assert_eq!(layout.star_at(row.x, row.y - 1), None);
    }

    #[test]
    fn name_and_submit_hit_tests() {
        let layout = FormLayout::compute(Rect::new(0, 0, 80, 24)).unwrap();

        assert!(layout.in_name_input(layout.name_input.x + 1, layout.name_input.y + 1));
        assert!(!layout.in_name_input(layout.name_input.x, layout.name_input.y + 3));
        assert!(layout.in_submit(layout.submit.x + 5, layout.submit.y));
        assert!(!layout.in_submit(layout.submit.x + 5, layout.submit.y + 1));
    }

    #[test]
    fn renders_title_labels_and_button() {
        let review = form_widget();
        let buf = render(&review, FormFocus::Name, Rect::new(0, 0, 80, 24));
        let content = buffer_text(&buf);

        assert!(content.contains("Rate Your Experience"));
        assert!(content.contains(NAME_LABEL));
        for aspect in Aspect::ALL {
            assert!(content.contains(aspect.label()), "missing {aspect}");
        }
        assert!(content.contains("Submit Review"));
    }

    #[test]
    fn renders_display_level_per_aspect() {
        let mut review = form_widget();
        review.set_rating(Aspect::Quality, 1).unwrap();
        review.set_hover(Aspect::Quality, 3).unwrap();
        review.set_rating(Aspect::Service, 5).unwrap();

        let area = Rect::new(0, 0, 80, 24);
        let layout = FormLayout::compute(area).unwrap();
        let buf = render(&review, FormFocus::Name, area);

        assert!(line_text(&buf, layout.star_rows.get(Aspect::Quality)).starts_with("* * * . .  3/5"));
        assert!(line_text(&buf, layout.star_rows.get(Aspect::Punctuality)).starts_with(". . . . . "));
        assert!(line_text(&buf, layout.star_rows.get(Aspect::Service)).starts_with("* * * * *  5/5"));
    }

    #[test]
    fn focused_name_shows_cursor() {
        let mut review = form_widget();
        review.set_name("Ana").unwrap();

        let buf = render(&review, FormFocus::Name, Rect::new(0, 0, 80, 24));
        assert!(buffer_text(&buf).contains("Ana_"));

        let buf = render(&review, FormFocus::Submit, Rect::new(0, 0, 80, 24));
        let content = buffer_text(&buf);
        assert!(content.contains("Ana"));
        assert!(!content.contains("Ana_"));
    }

    #[test]
    fn long_name_keeps_tail_visible() {
        let mut review = form_widget();
        let name = format!("{}END", "x".repeat(100));
        review.set_name(name).unwrap();

        let buf = render(&review, FormFocus::Name, Rect::new(0, 0, 80, 24));
        assert!(buffer_text(&buf).contains("END_"));
    }

    #[test]
    fn name_tail_counts_wide_characters_as_two_cells() {
        assert_eq!(name_tail("Ana", 10), "Ana");
        assert_eq!(name_tail("abcdef", 3), "def");
        assert_eq!(name_tail("山田太郎", 5), "太郎");
        assert_eq!(name_tail("山田太郎", 4), "太郎");
        assert_eq!(name_tail("x山", 1), "");
        assert_eq!(name_tail("", 4), "");
    }

    #[test]
    fn long_wide_name_keeps_tail_and_cursor_visible() {
        let mut review = form_widget();
        review.set_name(format!("{}终", "山".repeat(40))).unwrap();

        let area = Rect::new(0, 0, 80, 24);
        let layout = FormLayout::compute(area).unwrap();
        let buf = render(&review, FormFocus::Name, area);

        let input_row = Rect::new(
            layout.name_input.x + 1,
            layout.name_input.y + 1,
            layout.name_input.width - 2,
            1,
        );
        // Wide glyphs leave a blank continuation cell behind them.
        let row: String = line_text(&buf, input_row).split_whitespace().collect();
        assert!(row.ends_with("终_"), "tail clipped: {row:?}");
    }

    #[test]
    fn focused_rating_row_is_marked() {
        let review = form_widget();
        let buf = render(
            &review,
            FormFocus::Rating(Aspect::Punctuality),
            Rect::new(0, 0, 80, 24),
        );

        assert!(buffer_text(&buf).contains("-> Delivery Punctuality"));
    }

    #[tokio::test]
    async fn submitting_shows_progress() {
        let mut review = form_widget();
        for aspect in Aspect::ALL {
            review.set_rating(aspect, 4).unwrap();
        }
        review.submit().unwrap();

        let buf = render(&review, FormFocus::Submit, Rect::new(0, 0, 80, 24));
        let content = buffer_text(&buf);
        assert!(content.contains("Sending your review..."));
        assert!(!content.contains("Submit Review"));
    }

    #[test]
    fn renders_review_link_below_the_form() {
        let (tx, _rx) = mpsc::channel(8);
        let config = WidgetConfig {
            place_id: "ChIJebKgpDisKIQRyMQkUb7GbqM".to_string(),
            splash: None,
            ..WidgetConfig::default()
        };
        let review = ReviewWidget::new(config, tx);

        let area = Rect::new(0, 0, 80, 24);
        let layout = FormLayout::compute(area).unwrap();
        let buf = render(&review, FormFocus::Name, area);

        assert!(line_text(&buf, layout.link_label).starts_with(LINK_LABEL));
        let link: String = (0..layout.link.height)
            .map(|row| {
                let line = Rect::new(layout.link.x, layout.link.y + row, layout.link.width, 1);
                line_text(&buf, line).trim_end().to_string()
            })
            .collect();
        assert_eq!(link, review.redirect_url());
    }

    #[test]
    fn renders_in_small_area() {
        let review = form_widget();
        let buf = render(&review, FormFocus::Name, Rect::new(0, 0, 50, 12));

        assert!(buffer_text(&buf).contains("Window too small"));
    }

    #[test]
    fn renders_with_monochrome_theme() {
        let review = form_widget();
        let theme = Theme::monochrome();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        ReviewFormWidget::new(&review, FormFocus::Submit, &theme, &ASCII_SYMBOLS)
            .render(area, &mut buf);

        assert!(buffer_text(&buf).contains("Submit Review"));
    }
}
