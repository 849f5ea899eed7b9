//! Five-star rating control.
//!
//! Stars are drawn two columns apart so each one is an easy mouse target:
//!
//! ```text
//! ★ ★ ★ ☆ ☆  3/5
//! ```
//!
//! [`star_at_offset`] maps a column offset inside the row back to a star
//! position; the form layout uses it for pointer hit-testing.

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};

use crate::review::MAX_RATING;
use crate::tui::app::{Symbols, Theme};

/// Columns between the start of one star and the next.
pub const STAR_SPACING: u16 = 2;

/// Columns covered by the five stars.
pub const STAR_ROW_WIDTH: u16 = (MAX_RATING as u16 - 1) * STAR_SPACING + 1;

/// Star position (1-based) under column `offset` of a star row.
///
/// The gap after a star belongs to that star, so every column of the row
/// maps to exactly one position.
///
/// # Example
///
/// ```
/// use review_kiosk::tui::widgets::star_at_offset;
///
/// assert_eq!(star_at_offset(0), Some(1));
/// assert_eq!(star_at_offset(1), Some(1));
/// assert_eq!(star_at_offset(8), Some(5));
/// assert_eq!(star_at_offset(9), None);
/// ```
#[must_use]
pub fn star_at_offset(offset: u16) -> Option<u8> {
    (offset < STAR_ROW_WIDTH).then(|| (offset / STAR_SPACING) as u8 + 1)
}

/// Renders one aspect's stars.
#[derive(Debug)]
pub struct StarRatingWidget<'a> {
    /// Stars rendered as filled.
    level: u8,
    /// Star under the keyboard cursor, if any.
    cursor: Option<u8>,
    focused: bool,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> StarRatingWidget<'a> {
    #[must_use]
    pub fn new(level: u8, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            level,
            cursor: None,
            focused: false,
            theme,
            symbols,
        }
    }

    /// Highlights star `position` as the keyboard cursor.
    #[must_use]
    pub fn cursor(mut self, position: Option<u8>) -> Self {
        self.cursor = position.filter(|p| (1..=MAX_RATING).contains(p));
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for StarRatingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for position in 1..=MAX_RATING {
            let x = area.x + u16::from(position - 1) * STAR_SPACING;
            if x >= area.right() {
                break;
            }

            let (symbol, mut style) = if position <= self.level {
                (self.symbols.star_filled, self.theme.star_filled)
            } else {
                (self.symbols.star_empty, self.theme.star_empty)
            };
            if self.focused && self.cursor == Some(position) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            buf.set_string(x, area.y, symbol, style);
        }

        let score_x = area.x + STAR_ROW_WIDTH + 2;
        if self.level > 0 && score_x < area.right() {
            let score = format!("{}/{MAX_RATING}", self.level);
            let style = if self.focused {
                self.theme.text_primary
            } else {
                self.theme.text_muted
            };
            let width = usize::from(area.right() - score_x);
            buf.set_stringn(score_x, area.y, &score, width, style);
        }
    }
}
