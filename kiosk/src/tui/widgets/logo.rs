//! Brand logo widget shown on the splash screen.
//!
//! The logo adapts to the available width:
//!
//! - **Full**: The brand in letter-spaced capitals inside a five-line frame
//! - **Compact**: Single line with a star on each side
//! - **Text**: Plain brand name
//!
//! Unicode and ASCII symbol sets render different frame characters.
//!
//! # Example
//!
//! ```ignore
//! use review_kiosk::tui::widgets::LogoWidget;
//! use review_kiosk::tui::app::{Theme, Symbols};
//!
//! let theme = Theme::default();
//! let symbols = Symbols::detect();
//!
//! let widget = LogoWidget::new("Pietra Fina", &theme, &symbols);
//! frame.render_widget(widget, logo_area);
//! ```

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::tui::app::{Symbols, Theme, UNICODE_SYMBOLS};

// =============================================================================
// Layout Constants
// =============================================================================

/// Height of the framed logo.
pub const FULL_LOGO_HEIGHT: u16 = 5;

/// Height of the compact logo.
pub const COMPACT_LOGO_HEIGHT: u16 = 1;

/// Height of the text-only logo.
pub const TEXT_LOGO_HEIGHT: u16 = 1;

/// Blank columns between the frame and the star on each side.
const FRAME_PADDING: usize = 3;

struct FrameChars {
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
    horizontal: &'static str,
    vertical: &'static str,
}

const UNICODE_FRAME: FrameChars = FrameChars {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    horizontal: "─",
    vertical: "│",
};

const ASCII_FRAME: FrameChars = FrameChars {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    horizontal: "-",
    vertical: "|",
};

// =============================================================================
// Logo Variant
// =============================================================================

/// The variant of logo to render based on available space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoVariant {
    /// Framed, letter-spaced logo.
    Full,
    /// Single-line logo with stars.
    Compact,
    /// Plain text.
    Text,
}

impl LogoVariant {
    /// The most detailed variant of `brand` that fits in `width` columns.
    ///
    /// # Example
    ///
    /// ```
    /// use review_kiosk::tui::widgets::LogoVariant;
    ///
    /// assert_eq!(LogoVariant::for_width("Acme", 80), LogoVariant::Full);
    /// assert_eq!(LogoVariant::for_width("Acme", 10), LogoVariant::Compact);
    /// assert_eq!(LogoVariant::for_width("Acme", 5), LogoVariant::Text);
    /// ```
    #[must_use]
    pub fn for_width(brand: &str, width: u16) -> Self {
        let width = usize::from(width);
        if width >= full_width(brand) {
            LogoVariant::Full
        } else if width >= compact_width(brand) {
            LogoVariant::Compact
        } else {
            LogoVariant::Text
        }
    }

    /// Returns the height required for this logo variant.
    #[must_use]
    pub fn height(self) -> u16 {
        match self {
            LogoVariant::Full => FULL_LOGO_HEIGHT,
            LogoVariant::Compact => COMPACT_LOGO_HEIGHT,
            LogoVariant::Text => TEXT_LOGO_HEIGHT,
        }
    }
}

fn spaced_caps(brand: &str) -> String {
    brand
        .chars()
        .flat_map(char::to_uppercase)
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Width of the framed line: frame, padding, star, space, text, space, star, padding, frame.
fn full_width(brand: &str) -> usize {
    spaced_caps(brand).chars().count() + 2 * (FRAME_PADDING + 2) + 2
}

fn compact_width(brand: &str) -> usize {
    brand.chars().count() + 4
}

// =============================================================================
// LogoWidget
// =============================================================================

/// Widget for displaying the brand logo.
#[derive(Debug)]
pub struct LogoWidget<'a> {
    brand: &'a str,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> LogoWidget<'a> {
    /// Creates a new `LogoWidget` for `brand`.
    #[must_use]
    pub fn new(brand: &'a str, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            brand,
            theme,
            symbols,
        }
    }

    fn is_unicode(&self) -> bool {
        self.symbols.star_filled == UNICODE_SYMBOLS.star_filled
    }

    fn full_logo_lines(&self) -> Vec<String> {
        let frame = if self.is_unicode() {
            &UNICODE_FRAME
        } else {
            &ASCII_FRAME
        };
        let star = self.symbols.star_filled;
        let pad = " ".repeat(FRAME_PADDING);
        let middle = format!("{pad}{star} {} {star}{pad}", spaced_caps(self.brand));
        let inner = middle.chars().count();

        vec![
            format!("{}{}{}", frame.top_left, frame.horizontal.repeat(inner), frame.top_right),
            format!("{}{}{}", frame.vertical, " ".repeat(inner), frame.vertical),
            format!("{}{middle}{}", frame.vertical, frame.vertical),
            format!("{}{}{}", frame.vertical, " ".repeat(inner), frame.vertical),
            format!(
                "{}{}{}",
                frame.bottom_left,
                frame.horizontal.repeat(inner),
                frame.bottom_right
            ),
        ]
    }

    fn render_lines(&self, lines: &[String], area: Rect, buf: &mut Buffer) {
        let height = lines.len() as u16;
        let start_y = area.y + area.height.saturating_sub(height) / 2;

        for (i, line) in lines.iter().enumerate() {
            let y = start_y + i as u16;
            if y >= area.bottom() {
                break;
            }

            let line_width = line.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(line_width) / 2;
            let available_width = area.right().saturating_sub(x) as usize;
            let display_line: String = line.chars().take(available_width).collect();

            buf.set_string(x, y, &display_line, self.theme.title);
        }
    }
}

impl Widget for LogoWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut variant = LogoVariant::for_width(self.brand, area.width);
        if variant == LogoVariant::Full && area.height < FULL_LOGO_HEIGHT {
            variant = LogoVariant::Compact;
        }

        let lines = match variant {
            LogoVariant::Full => self.full_logo_lines(),
            LogoVariant::Compact => {
                let star = self.symbols.star_filled;
                vec![format!("{star} {} {star}", self.brand)]
            }
            LogoVariant::Text => vec![self.brand.to_string()],
        };
        self.render_lines(&lines, area, buf);
    }
}

/// Height the logo for `brand` needs at `width` columns.
#[must_use]
pub fn logo_height(brand: &str, width: u16) -> u16 {
    LogoVariant::for_width(brand, width).height()
}
