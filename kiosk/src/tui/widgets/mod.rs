//! Reusable TUI widget components for the review kiosk.
//!
//! Each widget implements ratatui's [`Widget`](ratatui::widgets::Widget)
//! trait and borrows everything it draws; state lives in the review
//! component and the [`App`](crate::tui::App).
//!
//! # Widget Catalog
//!
//! ## Branding
//! - [`logo`]: Brand logo for the splash screen
//!
//! ## Form
//! - [`star_rating`]: Five-star control for one aspect
//! - [`review_form`]: Name input, rating rows and submit button, plus [`FormLayout`]
//!
//! ## Feedback
//! - [`thank_you`]: Confirmation with the review link
//! - [`notice`]: Blocking validation alert

pub mod logo;
pub mod notice;
pub mod review_form;
pub mod star_rating;
pub mod thank_you;

pub use logo::{logo_height, LogoVariant, LogoWidget, COMPACT_LOGO_HEIGHT, FULL_LOGO_HEIGHT, TEXT_LOGO_HEIGHT};
pub use notice::NoticeWidget;
pub use review_form::{FormLayout, ReviewFormWidget, FORM_CONTENT_HEIGHT};
pub use star_rating::{star_at_offset, StarRatingWidget, STAR_ROW_WIDTH, STAR_SPACING};
pub use thank_you::ThankYouWidget;
