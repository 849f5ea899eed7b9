//! Review Kiosk - star-rating review collection for the terminal.
//!
//! This crate provides an embeddable review component and a terminal front
//! end for it. A customer sees a branded splash screen, rates three aspects
//! of their experience on a five-star scale, and is then pointed to the
//! business's public review page.
//!
//! # Overview
//!
//! The [`form::ReviewWidget`] is headless: it owns the collected input, the
//! hover preview and the view state machine, and reports completed
//! submissions through a callback. The [`tui`] module draws it with
//! `ratatui` and maps keyboard and mouse input onto its operations.
//!
//! # Modules
//!
//! - [`review`]: Aspects, ratings and the submitted record
//! - [`form`]: The review component and its view state machine
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types
//! - [`sink`]: JSON Lines recorder for submitted reviews
//! - [`tui`]: Terminal user interface
//! - [`utils`]: Shared utilities (scoped timers)

pub mod config;
pub mod error;
pub mod form;
pub mod review;
pub mod sink;
pub mod tui;
pub mod utils;

pub use config::{Config, ConfigError};
pub use error::{FormError, KioskError, Result, TuiError};
pub use form::{redirect_url_for, ReviewWidget, TimerFired, ViewState, WidgetConfig};
pub use review::{Aspect, AspectMap, HoverState, ReviewInput, ReviewRecord};
pub use sink::{JsonLinesSink, SinkEntry};
pub use utils::ScopedTimer;
