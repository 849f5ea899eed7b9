//! The review component: view state machine, rating form and submission.
//!
//! [`ReviewWidget`] is the headless core of the kiosk. It owns the collected
//! [`ReviewInput`], the [`HoverState`] preview and the current [`ViewState`],
//! and exposes the operations a front end maps user input onto. Rendering
//! lives in [`crate::tui`]; nothing here touches the terminal.
//!
//! # State Machine
//!
//! ```text
//! +--------+  splash delay  +------------+  submit + delay  +----------+
//! | Splash | -------------> | FormActive | ---------------> | ThankYou |
//! +--------+                +------------+                  +----------+
//!                                 ^                               |
//!                                 |            reset()            |
//!                                 +-------------------------------+
//! ```
//!
//! # Timers
//!
//! Both delays run as [`ScopedTimer`]s owned by the widget. Their completions
//! arrive on the `timer_tx` channel passed to [`ReviewWidget::new`] and must be
//! fed back through [`ReviewWidget::handle_timer`]. Dropping the widget aborts
//! any pending timer, so no state changes after teardown.
//!
//! # Example
//!
//! ```no_run
//! use review_kiosk::form::{ReviewWidget, WidgetConfig};
//! use review_kiosk::review::Aspect;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (timer_tx, mut timer_rx) = mpsc::channel(8);
//!     let config = WidgetConfig { splash: None, ..WidgetConfig::default() };
//!     let mut widget = ReviewWidget::new(config, timer_tx)
//!         .with_on_submit(|review| println!("got {review:?}"));
//!
//!     for aspect in Aspect::ALL {
//!         widget.set_rating(aspect, 5).unwrap();
//!     }
//!     widget.submit().unwrap();
//!
//!     let fired = timer_rx.recv().await.unwrap();
//!     widget.handle_timer(fired);
//!     assert!(widget.is_thank_you());
//! }
//! ```

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::FormError;
use crate::review::{self, Aspect, HoverState, ReviewInput, MAX_RATING, UNRATED};
use crate::utils::ScopedTimer;

/// Default splash duration in milliseconds.
pub const DEFAULT_SPLASH_MS: u64 = 1800;

/// Default simulated submission delay in milliseconds.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;

/// Place identifier used when the embedder does not supply one.
pub const DEFAULT_PLACE_ID: &str = "PLACE_ID";

/// Review page the thank-you view links to; the place id is appended.
pub const REVIEW_URL_PREFIX: &str = "https://search.google.com/local/writereview?placeid=";

/// Builds the review-platform URL for `place_id`.
///
/// # Example
///
/// ```
/// use review_kiosk::form::redirect_url_for;
///
/// assert_eq!(
///     redirect_url_for("abc123"),
///     "https://search.google.com/local/writereview?placeid=abc123"
/// );
/// ```
#[must_use]
pub fn redirect_url_for(place_id: &str) -> String {
    format!("{REVIEW_URL_PREFIX}{place_id}")
}

/// The mutually exclusive phase the widget is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Branding screen shown for a fixed delay after mount.
    Splash,
    /// The rating form accepts input.
    FormActive,
    /// Confirmation with the redirect link.
    ThankYou,
}

/// Completion of one of the widget's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerFired {
    /// The splash delay elapsed.
    Splash,
    /// The submission delay for the given ticket elapsed.
    Submission(u64),
}

/// Settings supplied by the embedding application.
///
/// Constant for the widget's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Opaque review-platform place identifier.
    pub place_id: String,
    /// Splash duration, or `None` to start directly on the form.
    pub splash: Option<Duration>,
    /// Simulated submission delay.
    pub submit_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            place_id: DEFAULT_PLACE_ID.to_string(),
            splash: Some(Duration::from_millis(DEFAULT_SPLASH_MS)),
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
        }
    }
}

/// Callback invoked once per completed submission.
pub type SubmitCallback = Box<dyn FnMut(&ReviewInput) + Send>;

/// A submission waiting for its delay to elapse.
#[derive(Debug)]
struct InFlight {
    ticket: u64,
    snapshot: ReviewInput,
    timer: ScopedTimer,
}

/// The review-collection component.
pub struct ReviewWidget {
    config: WidgetConfig,
    view: ViewState,
    input: ReviewInput,
    hover: HoverState,
    notice: Option<FormError>,
    in_flight: Option<InFlight>,
    splash_timer: Option<ScopedTimer>,
    next_ticket: u64,
    on_submit: Option<SubmitCallback>,
    timer_tx: mpsc::Sender<TimerFired>,
}

impl ReviewWidget {
    /// Mounts a new widget.
    ///
    /// Starts on [`ViewState::Splash`] with its timer running when a splash
    /// duration is configured, otherwise directly on [`ViewState::FormActive`].
    /// Must be called from within a tokio runtime when the splash is enabled.
    #[must_use]
    pub fn new(config: WidgetConfig, timer_tx: mpsc::Sender<TimerFired>) -> Self {
        let (view, splash_timer) = match config.splash {
            Some(delay) => {
                debug!(delay_ms = delay.as_millis() as u64, "Splash gate started");
                (
                    ViewState::Splash,
                    Some(ScopedTimer::after(delay, timer_tx.clone(), TimerFired::Splash)),
                )
            }
            None => (ViewState::FormActive, None),
        };

        Self {
            config,
            view,
            input: ReviewInput::default(),
            hover: HoverState::default(),
            notice: None,
            in_flight: None,
            splash_timer,
            next_ticket: 0,
            on_submit: None,
            timer_tx,
        }
    }

    /// Sets the callback invoked with each completed submission.
    #[must_use]
    pub fn with_on_submit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ReviewInput) + Send + 'static,
    {
        self.on_submit = Some(Box::new(callback));
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current view.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn is_splash(&self) -> bool {
        self.view == ViewState::Splash
    }

    #[must_use]
    pub fn is_form(&self) -> bool {
        self.view == ViewState::FormActive
    }

    #[must_use]
    pub fn is_thank_you(&self) -> bool {
        self.view == ViewState::ThankYou
    }

    /// The configuration the widget was mounted with.
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Collected input.
    #[must_use]
    pub fn input(&self) -> &ReviewInput {
        &self.input
    }

    /// Hover preview values.
    #[must_use]
    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Committed rating for `aspect`.
    #[must_use]
    pub fn rating(&self, aspect: Aspect) -> u8 {
        self.input.rating(aspect)
    }

    /// Number of stars rendered as filled for `aspect`.
    #[must_use]
    pub fn display_level(&self, aspect: Aspect) -> u8 {
        review::display_level(self.input.rating(aspect), self.hover.get(aspect))
    }

    /// Returns `true` if star `position` (1-based) of `aspect` is filled.
    #[must_use]
    pub fn is_star_filled(&self, aspect: Aspect, position: u8) -> bool {
        review::is_star_filled(position, self.input.rating(aspect), self.hover.get(aspect))
    }

    /// The alert waiting to be acknowledged, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&FormError> {
        self.notice.as_ref()
    }

    /// Returns `true` while a submission delay is running.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns `true` when the form accepts edits.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.view == ViewState::FormActive && self.in_flight.is_none()
    }

    /// Link to the review platform for the configured place.
    #[must_use]
    pub fn redirect_url(&self) -> String {
        redirect_url_for(&self.config.place_id)
    }

    // -------------------------------------------------------------------------
    // Form operations
    // -------------------------------------------------------------------------

    /// Replaces the name verbatim.
    ///
    /// # Errors
    ///
    /// [`FormError::Unavailable`] outside the form view and
    /// [`FormError::Locked`] while submitting.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.input.name = name.into();
        Ok(())
    }

    /// Commits `value` as the rating for `aspect`.
    ///
    /// # Errors
    ///
    /// [`FormError::RatingOutOfRange`] unless `value` is in `1..=5`, plus the
    /// errors of [`ReviewWidget::set_name`].
    pub fn set_rating(&mut self, aspect: Aspect, value: u8) -> Result<(), FormError> {
        self.ensure_editable()?;
        if !(1..=MAX_RATING).contains(&value) {
            return Err(FormError::RatingOutOfRange(value));
        }
        self.input.ratings.set(aspect, value);
        debug!(%aspect, value, "Rating set");
        Ok(())
    }

    /// Sets the preview value for `aspect`; `0` clears it.
    ///
    /// # Errors
    ///
    /// [`FormError::RatingOutOfRange`] when `value` exceeds 5, plus the
    /// errors of [`ReviewWidget::set_name`].
    pub fn set_hover(&mut self, aspect: Aspect, value: u8) -> Result<(), FormError> {
        self.ensure_editable()?;
        if value > MAX_RATING {
            return Err(FormError::RatingOutOfRange(value));
        }
        self.hover.set(aspect, value);
        Ok(())
    }

    /// Clears the preview value for `aspect`. Always allowed.
    pub fn clear_hover(&mut self, aspect: Aspect) {
        self.hover.set(aspect, UNRATED);
    }

    /// Validates the input and starts the simulated submission.
    ///
    /// On success the input is snapshotted and the submission delay starts;
    /// once it elapses [`ReviewWidget::handle_timer`] invokes the callback
    /// with that snapshot and switches to [`ViewState::ThankYou`].
    ///
    /// # Errors
    ///
    /// - [`FormError::IncompleteRatings`] if any aspect is unrated. The error
    ///   also becomes the active [`notice`](ReviewWidget::notice) and the form
    ///   is left untouched.
    /// - [`FormError::SubmissionInFlight`] if a submission is already running.
    /// - [`FormError::Unavailable`] outside the form view.
    pub fn submit(&mut self) -> Result<(), FormError> {
        if self.view != ViewState::FormActive {
            return Err(FormError::Unavailable(self.view));
        }
        if self.in_flight.is_some() {
            debug!("Submit ignored, submission already in flight");
            return Err(FormError::SubmissionInFlight);
        }
        if !self.input.is_complete() {
            let err = FormError::IncompleteRatings {
                missing: self.input.missing_aspects(),
            };
            debug!(error = %err, "Submission rejected");
            self.notice = Some(err.clone());
            return Err(err);
        }

        self.notice = None;
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let timer = ScopedTimer::after(
            self.config.submit_delay,
            self.timer_tx.clone(),
            TimerFired::Submission(ticket),
        );
        info!(
            ticket,
            delay_ms = timer.delay().as_millis() as u64,
            "Submission started"
        );
        self.in_flight = Some(InFlight {
            ticket,
            snapshot: self.input.clone(),
            timer,
        });
        Ok(())
    }

    /// Acknowledges the active notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Applies a timer completion. Returns `true` if the state changed.
    ///
    /// Completions that no longer match the widget's state (a splash timer
    /// after a reset, a submission ticket that was cancelled) are ignored.
    pub fn handle_timer(&mut self, fired: TimerFired) -> bool {
        match fired {
            TimerFired::Splash => {
                if self.view != ViewState::Splash {
                    debug!(view = ?self.view, "Ignoring stale splash timer");
                    return false;
                }
                self.splash_timer = None;
                self.view = ViewState::FormActive;
                debug!("Splash dismissed");
                true
            }
            TimerFired::Submission(ticket) => match self.in_flight.take() {
                Some(pending) if pending.ticket == ticket => {
                    if let Some(callback) = self.on_submit.as_mut() {
                        callback(&pending.snapshot);
                    }
                    self.view = ViewState::ThankYou;
                    info!(ticket, "Submission completed");
                    true
                }
                other => {
                    self.in_flight = other;
                    debug!(ticket, "Ignoring stale submission timer");
                    false
                }
            },
        }
    }

    /// Returns to an empty form.
    ///
    /// Clears the input, hover preview and notice, cancels any pending timer,
    /// and switches to [`ViewState::FormActive`]. Always succeeds.
    pub fn reset(&mut self) {
        self.input = ReviewInput::default();
        self.hover = HoverState::default();
        self.notice = None;
        if let Some(pending) = self.in_flight.take() {
            debug!(ticket = pending.ticket, "Submission cancelled by reset");
            pending.timer.cancel();
        }
        if let Some(timer) = self.splash_timer.take() {
            timer.cancel();
        }
        self.view = ViewState::FormActive;
        debug!("Form reset");
    }

    /// Returns `true` while a splash or submission delay is still running.
    ///
    /// Becomes `false` as soon as the delay elapses, even if the completion
    /// has not been passed to [`ReviewWidget::handle_timer`] yet.
    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        let splash = self.splash_timer.as_ref();
        let submission = self.in_flight.as_ref().map(|pending| &pending.timer);
        splash
            .into_iter()
            .chain(submission)
            .any(|timer| !timer.is_finished())
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if self.view != ViewState::FormActive {
            return Err(FormError::Unavailable(self.view));
        }
        if self.in_flight.is_some() {
            return Err(FormError::Locked);
        }
        Ok(())
    }
}

impl fmt::Debug for ReviewWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewWidget")
            .field("config", &self.config)
            .field("view", &self.view)
            .field("input", &self.input)
            .field("hover", &self.hover)
            .field("notice", &self.notice)
            .field("submitting", &self.in_flight.is_some())
            .field("timer_pending", &self.has_pending_timer())
            .field("has_callback", &self.on_submit.is_some())
            .finish()
    }
}
