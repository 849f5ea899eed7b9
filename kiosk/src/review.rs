//! Review data model.
//!
//! The three rated dimensions are modelled as the [`Aspect`] enumeration and
//! every per-aspect value lives in an [`AspectMap`], so "for all aspects"
//! checks are a single iteration instead of three hand-written branches.
//!
//! - [`ReviewInput`]: the name and committed ratings collected by the form
//! - [`HoverState`]: provisional preview ratings, presentational only
//! - [`ReviewRecord`]: flat serializable shape handed to sinks
//!
//! # Example
//!
//! ```
//! use review_kiosk::review::{Aspect, ReviewInput};
//!
//! let mut input = ReviewInput::default();
//! assert!(!input.is_complete());
//!
//! for aspect in Aspect::ALL {
//!     input.ratings[aspect] = 4;
//! }
//! assert!(input.is_complete());
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Highest rating a customer can give.
pub const MAX_RATING: u8 = 5;

/// Rating value meaning "not rated yet".
pub const UNRATED: u8 = 0;

/// A rated dimension of the customer's experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    /// Quality of the finished product.
    Quality,
    /// Delivery punctuality.
    Punctuality,
    /// Attention and service.
    Service,
}

impl Aspect {
    /// All aspects in display order.
    pub const ALL: [Aspect; 3] = [Aspect::Quality, Aspect::Punctuality, Aspect::Service];

    /// Stable machine-readable key, used in serialized records.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Aspect::Quality => "quality",
            Aspect::Punctuality => "punctuality",
            Aspect::Service => "service",
        }
    }

    /// Human-readable label shown above the rating control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Aspect::Quality => "Final Product Quality",
            Aspect::Punctuality => "Delivery Punctuality",
            Aspect::Service => "Attention & Service",
        }
    }

    /// Position of the aspect in [`Aspect::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Aspect::Quality => 0,
            Aspect::Punctuality => 1,
            Aspect::Service => 2,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A value for each [`Aspect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AspectMap<T> {
    values: [T; 3],
}

impl<T: Copy> AspectMap<T> {
    /// Creates a map with the same value for every aspect.
    #[must_use]
    pub fn filled(value: T) -> Self {
        Self { values: [value; 3] }
    }

    /// Returns the value for `aspect`.
    #[must_use]
    pub fn get(&self, aspect: Aspect) -> T {
        self.values[aspect.index()]
    }

    /// Replaces the value for `aspect`.
    pub fn set(&mut self, aspect: Aspect, value: T) {
        self.values[aspect.index()] = value;
    }

    /// Iterates over `(aspect, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Aspect, T)> + '_ {
        Aspect::ALL.into_iter().map(move |aspect| (aspect, self.get(aspect)))
    }
}

impl<T> Index<Aspect> for AspectMap<T> {
    type Output = T;

    fn index(&self, aspect: Aspect) -> &T {
        &self.values[aspect.index()]
    }
}

impl<T> IndexMut<Aspect> for AspectMap<T> {
    fn index_mut(&mut self, aspect: Aspect) -> &mut T {
        &mut self.values[aspect.index()]
    }
}

/// Committed ratings, `0` meaning unrated.
pub type Ratings = AspectMap<u8>;

/// Provisional preview ratings under the pointer or cursor.
///
/// Never submitted; `0` means no preview for that aspect.
pub type HoverState = AspectMap<u8>;

/// Data collected by the review form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewInput {
    /// Display name, stored verbatim.
    pub name: String,
    /// Committed rating per aspect.
    pub ratings: Ratings,
}

impl ReviewInput {
    /// Returns the committed rating for `aspect`.
    #[must_use]
    pub fn rating(&self, aspect: Aspect) -> u8 {
        self.ratings.get(aspect)
    }

    /// Returns `true` when every aspect has a nonzero rating.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.ratings.iter().all(|(_, value)| value != UNRATED)
    }

    /// Aspects that still lack a rating, in display order.
    #[must_use]
    pub fn missing_aspects(&self) -> Vec<Aspect> {
        self.ratings
            .iter()
            .filter(|(_, value)| *value == UNRATED)
            .map(|(aspect, _)| aspect)
            .collect()
    }
}

/// Number of stars a rating control displays as filled.
///
/// A hover preview takes visual precedence while present but never replaces
/// the committed value.
#[must_use]
pub fn display_level(rating: u8, hover: u8) -> u8 {
    rating.max(hover)
}

/// Returns `true` if the star at `position` (1-based) renders as filled.
#[must_use]
pub fn is_star_filled(position: u8, rating: u8, hover: u8) -> bool {
    position >= 1 && position <= display_level(rating, hover)
}

/// Flat, serializable snapshot of a submitted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub name: String,
    pub quality: u8,
    pub punctuality: u8,
    pub service: u8,
}

impl From<&ReviewInput> for ReviewRecord {
    fn from(input: &ReviewInput) -> Self {
        Self {
            name: input.name.clone(),
            quality: input.rating(Aspect::Quality),
            punctuality: input.rating(Aspect::Punctuality),
            service: input.rating(Aspect::Service),
        }
    }
}
