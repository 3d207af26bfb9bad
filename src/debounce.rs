//! Edge detection with a per-button debounce window.
//!
//! Provides [`Debouncer`], which turns raw (already normalized) pressed /
//! released samples into stable [`Edge`] events for each [`ButtonId`].

use crate::time::Millis;
use crate::types::{ButtonId, DEBOUNCE_MS};

/// A stable level change of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Button went down.
    Pressed,
    /// Button came back up.
    Released,
}

/// Debounce state of a single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    raw: bool,
    debounced: bool,
    last_edge: Option<Millis>,
}

impl ButtonState {
    /// Most recent raw sample.
    #[inline]
    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Current stable level.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.debounced
    }

    /// Timestamp of the last accepted edge, if any edge has been accepted yet.
    #[inline]
    pub fn last_edge(&self) -> Option<Millis> {
        self.last_edge
    }

    fn sample(&mut self, raw: bool, now: Millis) -> Option<Edge> {
        self.raw = raw;

        if raw == self.debounced {
            return None;
        }

        // The first edge of a button is never held back.
        if let Some(last) = self.last_edge {
            if now.elapsed_since(last) < DEBOUNCE_MS {
                return None;
            }
        }

        self.debounced = raw;
        self.last_edge = Some(now);

        Some(if raw { Edge::Pressed } else { Edge::Released })
    }
}

/// Debouncer for all three buttons.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    buttons: [ButtonState; ButtonId::ALL.len()],
}

impl Debouncer {
    /// Creates a debouncer with every button released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw sample and returns the accepted edge, if any.
    ///
    /// An edge is emitted only when `raw` differs from the debounced level
    /// and at least [`DEBOUNCE_MS`] have passed since this button's last
    /// accepted edge. `now` must be non-decreasing (modulo wraparound).
    pub fn sample(&mut self, button: ButtonId, raw: bool, now: Millis) -> Option<Edge> {
        self.buttons[button.index()].sample(raw, now)
    }

    /// Returns the debounce state of one button.
    pub fn state(&self, button: ButtonId) -> &ButtonState {
        &self.buttons[button.index()]
    }
}
