//! Short / long press classification for the action button.
//!
//! [`PressClassifier`] consumes debounced [`Edge`]s plus the current time on
//! every tick and reports at most one [`PressEvent`] per tick.
//!
//! # State machine
//!
//! ```text
//! Idle --Pressed--> Pressed(start) --held >= LONG_PRESS_MS--> LongSignaled
//!                        |                                         |
//!                        +--Released (< LONG_PRESS_MS)--> Idle     +--Released--> Idle
//!                              emits ShortPress                       emits nothing
//! ```
//!
//! A session emits either one `LongPress` or one `ShortPress`, never both.
//! A release at or past the threshold that no tick saw coming emits nothing:
//! a long press is only reported while the button is still down.

use crate::debounce::Edge;
use crate::time::Millis;
use crate::types::LONG_PRESS_MS;

/// Classified gesture of the action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEvent {
    /// Released before the long-press threshold.
    ShortPress,
    /// Held for at least [`LONG_PRESS_MS`].
    LongPress,
}

/// State of the current press, if the button is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressSession {
    active: bool,
    start: Millis,
    long_signaled: bool,
}

impl PressSession {
    /// True while the button is held.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// When the current press began. Meaningless while inactive.
    #[inline]
    pub fn start(&self) -> Millis {
        self.start
    }

    /// True once the current press has been reported as a long press.
    #[inline]
    pub fn long_signaled(&self) -> bool {
        self.long_signaled
    }

    /// How long the current press has lasted at `now`.
    #[inline]
    pub fn held_for(&self, now: Millis) -> Option<u32> {
        self.active.then(|| now.elapsed_since(self.start))
    }
}

/// Tracks one button's hold duration and classifies each press.
#[derive(Debug, Clone, Default)]
pub struct PressClassifier {
    session: PressSession,
}

impl PressClassifier {
    /// Creates an idle classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the classifier by one tick.
    ///
    /// `edge` is the debounced edge observed this tick, if any. Must be
    /// called every tick, including ticks without an edge, so that long
    /// presses are recognised while the button is still held.
    pub fn update(&mut self, edge: Option<Edge>, now: Millis) -> Option<PressEvent> {
        match edge {
            Some(Edge::Pressed) if !self.session.active => {
                self.session = PressSession {
                    active: true,
                    start: now,
                    long_signaled: false,
                };
                None
            }
            Some(Edge::Released) if self.session.active => {
                let duration = now.elapsed_since(self.session.start);
                let long_signaled = self.session.long_signaled;
                self.session = PressSession::default();

                if !long_signaled && duration < LONG_PRESS_MS {
                    Some(PressEvent::ShortPress)
                } else {
                    None
                }
            }
            _ => self.check_long_press(now),
        }
    }

    fn check_long_press(&mut self, now: Millis) -> Option<PressEvent> {
        let session = &mut self.session;
        if !session.active || session.long_signaled {
            return None;
        }

        if now.elapsed_since(session.start) >= LONG_PRESS_MS {
            session.long_signaled = true;
            return Some(PressEvent::LongPress);
        }

        None
    }

    /// Returns the current press session.
    pub fn session(&self) -> &PressSession {
        &self.session
    }
}
