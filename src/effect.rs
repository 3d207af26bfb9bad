//! Effect engine: per-mode clocks, manual override and frame rendering.
//!
//! Rendering is a pure function of the time elapsed since the active
//! effect's [`EffectClock`] anchor, so the output never drifts with tick
//! jitter and is identical whenever an effect is re-entered.

use core::f32::consts::PI;

use crate::status::Status;
use crate::time::Millis;
use crate::types::{BLINK_GAP, CHANNEL_COUNT, EffectMode, FADE_PERIOD, Levels, MAX_LEVEL};

/// Phase offsets of the three fade channels, as fractions of a period.
const FADE_OFFSETS: [f32; CHANNEL_COUNT] = [0.0, 1.0 / 3.0, 2.0 / 3.0];

/// Timestamp anchor of one effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EffectClock {
    anchor: Millis,
}

impl EffectClock {
    /// Re-anchors the clock at `now`.
    #[inline]
    pub fn reset(&mut self, now: Millis) {
        self.anchor = now;
    }

    /// Milliseconds since the last reset.
    #[inline]
    pub fn elapsed(&self, now: Millis) -> u32 {
        now.elapsed_since(self.anchor)
    }

    /// The anchor timestamp.
    #[inline]
    pub fn anchor(&self) -> Millis {
        self.anchor
    }
}

/// Forced on/off state toggled by a short press of the action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ManualOverride {
    active: bool,
    led_on: bool,
}

impl ManualOverride {
    /// True while effect output is suppressed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The forced LED state. Retained while inactive.
    #[inline]
    pub fn led_on(&self) -> bool {
        self.led_on
    }

    /// Levels forced onto every channel.
    #[inline]
    pub fn levels(&self) -> Levels {
        if self.led_on { Levels::FULL } else { Levels::OFF }
    }

    fn toggle(&mut self) {
        self.active = true;
        self.led_on = !self.led_on;
    }

    fn clear(&mut self) {
        self.active = false;
    }
}

/// Result of activating an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Activation {
    /// The effect that is now active.
    pub mode: EffectMode,

    /// Status text announcing the effect.
    pub status: Status,

    /// Static levels written on entry. `None` for animated effects, whose
    /// first frame comes from [`EffectEngine::render`].
    pub entry: Option<Levels>,
}

/// Computes actuator levels for every effect.
#[derive(Debug, Clone, Default)]
pub struct EffectEngine {
    clocks: [EffectClock; EffectMode::ALL.len()],
    manual: ManualOverride,
}

impl EffectEngine {
    /// Creates an engine with all clocks anchored at zero and no override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `mode` the active effect.
    ///
    /// Re-anchors the mode's clock at `now` and clears the manual override.
    pub fn activate(&mut self, mode: EffectMode, now: Millis) -> Activation {
        self.clock_mut(mode).reset(now);
        self.manual.clear();

        let entry = match mode {
            EffectMode::Off => Some(Levels::OFF),
            EffectMode::AllOn => Some(Levels::FULL),
            EffectMode::Alternate | EffectMode::Fade => None,
        };

        Activation {
            mode,
            status: Status::Mode(mode),
            entry,
        }
    }

    /// Renders the levels of `mode` at `now`.
    ///
    /// Returns `None` for static effects, whose levels were set by
    /// [`activate`](Self::activate).
    pub fn render(&self, mode: EffectMode, now: Millis) -> Option<Levels> {
        let elapsed = self.clock(mode).elapsed(now);
        match mode {
            EffectMode::Off | EffectMode::AllOn => None,
            EffectMode::Alternate => Some(alternate_levels(elapsed)),
            EffectMode::Fade => Some(fade_levels(elapsed)),
        }
    }

    /// Toggles the manual override and returns the forced levels.
    pub fn toggle_override(&mut self) -> Levels {
        self.manual.toggle();
        self.manual.levels()
    }

    /// Current manual override.
    pub fn manual_override(&self) -> &ManualOverride {
        &self.manual
    }

    /// Clock of one effect.
    pub fn clock(&self, mode: EffectMode) -> &EffectClock {
        &self.clocks[mode_index(mode)]
    }

    fn clock_mut(&mut self, mode: EffectMode) -> &mut EffectClock {
        &mut self.clocks[mode_index(mode)]
    }
}

const fn mode_index(mode: EffectMode) -> usize {
    match mode {
        EffectMode::Off => 0,
        EffectMode::Alternate => 1,
        EffectMode::AllOn => 2,
        EffectMode::Fade => 3,
    }
}

/// Round-robin blink.
///
/// Time is divided into [`BLINK_GAP`] slots. Even slots are dark; odd slots
/// light a single channel, advancing 0, 1, 2, 0, ... on each lit slot.
pub fn alternate_levels(elapsed: u32) -> Levels {
    let slot = elapsed / BLINK_GAP;
    if slot % 2 == 0 {
        return Levels::OFF;
    }

    let lit = (slot / 2) as usize % CHANNEL_COUNT;
    Levels::single(lit)
}

/// Three-phase sine fade.
///
/// Each channel is `255 * (sin(2π(t + offset)) + 1) / 2` truncated toward
/// zero, where `t` is the position within the [`FADE_PERIOD`].
pub fn fade_levels(elapsed: u32) -> Levels {
    let t = (elapsed % FADE_PERIOD) as f32 / FADE_PERIOD as f32;

    let mut levels = [0u8; CHANNEL_COUNT];
    for (level, offset) in levels.iter_mut().zip(FADE_OFFSETS) {
        let wave = (libm::sinf(2.0 * PI * (t + offset)) + 1.0) / 2.0;
        // `as` truncates and saturates into 0..=255.
        *level = (wave * MAX_LEVEL as f32) as u8;
    }

    Levels(levels)
}
