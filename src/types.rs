//! Core types and fixed timing constants.

/// Minimum time between accepted edges of one button, in milliseconds.
pub const DEBOUNCE_MS: u32 = 50;

/// Duration of each phase of the alternating blink, in milliseconds.
pub const BLINK_GAP: u32 = 400;

/// Hold duration at which the action button counts as a long press, in milliseconds.
pub const LONG_PRESS_MS: u32 = 1500;

/// Period of one complete fade cycle, in milliseconds.
pub const FADE_PERIOD: u32 = 2000;

/// Number of independent LED channels.
pub const CHANNEL_COUNT: usize = 3;

/// Full-scale channel intensity.
pub const MAX_LEVEL: u8 = 255;

/// Target delay between controller ticks, in milliseconds.
pub const TICK_MS: u32 = 8;

/// Poll interval of the idle wait entered after a fatal start-up failure.
pub const HALT_POLL_MS: u32 = 100;

/// Tone played when a long press is recognised.
pub const LONG_PRESS_TONE: Tone = Tone::new(2500, 300);

/// Lighting effect selected by the mode button.
///
/// Modes form a cycle: the successor of [`EffectMode::Fade`] is [`EffectMode::Off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectMode {
    /// All channels dark.
    #[default]
    Off,

    /// Round-robin single-channel blink.
    Alternate,

    /// All channels at full intensity.
    AllOn,

    /// Three channels cross-fading 120° out of phase.
    Fade,
}

impl EffectMode {
    /// Every mode in cycle order.
    pub const ALL: [EffectMode; 4] = [
        EffectMode::Off,
        EffectMode::Alternate,
        EffectMode::AllOn,
        EffectMode::Fade,
    ];

    /// Returns the next mode in the cycle.
    pub const fn next(self) -> Self {
        match self {
            EffectMode::Off => EffectMode::Alternate,
            EffectMode::Alternate => EffectMode::AllOn,
            EffectMode::AllOn => EffectMode::Fade,
            EffectMode::Fade => EffectMode::Off,
        }
    }

    /// Short human-readable name, as shown on the display.
    pub const fn label(self) -> &'static str {
        match self {
            EffectMode::Off => "OFF",
            EffectMode::Alternate => "Alternate",
            EffectMode::AllOn => "All ON",
            EffectMode::Fade => "Fade",
        }
    }
}

impl core::fmt::Display for EffectMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical buttons sampled by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Cycles to the next effect.
    Mode,

    /// Forces the effect back to [`EffectMode::Off`].
    Reset,

    /// Short press toggles the manual override, long press beeps.
    Action,
}

impl ButtonId {
    /// Every button, in sampling order.
    pub const ALL: [ButtonId; 3] = [ButtonId::Mode, ButtonId::Reset, ButtonId::Action];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            ButtonId::Mode => 0,
            ButtonId::Reset => 1,
            ButtonId::Action => 2,
        }
    }
}

/// Intensities of the three LED channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels(pub [u8; CHANNEL_COUNT]);

impl Levels {
    /// All channels dark.
    pub const OFF: Levels = Levels([0; CHANNEL_COUNT]);

    /// All channels at full intensity.
    pub const FULL: Levels = Levels([MAX_LEVEL; CHANNEL_COUNT]);

    /// Exactly one channel at full intensity, the others dark.
    ///
    /// `index` is taken modulo [`CHANNEL_COUNT`].
    pub fn single(index: usize) -> Self {
        let mut levels = [0; CHANNEL_COUNT];
        levels[index % CHANNEL_COUNT] = MAX_LEVEL;
        Levels(levels)
    }

    /// Returns the intensity of one channel.
    ///
    /// # Panics
    /// Panics if `index` is not below [`CHANNEL_COUNT`].
    #[inline]
    pub fn channel(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Returns the channel intensities as an array.
    #[inline]
    pub const fn as_array(&self) -> [u8; CHANNEL_COUNT] {
        self.0
    }
}

/// A blocking buzzer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    /// Tone frequency in hertz.
    pub frequency_hz: u32,

    /// How long the tone sounds, in milliseconds.
    pub duration_ms: u32,
}

impl Tone {
    /// Creates a new tone request.
    #[inline]
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Everything written to the actuators in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorFrame {
    /// Channel intensities.
    pub levels: Levels,

    /// Optional tone request.
    pub tone: Option<Tone>,
}
