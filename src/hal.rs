//! `embedded-hal` 1.0 adapters for the controller's hardware traits.
//!
//! - [`PwmChannels`]: [`ActuatorSink`] over three PWM channels plus a [`Buzzer`]
//! - [`ActiveLowButtons`]: [`InputSource`] over three pull-up input pins
//!
//! Tone generation has no `embedded-hal` trait, so the buzzer is driven
//! through the small [`ToneOutput`] trait instead.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::controller::{ActuatorSink, InputSource};
use crate::types::{ButtonId, Levels, MAX_LEVEL, Tone};

/// Trait for abstracting a square-wave tone generator (e.g. a PWM timer
/// whose frequency can be changed at runtime).
pub trait ToneOutput {
    /// Starts a continuous tone at the given frequency.
    fn start_tone(&mut self, frequency_hz: u32);

    /// Silences the output.
    fn stop_tone(&mut self);
}

/// Piezo buzzer playing blocking tones.
pub struct Buzzer<T: ToneOutput, W: DelayNs> {
    output: T,
    delay: W,
}

impl<T: ToneOutput, W: DelayNs> Buzzer<T, W> {
    /// Creates a silent buzzer.
    pub fn new(mut output: T, delay: W) -> Self {
        output.stop_tone();
        Self { output, delay }
    }

    /// Sounds `tone` for its full duration, then goes silent.
    pub fn play(&mut self, tone: Tone) {
        if tone.frequency_hz == 0 || tone.duration_ms == 0 {
            return;
        }

        self.output.start_tone(tone.frequency_hz);
        self.delay.delay_ms(tone.duration_ms);
        self.output.stop_tone();
    }

    /// Consumes the buzzer, returning the tone output and delay.
    pub fn release(self) -> (T, W) {
        (self.output, self.delay)
    }
}

/// Three PWM-driven LED channels and a buzzer.
///
/// Channel levels `0..=255` are scaled onto each channel's
/// `max_duty_cycle()`.
pub struct PwmChannels<C0, C1, C2, T, W>
where
    C0: SetDutyCycle,
    C1: SetDutyCycle,
    C2: SetDutyCycle,
    T: ToneOutput,
    W: DelayNs,
{
    channel_0: C0,
    channel_1: C1,
    channel_2: C2,
    buzzer: Buzzer<T, W>,
}

impl<C0, C1, C2, T, W> PwmChannels<C0, C1, C2, T, W>
where
    C0: SetDutyCycle,
    C1: SetDutyCycle,
    C2: SetDutyCycle,
    T: ToneOutput,
    W: DelayNs,
{
    /// Creates the actuator set.
    ///
    /// # Arguments
    /// * `channel_0`..`channel_2` - PWM channels in effect channel order
    /// * `buzzer` - buzzer used for tone requests
    pub fn new(channel_0: C0, channel_1: C1, channel_2: C2, buzzer: Buzzer<T, W>) -> Self {
        Self {
            channel_0,
            channel_1,
            channel_2,
            buzzer,
        }
    }

    /// Consumes the actuator set, returning its parts.
    pub fn release(self) -> (C0, C1, C2, Buzzer<T, W>) {
        (self.channel_0, self.channel_1, self.channel_2, self.buzzer)
    }
}

impl<C0, C1, C2, T, W> ActuatorSink for PwmChannels<C0, C1, C2, T, W>
where
    C0: SetDutyCycle,
    C1: SetDutyCycle,
    C2: SetDutyCycle,
    T: ToneOutput,
    W: DelayNs,
{
    fn set_levels(&mut self, levels: Levels) {
        let [l0, l1, l2] = levels.as_array();
        let max = u16::from(MAX_LEVEL);
        let _ = self.channel_0.set_duty_cycle_fraction(u16::from(l0), max);
        let _ = self.channel_1.set_duty_cycle_fraction(u16::from(l1), max);
        let _ = self.channel_2.set_duty_cycle_fraction(u16::from(l2), max);
    }

    fn tone(&mut self, tone: Tone) {
        self.buzzer.play(tone);
    }
}

/// Three buttons wired to ground with pull-ups: low means pressed.
pub struct ActiveLowButtons<M: InputPin, R: InputPin, A: InputPin> {
    mode: M,
    reset: R,
    action: A,
}

impl<M: InputPin, R: InputPin, A: InputPin> ActiveLowButtons<M, R, A> {
    /// Creates the input source from the three pins.
    pub fn new(mode: M, reset: R, action: A) -> Self {
        Self {
            mode,
            reset,
            action,
        }
    }
}

impl<M: InputPin, R: InputPin, A: InputPin> InputSource for ActiveLowButtons<M, R, A> {
    fn is_pressed(&mut self, button: ButtonId) -> bool {
        // A pin that cannot be read counts as released.
        match button {
            ButtonId::Mode => self.mode.is_low().unwrap_or(false),
            ButtonId::Reset => self.reset.is_low().unwrap_or(false),
            ButtonId::Action => self.action.is_low().unwrap_or(false),
        }
    }
}
