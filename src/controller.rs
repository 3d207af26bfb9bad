//! The per-tick control loop tying inputs, effects and feedback together.
//!
//! Provides [`Controller`], which owns every piece of runtime state, and the
//! [`ActuatorSink`] / [`InputSource`] traits for hardware abstraction.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::debounce::{Debouncer, Edge};
use crate::effect::{EffectEngine, ManualOverride};
use crate::press::{PressClassifier, PressEvent};
use crate::status::{DisplaySink, Status, StatusReporter};
use crate::time::{Millis, TimeSource};
use crate::types::{
    ActuatorFrame, ButtonId, EffectMode, HALT_POLL_MS, LONG_PRESS_TONE, Levels, TICK_MS, Tone,
};

/// Maximum number of events a single tick can produce.
pub const MAX_EVENTS_PER_TICK: usize = 4;

/// Trait for abstracting the LED channels and the buzzer.
pub trait ActuatorSink {
    /// Sets the intensity of all three channels.
    ///
    /// Implementations should scale the 0-255 values to their hardware's
    /// native format (e.g., PWM duty cycles). This method cannot fail.
    fn set_levels(&mut self, levels: Levels);

    /// Sounds a tone, blocking for its full duration, then silences the buzzer.
    fn tone(&mut self, tone: Tone);
}

/// Trait for abstracting the three buttons.
pub trait InputSource {
    /// Returns true while `button` is held down.
    ///
    /// The level must already be normalized: active-low wiring is the
    /// implementation's concern.
    fn is_pressed(&mut self, button: ButtonId) -> bool;
}

/// Something the controller reacted to during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// The mode button selected a new effect.
    ModeChanged(EffectMode),
    /// The reset button forced the effect off.
    Reset,
    /// The action button was held past the long-press threshold.
    LongPress,
    /// The action button toggled the manual override.
    ShortPress {
        /// The forced LED state after the toggle.
        led_on: bool,
    },
}

/// Outcome of one [`Controller::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Events handled this tick, in handling order.
    pub events: Vec<ControllerEvent, MAX_EVENTS_PER_TICK>,

    /// What the actuators were driven with at the end of the tick.
    pub frame: ActuatorFrame,
}

/// Errors that can occur while starting the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError<E> {
    /// The display could not be initialized.
    Display(E),
}

impl<E> core::fmt::Display for StartError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StartError::Display(_) => write!(f, "display initialization failed"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for StartError<E> {}

/// Owns all runtime state and runs one control step per tick.
///
/// # Type Parameters
/// * `A` - LED channel and buzzer implementation
/// * `D` - Status display implementation
pub struct Controller<A: ActuatorSink, D: DisplaySink> {
    actuators: A,
    reporter: StatusReporter<D>,
    debouncer: Debouncer,
    classifier: PressClassifier,
    engine: EffectEngine,
    mode: EffectMode,
    levels: Levels,
}

impl<A: ActuatorSink, D: DisplaySink> Controller<A, D> {
    /// Creates a controller in [`EffectMode::Off`] with all channels dark.
    ///
    /// The display is not touched until [`start`](Self::start).
    pub fn new(mut actuators: A, display: D) -> Self {
        actuators.set_levels(Levels::OFF);

        Self {
            actuators,
            reporter: StatusReporter::new(display),
            debouncer: Debouncer::new(),
            classifier: PressClassifier::new(),
            engine: EffectEngine::new(),
            mode: EffectMode::Off,
            levels: Levels::OFF,
        }
    }

    /// Initializes the display, announces readiness and activates
    /// [`EffectMode::Off`].
    ///
    /// # Errors
    /// * `StartError::Display` - the display failed to initialize. The
    ///   caller should not keep running without status feedback; see [`halt`].
    pub fn start(&mut self, now: Millis) -> Result<(), StartError<D::Error>> {
        self.reporter.init().map_err(StartError::Display)?;

        self.reporter.report(Status::Ready);
        self.activate(EffectMode::Off, now);

        #[cfg(feature = "defmt")]
        defmt::info!("controller started");

        Ok(())
    }

    /// Runs one control step.
    ///
    /// 1. Samples and debounces all three buttons
    /// 2. Advances the effect on a mode press
    /// 3. Forces [`EffectMode::Off`] on a reset press
    /// 4. Classifies the action button and handles short / long presses
    /// 5. Writes the override levels or the active effect's rendered levels
    ///
    /// Mode and reset act on press edges only. The debouncer never reports
    /// two presses without a release between them, so a held button counts
    /// once. Only blocks while a long-press tone sounds.
    pub fn tick<I: InputSource>(&mut self, inputs: &mut I, now: Millis) -> TickReport {
        let mut events = Vec::new();
        let mut edges = [None; ButtonId::ALL.len()];
        for button in ButtonId::ALL {
            let raw = inputs.is_pressed(button);
            edges[button.index()] = self.debouncer.sample(button, raw, now);
        }

        if edges[ButtonId::Mode.index()] == Some(Edge::Pressed) {
            let mode = self.mode.next();
            self.activate(mode, now);
            let _ = events.push(ControllerEvent::ModeChanged(mode));

            #[cfg(feature = "defmt")]
            defmt::info!("mode -> {}", mode);
        }

        if edges[ButtonId::Reset.index()] == Some(Edge::Pressed) {
            self.activate(EffectMode::Off, now);
            self.reporter.report(Status::Reset);
            let _ = events.push(ControllerEvent::Reset);

            #[cfg(feature = "defmt")]
            defmt::info!("reset");
        }

        let mut tone = None;
        match self.classifier.update(edges[ButtonId::Action.index()], now) {
            Some(PressEvent::LongPress) => {
                self.reporter.report(Status::LongPress);
                tone = Some(LONG_PRESS_TONE);
                let _ = events.push(ControllerEvent::LongPress);

                #[cfg(feature = "defmt")]
                defmt::info!("long press");
            }
            Some(PressEvent::ShortPress) => {
                self.engine.toggle_override();
                let led_on = self.engine.manual_override().led_on();
                self.reporter.report(Status::Manual(led_on));
                let _ = events.push(ControllerEvent::ShortPress { led_on });

                #[cfg(feature = "defmt")]
                defmt::info!("short press, manual led {}", led_on);
            }
            None => {}
        }

        let manual = self.engine.manual_override();
        let levels = if manual.is_active() {
            Some(manual.levels())
        } else {
            self.engine.render(self.mode, now)
        };

        let frame = ActuatorFrame {
            levels: levels.unwrap_or(self.levels),
            tone,
        };
        self.apply(frame);

        TickReport { events, frame }
    }

    /// Ticks forever, waiting [`TICK_MS`] between steps.
    pub fn run<I, T, W>(&mut self, inputs: &mut I, clock: &T, delay: &mut W) -> !
    where
        I: InputSource,
        T: TimeSource,
        W: DelayNs,
    {
        loop {
            self.tick(inputs, clock.now());
            delay.delay_ms(TICK_MS);
        }
    }

    fn activate(&mut self, mode: EffectMode, now: Millis) {
        self.mode = mode;
        let activation = self.engine.activate(mode, now);
        self.reporter.report(activation.status);

        if let Some(levels) = activation.entry {
            self.write_levels(levels);
        }
    }

    fn apply(&mut self, frame: ActuatorFrame) {
        self.write_levels(frame.levels);

        if let Some(tone) = frame.tone {
            self.actuators.tone(tone);
        }
    }

    fn write_levels(&mut self, levels: Levels) {
        // Update channels only if levels changed
        if levels != self.levels {
            self.actuators.set_levels(levels);
            self.levels = levels;
        }
    }

    /// Returns the active effect.
    pub fn mode(&self) -> EffectMode {
        self.mode
    }

    /// Returns the levels currently on the channels.
    pub fn levels(&self) -> Levels {
        self.levels
    }

    /// Returns the manual override state.
    pub fn manual_override(&self) -> &ManualOverride {
        self.engine.manual_override()
    }

    /// Returns the most recently shown status.
    pub fn last_status(&self) -> Option<Status> {
        self.reporter.last()
    }

    /// Returns the effect engine.
    pub fn engine(&self) -> &EffectEngine {
        &self.engine
    }

    /// Returns the button debouncer.
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Returns the action button classifier.
    pub fn classifier(&self) -> &PressClassifier {
        &self.classifier
    }

    /// Returns a reference to the actuators.
    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    /// Returns a mutable reference to the actuators.
    pub fn actuators_mut(&mut self) -> &mut A {
        &mut self.actuators
    }

    /// Returns a reference to the display.
    pub fn display(&self) -> &D {
        self.reporter.display()
    }

    /// Consumes the controller, returning the actuators and display.
    pub fn release(self) -> (A, D) {
        let Self {
            actuators,
            reporter,
            ..
        } = self;
        (actuators, reporter.into_display())
    }
}

/// Idles forever.
///
/// Entered when start-up fails and the device cannot give reliable feedback.
pub fn halt<W: DelayNs>(delay: &mut W) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("halted");

    loop {
        delay.delay_ms(HALT_POLL_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::ToString;

    #[test]
    fn start_error_formats_for_display() {
        let error: StartError<()> = StartError::Display(());
        assert_eq!(error.to_string(), "display initialization failed");
    }
}
