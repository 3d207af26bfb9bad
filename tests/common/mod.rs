//! Shared test infrastructure for tri-led-controller integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use heapless::{String, Vec};
use tri_led_controller::{
    ActuatorSink, ButtonId, Controller, ControllerEvent, DisplaySink, InputSource, Levels, Millis,
    TICK_MS, Tone,
};

// ============================================================================
// Mock Actuators
// ============================================================================

/// Mock channels + buzzer that record every write
pub struct MockActuator {
    current: Levels,
    writes: u32,
    tones: Vec<Tone, 8>,
}

impl MockActuator {
    pub fn new() -> Self {
        Self {
            current: Levels([9, 9, 9]),
            writes: 0,
            tones: Vec::new(),
        }
    }

    pub fn current(&self) -> Levels {
        self.current
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }
}

impl ActuatorSink for MockActuator {
    fn set_levels(&mut self, levels: Levels) {
        self.current = levels;
        self.writes += 1;
    }

    fn tone(&mut self, tone: Tone) {
        let _ = self.tones.push(tone);
    }
}

// ============================================================================
// Mock Display
// ============================================================================

pub type Line = String<16>;

/// Mock display that records every message
pub struct MockDisplay {
    fail_init: bool,
    initialized: bool,
    history: Vec<(Line, Line), 64>,
}

/// Error returned by a failing mock display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoDisplay;

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            fail_init: false,
            initialized: false,
            history: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn history(&self) -> &[(Line, Line)] {
        &self.history
    }

    pub fn last(&self) -> Option<(&str, &str)> {
        self.history
            .last()
            .map(|(title, info)| (title.as_str(), info.as_str()))
    }
}

fn line(text: &str) -> Line {
    let mut out = Line::new();
    let _ = out.push_str(text);
    out
}

impl DisplaySink for MockDisplay {
    type Error = NoDisplay;

    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_init {
            return Err(NoDisplay);
        }
        self.initialized = true;
        Ok(())
    }

    fn show(&mut self, title: &str, info: &str) {
        let _ = self.history.push((line(title), line(info)));
    }
}

// ============================================================================
// Mock Inputs
// ============================================================================

/// Mock buttons with directly settable (normalized) levels
#[derive(Default)]
pub struct MockInputs {
    pressed: [bool; 3],
}

impl MockInputs {
    pub fn set(&mut self, button: ButtonId, pressed: bool) {
        self.pressed[slot(button)] = pressed;
    }
}

fn slot(button: ButtonId) -> usize {
    match button {
        ButtonId::Mode => 0,
        ButtonId::Reset => 1,
        ButtonId::Action => 2,
    }
}

impl InputSource for MockInputs {
    fn is_pressed(&mut self, button: ButtonId) -> bool {
        self.pressed[slot(button)]
    }
}

// ============================================================================
// Test Rig
// ============================================================================

/// A started controller plus inputs and a simulated clock
pub struct Rig {
    pub controller: Controller<MockActuator, MockDisplay>,
    pub inputs: MockInputs,
    pub now: Millis,
}

impl Rig {
    /// Starts a controller at t = 0
    pub fn new() -> Self {
        Self::starting_at(Millis(0))
    }

    /// Starts a controller at an arbitrary clock value
    pub fn starting_at(now: Millis) -> Self {
        let mut controller = Controller::new(MockActuator::new(), MockDisplay::new());
        controller.start(now).unwrap();
        Self {
            controller,
            inputs: MockInputs::default(),
            now,
        }
    }

    /// Runs a single tick at the current time, then advances the clock
    pub fn tick(&mut self) -> std::vec::Vec<ControllerEvent> {
        let report = self.controller.tick(&mut self.inputs, self.now);
        self.now = self.now.wrapping_add(TICK_MS);
        report.events.into_iter().collect()
    }

    /// Ticks for (at least) `millis`, collecting every event
    pub fn run_for(&mut self, millis: u32) -> std::vec::Vec<ControllerEvent> {
        let mut events = std::vec::Vec::new();
        let end = self.now.wrapping_add(millis);
        while end.elapsed_since(self.now) > 0 && end.elapsed_since(self.now) <= millis {
            events.extend(self.tick());
        }
        events
    }

    /// Presses `button`, holds it for `millis`, releases it and lets the
    /// debounce window pass
    pub fn hold(&mut self, button: ButtonId, millis: u32) -> std::vec::Vec<ControllerEvent> {
        self.inputs.set(button, true);
        let mut events = self.run_for(millis);
        self.inputs.set(button, false);
        events.extend(self.run_for(96));
        events
    }

    /// A quick press and release
    pub fn click(&mut self, button: ButtonId) -> std::vec::Vec<ControllerEvent> {
        self.hold(button, 96)
    }

    pub fn levels(&self) -> Levels {
        self.controller.levels()
    }

    pub fn display(&self) -> &MockDisplay {
        self.controller.display()
    }
}
