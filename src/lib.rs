#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Controller`**: Owns all runtime state and runs one control step per tick
//! - **`Debouncer`**: Turns raw button samples into stable `Edge`s
//! - **`PressClassifier`**: Classifies action-button holds as `ShortPress` or `LongPress`
//! - **`EffectEngine`**: Renders `Alternate` and `Fade`, sets static `Off` / `AllOn` levels
//! - **`StatusReporter`**: Forwards two-line `Status` messages to a `DisplaySink`
//! - **`ActuatorSink`** / **`InputSource`** / **`DisplaySink`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//!
//! Channel levels are plain `u8` intensities (0-255). Timing is fixed by the
//! constants in [`types`]; timestamps are wrapping 32-bit milliseconds.

pub mod controller;
pub mod debounce;
pub mod effect;
pub mod hal;
pub mod press;
pub mod status;
pub mod time;
pub mod types;

pub use controller::{
    ActuatorSink, Controller, ControllerEvent, InputSource, StartError, TickReport, halt,
};
pub use debounce::{ButtonState, Debouncer, Edge};
pub use effect::{Activation, EffectClock, EffectEngine, ManualOverride};
pub use hal::{ActiveLowButtons, Buzzer, PwmChannels, ToneOutput};
pub use press::{PressClassifier, PressEvent, PressSession};
pub use status::{DisplaySink, Status, StatusReporter};
pub use time::{Millis, TimeSource};
pub use types::{
    ActuatorFrame, BLINK_GAP, ButtonId, CHANNEL_COUNT, DEBOUNCE_MS, EffectMode, FADE_PERIOD,
    LONG_PRESS_MS, LONG_PRESS_TONE, Levels, TICK_MS, Tone,
};
