//! Two-line status feedback for a small display.

use crate::types::EffectMode;

/// Trait for abstracting the status display.
///
/// Implement this for your display driver (an SSD1306 over I2C, a character
/// LCD, a serial console, ...). The title is drawn small on the first line,
/// the info text large below it.
pub trait DisplaySink {
    /// Error reported when the display cannot be brought up.
    type Error;

    /// Initializes the display hardware.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Replaces the display content with two lines of text.
    ///
    /// Showing the same text twice must be harmless. Handle any transfer
    /// errors internally - this method cannot fail.
    fn show(&mut self, title: &str, info: &str);
}

/// A status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Start-up completed.
    Ready,
    /// An effect was activated.
    Mode(EffectMode),
    /// The reset button forced the effect off.
    Reset,
    /// The action button was held past the long-press threshold.
    LongPress,
    /// A short press toggled the manual override; carries the new LED state.
    Manual(bool),
}

impl Status {
    /// First, small line.
    pub const fn title(self) -> &'static str {
        match self {
            Status::Ready | Status::Reset => "System:",
            Status::Mode(_) => "Mode:",
            Status::LongPress | Status::Manual(_) => "Action:",
        }
    }

    /// Second, large line.
    pub const fn info(self) -> &'static str {
        match self {
            Status::Ready => "Ready",
            Status::Mode(mode) => mode.label(),
            Status::Reset => "Reset",
            Status::LongPress => "Long Press",
            Status::Manual(true) => "Short: ON",
            Status::Manual(false) => "Short: OFF",
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.title(), self.info())
    }
}

/// Forwards status messages to a [`DisplaySink`] and remembers the last one.
pub struct StatusReporter<D: DisplaySink> {
    display: D,
    last: Option<Status>,
}

impl<D: DisplaySink> StatusReporter<D> {
    /// Wraps an uninitialized display.
    pub fn new(display: D) -> Self {
        Self {
            display,
            last: None,
        }
    }

    /// Initializes the underlying display.
    pub fn init(&mut self) -> Result<(), D::Error> {
        self.display.init()
    }

    /// Shows a status message.
    pub fn report(&mut self, status: Status) {
        self.display.show(status.title(), status.info());
        self.last = Some(status);
    }

    /// The most recently shown message.
    pub fn last(&self) -> Option<Status> {
        self.last
    }

    /// Returns a reference to the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Consumes the reporter, returning the display.
    pub fn into_display(self) -> D {
        self.display
    }
}
