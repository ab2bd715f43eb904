//! Blocking message transmission over a signal output

use crate::encoder::encode;
use crate::hal::{Level, SignalOutput};
use crate::types::{InvalidCharPolicy, MorseConfig, Symbol};

/// Symbol capacity reserved for a single [`Transmitter::write`] call
pub const MESSAGE_CAPACITY: usize = 512;

/// Blocking Morse transmitter
///
/// Encodes messages and keys them out on the attached signal output. The
/// transmitter owns its output exclusively; calls block the current thread
/// until the last symbol's duration has elapsed, and a started message
/// always transmits to completion. Hosts that need to stay responsive run
/// the transmitter on a dedicated thread or task.
pub struct Transmitter<O: SignalOutput> {
    output: Option<O>,
    invalid_char: InvalidCharPolicy,
}

impl<O: SignalOutput> Transmitter<O> {
    /// Create a transmitter with the default invalid-character policy
    pub fn new(output: O) -> Self {
        Self {
            output: Some(output),
            invalid_char: InvalidCharPolicy::default(),
        }
    }

    /// Create a transmitter taking its policy from a configuration
    pub fn with_config(output: O, config: MorseConfig) -> Self {
        Self {
            output: Some(output),
            invalid_char: config.invalid_char,
        }
    }

    /// Create a transmitter with no output attached
    ///
    /// Every transmission fails until [`Transmitter::attach`] is called.
    pub fn detached() -> Self {
        Self {
            output: None,
            invalid_char: InvalidCharPolicy::default(),
        }
    }

    /// Attach a signal output, replacing any previous one
    pub fn attach(&mut self, output: O) {
        self.output = Some(output);
    }

    /// Access the attached output
    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    /// Mutable access to the attached output
    pub fn output_mut(&mut self) -> Option<&mut O> {
        self.output.as_mut()
    }

    /// Get the current invalid-character policy
    pub fn invalid_char_policy(&self) -> InvalidCharPolicy {
        self.invalid_char
    }

    /// Set the invalid-character policy for subsequent calls
    pub fn set_invalid_char_policy(&mut self, policy: InvalidCharPolicy) {
        self.invalid_char = policy;
    }

    /// Encode a message and transmit it, blocking until it is on the air
    ///
    /// Returns true only if the whole message encoded cleanly and every
    /// pulse was emitted. Transmission is attempted even when encoding
    /// fails, so a partially encoded message still goes out under the
    /// configured policy; callers wanting to tell the two failures apart
    /// call [`encode`] themselves first.
    pub fn write(&mut self, message: &str) -> bool {
        #[cfg(feature = "defmt")]
        defmt::debug!("write: {} chars", message.len());

        let (symbols, encoded) = encode::<MESSAGE_CAPACITY>(message, self.invalid_char);

        #[cfg(feature = "defmt")]
        if !encoded {
            defmt::warn!("message not fully encoded, transmitting anyway");
        }

        let sent = self.send_code(&symbols);
        // Bitwise on purpose: both operations have already run
        encoded & sent
    }

    /// Transmit an already-encoded symbol sequence
    ///
    /// A non-empty sequence is followed by one character space of trailing
    /// silence. Returns false without emitting anything when no output is
    /// attached. Emitted pulses are not rolled back on failure.
    pub fn send_code(&mut self, symbols: &[Symbol]) -> bool {
        let output = match self.output.as_mut() {
            Some(output) => output,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("no signal output attached");
                return false;
            }
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("sending {} symbols", symbols.len());

        let trailer = if symbols.is_empty() {
            None
        } else {
            Some(Symbol::CharSpace)
        };

        let mut ok = true;
        for symbol in symbols.iter().copied().chain(trailer) {
            let level = if symbol.is_keyed() {
                Level::High
            } else {
                Level::Low
            };
            let pulse = output.hold_signal(level, symbol.duration_units()).is_ok();
            // Every symbol is trailed by one unit of silence, gaps included,
            // so the pause after a character space is two units on the wire
            let gap = output.hold_signal(Level::Low, 1).is_ok();
            // Bitwise on purpose: later symbols are still sent after a
            // failed pulse
            ok = ok & pulse & gap;
        }
        ok
    }
}
