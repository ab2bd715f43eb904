//! Hardware abstraction for the signal output

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::types::DEFAULT_MS_PER_TICK;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Timing operation failed
    TimingError,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::TimingError => write!(f, "Timing operation failed"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Signal level driven onto the output
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Signal low (silence)
    Low,
    /// Signal high (mark)
    High,
}

impl Level {
    /// Returns true for [`Level::High`]
    pub const fn is_high(&self) -> bool {
        matches!(self, Level::High)
    }
}

/// Trait for a device that can hold a signal level for a given duration
///
/// Implementations set the physical output and block until `ticks` tick
/// periods have elapsed. Any concrete device (pin, simulator, logger) can
/// stand in behind this trait.
pub trait SignalOutput {
    type Error: From<HalError>;

    /// Drive `level` for `ticks` ticks, returning once the duration elapsed
    fn hold_signal(&mut self, level: Level, ticks: u32) -> Result<(), Self::Error>;
}

/// Signal output backed by embedded-hal compatible pin and delay
pub struct EmbeddedHalOutput<P, D> {
    pin: P,
    delay: D,
    inverted: bool,
    ms_per_tick: u32,
}

impl<P, D> EmbeddedHalOutput<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create an output with the default tick duration (250 ms)
    pub fn new(pin: P, delay: D, inverted: bool) -> Self {
        Self {
            pin,
            delay,
            inverted,
            ms_per_tick: DEFAULT_MS_PER_TICK,
        }
    }

    /// Create an output with a custom tick duration, fixed for its lifetime
    pub fn with_ms_per_tick(
        pin: P,
        delay: D,
        inverted: bool,
        ms_per_tick: u32,
    ) -> Result<Self, HalError> {
        if ms_per_tick == 0 {
            return Err(HalError::InvalidConfig);
        }
        Ok(Self {
            pin,
            delay,
            inverted,
            ms_per_tick,
        })
    }

    /// Tick duration this output was built with
    pub fn ms_per_tick(&self) -> u32 {
        self.ms_per_tick
    }
}

impl<P, D> SignalOutput for EmbeddedHalOutput<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = HalError;

    fn hold_signal(&mut self, level: Level, ticks: u32) -> Result<(), Self::Error> {
        let high = level.is_high() != self.inverted;
        if high {
            self.pin.set_high().map_err(|_| HalError::GpioError)?;
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)?;
        }
        self.delay.delay_ms(ticks.saturating_mul(self.ms_per_tick));
        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;

    /// One recorded `hold_signal` call
    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    pub struct Pulse {
        pub level: Level,
        pub ticks: u32,
    }

    /// Signal output that records every pulse instead of driving hardware
    #[derive(Default)]
    pub struct MockOutput {
        pulses: heapless::Vec<Pulse, 512>,
        fail_after: Option<usize>,
    }

    impl MockOutput {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every pulse past the first `n` report failure
        pub fn fail_after(&mut self, n: usize) {
            self.fail_after = Some(n);
        }

        /// Recorded pulses in emission order
        pub fn pulses(&self) -> &[Pulse] {
            &self.pulses
        }

        /// Total ticks spent with the signal high
        pub fn high_ticks(&self) -> u32 {
            self.pulses
                .iter()
                .filter(|p| p.level.is_high())
                .map(|p| p.ticks)
                .sum()
        }

        /// Total ticks spent with the signal low
        pub fn low_ticks(&self) -> u32 {
            self.pulses
                .iter()
                .filter(|p| !p.level.is_high())
                .map(|p| p.ticks)
                .sum()
        }

        /// Discard recorded pulses, keeping the failure setting
        pub fn clear(&mut self) {
            self.pulses.clear();
        }
    }

    impl SignalOutput for MockOutput {
        type Error = HalError;

        fn hold_signal(&mut self, level: Level, ticks: u32) -> Result<(), Self::Error> {
            if let Some(n) = self.fail_after {
                if self.pulses.len() >= n {
                    return Err(HalError::GpioError);
                }
            }
            self.pulses
                .push(Pulse { level, ticks })
                .map_err(|_| HalError::TimingError)
        }
    }
}
