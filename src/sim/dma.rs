//! Simulated eDMA channel.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::driver::buffer::Sample;
use crate::driver::descriptor::TransferDescriptor;
use crate::driver::error::{ConfigError, Result, TransferError};
use crate::hal::transfer::TransferEngine;
use crate::internal::constants::{DMA_CHANNEL_COUNT, DMAMUX_SOURCE_COUNT, SAMPLE_SIZE};

/// Host stand-in for one eDMA channel in peripheral-to-memory mode.
///
/// Each [`SimulatedDma::request`] moves one sample to the next destination
/// slot. After the last slot the channel disarms and latches the major-loop
/// completion, exactly like hardware with `DREQ` set; requests arriving
/// while disarmed are dropped and counted.
#[derive(Debug, Default)]
pub struct SimulatedDma {
    routed: Option<(u8, u8)>,
    descriptor: Option<TransferDescriptor>,
    armed: bool,
    position: usize,
    major_complete: bool,
    completions: u32,
    transferred: u64,
    dropped: u64,
}

impl SimulatedDma {
    /// Unrouted, unarmed channel
    pub const fn new() -> Self {
        Self {
            routed: None,
            descriptor: None,
            armed: false,
            position: 0,
            major_complete: false,
            completions: 0,
            transferred: 0,
            dropped: 0,
        }
    }

    /// Serve one peripheral request carrying `sample`.
    ///
    /// Returns `true` if this request completed the major loop.
    pub fn request(&mut self, sample: Sample) -> bool {
        let Some(descriptor) = self.descriptor.filter(|_| self.armed) else {
            self.dropped += 1;
            return false;
        };
        let Some(address) = descriptor.destination_of(self.position) else {
            self.dropped += 1;
            return false;
        };

        // SAFETY: `arm` obliges the caller to keep `units` samples at the
        // destination valid for the rest of the program, and the descriptor
        // enforces sample alignment.
        let slot = unsafe { &*(address as *const AtomicU16) };
        slot.store(sample, Ordering::Relaxed);
        self.transferred += 1;
        self.position += 1;

        if self.position == descriptor.units() {
            self.position = 0;
            self.armed = false;
            self.major_complete = true;
            self.completions = self.completions.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// `(channel, request_source)` the channel was routed with
    pub fn routing(&self) -> Option<(u8, u8)> {
        self.routed
    }

    /// Major loops completed
    pub fn completions(&self) -> u32 {
        self.completions
    }

    /// Samples written to memory
    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    /// Requests that arrived while the channel was disarmed
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Next destination slot
    pub fn position(&self) -> usize {
        self.position
    }
}

impl TransferEngine for SimulatedDma {
    fn init_channel(&mut self, channel: u8, request_source: u8) -> Result<()> {
        if channel >= DMA_CHANNEL_COUNT || request_source >= DMAMUX_SOURCE_COUNT {
            return Err(ConfigError::TransferInitFailed.into());
        }
        self.routed = Some((channel, request_source));
        Ok(())
    }

    unsafe fn arm(&mut self, descriptor: &TransferDescriptor) -> Result<()> {
        if self.routed.is_none() {
            return Err(TransferError::ChannelNotConfigured.into());
        }
        debug_assert_eq!(descriptor.unit_size(), SAMPLE_SIZE);
        self.descriptor = Some(*descriptor);
        self.position = 0;
        self.major_complete = false;
        self.armed = true;
        Ok(())
    }

    fn rearm(&mut self) {
        if self.descriptor.is_some() {
            self.position = 0;
            self.armed = true;
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn take_major_complete(&mut self) -> bool {
        core::mem::take(&mut self.major_complete)
    }

    fn descriptor(&self) -> Option<&TransferDescriptor> {
        self.descriptor.as_ref()
    }
}
