//! Transfer descriptor for the repeating ADC → memory job.
//!
//! A [`TransferDescriptor`] is the software image of one eDMA transfer
//! control descriptor: fixed source (the ADC result register), fixed
//! destination (the sample buffer base), one sample per minor loop and `N`
//! minor loops per major loop. It is built once at start-up and handed to the
//! engine; every re-arm restarts the engine with these exact parameters.

use crate::driver::error::{TransferError, TransferResult};
use crate::internal::constants::{CACHE_LINE_SIZE, MAX_MAJOR_LOOP_COUNT, SAMPLE_SIZE};

/// One peripheral-to-memory transfer job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferDescriptor {
    source: usize,
    destination: usize,
    unit_size: usize,
    units: usize,
}

impl TransferDescriptor {
    /// Describe a transfer of `units` samples from a fixed peripheral register
    /// into a contiguous buffer.
    ///
    /// The destination must start on a cache line so that invalidating the
    /// buffer never discards a neighbouring variable.
    pub const fn peripheral_to_memory(
        source: usize,
        destination: usize,
        units: usize,
    ) -> TransferResult<Self> {
        if units == 0 || units > MAX_MAJOR_LOOP_COUNT {
            return Err(TransferError::InvalidLength);
        }
        if source % SAMPLE_SIZE != 0 || destination % CACHE_LINE_SIZE != 0 {
            return Err(TransferError::Misaligned);
        }
        Ok(Self {
            source,
            destination,
            unit_size: SAMPLE_SIZE,
            units,
        })
    }

    /// Peripheral register read on every request
    #[inline(always)]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Buffer base address
    #[inline(always)]
    pub const fn destination(&self) -> usize {
        self.destination
    }

    /// Bytes moved per request (minor loop)
    #[inline(always)]
    pub const fn unit_size(&self) -> usize {
        self.unit_size
    }

    /// Requests per major loop
    #[inline(always)]
    pub const fn units(&self) -> usize {
        self.units
    }

    /// Bytes written per major loop
    #[inline(always)]
    pub const fn byte_len(&self) -> usize {
        self.units * self.unit_size
    }

    /// Address written by the `index`-th request of a major loop.
    #[inline]
    pub const fn destination_of(&self, index: usize) -> Option<usize> {
        if index < self.units {
            Some(self.destination + index * self.unit_size)
        } else {
            None
        }
    }
}
