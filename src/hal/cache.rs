//! Data cache maintenance for the DMA buffer.
//!
//! DMA writes bypass the Cortex-M7 data cache. If the sample buffer is in a
//! cacheable region, the CPU can read stale lines unless they are invalidated
//! before every copy. Placing the buffer in a non-cacheable section makes
//! that unnecessary and [`NonCacheable`] is the no-op for that case.

/// Make DMA-written memory visible to the CPU before it is read
pub trait CacheMaintenance {
    /// Invalidate every cache line overlapping `address..address + len`.
    fn invalidate(&mut self, address: usize, len: usize);
}

/// Buffer lives in non-cacheable memory; nothing to do.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonCacheable;

impl CacheMaintenance for NonCacheable {
    #[inline(always)]
    fn invalidate(&mut self, _address: usize, _len: usize) {}
}

/// D-cache invalidate-by-address through the SCB.
///
/// The sample buffer is aligned and padded to whole cache lines, so
/// invalidating its rounded-up length never discards a neighbour's data.
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
#[cfg_attr(docsrs, doc(cfg(feature = "cortex-m")))]
pub struct DcacheInvalidate {
    scb: cortex_m::peripheral::SCB,
}

#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
impl DcacheInvalidate {
    /// Take ownership of the SCB for cache maintenance
    pub fn new(scb: cortex_m::peripheral::SCB) -> Self {
        Self { scb }
    }

    /// Release the SCB
    pub fn free(self) -> cortex_m::peripheral::SCB {
        self.scb
    }
}

#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
impl CacheMaintenance for DcacheInvalidate {
    #[inline]
    fn invalidate(&mut self, address: usize, len: usize) {
        let len = len.next_multiple_of(crate::internal::constants::CACHE_LINE_SIZE);
        // SAFETY: the range covers only the cache-line padded sample buffer,
        // which holds no CPU-written data that could be lost.
        unsafe { self.scb.invalidate_dcache_by_address(address, len) };
    }
}
