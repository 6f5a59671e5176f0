//! Synchronization primitives for ISR-safe access.
//!
//! Low-level primitives used by [`SharedEngine`](super::SharedEngine) and the
//! async consumer.

use core::cell::RefCell;
#[cfg(feature = "async")]
use core::task::Waker;
use critical_section::Mutex;

/// `RefCell` behind a critical-section mutex, usable from `static`s.
///
/// Every access runs with interrupts masked, so the DMA interrupt and the
/// foreground never hold the value at the same time.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Cell holding `value`
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` on the value inside a critical section.
    ///
    /// Panics on re-entry from within `f`.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

// SAFETY: every access goes through a critical section. `T: Send` because
// the value is handed to whichever context (thread or ISR) enters it.
unsafe impl<T: Send> Sync for CriticalSectionCell<T> {}

/// Interrupt-safe waker slot for the async consumer.
///
/// The consumer registers from `poll`; the completion handler wakes.
#[cfg(feature = "async")]
pub struct AtomicWaker {
    waker: CriticalSectionCell<Option<Waker>>,
}

#[cfg(feature = "async")]
impl AtomicWaker {
    /// Create a new empty waker (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            waker: CriticalSectionCell::new(None),
        }
    }

    /// Register a waker to be woken later.
    pub fn register(&self, waker: &Waker) {
        self.waker.with(|slot| match slot {
            Some(existing) if existing.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        });
    }

    /// Wake the registered waker, if any (clears the stored waker).
    #[inline]
    pub fn wake(&self) {
        // Wake outside the critical section
        if let Some(w) = self.waker.with(Option::take) {
            w.wake();
        }
    }

    /// Check if a waker is currently registered.
    pub fn is_registered(&self) -> bool {
        self.waker.with(|slot| slot.is_some())
    }
}

#[cfg(feature = "async")]
impl Default for AtomicWaker {
    fn default() -> Self {
        Self::new()
    }
}
