//! ISR-safe transfer engine wrapper using critical sections.
//!
//! The DMA interrupt needs `&mut` access to the engine to re-arm it, but the
//! engine is created in `main`. [`SharedEngine`] is the `static` slot that
//! hands it over: `main` installs it after start-up, the interrupt borrows
//! it for the duration of the handler.

use super::primitives::CriticalSectionCell;
use crate::hal::transfer::{CompletionHandler, TransferEngine};

/// ISR-safe slot holding the transfer engine.
///
/// # Example
///
/// ```ignore
/// static DMA: SharedEngine<Channel> = SharedEngine::new();
/// imxrt_adc_stream::pipeline_static!(PIPELINE, 20);
///
/// let consumer = PIPELINE.initialize_and_arm(&config, &mut adc, &mut channel, delay)?;
/// DMA.install(channel);
///
/// #[interrupt]
/// fn DMA3_DMA19() {
///     DMA.handle_interrupt(&PIPELINE);
/// }
/// ```
pub struct SharedEngine<E> {
    inner: CriticalSectionCell<Option<E>>,
}

impl<E> SharedEngine<E> {
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Put `engine` in the slot, returning the previous one.
    pub fn install(&self, engine: E) -> Option<E> {
        self.inner.with(|slot| slot.replace(engine))
    }

    /// Take the engine back out.
    pub fn take(&self) -> Option<E> {
        self.inner.with(Option::take)
    }

    /// Whether an engine is installed
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Execute a closure with exclusive access to the engine.
    ///
    /// Returns `None` if no engine is installed. Interrupts are disabled
    /// for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut E) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }
}

impl<E: TransferEngine> SharedEngine<E> {
    /// DMA interrupt entry point.
    ///
    /// Dispatches a pending major-loop completion to `handler`. Returns
    /// whether one was handled; `false` if nothing was pending or no engine
    /// is installed yet.
    #[inline]
    pub fn handle_interrupt<H: CompletionHandler<E>>(&self, handler: &H) -> bool {
        self.with(|engine| {
            if engine.take_major_complete() {
                handler.on_complete(engine);
                true
            } else {
                false
            }
        })
        .unwrap_or(false)
    }
}

impl<E> Default for SharedEngine<E> {
    fn default() -> Self {
        Self::new()
    }
}
