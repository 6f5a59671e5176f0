//! Transfer engine (DMA channel) abstraction.
//!
//! [`TransferEngine`] is the interface the pipeline needs from one eDMA
//! channel: route and initialize it, submit a descriptor, restart the same
//! descriptor after completion, and report the major-loop completion from
//! interrupt context.
//!
//! [`CompletionHandler`] is the callback side. The DMA interrupt (or a
//! simulator standing in for it) calls
//! [`CompletionHandler::on_complete`] once per completed major loop.

use crate::driver::descriptor::TransferDescriptor;
use crate::driver::error::Result;

/// One DMA channel moving samples from a peripheral into memory
pub trait TransferEngine {
    /// Initialize the channel and route `request_source` to it.
    fn init_channel(&mut self, channel: u8, request_source: u8) -> Result<()>;

    /// Submit `descriptor`, enable the major-loop interrupt, and start
    /// accepting requests.
    ///
    /// # Safety
    ///
    /// The engine writes `descriptor.byte_len()` bytes at
    /// `descriptor.destination()` on every major loop until the program
    /// ends. The caller guarantees that memory stays valid and is not used
    /// for anything else for that long.
    unsafe fn arm(&mut self, descriptor: &TransferDescriptor) -> Result<()>;

    /// Restart the last submitted descriptor. Called from interrupt context.
    ///
    /// Must be bounded and non-blocking. Does nothing if no descriptor was
    /// ever submitted.
    fn rearm(&mut self);

    /// Whether the channel will accept the next request.
    fn is_armed(&self) -> bool;

    /// Read and clear the major-loop completion status.
    fn take_major_complete(&mut self) -> bool;

    /// The descriptor currently loaded in the channel, if any.
    fn descriptor(&self) -> Option<&TransferDescriptor>;
}

/// Receiver of major-loop completions
pub trait CompletionHandler<E: TransferEngine> {
    /// Handle one completed major loop of `engine`.
    ///
    /// Runs in interrupt context: no blocking, no formatting, no allocation.
    fn on_complete(&self, engine: &mut E);
}
