//! Async/await support for the consumer.
//!
//! The completion handler wakes the context's [`AtomicWaker`] after setting
//! the ready flag, so an executor can park the consumer task until the next
//! buffer instead of spinning.
//!
//! # Example
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn consume(mut consumer: Consumer<20>) {
//!     loop {
//!         let copy = consumer.next_async().await;
//!         copy.summary().log();
//!     }
//! }
//! ```

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use super::primitives::AtomicWaker;
use crate::driver::pipeline::PipelineContext;

/// Future resolving once the context's ready flag is set.
///
/// Does not clear the flag; the consumer does that when it copies.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct ReadyFuture<'a, const N: usize> {
    ctx: &'a PipelineContext<N>,
}

impl<'a, const N: usize> ReadyFuture<'a, N> {
    /// Create a future waiting on `ctx`.
    pub fn new(ctx: &'a PipelineContext<N>) -> Self {
        Self { ctx }
    }
}

impl<const N: usize> Future for ReadyFuture<'_, N> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.ctx.is_ready() {
            return Poll::Ready(());
        }

        self.ctx.waker().register(cx.waker());
        // A completion between the check and the registration woke nobody
        if self.ctx.is_ready() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

impl<const N: usize> PipelineContext<N> {
    /// Wait until a completed buffer is pending.
    pub fn wait_ready(&self) -> ReadyFuture<'_, N> {
        ReadyFuture::new(self)
    }

    /// The waker the completion handler signals
    pub fn ready_waker(&self) -> &AtomicWaker {
        self.waker()
    }
}
