//! Threaded simulation runner.
//!
//! Stands in for the interrupt context: the simulator runs on its own
//! thread while the consumer runs on the caller's, so the ready-flag
//! handshake and the mid-copy completion check are exercised under real
//! concurrency.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::{SampleGenerator, SimulatedDma, Simulator};
use crate::hal::transfer::CompletionHandler;

/// A simulator running on a background thread
pub struct HostedSimulation<H: 'static, G> {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Simulator<'static, H, G>>,
}

/// Start converting on a new thread, one sample every `period`.
///
/// A zero `period` yields between samples instead of sleeping.
pub fn spawn<H, G>(mut sim: Simulator<'static, H, G>, period: Duration) -> HostedSimulation<H, G>
where
    H: CompletionHandler<SimulatedDma> + Sync + 'static,
    G: SampleGenerator + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);

    let handle = thread::spawn(move || {
        while !flag.load(Ordering::Relaxed) {
            sim.tick();
            if period.is_zero() {
                thread::yield_now();
            } else {
                thread::sleep(period);
            }
        }
        sim
    });

    HostedSimulation { stop, handle }
}

impl<H: 'static, G> HostedSimulation<H, G> {
    /// Whether the simulation thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop converting and get the simulator back.
    ///
    /// Errors if the simulation thread panicked.
    pub fn stop(self) -> thread::Result<Simulator<'static, H, G>> {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.join()
    }
}
