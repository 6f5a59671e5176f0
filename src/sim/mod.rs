//! Host simulation of the ADC → DMA → interrupt path.
//!
//! Runs the real [`PipelineContext`](crate::PipelineContext) logic without
//! hardware. A [`Simulator`] owns a [`SimulatedAdc`] and a
//! [`SimulatedDma`]; each [`Simulator::tick`] is one conversion, one DMA
//! request, and, when that request finishes the major loop, one call into
//! the completion handler, which is what the DMA interrupt does on target.
//!
//! With the `std` feature, [`hosted::spawn`] moves the simulator to its own
//! thread so the consumer can run concurrently, as it does against the real
//! interrupt.
//!
//! # Example
//!
//! ```
//! use imxrt_adc_stream::sim::{SimulatedAdc, SimulatedDma, Simulator};
//! use imxrt_adc_stream::{PipelineConfig, PipelineContext};
//!
//! # struct NoDelay;
//! # impl embedded_hal::delay::DelayNs for NoDelay { fn delay_ns(&mut self, _: u32) {} }
//! static PIPELINE: PipelineContext<20> = PipelineContext::new();
//!
//! let mut adc = SimulatedAdc::new();
//! let mut dma = SimulatedDma::new();
//! let mut consumer = PIPELINE
//!     .initialize_and_arm(&PipelineConfig::new(), &mut adc, &mut dma, NoDelay)
//!     .unwrap();
//!
//! let mut sim = Simulator::new(adc, dma, &PIPELINE);
//! sim.complete_cycles(1);
//!
//! let copy = consumer.poll().unwrap();
//! assert_eq!(copy.first(), Some(0));
//! assert_eq!(copy.last(), Some(19));
//! ```

mod adc;
mod dma;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod hosted;

pub use adc::{Ramp, SampleGenerator, SimulatedAdc};
pub use dma::SimulatedDma;

use crate::hal::transfer::{CompletionHandler, TransferEngine};

/// Drives a simulated ADC and DMA channel against a completion handler
pub struct Simulator<'a, H, G = Ramp> {
    adc: SimulatedAdc<G>,
    dma: SimulatedDma,
    handler: &'a H,
}

impl<'a, H, G> Simulator<'a, H, G>
where
    H: CompletionHandler<SimulatedDma>,
    G: SampleGenerator,
{
    /// Take over a started ADC and DMA channel
    pub fn new(adc: SimulatedAdc<G>, dma: SimulatedDma, handler: &'a H) -> Self {
        Self { adc, dma, handler }
    }

    /// One conversion. Returns `true` if it completed a buffer.
    pub fn tick(&mut self) -> bool {
        let Some(sample) = self.adc.convert() else {
            return false;
        };
        if !self.adc.dma_request_enabled() || !self.dma.request(sample) {
            return false;
        }
        // Interrupt
        if self.dma.take_major_complete() {
            self.handler.on_complete(&mut self.dma);
            true
        } else {
            false
        }
    }

    /// `n` conversions. Returns the number of completed buffers.
    pub fn tick_n(&mut self, n: u32) -> u32 {
        let mut completed = 0;
        for _ in 0..n {
            if self.tick() {
                completed += 1;
            }
        }
        completed
    }

    /// Convert until `cycles` more buffers completed.
    ///
    /// Gives up if the channel stops completing (never armed, or the
    /// handler did not re-arm) and returns the cycles actually completed.
    pub fn complete_cycles(&mut self, cycles: u32) -> u32 {
        let Some(units) = self.dma.descriptor().map(|d| d.units()) else {
            return 0;
        };

        let mut completed = 0;
        while completed < cycles {
            let mut finished = false;
            for _ in 0..units {
                if self.tick() {
                    finished = true;
                    break;
                }
            }
            if !finished {
                break;
            }
            completed += 1;
        }
        completed
    }

    /// The simulated ADC
    pub fn adc(&self) -> &SimulatedAdc<G> {
        &self.adc
    }

    /// The simulated DMA channel
    pub fn dma(&self) -> &SimulatedDma {
        &self.dma
    }

    /// Give back the ADC and DMA channel
    pub fn into_parts(self) -> (SimulatedAdc<G>, SimulatedDma) {
        (self.adc, self.dma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::PipelineConfig;
    use crate::driver::pipeline::PipelineContext;
    use crate::testing::{MockDelay, leak_context};

    /// Handler that never re-arms
    struct Lazy;

    impl CompletionHandler<SimulatedDma> for Lazy {
        fn on_complete(&self, _engine: &mut SimulatedDma) {}
    }

    fn started_parts(ctx: &'static PipelineContext<8>) -> (SimulatedAdc, SimulatedDma) {
        let mut adc = SimulatedAdc::new();
        let mut dma = SimulatedDma::new();
        ctx.initialize_and_arm(&PipelineConfig::new(), &mut adc, &mut dma, MockDelay::new())
            .unwrap();
        (adc, dma)
    }

    #[test]
    fn nothing_happens_before_start() {
        let ctx = leak_context::<8>();
        let mut sim = Simulator::new(SimulatedAdc::new(), SimulatedDma::new(), ctx);

        assert_eq!(sim.tick_n(100), 0);
        assert_eq!(sim.complete_cycles(1), 0);
        assert_eq!(sim.adc().conversions(), 0);
    }

    #[test]
    fn tick_reports_completed_buffers() {
        let ctx = leak_context::<8>();
        let (adc, dma) = started_parts(ctx);
        let mut sim = Simulator::new(adc, dma, ctx);

        assert_eq!(sim.tick_n(7), 0);
        assert!(sim.tick());
        assert_eq!(sim.tick_n(16), 2);
        assert_eq!(ctx.completions(), 3);
        assert_eq!(sim.dma().transferred(), 24);
    }

    #[test]
    fn without_rearm_samples_are_dropped() {
        let ctx = leak_context::<8>();
        let (adc, dma) = started_parts(ctx);
        let mut sim = Simulator::new(adc, dma, &Lazy);

        assert_eq!(sim.complete_cycles(3), 1);
        assert!(!sim.dma().is_armed());
        assert_eq!(sim.dma().dropped(), 8);
        assert_eq!(sim.dma().transferred(), 8);
    }

    #[test]
    fn into_parts_returns_state() {
        let ctx = leak_context::<8>();
        let (adc, dma) = started_parts(ctx);
        let mut sim = Simulator::new(adc, dma, ctx);
        sim.complete_cycles(2);

        let (adc, dma) = sim.into_parts();
        assert_eq!(adc.conversions(), 16);
        assert_eq!(dma.completions(), 2);
    }
}
