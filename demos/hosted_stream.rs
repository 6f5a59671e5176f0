//! Hosted ADC streaming demo
//!
//! Runs the full pipeline on the host: a simulated ADC converting a
//! triangle wave, a simulated DMA channel on a background thread standing
//! in for the interrupt, and the real consumer loop on the main thread.
//!
//! ```text
//! RUST_LOG=debug cargo run --example hosted_stream --features std,log
//! ```

use core::ops::ControlFlow;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use imxrt_adc_stream::hal::YieldThread;
use imxrt_adc_stream::sim::{SimulatedAdc, SimulatedDma, Simulator, hosted};
use imxrt_adc_stream::{PipelineConfig, pipeline_static};

/// Buffers to process before exiting
const BUFFERS: u32 = 50;

/// Time between simulated conversions
const SAMPLE_PERIOD: Duration = Duration::from_micros(20);

pipeline_static!(PIPELINE);

struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// 12-bit triangle wave
fn triangle() -> impl FnMut() -> u16 + Send {
    let mut phase: u16 = 0;
    move || {
        phase = (phase + 37) % 8192;
        if phase < 4096 { phase } else { 8191 - phase }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut adc = SimulatedAdc::with_generator(triangle());
    let mut dma = SimulatedDma::new();

    // Failure is already logged by the pipeline
    let Ok(mut consumer) =
        PIPELINE.initialize_and_arm(&PipelineConfig::new(), &mut adc, &mut dma, StdDelay)
    else {
        std::process::exit(1);
    };

    let running = hosted::spawn(Simulator::new(adc, dma, &PIPELINE), SAMPLE_PERIOD);

    let mut missed = 0;
    let mut mid_copy = 0;
    let processed = consumer.run(&mut YieldThread, |copy| {
        copy.summary().log();
        missed += copy.missed();
        mid_copy += u32::from(copy.completed_during_copy());

        if copy.sequence() >= BUFFERS {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    match running.stop() {
        Ok(sim) => log::info!(
            "processed {processed} buffers ({missed} skipped, {mid_copy} completed mid-copy), \
             {} samples transferred, {} dropped",
            sim.dma().transferred(),
            sim.dma().dropped()
        ),
        Err(_) => log::error!("simulation thread panicked"),
    }
}
