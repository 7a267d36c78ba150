//! Headless fixed-rate driver
//!
//! Owns the loop the viewer would otherwise own: one tick per iteration,
//! optional wall-clock pacing, and termination either from the frame budget
//! or from the per-frame callback.

use std::ops::ControlFlow;
use std::thread;
use std::time::Instant;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::ParticleCollection;

/// Why the driver loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    FrameBudget, // reached the requested number of frames
    Stopped,     // the callback asked to stop
}

/// Run `scenario` for up to `frames` ticks, calling `on_frame` after each.
///
/// With `realtime` every tick is padded to `engine.tick_period()`, otherwise
/// ticks run back to back. `frames = None` falls back to `engine.frames`; if
/// both are `None` the loop runs until `on_frame` breaks.
pub fn run_headless<F>(
    scenario: &mut Scenario,
    frames: Option<u64>,
    realtime: bool,
    mut on_frame: F,
) -> Termination
where
    F: FnMut(u64, &ParticleCollection) -> ControlFlow<()>,
{
    let limit = frames.or(scenario.engine().frames);
    let period = scenario.engine().tick_period();
    let start_frame = scenario.particles.frame();
    let started = Instant::now();

    log::info!(
        "headless run: {} particles, {} frames at {} Hz{}",
        scenario.particles.len(),
        limit.map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
        scenario.engine().tick_hz,
        if realtime { ", paced" } else { "" }
    );

    let termination = loop {
        if limit.is_some_and(|n| scenario.particles.frame() - start_frame >= n) {
            break Termination::FrameBudget;
        }

        let tick_start = Instant::now();
        let report = scenario.tick();

        if on_frame(report.frame, &scenario.particles).is_break() {
            break Termination::Stopped;
        }

        if realtime {
            let spent = tick_start.elapsed();
            if spent < period {
                thread::sleep(period - spent);
            }
        }
    };

    log::info!(
        "headless run stopped ({:?}) after {} frames in {:.3} s",
        termination,
        scenario.particles.frame() - start_frame,
        started.elapsed().as_secs_f64()
    );
    termination
}
