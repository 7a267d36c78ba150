use balloonsim::{ScenarioConfig, Scenario};
use balloonsim::{bench_step, run_headless};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::ops::ControlFlow;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "balloon.yaml")]
    file_name: String,

    /// Step without a window and log positions instead
    #[arg(long)]
    headless: bool,

    /// Number of frames to run; overrides the scenario
    #[arg(long)]
    frames: Option<u64>,

    /// Pace headless ticks to the scenario tick rate
    #[arg(long)]
    realtime: bool,

    /// Time the step for growing rings and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    if !config_path.exists() {
        log::warn!("{} not found, using the built-in balloon", config_path.display());
        return Ok(ScenarioConfig::default());
    }

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        init_logger();
        bench_step();
        return Ok(());
    }

    let viewer = cfg!(feature = "viewer") && !args.headless;
    if !viewer {
        init_logger();
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if args.frames.is_some() {
        scenario_cfg.engine.frames = args.frames;
    }
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    if viewer {
        #[cfg(feature = "viewer")]
        balloonsim::run_2d(scenario);
        return Ok(());
    }

    // Without a frame budget run ten seconds of simulated time
    let frames = scenario
        .engine()
        .frames
        .unwrap_or((scenario.engine().tick_hz * 10.0).ceil() as u64);
    let every = scenario.engine().tick_hz.round().max(1.0) as u64;

    run_headless(&mut scenario, Some(frames), args.realtime, |frame, particles| {
        if frame % every == 0 {
            let lowest = particles.positions().map(|p| p.y).fold(f64::MIN, f64::max);
            log::info!("frame {frame}: lowest particle center at y = {lowest:.3}");
        }
        ControlFlow::Continue(())
    });

    for (i, p) in scenario.particles.positions().enumerate() {
        println!("{i},{:.6},{:.6}", p.x, p.y);
    }

    Ok(())
}
