//! Tilt Labyrinth headless driver
//!
//! Plays the campaign from a recorded or generated tilt stream, doing what the
//! game screen does on each outcome: retry on a hole, advance on an end tile.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tilt_labyrinth::Settings;
use tilt_labyrinth::consts::GRAVITY_EARTH;
use tilt_labyrinth::sim::{Outcome, Session, SessionPhase, TiltSample};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the tilt labyrinth simulation headless", long_about = None)]
struct Args {
    /// Settings JSON (built-in defaults when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Device screen size in pixels, WIDTHxHEIGHT
    #[arg(long, default_value = "2340x1080", value_parser = parse_screen)]
    screen: (u32, u32),
    /// JSON array of [x, y, z] samples to replay instead of generated tilt
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Seed for the generated tilt stream
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of generated samples
    #[arg(long, default_value_t = 10_000)]
    ticks: usize,
}

fn parse_screen(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

/// Wandering tilt, like a hand that can't keep still
struct RandomTilt {
    rng: Pcg32,
    tilt: [f32; 2],
}

impl RandomTilt {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tilt: [0.0; 2],
        }
    }

    fn next_sample(&mut self) -> TiltSample {
        for axis in &mut self.tilt {
            *axis = (*axis + self.rng.random_range(-0.5..0.5)).clamp(-10.0, 10.0);
        }
        let z = GRAVITY_EARTH as f32 + self.rng.random_range(-0.2..0.2);
        TiltSample::new(self.tilt[0], self.tilt[1], z)
    }
}

/// An explicit settings file must load; only an absent one falls back to defaults
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("load settings {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn load_samples(args: &Args) -> Result<Vec<TiltSample>> {
    match &args.replay {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read replay {}", path.display()))?;
            let raw: Vec<[f32; 3]> = serde_json::from_str(&json).context("parse replay samples")?;
            if raw.is_empty() {
                bail!("replay {} has no samples", path.display());
            }
            Ok(raw.into_iter().map(TiltSample::from).collect())
        }
        None => {
            let mut tilt = RandomTilt::new(args.seed);
            Ok((0..args.ticks).map(|_| tilt.next_sample()).collect())
        }
    }
}

#[derive(Debug, Default)]
struct RunStats {
    ticks: usize,
    failures: usize,
    levels_cleared: usize,
    shakes: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(args.settings.as_deref())?;
    let (width, height) = args.screen;
    let surface_height = height.saturating_sub(settings.display.reserved_height);

    let mut session = Session::from_settings(&settings, height)?;
    session.set_surface(width, surface_height);
    log::info!(
        "Surface {}x{}, ball radius {:.1}, {} levels",
        width,
        surface_height,
        session.engine().radius(),
        session.level_count()
    );

    let samples = load_samples(&args)?;
    let mut stats = RunStats::default();
    session.start()?;

    for sample in samples {
        let report = session.on_tilt(sample);
        stats.ticks += 1;
        if report.shake.is_some_and(|r| r.shaking) {
            stats.shakes += 1;
        }

        match report.outcome {
            Some(Outcome::Failed) => {
                stats.failures += 1;
                session.reset()?;
                session.start()?;
            }
            Some(Outcome::Succeeded) => {
                stats.levels_cleared += 1;
                if session.advance()? == SessionPhase::Completed {
                    break;
                }
            }
            _ => {}
        }
    }

    let pos = session.snapshot().read().position;
    println!(
        "{} ticks, {} levels cleared, {} falls, {} shakes; level {} ({}), ball at ({:.1}, {:.1}), {:?}",
        stats.ticks,
        stats.levels_cleared,
        stats.failures,
        stats.shakes,
        session.level_index() + 1,
        session.engine().level_name().unwrap_or("-"),
        pos.x,
        pos.y,
        session.phase()
    );
    Ok(())
}
