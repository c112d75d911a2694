use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use colorgate_rs::calibration::{
    Controller, ControllerConfig, DirectoryFrameSource, GrayWorldEstimator, Health, ImageFrameDecoder,
    Publisher, RgbFrame, Scheduler, ToggleOutcome, Transform,
};
use colorgate_rs::logger::{self, info, warn};

#[derive(Parser)]
#[command(name = "colorgate")]
#[command(about = "Recalibrate a color correction from a frame stream and publish it when healthy")]
#[command(version)]
struct Cli {
    /// Directory of JPEG/PNG frames replayed as the camera stream.
    #[arg(long)]
    frames: PathBuf,

    /// Frame arrival rate.
    #[arg(long, default_value = "10.0")]
    fps: f64,

    /// Seconds between scheduled recalibration attempts.
    #[arg(long, default_value = "2.0")]
    period_secs: f64,

    /// Estimates with health at or below this are discarded.
    #[arg(long, default_value = "0.001")]
    health_min: f64,

    /// Write every corrected frame as PNG into this directory.
    #[arg(long)]
    corrected_out: Option<PathBuf>,

    /// Engage immediately after the first frame instead of waiting for a toggle.
    #[arg(long)]
    engage: bool,

    /// Log cycle timings at debug instead of info.
    #[arg(long)]
    quiet: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log: String,
}

/// Logs calibration changes and optionally stores corrected frames.
struct CliPublisher {
    corrected_out: Option<PathBuf>,
    written: AtomicU64,
}

impl Publisher for CliPublisher {
    fn on_transform_changed(&self, transform: &Transform) {
        info!(%transform, "Transform published");
    }

    fn on_health_reported(&self, health: Health) {
        info!(health, "Health published");
    }

    fn on_corrected_frame(&self, frame: &RgbFrame) {
        let Some(dir) = &self.corrected_out else {
            return;
        };
        let index = self.written.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!("corrected_{index:06}.png"));
        let Some(img) = image::RgbImage::from_raw(frame.width, frame.height, frame.data.clone()) else {
            warn!("Corrected frame has inconsistent size {}x{}", frame.width, frame.height);
            return;
        };
        if let Err(e) = img.save(&path) {
            warn!("Failed to write {}: {}", path.display(), e);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(&cli.log);

    anyhow::ensure!(cli.fps > 0.0 && cli.fps.is_finite(), "--fps must be positive");
    anyhow::ensure!(
        cli.period_secs > 0.0 && cli.period_secs.is_finite(),
        "--period-secs must be positive"
    );

    if let Some(dir) = &cli.corrected_out {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let config = ControllerConfig::builder()
        .period(Duration::from_secs_f64(cli.period_secs))
        .health_min(cli.health_min)
        .publish_corrected(cli.corrected_out.is_some())
        .verbose(!cli.quiet)
        .build();
    let period = config.period;

    let publisher = CliPublisher {
        corrected_out: cli.corrected_out.clone(),
        written: AtomicU64::new(0),
    };
    let controller = Arc::new(Controller::with_custom(
        ImageFrameDecoder,
        GrayWorldEstimator,
        publisher,
        config,
    )?);

    let mut source = DirectoryFrameSource::open(&cli.frames)
        .with_context(|| format!("opening frame directory {}", cli.frames.display()))?;
    info!("Replaying {} frames from {} at {} fps", source.len(), cli.frames.display(), cli.fps);

    let running = Arc::new(AtomicBool::new(true));
    let frame_interval = Duration::from_secs_f64(1.0 / cli.fps);
    let feeder = {
        let controller = Arc::clone(&controller);
        let running = Arc::clone(&running);
        thread::Builder::new()
            .name("frame-source".to_string())
            .spawn(move || {
                while running.load(Ordering::Relaxed) {
                    match source.next_frame() {
                        Ok(frame) => controller.on_frame(frame),
                        Err(e) => warn!("Failed to read frame: {}", e),
                    }
                    thread::sleep(frame_interval);
                }
            })?
    };

    if cli.engage {
        while !controller.frames().has_frame() {
            thread::sleep(frame_interval);
        }
        controller.toggle();
    }

    let scheduler = Scheduler::new(period).spawn(Arc::clone(&controller))?;

    info!("Commands: <enter>/t = toggle, on/off = scheduled switch, q = quit");
    for line in std::io::stdin().lock().lines() {
        match line?.trim() {
            "" | "t" => match controller.toggle() {
                ToggleOutcome::Engaged(outcome) => info!("Engaged: {:?}", outcome),
                ToggleOutcome::Disengaged => info!("Disengaged"),
                ToggleOutcome::Ignored => info!("Toggle ignored, no frame yet"),
            },
            "on" => controller.set_active(true),
            "off" => controller.set_active(false),
            "q" | "quit" => break,
            other => warn!("Unknown command {:?}", other),
        }
    }

    running.store(false, Ordering::Relaxed);
    let ticks = scheduler.shutdown();
    if feeder.join().is_err() {
        warn!("Frame source thread panicked");
    }

    let state = controller.snapshot();
    info!(
        ticks,
        frames = controller.frames().received(),
        engaged = state.is_engaged(),
        transform = %state.transform(),
        "Shutting down"
    );
    Ok(())
}
