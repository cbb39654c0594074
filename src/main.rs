use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use city_drive::cli::{Cli, NavEvent};
use city_drive::config::TourConfig;
use city_drive::frame::{FixedFrames, FrameInfo, FrameIterator};
use city_drive::loaders::{load_car_model, CarModel};
use city_drive::scene::Scene;
use city_drive::trace::Trace;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TourConfig::load(path).context("Could not load tour config")?,
        None => TourConfig::default(),
    };
    if let Some(fps) = cli.fps {
        config.fps = fps;
        config.validate().context("Invalid --fps")?;
    }

    if cli.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let model = match &cli.model {
        Some(path) => load_car_model(path)?,
        None => {
            warn!("No car model given, using placeholder");
            CarModel::placeholder()
        }
    };

    let trace = run(&cli, &config, model);

    if let Some(path) = &cli.trace {
        trace.write(path)?;
        info!("Trace written to {:?}", path);
    }

    if !cli.no_ui {
        let last = trace.frames.last();
        println!(
            "{} frames at {} fps, {} skipped before the model loaded",
            trace.frames.len(),
            trace.fps,
            trace.skipped()
        );
        if let Some(last) = last {
            println!(
                "final mode {}: eye {:?} looking at {:?}",
                last.mode, last.eye, last.look_at
            );
        }
    }

    Ok(())
}

/// Drive the scene frame by frame, replaying scheduled navigation clicks
fn run(cli: &Cli, config: &TourConfig, model: CarModel) -> Trace {
    let mut scene = Scene::new(config);
    let mut trace = Trace::new(config.fps);

    let mut schedule: Vec<NavEvent> = cli.nav.clone();
    schedule.sort_by_key(|event| event.frame);
    let mut schedule = schedule.into_iter().peekable();
    let mut pending_model = Some(model);

    let frames: Box<dyn Iterator<Item = FrameInfo>> = if cli.realtime {
        Box::new(FrameIterator::new().paced(config.fps))
    } else {
        Box::new(FixedFrames::new(config.fps))
    };

    for info in frames.take(cli.frames as usize) {
        if info.number >= cli.load_delay {
            if let Some(model) = pending_model.take() {
                scene.attach_model(model);
            }
        }

        while let Some(event) = schedule.next_if(|event| event.frame <= info.number) {
            scene.navigate(event.mode);
        }

        trace.push(scene.tick(info.delta));
    }

    trace
}
