// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::TourError;
use crate::mode::CameraMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "city-drive")]
#[command(about = "Headless car-follow camera tour", long_about = None)]
pub struct Cli {
    /// Tour config (JSON); built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    pub frames: u64,

    /// Frame rate, overriding the config
    #[arg(long)]
    pub fps: Option<f32>,

    /// Navigation click as FRAME:MODE, e.g. 120:education (repeatable)
    #[arg(long = "nav", value_name = "FRAME:MODE")]
    pub nav: Vec<NavEvent>,

    /// glTF car model; a placeholder is used when omitted
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Frames before the car model counts as loaded
    #[arg(long, default_value_t = 0)]
    pub load_delay: u64,

    /// Write the per-frame trace as JSON
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Pace frames against the wall clock instead of stepping instantly
    #[arg(long)]
    pub realtime: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Disable console summary output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

/// A navigation click scheduled for a given frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEvent {
    pub frame: u64,
    pub mode: CameraMode,
}

impl FromStr for NavEvent {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, mode) = s
            .split_once(':')
            .ok_or_else(|| TourError::InvalidNavEvent(s.to_string()))?;
        let frame = frame
            .trim()
            .parse()
            .map_err(|_| TourError::InvalidNavEvent(s.to_string()))?;
        Ok(Self {
            frame,
            mode: mode.parse()?,
        })
    }
}
