use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::core::FrameOutcome;
use crate::scene::FrameRecord;

/// Per-frame camera trace of one headless run
#[derive(Debug, Serialize)]
pub struct Trace {
    pub generated_at: String,
    pub fps: f32,
    pub frames: Vec<FrameRecord>,
}

impl Trace {
    pub fn new(fps: f32) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            fps,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, record: FrameRecord) {
        self.frames.push(record);
    }

    /// Frames on which the controller skipped tracking for a missing model
    pub fn skipped(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f.outcome, FrameOutcome::Skipped))
            .count()
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("Failed to create trace {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write trace {:?}", path))?;
        Ok(())
    }
}
