use std::thread;
use std::time::{Duration, Instant};

use crate::core::clock::Clock;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Infinite iterator over wall-clock frames
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    time: f32,
    clock: Clock,
    frame_budget: Option<Duration>,
    frame_start: Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        Self {
            frame_number: 0,
            time: 0.0,
            clock: Clock::new(),
            frame_budget: None,
            frame_start: Instant::now(),
        }
    }

    /// Sleep between frames so iteration runs at most at `fps`
    pub fn paced(mut self, fps: f32) -> Self {
        self.frame_budget = (fps > 0.0).then(|| Duration::from_secs_f32(1.0 / fps));
        self
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if let Some(budget) = self.frame_budget {
            let spent = self.frame_start.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
            self.frame_start = Instant::now();
        }

        let delta = if self.frame_number == 0 {
            self.clock.reset();
            0.0
        } else {
            self.clock.tick()
        };
        self.time += delta;

        let info = FrameInfo::new(self.frame_number, self.time, delta);
        self.frame_number += 1;
        Some(info)
    }
}

/// Deterministic frames at a fixed step, for headless runs and tests
#[derive(Debug, Clone)]
pub struct FixedFrames {
    frame_number: u64,
    step: f32,
}

impl FixedFrames {
    pub fn new(fps: f32) -> Self {
        Self {
            frame_number: 0,
            step: if fps > 0.0 { 1.0 / fps } else { 0.0 },
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Iterator for FixedFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let number = self.frame_number;
        let delta = if number == 0 { 0.0 } else { self.step };
        self.frame_number += 1;
        Some(FrameInfo::new(number, number as f32 * self.step, delta))
    }
}
