//! Deterministic frame and click source
//!
//! Time only moves when something waits on it: each frame advances the
//! virtual clock by a fixed tick, pauses advance it by their length, and an
//! idle wait for the next click jumps straight to that click's timestamp.

use crate::error::{AnimationError, Result};
use crate::frame::FrameSource;
use dotpath_core::{ClickEvent, ClickSource, ElementId};
use std::collections::VecDeque;

/// Default virtual milliseconds between frames
pub const DEFAULT_TICK_MS: f64 = 16.0;

/// A click scheduled at a virtual timestamp
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledClick {
    pub at_ms: f64,
    pub event: ClickEvent,
}

/// Virtual-clock host for headless runs and tests
#[derive(Debug)]
pub struct Headless {
    clock: f64,
    tick_ms: f64,
    frame_count: u64,
    script: VecDeque<ScheduledClick>,
}

impl Headless {
    pub fn new(tick_ms: f64) -> Result<Self> {
        if !(tick_ms.is_finite() && tick_ms > 0.0) {
            return Err(AnimationError::InvalidFrameInterval(tick_ms));
        }
        Ok(Self {
            clock: 0.0,
            tick_ms,
            frame_count: 0,
            script: VecDeque::new(),
        })
    }

    /// Schedule a click, builder style
    pub fn with_click(mut self, at_ms: f64, target: ElementId) -> Self {
        self.push_click(at_ms, target);
        self
    }

    /// Schedule a click. Clicks sharing a timestamp keep insertion order.
    pub fn push_click(&mut self, at_ms: f64, target: ElementId) {
        let index = self.script.partition_point(|c| c.at_ms <= at_ms);
        self.script.insert(
            index,
            ScheduledClick {
                at_ms,
                event: ClickEvent::new(target),
            },
        );
    }

    /// Frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Clicks not yet delivered
    pub fn pending_clicks(&self) -> usize {
        self.script.len()
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self {
            clock: 0.0,
            tick_ms: DEFAULT_TICK_MS,
            frame_count: 0,
            script: VecDeque::new(),
        }
    }
}

impl FrameSource for Headless {
    fn now(&self) -> f64 {
        self.clock
    }

    async fn next_frame(&mut self) -> f64 {
        self.clock += self.tick_ms;
        self.frame_count += 1;
        self.clock
    }

    async fn pause(&mut self, ms: u64) {
        self.clock += ms as f64;
    }
}

impl ClickSource for Headless {
    async fn next_click(&mut self) -> Option<ClickEvent> {
        let click = self.script.pop_front()?;
        if click.at_ms > self.clock {
            self.clock = click.at_ms;
        }
        Some(click.event)
    }

    fn try_next_click(&mut self) -> Option<ClickEvent> {
        match self.script.front() {
            Some(click) if click.at_ms <= self.clock => self.script.pop_front().map(|c| c.event),
            _ => None,
        }
    }
}
