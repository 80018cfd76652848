//! Wall-clock frame and click source
//!
//! Frames come from a tokio interval; clicks arrive over an unbounded
//! channel from any producer holding a [`ClickSender`].

use crate::error::{AnimationError, Result};
use crate::frame::FrameSource;
use dotpath_core::{ClickEvent, ClickSource, ElementId};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Producer half of a realtime click stream
#[derive(Clone, Debug)]
pub struct ClickSender {
    tx: mpsc::UnboundedSender<ClickEvent>,
}

impl ClickSender {
    /// Deliver a click. Returns false once the receiving host is gone.
    pub fn click(&self, target: ElementId) -> bool {
        self.tx.send(ClickEvent::new(target)).is_ok()
    }
}

/// Host driven by the wall clock.
///
/// Must be created inside a tokio runtime with the time driver enabled.
#[derive(Debug)]
pub struct Realtime {
    origin: Instant,
    interval: Interval,
    clicks: mpsc::UnboundedReceiver<ClickEvent>,
}

impl Realtime {
    pub fn new(frame_interval_ms: f64) -> Result<(Self, ClickSender)> {
        if !(frame_interval_ms.is_finite() && frame_interval_ms > 0.0) {
            return Err(AnimationError::InvalidFrameInterval(frame_interval_ms));
        }

        let mut interval = time::interval(Duration::from_secs_f64(frame_interval_ms / 1000.0));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (tx, clicks) = mpsc::unbounded_channel();

        Ok((
            Self {
                origin: Instant::now(),
                interval,
                clicks,
            },
            ClickSender { tx },
        ))
    }
}

impl FrameSource for Realtime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    async fn next_frame(&mut self) -> f64 {
        self.interval.tick().await;
        self.now()
    }

    async fn pause(&mut self, ms: u64) {
        time::sleep(Duration::from_millis(ms)).await;
    }
}

impl ClickSource for Realtime {
    async fn next_click(&mut self) -> Option<ClickEvent> {
        self.clicks.recv().await
    }

    fn try_next_click(&mut self) -> Option<ClickEvent> {
        self.clicks.try_recv().ok()
    }
}
