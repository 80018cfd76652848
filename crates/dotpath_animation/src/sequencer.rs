//! Click sequencer
//!
//! Validates clicks, queues waypoint targets in arrival order and drains the
//! queue one animation session at a time. Draining is only ever started from
//! [`Sequencer::run`] when a click is accepted while idle; clicks arriving
//! during a leg are absorbed into the queue after that leg.

use crate::driver::{run_animation, SessionState, SessionStats};
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::frame::FrameSource;
use dotpath_core::{lerp, ClickEvent, ClickSource, CoordError, ElementId, Point, Surface};
use serde::Serialize;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, info};

/// Default session length in milliseconds
pub const DEFAULT_DURATION_MS: f64 = 2000.0;

/// Default pixel inset centering the marker on its target
pub const DEFAULT_MARKER_INSET: f64 = 5.0;

/// Session parameters shared by the sequencer and the tour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegConfig {
    pub duration_ms: f64,
    pub easing: Easing,
    /// Subtracted from both axes so the marker's center sits on the point
    pub marker_inset: f64,
}

impl LegConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(AnimationError::InvalidDuration(self.duration_ms));
        }
        Ok(())
    }
}

impl Default for LegConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
            marker_inset: DEFAULT_MARKER_INSET,
        }
    }
}

/// Why a click did not enqueue anything
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    #[error("target element no longer exists")]
    Dead,

    #[error("target element `{0}` is not a waypoint")]
    NotWaypoint(String),

    #[error("waypoint `{name}` has unusable coordinates: {source}")]
    Coordinates { name: String, source: CoordError },
}

/// Result of handling one click
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Enqueued while idle; the caller should start draining
    Started,
    /// Enqueued behind a running session
    Queued,
    Ignored(IgnoreReason),
}

/// A completed session
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegReport {
    pub target: Option<ElementId>,
    pub label: String,
    pub from: Point,
    pub to: Point,
    /// Eased progress passed to each draw call
    pub samples: Vec<f64>,
    pub started_at: f64,
    pub finished_at: f64,
}

impl LegReport {
    /// Last progress value drawn, 0 if nothing was drawn
    pub fn final_progress(&self) -> f64 {
        self.samples.last().copied().unwrap_or(0.0)
    }
}

/// Everything a sequencer run did
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SequencerReport {
    pub legs: Vec<LegReport>,
    pub ignored_clicks: usize,
}

#[derive(Clone, Debug)]
struct Waypoint {
    target: ElementId,
    name: String,
    position: Point,
}

/// Owns the click queue and the animation session state
pub struct Sequencer {
    config: LegConfig,
    session: SessionState,
    queue: VecDeque<Waypoint>,
    report: SequencerReport,
}

impl Sequencer {
    pub fn new(config: LegConfig, session: SessionState) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            session,
            queue: VecDeque::new(),
            report: SequencerReport::default(),
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Number of targets waiting behind the current session
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Validate a click and enqueue its target.
    ///
    /// Never fails; unusable targets are logged and counted as ignored.
    pub fn on_click<S: Surface + ?Sized>(&mut self, surface: &S, click: ClickEvent) -> ClickOutcome {
        match self.enqueue(surface, click) {
            Ok(()) if self.session.is_busy() => ClickOutcome::Queued,
            Ok(()) => ClickOutcome::Started,
            Err(reason) => ClickOutcome::Ignored(reason),
        }
    }

    /// Handle clicks until the source closes, draining whenever a click
    /// arrives while idle.
    pub async fn run<H, S>(&mut self, host: &mut H, surface: &mut S) -> Result<SequencerReport>
    where
        H: FrameSource + ClickSource,
        S: Surface + ?Sized,
    {
        while let Some(click) = host.next_click().await {
            if self.on_click(&*surface, click) == ClickOutcome::Started {
                self.drain(host, surface).await?;
            }
        }

        info!(
            legs = self.report.legs.len(),
            ignored = self.report.ignored_clicks,
            "click stream closed"
        );
        Ok(self.take_report())
    }

    /// Run queued legs until the queue is empty
    pub async fn drain<H, S>(&mut self, host: &mut H, surface: &mut S) -> Result<()>
    where
        H: FrameSource + ClickSource,
        S: Surface + ?Sized,
    {
        while let Some(waypoint) = self.queue.pop_front() {
            self.session.end = waypoint.position;
            let (from, to) = (self.session.start, self.session.end);
            let inset = Point::splat(self.config.marker_inset);
            let easing = self.config.easing;

            surface.set_active(waypoint.target, true);
            debug!(target_name = %waypoint.name, %from, %to, "leg started");

            let mut samples = Vec::new();
            let stats = run_animation(
                host,
                &mut self.session,
                |t| easing.apply(t),
                |progress| {
                    samples.push(progress);
                    surface.move_marker(lerp(from, to, progress) - inset);
                },
                self.config.duration_ms,
            )
            .await;

            surface.set_active(waypoint.target, false);
            let stats = stats?;
            self.session.start = self.session.end;
            debug!(target_name = %waypoint.name, frames = stats.frames, "leg finished");

            self.report.legs.push(leg_report(
                Some(waypoint.target),
                waypoint.name,
                from,
                to,
                samples,
                stats,
            ));

            // Clicks that came in while the leg ran
            while let Some(click) = host.try_next_click() {
                let _ = self.enqueue(&*surface, click);
            }
        }
        Ok(())
    }

    /// Report accumulated so far, resetting it
    pub fn take_report(&mut self) -> SequencerReport {
        std::mem::take(&mut self.report)
    }

    fn enqueue<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        click: ClickEvent,
    ) -> std::result::Result<(), IgnoreReason> {
        match classify(surface, click.target) {
            Ok(waypoint) => {
                debug!(target_name = %waypoint.name, queued = self.queue.len() + 1, "click queued");
                self.queue.push_back(waypoint);
                Ok(())
            }
            Err(reason) => {
                debug!(%reason, "click ignored");
                self.report.ignored_clicks += 1;
                Err(reason)
            }
        }
    }
}

fn classify<S: Surface + ?Sized>(
    surface: &S,
    target: ElementId,
) -> std::result::Result<Waypoint, IgnoreReason> {
    let element = surface.element(target).ok_or(IgnoreReason::Dead)?;
    if !element.is_waypoint() {
        return Err(IgnoreReason::NotWaypoint(element.name().to_string()));
    }
    let position = element
        .coordinates()
        .map_err(|source| IgnoreReason::Coordinates {
            name: element.name().to_string(),
            source,
        })?;

    Ok(Waypoint {
        target,
        name: element.name().to_string(),
        position,
    })
}

pub(crate) fn leg_report(
    target: Option<ElementId>,
    label: String,
    from: Point,
    to: Point,
    samples: Vec<f64>,
    stats: SessionStats,
) -> LegReport {
    LegReport {
        target,
        label,
        from,
        to,
        samples,
        started_at: stats.started_at,
        finished_at: stats.finished_at,
    }
}
