//! Autoplay tour
//!
//! Walks a fixed checkpoint path without any clicks: wait, then animate
//! every consecutive pair of checkpoints with a short pause after each leg.

use crate::driver::{run_animation, SessionState};
use crate::error::Result;
use crate::frame::FrameSource;
use crate::sequencer::{leg_report, LegConfig, LegReport};
use dotpath_core::{lerp, Point, Surface};
use tracing::{debug, info};

/// Default closed path; the first and last checkpoint coincide
pub const DEFAULT_CHECKPOINTS: [Point; 7] = [
    Point::new(10.0, 10.0),
    Point::new(40.0, 65.0),
    Point::new(180.0, 135.0),
    Point::new(120.0, 265.0),
    Point::new(320.0, 225.0),
    Point::new(320.0, 45.0),
    Point::new(10.0, 10.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TourConfig {
    pub leg: LegConfig,
    /// Wait before the first leg
    pub start_delay_ms: u64,
    /// Wait after every leg
    pub leg_pause_ms: u64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            leg: LegConfig::default(),
            start_delay_ms: 1500,
            leg_pause_ms: 500,
        }
    }
}

/// Animate through `checkpoints` pairwise. Fewer than two checkpoints
/// produce no legs.
pub async fn run_tour<F, S>(
    frames: &mut F,
    surface: &mut S,
    checkpoints: &[Point],
    config: TourConfig,
) -> Result<Vec<LegReport>>
where
    F: FrameSource + ?Sized,
    S: Surface + ?Sized,
{
    config.leg.validate()?;

    let mut legs = Vec::with_capacity(checkpoints.len().saturating_sub(1));
    frames.pause(config.start_delay_ms).await;

    let easing = config.leg.easing;
    let inset = Point::splat(config.leg.marker_inset);

    for (index, pair) in checkpoints.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let mut session = SessionState::new(from, to);
        let mut samples = Vec::new();

        debug!(leg = index + 1, %from, %to, "tour leg started");
        let stats = run_animation(
            frames,
            &mut session,
            |t| easing.apply(t),
            |progress| {
                samples.push(progress);
                surface.move_marker(lerp(from, to, progress) - inset);
            },
            config.leg.duration_ms,
        )
        .await?;
        frames.pause(config.leg_pause_ms).await;

        legs.push(leg_report(
            None,
            format!("checkpoint{}", index + 2),
            from,
            to,
            samples,
            stats,
        ));
    }

    info!(legs = legs.len(), "tour finished");
    Ok(legs)
}
