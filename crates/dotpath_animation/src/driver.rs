//! Animation driver
//!
//! Runs one time-bounded session: progress is sampled once per frame,
//! eased, and handed to a draw callback until the duration has elapsed.

use crate::easing::make_ease_in_out;
use crate::error::{AnimationError, Result};
use crate::frame::FrameSource;
use dotpath_core::Point;
use serde::Serialize;
use tracing::trace;

/// State of the single animation session.
///
/// `busy` is the mutual-exclusion gate: the driver sets it when a session
/// starts and clears it when the session completes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionState {
    pub start: Point,
    pub end: Point,
    busy: bool,
}

impl SessionState {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            busy: false,
        }
    }

    /// Seed from a checkpoint path: first point as start, second as end
    pub fn from_checkpoints(checkpoints: &[Point]) -> Self {
        let start = checkpoints.first().copied().unwrap_or(Point::ORIGIN);
        let end = checkpoints.get(1).copied().unwrap_or(start);
        Self::new(start, end)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// What one session did
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SessionStats {
    pub started_at: f64,
    pub finished_at: f64,
    /// Number of draw calls
    pub frames: u32,
    /// Progress passed to the last draw call
    pub last_progress: f64,
}

/// Run one animation session to completion.
///
/// `timing` is the base curve; it is wrapped with [`make_ease_in_out`]
/// before sampling. Each frame computes `fraction = elapsed / duration`:
/// past 1 the session ends without drawing, otherwise `draw` receives the
/// eased progress, and a fraction of exactly 1 ends the session after that
/// final draw.
pub async fn run_animation<F, T, D>(
    frames: &mut F,
    session: &mut SessionState,
    timing: T,
    mut draw: D,
    duration_ms: f64,
) -> Result<SessionStats>
where
    F: FrameSource + ?Sized,
    T: Fn(f64) -> f64,
    D: FnMut(f64),
{
    if !(duration_ms.is_finite() && duration_ms > 0.0) {
        return Err(AnimationError::InvalidDuration(duration_ms));
    }

    let timing = make_ease_in_out(timing);
    let start = frames.now();
    session.busy = true;

    let mut stats = SessionStats {
        started_at: start,
        finished_at: start,
        frames: 0,
        last_progress: 0.0,
    };

    loop {
        let now = frames.next_frame().await;
        let fraction = (now - start) / duration_ms;
        if fraction > 1.0 {
            break;
        }

        let progress = timing(fraction);
        draw(progress);
        stats.frames += 1;
        stats.last_progress = progress;
        trace!(fraction, progress, "animation frame");

        if fraction >= 1.0 {
            break;
        }
    }

    session.busy = false;
    stats.finished_at = frames.now();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::{bounce, Easing};
    use crate::headless::Headless;

    #[tokio::test]
    async fn test_exact_duration_ends_on_full_progress() {
        let mut host = Headless::new(16.0).unwrap();
        let mut session = SessionState::default();
        let mut samples = Vec::new();

        let stats = run_animation(&mut host, &mut session, bounce, |p| samples.push(p), 2000.0)
            .await
            .unwrap();

        // 2000 / 16 = 125 frames, the last one lands exactly on 1
        assert_eq!(stats.frames, 125);
        assert_eq!(samples.len(), 125);
        assert_eq!(*samples.last().unwrap(), 1.0);
        assert_eq!(stats.finished_at, 2000.0);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_overshoot_ends_without_drawing() {
        // 100 / 30 is not whole: frames at 30, 60, 90, then 120 overshoots
        let mut host = Headless::new(30.0).unwrap();
        let mut session = SessionState::default();
        let mut samples = Vec::new();

        let stats = run_animation(
            &mut host,
            &mut session,
            |t| Easing::Linear.apply(t),
            |p| samples.push(p),
            100.0,
        )
        .await
        .unwrap();

        assert_eq!(stats.frames, 3);
        for (got, want) in samples.iter().zip([0.3, 0.6, 0.9]) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
        assert_eq!(stats.finished_at, 120.0);
        assert_eq!(host.frame_count(), 4);
    }

    #[tokio::test]
    async fn test_invalid_duration() {
        let mut host = Headless::default();
        let mut session = SessionState::default();

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = run_animation(&mut host, &mut session, bounce, |_| {}, bad)
                .await
                .unwrap_err();
            assert!(matches!(err, AnimationError::InvalidDuration(_)));
        }
        assert!(!session.is_busy());
        assert_eq!(host.frame_count(), 0);
    }

    #[test]
    fn test_session_from_checkpoints() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(40.0, 65.0);

        assert_eq!(SessionState::from_checkpoints(&[a, b]), SessionState::new(a, b));
        assert_eq!(SessionState::from_checkpoints(&[a]), SessionState::new(a, a));
        assert_eq!(
            SessionState::from_checkpoints(&[]),
            SessionState::new(Point::ORIGIN, Point::ORIGIN)
        );
    }
}
