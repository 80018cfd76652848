//! Easing functions for animations
//!
//! Every curve here is a base "in" curve mapping linear progress in [0, 1]
//! to eased progress. [`make_ease_in_out`] mirrors any base curve into a
//! symmetric ease-in/ease-out timing function.

use crate::error::AnimationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    #[default]
    Bounce,
    Linear,
    Quad,
    Cubic,
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Apply the base curve to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Bounce => bounce(t),
            Easing::Linear => t,
            Easing::Quad => t * t,
            Easing::Cubic => t * t * t,
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// The symmetric ease-in/ease-out timing function built on this curve
    pub fn ease_in_out(self) -> impl Fn(f64) -> f64 {
        make_ease_in_out(move |t| self.apply(t))
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "bounce" => return Ok(Easing::Bounce),
            "linear" => return Ok(Easing::Linear),
            "quad" => return Ok(Easing::Quad),
            "cubic" => return Ok(Easing::Cubic),
            _ => {}
        }

        let args = name
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| AnimationError::UnknownEasing(s.to_string()))?;

        let values = args
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| AnimationError::UnknownEasing(s.to_string()))?;

        match values.as_slice() {
            [x1, y1, x2, y2] => Ok(Easing::CubicBezier(*x1, *y1, *x2, *y2)),
            _ => Err(AnimationError::UnknownEasing(s.to_string())),
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = AnimationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Bounce => f.write_str("bounce"),
            Easing::Linear => f.write_str("linear"),
            Easing::Quad => f.write_str("quad"),
            Easing::Cubic => f.write_str("cubic"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Piecewise-quadratic bounce curve.
///
/// Walks the thresholds `(7 - 4a) / 11` with `a = 0, 1, 1.5, 1.75, ..` and
/// step `b` halving each time, returning `b² - ((11 - 6a - 11t) / 4)²` for
/// the first segment `t` falls into. Input outside [0, 1] is clamped to the
/// endpoints; the threshold walk never reaches inputs below `-1/11`.
pub fn bounce(t: f64) -> f64 {
    if t.is_nan() {
        return t;
    }
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut a = 0.0_f64;
    let mut b = 1.0_f64;
    loop {
        if t >= (7.0 - 4.0 * a) / 11.0 {
            return -((11.0 - 6.0 * a - 11.0 * t) / 4.0).powi(2) + b.powi(2);
        }
        a += b;
        b /= 2.0;
    }
}

/// Wrap a base curve into a symmetric ease-in/ease-out timing function.
///
/// The first half runs the base curve compressed into [0, 0.5]; the second
/// half is its point reflection, so `f(t) + f(1 - t) == 1`.
pub fn make_ease_in_out<F>(base: F) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    move |t| {
        if t < 0.5 {
            base(2.0 * t) / 2.0
        } else {
            (2.0 - base(2.0 * (1.0 - t))) / 2.0
        }
    }
}

/// Cubic bezier easing calculation (matches CSS / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t;

    // Solve for parameter `p` where bezier_x(p) == x
    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2)
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³ in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn samples() -> impl Iterator<Item = f64> {
        (0..=1000).map(|i| i as f64 / 1000.0)
    }

    #[test]
    fn test_bounce_endpoints() {
        assert_eq!(bounce(0.0), 0.0);
        assert_eq!(bounce(1.0), 1.0);
    }

    #[test]
    fn test_bounce_segments() {
        // Each threshold starts a segment at zero
        for threshold in [7.0 / 11.0, 3.0 / 11.0, 1.0 / 11.0] {
            assert!(bounce(threshold).abs() < EPS);
        }
        // Peaks of the inner segments are b²
        assert!((bounce(5.0 / 11.0) - 0.25).abs() < EPS);
        assert!((bounce(2.0 / 11.0) - 0.0625).abs() < EPS);
        assert!((bounce(0.5 / 11.0) - 0.015625).abs() < EPS);
    }

    #[test]
    fn test_bounce_nan_passthrough() {
        assert!(bounce(f64::NAN).is_nan());
    }

    #[test]
    fn test_bounce_out_of_range_is_clamped() {
        assert_eq!(bounce(-0.2), 0.0);
        assert_eq!(bounce(-1e9), 0.0);
        assert_eq!(bounce(1.5), 1.0);

        // Past the end the reflected half feeds bounce a negative input
        let timing = make_ease_in_out(bounce);
        assert_eq!(timing(1.1), 1.0);
        assert_eq!(timing(-0.1), 0.0);
        assert_eq!(Easing::Bounce.ease_in_out()(3.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_bounds() {
        let timing = make_ease_in_out(bounce);
        assert_eq!(timing(0.0), 0.0);
        assert_eq!(timing(1.0), 1.0);
        assert_eq!(timing(0.5), 0.5);

        for t in samples() {
            let v = timing(t);
            assert!((0.0..=1.0).contains(&v), "timing({t}) = {v}");
        }
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        for easing in [
            Easing::Bounce,
            Easing::Linear,
            Easing::Quad,
            Easing::Cubic,
            Easing::CubicBezier(0.42, 0.0, 0.58, 1.0),
        ] {
            let timing = easing.ease_in_out();
            for t in samples() {
                let sum = timing(t) + timing(1.0 - t);
                assert!((sum - 1.0).abs() < 1e-6, "{easing}: t = {t}, sum = {sum}");
            }
        }
    }

    #[test]
    fn test_quad_ease_in_out_is_monotonic() {
        let timing = Easing::Quad.ease_in_out();
        let mut last = timing(0.0);
        for t in samples().skip(1) {
            let v = timing(t);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bounce".parse::<Easing>().unwrap(), Easing::Bounce);
        assert_eq!(" Linear ".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!(
            "cubic-bezier(0.25, 0.1, 0.25, 1)".parse::<Easing>().unwrap(),
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)
        );

        assert!("elastic".parse::<Easing>().is_err());
        assert!("cubic-bezier(1, 2, 3)".parse::<Easing>().is_err());
        assert!("cubic-bezier(a, b, c, d)".parse::<Easing>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Easing::Quad).unwrap();
        assert_eq!(json, r#""quad""#);

        let back: Easing = serde_json::from_str(r#""cubic-bezier(0, 0, 1, 1)""#).unwrap();
        assert_eq!(back, Easing::CubicBezier(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_cubic_bezier_endpoints() {
        let ease = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        let mid = ease.apply(0.5);
        assert!(mid > 0.5 && mid < 1.0);
    }
}
