//! Easing curves
//!
//! The polynomial families the surface's transitions are tuned with, plus an
//! arbitrary cubic bezier for embedder-supplied curves. Source-to-curve
//! mapping lives with the navigation machine; this module only evaluates.

/// Easing function applied to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Ease {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    /// Cubic bezier with control points (x1, y1, x2, y2), CSS-style.
    Bezier(f32, f32, f32, f32),
}

impl Ease {
    /// Evaluate the curve at progress `t` in `[0, 1]`.
    pub fn sample(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::QuartIn => t * t * t * t,
            Ease::QuartOut => 1.0 - (1.0 - t).powi(4),
            Ease::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Ease::Bezier(x1, y1, x2, y2) => bezier_sample(t, x1, y1, x2, y2),
        }
    }
}

/// Solve a CSS cubic bezier: find the parameter whose x equals `t` by
/// Newton-Raphson, falling back to bisection when the derivative is too
/// flat, then evaluate y there.
fn bezier_sample(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);
    let target = t as f64;

    let curve_x = |u: f64| 3.0 * u * (1.0 - u) * (1.0 - u) * x1 + 3.0 * u * u * (1.0 - u) * x2 + u * u * u;
    let curve_y = |u: f64| 3.0 * u * (1.0 - u) * (1.0 - u) * y1 + 3.0 * u * u * (1.0 - u) * y2 + u * u * u;
    let deriv_x = |u: f64| {
        3.0 * (1.0 - u) * (1.0 - u) * x1
            + 6.0 * u * (1.0 - u) * (x2 - x1)
            + 3.0 * u * u * (1.0 - x2)
    };

    let mut u = target;
    for _ in 0..8 {
        let slope = deriv_x(u);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= (curve_x(u) - target) / slope;
        u = u.clamp(0.0, 1.0);
    }

    if (curve_x(u) - target).abs() > 1e-4 {
        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        for _ in 0..20 {
            u = (lo + hi) / 2.0;
            if curve_x(u) < target {
                lo = u;
            } else {
                hi = u;
            }
        }
    }

    curve_y(u) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_fixed() {
        let curves = [
            Ease::Linear,
            Ease::QuadOut,
            Ease::CubicOut,
            Ease::CubicInOut,
            Ease::QuartInOut,
            Ease::Bezier(0.25, 0.1, 0.25, 1.0),
        ];
        for ease in curves {
            assert_eq!(ease.sample(0.0), 0.0, "{ease:?} at 0");
            assert!((ease.sample(1.0) - 1.0).abs() < 1e-5, "{ease:?} at 1");
        }
    }

    #[test]
    fn test_out_curves_front_load() {
        // An out curve covers more than half the distance by half time.
        assert!(Ease::CubicOut.sample(0.5) > 0.5);
        assert!(Ease::QuadOut.sample(0.5) > 0.5);
        // In-out curves hit the midpoint at half time.
        assert!((Ease::QuartInOut.sample(0.5) - 0.5).abs() < 1e-5);
        assert!((Ease::CubicInOut.sample(0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bezier_monotonic() {
        let ease = Ease::Bezier(0.42, 0.0, 0.58, 1.0);
        let mut prev = 0.0;
        for i in 0..=20 {
            let v = ease.sample(i as f32 / 20.0);
            assert!(v >= prev - 1e-5);
            prev = v;
        }
    }

    #[test]
    fn test_clamps_out_of_range_progress() {
        assert_eq!(Ease::CubicOut.sample(-0.5), 0.0);
        assert_eq!(Ease::CubicOut.sample(1.5), 1.0);
    }
}
