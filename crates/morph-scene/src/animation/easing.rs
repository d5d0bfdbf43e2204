//! Cubic bezier easing evaluation.
//!
//! The engine's bezier curves are CSS-style: two control points with x values
//! in [0, 1]. Evaluation uses Newton-Raphson iteration to find the curve
//! parameter for a given time fraction, then evaluates the y coordinate.

/// Evaluate a cubic bezier timing curve at linear progress `t`.
///
/// # Arguments
/// * `x1`, `y1`, `x2`, `y2` - Control points; x values must be in [0, 1]
/// * `t` - Linear progress from 0.0 to 1.0
///
/// # Returns
/// Eased progress (may leave [0, 1] for overshooting y control points).
pub fn bezier_progress(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    debug_assert!(
        (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
        "Bezier x values must be in [0, 1]"
    );

    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let s = solve_bezier_x(x1, x2, t);
    bezier_y(y1, y2, s)
}

/// Solve for the curve parameter in the bezier x equation via Newton-Raphson.
fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_x(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_x_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t -= x / dx;
        t = t.clamp(0.0, 1.0);
    }

    t
}

/// x(t) = 3(1-t)²t·x1 + 3(1-t)t²·x2 + t³
#[inline]
fn bezier_x(x1: f32, x2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3
}

#[inline]
fn bezier_y(y1: f32, y2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

/// dx/dt = 3(1-t)²·x1 + 6(1-t)t·(x2-x1) + 3t²·(1-x2)
#[inline]
fn bezier_x_derivative(x1: f32, x2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}
