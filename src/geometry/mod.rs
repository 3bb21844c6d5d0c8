//! Shape geometry for the interpreter
//!
//! Turns shape commands into plans of forward/turn steps. Plans are pure data;
//! the executor walks them against the turtle and the canvas.

use crate::error::{Result, TurtleError};

/// Slack added before truncating a turn, so `119.99999999999999` becomes 120
const TRUNCATION_EPSILON: f64 = 1e-9;

/// One primitive of a shape plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Move along the current heading
    Forward(f64),
    /// Turn clockwise by the given degrees
    Right(f64),
}

/// Side lengths of a triangle, traced as c, then a, then b
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleSides {
    pub a: i32,
    pub b: i32,
    pub c: i32,
}

impl TriangleSides {
    /// Equilateral triangle with the given side
    pub fn equilateral(side: i32) -> Result<Self> {
        if side <= 0 {
            return Err(TurtleError::out_of_range("triangle", "Size must be positive"));
        }
        Ok(Self {
            a: side,
            b: side,
            c: side,
        })
    }

    /// Arbitrary triangle; sides must be positive and strictly satisfy the
    /// triangle inequality for every pairing.
    pub fn new(a: i32, b: i32, c: i32) -> Result<Self> {
        if a <= 0 || b <= 0 || c <= 0 {
            return Err(TurtleError::InvalidGeometry(
                "All sides must be positive".to_string(),
            ));
        }
        // i64 so large sides cannot overflow the sums
        let (wa, wb, wc) = (i64::from(a), i64::from(b), i64::from(c));
        if wa + wb <= wc || wa + wc <= wb || wb + wc <= wa {
            return Err(TurtleError::InvalidGeometry(
                "Invalid triangle dimensions".to_string(),
            ));
        }
        Ok(Self { a, b, c })
    }

    /// Interior angles (A, B, C) in degrees, each opposite the side of the same name
    pub fn interior_angles(&self) -> (f64, f64, f64) {
        let (a, b, c) = (f64::from(self.a), f64::from(self.b), f64::from(self.c));
        (
            angle_opposite(b, c, a).to_degrees(),
            angle_opposite(a, c, b).to_degrees(),
            angle_opposite(a, b, c).to_degrees(),
        )
    }
}

/// Law of cosines: the angle (radians) between two adjacent sides, given the
/// length of the side opposite it.
pub fn angle_opposite(adjacent1: f64, adjacent2: f64, opposite: f64) -> f64 {
    let cosine = (adjacent1 * adjacent1 + adjacent2 * adjacent2 - opposite * opposite)
        / (2.0 * adjacent1 * adjacent2);
    cosine.clamp(-1.0, 1.0).acos()
}

/// Integer exterior turn for an interior angle in degrees
pub fn exterior_turn(interior_degrees: f64) -> i32 {
    (180.0 - interior_degrees + TRUNCATION_EPSILON).trunc() as i32
}

/// Four sides of `size`, turning right 90 after each.
pub fn square_plan(size: i32) -> Result<Vec<Step>> {
    if size <= 0 {
        return Err(TurtleError::out_of_range("square", "Square size must be positive"));
    }
    let side = f64::from(size);
    Ok((0..4)
        .flat_map(|_| [Step::Forward(side), Step::Right(90.0)])
        .collect())
}

/// Trace c, a, b with exterior turns after each side.
///
/// The first two turns are truncated exterior angles at B and C. The last turn
/// completes the full 360 so the turtle always ends on its starting heading;
/// it differs from the truncated exterior angle at A by at most two degrees.
pub fn triangle_plan(sides: &TriangleSides) -> Vec<Step> {
    let (_, angle_b, angle_c) = sides.interior_angles();
    let turn_b = exterior_turn(angle_b);
    let turn_c = exterior_turn(angle_c);
    let turn_a = 360 - turn_b - turn_c;

    vec![
        Step::Forward(f64::from(sides.c)),
        Step::Right(f64::from(turn_b)),
        Step::Forward(f64::from(sides.a)),
        Step::Right(f64::from(turn_c)),
        Step::Forward(f64::from(sides.b)),
        Step::Right(f64::from(turn_a)),
    ]
}

/// Sum of the turns in a plan
pub fn total_turn(plan: &[Step]) -> f64 {
    plan.iter()
        .map(|step| match step {
            Step::Right(degrees) => *degrees,
            Step::Forward(_) => 0.0,
        })
        .sum()
}
