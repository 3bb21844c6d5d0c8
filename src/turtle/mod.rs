//! Turtle state for the interpreter
//!
//! Holds the pen-plotter pose (position and heading) and the pen attributes.
//! Coordinates are origin-relative with y growing upward; the heading is in
//! degrees, clockwise from "up", always normalised to [0, 360).

use crate::error::{Result, TurtleError};
use std::fmt;

/// Default pen width in pixels
pub const DEFAULT_PEN_WIDTH: u32 = 1;

/// A point in turtle coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Pen colour. Components are bytes, so the [0, 255] range always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from unchecked integer components.
    pub fn from_components(r: i32, g: i32, b: i32) -> Result<Self> {
        match (u8::try_from(r), u8::try_from(g), u8::try_from(b)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
            _ => Err(TurtleError::out_of_range(
                "pencolour",
                "Color values must be 0-255",
            )),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Pose and pen of the turtle
#[derive(Debug, Clone, PartialEq)]
pub struct TurtleState {
    position: Point,
    heading: f64,
    pen_down: bool,
    pen_color: Rgb,
    pen_width: u32,
}

impl TurtleState {
    /// Create a turtle at the origin, facing up, pen down, red, width 1
    pub fn new() -> Self {
        Self {
            position: Point::ORIGIN,
            heading: 0.0,
            pen_down: true,
            pen_color: Rgb::RED,
            pen_width: DEFAULT_PEN_WIDTH,
        }
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn pen_color(&self) -> Rgb {
        self.pen_color
    }

    pub fn pen_width(&self) -> u32 {
        self.pen_width
    }

    pub fn set_pen_down(&mut self, down: bool) {
        self.pen_down = down;
    }

    pub fn set_pen_color(&mut self, color: Rgb) {
        self.pen_color = color;
    }

    /// Set the stroke thickness; zero is rejected.
    pub fn set_pen_width(&mut self, width: u32) -> Result<()> {
        if width == 0 {
            return Err(TurtleError::out_of_range("penwidth", "Width must be positive"));
        }
        self.pen_width = width;
        Ok(())
    }

    /// Rotate clockwise by `degrees`
    pub fn turn_right(&mut self, degrees: f64) {
        self.heading = normalize_heading(self.heading + degrees);
    }

    /// Rotate counter-clockwise by `degrees`
    pub fn turn_left(&mut self, degrees: f64) {
        self.heading = normalize_heading(self.heading - degrees);
    }

    /// Advance along the heading (negative distances go backwards).
    ///
    /// Returns the start and end points of the travelled segment; the caller
    /// decides whether to draw it.
    pub fn advance(&mut self, distance: f64) -> (Point, Point) {
        let from = self.position;
        let (s, c) = self.heading.to_radians().sin_cos();
        let to = Point::new(from.x + distance * s, from.y + distance * c);
        self.position = to;
        (from, to)
    }
}

impl Default for TurtleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap an angle into [0, 360)
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let turtle = TurtleState::new();
        assert_eq!(turtle.position(), Point::ORIGIN);
        assert_eq!(turtle.heading(), 0.0);
        assert!(turtle.is_pen_down());
        assert_eq!(turtle.pen_color(), Rgb::RED);
        assert_eq!(turtle.pen_width(), 1);
    }

    #[test]
    fn test_heading_wraps() {
        let mut turtle = TurtleState::new();
        turtle.turn_left(90.0);
        assert_eq!(turtle.heading(), 270.0);
        turtle.turn_right(180.0);
        assert_eq!(turtle.heading(), 90.0);
        turtle.turn_right(270.0);
        assert_eq!(turtle.heading(), 0.0);
        turtle.turn_right(360.0);
        assert_eq!(turtle.heading(), 0.0);
    }

    #[test]
    fn test_advance_follows_heading() {
        let mut turtle = TurtleState::new();
        let (from, to) = turtle.advance(10.0);
        assert_eq!(from, Point::ORIGIN);
        assert!((to.x - 0.0).abs() < 1e-9);
        assert!((to.y - 10.0).abs() < 1e-9);

        turtle.turn_right(90.0);
        turtle.advance(5.0);
        assert!((turtle.position().x - 5.0).abs() < 1e-9);
        assert!((turtle.position().y - 10.0).abs() < 1e-9);

        turtle.advance(-5.0);
        assert!(turtle.position().x.abs() < 1e-9);
    }

    #[test]
    fn test_pen_width_rejects_zero() {
        let mut turtle = TurtleState::new();
        assert!(matches!(
            turtle.set_pen_width(0),
            Err(TurtleError::OutOfRange { .. })
        ));
        assert_eq!(turtle.pen_width(), 1);
        turtle.set_pen_width(7).unwrap();
        assert_eq!(turtle.pen_width(), 7);
    }

    #[test]
    fn test_color_components() {
        assert_eq!(Rgb::from_components(1, 2, 3).unwrap(), Rgb::new(1, 2, 3));
        assert!(Rgb::from_components(300, 0, 0).is_err());
        assert!(Rgb::from_components(0, -1, 0).is_err());
        assert_eq!(Rgb::YELLOW.to_string(), "#ffff00");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut turtle = TurtleState::new();
        turtle.set_pen_down(false);
        turtle.set_pen_color(Rgb::GREEN);
        turtle.set_pen_width(9).unwrap();
        turtle.turn_right(33.0);
        turtle.advance(12.0);

        turtle.reset();
        assert_eq!(turtle, TurtleState::new());
    }

    // Property-Based Tests

    #[test]
    fn prop_heading_always_normalized() {
        fn property(turns: Vec<i16>) -> bool {
            let mut turtle = TurtleState::new();
            for turn in turns {
                if turn < 0 {
                    turtle.turn_left(f64::from(turn.unsigned_abs()));
                } else {
                    turtle.turn_right(f64::from(turn));
                }
                if !(0.0..360.0).contains(&turtle.heading()) {
                    return false;
                }
            }
            true
        }

        let mut qc = quickcheck::QuickCheck::new().tests(100);
        qc.quickcheck(property as fn(Vec<i16>) -> bool);
    }

    #[test]
    fn prop_left_then_right_restores_heading() {
        fn property(start: u16, angle: u16) -> bool {
            let angle = angle % 361;
            let mut turtle = TurtleState::new();
            turtle.turn_right(f64::from(start % 360));
            let before = turtle.heading();

            turtle.turn_left(f64::from(angle));
            turtle.turn_right(f64::from(angle));

            turtle.heading() == before
        }

        let mut qc = quickcheck::QuickCheck::new().tests(200);
        qc.quickcheck(property as fn(u16, u16) -> bool);
    }
}
