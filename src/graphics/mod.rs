//! Drawing surface for the turtle interpreter
//!
//! The interpreter only talks to a [`Canvas`]: it draws lines and arcs, swaps
//! the raster in and out, and asks the user things. [`RasterCanvas`] is the
//! headless implementation backed by an RGB image buffer.

use crate::turtle::{Point, Rgb};
use image::{Rgb as Pixel, RgbImage};
use std::collections::VecDeque;

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 800;
/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 400;

const BACKGROUND: Pixel<u8> = Pixel([255, 255, 255]);

/// Answer to a three-way confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Save first, then proceed
    Yes,
    /// Proceed without saving
    No,
    /// Abort
    Cancel,
}

/// Capabilities the interpreter needs from the outside world
pub trait Canvas {
    /// Stroke a straight line between two turtle-space points
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: u32);

    /// Stroke a full circle around `center`
    fn draw_arc(&mut self, center: Point, radius: f64, color: Rgb, width: u32);

    /// Wipe the raster back to the background colour
    fn clear(&mut self);

    /// Snapshot of the current raster
    fn raster(&self) -> RgbImage;

    /// Replace the raster wholesale
    fn set_raster(&mut self, image: RgbImage);

    /// Show a message to the user
    fn notify(&mut self, message: &str);

    /// Ask the user a yes/no/cancel question and block for the answer
    fn confirm(&mut self, message: &str) -> Confirmation;
}

/// In-memory raster canvas.
///
/// The turtle origin sits at the centre of the image with y pointing up.
/// Notifications are kept for inspection and confirmations are answered from
/// a script, falling back to [`Confirmation::Cancel`] when it runs dry.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbImage,
    notifications: Vec<String>,
    responses: VecDeque<Confirmation>,
}

impl RasterCanvas {
    /// Create a canvas with default dimensions
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a canvas with custom dimensions
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
            notifications: Vec::new(),
            responses: VecDeque::new(),
        }
    }

    /// Queue answers for upcoming confirmation prompts
    pub fn script_responses(&mut self, responses: impl IntoIterator<Item = Confirmation>) {
        self.responses.extend(responses);
    }

    /// Every message passed to `notify`, oldest first
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour at turtle-space coordinates, if on the canvas
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.to_canvas_coords(i64::from(x), i64::from(y)).map(|(cx, cy)| {
            let Pixel([r, g, b]) = *self.image.get_pixel(cx, cy);
            Rgb::new(r, g, b)
        })
    }

    /// True when nothing has been drawn since the last clear
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|pixel| *pixel == BACKGROUND)
    }

    /// Convert turtle coordinates to image coordinates
    fn to_canvas_coords(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        // Turtle space is y-up around the centre, the image is y-down from the top-left
        let canvas_x = x.checked_add(i64::from(self.image.width() / 2))?;
        let canvas_y = i64::from(self.image.height() / 2).checked_sub(y)?;

        if canvas_x >= 0
            && canvas_x < i64::from(self.image.width())
            && canvas_y >= 0
            && canvas_y < i64::from(self.image.height())
        {
            Some((canvas_x as u32, canvas_y as u32))
        } else {
            None
        }
    }

    /// Paint a `width`-sized square brush centred on a point
    fn stamp(&mut self, x: i64, y: i64, color: Rgb, width: u32) {
        // A brush wider than the canvas paints nothing more
        let widest = self.image.width().max(self.image.height()).max(1);
        let size = i64::from(width.clamp(1, widest));
        let low = -(size - 1) / 2;
        for dy in low..low + size {
            for dx in low..low + size {
                let (Some(px), Some(py)) = (x.checked_add(dx), y.checked_add(dy)) else {
                    continue;
                };
                if let Some((cx, cy)) = self.to_canvas_coords(px, py) {
                    self.image.put_pixel(cx, cy, Pixel([color.r, color.g, color.b]));
                }
            }
        }
    }

    /// Clip a segment to the visible area plus a brush-width margin
    /// (Liang-Barsky). Returns `None` when the segment misses the canvas.
    fn clip(&self, from: Point, to: Point, width: u32) -> Option<(Point, Point)> {
        let margin = f64::from(width) + 1.0;
        let half_w = f64::from(self.image.width()) / 2.0 + margin;
        let half_h = f64::from(self.image.height()) / 2.0 + margin;
        let (dx, dy) = (to.x - from.x, to.y - from.y);

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [
            (-dx, from.x + half_w),
            (dx, half_w - from.x),
            (-dy, from.y + half_h),
            (dy, half_h - from.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            Point::new(from.x + t0 * dx, from.y + t0 * dy),
            Point::new(from.x + t1 * dx, from.y + t1 * dy),
        ))
    }

    /// Whether a circle outline crosses the visible area at all
    fn circle_visible(&self, center: Point, radius: f64, width: u32) -> bool {
        let margin = f64::from(width) + 1.0;
        let half_w = f64::from(self.image.width()) / 2.0;
        let half_h = f64::from(self.image.height()) / 2.0;

        let nearest = Point::new(center.x.clamp(-half_w, half_w), center.y.clamp(-half_h, half_h));
        let farthest = Point::new(
            if center.x < 0.0 { half_w } else { -half_w },
            if center.y < 0.0 { half_h } else { -half_h },
        );

        radius + margin >= center.distance_to(nearest)
            && radius - margin <= center.distance_to(farthest)
    }

    /// Bresenham line between integer points
    fn plot_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb, width: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.stamp(x, y, color, width);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle. Only used for radii on the scale of the canvas, so the
    /// centre is never far off-screen.
    fn plot_circle(&mut self, center_x: i64, center_y: i64, radius: i64, color: Rgb, width: u32) {
        let mut x = radius;
        let mut y = 0;
        let mut err = 0;

        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.stamp(center_x + px, center_y + py, color, width);
            }

            y += 1;
            if err <= 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Circle too large to walk point by point: sweep the visible columns and
    /// rows instead, plotting where the outline crosses each one.
    fn sweep_circle(&mut self, center: Point, radius: f64, color: Rgb, width: u32) {
        let margin = i64::from(width.min(self.image.width().max(self.image.height()))) + 1;
        let half_w = i64::from(self.image.width() / 2) + margin;
        let half_h = i64::from(self.image.height() / 2) + margin;

        for x in -half_w..=half_w {
            for y in chord(center.x, center.y, radius, x) {
                if y.abs() <= half_h as f64 {
                    self.stamp(x, y.round() as i64, color, width);
                }
            }
        }
        for y in -half_h..=half_h {
            for x in chord(center.y, center.x, radius, y) {
                if x.abs() <= half_w as f64 {
                    self.stamp(x.round() as i64, y, color, width);
                }
            }
        }
    }
}

/// Where a circle crosses the line `u = at`, as positions along the other axis
fn chord(center_u: f64, center_v: f64, radius: f64, at: i64) -> Vec<f64> {
    let du = at as f64 - center_u;
    if du.abs() > radius {
        return Vec::new();
    }
    // (r - d)(r + d) keeps precision when both are huge
    let half = ((radius - du) * (radius + du)).sqrt();
    vec![center_v - half, center_v + half]
}

impl Default for RasterCanvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a turtle-space coordinate onto the pixel grid
fn snap(value: f64) -> i64 {
    // Saturates far outside any canvas
    value.round() as i64
}

impl Canvas for RasterCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: u32) {
        if let Some((from, to)) = self.clip(from, to, width) {
            self.plot_line(snap(from.x), snap(from.y), snap(to.x), snap(to.y), color, width);
        }
    }

    fn draw_arc(&mut self, center: Point, radius: f64, color: Rgb, width: u32) {
        if radius < 0.5 || !self.circle_visible(center, radius, width) {
            return;
        }

        let extent = i64::from(self.image.width()) + i64::from(self.image.height());
        let radius = snap(radius);
        if radius > extent {
            self.sweep_circle(center, radius as f64, color, width);
        } else {
            self.plot_circle(snap(center.x), snap(center.y), radius, color, width);
        }
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = BACKGROUND;
        }
    }

    fn raster(&self) -> RgbImage {
        self.image.clone()
    }

    fn set_raster(&mut self, image: RgbImage) {
        self.image = image;
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> Confirmation {
        self.notifications.push(message.to_string());
        self.responses.pop_front().unwrap_or(Confirmation::Cancel)
    }
}
