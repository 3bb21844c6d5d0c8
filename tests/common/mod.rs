//! Shared helpers for the integration tests
#![allow(dead_code)]

use image::RgbImage;
use std::collections::VecDeque;
use turtle_interpreter::{Canvas, Config, Confirmation, Executor, Point, Rgb};

/// One call the executor made on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Stroke {
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width: u32,
    },
    Arc {
        center: Point,
        radius: f64,
        color: Rgb,
        width: u32,
    },
    Clear,
}

impl Stroke {
    pub fn length(&self) -> f64 {
        match self {
            Stroke::Line { from, to, .. } => from.distance_to(*to),
            _ => 0.0,
        }
    }
}

/// Canvas that records every call instead of rasterising
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub strokes: Vec<Stroke>,
    pub notifications: Vec<String>,
    pub prompts: Vec<String>,
    pub responses: VecDeque<Confirmation>,
    pub raster: Option<RgbImage>,
}

impl RecordingCanvas {
    pub fn lines(&self) -> Vec<&Stroke> {
        self.strokes
            .iter()
            .filter(|stroke| matches!(stroke, Stroke::Line { .. }))
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: u32) {
        self.strokes.push(Stroke::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_arc(&mut self, center: Point, radius: f64, color: Rgb, width: u32) {
        self.strokes.push(Stroke::Arc {
            center,
            radius,
            color,
            width,
        });
    }

    fn clear(&mut self) {
        self.strokes.push(Stroke::Clear);
    }

    fn raster(&self) -> RgbImage {
        self.raster.clone().unwrap_or_else(|| RgbImage::new(1, 1))
    }

    fn set_raster(&mut self, image: RgbImage) {
        self.raster = Some(image);
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> Confirmation {
        self.prompts.push(message.to_string());
        self.responses.pop_front().unwrap_or(Confirmation::Cancel)
    }
}

/// Executor over a recording canvas, persisting into a fresh temp directory
pub fn recording_executor() -> (tempfile::TempDir, Executor<RecordingCanvas>) {
    let dir = tempfile::tempdir().unwrap();
    let executor = Executor::with_canvas(RecordingCanvas::default(), &Config::in_dir(dir.path()));
    (dir, executor)
}

/// Executor over a small raster canvas, persisting into a fresh temp directory
pub fn raster_executor() -> (tempfile::TempDir, Executor) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        canvas_width: 240,
        canvas_height: 160,
        ..Config::in_dir(dir.path())
    };
    (dir, Executor::with_config(&config))
}

/// Run a line, panicking if the executor rejects it
pub fn run<C: Canvas>(executor: &mut Executor<C>, line: &str) {
    executor
        .process_command(line)
        .unwrap_or_else(|e| panic!("'{}' failed: {}", line, e));
}
