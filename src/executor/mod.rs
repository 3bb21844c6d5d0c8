//! Execution engine for turtle commands
//!
//! Parses raw command lines, range-checks their arguments, moves the turtle,
//! runs shape plans against the canvas, and keeps the command log that can be
//! saved and replayed.

use crate::config::Config;
use crate::error::{Result, TurtleError};
use crate::filesystem::FileSystem;
use crate::geometry::{self, Step, TriangleSides};
use crate::graphics::{Canvas, Confirmation, RasterCanvas};
use crate::parser::{parse_command, Command, TriangleArgs};
use crate::program::CommandLog;
use crate::tokenizer::tokenize;
use crate::turtle::{Rgb, TurtleState};
use tracing::{debug, info, warn};

/// Turtle command executor
#[derive(Debug)]
pub struct Executor<C: Canvas = RasterCanvas> {
    turtle: TurtleState,
    log: CommandLog,
    canvas: C,
    files: FileSystem,
    // Set by every logged command, cleared by a successful save or load
    unsaved_changes: bool,
    replaying: bool,
}

impl Executor<RasterCanvas> {
    /// Create an executor with a default-sized raster canvas
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create an executor with a raster canvas sized and persisted per `config`
    pub fn with_config(config: &Config) -> Self {
        let canvas = RasterCanvas::with_dimensions(config.canvas_width, config.canvas_height);
        Self::with_canvas(canvas, config)
    }
}

impl Default for Executor<RasterCanvas> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Canvas> Executor<C> {
    /// Create an executor drawing onto an arbitrary canvas
    pub fn with_canvas(canvas: C, config: &Config) -> Self {
        Self {
            turtle: TurtleState::new(),
            log: CommandLog::new(),
            canvas,
            files: FileSystem::new(config),
            unsaved_changes: false,
            replaying: false,
        }
    }

    pub fn turtle(&self) -> &TurtleState {
        &self.turtle
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn files(&self) -> &FileSystem {
        &self.files
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Run one raw command line as typed by the user.
    ///
    /// The line is appended to the command log whether or not it succeeds
    /// (except while replaying). Failures are reported through the canvas and
    /// also returned; none of them end the session.
    pub fn process_command(&mut self, line: &str) -> Result<()> {
        if !self.replaying {
            self.log.push(line);
            self.unsaved_changes = true;
        }

        debug!(command = line, replaying = self.replaying, "processing command");
        self.execute_line(line).inspect_err(|e| {
            warn!(command = line, error = %e, "command rejected");
            let message = match e {
                // Already carries its own "Command failed" prefix
                TurtleError::Io { .. } | TurtleError::Image(_) => e.to_string(),
                _ => format!("Error: {}", e),
            };
            self.canvas.notify(&message);
        })
    }

    /// Parse and run a line without touching the command log
    pub fn execute_line(&mut self, line: &str) -> Result<()> {
        let command = parse_command(&tokenize(line))?;
        self.execute_command(&command)
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::About => self.execute_about(),
            Command::PenUp => self.turtle.set_pen_down(false),
            Command::PenDown => self.turtle.set_pen_down(true),
            Command::Left(angle) => {
                let angle = check_angle("left", *angle)?;
                self.turtle.turn_left(angle);
            }
            Command::Right(angle) => {
                let angle = check_angle("right", *angle)?;
                self.turtle.turn_right(angle);
            }
            Command::Move(distance) => {
                let distance = check_distance("move", *distance)?;
                self.forward(distance);
            }
            Command::Reverse(distance) => {
                let distance = check_distance("reverse", *distance)?;
                self.forward(-distance);
            }
            Command::Colour(color) => self.turtle.set_pen_color(*color),
            Command::PenColour(r, g, b) => {
                let color = Rgb::from_components(*r, *g, *b)?;
                self.turtle.set_pen_color(color);
            }
            Command::PenWidth(width) => {
                let width = u32::try_from(*width)
                    .map_err(|_| TurtleError::out_of_range("penwidth", "Width must be positive"))?;
                self.turtle.set_pen_width(width)?;
            }
            Command::Square(size) => {
                let plan = geometry::square_plan(*size)?;
                self.run_plan(&plan);
            }
            Command::Triangle(args) => self.execute_triangle(*args)?,
            Command::Circle(radius) => {
                // No range check: the canvas decides what a non-positive radius means
                self.canvas.draw_arc(
                    self.turtle.position(),
                    f64::from(*radius),
                    self.turtle.pen_color(),
                    self.turtle.pen_width(),
                );
            }
            Command::Clear => self.canvas.clear(),
            Command::Reset => self.turtle.reset(),
            Command::Save => self.execute_save()?,
            Command::Load => self.execute_load()?,
            Command::SaveCommands => self.execute_save_commands()?,
            Command::LoadCommands => self.execute_load_commands()?,
        }
        Ok(())
    }

    fn execute_about(&mut self) {
        self.canvas.notify(&format!(
            "{} v{}: turtle graphics command interpreter",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ));
    }

    fn execute_triangle(&mut self, args: TriangleArgs) -> Result<()> {
        let sides = match args {
            TriangleArgs::Equilateral(side) => TriangleSides::equilateral(side)?,
            TriangleArgs::Sides(a, b, c) => TriangleSides::new(a, b, c)?,
        };
        let plan = geometry::triangle_plan(&sides);
        self.run_plan(&plan);
        Ok(())
    }

    /// Move along the heading, drawing if the pen is down
    fn forward(&mut self, distance: f64) {
        let (from, to) = self.turtle.advance(distance);
        if self.turtle.is_pen_down() {
            self.canvas
                .draw_line(from, to, self.turtle.pen_color(), self.turtle.pen_width());
        }
    }

    /// Walk a shape plan with the pen forced down, then restore the pen
    fn run_plan(&mut self, plan: &[Step]) {
        let pen_was_down = self.turtle.is_pen_down();
        self.turtle.set_pen_down(true);

        for step in plan {
            match step {
                Step::Forward(distance) => self.forward(*distance),
                Step::Right(degrees) => self.turtle.turn_right(*degrees),
            }
        }

        self.turtle.set_pen_down(pen_was_down);
    }

    fn ensure_not_replaying(&self, command: &'static str) -> Result<()> {
        if self.replaying {
            return Err(TurtleError::ReplayInProgress(command));
        }
        Ok(())
    }

    /// Ask before a load would discard unsaved work.
    ///
    /// The load line itself counts as a change, so a typed load always asks.
    /// Returns `false` when the user cancels. Answering "yes" saves the
    /// command log before proceeding.
    fn confirm_discard(&mut self, prompt: &str) -> Result<bool> {
        if !self.unsaved_changes {
            return Ok(true);
        }

        match self.canvas.confirm(prompt) {
            Confirmation::Yes => {
                self.execute_save_commands()?;
                Ok(true)
            }
            Confirmation::No => Ok(true),
            Confirmation::Cancel => {
                info!("load cancelled by user");
                self.canvas.notify("Load cancelled");
                Ok(false)
            }
        }
    }

    fn execute_save(&mut self) -> Result<()> {
        self.files.save_raster(&self.canvas.raster())?;
        self.unsaved_changes = false;
        self.canvas.notify("Drawing saved successfully");
        Ok(())
    }

    fn execute_load(&mut self) -> Result<()> {
        self.ensure_not_replaying("load")?;
        if !self.confirm_discard("Save current drawing before loading?")? {
            return Ok(());
        }

        let image = self.files.load_raster()?;
        self.canvas.set_raster(image);
        self.unsaved_changes = false;
        self.canvas.notify("Drawing loaded successfully");
        Ok(())
    }

    fn execute_save_commands(&mut self) -> Result<()> {
        self.files.save_commands(&self.log)?;
        self.unsaved_changes = false;
        self.canvas.notify("Commands saved successfully");
        Ok(())
    }

    fn execute_load_commands(&mut self) -> Result<()> {
        self.ensure_not_replaying("loadcommands")?;
        if !self.confirm_discard("Save current commands before loading?")? {
            return Ok(());
        }

        let lines = self.files.load_commands()?;
        self.replay(lines);
        self.unsaved_changes = false;
        self.canvas.notify("Commands loaded successfully");
        Ok(())
    }

    /// Rebuild the session from a list of raw command lines.
    ///
    /// Starts from a reset turtle and a clear canvas. Each line is run and then
    /// appended to the (emptied) log; failing lines are reported and skipped.
    /// Saves run as usual but nested loads are refused.
    pub fn replay(&mut self, lines: Vec<String>) {
        info!(commands = lines.len(), "replaying command log");
        self.log.clear();
        self.turtle.reset();
        self.canvas.clear();

        self.replaying = true;
        for line in lines {
            // Already reported through the canvas
            let _ = self.process_command(&line);
            self.log.push(line);
        }
        self.replaying = false;
    }
}

/// Turn angles must lie in [0, 360]
fn check_angle(command: &str, angle: i32) -> Result<f64> {
    if !(0..=360).contains(&angle) {
        return Err(TurtleError::out_of_range(command, "Angle must be 0-360 degrees"));
    }
    Ok(f64::from(angle))
}

/// Distances must be non-negative; direction comes from the command
fn check_distance(command: &str, distance: i32) -> Result<f64> {
    if distance < 0 {
        return Err(TurtleError::out_of_range(command, "Distance can't be negative"));
    }
    Ok(f64::from(distance))
}
