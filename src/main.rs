use image::RgbImage;
use std::io::{self, BufRead, Write};
use std::path::Path;
use turtle_interpreter::{
    init_logging, Canvas, Config, Confirmation, Executor, Point, RasterCanvas, Rgb,
};

/// Raster canvas that talks to the user on the terminal
struct ConsoleCanvas {
    raster: RasterCanvas,
}

impl Canvas for ConsoleCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: u32) {
        self.raster.draw_line(from, to, color, width);
    }

    fn draw_arc(&mut self, center: Point, radius: f64, color: Rgb, width: u32) {
        self.raster.draw_arc(center, radius, color, width);
    }

    fn clear(&mut self) {
        self.raster.clear();
    }

    fn raster(&self) -> RgbImage {
        self.raster.raster()
    }

    fn set_raster(&mut self, image: RgbImage) {
        self.raster.set_raster(image);
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }

    fn confirm(&mut self, message: &str) -> Confirmation {
        let stdin = io::stdin();
        let mut answer = String::new();

        loop {
            print!("{} [y]es / [n]o / [c]ancel: ", message);
            if io::stdout().flush().is_err() {
                return Confirmation::Cancel;
            }

            answer.clear();
            match stdin.lock().read_line(&mut answer) {
                // EOF or a broken terminal: leave the session untouched
                Ok(0) | Err(_) => return Confirmation::Cancel,
                Ok(_) => {}
            }

            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Confirmation::Yes,
                "n" | "no" => return Confirmation::No,
                "c" | "cancel" => return Confirmation::Cancel,
                _ => println!("Please answer y, n or c"),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };
    tracing::debug!(?config, "starting interpreter");

    println!("Turtle Graphics Interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'EXIT' to quit, 'HELP' for help\n");

    let canvas = ConsoleCanvas {
        raster: RasterCanvas::with_dimensions(config.canvas_width, config.canvas_height),
    };
    let mut executor = Executor::with_canvas(canvas, &config);
    let stdin = io::stdin();
    let mut line_buffer = String::new();

    loop {
        // Prompt
        print!("> ");
        io::stdout().flush()?;

        // Read line
        line_buffer.clear();
        if stdin.lock().read_line(&mut line_buffer)? == 0 {
            break;
        }

        let input = line_buffer.trim_end_matches(['\r', '\n']);

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("help") {
            print_help();
            continue;
        }

        // Blank lines are logged and reported like any other unknown command.
        // Errors are already reported through the canvas
        let _ = executor.process_command(input);
    }

    if executor.has_unsaved_changes() {
        tracing::info!(
            commands = executor.log().len(),
            "exiting with unsaved changes"
        );
    }

    Ok(())
}

fn print_help() {
    println!("Turtle Graphics Interpreter - Available Commands:");
    println!();
    println!("  about                     - Show about information");
    println!("  penup / pendown           - Lift or lower the pen");
    println!("  left N / right N          - Turn by N degrees (0-360)");
    println!("  move N / reverse N        - Move forward / backward N units");
    println!("  black red green white yellow - Change pen colour");
    println!("  pencolour R G B           - Custom colour, each 0-255");
    println!("  penwidth N                - Pen thickness (N > 0)");
    println!("  square N                  - Draw a square with side N");
    println!("  triangle N                - Draw an equilateral triangle");
    println!("  triangle A B C            - Draw a triangle with sides A, B, C");
    println!("  circle R                  - Draw a circle of radius R");
    println!("  clear                     - Clear the drawing, keep the turtle");
    println!("  reset                     - Return the turtle to its defaults");
    println!("  save / load               - Save or load the drawing (PNG)");
    println!("  savecommands / loadcommands - Save or replay the command history");
    println!();
    println!("Examples:");
    println!("  pencolour 0 0 255");
    println!("  square 80");
    println!("  right 90");
    println!("  triangle 30 40 50");
    println!();
}
