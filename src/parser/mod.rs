//! Parser for turtle commands
//!
//! Looks a tokenized line up in the command table and converts its argument
//! tokens into a typed [`Command`]. Only arity and integer syntax are checked
//! here; numeric ranges are the executor's concern.

use crate::error::{Result, TurtleError};
use crate::tokenizer::TokenizedLine;
use crate::turtle::Rgb;

/// Which command a table entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    About,
    PenUp,
    PenDown,
    Left,
    Right,
    Move,
    Reverse,
    Palette(Rgb),
    PenColour,
    PenWidth,
    Square,
    Triangle,
    Circle,
    Clear,
    Reset,
    Save,
    Load,
    SaveCommands,
    LoadCommands,
}

/// Number of integer arguments a command takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// At least this many; surplus tokens are ignored
    AtLeast(usize),
    /// Triangle: one side (equilateral) or three sides, nothing else
    OneOrThree,
}

/// One row of the command table
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    pub arity: Arity,
    /// Reported when arguments are missing
    pub missing: &'static str,
    /// Reported when an argument is not an integer
    pub invalid: &'static str,
}

const fn spec(
    name: &'static str,
    kind: CommandKind,
    arity: Arity,
    missing: &'static str,
    invalid: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        kind,
        arity,
        missing,
        invalid,
    }
}

const fn bare(name: &'static str, kind: CommandKind) -> CommandSpec {
    spec(name, kind, Arity::AtLeast(0), "", "")
}

/// Every command the interpreter understands
pub const COMMANDS: &[CommandSpec] = &[
    bare("about", CommandKind::About),
    bare("penup", CommandKind::PenUp),
    bare("pendown", CommandKind::PenDown),
    spec("left", CommandKind::Left, Arity::AtLeast(1), "Missing angle for turn command", "Invalid angle value"),
    spec("right", CommandKind::Right, Arity::AtLeast(1), "Missing angle for turn command", "Invalid angle value"),
    spec("move", CommandKind::Move, Arity::AtLeast(1), "Missing distance for movement", "Invalid distance value"),
    spec("reverse", CommandKind::Reverse, Arity::AtLeast(1), "Missing distance for movement", "Invalid distance value"),
    bare("black", CommandKind::Palette(Rgb::BLACK)),
    bare("red", CommandKind::Palette(Rgb::RED)),
    bare("green", CommandKind::Palette(Rgb::GREEN)),
    bare("white", CommandKind::Palette(Rgb::WHITE)),
    bare("yellow", CommandKind::Palette(Rgb::YELLOW)),
    spec("pencolour", CommandKind::PenColour, Arity::AtLeast(3), "Need RGB values for color", "Invalid color values"),
    spec("penwidth", CommandKind::PenWidth, Arity::AtLeast(1), "Missing width value", "Invalid width value"),
    spec("square", CommandKind::Square, Arity::AtLeast(1), "Missing size for square", "Invalid square size"),
    spec("triangle", CommandKind::Triangle, Arity::OneOrThree, "Triangle needs 1 or 3 parameters", "Invalid triangle side lengths"),
    spec("circle", CommandKind::Circle, Arity::AtLeast(1), "Missing size for circle", "Invalid circle size"),
    bare("clear", CommandKind::Clear),
    bare("reset", CommandKind::Reset),
    bare("save", CommandKind::Save),
    bare("load", CommandKind::Load),
    bare("savecommands", CommandKind::SaveCommands),
    bare("loadcommands", CommandKind::LoadCommands),
];

/// Find a command table entry by (lower-case) name
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Triangle arguments as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleArgs {
    Equilateral(i32),
    Sides(i32, i32, i32),
}

/// A parsed, not yet range-checked, turtle command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    About,
    PenUp,
    PenDown,
    Left(i32),
    Right(i32),
    Move(i32),
    Reverse(i32),
    Colour(Rgb),
    PenColour(i32, i32, i32),
    PenWidth(i32),
    Square(i32),
    Triangle(TriangleArgs),
    Circle(i32),
    Clear,
    Reset,
    Save,
    Load,
    SaveCommands,
    LoadCommands,
}

/// Parse a tokenized line into a command
pub fn parse_command(line: &TokenizedLine) -> Result<Command> {
    let spec = lookup(&line.name).ok_or_else(|| TurtleError::UnknownCommand(line.name.clone()))?;
    let args = parse_args(spec, &line.args)?;

    let command = match spec.kind {
        CommandKind::About => Command::About,
        CommandKind::PenUp => Command::PenUp,
        CommandKind::PenDown => Command::PenDown,
        CommandKind::Left => Command::Left(args[0]),
        CommandKind::Right => Command::Right(args[0]),
        CommandKind::Move => Command::Move(args[0]),
        CommandKind::Reverse => Command::Reverse(args[0]),
        CommandKind::Palette(color) => Command::Colour(color),
        CommandKind::PenColour => Command::PenColour(args[0], args[1], args[2]),
        CommandKind::PenWidth => Command::PenWidth(args[0]),
        CommandKind::Square => Command::Square(args[0]),
        CommandKind::Triangle => match args.as_slice() {
            [side] => Command::Triangle(TriangleArgs::Equilateral(*side)),
            [a, b, c] => Command::Triangle(TriangleArgs::Sides(*a, *b, *c)),
            _ => return Err(TurtleError::invalid_argument(spec.name, spec.missing)),
        },
        CommandKind::Circle => Command::Circle(args[0]),
        CommandKind::Clear => Command::Clear,
        CommandKind::Reset => Command::Reset,
        CommandKind::Save => Command::Save,
        CommandKind::Load => Command::Load,
        CommandKind::SaveCommands => Command::SaveCommands,
        CommandKind::LoadCommands => Command::LoadCommands,
    };

    Ok(command)
}

/// Check arity and convert the tokens the command uses to integers
fn parse_args(spec: &CommandSpec, tokens: &[String]) -> Result<Vec<i32>> {
    let used = match spec.arity {
        Arity::AtLeast(count) if tokens.len() >= count => &tokens[..count],
        Arity::OneOrThree if tokens.len() == 1 || tokens.len() == 3 => tokens,
        _ => return Err(TurtleError::invalid_argument(spec.name, spec.missing)),
    };

    used.iter()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| TurtleError::invalid_argument(spec.name, spec.invalid))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse(line: &str) -> Result<Command> {
        parse_command(&tokenize(line))
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse("penup").unwrap(), Command::PenUp);
        assert_eq!(parse("PENDOWN").unwrap(), Command::PenDown);
        assert_eq!(parse("about").unwrap(), Command::About);
        assert_eq!(parse("loadcommands").unwrap(), Command::LoadCommands);
    }

    #[test]
    fn test_parse_palette() {
        assert_eq!(parse("black").unwrap(), Command::Colour(Rgb::BLACK));
        assert_eq!(parse("Yellow").unwrap(), Command::Colour(Rgb::YELLOW));
    }

    #[test]
    fn test_parse_numeric_commands() {
        assert_eq!(parse("left 90").unwrap(), Command::Left(90));
        assert_eq!(parse("move -5").unwrap(), Command::Move(-5));
        assert_eq!(
            parse("pencolour 300 0 0").unwrap(),
            Command::PenColour(300, 0, 0)
        );
        assert_eq!(
            parse("triangle 3 4 5").unwrap(),
            Command::Triangle(TriangleArgs::Sides(3, 4, 5))
        );
        assert_eq!(
            parse("triangle 7").unwrap(),
            Command::Triangle(TriangleArgs::Equilateral(7))
        );
    }

    #[test]
    fn test_surplus_arguments_ignored() {
        assert_eq!(parse("move 10 20").unwrap(), Command::Move(10));
        assert_eq!(parse("penup now").unwrap(), Command::PenUp);
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            parse("frobnicate"),
            Err(TurtleError::UnknownCommand(name)) if name == "frobnicate"
        ));
        assert!(matches!(parse(""), Err(TurtleError::UnknownCommand(_))));
    }

    #[test]
    fn test_missing_argument() {
        let err = parse("left").unwrap_err();
        assert!(matches!(err, TurtleError::InvalidArgument { .. }));
        assert_eq!(err.to_string(), "Missing angle for turn command");

        assert!(matches!(
            parse("pencolour 1 2"),
            Err(TurtleError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_non_numeric_argument() {
        let err = parse("move ten").unwrap_err();
        assert_eq!(err.to_string(), "Invalid distance value");
        assert!(matches!(parse("move  10"), Err(TurtleError::InvalidArgument { .. })));
        assert!(matches!(parse("circle 2.5"), Err(TurtleError::InvalidArgument { .. })));
    }

    #[test]
    fn test_triangle_arity() {
        let err = parse("triangle 3 4").unwrap_err();
        assert_eq!(err.to_string(), "Triangle needs 1 or 3 parameters");
        assert!(parse("triangle").is_err());
        assert!(parse("triangle 1 2 3 4").is_err());
    }

    #[test]
    fn test_table_names_unique() {
        for (i, spec) in COMMANDS.iter().enumerate() {
            assert!(COMMANDS[i + 1..].iter().all(|other| other.name != spec.name));
            assert_eq!(spec.name, spec.name.to_lowercase());
        }
    }
}
