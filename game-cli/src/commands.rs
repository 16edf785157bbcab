use game_types::{PlayerId, Point};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Upload(PathBuf),
    /// Percent coordinates, as if already normalized
    Target(Point),
    /// Raw viewport coordinates, normalized against the configured box
    Click { x: f64, y: f64 },
    Add(String),
    Remove(PlayerId),
    Question(String),
    Start,
    Turn(PlayerId),
    Guess(Point),
    Confirm,
    Reveal,
    Reset,
    State,
    Quit,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("'{command}' does not take '{extra}'")]
    UnexpectedArgument {
        command: &'static str,
        extra: String,
    },
}

pub const HELP: &str = "\
commands:
  upload <path>        load an image file
  target <x> <y>       set the target (percent of image)
  click <x> <y>        click the image at viewport pixels
  add <name>           add a player
  remove <id>          remove a player
  question <text>      set the question
  start                start the game
  turn <id>            pick the player who guesses next
  guess <x> <y>        place the active player's marker (percent)
  confirm              confirm the marker
  reveal               show the results
  reset                start over
  state                print the game state as JSON
  quit";

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "upload" => Command::Upload(PathBuf::from(text_arg("upload", "a file path", rest)?)),
        "target" => Command::Target(point_arg("target", rest)?),
        "click" => {
            let point = point_arg("click", rest)?;
            Command::Click {
                x: point.x,
                y: point.y,
            }
        }
        "add" => Command::Add(text_arg("add", "a player name", rest)?),
        "remove" => Command::Remove(id_arg("remove", rest)?),
        "question" => Command::Question(text_arg("question", "the question text", rest)?),
        "start" => Command::Start,
        "turn" => Command::Turn(id_arg("turn", rest)?),
        "guess" => Command::Guess(point_arg("guess", rest)?),
        "confirm" => Command::Confirm,
        "reveal" => Command::Reveal,
        "reset" | "new" => Command::Reset,
        "state" => Command::State,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn text_arg(
    command: &'static str,
    expected: &'static str,
    rest: &str,
) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    Ok(rest.to_string())
}

fn number(raw: &str) -> Result<f64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn no_extra<'a>(
    command: &'static str,
    mut parts: impl Iterator<Item = &'a str>,
) -> Result<(), CommandError> {
    match parts.next() {
        Some(extra) => Err(CommandError::UnexpectedArgument {
            command,
            extra: extra.to_string(),
        }),
        None => Ok(()),
    }
}

fn point_arg(command: &'static str, rest: &str) -> Result<Point, CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument {
            command,
            expected: "two coordinates",
        });
    };
    no_extra(command, parts)?;
    Ok(Point::new(number(x)?, number(y)?))
}

fn id_arg(command: &'static str, rest: &str) -> Result<PlayerId, CommandError> {
    let mut parts = rest.split_whitespace();
    let raw = parts.next().ok_or(CommandError::MissingArgument {
        command,
        expected: "a player id",
    })?;
    no_extra(command, parts)?;
    raw.parse()
        .map(PlayerId)
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}
