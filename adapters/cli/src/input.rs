use std::{error::Error, fmt};

use sneak_core::TilePosition;

/// Request typed by the player on a single input line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Request {
    /// Blank line.
    Nothing,
    /// Pointer click at a pixel coordinate.
    Click {
        /// Horizontal pixel coordinate.
        x: f32,
        /// Vertical pixel coordinate.
        y: f32,
    },
    /// Direct move to a tile.
    Move(TilePosition),
    /// Start over on the original layout.
    NewGame,
    /// Leave the game.
    Quit,
}

impl Request {
    /// Parses one line of player input.
    pub(crate) fn parse(line: &str) -> Result<Self, InputError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Nothing);
        };

        let request = match verb.to_ascii_lowercase().as_str() {
            "n" | "new" => Self::NewGame,
            "q" | "quit" | "exit" => Self::Quit,
            "c" | "click" => Self::Click {
                x: parse_number(words.next(), "x")?,
                y: parse_number(words.next(), "y")?,
            },
            "m" | "move" => Self::Move(TilePosition::new(
                parse_number(words.next(), "column")?,
                parse_number(words.next(), "row")?,
            )),
            other => return Err(InputError::UnknownVerb(other.to_owned())),
        };

        if let Some(extra) = words.next() {
            return Err(InputError::TrailingInput(extra.to_owned()));
        }
        Ok(request)
    }
}

fn parse_number<T: std::str::FromStr>(
    word: Option<&str>,
    name: &'static str,
) -> Result<T, InputError> {
    let word = word.ok_or(InputError::MissingArgument(name))?;
    word.parse().map_err(|_| InputError::InvalidArgument {
        name,
        value: word.to_owned(),
    })
}

/// Errors raised while parsing player input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The first word is not a known request.
    UnknownVerb(String),
    /// A required argument was not provided.
    MissingArgument(&'static str),
    /// An argument could not be parsed as a number.
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Text that failed to parse.
        value: String,
    },
    /// Words remained after a complete request.
    TrailingInput(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVerb(verb) => write!(f, "unknown request `{verb}`"),
            Self::MissingArgument(name) => write!(f, "missing argument `{name}`"),
            Self::InvalidArgument { name, value } => {
                write!(f, "argument `{name}` must be a number (received `{value}`)")
            }
            Self::TrailingInput(extra) => write!(f, "unexpected trailing input `{extra}`"),
        }
    }
}

impl Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_request() {
        assert_eq!(Request::parse("   "), Ok(Request::Nothing));
        assert_eq!(Request::parse("n"), Ok(Request::NewGame));
        assert_eq!(Request::parse("NEW"), Ok(Request::NewGame));
        assert_eq!(Request::parse("q"), Ok(Request::Quit));
        assert_eq!(
            Request::parse("click 40.5 8"),
            Ok(Request::Click { x: 40.5, y: 8.0 })
        );
        assert_eq!(
            Request::parse("move 3 7"),
            Ok(Request::Move(TilePosition::new(3, 7)))
        );
    }

    #[test]
    fn reports_malformed_requests() {
        assert_eq!(
            Request::parse("jump"),
            Err(InputError::UnknownVerb("jump".to_owned()))
        );
        assert_eq!(
            Request::parse("move 3"),
            Err(InputError::MissingArgument("row"))
        );
        assert_eq!(
            Request::parse("move -1 2"),
            Err(InputError::InvalidArgument {
                name: "column",
                value: "-1".to_owned(),
            })
        );
        assert_eq!(
            Request::parse("n now"),
            Err(InputError::TrailingInput("now".to_owned()))
        );
    }
}
