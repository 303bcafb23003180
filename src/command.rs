use thiserror::Error;

use crate::{autocomplete::SearchError, constants::COMMAND_PREFIX};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Any line that is not a `:` command. Recorded as a chosen entry.
    Select { entry: String },
    Limit { limit: usize },
    List,
    Count,
    Selected,
    Help,
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0}: command not found")]
    InvalidCommand(String),

    #[error("{0}: missing argument")]
    MissingArgument(&'static str),

    #[error("Argument is not a number")]
    NotANumber(#[from] std::num::ParseIntError),

    #[error(transparent)]
    Limit(#[from] SearchError),
}

pub const HELP: &str = "\
:limit N    show at most N suggestions
:list       show the first entries in load order
:count      show vocabulary size
:selected   show entries chosen so far
:exit       leave (also :quit or Ctrl-D)
anything else is recorded as a chosen entry";

impl Command {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        use Command::*;
        let input = input.trim();
        let Some(rest) = input.strip_prefix(COMMAND_PREFIX) else {
            return Ok(Select {
                entry: input.to_string(),
            });
        };

        let mut parts = rest.split_whitespace();
        match parts.next() {
            Some("limit") => {
                let arg = parts.next().ok_or(CommandError::MissingArgument("limit"))?;
                let limit = crate::autocomplete::checked_limit(arg.parse::<i64>()?)?;
                Ok(Limit { limit })
            }
            Some("list") => Ok(List),
            Some("count") => Ok(Count),
            Some("selected") => Ok(Selected),
            Some("help") => Ok(Help),
            Some("exit") | Some("quit") | Some("q") => Ok(Exit),
            _ => Err(CommandError::InvalidCommand(input.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_selection() {
        assert_eq!(
            Command::parse("  Aspirin "),
            Ok(Command::Select {
                entry: "Aspirin".to_string()
            })
        );
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(":limit 5"), Ok(Command::Limit { limit: 5 }));
        assert_eq!(Command::parse(":limit 0"), Ok(Command::Limit { limit: 0 }));
        assert_eq!(Command::parse(":list"), Ok(Command::List));
        assert_eq!(Command::parse(":quit"), Ok(Command::Exit));
        assert_eq!(Command::parse(":selected"), Ok(Command::Selected));
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert_eq!(
            Command::parse(":limit -3"),
            Err(CommandError::Limit(SearchError::NegativeLimit(-3)))
        );
    }

    #[test]
    fn bad_arguments() {
        assert!(matches!(
            Command::parse(":limit ten"),
            Err(CommandError::NotANumber(_))
        ));
        assert_eq!(
            Command::parse(":limit"),
            Err(CommandError::MissingArgument("limit"))
        );
        assert_eq!(
            Command::parse(":frobnicate"),
            Err(CommandError::InvalidCommand(":frobnicate".to_string()))
        );
    }
}
