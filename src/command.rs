//! Line commands for the terminal front-end.

use crate::keymap::KeyMap;
use snip_sampler::SliceAdjustment;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// A parsed input line. Slice numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A bare mapped key.
    Key(char),
    Play(usize),
    Stop,
    List,
    Adjust {
        number: usize,
        adjustment: SliceAdjustment,
    },
    Load {
        path: PathBuf,
        slices: usize,
    },
    Devices,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {what} '{value}'")]
    InvalidNumber { what: &'static str, value: String },

    #[error("Unknown adjustment '{0}', expected start=, end= or pitch=")]
    UnknownField(String),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

pub const HELP: &str = "\
Commands:
  <key>                                   play the slice mapped to key
  play N                                  play slice N
  stop                                    stop playback
  list                                    show the slice table
  adjust N [start=±ms] [end=±ms] [pitch=±st]
                                          nudge slice N
  load PATH N                             load a file cut into N slices
  devices                                 list output devices
  help                                    show this text
  quit                                    exit";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str, keys: &KeyMap) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let mut chars = line.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            if keys.slice_for(key).is_some() {
                return Ok(Some(Self::Key(key)));
            }
        }

        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let rest: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "play" => {
                let number = number_arg(rest.first().copied(), "slice number")?;
                no_more(&rest[1..])?;
                Self::Play(number)
            }
            "stop" => {
                no_more(&rest)?;
                Self::Stop
            }
            "list" | "ls" => {
                no_more(&rest)?;
                Self::List
            }
            "adjust" => {
                let number = number_arg(rest.first().copied(), "slice number")?;
                let adjustment = parse_adjustment(&rest[1..])?;
                Self::Adjust { number, adjustment }
            }
            "load" => {
                // the path may contain spaces; the count is the last word
                let (count, path) = match rest.split_last() {
                    Some((count, path)) if !path.is_empty() => (*count, path.join(" ")),
                    _ => return Err(CommandError::MissingArgument("path and slice count")),
                };
                let slices = number_arg(Some(count), "slice count")?;
                Self::Load {
                    path: PathBuf::from(path),
                    slices,
                }
            }
            "devices" => {
                no_more(&rest)?;
                Self::Devices
            }
            "help" | "?" => {
                no_more(&rest)?;
                Self::Help
            }
            "quit" | "exit" => {
                no_more(&rest)?;
                Self::Quit
            }
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        Ok(Some(command))
    }
}

fn number_arg<T: FromStr>(word: Option<&str>, what: &'static str) -> Result<T, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument(what))?;
    parse_number(word, what)
}

fn parse_number<T: FromStr>(word: &str, what: &'static str) -> Result<T, CommandError> {
    word.parse().map_err(|_| CommandError::InvalidNumber {
        what,
        value: word.to_string(),
    })
}

fn no_more(rest: &[&str]) -> Result<(), CommandError> {
    match rest.first() {
        Some(word) => Err(CommandError::UnexpectedArgument(word.to_string())),
        None => Ok(()),
    }
}

fn parse_adjustment(words: &[&str]) -> Result<SliceAdjustment, CommandError> {
    let mut adjustment = SliceAdjustment::new();

    for word in words {
        let (field, value) = word
            .split_once('=')
            .ok_or_else(|| CommandError::UnknownField(word.to_string()))?;

        adjustment = match field.to_ascii_lowercase().as_str() {
            "start" => adjustment.start(parse_number(value, "start delta")?),
            "end" => adjustment.end(parse_number(value, "end delta")?),
            "pitch" => adjustment.pitch(parse_number(value, "pitch delta")?),
            _ => return Err(CommandError::UnknownField(word.to_string())),
        };
    }

    Ok(adjustment)
}
