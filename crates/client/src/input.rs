//! Text command parsing.
//!
//! This module owns the line-to-command mapping so the app loop never looks
//! at raw text.

use tactics_core::{ActorId, Direction, TargetRef};

pub const HELP: &str = "\
commands:
  n | s | e | w            move one tile (also: move <dir>, up/down/left/right)
  act                      toggle action selection
  use <action>             pick an action by name or alias (e.g. use melee attack)
  target <n> | target #id  choose a target by list index or actor id
  <n>                      shorthand for target <n>
  list                     actions the active actor can perform
  targets                  valid targets for the pending action
  next                     pass control to the next actor
  end                      end the active actor's turn
  end phase                end the whole phase now
  status                   print the session state
  help                     show this text
  quit                     leave";

/// High-level outcome of parsing one input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    ToggleActions,
    Use(String),
    Target(TargetRef),
    Cycle,
    EndTurn,
    EndPhase,
    ListActions,
    ListTargets,
    Status,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a direction")]
    BadDirection(String),

    #[error("'{0}' is not a target index or #id")]
    BadTarget(String),
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let command = head.to_ascii_lowercase();

    let input = match (command.as_str(), rest.as_slice()) {
        ("move" | "go" | "m", []) => {
            return Err(InputError::MissingArgument {
                command: "move",
                expected: "a direction",
            });
        }
        ("move" | "go" | "m", [direction]) => Input::Move(parse_direction(direction)?),
        ("act" | "a" | "toggle", []) => Input::ToggleActions,
        ("use" | "u", []) => {
            return Err(InputError::MissingArgument {
                command: "use",
                expected: "an action name",
            });
        }
        ("use" | "u", name) => Input::Use(name.join(" ")),
        ("target" | "t", []) => {
            return Err(InputError::MissingArgument {
                command: "target",
                expected: "an index or #id",
            });
        }
        ("target" | "t", [target]) => Input::Target(parse_target(target)?),
        ("list" | "actions", []) => Input::ListActions,
        ("targets", []) => Input::ListTargets,
        ("next" | "cycle", []) => Input::Cycle,
        ("end", []) => Input::EndTurn,
        ("end", ["phase"]) | ("force", []) => Input::EndPhase,
        ("status" | "?", []) => Input::Status,
        ("help" | "h", []) => Input::Help,
        ("quit" | "exit" | "q", []) => Input::Quit,
        (_, []) => {
            if let Ok(direction) = command.parse::<Direction>() {
                Input::Move(direction)
            } else if let Ok(target) = parse_target(&command) {
                Input::Target(target)
            } else {
                return Err(InputError::UnknownCommand(line.trim().to_owned()));
            }
        }
        _ => return Err(InputError::UnknownCommand(line.trim().to_owned())),
    };
    Ok(Some(input))
}

fn parse_direction(text: &str) -> Result<Direction, InputError> {
    text.parse()
        .map_err(|_| InputError::BadDirection(text.to_owned()))
}

fn parse_target(text: &str) -> Result<TargetRef, InputError> {
    let bad = || InputError::BadTarget(text.to_owned());
    match text.strip_prefix('#') {
        Some(id) => id.parse().map(|id| TargetRef::Id(ActorId(id))).map_err(|_| bad()),
        None => text.parse().map(TargetRef::Index).map_err(|_| bad()),
    }
}
