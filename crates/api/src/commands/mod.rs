//! Interactive commands
//!
//! Each line typed in the shell parses into a [`Command`] and runs through
//! [`execute`]. Handlers live in per-area modules and log their outcome with
//! [`crate::utils::logging::log_command_execution`].

pub mod stats;
pub mod timeline;
pub mod upload;

use std::path::PathBuf;
use std::str::FromStr;

use calstats_core::CardKind;
use calstats_domain::{CalStatsError, EventId, NavDirection, NavUnit, Result};

use crate::AppContext;

pub const HELP: &str = "\
Commands:
  file <path>          choose the .ics file to upload
  upload               send the chosen file for analysis
  < | prev-month       previous month
  > | next-month       next month
  << | prev-year       previous year
  >> | next-year       next year
  select <id>          open the details of a timeline item
  deselect             clear the timeline selection
  close                close the details
  toggle last-year     expand or collapse the Last Year card
  toggle last-5-years  expand or collapse the Last 5 Years card
  show                 redraw the screen
  help                 this list
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectFile(PathBuf),
    Upload,
    Navigate { direction: NavDirection, unit: NavUnit },
    Select(EventId),
    Deselect,
    Close,
    Toggle(CardKind),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CalStatsError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (head, rest) =
            line.split_once(char::is_whitespace).map_or((line, ""), |(head, rest)| (head, rest.trim()));

        let navigate = |direction, unit| Ok(Self::Navigate { direction, unit });
        match head.to_ascii_lowercase().as_str() {
            "file" if rest.is_empty() => Err(usage("file <path>")),
            "file" => Ok(Self::SelectFile(PathBuf::from(rest))),
            "upload" => Ok(Self::Upload),
            "<" | "prev-month" => navigate(NavDirection::Previous, NavUnit::Month),
            ">" | "next-month" => navigate(NavDirection::Next, NavUnit::Month),
            "<<" | "prev-year" => navigate(NavDirection::Previous, NavUnit::Year),
            ">>" | "next-year" => navigate(NavDirection::Next, NavUnit::Year),
            "select" if rest.is_empty() => Err(usage("select <id>")),
            "select" => Ok(Self::Select(EventId::from_str(rest).unwrap_or_else(|never| match never {}))),
            "deselect" => Ok(Self::Deselect),
            "close" => Ok(Self::Close),
            "toggle" => rest
                .parse::<CardKind>()
                .map(Self::Toggle)
                .map_err(|_| usage("toggle last-year | toggle last-5-years")),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CalStatsError::InvalidInput(format!(
                "Unknown command '{other}'. Type 'help' for the list."
            ))),
        }
    }
}

fn usage(form: &str) -> CalStatsError {
    CalStatsError::InvalidInput(format!("Usage: {form}"))
}

/// Whether the shell keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the context.
pub async fn execute(ctx: &mut AppContext, command: Command) -> Result<Flow> {
    match command {
        Command::SelectFile(path) => upload::select_file(ctx, path)?,
        Command::Upload => upload::upload_calendar(ctx).await?,
        Command::Navigate { direction, unit } => timeline::navigate(ctx, direction, unit),
        Command::Select(id) => timeline::select_item(ctx, id)?,
        Command::Deselect => timeline::deselect(ctx),
        Command::Close => timeline::close_details(ctx),
        Command::Toggle(kind) => stats::toggle_card(ctx, kind),
        Command::Show | Command::Help => {}
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_aliases() {
        assert_eq!(
            "<".parse::<Command>().unwrap(),
            Command::Navigate { direction: NavDirection::Previous, unit: NavUnit::Month }
        );
        assert_eq!(
            "NEXT-YEAR".parse::<Command>().unwrap(),
            Command::Navigate { direction: NavDirection::Next, unit: NavUnit::Year }
        );
        assert_eq!(
            " >> ".parse::<Command>().unwrap(),
            Command::Navigate { direction: NavDirection::Next, unit: NavUnit::Year }
        );
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            "file  /tmp/my trips.ics".parse::<Command>().unwrap(),
            Command::SelectFile(PathBuf::from("/tmp/my trips.ics"))
        );
        assert_eq!("select 3".parse::<Command>().unwrap(), Command::Select(EventId::Number(3)));
        assert_eq!(
            "select trip-a".parse::<Command>().unwrap(),
            Command::Select(EventId::Text("trip-a".into()))
        );
        assert_eq!(
            "toggle last-5-years".parse::<Command>().unwrap(),
            Command::Toggle(CardKind::Last5Years)
        );
    }

    #[test]
    fn rejects_incomplete_or_unknown() {
        assert!("file".parse::<Command>().is_err());
        assert!("select".parse::<Command>().is_err());
        assert!("toggle everything".parse::<Command>().is_err());

        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.user_message().contains("Unknown command 'dance'"));
    }
}
