use clap::{Parser, Subcommand};
use tripwire_core::Coord;

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(name = "tripwire", no_binary_name = true, disable_help_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reveal a cell, on a number with enough flags around it reveals its neighbors
    #[command(visible_alias = "r")]
    Reveal { x: Coord, y: Coord },
    /// Flag or unflag a cell
    #[command(visible_alias = "f")]
    Flag { x: Coord, y: Coord },
    /// Pause or resume
    #[command(visible_alias = "p")]
    Pause,
    /// Print the board as JSON
    #[command(visible_alias = "s")]
    Snapshot,
    /// List best times
    Scores,
    /// Start a new game with a new seed
    #[command(visible_alias = "new")]
    Restart,
    /// Quit
    #[command(visible_alias = "q")]
    Quit,
}

impl Line {
    /// Parses a line of input, `None` when it is blank.
    pub fn read(line: &str) -> Option<Result<Command, clap::Error>> {
        let words: Vec<_> = line.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        Some(Self::try_parse_from(words).map(|line| line.command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn kind(line: &str) -> ErrorKind {
        Line::read(line).unwrap().unwrap_err().kind()
    }

    #[test]
    fn parses_moves_and_aliases() {
        assert_eq!(
            Line::read("r 3 4").unwrap().unwrap(),
            Command::Reveal { x: 3, y: 4 }
        );
        assert_eq!(
            Line::read("  flag 0 12 ").unwrap().unwrap(),
            Command::Flag { x: 0, y: 12 }
        );
        assert_eq!(Line::read("new").unwrap().unwrap(), Command::Restart);
        assert_eq!(Line::read("q").unwrap().unwrap(), Command::Quit);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert!(Line::read("").is_none());
        assert!(Line::read(" \t ").is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(kind("r 3"), ErrorKind::MissingRequiredArgument);
        assert_eq!(kind("f x 2"), ErrorKind::ValueValidation);
        assert_eq!(kind("r 300 1"), ErrorKind::ValueValidation);
        assert_eq!(kind("dig 1 1"), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn help_lists_every_command() {
        let err = Line::read("help").unwrap().unwrap_err();
        let text = err.to_string();

        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        for name in ["reveal", "flag", "pause", "snapshot", "scores", "restart", "quit"] {
            assert!(text.contains(name), "{name} missing from {text}");
        }
    }
}
