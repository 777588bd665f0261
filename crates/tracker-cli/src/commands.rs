//! Command parsing for the interactive watchlist
//!
//! Input lines are slash commands, e.g. `/add AAPL -2 5`.

use stock_tracker::{Thresholds, TrackerError};
use thiserror::Error;

/// Errors surfaced to the REPL user
#[derive(Debug, Error)]
pub enum CliError {
    /// Input could not be parsed into a command
    #[error("{0}")]
    CommandError(String),

    /// The tracker rejected the request
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start tracking a symbol, optionally with its own thresholds
    Add {
        symbol: String,
        thresholds: Option<Thresholds>,
    },
    /// Stop tracking a symbol
    Remove { symbol: String },
    /// Stop tracking everything
    Clear,
    /// Refresh all symbols now
    Refresh,
    /// Show the watchlist table
    List,
    /// Show one symbol's price history
    Show { symbol: String },
    /// Show current BUY/SELL alerts
    Alerts,
    /// Show help
    Help,
    /// Exit
    Exit,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(CliError::CommandError("Empty input".to_string()));
        }

        let Some(body) = input.strip_prefix('/') else {
            return Err(CliError::CommandError(format!(
                "Unknown input {input:?}; commands start with '/', try /help"
            )));
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            return Err(CliError::CommandError("Empty command".to_string()));
        };

        match cmd.to_lowercase().as_str() {
            "add" | "a" => {
                let symbol = required_symbol(args, "add")?;
                let thresholds = match &args[1..] {
                    [] => None,
                    [buy, sell] => Some(Thresholds::new(
                        parse_amount(buy, "buy")?,
                        parse_amount(sell, "sell")?,
                    )),
                    _ => {
                        return Err(CliError::CommandError(
                            "Usage: /add <symbol> [<buy> <sell>]".to_string(),
                        ));
                    }
                };
                Ok(Command::Add { symbol, thresholds })
            }
            "remove" | "rm" => Ok(Command::Remove {
                symbol: required_symbol(args, "remove")?,
            }),
            "clear" => Ok(Command::Clear),
            "refresh" | "update" | "r" => Ok(Command::Refresh),
            "list" | "ls" => Ok(Command::List),
            "show" | "s" => Ok(Command::Show {
                symbol: required_symbol(args, "show")?,
            }),
            "alerts" => Ok(Command::Alerts),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(CliError::CommandError(format!(
                "Unknown command: /{other}, try /help"
            ))),
        }
    }

    pub fn help() -> &'static str {
        "Watchlist commands:\n\
        /add <symbol> [<buy> <sell>] - Track a symbol (dollar thresholds)\n\
        /remove <symbol>             - Stop tracking a symbol\n\
        /clear                       - Stop tracking everything\n\
        /refresh                     - Update all prices now\n\
        /list                        - Show the watchlist\n\
        /show <symbol>               - Show recent price history\n\
        /alerts                      - Show BUY/SELL alerts\n\
        /help                        - Show help\n\
        /exit                        - Exit"
    }
}

fn required_symbol(args: &[&str], command: &str) -> Result<String> {
    args.first()
        .map(|s| s.to_uppercase())
        .ok_or_else(|| CliError::CommandError(format!("Missing symbol for {command} command")))
}

fn parse_amount(raw: &str, name: &str) -> Result<f64> {
    let amount = raw
        .trim_start_matches('$')
        .parse::<f64>()
        .map_err(|_| CliError::CommandError(format!("Invalid {name} threshold: {raw}")))?;

    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(CliError::CommandError(format!("Invalid {name} threshold: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            Command::parse("/add aapl").unwrap(),
            Command::Add {
                symbol: "AAPL".to_string(),
                thresholds: None
            }
        );
        assert_eq!(
            Command::parse("/add msft -2.50 $5").unwrap(),
            Command::Add {
                symbol: "MSFT".to_string(),
                thresholds: Some(Thresholds::new(-2.5, 5.0))
            }
        );
    }

    #[test]
    fn test_parse_add_errors() {
        assert!(Command::parse("/add").is_err());
        assert!(Command::parse("/add AAPL -2").is_err());
        assert!(Command::parse("/add AAPL abc 5").is_err());
        assert!(Command::parse("/add AAPL NaN 5").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/list").unwrap(), Command::List);
        assert_eq!(Command::parse("/REFRESH").unwrap(), Command::Refresh);
        assert_eq!(Command::parse("/clear").unwrap(), Command::Clear);
        assert_eq!(Command::parse("/alerts").unwrap(), Command::Alerts);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
        assert_eq!(
            Command::parse("/rm tsla").unwrap(),
            Command::Remove {
                symbol: "TSLA".to_string()
            }
        );
        assert_eq!(
            Command::parse("/show nvda").unwrap(),
            Command::Show {
                symbol: "NVDA".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(Command::parse("AAPL").is_err());
        assert!(Command::parse("/frobnicate").is_err());
    }
}
