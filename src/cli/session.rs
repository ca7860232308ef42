//! Interactive conversion loop over line-oriented input.

use super::{convert, rates, ui};
use crate::core::config::DefaultsConfig;
use crate::core::{CurrencyCode, Session};
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HELP: &str = "\
Commands:
  <amount>                 convert using the selected currency pair
  <amount> <FROM> <TO>     convert and select a new pair (e.g. 100 EUR PKR)
  history                  show past conversions, newest first
  rates                    show current exchange rates
  reload                   fetch exchange rates again
  help                     show this message
  quit                     leave the session";

#[derive(Debug, PartialEq, Eq)]
pub enum SessionInput {
    Empty,
    Convert {
        amount: String,
        pair: Option<(String, String)>,
    },
    History,
    Rates,
    Reload,
    Help,
    Quit,
    Unrecognized(String),
}

pub fn parse_line(line: &str) -> SessionInput {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => SessionInput::Empty,
        [word] => match word.to_lowercase().as_str() {
            "history" => SessionInput::History,
            "rates" => SessionInput::Rates,
            "reload" => SessionInput::Reload,
            "help" | "?" => SessionInput::Help,
            "quit" | "exit" | "q" => SessionInput::Quit,
            _ => SessionInput::Convert {
                amount: word.to_string(),
                pair: None,
            },
        },
        [amount, from, to] => SessionInput::Convert {
            amount: amount.to_string(),
            pair: Some((from.to_string(), to.to_string())),
        },
        [amount, from, sep, to] if sep.eq_ignore_ascii_case("to") => SessionInput::Convert {
            amount: amount.to_string(),
            pair: Some((from.to_string(), to.to_string())),
        },
        _ => SessionInput::Unrecognized(line.trim().to_string()),
    }
}

fn error_line(message: &str) -> String {
    ui::style_text(message, ui::StyleType::Error)
}

async fn reload<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    match convert::load_rates(session).await {
        Ok(()) => writeln!(out, "Exchange rates loaded.")?,
        Err(e) => writeln!(
            out,
            "{}",
            error_line(&format!("{e}. Type 'reload' to try again."))
        )?,
    }
    Ok(())
}

/// Runs the session until `quit` or end of input. Rates are loaded first;
/// a failed load is reported and the loop still starts so the user can retry.
pub async fn run<R, W>(
    session: &mut Session,
    defaults: &DefaultsConfig,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut from: CurrencyCode = defaults.from.clone();
    let mut to: CurrencyCode = defaults.to.clone();

    reload(session, out).await?;
    writeln!(out, "{}", ui::style_text("Type 'help' for commands.", ui::StyleType::Subtle))?;

    let mut lines = input.lines();
    loop {
        write!(out, "{from} -> {to} > ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let parsed = parse_line(&line);
        debug!(input = ?parsed, "Session input");

        match parsed {
            SessionInput::Empty => {}
            SessionInput::Quit => break,
            SessionInput::Help => writeln!(out, "{HELP}")?,
            SessionInput::History => writeln!(out, "{}", session.history().display_as_table())?,
            SessionInput::Rates => writeln!(out, "{}", rates::display_rates(&session.rates()))?,
            SessionInput::Reload => reload(session, out).await?,
            SessionInput::Unrecognized(text) => writeln!(
                out,
                "{}",
                error_line(&format!("Unrecognized input '{text}'. Type 'help' for commands."))
            )?,
            SessionInput::Convert { amount, pair } => {
                let (source, target) =
                    pair.unwrap_or_else(|| (from.to_string(), to.to_string()));
                let outcome = convert::build_request(&amount, &source, &target)
                    .and_then(|request| session.convert(&request));
                match outcome {
                    Ok(record) => {
                        from = record.source.clone();
                        to = record.target.clone();
                        writeln!(out, "{}", convert::format_record(&record))?;
                    }
                    Err(e) => writeln!(out, "{}", error_line(&e.to_string()))?,
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line(""), SessionInput::Empty);
        assert_eq!(parse_line("   "), SessionInput::Empty);
        assert_eq!(parse_line("History"), SessionInput::History);
        assert_eq!(parse_line("rates"), SessionInput::Rates);
        assert_eq!(parse_line("reload"), SessionInput::Reload);
        assert_eq!(parse_line("?"), SessionInput::Help);
        assert_eq!(parse_line("exit"), SessionInput::Quit);
    }

    #[test]
    fn test_parse_conversions() {
        assert_eq!(
            parse_line("42.5"),
            SessionInput::Convert {
                amount: "42.5".to_string(),
                pair: None
            }
        );
        let expected = SessionInput::Convert {
            amount: "100".to_string(),
            pair: Some(("eur".to_string(), "PKR".to_string())),
        };
        assert_eq!(parse_line("100 eur PKR"), expected);
        assert_eq!(parse_line("100 eur to PKR"), expected);
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(
            parse_line("100 EUR"),
            SessionInput::Unrecognized("100 EUR".to_string())
        );
        assert_eq!(
            parse_line("1 2 3 4 5"),
            SessionInput::Unrecognized("1 2 3 4 5".to_string())
        );
    }
}
