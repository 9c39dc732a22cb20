use anyhow::{Result, bail};
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};

/// Reads one line, trimmed. Ctrl-C or Ctrl-D aborts the surrounding command.
pub fn ask<H: Helper, I: History>(rl: &mut Editor<H, I>, label: &str) -> Result<String> {
    match rl.readline(&format!("{}: ", label)) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => bail!("Cancelled"),
        Err(e) => Err(e.into()),
    }
}

/// Uses `value` when given, otherwise prompts for it.
pub fn value_or_ask<H: Helper, I: History>(
    rl: &mut Editor<H, I>,
    value: Option<String>,
    label: &str,
) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => ask(rl, label),
    }
}

pub fn confirm<H: Helper, I: History>(rl: &mut Editor<H, I>, question: &str) -> Result<bool> {
    let answer = ask(rl, &format!("{} [y/N]", question))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}
