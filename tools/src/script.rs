//! Simulator script format.
//!
//! One command per line. Blank lines and lines starting with `#` are skipped
//! (a `#` later in a line is an ordinary label character, so `tap #+=` works).
//! Labels containing spaces can be quoted: `tap "^_^"`.

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("token regex"));
static DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(ms|s)$").expect("duration regex"));

/// One simulator step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tap(String),
    Press(String),
    Release(String),
    Wait(Duration),
    Hold(String, Duration),
    Show,
    Reset,
}

/// Parse a whole script. Errors carry the 1-based line number.
pub fn parse_script(source: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command = parse_line(trimmed).with_context(|| format!("line {}: {}", idx + 1, trimmed))?;
        commands.push(command);
    }
    Ok(commands)
}

/// Parse a single non-comment line.
pub fn parse_line(line: &str) -> Result<Command> {
    let tokens = tokenize(line);
    let Some((verb, args)) = tokens.split_first() else {
        bail!("empty command");
    };

    let command = match (verb.as_str(), args) {
        ("tap", [label]) => Command::Tap(label.clone()),
        ("press", [label]) => Command::Press(label.clone()),
        ("release", [label]) => Command::Release(label.clone()),
        ("wait", [duration]) => Command::Wait(parse_duration(duration)?),
        ("hold", [label, duration]) => Command::Hold(label.clone(), parse_duration(duration)?),
        ("show", []) => Command::Show,
        ("reset", []) => Command::Reset,
        ("tap" | "press" | "release" | "wait" | "hold" | "show" | "reset", _) => {
            bail!("wrong number of arguments for `{}`", verb)
        }
        _ => bail!("unknown command `{}`", verb),
    };
    Ok(command)
}

/// Parse `400ms`, `1s` or `1.5s`.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let caps = DURATION
        .captures(text)
        .ok_or_else(|| anyhow!("invalid duration `{}` (expected e.g. 400ms or 1.5s)", text))?;
    let value: f64 = caps[1].parse().with_context(|| format!("invalid number in `{}`", text))?;
    let millis = match &caps[2] {
        "ms" => value,
        _ => value * 1000.0,
    };
    Ok(Duration::from_micros((millis * 1000.0).round() as u64))
}

fn tokenize(line: &str) -> Vec<String> {
    TOKEN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}
