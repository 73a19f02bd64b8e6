use anyhow::{anyhow, Result};

use crate::model::member::TeamMember;

/// Upper bound for a single day's entry.
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub words: String,
    /// `key:value` pairs in argument order.
    pub metadata: Vec<(String, String)>,
}

/// Splits `key:value` tokens from the free words around them.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut word_parts = Vec::new();
    let mut metadata = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.push((key.to_string(), value.to_string()));
                continue;
            }
        }
        word_parts.push(arg.as_str());
    }

    ParsedInput {
        words: word_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Parses an hours figure typed into the grid or on the command line.
///
/// Returns `None` for anything that must not reach the log store: empty or
/// non-numeric text, NaN/infinity, negative values and values above
/// [`MAX_HOURS_PER_DAY`]. A decimal comma is accepted.
pub fn parse_hours(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    let hours: f64 = normalized.parse().ok()?;
    if !hours.is_finite() || !(0.0..=MAX_HOURS_PER_DAY).contains(&hours) {
        return None;
    }
    Some(hours)
}

#[derive(Debug, Default, PartialEq)]
pub struct LogEntries {
    /// One entry per member, in order of first mention.
    pub entries: Vec<(TeamMember, f64)>,
    /// Messages for tokens that could not be applied.
    pub rejected: Vec<String>,
    /// Free words that are not `member:hours` tokens.
    pub ignored: String,
}

/// Resolves `member:hours` tokens from the command line. When a member is
/// named twice the later value wins.
pub fn parse_log_entries(args: &[String]) -> LogEntries {
    let parsed = parse_args(args);
    let mut result = LogEntries {
        ignored: parsed.words,
        ..LogEntries::default()
    };

    for (key, value) in parsed.metadata {
        let member = match key.parse::<TeamMember>() {
            Ok(m) => m,
            Err(e) => {
                result.rejected.push(e.to_string());
                continue;
            }
        };
        let Some(hours) = parse_hours(&value) else {
            result.rejected.push(format!("invalid hours '{}' for {}", value, member));
            continue;
        };
        match result.entries.iter_mut().find(|(m, _)| *m == member) {
            Some(entry) => entry.1 = hours,
            None => result.entries.push((member, hours)),
        }
    }
    result
}
