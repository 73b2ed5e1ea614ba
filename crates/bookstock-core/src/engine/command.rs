//! Splitting a raw shell line into a command name and its `--key=value`
//! flags.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::error::{CommandError, CommandResult};

/// Flags parsed from one command line, keyed by flag name.
///
/// Only tokens shaped like `--key=value` with a non-empty key are kept.
/// When a key repeats, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    values: BTreeMap<String, String>,
}

impl Flags {
    pub fn parse<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut values = BTreeMap::new();
        for token in tokens {
            let Some(body) = token.strip_prefix("--") else {
                continue;
            };
            let Some((key, value)) = body.split_once('=') else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            values
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self { values }
    }

    /// Raw value of a flag, including an empty one (`--title=`).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value of a text flag; empty values count as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Parse an optional flag. Absent gives `Ok(None)`; present but
    /// unparsable (including empty) gives [`CommandError::InvalidFlag`].
    pub fn parse_value<T: FromStr>(&self, key: &'static str) -> CommandResult<Option<T>> {
        self.get(key)
            .map(|raw| {
                raw.parse().map_err(|_| CommandError::InvalidFlag {
                    key,
                    value: raw.to_string(),
                })
            })
            .transpose()
    }

    /// Parse a flag the command cannot run without.
    pub fn require<T: FromStr>(&self, key: &'static str) -> CommandResult<T> {
        self.parse_value(key)?
            .ok_or(CommandError::MissingFlag(key))
    }
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub flags: Flags,
}

impl CommandLine {
    /// Parse a raw line. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?.to_string();
        Some(Self {
            name,
            flags: Flags::parse(tokens),
        })
    }
}
