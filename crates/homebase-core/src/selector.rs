//! Series selectors
//!
//! A [`Selector`] describes programs to record. Every field is optional and
//! a selector matches a program when all of its present fields agree.
//! Matching against any one selector of a list is enough.

use std::collections::HashSet;
use std::fmt;

use chrono::Datelike;
use regex_lite::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::Program;

/// Title pattern, matched from the start of the title
#[derive(Clone)]
pub struct TitlePattern {
    source: String,
    regex: Regex,
}

impl TitlePattern {
    /// Compile a pattern. It is anchored at the start of the title but may
    /// match only a prefix, so `Boardwalk` matches `Boardwalk Empire`.
    pub fn new(source: &str) -> Result<Self, regex_lite::Error> {
        let regex = Regex::new(&format!("^(?:{})", source))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

impl fmt::Debug for TitlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TitlePattern").field(&self.source).finish()
    }
}

impl PartialEq for TitlePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for TitlePattern {}

impl Serialize for TitlePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for TitlePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        TitlePattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// One series rule from the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selector {
    /// Exact title
    #[serde(default)]
    pub title: Option<String>,
    /// Exact channel key, e.g. `nrktv1`
    #[serde(default)]
    pub channel: Option<String>,
    /// Day of week of the guide date, 0 = Sunday .. 6 = Saturday
    #[serde(default)]
    pub dow: Option<u8>,
    /// Title pattern, see [`TitlePattern`]
    #[serde(default)]
    pub title_regex: Option<TitlePattern>,
}

impl Selector {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn channel(channel: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.into()),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_dow(mut self, dow: u8) -> Self {
        self.dow = Some(dow);
        self
    }

    pub fn with_title_regex(mut self, pattern: TitlePattern) -> Self {
        self.title_regex = Some(pattern);
        self
    }

    /// Whether every present constraint holds for `program`
    pub fn matches(&self, program: &Program) -> bool {
        if let Some(channel) = &self.channel {
            if *channel != program.channel {
                return false;
            }
        }
        if let Some(dow) = self.dow {
            if day_of_week(program) != dow {
                return false;
            }
        }
        if let Some(title) = &self.title {
            if *title != program.title {
                return false;
            }
        }
        if let Some(pattern) = &self.title_regex {
            if !pattern.is_match(&program.title) {
                return false;
            }
        }
        true
    }

    /// A selector without constraints matches every program
    pub fn is_unconstrained(&self) -> bool {
        self.title.is_none()
            && self.channel.is_none()
            && self.dow.is_none()
            && self.title_regex.is_none()
    }
}

/// Day of week of the program's guide date, 0 = Sunday .. 6 = Saturday
pub fn day_of_week(program: &Program) -> u8 {
    program.date.weekday().num_days_from_sunday() as u8
}

/// Matched programs split by whether the service already has them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Matches to send to the recorder
    pub pending: Vec<Program>,
    /// Matches whose identifier is in the excluded set
    pub already_recorded: Vec<Program>,
}

/// Match `programs` against `selectors`.
///
/// Each program appears at most once (by identifier) even when several
/// selectors match it. Results keep the order of `programs`.
pub fn partition_matches(
    programs: &[Program],
    selectors: &[Selector],
    excluded: &HashSet<String>,
) -> Selection {
    let mut seen = HashSet::new();
    let mut selection = Selection::default();

    for program in programs {
        if !selectors.iter().any(|s| s.matches(program)) {
            continue;
        }
        if !seen.insert(program.id.as_str()) {
            continue;
        }
        if excluded.contains(&program.id) {
            selection.already_recorded.push(program.clone());
        } else {
            selection.pending.push(program.clone());
        }
    }

    selection
}

/// Programs matching any selector and not in `excluded`, each at most once.
pub fn select(
    programs: &[Program],
    selectors: &[Selector],
    excluded: &HashSet<String>,
) -> Vec<Program> {
    partition_matches(programs, selectors, excluded).pending
}
