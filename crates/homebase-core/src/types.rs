//! Data types for HomebaseTweaks
//!
//! This module contains the core data structures used throughout the library.
//! Programs are immutable value records once parsed; all types serialize to
//! JSON for the command line `--json` output.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::recorder::RecordResponse;

/// A single broadcast slot from the guide
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Program {
    /// Slot identifier, e.g. `20110629/nrktv1/20110629204500-20110629205500`
    pub id: String,
    /// Channel key as used by the guide (e.g. `nrktv1`)
    pub channel: String,
    /// Guide date of the slot
    pub date: NaiveDate,
    /// Broadcast start, local service time
    pub start: NaiveDateTime,
    /// Broadcast end, local service time
    pub end: NaiveDateTime,
    /// Display title taken verbatim from the guide
    pub title: String,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} ({}-{})",
            self.title,
            self.channel,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M"),
        )
    }
}

/// Raw guide entry before the identifier has been parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Link target of the entry, the encoded slot identifier
    pub href: String,
    /// Display text of the entry
    pub title: String,
}

/// One page of the guide
#[derive(Debug, Clone, Default)]
pub struct EpgPage {
    /// Entries on the page, in document order
    pub entries: Vec<RawEntry>,
    /// Query string for the next window (e.g. `ts2=1309380300`)
    pub next_token: Option<String>,
}

/// What happened to one matched program during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordOutcome {
    /// The service already had it queued or stored; no request was sent
    AlreadyRecorded,
    /// The service accepted the record request
    Recorded,
    /// The service answered with something other than the success sentence
    Rejected(RecordResponse),
}

/// Result of a full recording run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Number of programs retrieved from the guide
    pub programs_seen: usize,
    /// Every matched program with its outcome, in matching order
    pub outcomes: Vec<(Program, RecordOutcome)>,
}

impl RunSummary {
    /// Number of programs newly set to record during this run
    pub fn recorded(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Recorded))
    }

    /// Number of matches skipped because the service already had them
    pub fn already_recorded(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::AlreadyRecorded))
    }

    /// Number of record requests the service rejected
    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Rejected(_)))
    }

    fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boardwalk() -> Program {
        Program {
            id: "20110629/nrktv1/20110629204500-20110629205500".to_string(),
            channel: "nrktv1".to_string(),
            date: NaiveDate::from_ymd_opt(2011, 6, 29).unwrap(),
            start: NaiveDate::from_ymd_opt(2011, 6, 29)
                .unwrap()
                .and_hms_opt(20, 45, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2011, 6, 29)
                .unwrap()
                .and_hms_opt(20, 55, 0)
                .unwrap(),
            title: "Boardwalk Empire".to_string(),
        }
    }

    #[test]
    fn test_program_display() {
        assert_eq!(
            boardwalk().to_string(),
            "Boardwalk Empire @ nrktv1 (2011-06-29 20:45-20:55)"
        );
    }

    #[test]
    fn test_program_serialization() {
        let json = serde_json::to_string(&boardwalk()).unwrap();
        let deserialized: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, boardwalk());
        assert!(json.contains("\"channel\":\"nrktv1\""));
    }

    #[test]
    fn test_run_summary_counts() {
        let summary = RunSummary {
            programs_seen: 10,
            outcomes: vec![
                (boardwalk(), RecordOutcome::Recorded),
                (boardwalk(), RecordOutcome::AlreadyRecorded),
                (
                    boardwalk(),
                    RecordOutcome::Rejected(RecordResponse::SubscriptionRequired),
                ),
                (boardwalk(), RecordOutcome::Recorded),
            ],
        };
        assert_eq!(summary.recorded(), 2);
        assert_eq!(summary.already_recorded(), 1);
        assert_eq!(summary.rejected(), 1);
    }

    #[test]
    fn test_run_summary_empty() {
        let summary = RunSummary::default();
        assert_eq!(summary.recorded(), 0);
        assert!(summary.outcomes.is_empty());
    }
}
