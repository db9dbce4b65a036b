//! HomebaseTweaks Core Library
//!
//! Series recording for the homebase.no TV-recording service, which only
//! lets you record one program at a time.
//!
//! # Features
//! - Log on once per run and reuse the session cookie
//! - Page through the program guide for a horizon of days
//! - Match programs against series selectors (title, channel, day of week,
//!   title pattern)
//! - Skip programs the service already has, record the rest
//! - Rate-limited HTTP client to avoid server overload

pub mod client;
pub mod config;
pub mod error;
pub mod guide;
pub mod homebase;
pub mod parser;
pub mod progress;
pub mod recorder;
pub mod selector;
pub mod session;
pub mod tracker;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, HomebaseClient, Page, RateLimiter};
pub use config::Config;
pub use error::{HomebaseError, Result};
pub use homebase::HomebaseRecorder;
pub use progress::{NullProgress, Progress};
pub use recorder::RecordResponse;
pub use selector::{select, Selection, Selector, TitlePattern};
pub use session::{Credentials, Session, SessionState};
pub use tracker::AlreadyRecorded;
pub use types::{EpgPage, Program, RawEntry, RecordOutcome, RunSummary};
