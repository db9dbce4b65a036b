//! Main HomebaseTweaks API
//!
//! This module ties the session, guide fetcher, matcher, tracker and recorder
//! together into the operations the command line exposes: listing channels,
//! listing programs, and recording every program that matches the configured
//! series.

use std::collections::BTreeMap;

use crate::client::HomebaseClient;
use crate::config::Config;
use crate::error::Result;
use crate::guide::{fetch_programs, EPG_PATH};
use crate::parser::parse_channels;
use crate::progress::Progress;
use crate::recorder::{record, RecordResponse};
use crate::selector::{partition_matches, Selector};
use crate::session::Session;
use crate::tracker::AlreadyRecorded;
use crate::types::{Program, RecordOutcome, RunSummary};

/// Series recorder for homebase.no
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use homebase_core::{Config, HomebaseRecorder, NullProgress};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::load(Path::new("homebase.toml"))?;
///     let mut recorder = HomebaseRecorder::new(&config)?;
///
///     let summary = recorder.record_series(None, &mut NullProgress).await?;
///     println!("{} new recordings", summary.recorded());
///     Ok(())
/// }
/// ```
pub struct HomebaseRecorder {
    session: Session,
    selectors: Vec<Selector>,
    days: f64,
}

impl HomebaseRecorder {
    /// Create a recorder from a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created, including when
    /// the request rate was set below the accepted floor after validation.
    pub fn new(config: &Config) -> Result<Self> {
        let client = HomebaseClient::with_config(config.client_config())?;
        let session = Session::new(client, config.credentials());
        Ok(Self::with_session(session, config))
    }

    /// Create a recorder around an existing session.
    pub fn with_session(session: Session, config: &Config) -> Self {
        Self {
            session,
            selectors: config.series.clone(),
            days: config.days,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Default horizon in days
    pub fn days(&self) -> f64 {
        self.days
    }

    /// Channel keys and display names from the plain guide page.
    pub async fn list_channels(&self) -> Result<BTreeMap<String, String>> {
        let page = self.session.client().get(EPG_PATH).await?;
        parse_channels(&page.body)
    }

    /// All programs within `days` (or the configured horizon), sorted by title.
    pub async fn list_programs(
        &self,
        days: Option<f64>,
        progress: &mut dyn Progress,
    ) -> Result<Vec<Program>> {
        let days = days.unwrap_or(self.days);
        let mut programs = fetch_programs(self.session.client(), days, progress).await?;
        programs.sort_by(|a, b| a.title.cmp(&b.title).then(a.start.cmp(&b.start)));
        Ok(programs)
    }

    /// Record every program within `days` that matches a configured series.
    ///
    /// Logs on, fetches the guide, fetches the already-recorded list once,
    /// then submits each remaining match. Rejections are reported in the
    /// summary and do not stop the run; transport and login errors do.
    ///
    /// Pending matches are unique by identifier, so the already-recorded
    /// list is not consulted again inside the loop.
    pub async fn record_series(
        &mut self,
        days: Option<f64>,
        progress: &mut dyn Progress,
    ) -> Result<RunSummary> {
        let days = days.unwrap_or(self.days);
        self.session.ensure_authenticated().await?;

        let programs = fetch_programs(self.session.client(), days, progress).await?;
        let recorded = AlreadyRecorded::fetch(&mut self.session).await?;
        let selection = partition_matches(&programs, &self.selectors, recorded.ids());

        let mut summary = RunSummary {
            programs_seen: programs.len(),
            outcomes: Vec::new(),
        };

        for program in selection.already_recorded {
            tracing::info!("Already recorded: {}", program);
            summary.outcomes.push((program, RecordOutcome::AlreadyRecorded));
        }

        for program in selection.pending {
            tracing::info!("Recording {}", program);
            let outcome = match record(&mut self.session, &program).await? {
                RecordResponse::Success => RecordOutcome::Recorded,
                rejected => RecordOutcome::Rejected(rejected),
            };
            summary.outcomes.push((program, outcome));
        }

        tracing::info!(
            "{} programs seen, {} recorded, {} already recorded, {} failed",
            summary.programs_seen,
            summary.recorded(),
            summary.already_recorded(),
            summary.rejected()
        );
        Ok(summary)
    }
}
