//! Already-recorded tracker
//!
//! Snapshot of the identifiers the service has queued or stored, fetched
//! once per run from the storage page. Matches whose identifier is in the
//! snapshot are reported as already recorded and never submitted.

use std::collections::HashSet;

use crate::error::Result;
use crate::parser::parse_recorded_ids;
use crate::session::Session;

/// Storage page listing queued and stored recordings
pub const STORAGE_PATH: &str = "/index.php?page=storage";

/// Set of program identifiers the service already has
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlreadyRecorded {
    ids: HashSet<String>,
}

impl AlreadyRecorded {
    /// Fetch the storage page, logging on first if needed.
    pub async fn fetch(session: &mut Session) -> Result<Self> {
        tracing::debug!("Getting already recorded programs");
        let page = session.get(STORAGE_PATH).await?;
        let ids = parse_recorded_ids(&page.body)?;
        tracing::info!("{} programs already recorded or queued", ids.len());
        Ok(Self { ids })
    }

    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
