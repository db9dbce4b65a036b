//! Guide fetcher
//!
//! The guide endpoint returns about 5.5 hours of broadcasts per call, plus a
//! `nextDay` link to the following window. Covering a horizon of `days`
//! therefore takes `ceil(days * 4.4)` calls, starting from `ts=0`.

use crate::client::HomebaseClient;
use crate::error::Result;
use crate::parser::{parse_epg_page, parse_program_id};
use crate::progress::Progress;
use crate::types::Program;

/// Guide page path
pub const EPG_PATH: &str = "/epg/epg.php";

/// Token of the first window (today, from now)
const FIRST_TOKEN: &str = "ts=0";

/// Guide windows needed per day of horizon
const WINDOWS_PER_DAY: f64 = 4.4;

/// Number of guide calls needed to cover `days`.
///
/// # Examples
/// ```
/// use homebase_core::guide::calls_for_horizon;
///
/// assert_eq!(calls_for_horizon(1.0), 5);
/// assert_eq!(calls_for_horizon(0.5), 3);
/// assert_eq!(calls_for_horizon(0.0), 0);
/// ```
pub fn calls_for_horizon(days: f64) -> u32 {
    if !days.is_finite() || days <= 0.0 {
        return 0;
    }
    (days * WINDOWS_PER_DAY).ceil() as u32
}

/// Fetch all programs for the next `days` days.
///
/// Performs exactly [`calls_for_horizon`] requests; empty or repeated pages
/// do not end the loop early. A page without a next link keeps the previous
/// token. Malformed entries are logged and skipped. Any transport error
/// aborts the whole fetch.
pub async fn fetch_programs(
    client: &HomebaseClient,
    days: f64,
    progress: &mut dyn Progress,
) -> Result<Vec<Program>> {
    let calls = calls_for_horizon(days);
    tracing::info!("Getting programs for {} days ({} calls)", days, calls);
    progress.begin(calls);

    let mut token = FIRST_TOKEN.to_string();
    let mut programs = Vec::new();

    for call in 1..=calls {
        let page = client.get(&format!("{}?{}", EPG_PATH, token)).await?;
        let epg = parse_epg_page(&page.body)?;

        if let Some(next) = epg.next_token {
            token = next;
        }

        let entries = epg.entries.len();
        for entry in epg.entries {
            match parse_program_id(&entry.href, &entry.title) {
                Ok(program) => programs.push(program),
                Err(e) => tracing::warn!("Skipping guide entry {:?}: {}", entry.href, e),
            }
        }

        tracing::debug!("Guide page {}/{}: {} entries", call, calls, entries);
        progress.page_done(call, entries);
    }

    progress.finish();
    Ok(programs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calls_for_horizon() {
        assert_eq!(calls_for_horizon(1.0), 5);
        assert_eq!(calls_for_horizon(2.0), 9);
        assert_eq!(calls_for_horizon(7.0), 31);
        assert_eq!(calls_for_horizon(0.1), 1);
    }

    #[test]
    fn test_calls_for_horizon_non_positive() {
        assert_eq!(calls_for_horizon(0.0), 0);
        assert_eq!(calls_for_horizon(-1.0), 0);
        assert_eq!(calls_for_horizon(f64::NAN), 0);
        assert_eq!(calls_for_horizon(f64::INFINITY), 0);
    }
}
