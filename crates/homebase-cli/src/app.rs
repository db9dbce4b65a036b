use std::io::Write;

use anyhow::{bail, Context, Result};
use homebase_core::{Config, HomebaseRecorder, Progress, RecordOutcome, RunSummary};

use crate::cli::Cli;

/// Prints one dot per guide page to stderr.
struct DotProgress;

impl Progress for DotProgress {
    fn begin(&mut self, total_pages: u32) {
        eprint!("Fetching {} guide pages ", total_pages);
    }

    fn page_done(&mut self, _page: u32, _entries: usize) {
        eprint!(".");
        let _ = std::io::stderr().flush();
    }

    fn finish(&mut self) {
        eprintln!();
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    if let Some(days) = cli.days {
        if !days.is_finite() || days <= 0.0 {
            bail!("--days must be a positive number, got {}", days);
        }
    }

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    let mut recorder = HomebaseRecorder::new(&config).context("Failed to create HTTP client")?;

    if cli.list_channels {
        return list_channels(&recorder, cli.json).await;
    }
    if cli.list_programs {
        return list_programs(&recorder, cli.days, cli.json).await;
    }

    let summary = recorder
        .record_series(cli.days, &mut DotProgress)
        .await
        .context("Recording run failed")?;
    print_summary(&summary);
    Ok(())
}

async fn list_channels(recorder: &HomebaseRecorder, json: bool) -> Result<()> {
    let channels = recorder
        .list_channels()
        .await
        .context("Failed to fetch channels")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&channels)?);
        return Ok(());
    }
    for (key, name) in &channels {
        println!("{:>20}: {}", key, name);
    }
    Ok(())
}

async fn list_programs(recorder: &HomebaseRecorder, days: Option<f64>, json: bool) -> Result<()> {
    let programs = recorder
        .list_programs(days, &mut DotProgress)
        .await
        .context("Failed to fetch programs")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&programs)?);
        return Ok(());
    }
    for program in &programs {
        println!("{}", program);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    for (program, outcome) in &summary.outcomes {
        match outcome {
            RecordOutcome::AlreadyRecorded => println!("Already recorded: {}", program),
            RecordOutcome::Recorded => println!("Recording {}", program),
            RecordOutcome::Rejected(response) => {
                println!("Failed recording {}: {:?}", program, response)
            }
        }
    }
    println!(
        "{} programs checked: {} recorded, {} already recorded, {} failed",
        summary.programs_seen,
        summary.recorded(),
        summary.already_recorded(),
        summary.rejected()
    );
}
