// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the activity digest.
//!
//! Every option can also be supplied through the environment so the binary
//! runs unchanged inside a scheduled GitHub Actions workflow.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process,
    time::Duration,
};

use activity_digest::{
    Error, OctocrabClient, RawConfig, ReportConfig, ReportOutcome, io_error, run_report,
};
use chrono::Utc;
use clap::{ArgAction, Parser, builder::BoolishValueParser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "activity_digest=info";

/// Command line interface for publishing a monthly activity digest.
#[derive(Debug, Parser,)]
#[command(
    name = "activity-digest",
    version,
    about = "Publish last month's repository activity as a GitHub Discussion"
)]
struct Cli
{
    /// Token used for GitHub GraphQL requests.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Repository whose activity is reported.
    #[arg(long = "repository", env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    repository: Option<String,>,

    /// Repository that receives the discussion (defaults to --repository).
    #[arg(long = "target-repository", env = "TARGET_REPOSITORY", value_name = "OWNER/NAME")]
    target_repository: Option<String,>,

    /// Date or RFC 3339 instant whose previous month is reported.
    #[arg(long = "date", env = "REPORT_DATE", value_name = "DATE")]
    date: Option<String,>,

    /// Preferred discussion category name.
    #[arg(long = "category", env = "DISCUSSION_CATEGORY", value_name = "NAME")]
    category: Option<String,>,

    /// Also write the rendered markdown to this file.
    #[arg(long = "output", env = "REPORT_OUTPUT", value_name = "PATH")]
    output: Option<PathBuf,>,

    /// Print the announcement instead of publishing it.
    #[arg(
        long = "dry-run",
        env = "DRY_RUN",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    dry_run: bool,
}

impl Cli
{
    fn into_raw(self,) -> RawConfig
    {
        RawConfig {
            token:             self.token,
            repository:        self.repository,
            target_repository: self.target_repository,
            date_override:     self.date,
            category:          self.category,
            output:            self.output,
            dry_run:           self.dry_run,
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    if let Err(error,) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Executes the digest using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, client initialisation and publishing errors.
async fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();
    init_tracing();

    let config = ReportConfig::new(cli.into_raw(),)?;
    let client = OctocrabClient::new(&config.token,)?;

    let pb = spinner()?;
    pb.set_message(format!("Collecting activity for {}...", config.repository),);

    let mut document = Vec::<u8,>::new();
    let outcome = run_report(&client, &config, Utc::now(), &mut document,).await;
    flush_after_spinner(&pb, &document, &mut io::stdout().lock(),)?;

    match outcome? {
        ReportOutcome::NoActivity => info!("No activity found, nothing published"),
        ReportOutcome::DryRun => info!("Dry run complete"),
        ReportOutcome::Published {
            url,
        } => {
            info!("Published digest to {}", config.target_repository);
            println!("{url}");
        }
    }

    Ok((),)
}

/// Installs a stderr subscriber so stdout carries only the document.
fn init_tracing()
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER,),);

    fmt().with_env_filter(env_filter,).with_target(false,).with_writer(io::stderr,).init();
}

fn spinner() -> Result<ProgressBar, Error,>
{
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
        .map_err(|e| Error::validation(format!("invalid progress template: {e}"),),)?;
    pb.set_style(style,);
    pb.enable_steady_tick(Duration::from_millis(120,),);
    Ok(pb,)
}

/// Clears the spinner, then writes whatever the run produced for stdout.
fn flush_after_spinner<W,>(pb: &ProgressBar, document: &[u8], out: &mut W,) -> Result<(), Error,>
where
    W: Write,
{
    pb.finish_and_clear();
    out.write_all(document,)
        .and_then(|()| out.flush(),)
        .map_err(|e| io_error(Path::new("<stdout>",), e,),)
}
