// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// End-to-end digest run: window, fetch, collect, compose, publish.
use std::{io::Write, path::Path};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    announcement::{compose_announcement, no_activity_notice},
    collect::collect_activity,
    config::ReportConfig,
    error::{Error, io_error},
    fetch::fetch_activity,
    github::GitHubApi,
    publish::{PublishOutcome, publish, save_announcement},
    window::DateWindow,
};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum ReportOutcome
{
    /// Nothing happened during the window; nothing was published.
    NoActivity,
    /// The document was printed instead of published.
    DryRun,
    /// A discussion was created.
    Published
    {
        url: String,
    },
}

/// Runs the whole pipeline against `api`.
///
/// `now` selects the month unless the configuration carries a date override.
/// Human-facing output (the no-activity notice or the dry-run document) goes
/// to `out`.
///
/// # Errors
///
/// Returns an [`Error`] for an unparsable date override, a failed write of
/// the optional output file, or any publishing failure. Fetch failures are
/// not errors; they only reduce the reported activity.
pub async fn run_report<A, W,>(
    api: &A,
    config: &ReportConfig,
    now: DateTime<Utc,>,
    out: &mut W,
) -> Result<ReportOutcome, Error,>
where
    A: GitHubApi,
    W: Write,
{
    let window = DateWindow::resolve(config.date_override.as_deref(), now,)?;
    info!(
        "Building digest for {} covering {}..{}",
        config.repository,
        window.start_str(),
        window.end_str()
    );

    let fetched = fetch_activity(api, &config.repository, &window,).await;
    let collected = collect_activity(fetched.pull_requests, fetched.issues,);

    if collected.is_empty() {
        let notice = no_activity_notice(&window,);
        info!("{}", notice);
        writeln!(out, "{notice}").map_err(|e| io_error(Path::new("<stdout>",), e,),)?;
        return Ok(ReportOutcome::NoActivity,);
    }

    let announcement = compose_announcement(&collected, &window,)?;

    if let Some(path,) = &config.output {
        save_announcement(path, &announcement,)?;
    }

    Ok(match publish(api, &announcement, config, out,).await? {
        PublishOutcome::DryRun => ReportOutcome::DryRun,
        PublishOutcome::Published {
            url,
        } => ReportOutcome::Published {
            url,
        },
    },)
}
