// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Composes the markdown announcement posted for a month.
///
/// The document consists of:
/// - a title line and the highlight summary
/// - the pull request and issue status sections
/// - the contributor list (only when someone took part)
/// - a fixed attribution footer
use tracing::debug;

use crate::{
    activity::ActivityItem,
    collect::{CollectedActivity, ContributorMap},
    error::Error,
    format::{highlight_summary, render_bullet},
    window::DateWindow
};

const PULL_REQUEST_HEADING: &str = "## PR Status";
const ISSUE_HEADING: &str = "## Issues Status";
const CONTRIBUTOR_HEADING: &str = "## Contributors";
const NO_PULL_REQUESTS: &str = "No pull request activity this month.";
const NO_ISSUES: &str = "No issue activity this month.";
const ATTRIBUTION: &str =
    "_This digest was generated automatically from repository activity._";

/// Title and markdown body of a discussion post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub title: String,
    /// Full document, starting with the title as a level-one heading.
    pub body:  String
}

/// Discussion title for the window.
pub fn announcement_title(window: &DateWindow) -> String {
    format!("Monthly Activity Digest: {}", window.label())
}

/// Statement used instead of a document when nothing happened.
pub fn no_activity_notice(window: &DateWindow) -> String {
    format!(
        "No pull request or issue activity was recorded for {}; nothing to publish.",
        window.label()
    )
}

/// Builds the announcement for the collected activity.
///
/// # Errors
///
/// Propagates failures from [`highlight_summary`].
///
/// # Example
///
/// ```
/// use activity_digest::{DateWindow, collect_activity, compose_announcement};
/// use chrono::NaiveDate;
///
/// let window =
///     DateWindow::previous_month(NaiveDate::from_ymd_opt(2023, 2, 1,).expect("date",),)?;
/// let announcement = compose_announcement(&collect_activity(Vec::new(), Vec::new(),), &window,)?;
/// assert_eq!(announcement.title, "Monthly Activity Digest: January 2023");
/// assert!(announcement.body.contains("No pull request activity this month."));
/// # Ok::<(), activity_digest::Error>(())
/// ```
pub fn compose_announcement(
    collected: &CollectedActivity,
    window: &DateWindow
) -> Result<Announcement, Error> {
    let title = announcement_title(window);
    let summary = highlight_summary(&collected.pull_requests, window)?;

    let mut sections = vec![
        format!("# {title}"),
        summary,
        format!(
            "{PULL_REQUEST_HEADING}\n\n{}",
            generate_status_list(&collected.pull_requests, window, NO_PULL_REQUESTS)
        ),
        format!(
            "{ISSUE_HEADING}\n\n{}",
            generate_status_list(&collected.issues, window, NO_ISSUES)
        ),
    ];

    if let Some(contributors) = generate_contributor_line(&collected.contributors) {
        sections.push(format!("{CONTRIBUTOR_HEADING}\n\n{contributors}"));
    }

    sections.push(format!("---\n\n{ATTRIBUTION}"));

    debug!(
        "Composed announcement with {} sections for {}",
        sections.len(),
        window.label()
    );

    Ok(Announcement {
        title,
        body: sections.join("\n\n") + "\n"
    })
}

fn generate_status_list(items: &[ActivityItem], window: &DateWindow, placeholder: &str) -> String {
    if items.is_empty() {
        return placeholder.to_string();
    }

    items
        .iter()
        .map(|item| render_bullet(item, window))
        .collect::<Vec<_>>()
        .join("\n")
}

fn generate_contributor_line(contributors: &ContributorMap) -> Option<String> {
    if contributors.is_empty() {
        return None;
    }

    let links: Vec<String> = contributors
        .sorted_entries()
        .into_iter()
        .map(|(name, url)| format!("[@{name}]({url})"))
        .collect();

    Some(format!(
        "Thanks to everyone who took part this month: {}",
        links.join(", ")
    ))
}
