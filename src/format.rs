// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Markdown fragments describing individual items and the month's highlights.
///
/// Every item is classified into exactly one [`StatusKind`] relative to the
/// window, rendered as a single bullet line, and merged feature-like pull
/// requests feed a short natural-language summary.
use regex::Regex;

use crate::{activity::ActivityItem, error::Error, window::DateWindow};

/// Title keywords that make a merged pull request worth highlighting.
const HIGHLIGHT_KEYWORDS: &[&str] = &["feat", "add", "support", "stable", "release"];
const MAX_HIGHLIGHTS: usize = 3;
const CONVENTIONAL_PREFIX: &str = r"^(?i:feat|fix|chore|docs)(?:\([^)]*\))?:\s*";

const GENERIC_SUMMARY: &str =
    "This month brought steady maintenance work and incremental improvements across the project.";

/// What happened to an item during the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum StatusKind
{
    Merged,
    Closed,
    Opened,
    /// Touched during the window without being opened, closed or merged.
    Active,
}

impl StatusKind
{
    pub fn icon(self,) -> &'static str
    {
        match self {
            Self::Merged => "🟣",
            Self::Closed => "🔴",
            Self::Opened => "🟢",
            Self::Active => "🔄",
        }
    }

    pub fn verb(self,) -> &'static str
    {
        match self {
            Self::Merged => "Merged",
            Self::Closed => "Closed",
            Self::Opened => "Opened",
            Self::Active => "Updated",
        }
    }
}

/// Classification of one item plus the date shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct Status<'item,>
{
    pub kind: StatusKind,
    /// `YYYY-MM-DD` portion of the timestamp that justified the status.
    pub date: &'item str,
}

/// Classifies an item; the first matching rule wins.
///
/// Pull requests check merged, closed, opened in that order; issues check
/// closed then opened. Anything else is [`StatusKind::Active`] dated by its
/// last update.
pub fn classify<'item,>(item: &'item ActivityItem, window: &DateWindow,) -> Status<'item,>
{
    let in_window = |timestamp: Option<&'item str,>| timestamp.filter(|t| window.contains(t,),);

    let merged = in_window(item.merged_at(),).map(|t| (StatusKind::Merged, t,),);
    let closed = || in_window(item.closed_at.as_deref(),).map(|t| (StatusKind::Closed, t,),);
    let opened = || in_window(Some(item.created_at.as_str(),),).map(|t| (StatusKind::Opened, t,),);

    let (kind, timestamp,) = merged
        .or_else(closed,)
        .or_else(opened,)
        .unwrap_or((StatusKind::Active, item.updated_at.as_str(),),);

    Status {
        kind,
        date: day_of(timestamp,),
    }
}

fn day_of(timestamp: &str,) -> &str
{
    timestamp.get(..10,).unwrap_or(timestamp,)
}

/// Renders the markdown bullet for one item.
///
/// # Examples
///
/// ```
/// use activity_digest::{ActivityItem, DateWindow, ItemKind, render_bullet};
/// use chrono::NaiveDate;
///
/// let window =
///     DateWindow::previous_month(NaiveDate::from_ymd_opt(2023, 2, 1,).expect("date",),)?;
/// let item = ActivityItem {
///     kind:         ItemKind::Issue,
///     number:       7,
///     title:        "Crash on start".to_owned(),
///     url:          "https://github.com/o/r/issues/7".to_owned(),
///     state:        "OPEN".to_owned(),
///     created_at:   "2023-01-04T10:00:00Z".to_owned(),
///     updated_at:   "2023-01-04T10:00:00Z".to_owned(),
///     closed_at:    None,
///     author:       None,
///     participants: Vec::new(),
/// };
/// assert_eq!(
///     render_bullet(&item, &window,),
///     "- 🟢 [Crash on start](https://github.com/o/r/issues/7) \
///      ([Opened 2023-01-04](https://github.com/o/r/issues/7) by unknown)"
/// );
/// # Ok::<(), activity_digest::Error>(())
/// ```
pub fn render_bullet(item: &ActivityItem, window: &DateWindow,) -> String
{
    let status = classify(item, window,);
    let author = item
        .author
        .as_ref()
        .map_or_else(|| "unknown".to_owned(), |a| format!("[@{}]({})", a.name, a.url),);

    format!(
        "- {icon} [{title}]({url}) ([{verb} {date}]({url}) by {author})",
        icon = status.kind.icon(),
        title = item.title,
        url = item.url,
        verb = status.kind.verb(),
        date = status.date,
    )
}

/// Builds the summary paragraph from merged, feature-like pull requests.
///
/// `pull_requests` is expected in ascending number order; the first three
/// qualifying entries are used.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the title prefix pattern fails to compile.
pub fn highlight_summary(pull_requests: &[ActivityItem], window: &DateWindow,) -> Result<String, Error,>
{
    let prefix = Regex::new(CONVENTIONAL_PREFIX,)
        .map_err(|e| Error::validation(format!("invalid title prefix pattern: {e}"),),)?;

    let highlights: Vec<String,> = pull_requests
        .iter()
        .filter(|pr| pr.merged_at().is_some_and(|t| window.contains(t,),),)
        .filter(|pr| is_highlight(&pr.title,),)
        .take(MAX_HIGHLIGHTS,)
        .map(|pr| format!("[{}]({})", prefix.replace(&pr.title, "",), pr.url),)
        .collect();

    Ok(match highlights.as_slice() {
        [] => GENERIC_SUMMARY.to_owned(),
        [only] => format!("This month's headline change is the introduction of {only}."),
        [init @ .., last] => format!("Highlights include {} and {last}.", init.join(", ",)),
    },)
}

fn is_highlight(title: &str,) -> bool
{
    let lowered = title.to_lowercase();
    HIGHLIGHT_KEYWORDS.iter().any(|keyword| lowered.contains(keyword,),)
}
