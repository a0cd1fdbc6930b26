// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Monthly repository activity digests published as GitHub Discussions.
//!
//! The library resolves the previous calendar month, searches a repository's
//! pull requests and issues updated during that month, deduplicates them,
//! collects everyone who took part, and renders a markdown announcement that
//! is either printed (dry run) or posted through the GraphQL
//! `createDiscussion` mutation.

mod activity;
mod announcement;
mod collect;
mod config;
mod error;
mod fetch;
mod format;
mod github;
mod publish;
mod report;
#[cfg(test)]
mod testing;
mod window;

pub use activity::{ActivityItem, ItemKind, ProfileRef};
pub use announcement::{Announcement, announcement_title, compose_announcement, no_activity_notice};
pub use collect::{CollectedActivity, ContributorMap, collect_activity};
pub use config::{DEFAULT_CATEGORY, RawConfig, ReportConfig, RepositorySlug};
pub use error::{Error, io_error};
pub use fetch::{FetchedActivity, fetch_activity};
pub use format::{Status, StatusKind, classify, highlight_summary, render_bullet};
pub use github::{
    CreatedDiscussion, DiscussionCategory, DiscussionInput, GitHubApi, OctocrabClient,
    RepositoryDiscussions, SEARCH_PAGE_SIZE, search_query,
};
pub use publish::{PublishOutcome, publish, save_announcement, select_category};
pub use report::{ReportOutcome, run_report};
pub use window::DateWindow;
