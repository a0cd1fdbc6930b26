// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Concurrent retrieval of pull requests and issues for a window.
///
/// Both searches run side by side and are joined before anything else
/// happens. A failed search is logged and contributes no items; it never
/// aborts the run or cancels the other search.
use tracing::{info, warn};

use crate::{
    activity::ActivityItem,
    config::RepositorySlug,
    github::{GitHubApi, SEARCH_PAGE_SIZE, search_query},
    window::DateWindow,
};

const PULL_REQUEST_QUALIFIER: &str = "is:pr";
const ISSUE_QUALIFIER: &str = "is:issue";

/// Raw search results, one list per item kind.
#[derive(Debug, Clone, Default,)]
pub struct FetchedActivity
{
    pub pull_requests: Vec<ActivityItem,>,
    pub issues:        Vec<ActivityItem,>,
}

/// Fetches items of both kinds updated inside `window`.
///
/// Only the first [`SEARCH_PAGE_SIZE`] results of each search are used.
///
/// # Example
///
/// ```no_run
/// use activity_digest::{DateWindow, OctocrabClient, RepositorySlug, fetch_activity};
///
/// # async fn example() -> Result<(), activity_digest::Error> {
/// let client = OctocrabClient::new("ghp_token",)?;
/// let window = DateWindow::resolve(Some("2023-02-01",), chrono::Utc::now(),)?;
/// let repository: RepositorySlug = "octo/widgets".parse()?;
/// let fetched = fetch_activity(&client, &repository, &window,).await;
/// println!("{} pull requests", fetched.pull_requests.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_activity<A,>(
    api: &A,
    repository: &RepositorySlug,
    window: &DateWindow,
) -> FetchedActivity
where
    A: GitHubApi,
{
    let pr_query =
        search_query(repository, PULL_REQUEST_QUALIFIER, window.start_str(), window.end_str(),);
    let issue_query =
        search_query(repository, ISSUE_QUALIFIER, window.start_str(), window.end_str(),);

    let (pull_requests, issues,) = tokio::join!(
        search_or_empty(api, "pull requests", &pr_query),
        search_or_empty(api, "issues", &issue_query),
    );

    info!(
        "Fetched {} pull requests and {} issues for {} (first {} results per search)",
        pull_requests.len(),
        issues.len(),
        repository,
        SEARCH_PAGE_SIZE
    );

    FetchedActivity {
        pull_requests,
        issues,
    }
}

async fn search_or_empty<A,>(api: &A, label: &str, query: &str,) -> Vec<ActivityItem,>
where
    A: GitHubApi,
{
    match api.search_activity(query,).await {
        Ok(items,) => items,
        Err(error,) => {
            warn!("Failed to fetch {}: {}. Continuing without them", label, error);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;

    use super::*;
    use crate::testing::{FakeGitHub, issue, pull_request};

    fn window() -> DateWindow
    {
        DateWindow::previous_month(NaiveDate::from_ymd_opt(2023, 2, 1,).expect("valid date",),)
            .expect("valid window",)
    }

    fn repository() -> RepositorySlug
    {
        "octo/widgets".parse().expect("valid slug",)
    }

    #[tokio::test]
    async fn both_searches_are_issued_with_window_bounds()
    {
        let api = FakeGitHub {
            pull_requests: Ok(vec![pull_request(1, "Add cache",)],),
            issues: Ok(vec![issue(2, "Crash",)],),
            ..FakeGitHub::default()
        };

        let fetched = fetch_activity(&api, &repository(), &window(),).await;

        assert_eq!(fetched.pull_requests.len(), 1);
        assert_eq!(fetched.issues.len(), 1);

        let mut queries = api.queries();
        queries.sort();
        assert_eq!(queries, vec![
            "repo:octo/widgets is:issue updated:2023-01-01..2023-01-31".to_owned(),
            "repo:octo/widgets is:pr updated:2023-01-01..2023-01-31".to_owned(),
        ]);
    }

    #[tokio::test]
    async fn failed_search_degrades_to_empty_list()
    {
        let api = FakeGitHub {
            pull_requests: Err("API rate limit exceeded".to_owned(),),
            issues: Ok(vec![issue(5, "Docs",)],),
            ..FakeGitHub::default()
        };

        let fetched = fetch_activity(&api, &repository(), &window(),).await;

        assert!(fetched.pull_requests.is_empty());
        assert_eq!(fetched.issues.len(), 1);
    }

    #[tokio::test]
    async fn both_searches_failing_yields_no_items()
    {
        let api = FakeGitHub {
            pull_requests: Err("boom".to_owned(),),
            issues: Err("boom".to_owned(),),
            ..FakeGitHub::default()
        };

        let fetched = fetch_activity(&api, &repository(), &window(),).await;
        assert!(fetched.pull_requests.is_empty());
        assert!(fetched.issues.is_empty());
    }
}
