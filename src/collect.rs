// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Deduplication of fetched items and contributor extraction.
///
/// Items from both searches are merged by URL (later records replace earlier
/// ones), split back into pull requests and issues, and ordered by number.
/// Every author seen along the way, including comment and review authors,
/// ends up in the [`ContributorMap`].
use std::{cmp::Ordering, collections::BTreeMap};

use tracing::debug;

use crate::activity::{ActivityItem, ProfileRef};

/// Contributor login mapped to profile link.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct ContributorMap
{
    entries: BTreeMap<String, String,>,
}

impl ContributorMap
{
    /// Inserts or refreshes a contributor; the latest profile link wins.
    pub fn upsert(&mut self, profile: &ProfileRef,)
    {
        if self.entries.insert(profile.name.clone(), profile.url.clone(),).is_none() {
            debug!("Discovered contributor {}", profile.name);
        }
    }

    pub fn len(&self,) -> usize
    {
        self.entries.len()
    }

    pub fn is_empty(&self,) -> bool
    {
        self.entries.is_empty()
    }

    /// Profile link recorded for `name`, if any.
    pub fn get(&self, name: &str,) -> Option<&str,>
    {
        self.entries.get(name,).map(String::as_str,)
    }

    /// Entries in locale-aware name order.
    ///
    /// Names compare case-insensitively first so `bob` sorts between `Alice`
    /// and `Carol`; names equal under that comparison fall back to byte order
    /// to keep the result deterministic.
    pub fn sorted_entries(&self,) -> Vec<(&str, &str,),>
    {
        let mut entries: Vec<(&str, &str,),> =
            self.entries.iter().map(|(name, url,)| (name.as_str(), url.as_str(),),).collect();
        entries.sort_by(|(left, _,), (right, _,)| locale_compare(left, right,),);
        entries
    }
}

fn locale_compare(left: &str, right: &str,) -> Ordering
{
    left.to_lowercase().cmp(&right.to_lowercase(),).then_with(|| left.cmp(right,),)
}

/// Deduplicated, sorted activity plus everyone who took part in it.
#[derive(Debug, Clone, Default,)]
pub struct CollectedActivity
{
    pub pull_requests: Vec<ActivityItem,>,
    pub issues:        Vec<ActivityItem,>,
    pub contributors:  ContributorMap,
}

impl CollectedActivity
{
    /// `true` when neither pull requests nor issues were found.
    pub fn is_empty(&self,) -> bool
    {
        self.pull_requests.is_empty() && self.issues.is_empty()
    }
}

/// Merges both search results into a [`CollectedActivity`].
///
/// Pull requests are inserted before issues, so on a URL collision the issue
/// search's record is kept.
///
/// # Examples
///
/// ```
/// use activity_digest::collect_activity;
///
/// let collected = collect_activity(Vec::new(), Vec::new(),);
/// assert!(collected.is_empty());
/// assert!(collected.contributors.is_empty());
/// ```
pub fn collect_activity(
    pull_requests: Vec<ActivityItem,>,
    issues: Vec<ActivityItem,>,
) -> CollectedActivity
{
    let mut by_url: BTreeMap<String, ActivityItem,> = BTreeMap::new();
    let mut contributors = ContributorMap::default();

    for item in pull_requests.into_iter().chain(issues,) {
        if let Some(author,) = &item.author {
            contributors.upsert(author,);
        }
        for participant in &item.participants {
            contributors.upsert(participant,);
        }

        if let Some(previous,) = by_url.insert(item.url.clone(), item,) {
            debug!("Replaced duplicate record for {}", previous.url);
        }
    }

    let (mut pull_requests, mut issues,): (Vec<ActivityItem,>, Vec<ActivityItem,>,) =
        by_url.into_values().partition(ActivityItem::is_pull_request,);

    pull_requests.sort_by_key(|item| item.number,);
    issues.sort_by_key(|item| item.number,);

    debug!(
        "Collected {} pull requests, {} issues and {} contributors",
        pull_requests.len(),
        issues.len(),
        contributors.len()
    );

    CollectedActivity {
        pull_requests,
        issues,
        contributors,
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::*;
    use crate::testing::{issue, profile, pull_request};

    proptest! {
        #[test]
        fn output_lists_are_ordered_by_number(numbers in proptest::collection::vec(1u64..500, 0..40)) {
            let pull_requests: Vec<ActivityItem> =
                numbers.iter().map(|n| pull_request(*n, "pr")).collect();
            let issues: Vec<ActivityItem> = numbers.iter().map(|n| issue(*n, "issue")).collect();

            let collected = collect_activity(pull_requests, issues);

            prop_assert!(collected.pull_requests.windows(2).all(|w| w[0].number < w[1].number));
            prop_assert!(collected.issues.windows(2).all(|w| w[0].number < w[1].number));
        }
    }

    #[test]
    fn duplicate_url_keeps_later_record()
    {
        let first = pull_request(4, "Old title",);
        let mut second = pull_request(4, "New title",);
        second.state = "CLOSED".to_owned();

        let collected = collect_activity(vec![first, second], Vec::new(),);

        assert_eq!(collected.pull_requests.len(), 1);
        assert_eq!(collected.pull_requests[0].title, "New title");
        assert_eq!(collected.pull_requests[0].state, "CLOSED");
    }

    #[test]
    fn same_url_in_both_searches_collapses_to_issue_record()
    {
        let pr = pull_request(9, "Shared",);
        let mut duplicate = issue(9, "Shared",);
        duplicate.url = pr.url.clone();

        let collected = collect_activity(vec![pr], vec![duplicate],);

        assert!(collected.pull_requests.is_empty());
        assert_eq!(collected.issues.len(), 1);
    }

    #[test]
    fn partitions_by_kind_and_sorts_ascending()
    {
        let collected = collect_activity(
            vec![pull_request(12, "b",), pull_request(3, "a",)],
            vec![issue(30, "y",), issue(8, "x",)],
        );

        let prs: Vec<u64,> = collected.pull_requests.iter().map(|i| i.number,).collect();
        let issues: Vec<u64,> = collected.issues.iter().map(|i| i.number,).collect();
        assert_eq!(prs, vec![3, 12]);
        assert_eq!(issues, vec![8, 30]);
    }

    #[test]
    fn contributors_union_authors_commenters_and_reviewers()
    {
        let mut pr = pull_request(1, "Feature",);
        pr.participants = vec![profile("bob",), profile("carol",), profile("alice",)];
        let mut anonymous = issue(2, "Ghost issue",);
        anonymous.author = None;
        anonymous.participants = vec![profile("Dave",)];

        let collected = collect_activity(vec![pr], vec![anonymous],);

        let names: Vec<&str,> =
            collected.contributors.sorted_entries().into_iter().map(|(name, _,)| name,).collect();
        assert_eq!(names, vec!["alice", "bob", "carol", "Dave"]);
    }

    #[test]
    fn repeat_sighting_overwrites_profile_link()
    {
        let mut map = ContributorMap::default();
        map.upsert(&ProfileRef {
            name: "erin".to_owned(), url: "https://old.example/erin".to_owned(),
        },);
        map.upsert(&profile("erin",),);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("erin"), Some("https://github.com/erin"));
    }

    #[test]
    fn sorted_entries_ignore_case_then_break_ties()
    {
        let mut map = ContributorMap::default();
        for name in ["zed", "Bob", "bob", "alice"] {
            map.upsert(&profile(name,),);
        }

        let names: Vec<&str,> = map.sorted_entries().into_iter().map(|(name, _,)| name,).collect();
        assert_eq!(names, vec!["alice", "Bob", "bob", "zed"]);
    }
}
