// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory [`GitHubApi`] double and item builders shared by unit tests.

use std::sync::Mutex;

use crate::{
    activity::{ActivityItem, ItemKind, ProfileRef},
    config::RepositorySlug,
    error::Error,
    github::{
        CreatedDiscussion, DiscussionCategory, DiscussionInput, GitHubApi, RepositoryDiscussions,
    },
};

pub(crate) fn profile(name: &str,) -> ProfileRef
{
    ProfileRef {
        name: name.to_owned(), url: format!("https://github.com/{name}"),
    }
}

pub(crate) fn pull_request(number: u64, title: &str,) -> ActivityItem
{
    ActivityItem {
        kind: ItemKind::PullRequest {
            merged_at: None,
        },
        number,
        title: title.to_owned(),
        url: format!("https://github.com/octo/widgets/pull/{number}"),
        state: "OPEN".to_owned(),
        created_at: "2022-11-20T09:00:00Z".to_owned(),
        updated_at: "2023-01-10T09:00:00Z".to_owned(),
        closed_at: None,
        author: Some(profile("alice",),),
        participants: Vec::new(),
    }
}

pub(crate) fn merged_pull_request(number: u64, title: &str, merged_at: &str,) -> ActivityItem
{
    ActivityItem {
        kind: ItemKind::PullRequest {
            merged_at: Some(merged_at.to_owned(),),
        },
        state: "MERGED".to_owned(),
        closed_at: Some(merged_at.to_owned(),),
        ..pull_request(number, title,)
    }
}

pub(crate) fn issue(number: u64, title: &str,) -> ActivityItem
{
    ActivityItem {
        kind: ItemKind::Issue,
        url: format!("https://github.com/octo/widgets/issues/{number}"),
        ..pull_request(number, title,)
    }
}

pub(crate) fn categories(names: &[&str],) -> RepositoryDiscussions
{
    RepositoryDiscussions {
        id:         "R_kgDOwidgets".to_owned(),
        categories: names
            .iter()
            .enumerate()
            .map(|(index, name,)| DiscussionCategory {
                id:   format!("DIC_{index}"),
                name: (*name).to_owned(),
            },)
            .collect(),
    }
}

/// Scripted GitHub double; search results are routed by the `is:pr` /
/// `is:issue` qualifier.
#[derive(Debug,)]
pub(crate) struct FakeGitHub
{
    pub pull_requests: Result<Vec<ActivityItem,>, String,>,
    pub issues:        Result<Vec<ActivityItem,>, String,>,
    pub discussions:   Result<RepositoryDiscussions, String,>,
    pub queries:       Mutex<Vec<String,>,>,
    pub created:       Mutex<Vec<DiscussionInput,>,>,
}

impl Default for FakeGitHub
{
    fn default() -> Self
    {
        Self {
            pull_requests: Ok(Vec::new(),),
            issues:        Ok(Vec::new(),),
            discussions:   Ok(categories(&["General", "Announcements"],),),
            queries:       Mutex::new(Vec::new(),),
            created:       Mutex::new(Vec::new(),),
        }
    }
}

impl FakeGitHub
{
    pub(crate) fn created(&self,) -> Vec<DiscussionInput,>
    {
        self.created.lock().expect("lock",).clone()
    }

    pub(crate) fn queries(&self,) -> Vec<String,>
    {
        self.queries.lock().expect("lock",).clone()
    }
}

impl GitHubApi for FakeGitHub
{
    async fn search_activity(&self, query: &str,) -> Result<Vec<ActivityItem,>, Error,>
    {
        self.queries.lock().expect("lock",).push(query.to_owned(),);
        let scripted = if query.contains("is:pr",) { &self.pull_requests } else { &self.issues };
        scripted.clone().map_err(Error::graphql,)
    }

    async fn repository_discussions(
        &self,
        _repository: &RepositorySlug,
    ) -> Result<RepositoryDiscussions, Error,>
    {
        self.discussions.clone().map_err(Error::service,)
    }

    async fn create_discussion(&self, input: &DiscussionInput,) -> Result<CreatedDiscussion, Error,>
    {
        let mut created = self.created.lock().expect("lock",);
        created.push(input.clone(),);
        Ok(CreatedDiscussion {
            url: format!("https://github.com/octo/widgets/discussions/{}", created.len()),
        },)
    }
}
