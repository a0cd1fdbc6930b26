// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// GitHub GraphQL operations used by the digest.
///
/// [`GitHubApi`] describes the three calls the pipeline needs: the activity
/// search, the repository/category lookup and the discussion mutation.
/// [`OctocrabClient`] implements them over an authenticated Octocrab instance.
use std::future::Future;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::debug;

use crate::{
    activity::{ActivityItem, SearchNode},
    config::RepositorySlug,
    error::Error,
};

const GRAPHQL_ROUTE: &str = "/graphql";

/// Maximum number of search results requested; later pages are never read.
pub const SEARCH_PAGE_SIZE: usize = 100;

const SEARCH_QUERY: &str = r"
query($searchQuery: String!, $first: Int!) {
  search(query: $searchQuery, type: ISSUE, first: $first) {
    nodes {
      __typename
      ... on PullRequest {
        number title url state createdAt updatedAt closedAt mergedAt
        author { login url }
        comments(first: 20) { nodes { author { login url } } }
        reviews(first: 20) { nodes { author { login url } } }
      }
      ... on Issue {
        number title url state createdAt updatedAt closedAt
        author { login url }
        comments(first: 20) { nodes { author { login url } } }
      }
    }
  }
}";

const REPOSITORY_QUERY: &str = r"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    discussionCategories(first: 25) { nodes { id name } }
  }
}";

const CREATE_DISCUSSION_MUTATION: &str = r"
mutation($repositoryId: ID!, $categoryId: ID!, $title: String!, $body: String!) {
  createDiscussion(input: {repositoryId: $repositoryId, categoryId: $categoryId, title: $title, body: $body}) {
    discussion { url }
  }
}";

/// Discussion category available on a repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
pub struct DiscussionCategory
{
    pub id:   String,
    pub name: String,
}

/// Repository node id together with its discussion categories.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RepositoryDiscussions
{
    pub id:         String,
    pub categories: Vec<DiscussionCategory,>,
}

/// Arguments of the `createDiscussion` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionInput
{
    pub repository_id: String,
    pub category_id:   String,
    pub title:         String,
    pub body:          String,
}

/// Discussion created by the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize,)]
pub struct CreatedDiscussion
{
    pub url: String,
}

/// Remote operations required by the digest pipeline.
pub trait GitHubApi
{
    /// Runs one issue/pull request search and returns at most
    /// [`SEARCH_PAGE_SIZE`] items.
    fn search_activity(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ActivityItem,>, Error,>,> + Send;

    /// Looks up the repository id and its discussion categories.
    fn repository_discussions(
        &self,
        repository: &RepositorySlug,
    ) -> impl Future<Output = Result<RepositoryDiscussions, Error,>,> + Send;

    /// Creates a discussion and returns its location.
    fn create_discussion(
        &self,
        input: &DiscussionInput,
    ) -> impl Future<Output = Result<CreatedDiscussion, Error,>,> + Send;
}

/// [`GitHubApi`] backed by Octocrab's GraphQL endpoint.
#[derive(Clone,)]
pub struct OctocrabClient
{
    octocrab: Octocrab,
}

impl std::fmt::Debug for OctocrabClient
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        f.debug_struct("OctocrabClient",).finish_non_exhaustive()
    }
}

impl OctocrabClient
{
    /// Builds a client authenticated with a personal or workflow token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when Octocrab fails to initialise.
    pub fn new(token: &str,) -> Result<Self, Error,>
    {
        let octocrab = Octocrab::builder().personal_token(token.to_owned(),).build().map_err(
            |e| Error::service(format!("failed to initialize GitHub client: {e}"),),
        )?;

        Ok(Self {
            octocrab,
        },)
    }

    async fn execute<T,>(&self, payload: serde_json::Value,) -> Result<T, Error,>
    where
        T: DeserializeOwned,
    {
        let raw: serde_json::Value = self.octocrab.post(GRAPHQL_ROUTE, Some(&payload,),).await?;
        decode_response(raw,)
    }
}

impl GitHubApi for OctocrabClient
{
    async fn search_activity(&self, query: &str,) -> Result<Vec<ActivityItem,>, Error,>
    {
        debug!("Searching GitHub for '{}'", query);

        let data: SearchData = self
            .execute(json!({
                "query": SEARCH_QUERY,
                "variables": search_variables(query),
            }),)
            .await?;

        let items: Vec<ActivityItem,> =
            data.search.nodes.into_iter().flatten().filter_map(SearchNode::into_item,).collect();

        debug!("Search '{}' returned {} items", query, items.len());
        Ok(items,)
    }

    async fn repository_discussions(
        &self,
        repository: &RepositorySlug,
    ) -> Result<RepositoryDiscussions, Error,>
    {
        debug!("Resolving discussion categories for {}", repository);

        let data: RepositoryData = self
            .execute(json!({
                "query": REPOSITORY_QUERY,
                "variables": { "owner": repository.owner(), "name": repository.name() },
            }),)
            .await?;

        let node = data
            .repository
            .ok_or_else(|| Error::graphql(format!("repository {repository} was not found"),),)?;

        Ok(RepositoryDiscussions {
            id:         node.id,
            categories: node.discussion_categories.nodes.into_iter().flatten().collect(),
        },)
    }

    async fn create_discussion(&self, input: &DiscussionInput,) -> Result<CreatedDiscussion, Error,>
    {
        debug!("Creating discussion '{}' in category {}", input.title, input.category_id);

        let data: CreateDiscussionData = self
            .execute(json!({
                "query": CREATE_DISCUSSION_MUTATION,
                "variables": input,
            }),)
            .await?;

        data.create_discussion
            .and_then(|payload| payload.discussion,)
            .ok_or_else(|| Error::graphql("createDiscussion returned no discussion",),)
    }
}

fn search_variables(query: &str,) -> serde_json::Value
{
    json!({ "searchQuery": query, "first": SEARCH_PAGE_SIZE })
}

/// Builds the search expression for one item kind over the window.
pub fn search_query(repository: &RepositorySlug, qualifier: &str, start: &str, end: &str,) -> String
{
    format!("repo:{repository} {qualifier} updated:{start}..{end}")
}

/// Decodes a raw GraphQL body; shape mismatches surface as
/// [`Error::Serialize`], reported errors as [`Error::GraphQl`].
fn decode_response<T,>(raw: serde_json::Value,) -> Result<T, Error,>
where
    T: DeserializeOwned,
{
    let response: GraphQlResponse<T,> = serde_json::from_value(raw,)?;
    response.into_data()
}

#[derive(Debug, Deserialize,)]
struct GraphQlResponse<T,>
{
    data:   Option<T,>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage,>,
}

#[derive(Debug, Deserialize,)]
struct GraphQlErrorMessage
{
    message: String,
}

impl<T,> GraphQlResponse<T,>
{
    fn into_data(self,) -> Result<T, Error,>
    {
        if !self.errors.is_empty() {
            let messages: Vec<String,> = self.errors.into_iter().map(|e| e.message,).collect();
            return Err(Error::graphql(messages.join("; ",),),);
        }

        self.data.ok_or_else(|| Error::graphql("response contained no data",),)
    }
}

#[derive(Debug, Deserialize,)]
struct SearchData
{
    search: SearchConnection,
}

#[derive(Debug, Deserialize,)]
struct SearchConnection
{
    #[serde(default)]
    nodes: Vec<Option<SearchNode,>,>,
}

#[derive(Debug, Deserialize,)]
struct RepositoryData
{
    repository: Option<RepositoryNode,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode
{
    id:                    String,
    discussion_categories: CategoryConnection,
}

#[derive(Debug, Deserialize,)]
struct CategoryConnection
{
    #[serde(default)]
    nodes: Vec<Option<DiscussionCategory,>,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct CreateDiscussionData
{
    create_discussion: Option<CreateDiscussionPayload,>,
}

#[derive(Debug, Deserialize,)]
struct CreateDiscussionPayload
{
    discussion: Option<CreatedDiscussion,>,
}
