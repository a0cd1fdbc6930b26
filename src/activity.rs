// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pull request and issue records returned by the GitHub search API.
//!
//! The GraphQL search returns a polymorphic node list; it is decoded through
//! a `__typename`-tagged enum and flattened into [`ActivityItem`], which keeps
//! the shared fields in one place and the pull-request-only merge timestamp
//! inside [`ItemKind`].

use serde::Deserialize;

/// Display name and profile link of a GitHub actor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize,)]
pub struct ProfileRef
{
    /// GitHub login.
    #[serde(rename = "login")]
    pub name: String,
    /// Profile page of the actor.
    pub url:  String,
}

/// Kind-specific part of an [`ActivityItem`].
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum ItemKind
{
    PullRequest
    {
        merged_at: Option<String,>,
    },
    Issue,
}

/// A pull request or issue touched during the reported window.
///
/// Timestamps are ISO 8601 strings exactly as GitHub returns them.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ActivityItem
{
    pub kind:         ItemKind,
    pub number:       u64,
    pub title:        String,
    pub url:          String,
    pub state:        String,
    pub created_at:   String,
    pub updated_at:   String,
    pub closed_at:    Option<String,>,
    pub author:       Option<ProfileRef,>,
    /// Comment authors followed by review authors, in API order.
    pub participants: Vec<ProfileRef,>,
}

impl ActivityItem
{
    pub fn is_pull_request(&self,) -> bool
    {
        matches!(self.kind, ItemKind::PullRequest { .. })
    }

    /// Merge timestamp, always `None` for issues.
    pub fn merged_at(&self,) -> Option<&str,>
    {
        match &self.kind {
            ItemKind::PullRequest {
                merged_at,
            } => merged_at.as_deref(),
            ItemKind::Issue => None,
        }
    }
}

/// Search result node as encoded by the GraphQL endpoint.
#[derive(Debug, Deserialize,)]
#[serde(tag = "__typename")]
pub(crate) enum SearchNode
{
    PullRequest(RawPullRequest,),
    Issue(RawIssue,),
    #[serde(other)]
    Unsupported,
}

impl SearchNode
{
    pub(crate) fn into_item(self,) -> Option<ActivityItem,>
    {
        match self {
            Self::PullRequest(raw,) => Some(raw.common.into_item(
                ItemKind::PullRequest {
                    merged_at: raw.merged_at,
                },
                raw.reviews,
            ),),
            Self::Issue(raw,) => Some(raw.common.into_item(ItemKind::Issue, None,),),
            Self::Unsupported => None,
        }
    }
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCommon
{
    number:     u64,
    title:      String,
    url:        String,
    state:      String,
    created_at: String,
    updated_at: String,
    #[serde(default)]
    closed_at:  Option<String,>,
    #[serde(default)]
    author:     Option<ProfileRef,>,
    #[serde(default)]
    comments:   Option<Connection,>,
}

impl RawCommon
{
    /// Comment authors come first, then review authors.
    fn into_item(self, kind: ItemKind, reviews: Option<Connection,>,) -> ActivityItem
    {
        let mut participants = collect_authors(self.comments,);
        participants.extend(collect_authors(reviews,),);

        ActivityItem {
            kind,
            number: self.number,
            title: self.title,
            url: self.url,
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
            closed_at: self.closed_at,
            author: self.author,
            participants,
        }
    }
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPullRequest
{
    #[serde(flatten)]
    common:    RawCommon,
    #[serde(default)]
    merged_at: Option<String,>,
    #[serde(default)]
    reviews:   Option<Connection,>,
}

#[derive(Debug, Deserialize,)]
pub(crate) struct RawIssue
{
    #[serde(flatten)]
    common: RawCommon,
}

/// `{ nodes: [{ author }] }` shape shared by comment and review connections.
#[derive(Debug, Default, Deserialize,)]
pub(crate) struct Connection
{
    #[serde(default)]
    nodes: Vec<Option<AuthoredNode,>,>,
}

#[derive(Debug, Deserialize,)]
struct AuthoredNode
{
    #[serde(default)]
    author: Option<ProfileRef,>,
}

fn collect_authors(connection: Option<Connection,>,) -> Vec<ProfileRef,>
{
    connection
        .unwrap_or_default()
        .nodes
        .into_iter()
        .flatten()
        .filter_map(|node| node.author,)
        .collect()
}
