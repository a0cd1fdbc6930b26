// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Run configuration gathered once from the command line and environment.
//!
//! The CLI collects raw values (token, repository slugs, date override,
//! publishing options) and hands them to [`ReportConfig::new`], which
//! validates them and produces an immutable value threaded through the whole
//! pipeline. No other module reads the process environment.

use std::{fmt, path::PathBuf, str::FromStr};

use crate::error::Error;

/// Discussion category preferred when no override is supplied.
pub const DEFAULT_CATEGORY: &str = "announcements";

/// Repository identifier in `owner/name` form.
///
/// # Examples
///
/// ```
/// use activity_digest::RepositorySlug;
///
/// let slug: RepositorySlug = "octocat/hello-world".parse().expect("valid slug",);
/// assert_eq!(slug.owner(), "octocat");
/// assert_eq!(slug.name(), "hello-world");
/// assert_eq!(slug.to_string(), "octocat/hello-world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RepositorySlug
{
    owner: String,
    name:  String,
}

impl RepositorySlug
{
    /// Returns the account that owns the repository.
    pub fn owner(&self,) -> &str
    {
        &self.owner
    }

    /// Returns the repository name without the owner prefix.
    pub fn name(&self,) -> &str
    {
        &self.name
    }
}

impl FromStr for RepositorySlug
{
    type Err = Error;

    fn from_str(value: &str,) -> Result<Self, Self::Err,>
    {
        let trimmed = value.trim();
        let (owner, name,) = trimmed.split_once('/',).ok_or_else(|| {
            Error::validation(format!("repository '{trimmed}' must use the owner/name format"),)
        },)?;

        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/',) {
            return Err(Error::validation(format!(
                "repository '{trimmed}' must use the owner/name format"
            ),),);
        }

        Ok(Self {
            owner: owner.to_owned(), name: name.to_owned(),
        },)
    }
}

impl fmt::Display for RepositorySlug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Raw, unvalidated inputs as collected by the CLI.
#[derive(Clone, Default,)]
pub struct RawConfig
{
    pub token:             Option<String,>,
    pub repository:        Option<String,>,
    pub target_repository: Option<String,>,
    pub date_override:     Option<String,>,
    pub category:          Option<String,>,
    pub output:            Option<PathBuf,>,
    pub dry_run:           bool,
}

/// Validated configuration for a single digest run.
#[derive(Clone,)]
pub struct ReportConfig
{
    /// Token used to authenticate GraphQL calls.
    pub token:             String,
    /// Repository whose activity is reported.
    pub repository:        RepositorySlug,
    /// Repository that receives the discussion post.
    pub target_repository: RepositorySlug,
    /// Optional instant that replaces "now" when choosing the month.
    pub date_override:     Option<String,>,
    /// Discussion category matched case-insensitively before falling back to
    /// the first available one.
    pub category:          String,
    /// Optional path that receives a copy of the rendered markdown.
    pub output:            Option<PathBuf,>,
    /// Render only, never publish.
    pub dry_run:           bool,
}

impl ReportConfig
{
    /// Validates raw inputs and produces the run configuration.
    ///
    /// Blank strings are treated the same as missing values, matching the way
    /// workflow inputs arrive as empty environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the token or source repository is
    /// missing, or when a repository slug is malformed.
    pub fn new(raw: RawConfig,) -> Result<Self, Error,>
    {
        let token = non_blank(raw.token,)
            .ok_or_else(|| Error::validation("GITHUB_TOKEN must be provided",),)?;

        let repository: RepositorySlug = non_blank(raw.repository,)
            .ok_or_else(|| Error::validation("GITHUB_REPOSITORY must be provided",),)?
            .parse()?;

        let target_repository = match non_blank(raw.target_repository,) {
            Some(value,) => value.parse()?,
            None => repository.clone(),
        };

        Ok(Self {
            token,
            repository,
            target_repository,
            date_override: non_blank(raw.date_override,),
            category: non_blank(raw.category,).unwrap_or_else(|| DEFAULT_CATEGORY.to_owned(),),
            output: raw.output,
            dry_run: raw.dry_run,
        },)
    }
}

impl fmt::Debug for ReportConfig
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.debug_struct("ReportConfig",)
            .field("token", &"<redacted>",)
            .field("repository", &self.repository,)
            .field("target_repository", &self.target_repository,)
            .field("date_override", &self.date_override,)
            .field("category", &self.category,)
            .field("output", &self.output,)
            .field("dry_run", &self.dry_run,)
            .finish()
    }
}

fn non_blank(value: Option<String,>,) -> Option<String,>
{
    value.map(|v| v.trim().to_owned(),).filter(|v| !v.is_empty(),)
}
