// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Delivery of the composed announcement.
///
/// Dry runs print the document. Otherwise the target repository's
/// discussion categories are resolved and a new discussion is created; every
/// failure on that path is fatal.
use std::{fs, io::Write, path::Path};

use tracing::{info, warn};

use crate::{
    announcement::Announcement,
    config::ReportConfig,
    error::{Error, io_error},
    github::{DiscussionCategory, DiscussionInput, GitHubApi},
};

/// Result of [`publish`].
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum PublishOutcome
{
    /// The document was printed and nothing was sent.
    DryRun,
    /// A discussion was created at `url`.
    Published
    {
        url: String,
    },
}

/// Picks the category named `preferred` (case-insensitive), else the first.
///
/// # Examples
///
/// ```
/// use activity_digest::{DiscussionCategory, select_category};
///
/// let categories = vec![
///     DiscussionCategory { id: "1".to_owned(), name: "General".to_owned() },
///     DiscussionCategory { id: "2".to_owned(), name: "Announcements".to_owned() },
/// ];
/// let chosen = select_category(&categories, "announcements",).expect("category",);
/// assert_eq!(chosen.id, "2");
/// ```
pub fn select_category<'a,>(
    categories: &'a [DiscussionCategory],
    preferred: &str,
) -> Option<&'a DiscussionCategory,>
{
    categories
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(preferred,),)
        .or_else(|| categories.first(),)
}

/// Prints or publishes the announcement according to `config`.
///
/// In dry-run mode the document is written to `out` and no request is made.
///
/// # Errors
///
/// Returns [`Error::NoDiscussionCategory`] when the target repository has no
/// categories, [`Error::Io`] when the dry-run output cannot be written, and
/// propagates any lookup or mutation failure.
pub async fn publish<A, W,>(
    api: &A,
    announcement: &Announcement,
    config: &ReportConfig,
    out: &mut W,
) -> Result<PublishOutcome, Error,>
where
    A: GitHubApi,
    W: Write,
{
    if config.dry_run {
        info!("Dry run: printing announcement instead of publishing");
        out.write_all(announcement.body.as_bytes(),)
            .map_err(|e| io_error(Path::new("<stdout>",), e,),)?;
        return Ok(PublishOutcome::DryRun,);
    }

    let target = &config.target_repository;
    let repository = api.repository_discussions(target,).await?;

    let category = select_category(&repository.categories, &config.category,).ok_or_else(|| {
        Error::NoDiscussionCategory {
            repository: target.to_string(),
        }
    },)?;

    if !category.name.eq_ignore_ascii_case(&config.category,) {
        warn!(
            "Category '{}' not found in {}, falling back to '{}'",
            config.category, target, category.name
        );
    }

    info!("Publishing '{}' to {} in category '{}'", announcement.title, target, category.name);

    let created = api
        .create_discussion(&DiscussionInput {
            repository_id: repository.id.clone(),
            category_id:   category.id.clone(),
            title:         announcement.title.clone(),
            body:          announcement.body.clone(),
        },)
        .await?;

    info!("Created discussion {}", created.url);

    Ok(PublishOutcome::Published {
        url: created.url,
    },)
}

/// Writes the announcement body to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be written.
pub fn save_announcement(path: &Path, announcement: &Announcement,) -> Result<(), Error,>
{
    info!("Writing announcement to {}", path.display());
    fs::write(path, &announcement.body,).map_err(|e| io_error(path, e,),)
}
