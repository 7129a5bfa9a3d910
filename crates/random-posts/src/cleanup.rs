//! Removes what `generate` created.

use ecow::{eco_format, EcoString};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::host::{ContentStore, UserLookup};
use crate::model::{AuthorRef, PostId, PostQuery, TermId, TermQuery, ATTACHMENT, DEFAULT_MARKER_KEY};
use crate::progress::Progress;
use crate::prompt::Confirm;
use crate::validate::{ensure_post_type, resolve_author, validate_taxonomies};

#[cfg(test)]
mod tests;

/// Options of [`cleanup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CleanupOptions {
    /// Post type of the posts to remove.
    pub post_type: EcoString,
    /// Deletes posts for good instead of trashing them.
    pub force_delete: bool,
    /// Taxonomies to remove marked terms from.
    pub taxonomies: Vec<EcoString>,
    /// Also removes marked attachments.
    pub media: bool,
    /// Author of the posts to remove.
    pub author: AuthorRef,
    /// Meta key marking generated content.
    pub marker_key: EcoString,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            post_type: "post".into(),
            force_delete: false,
            taxonomies: Vec::new(),
            media: false,
            author: AuthorRef::default(),
            marker_key: DEFAULT_MARKER_KEY.into(),
        }
    }
}

/// What [`cleanup`] removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CleanupReport {
    /// Deleted terms.
    pub terms: Vec<TermId>,
    /// Deleted or trashed posts.
    pub posts: Vec<PostId>,
    /// Per-item failures that were skipped.
    pub warnings: Vec<EcoString>,
}

/// Deletes marked terms, then marked posts.
pub fn cleanup<H: ContentStore + UserLookup + ?Sized>(
    host: &mut H,
    options: &CleanupOptions,
    confirm: &mut dyn Confirm,
    progress: &mut dyn Progress,
) -> Result<CleanupReport> {
    let force = options.force_delete;
    if force {
        ask(
            confirm,
            "You have elected to completely remove the test posts, this cannot be undone, are you sure?",
        )?;
    }

    let mut post_types = vec![options.post_type.clone()];
    if options.media && options.post_type != ATTACHMENT {
        post_types.push(ATTACHMENT.into());
    }
    for post_type in &post_types {
        ensure_post_type(host, post_type)?;
    }
    let author = resolve_author(host, &options.author)?;
    let taxonomies = validate_taxonomies(host, &options.taxonomies, confirm)?;

    let mut report = CleanupReport::default();

    if !taxonomies.is_empty() {
        if !force {
            log::warn!(
                "It looks like you aren't force deleting posts. If we continue we cannot recover \
                 any terms deleted, terms do not have a 'trash' status."
            );
            ask(confirm, "Do you want to continue?")?;
        }

        let terms = host.find_terms(&TermQuery {
            taxonomies,
            marker_key: Some(options.marker_key.clone()),
        });
        if terms.is_empty() {
            log::info!("No terms for specified taxonomy found, skipped term deletion.");
        } else {
            progress.start("Removing", terms.len(), "terms");
            for term in terms {
                match host.delete_term(term.id) {
                    Ok(()) => report.terms.push(term.id),
                    Err(err) => warn(
                        &mut report,
                        eco_format!("Failed to delete term {} ({}): {err}", term.name, term.id),
                    ),
                }
                progress.tick();
            }
            progress.finish();
            log::info!("Deleted {} terms", report.terms.len());
        }
    }

    let posts = host.find_posts(&PostQuery {
        post_types,
        author: Some(author.id),
        marker_key: Some(options.marker_key.clone()),
    });
    if posts.is_empty() {
        log::info!("No posts for the specified post type were found, skipped post deletion.");
    } else {
        progress.start("Removing", posts.len(), "posts");
        for post in posts {
            match host.delete_post(post, force) {
                Ok(()) => report.posts.push(post),
                Err(err) => warn(&mut report, eco_format!("Failed to delete post {post}: {err}")),
            }
            progress.tick();
        }
        progress.finish();
        log::info!(
            "{} {} posts",
            if force { "Deleted" } else { "Trashed" },
            report.posts.len()
        );
    }

    log::info!("Cleanup complete.");
    Ok(report)
}

fn ask(confirm: &mut dyn Confirm, question: &str) -> Result<()> {
    if confirm.confirm(question) {
        Ok(())
    } else {
        Err(Error::Aborted(question.into()))
    }
}

fn warn(report: &mut CleanupReport, message: EcoString) {
    log::warn!("{message}");
    report.warnings.push(message);
}
