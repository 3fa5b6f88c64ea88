// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Insertion and reload of feed blocks against the host document.
//!
//! Reload is destroy-and-recreate: entries carry no reliable identifier, so
//! the existing child set is always deleted and rebuilt from the fresh fetch.
//! All host mutations for one feed run sequentially, and the page tree is
//! re-resolved at the start of every operation instead of being cached.

use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::datefmt::{DEFAULT_DATE_FORMAT, current_timestamp};
use crate::error::ReconcileError;
use crate::feed::{DEFAULT_MAX_ITEMS, FeedEntry, fetch_feed};
use crate::host::{BlockId, BlockNode, HostDocument, InsertOptions};
use crate::http::HttpClient;
use crate::marker;
use crate::notify::Notifier;
use crate::settings::Settings;

/// Options for feed insertion and reload
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Maximum number of entries retained per feed
    pub max_items: usize,
    /// Date pattern for the root line timestamp
    pub date_format: String,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ReconcileOptions {
    /// Resolve options from the host's settings store, falling back to the
    /// engine defaults for anything unset.
    pub fn from_settings(settings: &dyn Settings) -> Self {
        Self {
            max_items: settings.max_items().unwrap_or(DEFAULT_MAX_ITEMS),
            date_format: settings
                .preferred_date_format()
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        }
    }
}

/// Result of a first-time feed insertion
#[derive(Debug, Clone)]
pub struct AddReport {
    pub feed_title: String,
    /// Number of entry blocks actually created
    pub inserted: usize,
    /// Number of entry blocks that failed to insert and were skipped
    pub skipped: usize,
}

/// Result of a single-feed reload
#[derive(Debug, Clone)]
pub struct ReloadReport {
    pub feed_title: String,
    /// Stale child blocks deleted
    pub removed: usize,
    /// Fresh entry blocks created
    pub inserted: usize,
    /// Entry blocks that failed to insert and were skipped
    pub skipped: usize,
}

/// Aggregate result of a page-wide reload
#[derive(Debug, Clone, Default)]
pub struct PageReloadReport {
    pub reloaded: usize,
    pub failed: usize,
    /// Details of failed feeds (url, error message)
    pub failures: Vec<(String, String)>,
}

/// Insert a feed at the user's current editing position.
///
/// This is the only operation that talks to the user directly: it reports
/// progress and outcome through `notifier` in addition to returning a report.
pub async fn add_feed<C: HttpClient, H: HostDocument>(
    client: &C,
    host: &H,
    notifier: &dyn Notifier,
    options: &ReconcileOptions,
    url: &str,
) -> Result<AddReport, ReconcileError> {
    let trimmed = url.trim();
    let feed_url = match Url::parse(trimmed) {
        Ok(parsed) => parsed,
        Err(e) => {
            // Validation failures never reach the network.
            notifier.error("Invalid URL format");
            return Err(e.into());
        }
    };

    notifier.info("Fetching RSS feed...");

    let feed = match fetch_feed(client, &feed_url, options.max_items).await {
        Ok(feed) => feed,
        Err(e) => {
            notifier.error(&format!("Failed to add RSS feed: {e}"));
            return Err(e.into());
        }
    };

    let timestamp = current_timestamp(&options.date_format);
    let root_content = marker::root_line(&feed.title, trimmed, &timestamp);
    let root = insert_root(host, &root_content).await?;

    let inserted = insert_entry_blocks(host, &root, &feed.entries).await;

    // Trailing empty sibling so the cursor lands outside the feed block.
    if let Err(e) = host.insert_block(&root, "", InsertOptions::sibling()).await {
        warn!(error = %e, "failed to add trailing empty line");
    }

    notifier.success(&format!(
        "RSS feed \"{}\" added with {} items!",
        feed.title, inserted
    ));

    Ok(AddReport {
        skipped: feed.entries.len() - inserted,
        feed_title: feed.title,
        inserted,
    })
}

/// Reload a previously inserted feed in place.
///
/// Locates the feed's root block on the current page by URL marker, rewrites
/// its root line, deletes every stale child, and recreates the child set from
/// the fresh fetch. Does not message the user; callers aggregate results.
pub async fn reload_feed<C: HttpClient, H: HostDocument>(
    client: &C,
    host: &H,
    options: &ReconcileOptions,
    url: &str,
) -> Result<ReloadReport, ReconcileError> {
    let trimmed = url.trim();
    let feed_url = Url::parse(trimmed)?;
    let feed = fetch_feed(client, &feed_url, options.max_items).await?;

    let page = host
        .current_page()
        .await?
        .ok_or(ReconcileError::NoActivePage)?;

    // Fresh snapshot per operation; earlier snapshots may be stale.
    let tree = host.page_blocks_tree(&page.name).await?;
    let root = find_feed_root(&tree, trimmed).ok_or_else(|| ReconcileError::FeedNotFound {
        url: trimmed.to_string(),
    })?;

    let timestamp = current_timestamp(&options.date_format);
    host.update_block(&root.id, &marker::root_line(&feed.title, trimmed, &timestamp))
        .await?;

    // Delete last child first so sibling indices never shift under us.
    let mut removed = 0;
    for child in root.children.iter().rev() {
        match host.delete_block(&child.id).await {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(block = %child.id, error = %e, "failed to delete stale feed item block");
            }
        }
    }

    let inserted = insert_entry_blocks(host, &root.id, &feed.entries).await;

    Ok(ReloadReport {
        skipped: feed.entries.len() - inserted,
        feed_title: feed.title,
        removed,
        inserted,
    })
}

/// Reload every feed on the current page.
///
/// Feeds are processed strictly sequentially; one feed's failure is recorded
/// and never prevents the others from reloading.
pub async fn reload_page_feeds<C: HttpClient, H: HostDocument>(
    client: &C,
    host: &H,
    notifier: &dyn Notifier,
    options: &ReconcileOptions,
) -> Result<PageReloadReport, ReconcileError> {
    let page = host
        .current_page()
        .await?
        .ok_or(ReconcileError::NoActivePage)?;
    let tree = host.page_blocks_tree(&page.name).await?;

    let mut urls = Vec::new();
    collect_marked_urls(&tree, &mut urls);

    if urls.is_empty() {
        notifier.info("No RSS feeds found on the current page");
        return Ok(PageReloadReport::default());
    }

    let mut report = PageReloadReport::default();
    for url in urls {
        match reload_feed(client, host, options, &url).await {
            Ok(_) => report.reloaded += 1,
            Err(e) => {
                warn!(url = %url, error = %e, "failed to reload feed");
                report.failed += 1;
                report.failures.push((url, e.to_string()));
            }
        }
    }

    if report.failed == 0 {
        notifier.success(&format!("Reloaded {} RSS feed(s)", report.reloaded));
    } else {
        notifier.warning(&format!(
            "Reloaded {} RSS feed(s), {} failed",
            report.reloaded, report.failed
        ));
    }

    Ok(report)
}

/// Insert the root line using the three-level position fallback: sibling of
/// the current block, else prepended to the current page, else at the raw
/// editing cursor.
async fn insert_root<H: HostDocument>(host: &H, content: &str) -> Result<BlockId, ReconcileError> {
    if let Some(current) = host.current_block().await? {
        return Ok(host
            .insert_block(&current, content, InsertOptions::sibling())
            .await?);
    }

    if let Some(page) = host.current_page().await? {
        return Ok(host.prepend_block_in_page(&page.id, content).await?);
    }

    Ok(host.insert_at_cursor(content).await?)
}

/// Create one child block per entry. A failed insert is logged and skipped;
/// it never aborts the remaining entries. Returns the number inserted.
async fn insert_entry_blocks<H: HostDocument>(
    host: &H,
    root: &BlockId,
    entries: &[FeedEntry],
) -> usize {
    let mut inserted = 0;

    for entry in entries {
        let content = marker::child_line(&entry.title, &entry.link);

        let mut options = InsertOptions::default();
        if let Some(pub_date) = &entry.pub_date {
            options
                .properties
                .insert("pubDate".to_string(), Value::String(pub_date.clone()));
        }

        match host.insert_block(root, &content, options).await {
            Ok(_) => inserted += 1,
            Err(e) => {
                warn!(title = %entry.title, error = %e, "failed to insert feed item block");
            }
        }
    }

    inserted
}

/// Depth-first search for the first block matching the URL by either marker
/// encoding. With duplicate roots for one URL, first in document order wins.
fn find_feed_root<'a>(nodes: &'a [BlockNode], url: &str) -> Option<&'a BlockNode> {
    for node in nodes {
        if marker::matches_url(&node.content, url) {
            return Some(node);
        }
        if let Some(found) = find_feed_root(&node.children, url) {
            return Some(found);
        }
    }
    None
}

fn collect_marked_urls(nodes: &[BlockNode], urls: &mut Vec<String>) {
    for node in nodes {
        if marker::has_marker(&node.content)
            && let Some(url) = marker::extract_url(&node.content)
        {
            urls.push(url);
        }
        collect_marked_urls(&node.children, urls);
    }
}
