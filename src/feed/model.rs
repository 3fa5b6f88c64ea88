/// Title used when a feed has no usable title of its own
pub const DEFAULT_FEED_TITLE: &str = "RSS Feed";

/// Default cap on the number of entries retained per feed
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Normalized representation of an RSS 2.0 or Atom feed.
///
/// Built fresh on every fetch and discarded once its entries have been
/// projected into host document blocks.
#[derive(Debug, Clone)]
pub struct Feed {
    pub title: String,
    /// Channel-level canonical URL; may be empty.
    pub link: String,
    pub description: Option<String>,
    /// Retained entries in source order, truncated to the configured maximum.
    pub entries: Vec<FeedEntry>,
}

/// A single item/article within a feed
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    /// Publication timestamp in whatever format the dialect used. Kept as an
    /// opaque string, never parsed into a calendar type.
    pub pub_date: Option<String>,
    /// Dialect-native unique id (RSS guid / Atom id). Uniqueness is not
    /// enforced by this crate.
    pub guid: Option<String>,
}

impl FeedEntry {
    /// An entry is only kept when both title and link survived trimming.
    pub(crate) fn is_retainable(&self) -> bool {
        !self.title.is_empty() && !self.link.is_empty()
    }
}
