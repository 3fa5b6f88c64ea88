pub mod fetch;
pub mod model;
pub mod parse;

pub use fetch::{cache_busted, fetch_feed, fetch_feed_text};
pub use model::{DEFAULT_FEED_TITLE, DEFAULT_MAX_ITEMS, Feed, FeedEntry};
pub use parse::parse_feed;
