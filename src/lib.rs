pub mod datefmt;
pub mod error;
pub mod feed;
pub mod host;
pub mod http;
pub mod marker;
pub mod notify;
pub mod reconcile;
pub mod settings;

// Re-export main types for convenience
pub use datefmt::{DEFAULT_DATE_FORMAT, current_timestamp, format_date};
pub use error::{FeedError, FetchError, HostError, HttpError, ReconcileError};
pub use feed::{DEFAULT_FEED_TITLE, DEFAULT_MAX_ITEMS, Feed, FeedEntry, fetch_feed, parse_feed};
pub use host::{BlockId, BlockNode, HostDocument, InsertOptions, PageRef};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use notify::{NoopNotifier, Notifier, Severity, SharedNotifier};
pub use reconcile::{
    AddReport, PageReloadReport, ReconcileOptions, ReloadReport, add_feed, reload_feed,
    reload_page_feeds,
};
pub use settings::{Settings, StaticSettings};
