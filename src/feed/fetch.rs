// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::{SystemTime, UNIX_EPOCH};

use url::Url;

use crate::error::{FetchError, HttpError};
use crate::http::HttpClient;

use super::model::Feed;
use super::parse::parse_feed;

/// Clone the URL with a cache-busting nonce query parameter appended.
///
/// Combined with the client's no-cache headers this defeats both browser and
/// intermediary caches, which would otherwise make reload a no-op.
pub fn cache_busted(url: &Url) -> Url {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let mut busted = url.clone();
    busted
        .query_pairs_mut()
        .append_pair("_", &nonce.to_string());
    busted
}

/// Fetch raw feed text from a URL (without parsing).
pub async fn fetch_feed_text<C: HttpClient>(client: &C, url: &Url) -> Result<String, FetchError> {
    let busted = cache_busted(url);

    let response = client.get_text(busted.as_str()).await.map_err(|e| match e {
        HttpError::Opaque(reason) => FetchError::CrossOrigin {
            url: url.to_string(),
            reason,
        },
        HttpError::Reqwest(source) => FetchError::Transport {
            url: url.to_string(),
            source,
        },
    })?;

    if !(200..300).contains(&response.status) {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response.body)
}

/// Fetch and parse a feed from a URL.
pub async fn fetch_feed<C: HttpClient>(
    client: &C,
    url: &Url,
    max_items: usize,
) -> Result<Feed, FetchError> {
    let body = fetch_feed_text(client, url).await?;
    Ok(parse_feed(&body, max_items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::model::DEFAULT_MAX_ITEMS;
    use async_trait::async_trait;
    use crate::http::HttpResponse;

    struct StaticClient {
        status: u16,
        body: String,
        fail_opaque: bool,
    }

    #[async_trait]
    impl HttpClient for StaticClient {
        async fn get_text(&self, _url: &str) -> Result<HttpResponse, HttpError> {
            if self.fail_opaque {
                return Err(HttpError::Opaque("Failed to fetch".to_string()));
            }
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    const MINIMAL_FEED: &str = r#"<rss version="2.0"><channel>
        <title>Minimal</title>
        <item><title>A</title><link>https://example.com/a</link></item>
    </channel></rss>"#;

    #[test]
    fn cache_busted_appends_nonce_and_keeps_existing_params() {
        let url = Url::parse("https://example.com/feed.xml?format=rss").unwrap();
        let busted = cache_busted(&url);

        let query = busted.query().unwrap();
        assert!(query.contains("format=rss"));
        assert!(query.contains("_="));
        // Original URL untouched
        assert_eq!(url.query(), Some("format=rss"));
    }

    #[tokio::test]
    async fn fetch_parses_successful_response() {
        let client = StaticClient {
            status: 200,
            body: MINIMAL_FEED.to_string(),
            fail_opaque: false,
        };
        let url = Url::parse("https://example.com/feed.xml").unwrap();

        let feed = fetch_feed(&client, &url, DEFAULT_MAX_ITEMS).await.unwrap();
        assert_eq!(feed.title, "Minimal");
        assert_eq!(feed.entries.len(), 1);
    }

    #[tokio::test]
    async fn fetch_maps_non_success_status() {
        let client = StaticClient {
            status: 404,
            body: String::new(),
            fail_opaque: false,
        };
        let url = Url::parse("https://example.com/feed.xml").unwrap();

        let err = fetch_feed(&client, &url, DEFAULT_MAX_ITEMS).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn fetch_maps_opaque_failure_to_cross_origin() {
        let client = StaticClient {
            status: 200,
            body: String::new(),
            fail_opaque: true,
        };
        let url = Url::parse("https://example.com/feed.xml").unwrap();

        let err = fetch_feed(&client, &url, DEFAULT_MAX_ITEMS).await.unwrap_err();
        assert!(matches!(err, FetchError::CrossOrigin { .. }));
    }

    #[tokio::test]
    async fn fetch_propagates_parse_errors() {
        let client = StaticClient {
            status: 200,
            body: "<rss><channel>".to_string(),
            fail_opaque: false,
        };
        let url = Url::parse("https://example.com/feed.xml").unwrap();

        let err = fetch_feed(&client, &url, DEFAULT_MAX_ITEMS).await.unwrap_err();
        assert!(matches!(err, FetchError::Feed(_)));
    }
}
