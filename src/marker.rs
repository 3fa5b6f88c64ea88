//! The persisted text format tying a feed URL to its host document blocks.
//!
//! A feed's root line carries its source URL twice: as the markdown link
//! target and as a machine-readable `data-rss-url` attribute token. Reload
//! matches on either form, because manual edits may preserve only one.

const ATTR_MARKER: &str = "data-rss-url=\"";

/// Render the root line for a feed block.
pub fn root_line(title: &str, url: &str, timestamp: &str) -> String {
    format!("[{title}]({url}) <span {ATTR_MARKER}{url}\">⏳ {timestamp}</span>")
}

/// Render the child line for a single feed entry.
pub fn child_line(title: &str, link: &str) -> String {
    format!("[{title}]({link})")
}

/// Whether block content refers to the given feed URL by either encoding.
pub fn matches_url(content: &str, url: &str) -> bool {
    content.contains(&format!("]({url})")) || content.contains(&format!("{ATTR_MARKER}{url}\""))
}

/// Whether block content carries the machine-readable feed marker at all.
pub fn has_marker(content: &str) -> bool {
    content.contains(ATTR_MARKER)
}

/// Extract the feed URL embedded in block content, preferring the attribute
/// token over the markdown link target.
pub fn extract_url(content: &str) -> Option<String> {
    if let Some((_, rest)) = content.split_once(ATTR_MARKER)
        && let Some((url, _)) = rest.split_once('"')
    {
        return Some(url.to_string());
    }

    let (_, rest) = content.split_once("](")?;
    let (url, _) = rest.split_once(')')?;
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/feed.xml";

    #[test]
    fn root_line_carries_both_encodings() {
        let line = root_line("Example", URL, "2024-03-07");
        assert_eq!(
            line,
            "[Example](https://example.com/feed.xml) \
             <span data-rss-url=\"https://example.com/feed.xml\">⏳ 2024-03-07</span>"
        );
        assert!(matches_url(&line, URL));
        assert!(has_marker(&line));
    }

    #[test]
    fn child_line_is_a_plain_markdown_link() {
        assert_eq!(
            child_line("An Article", "https://example.com/a"),
            "[An Article](https://example.com/a)"
        );
    }

    #[test]
    fn matches_url_on_markdown_form_alone() {
        let content = format!("[Example]({URL}) (added: 2024-03-07)");
        assert!(matches_url(&content, URL));
        assert!(!has_marker(&content));
    }

    #[test]
    fn matches_url_on_attribute_form_alone() {
        let content = format!("Example feed <span data-rss-url=\"{URL}\">⏳ 2024-03-07</span>");
        assert!(matches_url(&content, URL));
    }

    #[test]
    fn rejects_other_urls() {
        let line = root_line("Example", URL, "2024-03-07");
        assert!(!matches_url(&line, "https://example.com/other.xml"));
        assert!(!matches_url("plain text", URL));
    }

    #[test]
    fn extract_url_prefers_attribute_token() {
        let line = root_line("Example", URL, "2024-03-07");
        assert_eq!(extract_url(&line), Some(URL.to_string()));

        // Degraded content keeping only the markdown form still resolves.
        let markdown_only = format!("[Example]({URL})");
        assert_eq!(extract_url(&markdown_only), Some(URL.to_string()));

        assert_eq!(extract_url("no links here"), None);
    }
}
