// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::FeedError;

use super::model::{DEFAULT_FEED_TITLE, Feed, FeedEntry};

/// A minimal element tree built from the raw markup.
///
/// Element and attribute names are stored as local names (namespace prefixes
/// stripped), which keeps dialect matching independent of whatever prefixes a
/// particular feed generator chose.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Depth-first search for the first descendant with the given name.
    fn descendant(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }

    /// All text beneath this element, trimmed at the ends only. Text
    /// fragments are concatenated exactly as they appeared so that entity
    /// references split across events ("Q" "&" "A") reassemble verbatim.
    fn text_content(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out.trim().to_string()
    }

    fn append_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.append_text(out);
        }
    }

    fn child_text(&self, name: &str) -> String {
        self.child(name)
            .map(Element::text_content)
            .unwrap_or_default()
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, FeedError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| FeedError::Unparseable(quick_xml::Error::InvalidAttr(e)))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = decode_text(&String::from_utf8_lossy(&attr.value));
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

/// Decode XML and HTML entities. Feeds routinely embed HTML entities like
/// `&nbsp;` that strict XML unescaping would reject, so decoding is lenient.
fn decode_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

fn push_text(stack: &mut [Element], text: &str) {
    // The stack is never empty while the reader runs: index 0 is the
    // synthetic document root.
    let top = stack.last_mut().expect("element stack underflow");
    top.text.push_str(text);
}

/// Build the generic element tree. Structural reader errors become
/// [`FeedError::Malformed`]; attribute extraction errors become
/// [`FeedError::Unparseable`].
fn build_tree(xml: &str) -> Result<Element, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(element_from_start(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                stack
                    .last_mut()
                    .expect("element stack underflow")
                    .children
                    .push(element);
            }
            Ok(Event::End(_)) => {
                // check_end_names guarantees this end tag matches the element
                // on top of the stack.
                let element = stack.pop().expect("element stack underflow");
                stack
                    .last_mut()
                    .expect("element stack underflow")
                    .children
                    .push(element);
            }
            Ok(Event::Text(text)) => {
                push_text(
                    &mut stack,
                    &decode_text(&String::from_utf8_lossy(text.as_ref())),
                );
            }
            Ok(Event::CData(cdata)) => {
                push_text(&mut stack, &String::from_utf8_lossy(cdata.as_ref()));
            }
            Ok(Event::GeneralRef(entity)) => {
                let name = String::from_utf8_lossy(entity.as_ref());
                push_text(&mut stack, &decode_text(&format!("&{name};")));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(FeedError::Malformed(e)),
        }
    }

    if stack.len() > 1 {
        let unclosed = stack.pop().expect("element stack underflow");
        return Err(FeedError::UnclosedTag(unclosed.name));
    }

    Ok(stack.pop().expect("element stack underflow"))
}

/// Parse raw RSS 2.0 or Atom markup into a normalized [`Feed`].
///
/// RSS is tried first: a `<channel>` container never appears in Atom
/// documents, so its presence settles the dialect. Entries missing a title or
/// link after trimming are dropped, and the survivors are truncated to
/// `max_items` in source order. A well-formed document that matches neither
/// dialect yields an empty feed rather than an error.
pub fn parse_feed(xml: &str, max_items: usize) -> Result<Feed, FeedError> {
    let doc = build_tree(xml)?;

    let mut feed = match doc.descendant("channel") {
        Some(channel) => parse_rss_channel(channel),
        None => parse_atom_feed(&doc),
    };

    feed.entries.retain(FeedEntry::is_retainable);
    feed.entries.truncate(max_items);

    if feed.title.is_empty() {
        feed.title = DEFAULT_FEED_TITLE.to_string();
    }

    Ok(feed)
}

fn parse_rss_channel(channel: &Element) -> Feed {
    let entries = channel
        .children_named("item")
        .map(|item| FeedEntry {
            title: item.child_text("title"),
            link: item.child_text("link"),
            description: non_empty(item.child_text("description")),
            pub_date: non_empty(item.child_text("pubDate")),
            guid: non_empty(item.child_text("guid")),
        })
        .collect();

    Feed {
        title: channel.child_text("title"),
        link: channel.child_text("link"),
        description: non_empty(channel.child_text("description")),
        entries,
    }
}

fn parse_atom_feed(doc: &Element) -> Feed {
    let Some(feed) = doc.descendant("feed") else {
        // Neither dialect present. Mirrors the permissive behavior of the
        // original DOM-based lookup: an empty, default-titled feed.
        return Feed {
            title: String::new(),
            link: String::new(),
            description: None,
            entries: Vec::new(),
        };
    };

    // Feed-level links are attribute-only (<link href="..."/>); selecting by
    // the href attribute skips any text-bearing link-like content.
    let link = feed
        .children_named("link")
        .find_map(|l| l.attr("href"))
        .unwrap_or_default()
        .trim()
        .to_string();

    let mut entry_elements = Vec::new();
    doc.collect_descendants("entry", &mut entry_elements);

    let entries = entry_elements
        .into_iter()
        .map(|entry| {
            let entry_link = entry
                .children_named("link")
                .find_map(|l| l.attr("href"))
                .unwrap_or_default()
                .trim()
                .to_string();

            FeedEntry {
                title: entry.child_text("title"),
                link: entry_link,
                description: non_empty(entry.child_text("summary"))
                    .or_else(|| non_empty(entry.child_text("content"))),
                pub_date: non_empty(entry.child_text("published"))
                    .or_else(|| non_empty(entry.child_text("updated"))),
                guid: non_empty(entry.child_text("id")),
            }
        })
        .collect();

    Feed {
        title: feed.child_text("title"),
        link,
        description: non_empty(feed.child_text("subtitle")),
        entries,
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}
