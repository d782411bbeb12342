//! OPML parsing for the import/export endpoints.
//!
//! Feedly accepts and returns subscription lists as OPML. Documents are
//! checked locally before upload so an obviously broken file never reaches
//! the API, and exported documents can be summarized without a second request.
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// SEC-003: Maximum allowed nesting depth for OPML outline elements.
/// Prevents stack overflow attacks from maliciously crafted deeply nested OPMLs.
const MAX_OPML_DEPTH: usize = 50;

/// Errors that can occur during OPML parsing.
#[derive(Debug, Error)]
pub enum OpmlError {
    /// SEC-003: OPML nesting depth exceeds safety limit.
    #[error("OPML nesting depth exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),

    /// XML parsing failed.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The document's root element is not `<opml>`.
    #[error("Document is not OPML: root element is {0}")]
    NotOpml(String),
}

/// A feed subscription extracted from an OPML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpmlFeed {
    /// Sourced from `title`, falling back to `text`, then to the feed URL.
    pub title: String,
    pub xml_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Title of the nearest enclosing folder outline, if any.
    pub category: Option<String>,
}

/// Number of feeds in each folder; `None` collects feeds outside any folder.
pub fn count_by_category(feeds: &[OpmlFeed]) -> BTreeMap<Option<&str>, usize> {
    let mut counts = BTreeMap::new();
    for feed in feeds {
        *counts.entry(feed.category.as_deref()).or_default() += 1;
    }
    counts
}

/// Parse OPML content and extract feed subscriptions.
///
/// Folder outlines (those without `xmlUrl`) are traversed and recorded as the
/// category of the feeds nested inside them.
///
/// # Errors
///
/// - [`OpmlError::NotOpml`] if the root element is not `<opml>` (or there is none)
/// - [`OpmlError::XmlParse`] for malformed XML
/// - [`OpmlError::MaxDepthExceeded`] for pathological nesting
pub fn parse_opml(content: &str) -> Result<Vec<OpmlFeed>, OpmlError> {
    // SEC-002: XXE protection: quick-xml (0.37) never parses <!ENTITY> declarations.
    // Custom entities produce an error from `decode_and_unescape_value()`.
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut feeds = Vec::new();
    let mut buf = Vec::new();
    let mut seen_root = false;
    // One slot per open <outline>: Some(title) for folders, None for feeds
    let mut folders: Vec<Option<String>> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if !seen_root => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name != "opml" {
                    return Err(OpmlError::NotOpml(name));
                }
                seen_root = true;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"outline" => {
                // SEC-003: Reject excessively nested OPMLs
                if folders.len() >= MAX_OPML_DEPTH {
                    return Err(OpmlError::MaxDepthExceeded(MAX_OPML_DEPTH));
                }
                let outline = parse_outline(&e, &reader)?;
                match outline {
                    Outline::Feed(feed) => {
                        feeds.push(feed.in_category(current_category(&folders)));
                        folders.push(None);
                    }
                    Outline::Folder(title) => folders.push(title),
                }
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"outline" => {
                if let Outline::Feed(feed) = parse_outline(&e, &reader)? {
                    feeds.push(feed.in_category(current_category(&folders)));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"outline" => {
                folders.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpmlError::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(OpmlError::NotOpml("(none)".to_string()));
    }
    Ok(feeds)
}

fn current_category(folders: &[Option<String>]) -> Option<String> {
    folders.iter().rev().find_map(Clone::clone)
}

enum Outline {
    Feed(OpmlFeed),
    Folder(Option<String>),
}

impl OpmlFeed {
    fn in_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }
}

fn parse_outline(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Outline, OpmlError> {
    let mut xml_url = None;
    let mut html_url = None;
    let mut title = None;
    let mut text = None;

    for attr_result in e.attributes() {
        let attr = match attr_result {
            Ok(attr) => attr,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed OPML attribute");
                continue;
            }
        };
        let value = || {
            attr.decode_and_unescape_value(reader.decoder())
                .map(|v| v.into_owned())
                .map_err(|e| OpmlError::XmlParse(e.to_string()))
        };
        match attr.key.as_ref() {
            b"xmlUrl" => xml_url = Some(value()?),
            b"htmlUrl" => html_url = Some(value()?),
            b"title" => title = Some(value()?),
            b"text" => text = Some(value()?),
            _ => {}
        }
    }

    let title = title.or(text);
    Ok(match xml_url {
        Some(url) => Outline::Feed(OpmlFeed {
            title: title.unwrap_or_else(|| url.clone()),
            xml_url: url,
            html_url,
            category: None,
        }),
        None => Outline::Folder(title),
    })
}
