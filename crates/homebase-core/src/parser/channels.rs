//! Channel list parser
//!
//! The plain guide page has one `div.channelName` per channel. The element id
//! is the channel key prefixed with one character (e.g. `cnrktv1`).

use std::collections::BTreeMap;

use scraper::{Html, Selector};

use crate::error::{HomebaseError, Result};

/// Parse channel keys and display names, sorted by key.
pub fn parse_channels(html: &str) -> Result<BTreeMap<String, String>> {
    let document = Html::parse_document(html);
    let channel_name = Selector::parse("div.channelName")
        .map_err(|e| HomebaseError::ParseError(format!("Invalid selector: {:?}", e)))?;
    let link = Selector::parse("a")
        .map_err(|e| HomebaseError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let mut channels = BTreeMap::new();
    for div in document.select(&channel_name) {
        let Some(id) = div.value().attr("id") else {
            continue;
        };
        let key: String = id.chars().skip(1).collect();
        if key.is_empty() {
            continue;
        }

        let name = div
            .select(&link)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        channels.insert(key, name);
    }

    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channels() {
        let html = r##"<html><body>
            <div class="channelName" id="cnrktv1"><a href="#">NRK1</a></div>
            <div class="channelName" id="ctv2"><a href="#"> TV 2 </a></div>
            <div class="channelName"><a href="#">No id</a></div>
        </body></html>"##;

        let channels = parse_channels(html).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels.get("nrktv1").map(String::as_str), Some("NRK1"));
        assert_eq!(channels.get("tv2").map(String::as_str), Some("TV 2"));
        assert_eq!(channels.keys().next().map(String::as_str), Some("nrktv1"));
    }

    #[test]
    fn test_parse_channels_without_link() {
        let html = r#"<div class="channelName" id="cnrk2"></div>"#;
        let channels = parse_channels(html).unwrap();
        assert_eq!(channels.get("nrk2").map(String::as_str), Some(""));
    }
}
