//! Storage page parser
//!
//! The storage page (`index.php?page=storage`) lists stored and queued
//! recordings as a form with one hidden `pid[]` input per program.

use std::collections::HashSet;

use scraper::{Html, Selector};

use crate::error::{HomebaseError, Result};

/// Collect the program identifiers of all hidden `pid[]` inputs.
pub fn parse_recorded_ids(html: &str) -> Result<HashSet<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"input[type="hidden"][name="pid[]"]"#)
        .map_err(|e| HomebaseError::ParseError(format!("Invalid selector: {:?}", e)))?;

    Ok(document
        .select(&selector)
        .filter_map(|input| input.value().attr("value"))
        .filter(|value| !value.is_empty())
        .map(|value| {
            tracing::debug!("Already recorded: {}", value);
            value.to_string()
        })
        .collect())
}
