//! Guide page parser for homebase.no
//!
//! A guide page covers roughly five and a half hours of broadcasts. Each
//! program is a `span.progBox` whose nested link carries the slot identifier
//! as its href and the title as its text. The `a.nextDay` link points at the
//! following window.

use scraper::{ElementRef, Html, Selector};

use crate::error::{HomebaseError, Result};
use crate::types::{EpgPage, RawEntry};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| HomebaseError::ParseError(format!("Invalid selector: {:?}", e)))
}

/// Parse one guide page into raw entries and the continuation token.
///
/// Entries with an empty link target are placeholders and are skipped.
///
/// # Examples
/// ```
/// use homebase_core::parser::parse_epg_page;
///
/// let html = r#"<span class="progBox"><span><span>
///     <a href="20110629/nrktv1/20110629204500-20110629205500">Dagsrevyen</a>
/// </span></span></span>
/// <a class="nextDay" href="epg.php?ts2=1309380300">&gt;</a>"#;
///
/// let page = parse_epg_page(html).unwrap();
/// assert_eq!(page.entries.len(), 1);
/// assert_eq!(page.next_token.as_deref(), Some("ts2=1309380300"));
/// ```
pub fn parse_epg_page(html: &str) -> Result<EpgPage> {
    let document = Html::parse_document(html);

    let prog_box = selector("span.progBox")?;
    let span = selector("span")?;
    let link = selector("a")?;

    let mut entries = Vec::new();
    for prog in document.select(&prog_box) {
        let Some(anchor) = entry_link(&prog, &span, &link) else {
            tracing::debug!("Guide entry without link: {}", prog.html());
            continue;
        };

        let href = anchor.value().attr("href").unwrap_or_default().trim();
        if href.is_empty() {
            continue;
        }

        entries.push(RawEntry {
            href: href.to_string(),
            title: anchor.text().collect(),
        });
    }

    Ok(EpgPage {
        entries,
        next_token: extract_next_token(&document)?,
    })
}

/// The link two spans below the program box
fn entry_link<'a>(prog: &ElementRef<'a>, span: &Selector, link: &Selector) -> Option<ElementRef<'a>> {
    let outer = prog.select(span).next()?;
    let inner = outer.select(span).next()?;
    inner.select(link).next()
}

/// Query string of the last `a.nextDay` link, e.g. `ts2=1309380300`
fn extract_next_token(document: &Html) -> Result<Option<String>> {
    let next_day = selector("a.nextDay")?;

    Ok(document
        .select(&next_day)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| href.split_once('?').map(|(_, query)| query.to_string()))
        .last())
}
