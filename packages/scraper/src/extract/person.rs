//! Extractors for a person's main and bio pages.

use chrono::NaiveDate;
use scraper::Html;

use crate::text::{decode_entities, strip_html_fragments};
use crate::{ScrapeError, dom};

const DOB_ATTR_FORMAT: &str = "%Y-%m-%d";

/// Person name from the header's `itemprop` span.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the span is missing or empty.
pub fn name(page: &Html) -> Result<String, ScrapeError> {
    let span = dom::require(page, "h1 .itemprop", "person name")?;
    dom::first_child_text(span)
        .map(|text| text.trim().to_owned())
        .ok_or_else(|| ScrapeError::parse("person name is empty"))
}

/// Date of birth from the `datetime` attribute of the first `time` element.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the element or attribute is missing,
/// or the attribute is not a `YYYY-MM-DD` date. There is no fallback date.
pub fn date_of_birth(page: &Html) -> Result<NaiveDate, ScrapeError> {
    let time = dom::require(page, "time", "date of birth")?;
    let raw = time
        .value()
        .attr("datetime")
        .ok_or_else(|| ScrapeError::parse("date of birth has no datetime attribute"))?;
    NaiveDate::parse_from_str(raw.trim(), DOB_ATTR_FORMAT)
        .map_err(|e| ScrapeError::parse(format!("invalid date of birth '{raw}': {e}")))
}

/// Mini biography from the bio page.
///
/// Line breaks become newlines and every other tag is stripped.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the bio block or its paragraph is
/// missing.
pub fn bio(page: &Html) -> Result<String, ScrapeError> {
    let block = dom::require(page, ".soda.odd", "bio block")?;
    let paragraph = dom::find(block, "p")?
        .ok_or_else(|| ScrapeError::parse("bio block has no paragraph"))?;

    let html = paragraph
        .inner_html()
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("</br>", "\n");
    let stripped = strip_html_fragments(html.trim());
    Ok(decode_entities(&stripped).trim().to_owned())
}
