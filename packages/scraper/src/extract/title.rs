//! Extractors for the main page of a title.

use amdb_film_models::{CastCredit, CastMap};
use scraper::{ElementRef, Html};

use crate::text::{collapse_whitespace, parse_length_minutes, strip_html_fragments};
use crate::{ScrapeError, dom};

const TAGLINE_LABEL: &str = "Taglines:";
const TAGLINE_BOUNDARY: &str = "See more";
const CAST_SENTINEL: &str = "Rest of cast listed alphabetically:";

/// Title name: the leading text of the first `h1`.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if there is no `h1` or it has no content.
pub fn name(page: &Html) -> Result<String, ScrapeError> {
    let header = dom::require(page, "h1", "title header")?;
    dom::first_child_text(header)
        .map(|text| text.trim().to_owned())
        .ok_or_else(|| ScrapeError::parse("title header is empty"))
}

/// Plot summary with inline markup removed and whitespace collapsed.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the summary block is missing.
pub fn summary(page: &Html) -> Result<String, ScrapeError> {
    let block = dom::require(page, ".summary_text", "summary")?;
    Ok(collapse_whitespace(&strip_html_fragments(&dom::text_of(block))))
}

/// Release year from the year link next to the title.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the link is missing or not a number.
pub fn release_year(page: &Html) -> Result<i32, ScrapeError> {
    let link = dom::require(page, "#titleYear a", "release year")?;
    let text = dom::text_of(link);
    text.trim()
        .parse()
        .map_err(|e| ScrapeError::parse(format!("invalid release year '{}': {e}", text.trim())))
}

/// Certificate rating: the leading text of the subtext bar (e.g. `PG-13`).
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the subtext bar is missing or empty.
pub fn certificate_rating(page: &Html) -> Result<String, ScrapeError> {
    let subtext = dom::require(page, ".subtext", "subtext")?;
    dom::first_child_text(subtext)
        .map(|text| text.replace('\n', "").trim().to_owned())
        .ok_or_else(|| ScrapeError::parse("subtext is empty"))
}

/// Running time in minutes, read from the subtext `time` element.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the element is missing or its text is
/// not a running time.
pub fn length_in_minutes(page: &Html) -> Result<u32, ScrapeError> {
    let time = dom::require(page, ".subtext time", "running time")?;
    parse_length_minutes(dom::text_of(time).trim())
}

/// Long-form storyline from the first element of the storyline block.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the block or its content is missing.
pub fn storyline(page: &Html) -> Result<String, ScrapeError> {
    let block = dom::require(page, r#"[class="inline canwrap"]"#, "storyline")?;
    let content = dom::element_children(block)
        .next()
        .ok_or_else(|| ScrapeError::parse("storyline block is empty"))?;
    let raw = strip_html_fragments(&dom::text_of(content));
    Ok(raw.trim().replace('\n', " "))
}

/// Tagline: the text of the first `txt-block` between its label and the
/// "See more" link.
///
/// A missing label starts the slice at the beginning of the block and a
/// missing boundary ends it at the end.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the page has no `txt-block`.
pub fn tagline(page: &Html) -> Result<String, ScrapeError> {
    let block = dom::require(page, "div.txt-block", "tagline block")?;
    let raw = strip_html_fragments(&dom::text_of(block));

    let start = raw
        .find(TAGLINE_LABEL)
        .map_or(0, |idx| idx + TAGLINE_LABEL.len());
    let end = raw.find(TAGLINE_BOUNDARY).unwrap_or(raw.len());

    Ok(raw.get(start..end).unwrap_or_default().trim().to_owned())
}

/// Genre names from the second "see more" container.
///
/// Only anchors whose link target mentions `genre` are genres; the same
/// container also links to unrelated pages.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if there is no second container.
pub fn genres(page: &Html) -> Result<Vec<String>, ScrapeError> {
    let container_sel = dom::selector(r#"[class="see-more inline canwrap"]"#)?;
    let anchor_sel = dom::selector("a")?;

    let container = page
        .select(&container_sel)
        .nth(1)
        .ok_or_else(|| ScrapeError::parse("could not find genre container"))?;

    Ok(container
        .select(&anchor_sel)
        .filter(|a| a.value().attr("href").is_some_and(|href| href.contains("genre")))
        .map(|a| dom::text_of(a).trim().to_owned())
        .collect())
}

/// One row of the cast table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastRow {
    /// A billed cast member.
    Member {
        /// Actor name.
        actor: String,
        /// Characters played, in page order.
        characters: Vec<String>,
    },
    /// The "rest of cast" divider; nothing after it is main cast.
    Sentinel,
    /// Labels, spacers and rows without an actor link.
    Skip,
}

/// Classifies a single cast table row by its direct `td` cells.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] only if an internal selector is invalid.
pub fn classify_cast_row(row: ElementRef<'_>) -> Result<CastRow, ScrapeError> {
    let cells = dom::element_children(row)
        .filter(|cell| cell.value().name() == "td")
        .collect::<Vec<_>>();

    match cells.as_slice() {
        [only] if dom::text_of(*only).trim() == CAST_SENTINEL => Ok(CastRow::Sentinel),
        [_, actor_cell, _, character_cell, ..] => {
            let Some(actor) = dom::find(*actor_cell, "a")? else {
                log::debug!("Skipping cast row without an actor link");
                return Ok(CastRow::Skip);
            };
            Ok(CastRow::Member {
                actor: dom::text_of(actor).replace('\n', "").trim().to_owned(),
                characters: characters(*character_cell)?,
            })
        }
        [_, _, ..] => {
            log::debug!("Skipping cast row with {} cells", cells.len());
            Ok(CastRow::Skip)
        }
        _ => Ok(CastRow::Skip),
    }
}

fn characters(cell: ElementRef<'_>) -> Result<Vec<String>, ScrapeError> {
    let anchor_sel = dom::selector("a")?;
    let linked = cell
        .select(&anchor_sel)
        .map(|a| dom::text_of(a).trim().to_owned())
        .collect::<Vec<_>>();

    if linked.is_empty() {
        Ok(vec![collapse_whitespace(&dom::text_of(cell))])
    } else {
        Ok(linked)
    }
}

/// Main cast in billing order, stopping at the "rest of cast" divider.
///
/// Billing starts at zero and advances once per new actor, not once per
/// accepted row. An actor listed again before the divider keeps their first
/// billing and gains the extra characters rather than replacing them, so
/// billing stays dense over distinct actors (`0..actors`) while the row
/// count may be higher.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the cast table is missing.
pub fn cast(page: &Html) -> Result<CastMap, ScrapeError> {
    let table = dom::require(page, "table.cast_list", "cast table")?;
    let row_sel = dom::selector("tr")?;

    let mut cast = CastMap::new();
    let mut billing = 0;

    for row in table.select(&row_sel) {
        match classify_cast_row(row)? {
            CastRow::Sentinel => break,
            CastRow::Skip => {}
            CastRow::Member { actor, characters } => {
                if let Some(existing) = cast.get_mut(&actor) {
                    log::debug!("Merging repeated cast row for {actor}");
                    existing.characters.extend(characters);
                } else {
                    cast.insert(actor, CastCredit { characters, billing });
                    billing += 1;
                }
            }
        }
    }

    Ok(cast)
}
