//! Extractors for the full-credits page of a title.
//!
//! Each crew section is a heading inside `#fullcredits_content` followed by
//! its table. A section that is not listed yields an empty result.

use amdb_film_models::RoleMap;
use scraper::{ElementRef, Html};

use crate::text::{extract_role, zip_names_and_roles};
use crate::{ScrapeError, dom};

const DIRECTORS_HEADER: &str = "Directed by";
const WRITERS_HEADER: &str = "Writing Credits";
const PRODUCERS_HEADER: &str = "Produced by";

fn section<'a>(page: &'a Html, header: &str) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let block = dom::require(page, "#fullcredits_content", "full credits block")?;
    let table = dom::table_after_header(block, header);
    if table.is_none() {
        log::info!("No '{header}' section in full credits");
    }
    Ok(table)
}

fn anchor_names(table: ElementRef<'_>) -> Result<Vec<String>, ScrapeError> {
    let sel = dom::selector("a")?;
    Ok(table
        .select(&sel)
        .map(|a| dom::text_of(a).trim().to_owned())
        .collect())
}

fn credit_cells(table: ElementRef<'_>) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
    let sel = dom::selector(".credit")?;
    Ok(table.select(&sel).collect())
}

/// Director names in credit order.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the credits block is missing.
pub fn directors(page: &Html) -> Result<Vec<String>, ScrapeError> {
    section(page, DIRECTORS_HEADER)?.map_or_else(|| Ok(Vec::new()), anchor_names)
}

/// Writers mapped to their parenthesised role annotations.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the credits block is missing, or
/// [`ScrapeError::MalformedCredits`] if names and credits do not pair up.
pub fn writers(page: &Html) -> Result<RoleMap, ScrapeError> {
    let Some(table) = section(page, WRITERS_HEADER)? else {
        return Ok(RoleMap::new());
    };
    let names = anchor_names(table)?;
    let roles = credit_cells(table)?
        .into_iter()
        .map(|cell| extract_role(&dom::first_child_text(cell).unwrap_or_default()))
        .collect();
    zip_names_and_roles(names, roles)
}

/// Producers mapped to their plain-text roles.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the credits block is missing, or
/// [`ScrapeError::MalformedCredits`] if names and credits do not pair up.
pub fn producers(page: &Html) -> Result<RoleMap, ScrapeError> {
    let Some(table) = section(page, PRODUCERS_HEADER)? else {
        return Ok(RoleMap::new());
    };
    let names = anchor_names(table)?;
    let roles = credit_cells(table)?
        .into_iter()
        .map(|cell| dom::text_of(cell).trim().to_owned())
        .collect();
    zip_names_and_roles(names, roles)
}
