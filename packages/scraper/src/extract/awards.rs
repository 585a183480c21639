//! Extractors for a person's awards page.
//!
//! The awards table only prints a year and an outcome on the first row of
//! each group, so both are carried forward from the last row that had one.

use std::str::FromStr as _;

use amdb_film_models::{Award, AwardOrganisation, AwardOutcome};
use scraper::{ElementRef, Html};

use crate::{ScrapeError, dom};

/// One row of an organisation's awards table, before carry-forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardRow {
    /// Ceremony year, when the row prints one.
    pub year: Option<i32>,
    /// Winner or nominee, when the row prints one.
    pub outcome: Option<AwardOutcome>,
    /// The award itself; `None` for rows that do not reference a title.
    pub entry: Option<AwardEntry>,
}

/// The per-row part of an award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardEntry {
    /// Award name: the description, or the category when it is blank.
    pub name: String,
    /// Name of the title the award was given for.
    pub title_name: String,
    /// Release year of that title.
    pub title_released: i32,
}

/// Last year and outcome seen while walking an awards table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AwardMarkers {
    /// Last ceremony year printed, if any row has printed one yet.
    pub year: Option<i32>,
    /// Last outcome printed, if any row has printed one yet.
    pub outcome: Option<AwardOutcome>,
}

impl AwardMarkers {
    /// Resolves a row's year and outcome against the carried markers and
    /// returns them with the updated markers.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] if the row has no value for a field
    /// and no earlier row set one.
    pub fn advance(
        self,
        year: Option<i32>,
        outcome: Option<AwardOutcome>,
    ) -> Result<(i32, AwardOutcome, Self), ScrapeError> {
        let resolved_year = year
            .or(self.year)
            .ok_or_else(|| ScrapeError::parse("unable to determine award year"))?;
        let resolved_outcome = outcome
            .or(self.outcome)
            .ok_or_else(|| ScrapeError::parse("unable to determine award outcome"))?;

        if year.is_none() {
            log::debug!("Carrying forward award year {resolved_year}");
        }
        if outcome.is_none() {
            log::debug!("Carrying forward award outcome {resolved_outcome}");
        }

        Ok((
            resolved_year,
            resolved_outcome,
            Self {
                year: Some(resolved_year),
                outcome: Some(resolved_outcome),
            },
        ))
    }
}

/// Folds table rows into awards, carrying year and outcome forward.
///
/// Every row advances the markers, including rows that are then skipped
/// for lacking a title.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if a row's year or outcome cannot be
/// resolved.
pub fn fold_award_rows(rows: impl IntoIterator<Item = AwardRow>) -> Result<Vec<Award>, ScrapeError> {
    let (_, awards) = rows.into_iter().try_fold(
        (AwardMarkers::default(), Vec::new()),
        |(markers, mut awards), row| {
            let (year, outcome, markers) = markers.advance(row.year, row.outcome)?;
            match row.entry {
                Some(entry) => awards.push(Award {
                    name: entry.name,
                    outcome,
                    year,
                    title_name: entry.title_name,
                    title_released: entry.title_released,
                }),
                None => log::debug!("Skipping award row without a title"),
            }
            Ok::<_, ScrapeError>((markers, awards))
        },
    )?;
    Ok(awards)
}

/// Reads the raw fields of one awards table row.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the row links a title but its release
/// year or award name cannot be read.
pub fn read_award_row(row: ElementRef<'_>) -> Result<AwardRow, ScrapeError> {
    let year = dom::find(row, r#"a[href*="event"]"#)?
        .and_then(|a| dom::text_of(a).trim().parse().ok());
    let outcome = dom::find(row, ".award_outcome b")?
        .and_then(|b| AwardOutcome::from_str(dom::text_of(b).trim()).ok());

    let entry = match dom::find(row, r#"a[href*="title"]"#)? {
        Some(title) => Some(AwardEntry {
            name: award_name(row)?,
            title_name: dom::text_of(title).trim().to_owned(),
            title_released: title_released(row)?,
        }),
        None => None,
    };

    Ok(AwardRow {
        year,
        outcome,
        entry,
    })
}

/// The description's leading text, or the category when that is blank.
fn award_name(row: ElementRef<'_>) -> Result<String, ScrapeError> {
    let description = dom::find(row, ".award_description")?
        .and_then(dom::first_child_text)
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty());
    if let Some(name) = description {
        return Ok(name);
    }

    dom::find(row, ".award_category")?
        .and_then(dom::first_child_text)
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ScrapeError::parse("award row has neither description nor category"))
}

fn title_released(row: ElementRef<'_>) -> Result<i32, ScrapeError> {
    let span = dom::find(row, ".title_year")?
        .ok_or_else(|| ScrapeError::parse("award title has no release year"))?;
    let raw = dom::text_of(span);
    raw.replace(['(', ')'], "")
        .trim()
        .parse()
        .map_err(|e| ScrapeError::parse(format!("invalid award title year '{}': {e}", raw.trim())))
}

/// Awards listed under `organisation`, in page order.
///
/// An organisation without a section on the page has no awards.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the awards block is missing or a row
/// cannot be resolved.
pub fn awards_for(page: &Html, organisation: AwardOrganisation) -> Result<Vec<Award>, ScrapeError> {
    let block = dom::require(page, ".article.listo", "awards block")?;
    let Some(table) = dom::table_after_header(block, organisation.display_name()) else {
        log::info!("No {organisation} section on awards page");
        return Ok(Vec::new());
    };

    let row_sel = dom::selector("tr")?;
    let rows = table
        .select(&row_sel)
        .map(read_award_row)
        .collect::<Result<Vec<_>, _>>()?;
    fold_award_rows(rows)
}
