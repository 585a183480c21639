//! Composes extractor output into records and relation maps.
//!
//! Nothing here fetches or walks the document tree directly; each function
//! takes the already-parsed pages it needs.

use std::collections::BTreeMap;

use amdb_film_models::{AwardOrganisation, Person, PersonRelations, Title, TitleRelations};
use scraper::Html;

use crate::ScrapeError;
use crate::extract::{awards, credits, person as person_fields, title as title_fields};

/// Builds a [`Title`] from a title's main page.
///
/// # Errors
///
/// Returns the first [`ScrapeError`] raised by a field extractor.
pub fn title(main: &Html) -> Result<Title, ScrapeError> {
    Ok(Title {
        name: title_fields::name(main)?,
        summary: title_fields::summary(main)?,
        released: title_fields::release_year(main)?,
        certificate_rating: title_fields::certificate_rating(main)?,
        length_in_minutes: title_fields::length_in_minutes(main)?,
        storyline: title_fields::storyline(main)?,
        tagline: title_fields::tagline(main)?,
    })
}

/// Builds a [`Person`] from a person's main and bio pages.
///
/// # Errors
///
/// Returns the first [`ScrapeError`] raised by a field extractor.
pub fn person(main: &Html, bio: &Html) -> Result<Person, ScrapeError> {
    Ok(Person {
        name: person_fields::name(main)?,
        date_of_birth: person_fields::date_of_birth(main)?,
        bio: person_fields::bio(bio)?,
    })
}

/// Collects crew from the full-credits page and genres and cast from the
/// main page.
///
/// # Errors
///
/// Returns the first [`ScrapeError`] raised by a relation extractor.
pub fn title_relations(main: &Html, full_credits: &Html) -> Result<TitleRelations, ScrapeError> {
    Ok(TitleRelations {
        directors: credits::directors(full_credits)?,
        writers: credits::writers(full_credits)?,
        producers: credits::producers(full_credits)?,
        genres: title_fields::genres(main)?,
        cast: title_fields::cast(main)?,
    })
}

/// Groups a person's awards by organisation.
///
/// # Errors
///
/// Returns the first [`ScrapeError`] raised while reading an organisation.
pub fn person_relations(awards_page: &Html) -> Result<PersonRelations, ScrapeError> {
    let awards = AwardOrganisation::ALL
        .into_iter()
        .map(|organisation| Ok((organisation, awards::awards_for(awards_page, organisation)?)))
        .collect::<Result<BTreeMap<_, _>, ScrapeError>>()?;
    Ok(PersonRelations { awards })
}
