//! Scrape-then-write flows behind the `title` and `person` commands.
//!
//! Scraping finishes before anything is written, so a dry run and a real
//! run see exactly the same records. Writes go out in dependency order:
//! entities first, then the relations between them.

use amdb_cli_utils::{MultiProgress, steps_bar};
use amdb_film_models::{Person, PersonRelations, Title, TitleRelations};
use amdb_graphql::{AmdbService, OperationExecutor};
use amdb_scraper::{PageFetcher, ScrapeError, ScrapeSession};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// A title with its relations and the people credited on it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleScrape {
    pub title: Title,
    pub relations: TitleRelations,
    /// Credited name to the person scraped for it.
    pub people: IndexMap<String, Person>,
    /// Credited names whose pages could not be scraped.
    pub skipped: Vec<String>,
}

/// A person with their awards.
#[derive(Debug, Serialize)]
pub struct PersonScrape {
    pub person: Person,
    pub relations: PersonRelations,
}

/// Every credited name, once, in crew-then-cast order.
pub fn credited_people(relations: &TitleRelations) -> Vec<&str> {
    relations
        .directors
        .iter()
        .chain(relations.writers.keys())
        .chain(relations.producers.keys())
        .chain(relations.cast.keys())
        .map(String::as_str)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn scrape_person_contents<F: PageFetcher>(
    session: &mut ScrapeSession<F>,
    name: &str,
) -> Result<Person, ScrapeError> {
    session.load_person_page(name)?;
    session.person_contents()
}

/// Scrapes a title, its relations, and the page of everyone credited.
///
/// A person whose page cannot be scraped is logged and skipped.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the title itself cannot be loaded or
/// assembled.
pub fn scrape_title<F: PageFetcher>(
    session: &mut ScrapeSession<F>,
    query: &str,
    multi: &MultiProgress,
) -> Result<TitleScrape, ScrapeError> {
    session.load_title_page(query)?;
    let title = session.title_contents()?;
    let relations = session.title_relations()?;

    let names = credited_people(&relations);
    let bar = steps_bar(multi, "People", names.len() as u64);
    let mut people = IndexMap::new();
    let mut skipped = Vec::new();

    for name in names {
        bar.set_message(name.to_owned());
        match scrape_person_contents(session, name) {
            Ok(person) => {
                people.insert(name.to_owned(), person);
            }
            Err(e) => {
                log::warn!("Skipping {name}: {e}");
                skipped.push(name.to_owned());
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    log::info!(
        "Scraped {} with {} people ({} skipped)",
        title.short_label(),
        people.len(),
        skipped.len()
    );

    Ok(TitleScrape {
        title,
        relations,
        people,
        skipped,
    })
}

/// Scrapes a person and their awards.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the person cannot be loaded or assembled.
pub fn scrape_person<F: PageFetcher>(
    session: &mut ScrapeSession<F>,
    query: &str,
) -> Result<PersonScrape, ScrapeError> {
    session.load_person_page(query)?;
    Ok(PersonScrape {
        person: session.person_contents()?,
        relations: session.person_relations()?,
    })
}

/// Writes a scraped title: the title, its genres, every scraped person,
/// then each crew and cast relation.
pub fn write_title<E: OperationExecutor>(service: &AmdbService<E>, scrape: &TitleScrape) {
    let title = &scrape.title;
    let relations = &scrape.relations;

    service.create_title(title);
    for genre in &relations.genres {
        service.create_genre(genre);
        service.create_genre_relation(title, genre);
    }

    for person in scrape.people.values() {
        service.create_person(person);
    }

    let person = |name: &str| scrape.people.get(name);

    for name in &relations.directors {
        if let Some(director) = person(name) {
            service.create_directed_relation(director, title);
        }
    }
    for (name, roles) in &relations.writers {
        if let Some(writer) = person(name) {
            service.create_wrote_relation(writer, title, roles);
        }
    }
    for (name, roles) in &relations.producers {
        if let Some(producer) = person(name) {
            service.create_produced_relation(producer, title, roles);
        }
    }
    for (name, credit) in &relations.cast {
        if let Some(actor) = person(name) {
            service.create_acted_in_relation(actor, title, credit);
        }
    }
}

/// Writes a scraped person, then each award and the won or nominated
/// relation to it.
pub fn write_person<E: OperationExecutor>(service: &AmdbService<E>, scrape: &PersonScrape) {
    service.create_person(&scrape.person);
    for (organisation, awards) in &scrape.relations.awards {
        for award in awards {
            service.create_award(award, *organisation);
            service.create_award_relation(&scrape.person, award, *organisation);
        }
    }
}
