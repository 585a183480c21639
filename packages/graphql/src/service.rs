//! Maps scraped records onto sink operations.
//!
//! Every write is logged before it is sent. A failed write is logged and
//! swallowed so the caller can carry on with the next record.

use amdb_film_models::{Award, AwardOrganisation, AwardOutcome, CastCredit, Person, Title};
use serde_json::{Value, json};

use crate::{Operation, OperationExecutor};

/// Writes records through an [`OperationExecutor`].
pub struct AmdbService<E> {
    executor: E,
}

impl<E: OperationExecutor> AmdbService<E> {
    /// Wraps an executor.
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// The underlying executor.
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    fn run(&self, operation: Operation, variables: Value) -> Option<Value> {
        let Value::Object(variables) = variables else {
            log::error!("{operation}: variables must be an object");
            return None;
        };
        match self.executor.execute(operation, variables) {
            Ok(data) => Some(data),
            Err(e) => {
                log::error!("{operation} failed: {e}");
                None
            }
        }
    }

    /// Creates a title with every scalar field.
    pub fn create_title(&self, title: &Title) -> Option<Value> {
        log::info!("Creating {}", title.short_label());
        self.run(
            Operation::CreateTitle,
            json!({
                "name": title.name,
                "summary": title.summary,
                "released": title.released,
                "certificateRating": title.certificate_rating,
                "titleLengthInMins": title.length_in_minutes,
                "storyline": title.storyline,
                "tagline": title.tagline,
            }),
        )
    }

    /// Creates a person; the date of birth is sent as `YYYY-MM-DD`.
    pub fn create_person(&self, person: &Person) -> Option<Value> {
        log::info!("Creating {}", person.short_label());
        self.run(
            Operation::CreatePerson,
            json!({
                "name": person.name,
                "dateOfBirth": person.date_of_birth.to_string(),
            }),
        )
    }

    /// Links a director to a title.
    pub fn create_directed_relation(&self, person: &Person, title: &Title) -> Option<Value> {
        log::info!(
            "Creating DirectedRelation between {} and {}",
            person.short_label(),
            title.short_label()
        );
        self.run(Operation::CreateDirectedRelation, person_title(person, title))
    }

    /// Links a writer to a title with their writing roles.
    pub fn create_wrote_relation(
        &self,
        person: &Person,
        title: &Title,
        items: &[String],
    ) -> Option<Value> {
        log::info!(
            "Creating WroteRelation between {} and {}, items: {items:?}",
            person.short_label(),
            title.short_label()
        );
        self.run(
            Operation::CreateWroteRelation,
            with(person_title(person, title), "items", json!(items)),
        )
    }

    /// Links a producer to a title with their producing roles.
    pub fn create_produced_relation(
        &self,
        person: &Person,
        title: &Title,
        items: &[String],
    ) -> Option<Value> {
        log::info!(
            "Creating ProducedRelation between {} and {}, items: {items:?}",
            person.short_label(),
            title.short_label()
        );
        self.run(
            Operation::CreateProducedRelation,
            with(person_title(person, title), "items", json!(items)),
        )
    }

    /// Links an actor to a title with their characters and billing.
    pub fn create_acted_in_relation(
        &self,
        person: &Person,
        title: &Title,
        credit: &CastCredit,
    ) -> Option<Value> {
        log::info!(
            "Creating ActedInRelation between {} and {}, characters: {:?}, billing: {}",
            person.short_label(),
            title.short_label(),
            credit.characters,
            credit.billing
        );
        let variables = with(
            person_title(person, title),
            "characters",
            json!(credit.characters),
        );
        self.run(
            Operation::CreateActedInRelation,
            with(variables, "billing", json!(credit.billing)),
        )
    }

    /// Creates a genre by name.
    pub fn create_genre(&self, name: &str) -> Option<Value> {
        log::info!("Creating Genre({name})");
        self.run(Operation::CreateGenre, json!({ "name": name }))
    }

    /// Links a title to a genre.
    pub fn create_genre_relation(&self, title: &Title, genre: &str) -> Option<Value> {
        log::info!(
            "Creating GenreRelation between {} and Genre({genre})",
            title.short_label()
        );
        self.run(
            Operation::CreateGenreRelation,
            json!({
                "titleName": title.name,
                "titleReleased": title.released,
                "genreName": genre,
            }),
        )
    }

    /// Creates an award under an organisation.
    pub fn create_award(&self, award: &Award, organisation: AwardOrganisation) -> Option<Value> {
        log::info!("Creating Award({}, {organisation})", award.name);
        self.run(
            Operation::CreateAward,
            json!({
                "name": award.name,
                "organisation": organisation.display_name(),
            }),
        )
    }

    /// Links a person to an award they won.
    pub fn create_won_relation(
        &self,
        person: &Person,
        award: &Award,
        organisation: AwardOrganisation,
    ) -> Option<Value> {
        log::info!(
            "Creating WonRelation between {} and Award({}, {organisation})",
            person.short_label(),
            award.name
        );
        self.run(
            Operation::CreateWonRelation,
            person_award(person, award, organisation),
        )
    }

    /// Links a person to an award they were nominated for.
    pub fn create_nominated_relation(
        &self,
        person: &Person,
        award: &Award,
        organisation: AwardOrganisation,
    ) -> Option<Value> {
        log::info!(
            "Creating NominatedRelation between {} and Award({}, {organisation})",
            person.short_label(),
            award.name
        );
        self.run(
            Operation::CreateNominatedRelation,
            person_award(person, award, organisation),
        )
    }

    /// Writes the won or nominated relation matching the award's outcome.
    pub fn create_award_relation(
        &self,
        person: &Person,
        award: &Award,
        organisation: AwardOrganisation,
    ) -> Option<Value> {
        match award.outcome {
            AwardOutcome::Winner => self.create_won_relation(person, award, organisation),
            AwardOutcome::Nominee => self.create_nominated_relation(person, award, organisation),
        }
    }
}

/// Relations identify a person by name and `DD-Mon-YYYY` date of birth.
fn person_title(person: &Person, title: &Title) -> Value {
    json!({
        "personName": person.name,
        "personDOB": person.dob_label(),
        "titleName": title.name,
        "titleReleased": title.released,
    })
}

fn person_award(person: &Person, award: &Award, organisation: AwardOrganisation) -> Value {
    json!({
        "personName": person.name,
        "personDOB": person.dob_label(),
        "awardName": award.name,
        "awardOrganisation": organisation.display_name(),
        "year": award.year,
        "titleName": award.title_name,
        "titleReleased": award.title_released,
    })
}

fn with(mut variables: Value, key: &str, value: Value) -> Value {
    if let Some(map) = variables.as_object_mut() {
        map.insert(key.to_owned(), value);
    }
    variables
}
