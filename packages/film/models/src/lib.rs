#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Title, person and award records scraped for the AMDb graph.
//!
//! Records are assembled once per scrape from a single page parse and are
//! never mutated afterwards. Relation maps ([`TitleRelations`],
//! [`PersonRelations`]) are transient: they only carry names and
//! per-relation payloads so the caller can resolve each referenced
//! person and write the relation in dependency order.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Date format used when a person's date of birth identifies them in a
/// relation (e.g. `11-Nov-1974`).
pub const DOB_LABEL_FORMAT: &str = "%d-%b-%Y";

/// A movie or TV title.
///
/// Identified by `(name, released)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    /// Title name as shown in the page header.
    pub name: String,
    /// Short plot summary.
    pub summary: String,
    /// Release year.
    pub released: i32,
    /// Certificate rating (e.g. `"PG-13"`).
    pub certificate_rating: String,
    /// Running time in minutes.
    pub length_in_minutes: u32,
    /// Long-form storyline.
    pub storyline: String,
    /// Marketing tagline.
    pub tagline: String,
}

impl Title {
    /// Returns the identity key of this title.
    #[must_use]
    pub fn identity(&self) -> (&str, i32) {
        (&self.name, self.released)
    }

    /// Short rendering used in log lines, e.g. `Title(The Dark Knight (2008))`.
    #[must_use]
    pub fn short_label(&self) -> String {
        format!("Title({} ({}))", self.name, self.released)
    }
}

/// A person credited on a title or nominated for an award.
///
/// Identified by `(name, date_of_birth)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Mini biography with markup removed.
    pub bio: String,
}

impl Person {
    /// Returns the identity key of this person.
    #[must_use]
    pub fn identity(&self) -> (&str, NaiveDate) {
        (&self.name, self.date_of_birth)
    }

    /// Date of birth formatted as [`DOB_LABEL_FORMAT`].
    #[must_use]
    pub fn dob_label(&self) -> String {
        self.date_of_birth.format(DOB_LABEL_FORMAT).to_string()
    }

    /// Short rendering used in log lines, e.g. `Person(Christian Bale - 30-Jan-1974)`.
    #[must_use]
    pub fn short_label(&self) -> String {
        format!("Person({} - {})", self.name, self.dob_label())
    }
}

/// Whether an award was won or only nominated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AwardOutcome {
    /// The person won the award.
    Winner,
    /// The person was nominated.
    Nominee,
}

/// Award-giving organisations that are scraped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum AwardOrganisation {
    /// The Academy of Motion Picture Arts and Sciences.
    #[serde(rename = "Academy Awards")]
    #[strum(serialize = "Academy Awards")]
    AcademyAwards,
    /// Hollywood Foreign Press Association.
    #[serde(rename = "Golden Globes")]
    #[strum(serialize = "Golden Globes")]
    GoldenGlobes,
    /// British Academy of Film and Television Arts.
    #[serde(rename = "BAFTA Awards")]
    #[strum(serialize = "BAFTA Awards")]
    BaftaAwards,
}

impl AwardOrganisation {
    /// Every organisation, in the order they are scraped.
    pub const ALL: [Self; 3] = [Self::AcademyAwards, Self::GoldenGlobes, Self::BaftaAwards];

    /// Name of the organisation as it appears in award page headers.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.into()
    }
}

/// A single award won or nominated for, scoped to one person and
/// organisation at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    /// Award name (description, or category when the description is blank).
    pub name: String,
    /// Winner or nominee.
    pub outcome: AwardOutcome,
    /// Ceremony year.
    pub year: i32,
    /// Name of the title the award was given for.
    pub title_name: String,
    /// Release year of that title.
    pub title_released: i32,
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Award(name: {}, year: {}, outcome: {}, title: {} ({}))",
            self.name, self.year, self.outcome, self.title_name, self.title_released
        )
    }
}

/// Person name to the ordered list of roles they hold on a title.
pub type RoleMap = IndexMap<String, Vec<String>>;

/// A cast member's credit on a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastCredit {
    /// Characters played, in page order.
    pub characters: Vec<String>,
    /// Zero-based billing rank.
    pub billing: u32,
}

/// Actor name to credit, in billing order.
pub type CastMap = IndexMap<String, CastCredit>;

/// Everything a title page says about the people and genres related to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRelations {
    /// Director names in credit order.
    pub directors: Vec<String>,
    /// Writer name to writing roles (e.g. `"screenplay"`).
    pub writers: RoleMap,
    /// Producer name to producing roles (e.g. `"executive producer"`).
    pub producers: RoleMap,
    /// Genre names.
    pub genres: Vec<String>,
    /// Main cast, stopping before the alphabetical remainder.
    pub cast: CastMap,
}

/// Awards for a person grouped by organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRelations {
    /// Organisation to awards in page order.
    pub awards: BTreeMap<AwardOrganisation, Vec<Award>>,
}

impl PersonRelations {
    /// Awards for `organisation`, or an empty slice when none were listed.
    #[must_use]
    pub fn awards_for(&self, organisation: AwardOrganisation) -> &[Award] {
        self.awards.get(&organisation).map_or(&[], Vec::as_slice)
    }
}
