//! Named operations and their embedded documents.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A stored mutation, named after the field it calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    /// Creates a title.
    CreateTitle,
    /// Creates a person.
    CreatePerson,
    /// Links a director to a title.
    CreateDirectedRelation,
    /// Links a writer to a title with their writing roles.
    CreateWroteRelation,
    /// Links a producer to a title with their producing roles.
    CreateProducedRelation,
    /// Links an actor to a title with characters and billing.
    CreateActedInRelation,
    /// Creates a genre.
    CreateGenre,
    /// Links a title to a genre.
    CreateGenreRelation,
    /// Creates an award of an organisation.
    CreateAward,
    /// Links a person to an award they won.
    CreateWonRelation,
    /// Links a person to an award they were nominated for.
    CreateNominatedRelation,
}

impl Operation {
    /// The GraphQL document sent for this operation.
    #[must_use]
    pub const fn document(self) -> &'static str {
        match self {
            Self::CreateTitle => include_str!("../documents/createTitle.graphql"),
            Self::CreatePerson => include_str!("../documents/createPerson.graphql"),
            Self::CreateDirectedRelation => {
                include_str!("../documents/createDirectedRelation.graphql")
            }
            Self::CreateWroteRelation => include_str!("../documents/createWroteRelation.graphql"),
            Self::CreateProducedRelation => {
                include_str!("../documents/createProducedRelation.graphql")
            }
            Self::CreateActedInRelation => {
                include_str!("../documents/createActedInRelation.graphql")
            }
            Self::CreateGenre => include_str!("../documents/createGenre.graphql"),
            Self::CreateGenreRelation => include_str!("../documents/createGenreRelation.graphql"),
            Self::CreateAward => include_str!("../documents/createAward.graphql"),
            Self::CreateWonRelation => include_str!("../documents/createWonRelation.graphql"),
            Self::CreateNominatedRelation => {
                include_str!("../documents/createNominatedRelation.graphql")
            }
        }
    }

    /// Variable names declared by the document, in declaration order.
    #[must_use]
    pub fn declared_variables(self) -> Vec<&'static str> {
        let document = self.document();
        let header = document.split_once('{').map_or(document, |(head, _)| head);
        header
            .split('$')
            .skip(1)
            .filter_map(|decl| decl.split(':').next())
            .map(str::trim)
            .collect()
    }
}
