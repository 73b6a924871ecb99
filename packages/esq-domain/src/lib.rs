//! Read-side metadata and search intent consumed by the score-query builder.
//!
//! A [`SearchPattern`] carries the weighted terms of one request. An [`EntityRegistry`] owns the
//! [`EntityDefinition`]s whose [`Field`]s decide which columns are searchable and how much each
//! one counts.

pub mod entity;
pub mod field;
pub mod term;

mod error;

pub use entity::{EntityDefinition, EntityRegistry};
pub use error::{Error, Result};
pub use field::{
	AssociationField, AssociationKind, Field, ScalarField, SearchRanking, TranslatedField,
};
pub use term::{SearchPattern, SearchTerm};
