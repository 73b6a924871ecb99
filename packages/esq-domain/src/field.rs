use serde::Serialize;

use crate::{Error, Result};
use esq_config::Relation;

/// Relevance multiplier attached to a searchable field or association.
///
/// Always strictly positive and finite; anything else is rejected here so readers of the
/// metadata never have to re-check it.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
pub struct SearchRanking(f64);
impl SearchRanking {
	pub fn new(value: f64) -> Result<Self> {
		if !value.is_finite() || value <= 0.0 {
			return Err(Error::InvalidRanking { value });
		}

		Ok(Self(value))
	}

	pub fn value(self) -> f64 {
		self.0
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
	ManyToOne,
	OneToMany,
	ManyToMany,
}
impl From<Relation> for AssociationKind {
	fn from(relation: Relation) -> Self {
		match relation {
			Relation::ManyToOne => Self::ManyToOne,
			Relation::OneToMany => Self::OneToMany,
			Relation::ManyToMany => Self::ManyToMany,
		}
	}
}

/// A directly stored, textual attribute.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScalarField {
	name: String,
	storage_name: String,
	ranking: Option<SearchRanking>,
}
impl ScalarField {
	/// Creates an unranked field whose storage name equals its declared name.
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();

		Self { storage_name: name.clone(), name, ranking: None }
	}

	pub fn with_storage_name(mut self, storage_name: impl Into<String>) -> Self {
		self.storage_name = storage_name.into();

		self
	}

	pub fn with_ranking(mut self, ranking: SearchRanking) -> Self {
		self.ranking = Some(ranking);

		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Column or index attribute used when building query clauses.
	pub fn storage_name(&self) -> &str {
		&self.storage_name
	}

	pub fn ranking(&self) -> Option<SearchRanking> {
		self.ranking
	}
}

/// Locale dependent content stored through a translation table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranslatedField {
	inner: ScalarField,
	ranking: Option<SearchRanking>,
}
impl TranslatedField {
	pub fn new(inner: ScalarField) -> Self {
		Self { inner, ranking: None }
	}

	/// Ranking on the wrapper itself. It wins over the wrapped field's own ranking.
	pub fn with_ranking(mut self, ranking: SearchRanking) -> Self {
		self.ranking = Some(ranking);

		self
	}

	pub fn inner(&self) -> &ScalarField {
		&self.inner
	}

	pub fn ranking(&self) -> Option<SearchRanking> {
		self.ranking
	}
}

/// Relation to another entity, expandable into that entity's own searchable fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssociationField {
	name: String,
	storage_name: String,
	kind: AssociationKind,
	target: String,
	ranking: Option<SearchRanking>,
}
impl AssociationField {
	pub fn new(name: impl Into<String>, kind: AssociationKind, target: impl Into<String>) -> Self {
		let name = name.into();

		Self { storage_name: name.clone(), name, kind, target: target.into(), ranking: None }
	}

	pub fn many_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
		Self::new(name, AssociationKind::ManyToOne, target)
	}

	pub fn one_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
		Self::new(name, AssociationKind::OneToMany, target)
	}

	pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
		Self::new(name, AssociationKind::ManyToMany, target)
	}

	/// Foreign key or mapping column backing the relation.
	pub fn with_storage_name(mut self, storage_name: impl Into<String>) -> Self {
		self.storage_name = storage_name.into();

		self
	}

	pub fn with_ranking(mut self, ranking: SearchRanking) -> Self {
		self.ranking = Some(ranking);

		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn storage_name(&self) -> &str {
		&self.storage_name
	}

	pub fn kind(&self) -> AssociationKind {
		self.kind
	}

	/// Name of the referenced entity in the owning [`crate::EntityRegistry`].
	pub fn target(&self) -> &str {
		&self.target
	}

	pub fn ranking(&self) -> Option<SearchRanking> {
		self.ranking
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
	Scalar(ScalarField),
	Translated(TranslatedField),
	Association(AssociationField),
}
impl Field {
	pub fn name(&self) -> &str {
		match self {
			Self::Scalar(field) => field.name(),
			Self::Translated(field) => field.inner().name(),
			Self::Association(field) => field.name(),
		}
	}

	/// The ranking annotated directly on this node. For translated fields this is the wrapper's.
	pub fn ranking(&self) -> Option<SearchRanking> {
		match self {
			Self::Scalar(field) => field.ranking(),
			Self::Translated(field) => field.ranking(),
			Self::Association(field) => field.ranking(),
		}
	}
}
impl From<ScalarField> for Field {
	fn from(field: ScalarField) -> Self {
		Self::Scalar(field)
	}
}
impl From<TranslatedField> for Field {
	fn from(field: TranslatedField) -> Self {
		Self::Translated(field)
	}
}
impl From<AssociationField> for Field {
	fn from(field: AssociationField) -> Self {
		Self::Association(field)
	}
}

#[cfg(test)]
mod tests {
	use crate::field::SearchRanking;

	#[test]
	fn ranking_rejects_non_positive_and_non_finite_values() {
		for value in [0.0, -0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
			assert!(SearchRanking::new(value).is_err(), "Accepted ranking {value}.");
		}

		assert!(SearchRanking::new(f64::MIN_POSITIVE).is_ok());
	}
}
