use std::collections::HashSet;

use crate::{Error, QueryClause, Result, ScoreQuery};
use esq_domain::{EntityDefinition, EntityRegistry, Field, SearchPattern, TranslatedField};

/// Share of the exact-match weight given to the fuzzy clause of the same field and term.
pub const FUZZY_WEIGHT_FACTOR: f64 = 0.5;
/// Ranking of a translated field when neither the wrapper nor the wrapped field carries one.
pub const DEFAULT_TRANSLATED_RANKING: f64 = 1.0;

/// Walks entity metadata depth first and emits an exact and a fuzzy clause per searchable
/// field and term.
///
/// Ranked associations are expanded in place and their clause weights multiplied by the
/// association ranking. An association leading back to an entity already on the current path is
/// not expanded again.
#[derive(Clone, Copy, Debug)]
pub struct ScoreQueryBuilder<'a> {
	registry: &'a EntityRegistry,
}
impl<'a> ScoreQueryBuilder<'a> {
	pub fn new(registry: &'a EntityRegistry) -> Self {
		Self { registry }
	}

	pub fn build_score_queries(
		&self,
		pattern: &SearchPattern,
		entity: &EntityDefinition,
		path_prefix: &str,
	) -> Result<Vec<ScoreQuery>> {
		if pattern.is_empty() {
			return Ok(Vec::new());
		}
		if path_prefix.trim().is_empty() {
			return Err(Error::InvalidPathPrefix { prefix: path_prefix.to_string() });
		}

		let mut visiting = HashSet::new();

		self.walk(pattern, entity, path_prefix, &mut visiting)
	}

	/// Resolves the root entity by name, then builds as [`Self::build_score_queries`] does.
	pub fn build_for_entity(
		&self,
		pattern: &SearchPattern,
		entity_name: &str,
		path_prefix: &str,
	) -> Result<Vec<ScoreQuery>> {
		if pattern.is_empty() {
			return Ok(Vec::new());
		}

		let entity = self
			.registry
			.get(entity_name)
			.ok_or_else(|| Error::UnknownEntity { entity: entity_name.to_string() })?;

		self.build_score_queries(pattern, entity, path_prefix)
	}

	fn walk<'e>(
		&self,
		pattern: &SearchPattern,
		entity: &'e EntityDefinition,
		path_prefix: &str,
		visiting: &mut HashSet<&'e str>,
	) -> Result<Vec<ScoreQuery>>
	where
		'a: 'e,
	{
		let mut queries = Vec::new();

		visiting.insert(entity.name());

		for field in entity.fields() {
			match field {
				Field::Scalar(scalar) => {
					let Some(ranking) = scalar.ranking() else { continue };

					push_field_queries(
						&mut queries,
						pattern,
						&join_path(path_prefix, scalar.storage_name()),
						ranking.value(),
					)?;
				},
				Field::Translated(translated) => {
					push_field_queries(
						&mut queries,
						pattern,
						&join_path(path_prefix, translated.inner().storage_name()),
						translated_ranking(translated),
					)?;
				},
				Field::Association(association) => {
					let Some(ranking) = association.ranking() else { continue };
					let target = self.registry.resolve(
						association.target(),
						&join_path(entity.name(), association.name()),
					)?;

					if visiting.contains(target.name()) {
						continue;
					}

					let nested = self.walk(
						pattern,
						target,
						&join_path(path_prefix, association.name()),
						visiting,
					)?;

					for query in nested {
						queries.push(checked(query.rescaled(ranking.value()))?);
					}
				},
			}
		}

		visiting.remove(entity.name());

		Ok(queries)
	}
}

/// Builds the score queries for `entity` with a one-off [`ScoreQueryBuilder`].
pub fn build_score_queries(
	registry: &EntityRegistry,
	pattern: &SearchPattern,
	entity: &EntityDefinition,
	path_prefix: &str,
) -> Result<Vec<ScoreQuery>> {
	ScoreQueryBuilder::new(registry).build_score_queries(pattern, entity, path_prefix)
}

fn translated_ranking(field: &TranslatedField) -> f64 {
	field
		.ranking()
		.or_else(|| field.inner().ranking())
		.map(|ranking| ranking.value())
		.unwrap_or(DEFAULT_TRANSLATED_RANKING)
}

fn push_field_queries(
	queries: &mut Vec<ScoreQuery>,
	pattern: &SearchPattern,
	field_path: &str,
	ranking: f64,
) -> Result<()> {
	for term in pattern {
		let weight = ranking * term.weight();

		let exact = ScoreQuery::new(QueryClause::exact(field_path, term.text()), weight);
		let fuzzy = ScoreQuery::new(
			QueryClause::fuzzy(field_path, term.text()),
			weight * FUZZY_WEIGHT_FACTOR,
		);

		queries.push(checked(exact)?);
		queries.push(checked(fuzzy)?);
	}

	Ok(())
}

/// Rejects weights that overflowed to infinity or underflowed to zero.
fn checked(query: ScoreQuery) -> Result<ScoreQuery> {
	if !query.weight.is_finite() || query.weight <= 0.0 {
		return Err(Error::WeightOutOfRange {
			field_path: query.clause.field_path().to_string(),
			weight: query.weight,
		});
	}

	Ok(query)
}

fn join_path(prefix: &str, segment: &str) -> String {
	format!("{prefix}.{segment}")
}
