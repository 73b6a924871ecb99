use esq_domain::{
	AssociationField, EntityDefinition, EntityRegistry, Field, ScalarField, SearchPattern,
	SearchRanking, SearchTerm, TranslatedField,
};
use esq_search::{Error, QueryClause, ScoreQuery, ScoreQueryBuilder};

fn ranking(value: f64) -> SearchRanking {
	SearchRanking::new(value).expect("Ranking must be valid.")
}

fn term(text: &str, weight: f64) -> SearchTerm {
	SearchTerm::new(text, weight).expect("Term must be valid.")
}

fn entity(name: &str, fields: Vec<Field>) -> EntityDefinition {
	EntityDefinition::new(name, fields).expect("Entity must be valid.")
}

fn exact(path: &str, value: &str, weight: f64) -> ScoreQuery {
	ScoreQuery::new(QueryClause::exact(path, value), weight)
}

fn fuzzy(path: &str, value: &str, weight: f64) -> ScoreQuery {
	ScoreQuery::new(QueryClause::fuzzy(path, value), weight)
}

fn nested_definition() -> EntityDefinition {
	entity("nested", vec![ScalarField::new("name").with_ranking(ranking(100.0)).into()])
}

fn test_definition() -> EntityDefinition {
	entity(
		"test",
		vec![
			ScalarField::new("name").with_ranking(ranking(100.0)).into(),
			ScalarField::new("description").with_ranking(ranking(200.0)).into(),
			ScalarField::new("longDescription").with_storage_name("long_description").into(),
			AssociationField::many_to_one("nested", "nested")
				.with_storage_name("nested_uuid")
				.with_ranking(ranking(0.5))
				.into(),
		],
	)
}

fn test_registry() -> EntityRegistry {
	EntityRegistry::new()
		.with_entity(test_definition())
		.and_then(|registry| registry.with_entity(nested_definition()))
		.expect("Registry must build.")
}

fn only_translated_registry() -> EntityRegistry {
	EntityRegistry::new()
		.with_entity(entity(
			"translated",
			vec![TranslatedField::new(ScalarField::new("name")).into()],
		))
		.expect("Registry must build.")
}

fn build(registry: &EntityRegistry, pattern: &SearchPattern, entity: &str) -> Vec<ScoreQuery> {
	ScoreQueryBuilder::new(registry)
		.build_for_entity(pattern, entity, "test")
		.expect("Score queries must build.")
}

#[test]
fn single_ranked_field_emits_exact_then_fuzzy() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"test",
			vec![ScalarField::new("name").with_ranking(ranking(100.0)).into()],
		))
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("term", 1.0));

	assert_eq!(
		build(&registry, &pattern, "test"),
		vec![exact("test.name", "term", 100.0), fuzzy("test.name", "term", 50.0)]
	);
}

#[test]
fn simple_pattern() {
	let registry = test_registry();
	let pattern = SearchPattern::from(term("term", 1.0));

	assert_eq!(
		build(&registry, &pattern, "test"),
		vec![
			exact("test.name", "term", 100.0),
			fuzzy("test.name", "term", 50.0),
			exact("test.description", "term", 200.0),
			fuzzy("test.description", "term", 100.0),
			exact("test.nested.name", "term", 50.0),
			fuzzy("test.nested.name", "term", 25.0),
		]
	);
}

#[test]
fn multiple_terms_keep_field_then_term_order() {
	let registry = test_registry();
	let mut pattern = SearchPattern::from(term("term", 1.0));

	pattern.add_term(term("test", 0.1));

	assert_eq!(
		build(&registry, &pattern, "test"),
		vec![
			exact("test.name", "term", 100.0),
			fuzzy("test.name", "term", 50.0),
			exact("test.name", "test", 10.0),
			fuzzy("test.name", "test", 5.0),
			exact("test.description", "term", 200.0),
			fuzzy("test.description", "term", 100.0),
			exact("test.description", "test", 20.0),
			fuzzy("test.description", "test", 10.0),
			exact("test.nested.name", "term", 50.0),
			fuzzy("test.nested.name", "term", 25.0),
			exact("test.nested.name", "test", 5.0),
			fuzzy("test.nested.name", "test", 2.5),
		]
	);
}

#[test]
fn translated_field_falls_back_to_default_ranking() {
	let registry = only_translated_registry();
	let pattern = SearchPattern::from(term("term", 1.0));

	assert_eq!(
		build(&registry, &pattern, "translated"),
		vec![exact("test.name", "term", 1.0), fuzzy("test.name", "term", 0.5)]
	);
}

#[test]
fn translated_wrapper_ranking_overrides_inner_ranking() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"translated",
			vec![
				TranslatedField::new(ScalarField::new("name").with_ranking(ranking(4.0)))
					.with_ranking(ranking(8.0))
					.into(),
				TranslatedField::new(
					ScalarField::new("metaTitle")
						.with_storage_name("meta_title")
						.with_ranking(ranking(4.0)),
				)
				.into(),
			],
		))
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("term", 1.0));

	assert_eq!(
		build(&registry, &pattern, "translated"),
		vec![
			exact("test.name", "term", 8.0),
			fuzzy("test.name", "term", 4.0),
			exact("test.meta_title", "term", 4.0),
			fuzzy("test.meta_title", "term", 2.0),
		]
	);
}

#[test]
fn association_is_expanded_at_its_declaration_position() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"test",
			vec![
				AssociationField::many_to_one("nested", "nested")
					.with_ranking(ranking(0.5))
					.into(),
				ScalarField::new("name").with_ranking(ranking(2.0)).into(),
			],
		))
		.and_then(|registry| registry.with_entity(nested_definition()))
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("term", 1.0));

	assert_eq!(
		build(&registry, &pattern, "test"),
		vec![
			exact("test.nested.name", "term", 50.0),
			fuzzy("test.nested.name", "term", 25.0),
			exact("test.name", "term", 2.0),
			fuzzy("test.name", "term", 1.0),
		]
	);
}

#[test]
fn unranked_association_skips_its_subtree() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"test",
			vec![AssociationField::one_to_many("nested", "nested").into()],
		))
		.and_then(|registry| registry.with_entity(nested_definition()))
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("term", 1.0));

	assert!(build(&registry, &pattern, "test").is_empty());
}

#[test]
fn nested_association_rankings_multiply() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"test",
			vec![
				AssociationField::many_to_one("outer", "middle")
					.with_ranking(ranking(0.5))
					.into(),
			],
		))
		.and_then(|registry| {
			registry.with_entity(entity(
				"middle",
				vec![
					AssociationField::many_to_many("inner", "leaf")
						.with_ranking(ranking(0.25))
						.into(),
				],
			))
		})
		.and_then(|registry| {
			registry.with_entity(entity(
				"leaf",
				vec![ScalarField::new("title").with_ranking(ranking(8.0)).into()],
			))
		})
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("term", 2.0));

	assert_eq!(
		build(&registry, &pattern, "test"),
		vec![
			exact("test.outer.inner.title", "term", 2.0),
			fuzzy("test.outer.inner.title", "term", 1.0),
		]
	);
}

#[test]
fn self_referencing_association_terminates() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"category",
			vec![
				ScalarField::new("name").with_ranking(ranking(10.0)).into(),
				AssociationField::many_to_one("parent", "category")
					.with_ranking(ranking(0.5))
					.into(),
			],
		))
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("shoes", 1.0));

	assert_eq!(
		build(&registry, &pattern, "category"),
		vec![exact("test.name", "shoes", 10.0), fuzzy("test.name", "shoes", 5.0)]
	);
}

#[test]
fn mutual_association_cycle_stops_at_revisited_entity() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"product",
			vec![
				ScalarField::new("name").with_ranking(ranking(4.0)).into(),
				AssociationField::many_to_one("manufacturer", "manufacturer")
					.with_ranking(ranking(0.5))
					.into(),
			],
		))
		.and_then(|registry| {
			registry.with_entity(entity(
				"manufacturer",
				vec![
					ScalarField::new("name").with_ranking(ranking(2.0)).into(),
					AssociationField::one_to_many("products", "product")
						.with_ranking(ranking(0.5))
						.into(),
				],
			))
		})
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("acme", 1.0));

	assert_eq!(
		build(&registry, &pattern, "product"),
		vec![
			exact("test.name", "acme", 4.0),
			fuzzy("test.name", "acme", 2.0),
			exact("test.manufacturer.name", "acme", 1.0),
			fuzzy("test.manufacturer.name", "acme", 0.5),
		]
	);
}

#[test]
fn sibling_associations_to_the_same_entity_are_both_expanded() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"order",
			vec![
				AssociationField::many_to_one("billing", "address")
					.with_ranking(ranking(1.0))
					.into(),
				AssociationField::many_to_one("shipping", "address")
					.with_ranking(ranking(2.0))
					.into(),
			],
		))
		.and_then(|registry| {
			registry.with_entity(entity(
				"address",
				vec![ScalarField::new("city").with_ranking(ranking(3.0)).into()],
			))
		})
		.expect("Registry must build.");
	let pattern = SearchPattern::from(term("berlin", 1.0));

	assert_eq!(
		build(&registry, &pattern, "order"),
		vec![
			exact("test.billing.city", "berlin", 3.0),
			fuzzy("test.billing.city", "berlin", 1.5),
			exact("test.shipping.city", "berlin", 6.0),
			fuzzy("test.shipping.city", "berlin", 3.0),
		]
	);
}

#[test]
fn empty_pattern_yields_no_queries_without_resolving_metadata() {
	let registry = EntityRegistry::new();
	let builder = ScoreQueryBuilder::new(&registry);
	let broken = entity(
		"test",
		vec![AssociationField::many_to_one("nested", "missing").with_ranking(ranking(1.0)).into()],
	);

	assert!(
		builder
			.build_score_queries(&SearchPattern::new(), &broken, "test")
			.expect("Empty pattern must not fail.")
			.is_empty()
	);
	assert!(
		builder
			.build_for_entity(&SearchPattern::new(), "missing", "test")
			.expect("Empty pattern must not fail.")
			.is_empty()
	);
}

#[test]
fn unresolvable_association_target_is_fatal() {
	let registry = EntityRegistry::new();
	let broken = entity(
		"test",
		vec![AssociationField::many_to_one("nested", "missing").with_ranking(ranking(1.0)).into()],
	);
	let err = esq_search::build_score_queries(
		&registry,
		&SearchPattern::from(term("term", 1.0)),
		&broken,
		"test",
	)
	.expect_err("Expected unknown entity error.");

	assert!(matches!(err, Error::Domain(_)), "Unexpected error: {err:?}");
	assert_eq!(err.to_string(), "Association test.nested references unknown entity missing.");
}

#[test]
fn unknown_root_entity_is_reported() {
	let registry = test_registry();
	let err = ScoreQueryBuilder::new(&registry)
		.build_for_entity(&SearchPattern::from(term("term", 1.0)), "missing", "test")
		.expect_err("Expected unknown root entity error.");

	assert!(
		matches!(&err, Error::UnknownEntity { entity } if entity == "missing"),
		"Unexpected error: {err:?}"
	);
}

#[test]
fn blank_path_prefix_is_rejected() {
	let registry = test_registry();
	let err = ScoreQueryBuilder::new(&registry)
		.build_for_entity(&SearchPattern::from(term("term", 1.0)), "test", "  ")
		.expect_err("Expected path prefix error.");

	assert!(matches!(err, Error::InvalidPathPrefix { .. }), "Unexpected error: {err:?}");
}

#[test]
fn builder_does_not_mutate_inputs() {
	let registry = test_registry();
	let pattern = SearchPattern::from(term("term", 1.0)).with_term(term("test", 0.1));
	let pattern_before = pattern.clone();
	let entity_before = registry.get("test").cloned();
	let first = build(&registry, &pattern, "test");
	let second = build(&registry, &pattern, "test");

	assert_eq!(first, second);
	assert_eq!(pattern, pattern_before);
	assert_eq!(registry.get("test").cloned(), entity_before);
}

#[test]
fn score_queries_serialize_with_clause_type_tag() {
	let query = exact("test.name", "term", 100.0);
	let json = serde_json::to_value(&query).expect("Score query must serialize.");

	assert_eq!(
		json,
		serde_json::json!({
			"clause": { "type": "exact", "field_path": "test.name", "value": "term" },
			"weight": 100.0,
		})
	);
}

#[test]
fn overflowing_weight_is_rejected() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"test",
			vec![
				AssociationField::many_to_one("nested", "huge")
					.with_ranking(ranking(1e200))
					.into(),
			],
		))
		.and_then(|registry| {
			registry.with_entity(entity(
				"huge",
				vec![ScalarField::new("name").with_ranking(ranking(1e200)).into()],
			))
		})
		.expect("Registry must build.");
	let err = ScoreQueryBuilder::new(&registry)
		.build_for_entity(&SearchPattern::from(term("term", 1.0)), "test", "test")
		.expect_err("Expected weight range error.");

	assert!(
		matches!(
			&err,
			Error::WeightOutOfRange { field_path, weight }
				if field_path == "test.nested.name" && weight.is_infinite()
		),
		"Unexpected error: {err:?}"
	);
}

#[test]
fn underflowing_weight_is_rejected() {
	let registry = EntityRegistry::new()
		.with_entity(entity(
			"test",
			vec![ScalarField::new("name").with_ranking(ranking(f64::MIN_POSITIVE)).into()],
		))
		.expect("Registry must build.");
	let err = ScoreQueryBuilder::new(&registry)
		.build_for_entity(&SearchPattern::from(term("term", 1e-300)), "test", "test")
		.expect_err("Expected weight range error.");

	assert!(
		matches!(
			&err,
			Error::WeightOutOfRange { field_path, weight }
				if field_path == "test.name" && *weight == 0.0
		),
		"Unexpected error: {err:?}"
	);
}
