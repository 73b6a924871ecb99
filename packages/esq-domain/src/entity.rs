use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{AssociationField, Error, Field, Result, ScalarField, SearchRanking, TranslatedField};
use esq_config::{Config, EntitySchema, FieldSchema};

/// Named, ordered collection of field metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityDefinition {
	name: String,
	fields: Vec<Field>,
}
impl EntityDefinition {
	pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Result<Self> {
		let name = name.into();

		if name.trim().is_empty() {
			return Err(Error::InvalidDefinition {
				message: "entity name must be non-empty.".to_string(),
			});
		}

		let mut seen = HashSet::new();

		for field in &fields {
			if field.name().trim().is_empty() {
				return Err(Error::InvalidDefinition {
					message: format!("field names on entity {name} must be non-empty."),
				});
			}
			if !seen.insert(field.name()) {
				return Err(Error::DuplicateField {
					entity: name.clone(),
					field: field.name().to_string(),
				});
			}
		}

		Ok(Self { name, fields })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|field| field.name() == name)
	}

	pub fn associations(&self) -> impl Iterator<Item = &AssociationField> {
		self.fields.iter().filter_map(|field| match field {
			Field::Association(association) => Some(association),
			_ => None,
		})
	}
}

/// Resolves entity names to their definitions.
///
/// Associations refer to their target by name, so self references and longer cycles are plain
/// data here.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
	entities: Vec<EntityDefinition>,
	by_name: HashMap<String, usize>,
}
impl EntityRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds and validates a registry from the entity schemas of a loaded config.
	pub fn from_config(cfg: &Config) -> Result<Self> {
		esq_config::validate(cfg)?;

		let mut registry = Self::new();

		for schema in &cfg.entities {
			registry.register(entity_from_schema(schema)?)?;
		}

		registry.validate()?;

		Ok(registry)
	}

	pub fn register(&mut self, entity: EntityDefinition) -> Result<()> {
		if self.by_name.contains_key(entity.name()) {
			return Err(Error::DuplicateEntity { entity: entity.name().to_string() });
		}

		self.by_name.insert(entity.name().to_string(), self.entities.len());
		self.entities.push(entity);

		Ok(())
	}

	pub fn with_entity(mut self, entity: EntityDefinition) -> Result<Self> {
		self.register(entity)?;

		Ok(self)
	}

	pub fn get(&self, name: &str) -> Option<&EntityDefinition> {
		self.by_name.get(name).map(|index| &self.entities[*index])
	}

	/// Like [`Self::get`], reporting the association that asked for the entity on failure.
	pub fn resolve(&self, name: &str, association: &str) -> Result<&EntityDefinition> {
		self.get(name).ok_or_else(|| Error::UnknownEntity {
			entity: name.to_string(),
			association: association.to_string(),
		})
	}

	/// Entities in registration order.
	pub fn entities(&self) -> &[EntityDefinition] {
		&self.entities
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// Checks that every association target is registered.
	pub fn validate(&self) -> Result<()> {
		for entity in &self.entities {
			for association in entity.associations() {
				self.resolve(
					association.target(),
					&format!("{}.{}", entity.name(), association.name()),
				)?;
			}
		}

		Ok(())
	}
}

fn entity_from_schema(schema: &EntitySchema) -> Result<EntityDefinition> {
	let mut fields = Vec::with_capacity(schema.fields.len());

	for field in &schema.fields {
		fields.push(field_from_schema(field)?);
	}

	EntityDefinition::new(schema.name.clone(), fields)
}

fn field_from_schema(schema: &FieldSchema) -> Result<Field> {
	let field = match schema {
		FieldSchema::Scalar(schema) => {
			let mut field = scalar(&schema.name, schema.storage_name.as_deref());

			if let Some(value) = schema.ranking {
				field = field.with_ranking(SearchRanking::new(value)?);
			}

			Field::Scalar(field)
		},
		FieldSchema::Translated(schema) => {
			let mut inner = scalar(&schema.name, schema.storage_name.as_deref());

			if let Some(value) = schema.inner_ranking {
				inner = inner.with_ranking(SearchRanking::new(value)?);
			}

			let mut field = TranslatedField::new(inner);

			if let Some(value) = schema.ranking {
				field = field.with_ranking(SearchRanking::new(value)?);
			}

			Field::Translated(field)
		},
		FieldSchema::Association(schema) => {
			let mut field =
				AssociationField::new(&schema.name, schema.relation.into(), &schema.target);

			if let Some(storage_name) = schema.storage_name.as_deref() {
				field = field.with_storage_name(storage_name);
			}
			if let Some(value) = schema.ranking {
				field = field.with_ranking(SearchRanking::new(value)?);
			}

			Field::Association(field)
		},
	};

	Ok(field)
}

fn scalar(name: &str, storage_name: Option<&str>) -> ScalarField {
	let field = ScalarField::new(name);

	match storage_name {
		Some(storage_name) => field.with_storage_name(storage_name),
		None => field,
	}
}
