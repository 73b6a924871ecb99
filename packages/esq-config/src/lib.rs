mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	AssociationFieldSchema, Config, EntitySchema, FieldSchema, Relation, ScalarFieldSchema,
	Service, TranslatedFieldSchema,
};

use std::{collections::HashSet, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.entities.is_empty() {
		return Err(Error::Validation {
			message: "entities must declare at least one entity.".to_string(),
		});
	}

	let mut entity_names = HashSet::new();

	for entity in &cfg.entities {
		if entity.name.trim().is_empty() {
			return Err(Error::Validation {
				message: "entities.name must be non-empty.".to_string(),
			});
		}
		if !entity_names.insert(entity.name.as_str()) {
			return Err(Error::Validation {
				message: format!("Entity {} is declared more than once.", entity.name),
			});
		}
	}

	for entity in &cfg.entities {
		validate_fields(entity, &entity_names)?;
	}

	Ok(())
}

fn validate_fields(entity: &EntitySchema, entity_names: &HashSet<&str>) -> Result<()> {
	let mut field_names = HashSet::new();

	for field in &entity.fields {
		let name = field.name();

		if name.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("{}.fields.name must be non-empty.", entity.name),
			});
		}
		if !field_names.insert(name) {
			return Err(Error::Validation {
				message: format!("Field {}.{name} is declared more than once.", entity.name),
			});
		}

		for (key, value) in field.rankings() {
			if !value.is_finite() {
				return Err(Error::Validation {
					message: format!("{}.{name}.{key} must be a finite number.", entity.name),
				});
			}
			if value <= 0.0 {
				return Err(Error::Validation {
					message: format!("{}.{name}.{key} must be greater than zero.", entity.name),
				});
			}
		}

		if let FieldSchema::Association(association) = field {
			if association.target.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("{}.{name}.target must be non-empty.", entity.name),
				});
			}
			if !entity_names.contains(association.target.as_str()) {
				return Err(Error::Validation {
					message: format!(
						"{}.{name}.target references unknown entity {}.",
						entity.name, association.target
					),
				});
			}
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for entity in &mut cfg.entities {
		entity.name = entity.name.trim().to_string();

		for field in &mut entity.fields {
			match field {
				FieldSchema::Scalar(field) => {
					normalize_names(&mut field.name, &mut field.storage_name);
				},
				FieldSchema::Translated(field) => {
					normalize_names(&mut field.name, &mut field.storage_name);
				},
				FieldSchema::Association(field) => {
					normalize_names(&mut field.name, &mut field.storage_name);

					field.target = field.target.trim().to_string();
				},
			}
		}
	}
}

fn normalize_names(name: &mut String, storage_name: &mut Option<String>) {
	*name = name.trim().to_string();

	if storage_name.as_deref().map(|value| value.trim().is_empty()).unwrap_or(false) {
		*storage_name = None;
	}
	if let Some(value) = storage_name.as_mut() {
		*value = value.trim().to_string();
	}
}
