use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub entities: Vec<EntitySchema>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EntitySchema {
	pub name: String,
	/// Declaration order is preserved and drives the order of emitted score queries.
	#[serde(default)]
	pub fields: Vec<FieldSchema>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSchema {
	Scalar(ScalarFieldSchema),
	Translated(TranslatedFieldSchema),
	Association(AssociationFieldSchema),
}
impl FieldSchema {
	pub fn name(&self) -> &str {
		match self {
			Self::Scalar(field) => &field.name,
			Self::Translated(field) => &field.name,
			Self::Association(field) => &field.name,
		}
	}

	/// Every ranking declared on the field, labelled with its config key.
	pub fn rankings(&self) -> Vec<(&'static str, f64)> {
		let mut out = Vec::new();

		match self {
			Self::Scalar(field) => {
				out.extend(field.ranking.map(|value| ("ranking", value)));
			},
			Self::Translated(field) => {
				out.extend(field.ranking.map(|value| ("ranking", value)));
				out.extend(field.inner_ranking.map(|value| ("inner_ranking", value)));
			},
			Self::Association(field) => {
				out.extend(field.ranking.map(|value| ("ranking", value)));
			},
		}

		out
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScalarFieldSchema {
	pub name: String,
	/// Optional. Defaults to `name`.
	pub storage_name: Option<String>,
	pub ranking: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TranslatedFieldSchema {
	pub name: String,
	/// Optional. Defaults to `name`.
	pub storage_name: Option<String>,
	/// Optional. Ranking placed on the translation wrapper; wins over `inner_ranking`.
	pub ranking: Option<f64>,
	/// Optional. Ranking placed on the wrapped scalar field.
	pub inner_ranking: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AssociationFieldSchema {
	pub name: String,
	/// Optional. Foreign key or mapping column; defaults to `name`.
	pub storage_name: Option<String>,
	#[serde(default)]
	pub relation: Relation,
	pub target: String,
	pub ranking: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
	#[default]
	ManyToOne,
	OneToMany,
	ManyToMany,
}
