pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Search ranking must be a positive finite number, got {value}.")]
	InvalidRanking { value: f64 },
	#[error("Invalid search term: {message}")]
	InvalidTerm { message: String },
	#[error("Invalid entity definition: {message}")]
	InvalidDefinition { message: String },
	#[error("Field {field} is declared more than once on entity {entity}.")]
	DuplicateField { entity: String, field: String },
	#[error("Entity {entity} is registered more than once.")]
	DuplicateEntity { entity: String },
	#[error("Association {association} references unknown entity {entity}.")]
	UnknownEntity { entity: String, association: String },
	#[error(transparent)]
	Config(#[from] esq_config::Error),
}
