pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Path prefix must be non-empty, got {prefix:?}.")]
	InvalidPathPrefix { prefix: String },
	#[error("Entity {entity} is not registered.")]
	UnknownEntity { entity: String },
	#[error("Weight {weight} for {field_path} is not a positive finite number.")]
	WeightOutOfRange { field_path: String, weight: f64 },
	#[error(transparent)]
	Domain(#[from] esq_domain::Error),
}
