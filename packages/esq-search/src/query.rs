use serde::Serialize;

/// A query fragment against one field path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryClause {
	/// Literal or token-exact match.
	Exact { field_path: String, value: String },
	/// Approximate or full-text match.
	Fuzzy { field_path: String, value: String },
}
impl QueryClause {
	pub fn exact(field_path: impl Into<String>, value: impl Into<String>) -> Self {
		Self::Exact { field_path: field_path.into(), value: value.into() }
	}

	pub fn fuzzy(field_path: impl Into<String>, value: impl Into<String>) -> Self {
		Self::Fuzzy { field_path: field_path.into(), value: value.into() }
	}

	pub fn field_path(&self) -> &str {
		match self {
			Self::Exact { field_path, .. } | Self::Fuzzy { field_path, .. } => field_path,
		}
	}

	pub fn value(&self) -> &str {
		match self {
			Self::Exact { value, .. } | Self::Fuzzy { value, .. } => value,
		}
	}

	pub fn is_exact(&self) -> bool {
		matches!(self, Self::Exact { .. })
	}
}

/// A clause together with the weight its match contributes to the relevance score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreQuery {
	pub clause: QueryClause,
	pub weight: f64,
}
impl ScoreQuery {
	pub fn new(clause: QueryClause, weight: f64) -> Self {
		Self { clause, weight }
	}

	pub fn rescaled(self, factor: f64) -> Self {
		Self { clause: self.clause, weight: self.weight * factor }
	}
}
