//! Maps weighted search terms and entity field metadata to ordered, scored query clauses.
//!
//! ```text
//! SearchPattern + EntityDefinition ──▶ ScoreQueryBuilder ──▶ Vec<ScoreQuery>
//!                      ▲
//!               EntityRegistry (association targets)
//! ```
//!
//! Execution of the clauses and aggregation of their scores belong to the caller.

mod builder;
mod error;
mod query;

pub use builder::{
	DEFAULT_TRANSLATED_RANKING, FUZZY_WEIGHT_FACTOR, ScoreQueryBuilder, build_score_queries,
};
pub use error::{Error, Result};
pub use query::{QueryClause, ScoreQuery};
