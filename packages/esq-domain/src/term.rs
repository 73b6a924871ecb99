use serde::Serialize;

use crate::{Error, Result};

/// One weighted unit of query text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchTerm {
	text: String,
	weight: f64,
}
impl SearchTerm {
	pub fn new(text: impl Into<String>, weight: f64) -> Result<Self> {
		let text = text.into();
		let trimmed = text.trim();

		if trimmed.is_empty() {
			return Err(Error::InvalidTerm { message: "text must be non-empty.".to_string() });
		}
		if !weight.is_finite() || weight <= 0.0 {
			return Err(Error::InvalidTerm {
				message: format!("weight for {trimmed:?} must be a positive finite number."),
			});
		}

		Ok(Self { text: trimmed.to_string(), weight })
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn weight(&self) -> f64 {
		self.weight
	}
}

/// Ordered terms of a single search request.
///
/// Order is kept exactly as inserted; it decides the order of the emitted score queries.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchPattern {
	terms: Vec<SearchTerm>,
}
impl SearchPattern {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_term(&mut self, term: SearchTerm) {
		self.terms.push(term);
	}

	pub fn with_term(mut self, term: SearchTerm) -> Self {
		self.add_term(term);

		self
	}

	pub fn terms(&self) -> &[SearchTerm] {
		&self.terms
	}

	pub fn iter(&self) -> std::slice::Iter<'_, SearchTerm> {
		self.terms.iter()
	}

	pub fn len(&self) -> usize {
		self.terms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}
}
impl From<SearchTerm> for SearchPattern {
	fn from(term: SearchTerm) -> Self {
		Self { terms: vec![term] }
	}
}
impl FromIterator<SearchTerm> for SearchPattern {
	fn from_iter<I: IntoIterator<Item = SearchTerm>>(iter: I) -> Self {
		Self { terms: iter.into_iter().collect() }
	}
}
impl<'a> IntoIterator for &'a SearchPattern {
	type IntoIter = std::slice::Iter<'a, SearchTerm>;
	type Item = &'a SearchTerm;

	fn into_iter(self) -> Self::IntoIter {
		self.terms.iter()
	}
}
