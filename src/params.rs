//! Captured route parameters.
//!
//! Holds both the name→value map and the values in pattern order, so callers
//! can look parameters up by name or consume them positionally. Values are
//! raw path segments; [`RouteParams::parse`] is available when a typed value
//! is wanted.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// Parameters captured from a concrete path by a matching pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
	/// Named parameters.
	named: HashMap<String, String>,
	/// Values in the order they appear in the pattern.
	ordered: Vec<String>,
}

impl RouteParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a captured parameter.
	///
	/// Insertion order must follow pattern order; [`PathPattern::matches`]
	/// guarantees this.
	///
	/// [`PathPattern::matches`]: crate::pattern::PathPattern::matches
	pub(crate) fn insert(&mut self, name: String, value: String) {
		self.ordered.push(value.clone());
		self.named.insert(name, value);
	}

	/// Returns the raw value of a named parameter.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.named.get(name).map(String::as_str)
	}

	/// Parses a named parameter into `T`.
	///
	/// # Errors
	///
	/// Returns [`RouterError::ParamParse`] if the parameter is absent or its
	/// value does not parse as `T`.
	pub fn parse<T>(&self, name: &str) -> Result<T, RouterError>
	where
		T: FromStr,
	{
		let raw = self.get(name).ok_or_else(|| RouterError::ParamParse {
			name: name.to_string(),
			value: String::new(),
			expected: std::any::type_name::<T>(),
		})?;
		raw.parse::<T>().map_err(|_| RouterError::ParamParse {
			name: name.to_string(),
			value: raw.to_string(),
			expected: std::any::type_name::<T>(),
		})
	}

	/// Returns the values in pattern order.
	pub fn values(&self) -> &[String] {
		&self.ordered
	}

	/// Returns the first value in pattern order.
	pub fn first(&self) -> Option<&str> {
		self.ordered.first().map(String::as_str)
	}

	/// Returns the number of captured parameters.
	pub fn len(&self) -> usize {
		self.ordered.len()
	}

	/// Returns whether no parameters were captured.
	pub fn is_empty(&self) -> bool {
		self.ordered.is_empty()
	}

	/// Iterates over `(name, value)` pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}
