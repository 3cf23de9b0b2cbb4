//! Path pattern compilation and matching.
//!
//! Patterns are absolute paths whose segments are either literals, dynamic
//! `:name` segments capturing exactly one non-empty path segment, or a
//! trailing `*name` wildcard capturing the rest of the path:
//!
//! - `/` — exact match
//! - `/device/:id` — single dynamic segment
//! - `/docs/*path` — rest-of-path capture (must be the last segment)
//!
//! A single trailing slash on the concrete path is tolerated, so `/about/`
//! matches the pattern `/about`.

use std::collections::HashMap;

use crate::error::{PatternError, RouterError};
use crate::params::RouteParams;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for the compiled regex in bytes.
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A compiled path pattern.
///
/// Compilation happens once at route registration; matching a concrete path
/// is a single anchored regex evaluation with named capture groups.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex.
	regex: regex::Regex,
	/// Parameter names in the order they appear in the pattern.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern is relative, exceeds the
	/// length or segment limits, names a parameter badly (empty, repeated,
	/// or not an identifier), places a `*name` wildcard before the end, or
	/// fails regex compilation.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				len: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let rest = pattern
			.strip_prefix('/')
			.ok_or_else(|| PatternError::NotAbsolute(pattern.to_string()))?;

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let (regex_str, param_names) = Self::compile(pattern, rest)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex {
				pattern: pattern.to_string(),
				message: e.to_string(),
			})?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Compiles the pattern body into a regex string and parameter names.
	///
	/// `rest` is the pattern with its leading `/` removed. A trailing slash
	/// in the pattern itself is ignored, so `/about/` compiles identically
	/// to `/about`.
	fn compile(pattern: &str, rest: &str) -> Result<(String, Vec<String>), PatternError> {
		let mut regex_str = String::from("^");
		let mut param_names: Vec<String> = Vec::new();

		let rest = rest.strip_suffix('/').unwrap_or(rest);

		if rest.is_empty() {
			regex_str.push('/');
		} else {
			let segments: Vec<&str> = rest.split('/').collect();
			let last = segments.len() - 1;

			for (index, segment) in segments.iter().enumerate() {
				regex_str.push('/');

				if let Some(name) = segment.strip_prefix(':') {
					Self::check_param_name(pattern, name, &param_names)?;
					// One non-empty segment, no path separators
					regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
					param_names.push(name.to_string());
				} else if let Some(name) = segment.strip_prefix('*') {
					Self::check_param_name(pattern, name, &param_names)?;
					if index != last {
						return Err(PatternError::WildcardNotLast {
							pattern: pattern.to_string(),
							name: name.to_string(),
						});
					}
					// Lazy so the trailing-slash tolerance consumes the
					// final '/' instead of the capture
					regex_str.push_str(&format!("(?P<{}>.+?)", name));
					param_names.push(name.to_string());
				} else {
					regex_str.push_str(&regex::escape(segment));
				}
			}
		}

		regex_str.push_str("/?$");
		Ok((regex_str, param_names))
	}

	/// Validates a parameter name: a non-empty identifier, unique within
	/// the pattern.
	fn check_param_name(
		pattern: &str,
		name: &str,
		seen: &[String],
	) -> Result<(), PatternError> {
		let mut chars = name.chars();
		let valid = match chars.next() {
			Some(first) => {
				(first.is_ascii_alphabetic() || first == '_')
					&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
			}
			None => false,
		};
		if !valid {
			return Err(PatternError::InvalidParamName {
				pattern: pattern.to_string(),
				name: name.to_string(),
			});
		}
		if seen.iter().any(|s| s == name) {
			return Err(PatternError::DuplicateParamName {
				pattern: pattern.to_string(),
				name: name.to_string(),
			});
		}
		Ok(())
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether this pattern has no dynamic segments.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Attempts to match a concrete path against this pattern.
	///
	/// Returns the captured parameters on a match. Captured values are raw
	/// path segments: no type coercion or validation is applied.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		self.regex.captures(path).map(|caps| {
			let mut params = RouteParams::new();
			for name in &self.param_names {
				if let Some(m) = caps.name(name) {
					params.insert(name.clone(), m.as_str().to_string());
				}
			}
			params
		})
	}

	/// Checks whether this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Generates a concrete path from this pattern and the given parameters.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MissingParameter`] if a dynamic segment has no
	/// value in `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, RouterError> {
		let rest = self.pattern[1..].strip_suffix('/').unwrap_or(&self.pattern[1..]);

		if rest.is_empty() {
			return Ok("/".to_string());
		}

		let mut out = String::new();
		for segment in rest.split('/') {
			out.push('/');
			if let Some(name) = segment
				.strip_prefix(':')
				.or_else(|| segment.strip_prefix('*'))
			{
				let value =
					params
						.get(name)
						.ok_or_else(|| RouterError::MissingParameter {
							pattern: self.pattern.clone(),
							name: name.to_string(),
						})?;
				out.push_str(value);
			} else {
				out.push_str(segment);
			}
		}
		Ok(out)
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_root_pattern() {
		let pattern = PathPattern::new("/").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.is_match("/"));
		assert!(!pattern.is_match("/about"));
	}

	#[test]
	fn test_exact_pattern() {
		let pattern = PathPattern::new("/about").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.is_match("/about"));
		assert!(pattern.is_match("/about/"));
		assert!(!pattern.is_match("/about/team"));
	}

	#[test]
	fn test_single_dynamic_segment() {
		let pattern = PathPattern::new("/device/:id").unwrap();
		assert!(!pattern.is_exact());
		assert_eq!(pattern.param_names(), &["id"]);

		let params = pattern.matches("/device/42").unwrap();
		assert_eq!(params.get("id"), Some("42"));

		// No coercion: non-numeric values pass through
		let params = pattern.matches("/device/abc").unwrap();
		assert_eq!(params.get("id"), Some("abc"));

		assert!(pattern.matches("/device/").is_none());
		assert!(pattern.matches("/device/1/extra").is_none());
	}

	#[test]
	fn test_multiple_dynamic_segments() {
		let pattern = PathPattern::new("/fleet/:fleet_id/device/:id").unwrap();
		let params = pattern.matches("/fleet/7/device/42").unwrap();
		assert_eq!(params.get("fleet_id"), Some("7"));
		assert_eq!(params.get("id"), Some("42"));
		assert_eq!(params.values(), &["7", "42"]);
	}

	#[test]
	fn test_wildcard_segment() {
		let pattern = PathPattern::new("/docs/*path").unwrap();
		let params = pattern.matches("/docs/guide/setup/linux").unwrap();
		assert_eq!(params.get("path"), Some("guide/setup/linux"));
	}

	#[test]
	fn test_wildcard_capture_excludes_trailing_slash() {
		let pattern = PathPattern::new("/docs/*path").unwrap();
		let params = pattern.matches("/docs/guide/setup/").unwrap();
		assert_eq!(params.get("path"), Some("guide/setup"));
	}

	#[test]
	fn test_wildcard_must_be_last() {
		let err = PathPattern::new("/docs/*path/raw").unwrap_err();
		assert!(matches!(err, PatternError::WildcardNotLast { .. }));
	}

	#[test]
	fn test_literal_special_chars_escaped() {
		let pattern = PathPattern::new("/api/v1.0").unwrap();
		assert!(pattern.is_match("/api/v1.0"));
		assert!(!pattern.is_match("/api/v1X0"));
	}

	#[test]
	fn test_rejects_relative_pattern() {
		let err = PathPattern::new("about").unwrap_err();
		assert_eq!(err, PatternError::NotAbsolute("about".to_string()));
	}

	#[test]
	fn test_rejects_excessive_length() {
		let long = "/".to_string() + &"a".repeat(1025);
		let err = PathPattern::new(&long).unwrap_err();
		assert!(matches!(err, PatternError::TooLong { .. }));
	}

	#[test]
	fn test_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let deep = format!("/{}", segments.join("/"));
		let err = PathPattern::new(&deep).unwrap_err();
		assert!(matches!(err, PatternError::TooManySegments { .. }));
	}

	#[test]
	fn test_rejects_bad_param_name() {
		assert!(matches!(
			PathPattern::new("/device/:").unwrap_err(),
			PatternError::InvalidParamName { .. }
		));
		assert!(matches!(
			PathPattern::new("/device/:1d").unwrap_err(),
			PatternError::InvalidParamName { .. }
		));
	}

	#[test]
	fn test_rejects_duplicate_param_name() {
		let err = PathPattern::new("/a/:id/b/:id").unwrap_err();
		assert!(matches!(err, PatternError::DuplicateParamName { .. }));
	}

	#[test]
	fn test_reverse() {
		let pattern = PathPattern::new("/device/:id").unwrap();
		let mut params = HashMap::new();
		params.insert("id".to_string(), "42".to_string());
		assert_eq!(pattern.reverse(&params).unwrap(), "/device/42");
	}

	#[test]
	fn test_reverse_root() {
		let pattern = PathPattern::new("/").unwrap();
		assert_eq!(pattern.reverse(&HashMap::new()).unwrap(), "/");
	}

	#[test]
	fn test_reverse_missing_param() {
		let pattern = PathPattern::new("/device/:id").unwrap();
		let err = pattern.reverse(&HashMap::new()).unwrap_err();
		assert!(matches!(err, RouterError::MissingParameter { .. }));
	}

	#[test]
	fn test_display_and_equality() {
		let p1 = PathPattern::new("/device/:id").unwrap();
		let p2 = PathPattern::new("/device/:id").unwrap();
		let p3 = PathPattern::new("/device/:serial").unwrap();

		assert_eq!(format!("{}", p1), "/device/:id");
		assert_eq!(p1, p2);
		assert_ne!(p1, p3);
	}
}
