//! Error types for route registration, resolution, and view loading.

use thiserror::Error;

/// Error raised while compiling a path pattern.
///
/// Patterns are compiled once at registration time, so these errors surface
/// during application startup rather than per navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// The pattern does not start with `/`.
	#[error("pattern '{0}' must start with '/'")]
	NotAbsolute(String),
	/// The pattern exceeds the maximum allowed length.
	#[error("pattern length {len} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Actual pattern length in bytes.
		len: usize,
		/// Maximum allowed length in bytes.
		max: usize,
	},
	/// The pattern has too many path segments.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual segment count.
		count: usize,
		/// Maximum allowed segment count.
		max: usize,
	},
	/// A dynamic segment carries an empty or non-identifier name.
	#[error("invalid parameter name '{name}' in pattern '{pattern}'")]
	InvalidParamName {
		/// The offending pattern.
		pattern: String,
		/// The offending parameter name.
		name: String,
	},
	/// The same parameter name appears twice in one pattern.
	#[error("duplicate parameter name '{name}' in pattern '{pattern}'")]
	DuplicateParamName {
		/// The offending pattern.
		pattern: String,
		/// The repeated parameter name.
		name: String,
	},
	/// A `*rest` wildcard segment is followed by further segments.
	#[error("wildcard segment '*{name}' must be the last segment of pattern '{pattern}'")]
	WildcardNotLast {
		/// The offending pattern.
		pattern: String,
		/// The wildcard parameter name.
		name: String,
	},
	/// The compiled regex was rejected.
	#[error("failed to compile pattern '{pattern}': {message}")]
	Regex {
		/// The offending pattern.
		pattern: String,
		/// Message from the regex engine.
		message: String,
	},
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// No registered route matches the given path.
	#[error("no route matches path: {0}")]
	NoMatch(String),
	/// A route with the same name is already registered.
	#[error("duplicate route name: {0}")]
	DuplicateName(String),
	/// No route is registered under the given name.
	#[error("unknown route name: {0}")]
	UnknownName(String),
	/// Reverse URL generation is missing a required parameter.
	#[error("missing parameter '{name}' for pattern '{pattern}'")]
	MissingParameter {
		/// The pattern being reversed.
		pattern: String,
		/// The parameter that was not supplied.
		name: String,
	},
	/// A captured parameter value failed typed parsing.
	#[error("failed to parse parameter '{name}' value '{value}' as {expected}")]
	ParamParse {
		/// The parameter name.
		name: String,
		/// The raw captured value.
		value: String,
		/// The requested target type.
		expected: &'static str,
	},
	/// Loading a lazy view's code failed.
	///
	/// Failures are never cached: the next navigation retries the load.
	#[error("view load failed: {0}")]
	LoadFailed(String),
	/// Pattern compilation failed during fallible registration.
	#[error(transparent)]
	Pattern(#[from] PatternError),
}
