//! Error types for route patterns and route table construction.

use thiserror::Error;

/// Errors raised while parsing a route pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// Patterns are absolute paths.
	#[error("pattern must start with '/'")]
	MissingLeadingSlash,

	/// Pattern string exceeds [`MAX_PATTERN_LENGTH`](crate::pattern::MAX_PATTERN_LENGTH).
	#[error("pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Actual length in bytes.
		length: usize,
		/// Allowed length in bytes.
		max: usize,
	},

	/// Pattern has more segments than [`MAX_PATTERN_SEGMENTS`](crate::pattern::MAX_PATTERN_SEGMENTS).
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual number of segments.
		count: usize,
		/// Allowed number of segments.
		max: usize,
	},

	/// A `{` without its closing `}`.
	#[error("unterminated parameter token in segment '{0}'")]
	UnterminatedParameter(String),

	/// A parameter token mixed with literal text inside one segment (e.g. `user-{id}`).
	#[error("parameter token must span the whole segment: '{0}'")]
	EmbeddedToken(String),

	/// `{}` or a bare `:`.
	#[error("empty parameter name in segment '{0}'")]
	EmptyParameterName(String),

	/// Parameter names are `[A-Za-z_][A-Za-z0-9_]*`.
	#[error("invalid parameter name '{0}'")]
	InvalidParameterName(String),

	/// `{name:...}` with anything other than `*`.
	#[error("unsupported parameter modifier '{modifier}' in segment '{segment}'")]
	UnknownModifier {
		/// The offending segment.
		segment: String,
		/// The modifier after `:`.
		modifier: String,
	},

	/// The same parameter name bound twice in one pattern.
	#[error("parameter '{0}' appears more than once")]
	DuplicateParameter(String),

	/// Wildcards only make sense as the trailing segment.
	#[error("wildcard segment '{0}' must be the last segment")]
	WildcardNotLast(String),

	/// `?` and `#` belong to the query and fragment, never to a pattern.
	#[error("reserved character in literal segment '{0}'")]
	ReservedCharacter(String),
}

/// Errors that make a route table unusable.
///
/// These are fatal at startup: a table that fails to register never reaches
/// a router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
	/// No definitions were supplied.
	#[error("route table must contain at least one route")]
	EmptyTable,

	/// A definition without a name cannot be navigated to.
	#[error("route with pattern '{pattern}' has an empty name")]
	EmptyName {
		/// Pattern of the unnamed definition.
		pattern: String,
	},

	/// Two definitions share the same name.
	#[error("duplicate route name '{0}'")]
	DuplicateName(String),

	/// A definition's path failed to parse.
	#[error("malformed pattern '{pattern}' for route '{name}': {source}")]
	MalformedPattern {
		/// Route name.
		name: String,
		/// Raw pattern string.
		pattern: String,
		/// Parse failure.
		source: PatternError,
	},
}

/// Errors raised when building a concrete path from a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
	/// A `{name}` segment had no (or an empty) value.
	#[error("missing parameter '{0}'")]
	MissingParameter(String),
}

/// Errors raised by typed parameter extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
	/// The parameter was not bound by the match.
	#[error("parameter '{0}' is not bound")]
	Missing(String),

	/// The bound value failed to parse into the requested type.
	#[error("failed to parse parameter '{name}' value '{raw_value}' as {type_name}: {message}")]
	Parse {
		/// Parameter name.
		name: String,
		/// Target type name.
		type_name: &'static str,
		/// Raw decoded value.
		raw_value: String,
		/// Error message from `FromStr`.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_malformed_pattern_display_includes_cause() {
		let err = ConfigurationError::MalformedPattern {
			name: "user".to_string(),
			pattern: "/users/{id".to_string(),
			source: PatternError::UnterminatedParameter("{id".to_string()),
		};

		let message = err.to_string();
		assert!(message.contains("'/users/{id'"));
		assert!(message.contains("route 'user'"));
		assert!(message.contains("unterminated parameter token"));
	}

	#[rstest]
	fn test_param_error_display() {
		let err = ParamError::Parse {
			name: "id".to_string(),
			type_name: "u32",
			raw_value: "abc".to_string(),
			message: "invalid digit found in string".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"failed to parse parameter 'id' value 'abc' as u32: invalid digit found in string"
		);
	}

	#[rstest]
	fn test_errors_are_send_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<PatternError>();
		assert_send_sync::<ConfigurationError>();
		assert_send_sync::<ReverseError>();
		assert_send_sync::<ParamError>();
	}
}
