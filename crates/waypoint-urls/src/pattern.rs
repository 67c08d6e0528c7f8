//! Path pattern parsing and matching.
//!
//! Patterns are compiled into a list of [`Segment`]s once, at registration
//! time. Matching walks the request path segment by segment; there is no
//! regex involved, so matching is linear in the number of segments.
//!
//! # Pattern Syntax
//!
//! - `/users/` - literal segments, matched exactly
//! - `/users/{id}/` or `/users/:id` - a parameter binding one non-empty segment
//! - `/static/{path:*}`, `/static/*path` or `/static/*` - a trailing wildcard
//!   matching any remaining suffix (possibly empty)
//!
//! Empty segments are ignored on both sides, so `/chart`, `/chart/` and
//! `//chart` are the same path.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use crate::error::{PatternError, ReverseError};
use crate::params::PathParams;

/// Maximum allowed length for a pattern string in bytes.
pub const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of segments in a pattern.
pub const MAX_PATTERN_SEGMENTS: usize = 32;

/// One compiled segment of a [`RoutePattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Matches one request segment equal to this text.
	Literal(String),
	/// Matches any one non-empty request segment and binds it.
	Param(String),
	/// Matches the rest of the request path; binds it when named.
	Wildcard(Option<String>),
}

impl Segment {
	/// Returns the parameter name this segment binds, if any.
	pub fn param_name(&self) -> Option<&str> {
		match self {
			Self::Literal(_) => None,
			Self::Param(name) => Some(name),
			Self::Wildcard(name) => name.as_deref(),
		}
	}
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled segments in order.
	segments: Vec<Segment>,
	/// Whether the original pattern ended in `/` (kept when reversing).
	trailing_slash: bool,
}

impl RoutePattern {
	/// Parses a pattern string.
	///
	/// # Errors
	///
	/// Returns a [`PatternError`] describing the first problem found: a
	/// missing leading `/`, an unterminated or embedded parameter token, an
	/// invalid or duplicate parameter name, a wildcard that is not the last
	/// segment, or a pattern exceeding the length/segment limits.
	///
	/// # Example
	///
	/// ```
	/// use waypoint_urls::RoutePattern;
	///
	/// let pattern = RoutePattern::parse("/users/{id}/").unwrap();
	/// let params = pattern.matches("/users/42").unwrap();
	/// assert_eq!(params.get("id"), Some("42"));
	///
	/// assert!(RoutePattern::parse("/users/{id").is_err());
	/// ```
	pub fn parse(pattern: &str) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		if !pattern.starts_with('/') {
			return Err(PatternError::MissingLeadingSlash);
		}

		let raw_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
		if raw_segments.len() > MAX_PATTERN_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: raw_segments.len(),
				max: MAX_PATTERN_SEGMENTS,
			});
		}

		let mut segments = Vec::with_capacity(raw_segments.len());
		let mut seen = HashSet::new();

		for (index, raw) in raw_segments.iter().enumerate() {
			let segment = parse_segment(raw)?;

			if matches!(segment, Segment::Wildcard(_)) && index + 1 != raw_segments.len() {
				return Err(PatternError::WildcardNotLast((*raw).to_string()));
			}

			if let Some(name) = segment.param_name()
				&& !seen.insert(name.to_string())
			{
				return Err(PatternError::DuplicateParameter(name.to_string()));
			}

			segments.push(segment);
		}

		Ok(Self {
			pattern: pattern.to_string(),
			trailing_slash: !segments.is_empty() && pattern.ends_with('/'),
			segments,
		})
	}

	/// Returns the original pattern string.
	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	/// Returns the compiled segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Returns the names of all bound parameters, in pattern order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(Segment::param_name)
	}

	/// Returns whether this pattern has no parameters or wildcards.
	pub fn is_exact(&self) -> bool {
		self.segments
			.iter()
			.all(|s| matches!(s, Segment::Literal(_)))
	}

	/// Matches a request path (without query or fragment) against this pattern.
	///
	/// Returns the bound parameters on success.
	pub fn matches(&self, path: &str) -> Option<PathParams> {
		let mut params = PathParams::new();
		let mut request = path.split('/').filter(|s| !s.is_empty());

		for segment in &self.segments {
			match segment {
				Segment::Literal(literal) => {
					let actual = request.next()?;
					if decode_segment(actual) != literal.as_str() {
						return None;
					}
				}
				Segment::Param(name) => {
					let actual = request.next()?;
					params.insert(name.clone(), decode_segment(actual).into_owned());
				}
				Segment::Wildcard(name) => {
					let rest: Vec<Cow<'_, str>> = request.by_ref().map(decode_segment).collect();
					if let Some(name) = name {
						params.insert(name.clone(), rest.join("/"));
					}
					return Some(params);
				}
			}
		}

		// Every request segment must be consumed
		if request.next().is_some() {
			return None;
		}

		Some(params)
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.matches(path).is_some()
	}

	/// Builds a concrete path by substituting `params` into this pattern.
	///
	/// Parameter values are percent-encoded. A named wildcard is optional and
	/// expands to the empty suffix when absent.
	///
	/// # Errors
	///
	/// Returns [`ReverseError::MissingParameter`] if a `{name}` segment has no
	/// value or an empty one.
	pub fn reverse(&self, params: &PathParams) -> Result<String, ReverseError> {
		let mut path = String::new();

		for segment in &self.segments {
			match segment {
				Segment::Literal(literal) => {
					path.push('/');
					path.push_str(literal);
				}
				Segment::Param(name) => {
					let value = params
						.get(name)
						.filter(|v| !v.is_empty())
						.ok_or_else(|| ReverseError::MissingParameter(name.clone()))?;
					path.push('/');
					path.push_str(&urlencoding::encode(value));
				}
				Segment::Wildcard(name) => {
					let suffix = name.as_deref().and_then(|n| params.get(n)).unwrap_or("");
					for part in suffix.split('/').filter(|p| !p.is_empty()) {
						path.push('/');
						path.push_str(&urlencoding::encode(part));
					}
				}
			}
		}

		if path.is_empty() || self.trailing_slash {
			path.push('/');
		}

		Ok(path)
	}

	/// Returns whether every path matched by `other` is also matched by `self`.
	///
	/// When `self` is registered before `other`, `other` can never win a match.
	pub fn shadows(&self, other: &RoutePattern) -> bool {
		let mut theirs = other.segments.iter();

		for ours in &self.segments {
			match ours {
				Segment::Wildcard(_) => return true,
				Segment::Param(_) => match theirs.next() {
					Some(Segment::Literal(_) | Segment::Param(_)) => {}
					_ => return false,
				},
				Segment::Literal(literal) => match theirs.next() {
					Some(Segment::Literal(l)) if l == literal => {}
					_ => return false,
				},
			}
		}

		theirs.next().is_none()
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

fn parse_segment(raw: &str) -> Result<Segment, PatternError> {
	if let Some(body) = raw.strip_prefix('{') {
		let Some(inner) = body.strip_suffix('}') else {
			return Err(if body.contains('}') {
				PatternError::EmbeddedToken(raw.to_string())
			} else {
				PatternError::UnterminatedParameter(raw.to_string())
			});
		};

		if inner.contains(['{', '}']) {
			return Err(PatternError::EmbeddedToken(raw.to_string()));
		}

		return match inner.split_once(':') {
			None => validate_name(inner, raw).map(|n| Segment::Param(n.to_string())),
			Some((name, "*")) => {
				validate_name(name, raw).map(|n| Segment::Wildcard(Some(n.to_string())))
			}
			Some((_, modifier)) => Err(PatternError::UnknownModifier {
				segment: raw.to_string(),
				modifier: modifier.to_string(),
			}),
		};
	}

	if let Some(name) = raw.strip_prefix(':') {
		return validate_name(name, raw).map(|n| Segment::Param(n.to_string()));
	}

	if let Some(name) = raw.strip_prefix('*') {
		if name.is_empty() {
			return Ok(Segment::Wildcard(None));
		}
		return validate_name(name, raw).map(|n| Segment::Wildcard(Some(n.to_string())));
	}

	if let Some(open) = raw.find('{') {
		return Err(if raw[open..].contains('}') {
			PatternError::EmbeddedToken(raw.to_string())
		} else {
			PatternError::UnterminatedParameter(raw.to_string())
		});
	}

	if raw.contains('}') {
		return Err(PatternError::EmbeddedToken(raw.to_string()));
	}

	if raw.contains(['?', '#']) {
		return Err(PatternError::ReservedCharacter(raw.to_string()));
	}

	Ok(Segment::Literal(raw.to_string()))
}

fn validate_name<'a>(name: &'a str, segment: &str) -> Result<&'a str, PatternError> {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return Err(PatternError::EmptyParameterName(segment.to_string()));
	};

	if !(first.is_ascii_alphabetic() || first == '_')
		|| !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
	{
		return Err(PatternError::InvalidParameterName(name.to_string()));
	}

	Ok(name)
}

fn decode_segment(raw: &str) -> Cow<'_, str> {
	urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
