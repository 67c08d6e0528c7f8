//! Path parameters bound by a successful match.

use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::ParamError;

/// Parameters extracted from a path, in the order they appear in the pattern.
///
/// Values are percent-decoded. Named wildcards bind the remaining suffix with
/// segments joined by `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(IndexMap<String, String>);

impl PathParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `name` to `value`, returning the previous value if any.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.0.insert(name.into(), value.into())
	}

	/// Returns the value bound to `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	/// Returns whether `name` is bound.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Returns the number of bound parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether no parameters are bound.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates `(name, value)` pairs in pattern order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Parses the value bound to `name` into `T`.
	///
	/// # Errors
	///
	/// Returns [`ParamError::Missing`] if `name` is not bound and
	/// [`ParamError::Parse`] if the value does not parse.
	///
	/// # Example
	///
	/// ```
	/// use waypoint_urls::PathParams;
	///
	/// let params = PathParams::from([("id", "42")]);
	/// assert_eq!(params.parse::<u64>("id").unwrap(), 42);
	/// assert!(params.parse::<u64>("page").is_err());
	/// ```
	pub fn parse<T>(&self, name: &str) -> Result<T, ParamError>
	where
		T: FromStr,
		T::Err: Display,
	{
		let raw = self
			.get(name)
			.ok_or_else(|| ParamError::Missing(name.to_string()))?;

		raw.parse::<T>().map_err(|e| ParamError::Parse {
			name: name.to_string(),
			type_name: std::any::type_name::<T>(),
			raw_value: raw.to_string(),
			message: e.to_string(),
		})
	}
}

impl<K, V> FromIterator<(K, V)> for PathParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for PathParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

impl IntoIterator for PathParams {
	type Item = (String, String);
	type IntoIter = indexmap::map::IntoIter<String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_iteration_preserves_insertion_order() {
		let params = PathParams::from([("user_id", "7"), ("post_id", "99"), ("a", "b")]);

		let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
		assert_eq!(names, vec!["user_id", "post_id", "a"]);
	}

	#[rstest]
	#[case("42", Ok(42))]
	#[case("-1", Err(()))]
	#[case("abc", Err(()))]
	fn test_parse_u32(#[case] raw: &str, #[case] expected: Result<u32, ()>) {
		let params = PathParams::from([("id", raw)]);
		assert_eq!(params.parse::<u32>("id").map_err(|_| ()), expected);
	}

	#[rstest]
	fn test_parse_failure_keeps_message() {
		let params = PathParams::from([("id", "abc")]);

		let err = params.parse::<u32>("id").unwrap_err();

		assert!(matches!(
			&err,
			ParamError::Parse { name, raw_value, message, .. }
				if name == "id" && raw_value == "abc" && message == "invalid digit found in string"
		));
		assert!(std::error::Error::source(&err).is_none());
	}

	#[rstest]
	fn test_parse_missing() {
		let params = PathParams::new();
		assert_eq!(
			params.parse::<String>("slug"),
			Err(ParamError::Missing("slug".to_string()))
		);
	}

	#[rstest]
	fn test_insert_replaces() {
		let mut params = PathParams::new();
		assert_eq!(params.insert("id", "1"), None);
		assert_eq!(params.insert("id", "2"), Some("1".to_string()));
		assert_eq!(params.get("id"), Some("2"));
		assert_eq!(params.len(), 1);
	}
}
