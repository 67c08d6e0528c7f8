//! Property-based tests for route patterns
//!
//! Uses proptest to verify properties that should hold for all valid inputs.

use proptest::prelude::*;
use proptest::proptest;
use waypoint_urls::{PathParams, RoutePattern};

proptest! {
	/// Property: a location built from a pattern matches it and binds the same values
	#[test]
	fn prop_reverse_then_match_returns_params(
		user_id in r"[^/]{1,20}",
		post_id in r"[a-zA-Z0-9 %?#&=._\-]{1,20}",
	) {
		let pattern = RoutePattern::parse("/users/{user_id}/posts/{post_id}/").unwrap();
		let params = PathParams::from([("user_id", user_id.as_str()), ("post_id", post_id.as_str())]);

		let path = pattern.reverse(&params).unwrap();
		let matched = pattern.matches(&path);

		prop_assert_eq!(matched, Some(params));
	}

	/// Property: trailing and repeated slashes never change the match outcome
	#[test]
	fn prop_empty_segments_are_insignificant(
		segment in r"[a-z0-9]{1,12}",
		trailing in proptest::bool::ANY,
	) {
		let pattern = RoutePattern::parse("/items/{id}").unwrap();
		let path = format!("//items//{}{}", segment, if trailing { "/" } else { "" });

		prop_assert_eq!(pattern.matches(&path).and_then(|p| p.get("id").map(str::to_string)), Some(segment));
	}

	/// Property: an exact pattern matches only its own path
	#[test]
	fn prop_exact_pattern_rejects_other_literals(other in r"[a-z]{1,12}") {
		prop_assume!(other != "chart");
		let pattern = RoutePattern::parse("/chart").unwrap();

		let other_path = format!("/{}", other);
		prop_assert!(!pattern.is_match(&other_path));
	}
}
