//! Integration tests for route table registration and matching
//!
//! These tests verify:
//! 1. First-match-wins resolution in registration order
//! 2. Name index lookups and name-based location building
//! 3. Rejection of invalid tables at registration

use rstest::{fixture, rstest};
use waypoint_urls::{ConfigurationError, PathParams, PatternError, RouteDefinition, RouteTable};

#[fixture]
fn blog_table() -> RouteTable {
	RouteTable::register([
		RouteDefinition::new("/", "home", "Home"),
		RouteDefinition::new("/users/", "user_list", "UserList"),
		RouteDefinition::new("/users/{user_id}/", "user_detail", "UserDetail"),
		RouteDefinition::new("/users/{user_id}/posts/{post_id}/", "user_post", "UserPost"),
		RouteDefinition::new("/files/{path:*}", "files", "FileBrowser"),
	])
	.unwrap()
}

#[rstest]
#[case("/", Some("home"))]
#[case("/users", Some("user_list"))]
#[case("/users/42", Some("user_detail"))]
#[case("/users/42/posts/7/", Some("user_post"))]
#[case("/files", Some("files"))]
#[case("/files/docs/readme.md", Some("files"))]
#[case("/users/42/posts", None)]
#[case("/posts/", None)]
fn test_match_path(
	blog_table: RouteTable,
	#[case] path: &str,
	#[case] expected: Option<&str>,
) {
	// Act
	let matched = blog_table.match_path(path);

	// Assert
	assert_eq!(matched.as_ref().map(|m| m.route.name()), expected);
}

#[rstest]
fn test_match_binds_params_in_pattern_order(blog_table: RouteTable) {
	let matched = blog_table.match_path("/users/42/posts/7/").unwrap();

	let names: Vec<&str> = matched.params.iter().map(|(k, _)| k).collect();
	assert_eq!(names, vec!["user_id", "post_id"]);
	assert_eq!(matched.params.parse::<u32>("post_id").unwrap(), 7);
}

#[rstest]
fn test_reverse_through_name_index(blog_table: RouteTable) {
	// Arrange
	let route = blog_table.get("user_post").unwrap();
	let params = PathParams::from([("user_id", "42"), ("post_id", "7")]);

	// Act
	let path = route.pattern().reverse(&params).unwrap();

	// Assert
	assert_eq!(path, "/users/42/posts/7/");
	assert_eq!(blog_table.match_path(&path).unwrap().route.name(), "user_post");
}

#[rstest]
fn test_wildcard_round_trip(blog_table: RouteTable) {
	let route = blog_table.get("files").unwrap();
	let params = PathParams::from([("path", "docs/guide intro.md")]);

	let path = route.pattern().reverse(&params).unwrap();
	let matched = blog_table.match_path(&path).unwrap();

	assert_eq!(path, "/files/docs/guide%20intro.md");
	assert_eq!(matched.params.get("path"), Some("docs/guide intro.md"));
}

/// Overlapping patterns resolve by registration order, in either order
#[rstest]
#[case::param_first(
	[("/a/:id", "item"), ("/a/special", "special")],
	"item"
)]
#[case::literal_first(
	[("/a/special", "special"), ("/a/:id", "item")],
	"special"
)]
fn test_overlap_resolves_by_registration_order(
	#[case] routes: [(&str, &str); 2],
	#[case] expected: &str,
) {
	let table = RouteTable::register(
		routes
			.iter()
			.map(|(path, name)| RouteDefinition::new(*path, *name, *name)),
	)
	.unwrap();

	assert_eq!(table.match_path("/a/special").unwrap().route.name(), expected);
	assert_eq!(table.match_path("/a/other").unwrap().route.name(), "item");
}

#[rstest]
fn test_duplicate_name_rejected_regardless_of_path() {
	let result = RouteTable::register([
		RouteDefinition::new("/", "Home", "SensorData"),
		RouteDefinition::new("/chart", "Home", "SensorChart"),
	]);

	assert_eq!(
		result.unwrap_err(),
		ConfigurationError::DuplicateName("Home".to_string())
	);
}

#[rstest]
fn test_first_invalid_definition_is_reported() {
	let result = RouteTable::register([
		RouteDefinition::new("/", "home", "Home"),
		RouteDefinition::new("/x/*/y", "broken", "Broken"),
		RouteDefinition::new("/", "home", "Home"),
	]);

	let err = result.unwrap_err();
	assert!(matches!(
		err,
		ConfigurationError::MalformedPattern {
			ref name,
			source: PatternError::WildcardNotLast(_),
			..
		} if name == "broken"
	));
}

#[rstest]
fn test_definitions_load_from_json() {
	let json = r#"[
		{"path": "/", "name": "SensorData", "view": "SensorData"},
		{"path": "/chart", "name": "SensorChart", "view": "SensorChart"}
	]"#;
	let definitions: Vec<RouteDefinition> = serde_json::from_str(json).unwrap();

	let table = RouteTable::register(definitions).unwrap();

	assert_eq!(table.len(), 2);
	assert_eq!(table.get("SensorChart").unwrap().pattern().as_str(), "/chart");
}
