//! Router and history errors.

use thiserror::Error;

/// Errors returned by navigation operations.
///
/// A failed navigation never changes the current route. An unmatched path is
/// not an error; it resolves to [`CurrentRoute::NotFound`](super::CurrentRoute::NotFound).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// No route is registered under this name.
	#[error("unknown route name: {0}")]
	UnknownRoute(String),

	/// A named route needs a parameter that was not supplied.
	#[error("missing parameter '{parameter}' for route '{route}'")]
	MissingParameter {
		/// The route being navigated to.
		route: String,
		/// The parameter with no value.
		parameter: String,
	},

	/// The query pairs of a named target could not be encoded.
	#[error("invalid query string: {0}")]
	InvalidQuery(String),

	/// The history host rejected the update.
	#[error("navigation failed: {0}")]
	NavigationFailed(#[from] HistoryError),
}

/// Errors reported by a [`History`](super::History) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
	/// The host has no history to drive (e.g. no global `window`).
	#[error("history is unavailable: {0}")]
	Unavailable(String),

	/// The host refused a push or replace.
	#[error("history update rejected: {0}")]
	Rejected(String),
}
