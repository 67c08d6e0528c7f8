//! Sensor Dashboard
//!
//! Routes a two-view sensor dashboard (a readings table at `/` and a chart at
//! `/chart`) through an in-memory history and prints what each navigation
//! renders.
//!
//! ## Usage
//!
//! ```bash
//! sensor-dashboard /chart back forward @SensorData /missing
//! WAYPOINT_BASE_PATH=/dashboard sensor-dashboard -v /chart
//! ```

mod views;

use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use waypoint::conf::sources::{DefaultSource, EnvSource, TomlFileSource, TomlStrSource};
use waypoint::prelude::*;

/// Routes compiled into the binary; a config file on disk overrides them.
const EMBEDDED_ROUTES: &str = include_str!("../routes.toml");

#[derive(Parser)]
#[command(name = "sensor-dashboard")]
#[command(about = "Drive the sensor dashboard router from the command line", long_about = None)]
#[command(version)]
struct Cli {
	/// Route configuration file
	#[arg(short, long, value_name = "PATH", default_value = "routes.toml")]
	config: PathBuf,

	/// Base path override (takes precedence over WAYPOINT_BASE_PATH)
	#[arg(long, value_name = "PATH")]
	base_path: Option<String>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,

	/// Navigation steps: a path (`/chart`), a route name (`@SensorChart`),
	/// `back` or `forward`
	#[arg(value_name = "STEP")]
	steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
	Path(String),
	Named(String),
	Back,
	Forward,
}

impl FromStr for Step {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"back" => Ok(Self::Back),
			"forward" => Ok(Self::Forward),
			_ => {
				if let Some(name) = raw.strip_prefix('@') {
					if name.is_empty() {
						return Err("route name after '@' must not be empty".to_string());
					}
					Ok(Self::Named(name.to_string()))
				} else if raw.starts_with('/') {
					Ok(Self::Path(raw.to_string()))
				} else {
					Err(format!(
						"'{}' is not a step: use a path starting with '/', '@RouteName', 'back' or 'forward'",
						raw
					))
				}
			}
		}
	}
}

fn init_tracing(verbosity: u8) {
	let default_level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.init();
}

fn load_settings(config: PathBuf) -> Result<RouterSettings, waypoint::SettingsError> {
	SettingsBuilder::new()
		.add_source(DefaultSource::new().with_value("base_path", "/".into()))
		.add_source(TomlStrSource::new(EMBEDDED_ROUTES))
		.add_source(TomlFileSource::new(config))
		.add_source(EnvSource::new())
		.build()
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	let mut settings = load_settings(cli.config).context("failed to load route settings")?;
	if let Some(base_path) = cli.base_path {
		settings.base_path = base_path;
	}

	let history = Rc::new(MemoryHistory::with_initial(settings.base_path().join("/")));
	let router = settings
		.into_router(history.clone())
		.context("invalid route configuration")?;

	let views = Rc::new(views::dashboard());
	for missing in views.missing_views(router.table()) {
		tracing::warn!("Route view '{}' has no renderer", missing);
	}

	{
		let views = Rc::clone(&views);
		let history = Rc::clone(&history);
		router.subscribe(move |current: &CurrentRoute| {
			if let Some(output) = views.render(current) {
				println!("{:<24} {}", history.location(), output);
			}
		});
	}

	router.start();

	for step in cli.steps {
		let result = match &step {
			Step::Path(path) => router.navigate(path.as_str()),
			Step::Named(name) => router.navigate(NavigationTarget::named(name.as_str())),
			Step::Back => {
				router.back();
				Ok(())
			}
			Step::Forward => {
				router.forward();
				Ok(())
			}
		};
		result.with_context(|| format!("step {:?} failed", step))?;
	}

	println!("history: {}", history.entries().join(" -> "));
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("back", Step::Back)]
	#[case("forward", Step::Forward)]
	#[case("@SensorChart", Step::Named("SensorChart".to_string()))]
	#[case("/chart?sensor=3", Step::Path("/chart?sensor=3".to_string()))]
	fn test_parse_step(#[case] raw: &str, #[case] expected: Step) {
		assert_eq!(raw.parse::<Step>().unwrap(), expected);
	}

	#[rstest]
	#[case("@")]
	#[case("chart")]
	fn test_parse_step_rejects(#[case] raw: &str) {
		assert!(raw.parse::<Step>().is_err());
	}

	#[rstest]
	fn test_embedded_routes_build_a_table() {
		let settings = RouterSettings::from_toml_str(EMBEDDED_ROUTES).unwrap();

		let table = settings.route_table().unwrap();

		assert!(table.contains("SensorData"));
		assert!(table.contains("SensorChart"));
	}
}
