//! End-to-end tests through the `waypoint` facade
//!
//! Settings are loaded from TOML, turned into a router over an in-memory
//! history, and the current route is rendered through a view registry.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};
use waypoint::conf::sources::TomlStrSource;
use waypoint::prelude::*;

const DASHBOARD: &str = r#"
base_path = "/dashboard"

[[routes]]
path = "/"
name = "SensorData"
view = "SensorData"

[[routes]]
path = "/chart"
name = "SensorChart"
view = "SensorChart"
"#;

struct Dashboard {
	router: Router,
	history: Rc<MemoryHistory>,
	rendered: Rc<RefCell<Vec<String>>>,
}

#[fixture]
fn dashboard() -> Dashboard {
	let settings = SettingsBuilder::new()
		.add_source(TomlStrSource::new(DASHBOARD))
		.build()
		.unwrap();
	let history = Rc::new(MemoryHistory::with_initial("/dashboard"));
	let router = settings.into_router(history.clone()).unwrap();

	let views = ViewRegistry::new()
		.view("SensorData", |_| "table".to_string())
		.view("SensorChart", |_| "chart".to_string())
		.not_found(|missing| format!("404 {}", missing.request()));
	let rendered = Rc::new(RefCell::new(Vec::new()));
	{
		let rendered = Rc::clone(&rendered);
		router.subscribe(move |current: &CurrentRoute| {
			if let Some(output) = views.render(current) {
				rendered.borrow_mut().push(output);
			}
		});
	}
	router.start();

	Dashboard {
		router,
		history,
		rendered,
	}
}

#[rstest]
fn test_initial_load_renders_sensor_data(dashboard: Dashboard) {
	assert_eq!(*dashboard.rendered.borrow(), vec!["table"]);
	assert_eq!(dashboard.router.state(), RouterState::Active);
}

#[rstest]
fn test_navigation_history_and_rendering(dashboard: Dashboard) {
	// Act
	dashboard.router.navigate(NavigationTarget::named("SensorChart")).unwrap();
	dashboard.router.navigate("/unknown").unwrap();
	dashboard.router.back();
	dashboard.router.back();
	dashboard.router.forward();

	// Assert
	assert_eq!(
		*dashboard.rendered.borrow(),
		vec!["table", "chart", "404 /dashboard/unknown", "chart", "table", "chart"]
	);
	assert_eq!(
		dashboard.history.entries(),
		vec!["/dashboard", "/dashboard/chart", "/dashboard/unknown"]
	);
}

#[rstest]
fn test_unknown_route_name_is_an_error(dashboard: Dashboard) {
	let result = dashboard.router.navigate(NavigationTarget::named("Settings"));

	assert_eq!(result, Err(RouterError::UnknownRoute("Settings".to_string())));
	assert_eq!(dashboard.rendered.borrow().len(), 1);
}
